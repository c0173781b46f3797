//! Pagination handling for GitHub API.

use crate::errors::{GitHubResult, RateLimitInfo};
use futures::future::BoxFuture;
use reqwest::header::HeaderMap;
use serde::Serialize;

/// Maximum page size GitHub accepts.
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination links parsed from Link header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationLinks {
    /// URL for the next page.
    pub next: Option<String>,
    /// URL for the previous page.
    pub prev: Option<String>,
    /// URL for the first page.
    pub first: Option<String>,
    /// URL for the last page.
    pub last: Option<String>,
}

impl PaginationLinks {
    /// Parses pagination links from the Link header (RFC 8288).
    pub fn from_header(header_value: &str) -> Self {
        let mut links = Self::default();

        for part in header_value.split(',') {
            let mut url = None;
            let mut rel = None;

            for segment in part.split(';') {
                let segment = segment.trim();
                if let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
                    url = Some(inner.to_string());
                } else if let Some(value) = segment.strip_prefix("rel=") {
                    rel = Some(value.trim_matches('"').to_string());
                }
            }

            if let (Some(url), Some(rel)) = (url, rel) {
                match rel.as_str() {
                    "next" => links.next = Some(url),
                    "prev" => links.prev = Some(url),
                    "first" => links.first = Some(url),
                    "last" => links.last = Some(url),
                    _ => {}
                }
            }
        }

        links
    }

    /// Parses pagination links from response headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get("link")
            .and_then(|v| v.to_str().ok())
            .map(Self::from_header)
            .unwrap_or_default()
    }

    /// Returns true if there is a next page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns true if there is a previous page.
    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }

    /// Page number of the next page.
    pub fn next_page(&self) -> Option<u32> {
        self.next.as_deref().and_then(extract_page_number)
    }

    /// Page number of the last page, i.e. the total page count.
    pub fn last_page(&self) -> Option<u32> {
        self.last.as_deref().and_then(extract_page_number)
    }

    /// `after` cursor of the next page, for cursor-paginated endpoints.
    pub fn next_cursor(&self) -> Option<String> {
        self.next
            .as_deref()
            .and_then(|url| query_value(url, "after"))
    }
}

/// A single page of results.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Pagination links.
    pub links: PaginationLinks,
    /// Rate limit headers of the response, if present.
    pub rate_limit: Option<RateLimitInfo>,
}

impl<T> Page<T> {
    /// Creates a new page.
    pub fn new(items: Vec<T>, links: PaginationLinks) -> Self {
        Self {
            items,
            links,
            rate_limit: None,
        }
    }

    /// Attaches rate limit info.
    pub fn with_rate_limit(mut self, info: Option<RateLimitInfo>) -> Self {
        self.rate_limit = info;
        self
    }

    /// Returns true if there is a next page.
    pub fn has_next(&self) -> bool {
        self.links.has_next()
    }

    /// Returns the URL for the next page.
    pub fn next_url(&self) -> Option<&str> {
        self.links.next.as_deref()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the page and returns the items.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Offset pagination parameters shared by most list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListOptions {
    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page (max 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl ListOptions {
    /// Creates new pagination parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page number.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets items per page.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page.min(MAX_PER_PAGE));
        self
    }
}

/// Cursor pagination parameters (audit log, hook deliveries).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListCursorOptions {
    /// Cursor to fetch results after.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    /// Cursor to fetch results before.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Opaque cursor used by hook deliveries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Page number, for endpoints that accept both styles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    /// Items per page (max 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Fetches a page given the absolute URL of the next page (`None` for the first).
pub type PageFetcher<T> =
    Box<dyn FnMut(Option<String>) -> BoxFuture<'static, GitHubResult<Page<T>>> + Send>;

/// Async iterator following `next` links until the last page.
pub struct PageIterator<T> {
    fetch_fn: PageFetcher<T>,
    next_url: Option<String>,
    exhausted: bool,
}

impl<T> PageIterator<T> {
    /// Creates a new page iterator.
    pub fn new(fetch_fn: PageFetcher<T>) -> Self {
        Self {
            fetch_fn,
            next_url: None,
            exhausted: false,
        }
    }

    /// Fetches the next page.
    pub async fn next_page(&mut self) -> GitHubResult<Option<Page<T>>> {
        if self.exhausted {
            return Ok(None);
        }

        // The cursor advances only after a successful fetch.
        let page = (self.fetch_fn)(self.next_url.clone()).await?;

        self.exhausted = page.links.next.is_none();
        self.next_url = page.links.next.clone();

        Ok(Some(page))
    }

    /// Collects all items from all pages.
    pub async fn collect_all(mut self) -> GitHubResult<Vec<T>> {
        let mut all_items = Vec::new();

        while let Some(page) = self.next_page().await? {
            all_items.extend(page.into_items());
        }

        Ok(all_items)
    }

    /// Returns true if there are more pages.
    pub fn has_more(&self) -> bool {
        !self.exhausted
    }
}

fn query_value(url: &str, key: &str) -> Option<String> {
    url::Url::parse(url).ok().and_then(|u| {
        u.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    })
}

/// Extracts page number from a URL.
pub fn extract_page_number(url: &str) -> Option<u32> {
    query_value(url, "page").and_then(|v| v.parse().ok())
}
