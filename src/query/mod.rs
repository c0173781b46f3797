//! URL construction: query-string options and path segments.

use crate::errors::{GitHubError, GitHubErrorKind, GitHubResult};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Serialize, Serializer};
use std::fmt::Display;
use url::form_urlencoded;

/// Characters left as-is inside a single path segment (RFC 3986 unreserved).
const PATH_SEGMENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Appends the fields of an options struct to `path` as a query string.
///
/// Unset (`None`) fields are skipped. Parameters already present on `path`
/// are kept. The resulting pairs are sorted by key so the same options always
/// produce the same URL; pairs sharing a key keep their relative order.
pub fn add_options<T: Serialize + ?Sized>(path: &str, opts: &T) -> GitHubResult<String> {
    let encoded = serde_urlencoded::to_string(opts).map_err(|e| {
        GitHubError::new(
            GitHubErrorKind::InvalidParameter,
            format!("Failed to serialize parameters: {}", e),
        )
        .with_cause(e)
    })?;

    let (base, existing) = match path.split_once('?') {
        Some((base, query)) => (base, query),
        None => (path, ""),
    };

    let mut pairs: Vec<(String, String)> = form_urlencoded::parse(existing.as_bytes())
        .chain(form_urlencoded::parse(encoded.as_bytes()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if pairs.is_empty() {
        return Ok(base.to_string());
    }

    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();

    Ok(format!("{}?{}", base, query))
}

/// Serializes an optional list as a single comma-joined query value.
///
/// Use with `serialize_with` and `skip_serializing_if = "Option::is_none"`.
pub fn comma_separated<T, S>(values: &Option<Vec<T>>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    match values {
        Some(values) => {
            let joined = values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            serializer.serialize_str(&joined)
        }
        None => serializer.serialize_none(),
    }
}

/// Validates and percent-encodes one caller-supplied path segment.
///
/// `name` is used in the error message. Empty values and values that would
/// traverse out of the resource path (`.`, `..`) are rejected before any
/// request is built. Slashes are encoded, so `feature/x` stays one segment.
pub fn segment(name: &str, value: &str) -> GitHubResult<String> {
    if value.is_empty() {
        return Err(GitHubError::missing_parameter(name));
    }
    if value == "." || value == ".." || value.split('/').any(|part| part == "..") {
        return Err(GitHubError::new(
            GitHubErrorKind::PathForbidden,
            format!("{} must not contain '..' path segments: {:?}", name, value),
        ));
    }
    Ok(utf8_percent_encode(value, PATH_SEGMENT_SET).to_string())
}

/// Builds `/repos/{owner}/{repo}` from validated segments.
pub fn repo_path(owner: &str, repo: &str) -> GitHubResult<String> {
    Ok(format!(
        "/repos/{}/{}",
        segment("owner", owner)?,
        segment("repo", repo)?
    ))
}

/// Builds `/orgs/{org}` from a validated segment.
pub fn org_path(org: &str) -> GitHubResult<String> {
    Ok(format!("/orgs/{}", segment("org", org)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Serialize, Default)]
    struct Opts {
        #[serde(skip_serializing_if = "Option::is_none")]
        state: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        direction: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none", serialize_with = "comma_separated")]
        labels: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        per_page: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        after: Option<String>,
    }

    #[test]
    fn test_empty_options_leave_path_alone() {
        assert_eq!(add_options("/repos/o/r/issues", &Opts::default()).unwrap(), "/repos/o/r/issues");
    }

    #[test]
    fn test_parameters_are_sorted() {
        let opts = Opts {
            state: Some("open".into()),
            direction: Some("asc".into()),
            per_page: Some(0),
            after: Some("c1".into()),
            ..Default::default()
        };
        assert_eq!(
            add_options("/issues", &opts).unwrap(),
            "/issues?after=c1&direction=asc&per_page=0&state=open"
        );
    }

    #[test]
    fn test_comma_separated_and_escaping() {
        let opts = Opts {
            labels: Some(vec!["bug".into(), "good first issue".into()]),
            ..Default::default()
        };
        assert_eq!(
            add_options("/issues", &opts).unwrap(),
            "/issues?labels=bug%2Cgood+first+issue"
        );
    }

    #[test]
    fn test_existing_query_is_merged() {
        let opts = Opts {
            state: Some("all".into()),
            ..Default::default()
        };
        assert_eq!(
            add_options("/issues?page=2", &opts).unwrap(),
            "/issues?page=2&state=all"
        );
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("branch", "feature/x").unwrap(), "feature%2Fx");
        assert_eq!(segment("name", "good first issue").unwrap(), "good%20first%20issue");
        assert_eq!(segment("repo", "my-repo.rs").unwrap(), "my-repo.rs");
    }

    #[test]
    fn test_segment_validation() {
        let err = segment("owner", "").unwrap_err();
        assert_eq!(*err.kind(), GitHubErrorKind::MissingParameter);

        let err = segment("repo", "..").unwrap_err();
        assert_eq!(*err.kind(), GitHubErrorKind::PathForbidden);

        let err = segment("branch", "a/../b").unwrap_err();
        assert_eq!(*err.kind(), GitHubErrorKind::PathForbidden);
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_repo_path() {
        assert_eq!(repo_path("octo cat", "hello").unwrap(), "/repos/octo%20cat/hello");
        assert!(repo_path("o", "").is_err());
    }
}
