//! Structured logging for API calls.
//!
//! The crate never installs a subscriber; applications decide where these
//! events go.

use crate::errors::{GitHubError, RateLimitInfo};
use reqwest::header::HeaderMap;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, trace, warn, Level};

/// Sensitive headers that should be redacted in logs.
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "x-github-token",
    "x-access-token",
    "cookie",
    "set-cookie",
];

/// Redacts sensitive values in headers.
pub fn redact_header(name: &str, value: &str) -> String {
    if SENSITIVE_HEADERS.contains(&name.to_lowercase().as_str()) {
        "[REDACTED]".to_string()
    } else {
        value.to_string()
    }
}

/// Strips the query string from a URL before logging it.
pub fn loggable_url(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

/// Measures the duration of one request.
#[derive(Debug)]
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Starts a timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Gets elapsed time.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Tracing hooks for GitHub API operations.
pub struct TracingHooks;

impl TracingHooks {
    /// Logs the start of an API request.
    pub fn on_request_start(method: &str, url: &str) {
        debug!(
            method = %method,
            url = %loggable_url(url),
            "GitHub API request started"
        );
    }

    /// Logs the completion of an API request.
    pub fn on_request_complete(method: &str, url: &str, status: u16, duration: Duration) {
        info!(
            method = %method,
            url = %loggable_url(url),
            status = status,
            duration_ms = duration.as_millis() as u64,
            "GitHub API request completed"
        );
    }

    /// Logs a request error.
    pub fn on_request_error(method: &str, url: &str, err: &GitHubError) {
        error!(
            method = %method,
            url = %loggable_url(url),
            kind = %err.kind(),
            status = err.status_code(),
            request_id = err.request_id(),
            error = %err,
            "GitHub API request failed"
        );
    }

    /// Logs response headers at trace level, with credentials redacted.
    pub fn on_response_headers(headers: &HeaderMap) {
        if !tracing::enabled!(Level::TRACE) {
            return;
        }
        for (name, value) in headers {
            trace!(
                header = %name,
                value = %redact_header(name.as_str(), value.to_str().unwrap_or("<non-ascii>")),
                "GitHub API response header"
            );
        }
    }

    /// Logs rate limit info.
    pub fn on_rate_limit_update(info: &RateLimitInfo) {
        debug!(
            limit = info.limit,
            remaining = info.remaining,
            reset_at = %info.reset_at,
            resource = info.resource.as_deref().unwrap_or("core"),
            "Rate limit updated"
        );
        if info.remaining == 0 {
            warn!(
                limit = info.limit,
                reset_at = %info.reset_at,
                resource = info.resource.as_deref().unwrap_or("core"),
                "Rate limit exhausted"
            );
        }
    }

    /// Logs webhook verification.
    pub fn on_webhook_verified(event_type: &str, success: bool) {
        if success {
            debug!(
                event_type = %event_type,
                "Webhook signature verified successfully"
            );
        } else {
            warn!(
                event_type = %event_type,
                "Webhook signature verification failed"
            );
        }
    }
}
