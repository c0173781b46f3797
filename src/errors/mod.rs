//! Error types for the GitHub client.
//!
//! Three families of failure reach the caller: local validation errors raised
//! before a request is built, transport errors from the HTTP layer, and remote
//! API errors decoded from non-2xx responses. Whatever response metadata was
//! available (status, request id, rate-limit headers) travels with the error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for GitHub operations.
pub type GitHubResult<T> = Result<T, GitHubError>;

/// Error kinds for categorizing GitHub errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubErrorKind {
    // Configuration errors
    /// Invalid base URL.
    InvalidBaseUrl,
    /// Invalid GitHub App credentials.
    InvalidAppCredentials,
    /// Invalid configuration.
    InvalidConfiguration,

    // Local validation errors
    /// Invalid parameter.
    InvalidParameter,
    /// Missing required parameter.
    MissingParameter,
    /// Path segment would escape the intended resource path.
    PathForbidden,

    // Authentication errors
    /// Missing credentials where a provider expected them.
    MissingAuth,
    /// Bad credentials (401).
    BadCredentials,
    /// GitHub App authentication failed.
    AppAuthenticationFailed,

    // Authorization errors
    /// Access forbidden (403).
    Forbidden,

    // Request errors
    /// Request validation failed (400).
    ValidationError,
    /// Unprocessable entity (422).
    UnprocessableEntity,

    // Resource errors
    /// Resource not found (404).
    NotFound,
    /// Resource is gone (410).
    Gone,
    /// Resource conflict (409).
    Conflict,

    // Rate limit errors
    /// Primary rate limit exceeded.
    PrimaryRateLimitExceeded,
    /// Secondary rate limit exceeded.
    SecondaryRateLimitExceeded,
    /// Abuse detection triggered.
    AbuseDetected,

    // Network errors
    /// Connection failed.
    ConnectionFailed,
    /// Request timeout.
    Timeout,
    /// Any other transport failure.
    Transport,

    // Server errors
    /// Internal server error (500, and any other 5xx without its own kind).
    InternalError,
    /// Bad gateway (502).
    BadGateway,
    /// Service unavailable (503).
    ServiceUnavailable,

    // Response errors
    /// Failed to deserialize response.
    DeserializationError,
    /// Unexpected response format.
    UnexpectedFormat,
    /// Tagged union carried a discriminator this crate does not know.
    UnknownDiscriminator,

    // Webhook errors
    /// Invalid webhook signature.
    InvalidSignature,
    /// Unsupported webhook event.
    UnsupportedEvent,
    /// Webhook payload parse error.
    PayloadParseError,

    // Generic
    /// Unknown error.
    Unknown,
}

impl fmt::Display for GitHubErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidBaseUrl => "invalid_base_url",
            Self::InvalidAppCredentials => "invalid_app_credentials",
            Self::InvalidConfiguration => "invalid_configuration",
            Self::InvalidParameter => "invalid_parameter",
            Self::MissingParameter => "missing_parameter",
            Self::PathForbidden => "path_forbidden",
            Self::MissingAuth => "missing_auth",
            Self::BadCredentials => "bad_credentials",
            Self::AppAuthenticationFailed => "app_auth_failed",
            Self::Forbidden => "forbidden",
            Self::ValidationError => "validation_error",
            Self::UnprocessableEntity => "unprocessable_entity",
            Self::NotFound => "not_found",
            Self::Gone => "gone",
            Self::Conflict => "conflict",
            Self::PrimaryRateLimitExceeded => "primary_rate_limit_exceeded",
            Self::SecondaryRateLimitExceeded => "secondary_rate_limit_exceeded",
            Self::AbuseDetected => "abuse_detected",
            Self::ConnectionFailed => "connection_failed",
            Self::Timeout => "timeout",
            Self::Transport => "transport",
            Self::InternalError => "internal_error",
            Self::BadGateway => "bad_gateway",
            Self::ServiceUnavailable => "service_unavailable",
            Self::DeserializationError => "deserialization_error",
            Self::UnexpectedFormat => "unexpected_format",
            Self::UnknownDiscriminator => "unknown_discriminator",
            Self::InvalidSignature => "invalid_signature",
            Self::UnsupportedEvent => "unsupported_event",
            Self::PayloadParseError => "payload_parse_error",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Rate limit information extracted from response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Maximum requests allowed.
    pub limit: u32,
    /// Remaining requests in current window.
    pub remaining: u32,
    /// Requests used in current window (if reported).
    pub used: Option<u32>,
    /// Time when the rate limit resets.
    pub reset_at: DateTime<Utc>,
    /// Retry-After header value in seconds (if present).
    pub retry_after: Option<u64>,
    /// Resource category.
    pub resource: Option<String>,
}

/// A single field-level error from a GitHub error body.
///
/// See <https://docs.github.com/rest/overview/resources-in-the-rest-api#client-errors>.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Resource on which the error occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Field on which the error occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Validation error code (`missing`, `missing_field`, `invalid`, `already_exists`, `custom`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Message for `custom` codes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// JSON error body returned by GitHub on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorResponseBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub documentation_url: Option<String>,
    #[serde(default, deserialize_with = "error_details")]
    pub errors: Vec<ValidationErrorDetail>,
}

impl ErrorResponseBody {
    /// Decodes an error body, keeping `message` and `documentation_url` even
    /// when the `errors` array has a shape we do not recognise.
    pub(crate) fn from_slice(bytes: &[u8]) -> Option<Self> {
        if let Ok(body) = serde_json::from_slice::<Self>(bytes) {
            return Some(body);
        }
        let value: serde_json::Value = serde_json::from_slice(bytes).ok()?;
        let text = |key: &str| value.get(key).and_then(|v| v.as_str()).map(String::from);
        let body = Self {
            message: text("message"),
            documentation_url: text("documentation_url"),
            errors: Vec::new(),
        };
        (body.message.is_some() || body.documentation_url.is_some()).then_some(body)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorEntry {
    Text(String),
    Detail(ValidationErrorDetail),
}

/// `errors` may be `null`, and its entries may be bare strings.
fn error_details<'de, D>(deserializer: D) -> Result<Vec<ValidationErrorDetail>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entries: Option<Vec<ErrorEntry>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(|entry| match entry {
            ErrorEntry::Text(message) => ValidationErrorDetail {
                message: Some(message),
                ..Default::default()
            },
            ErrorEntry::Detail(detail) => detail,
        })
        .collect())
}

/// GitHub API error with detailed information.
#[derive(Error, Debug)]
pub struct GitHubError {
    /// Error kind.
    kind: GitHubErrorKind,
    /// Error message.
    message: String,
    /// HTTP status code.
    status_code: Option<u16>,
    /// GitHub request ID.
    request_id: Option<String>,
    /// Documentation URL.
    documentation_url: Option<String>,
    /// Field-level validation errors.
    errors: Vec<ValidationErrorDetail>,
    /// Rate limit info (if applicable).
    rate_limit: Option<RateLimitInfo>,
    /// Underlying cause.
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for GitHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(code) = self.status_code {
            write!(f, " (HTTP {})", code)?;
        }
        for detail in &self.errors {
            write!(
                f,
                " [{}.{}: {}]",
                detail.resource.as_deref().unwrap_or("-"),
                detail.field.as_deref().unwrap_or("-"),
                detail
                    .message
                    .as_deref()
                    .or(detail.code.as_deref())
                    .unwrap_or("invalid")
            )?;
        }
        if let Some(ref id) = self.request_id {
            write!(f, " [request_id: {}]", id)?;
        }
        Ok(())
    }
}

impl GitHubError {
    /// Creates a new GitHub error.
    pub fn new(kind: GitHubErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            request_id: None,
            documentation_url: None,
            errors: Vec::new(),
            rate_limit: None,
            cause: None,
        }
    }

    /// Sets the HTTP status code.
    pub fn with_status(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Sets the GitHub request ID.
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Sets the documentation URL.
    pub fn with_documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }

    /// Sets the field-level validation errors.
    pub fn with_errors(mut self, errors: Vec<ValidationErrorDetail>) -> Self {
        self.errors = errors;
        self
    }

    /// Sets the rate limit info.
    pub fn with_rate_limit(mut self, info: RateLimitInfo) -> Self {
        self.rate_limit = Some(info);
        self
    }

    /// Sets the underlying cause.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Gets the error kind.
    pub fn kind(&self) -> &GitHubErrorKind {
        &self.kind
    }

    /// Gets the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the HTTP status code.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Gets the request ID.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Gets the documentation URL.
    pub fn documentation_url(&self) -> Option<&str> {
        self.documentation_url.as_deref()
    }

    /// Gets the field-level validation errors.
    pub fn errors(&self) -> &[ValidationErrorDetail] {
        &self.errors
    }

    /// Gets the rate limit info.
    pub fn rate_limit(&self) -> Option<&RateLimitInfo> {
        self.rate_limit.as_ref()
    }

    /// Returns the number of seconds the caller should wait before trying again.
    pub fn retry_after(&self) -> Option<u64> {
        let rl = self.rate_limit.as_ref()?;
        rl.retry_after.or_else(|| {
            let now = Utc::now();
            (rl.reset_at > now).then(|| (rl.reset_at - now).num_seconds() as u64)
        })
    }

    /// Returns true if this error came from a non-2xx response.
    pub fn is_api_error(&self) -> bool {
        self.status_code.is_some()
    }

    /// Returns true if this error was raised before any request was sent.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self.kind,
            GitHubErrorKind::InvalidParameter
                | GitHubErrorKind::MissingParameter
                | GitHubErrorKind::PathForbidden
        )
    }

    /// Returns true if this error is a transport failure.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self.kind,
            GitHubErrorKind::ConnectionFailed | GitHubErrorKind::Timeout | GitHubErrorKind::Transport
        )
    }

    /// Builds an error from a non-2xx status and the decoded error body.
    pub(crate) fn from_response(
        status: u16,
        body: Option<ErrorResponseBody>,
        request_id: Option<String>,
        rate_limit: Option<RateLimitInfo>,
    ) -> Self {
        let body = body.unwrap_or_default();
        let message = body
            .message
            .clone()
            .unwrap_or_else(|| format!("HTTP {} error", status));

        let kind = Self::kind_from_response(status, &message, rate_limit.as_ref());
        let mut error = Self::new(kind, message)
            .with_status(status)
            .with_errors(body.errors);

        if let Some(url) = body.documentation_url {
            error = error.with_documentation_url(url);
        }
        if let Some(id) = request_id {
            error = error.with_request_id(id);
        }
        if let Some(info) = rate_limit {
            error = error.with_rate_limit(info);
        }
        error
    }

    /// Maps an HTTP status (and, for 403/429, the message and headers) to an error kind.
    fn kind_from_response(
        status: u16,
        message: &str,
        rate_limit: Option<&RateLimitInfo>,
    ) -> GitHubErrorKind {
        if status == 403 || status == 429 {
            if rate_limit.map_or(false, |rl| rl.remaining == 0) {
                return GitHubErrorKind::PrimaryRateLimitExceeded;
            }
            let lowered = message.to_ascii_lowercase();
            if lowered.contains("secondary rate limit") {
                return GitHubErrorKind::SecondaryRateLimitExceeded;
            }
            if lowered.contains("abuse") {
                return GitHubErrorKind::AbuseDetected;
            }
        }

        match status {
            400 => GitHubErrorKind::ValidationError,
            401 => GitHubErrorKind::BadCredentials,
            403 => GitHubErrorKind::Forbidden,
            404 => GitHubErrorKind::NotFound,
            409 => GitHubErrorKind::Conflict,
            410 => GitHubErrorKind::Gone,
            422 => GitHubErrorKind::UnprocessableEntity,
            429 => GitHubErrorKind::SecondaryRateLimitExceeded,
            502 => GitHubErrorKind::BadGateway,
            503 => GitHubErrorKind::ServiceUnavailable,
            500..=599 => GitHubErrorKind::InternalError,
            _ => GitHubErrorKind::Unknown,
        }
    }

    // Convenience constructors

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::InvalidConfiguration, message)
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::InvalidParameter, message)
    }

    /// Creates a missing parameter error.
    pub fn missing_parameter(name: &str) -> Self {
        Self::new(
            GitHubErrorKind::MissingParameter,
            format!("{} must not be empty", name),
        )
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::Timeout, message)
    }

    /// Creates a webhook signature error.
    pub fn invalid_signature(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::InvalidSignature, message)
    }

    /// Creates a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::new(GitHubErrorKind::DeserializationError, message)
    }

    /// Maps a reqwest transport failure onto a kind.
    pub(crate) fn transport(e: reqwest::Error) -> Self {
        let (kind, prefix) = if e.is_timeout() {
            (GitHubErrorKind::Timeout, "Request timed out")
        } else if e.is_connect() {
            (GitHubErrorKind::ConnectionFailed, "Connection failed")
        } else {
            (GitHubErrorKind::Transport, "Request failed")
        };
        let message = format!("{}: {}", prefix, e);
        Self::new(kind, message).with_cause(e)
    }
}

/// Checks if an error is a rate limit error.
pub fn is_rate_limit_error(error: &GitHubError) -> bool {
    matches!(
        error.kind(),
        GitHubErrorKind::PrimaryRateLimitExceeded
            | GitHubErrorKind::SecondaryRateLimitExceeded
            | GitHubErrorKind::AbuseDetected
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate_limit(remaining: u32) -> RateLimitInfo {
        RateLimitInfo {
            limit: 5000,
            remaining,
            used: Some(5000 - remaining),
            reset_at: Utc::now() + chrono::Duration::minutes(10),
            retry_after: None,
            resource: Some("core".to_string()),
        }
    }

    #[test]
    fn test_error_display() {
        let error = GitHubError::new(GitHubErrorKind::NotFound, "Repository not found")
            .with_status(404)
            .with_request_id("abc123");

        let display = format!("{}", error);
        assert!(display.contains("not_found"));
        assert!(display.contains("Repository not found"));
        assert!(display.contains("404"));
        assert!(display.contains("abc123"));
    }

    #[test]
    fn test_display_includes_field_errors() {
        let body = ErrorResponseBody {
            message: Some("Validation Failed".to_string()),
            documentation_url: None,
            errors: vec![ValidationErrorDetail {
                resource: Some("Label".to_string()),
                field: Some("name".to_string()),
                code: Some("already_exists".to_string()),
                message: None,
            }],
        };
        let error = GitHubError::from_response(422, Some(body), None, None);

        assert_eq!(*error.kind(), GitHubErrorKind::UnprocessableEntity);
        assert_eq!(error.errors().len(), 1);
        assert!(error.to_string().contains("[Label.name: already_exists]"));
    }

    #[test]
    fn test_from_response() {
        let body = ErrorResponseBody {
            message: Some("Not Found".to_string()),
            documentation_url: Some("https://docs.github.com".to_string()),
            errors: Vec::new(),
        };
        let error = GitHubError::from_response(404, Some(body), Some("req-123".to_string()), None);

        assert_eq!(*error.kind(), GitHubErrorKind::NotFound);
        assert_eq!(error.status_code(), Some(404));
        assert_eq!(error.documentation_url(), Some("https://docs.github.com"));
        assert_eq!(error.request_id(), Some("req-123"));
        assert!(error.is_api_error());
    }

    #[test]
    fn test_missing_body_uses_status_message() {
        let error = GitHubError::from_response(502, None, None, None);
        assert_eq!(*error.kind(), GitHubErrorKind::BadGateway);
        assert_eq!(error.message(), "HTTP 502 error");
    }

    #[test]
    fn test_primary_rate_limit_from_headers() {
        let body = ErrorResponseBody {
            message: Some("API rate limit exceeded".to_string()),
            ..Default::default()
        };
        let error = GitHubError::from_response(403, Some(body), None, Some(rate_limit(0)));

        assert_eq!(*error.kind(), GitHubErrorKind::PrimaryRateLimitExceeded);
        assert!(is_rate_limit_error(&error));
        assert!(error.retry_after().is_some());
    }

    #[test]
    fn test_secondary_rate_limit_from_message() {
        let body = ErrorResponseBody {
            message: Some("You have exceeded a secondary rate limit.".to_string()),
            ..Default::default()
        };
        let error = GitHubError::from_response(403, Some(body), None, Some(rate_limit(4000)));
        assert_eq!(*error.kind(), GitHubErrorKind::SecondaryRateLimitExceeded);
    }

    #[test]
    fn test_plain_forbidden() {
        let body = ErrorResponseBody {
            message: Some("Must have admin rights to Repository.".to_string()),
            ..Default::default()
        };
        let error = GitHubError::from_response(403, Some(body), None, Some(rate_limit(4000)));
        assert_eq!(*error.kind(), GitHubErrorKind::Forbidden);
        assert!(!is_rate_limit_error(&error));
    }

    #[test]
    fn test_error_body_with_null_errors() {
        let body = ErrorResponseBody::from_slice(br#"{"message":"Validation Failed","errors":null}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Validation Failed"));
        assert!(body.errors.is_empty());
    }

    #[test]
    fn test_error_body_with_string_errors() {
        let body = ErrorResponseBody::from_slice(
            br#"{"message":"Validation Failed","errors":["Title is too long", {"resource":"Issue","code":"missing_field","field":"title"}]}"#,
        )
        .unwrap();
        assert_eq!(body.errors.len(), 2);
        assert_eq!(body.errors[0].message.as_deref(), Some("Title is too long"));
        assert_eq!(body.errors[1].field.as_deref(), Some("title"));
    }

    #[test]
    fn test_error_body_keeps_message_when_errors_unreadable() {
        let body = ErrorResponseBody::from_slice(
            br#"{"message":"Server Error","documentation_url":"https://docs.github.com","errors":[42]}"#,
        )
        .unwrap();
        assert_eq!(body.message.as_deref(), Some("Server Error"));
        assert_eq!(body.documentation_url.as_deref(), Some("https://docs.github.com"));
        assert!(body.errors.is_empty());
        assert!(ErrorResponseBody::from_slice(b"<html>nope</html>").is_none());
    }

    #[test]
    fn test_other_server_errors() {
        for status in [500, 504, 599] {
            let error = GitHubError::from_response(status, None, None, None);
            assert_eq!(*error.kind(), GitHubErrorKind::InternalError);
        }
        assert_eq!(*GitHubError::from_response(503, None, None, None).kind(), GitHubErrorKind::ServiceUnavailable);
    }

    #[test]
    fn test_error_categories() {
        assert!(GitHubError::missing_parameter("owner").is_validation_error());
        assert!(GitHubError::timeout("slow").is_transport_error());
        assert!(!GitHubError::timeout("slow").is_api_error());
    }
}
