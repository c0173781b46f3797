//! Rate limit status.
//!
//! Querying `/rate_limit` does not count against the primary rate limit.

use crate::client::GitHubClient;
use crate::codec::Timestamp;
use crate::errors::GitHubResult;
use serde::{Deserialize, Serialize};

/// Service for rate limit queries.
pub struct RateLimitService<'a> {
    client: &'a GitHubClient,
}

impl<'a> RateLimitService<'a> {
    /// Creates a new rate limit service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Gets the current limits of every resource category.
    pub async fn get(&self) -> GitHubResult<RateLimits> {
        let response: RateLimitResponse = self.client.get("/rate_limit").await?;
        Ok(response.resources.unwrap_or_default())
    }
}

/// Limit of one resource category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// Requests allowed per window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Requests left in the current window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used: Option<u32>,
    /// When the window resets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

/// Limits per resource category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphql: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration_manifest: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_import: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_scanning_upload: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions_runner_registration: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scim: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_snapshots: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_log: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_search: Option<Rate>,
}

#[derive(Debug, Deserialize)]
struct RateLimitResponse {
    #[serde(default)]
    resources: Option<RateLimits>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::assert_round_trip;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test]
    fn test_reset_is_unix_seconds() {
        let response: RateLimitResponse = serde_json::from_value(json!({
            "resources": {
                "core": {"limit": 5000, "remaining": 4999, "reset": 1372700873, "used": 1, "resource": "core"},
                "search": {"limit": 30, "remaining": 18, "reset": 1372697452, "used": 12}
            },
            "rate": {"limit": 5000, "remaining": 4999, "reset": 1372700873, "used": 1}
        }))
        .unwrap();

        let limits = response.resources.unwrap();
        let core = limits.core.unwrap();
        assert_eq!(core.remaining, Some(4999));
        assert_eq!(core.reset.map(|t| t.as_datetime().timestamp()), Some(1_372_700_873));
        assert_eq!(limits.search.and_then(|s| s.used), Some(12));
        assert!(limits.graphql.is_none());
    }

    #[test_case(json!({}) ; "empty")]
    #[test_case(json!({
        "core": {"limit": 5000, "remaining": 4999, "used": 1, "reset": "2013-07-01T17:47:53Z", "resource": "core"},
        "search": {"limit": 30, "remaining": 18, "used": 12, "reset": "2013-07-01T16:50:52Z"},
        "code_search": {"limit": 10, "remaining": 10, "used": 0}
    }) ; "populated")]
    fn test_rate_limits_round_trip(value: Value) {
        assert_round_trip::<RateLimits>(value);
    }
}
