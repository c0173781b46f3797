//! Organization and enterprise audit log.
//!
//! Entries have a small common core and a long tail of action-specific keys.
//! The core is modelled; everything else is kept verbatim in
//! [`AuditEntry::additional_fields`] and written back out on encode.

use crate::client::GitHubClient;
use crate::codec::Timestamp;
use crate::errors::GitHubResult;
use crate::pagination::{ListCursorOptions, Page};
use crate::query::{org_path, segment};
use crate::types::Direction;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Service for audit log queries.
pub struct AuditLogService<'a> {
    client: &'a GitHubClient,
}

impl<'a> AuditLogService<'a> {
    /// Creates a new audit log service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Queries the audit log of an organization. Uses cursor pagination.
    pub async fn get_for_org(&self, org: &str, opts: &GetAuditLogOptions) -> GitHubResult<Page<AuditEntry>> {
        let path = format!("{}/audit-log", org_path(org)?);
        self.client.get_page(&path, opts).await
    }

    /// Queries the audit log of an enterprise.
    pub async fn get_for_enterprise(
        &self,
        enterprise: &str,
        opts: &GetAuditLogOptions,
    ) -> GitHubResult<Page<AuditEntry>> {
        let path = format!("/enterprises/{}/audit-log", segment("enterprise", enterprise)?);
        self.client.get_page(&path, opts).await
    }
}

/// Event sources included in audit log results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditLogInclude {
    /// Web (non-Git) events. The default.
    Web,
    /// Git events.
    Git,
    /// Both.
    All,
}

/// Audit log query options.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetAuditLogOptions {
    /// Search phrase, e.g. `action:org.add_member actor:octocat`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<AuditLogInclude>,
    /// Order of events by `@timestamp`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Direction>,
    /// Cursor pagination.
    #[serde(flatten)]
    pub cursor: ListCursorOptions,
}

/// Location the action was performed from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// One audit log event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Action name, e.g. `repo.create`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Login of the user or app that performed the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_location: Option<ActorLocation>,
    /// Enterprise slug.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(rename = "_document_id", skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_identity_nameid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_identity_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashed_token: Option<String>,
    /// Organization login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<i64>,
    /// When the event was recorded.
    #[serde(rename = "@timestamp", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<i64>,
    /// Comma-separated OAuth scopes of the token used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_scopes: Option<String>,
    /// Login of the user affected by the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Every key not modelled above, kept verbatim.
    #[serde(flatten)]
    pub additional_fields: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::add_options;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_unknown_keys_are_kept() {
        let value = json!({
            "@timestamp": 1_615_077_308_538_i64,
            "_document_id": "beeZYapIUe-wKg5-beadb33",
            "action": "workflows.completed_workflow_run",
            "actor": "testactor",
            "actor_location": {"country_code": "US"},
            "created_at": 1_615_077_308_538_i64,
            "org": "o",
            "conclusion": "success",
            "head_branch": "master",
            "workflow_run_id": 628312345
        });

        let entry: AuditEntry = serde_json::from_value(value).unwrap();
        assert_eq!(entry.action.as_deref(), Some("workflows.completed_workflow_run"));
        assert_eq!(
            entry.timestamp.map(|t| t.as_datetime().timestamp_millis()),
            Some(1_615_077_308_538)
        );
        assert_eq!(entry.additional_fields.len(), 3);
        assert_eq!(entry.additional_fields["conclusion"], json!("success"));
        assert!(!entry.additional_fields.contains_key("actor"));

        let encoded = serde_json::to_value(&entry).unwrap();
        assert_eq!(encoded["head_branch"], json!("master"));
        assert_eq!(encoded["workflow_run_id"], json!(628312345));
        assert_eq!(encoded["@timestamp"], json!("2021-03-07T00:35:08.538Z"));
    }

    #[test]
    fn test_audit_log_query() {
        let opts = GetAuditLogOptions {
            phrase: Some("action:repo.create".to_string()),
            include: Some(AuditLogInclude::All),
            order: Some(Direction::Desc),
            cursor: ListCursorOptions {
                after: Some("abc".to_string()),
                per_page: Some(50),
                ..Default::default()
            },
        };
        assert_eq!(
            add_options("/orgs/o/audit-log", &opts).unwrap(),
            "/orgs/o/audit-log?after=abc&include=all&order=desc&per_page=50&phrase=action%3Arepo.create"
        );
    }
}
