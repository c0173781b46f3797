//! Webhook configuration for repositories and organizations.
//!
//! These endpoints manage where GitHub sends events. Verifying and parsing the
//! events themselves lives in [`crate::webhooks`].

use crate::client::GitHubClient;
use crate::codec::Timestamp;
use crate::errors::GitHubResult;
use crate::pagination::{ListCursorOptions, ListOptions, Page};
use crate::query::{org_path, repo_path};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Hook name GitHub requires for repository and organization webhooks.
pub const DEFAULT_HOOK_NAME: &str = "web";

/// Service for webhook configuration.
pub struct HooksService<'a> {
    client: &'a GitHubClient,
}

impl<'a> HooksService<'a> {
    /// Creates a new hooks service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    // Repository hooks

    /// Creates a repository webhook. `hook.name` defaults to `web`.
    pub async fn create_hook(&self, owner: &str, repo: &str, hook: &Hook) -> GitHubResult<Hook> {
        self.create_at(&Self::repo_hooks(owner, repo)?, hook).await
    }

    /// Lists repository webhooks.
    pub async fn list_hooks(&self, owner: &str, repo: &str, opts: &ListOptions) -> GitHubResult<Page<Hook>> {
        self.client.get_page(&Self::repo_hooks(owner, repo)?, opts).await
    }

    /// Gets a repository webhook.
    pub async fn get_hook(&self, owner: &str, repo: &str, id: u64) -> GitHubResult<Hook> {
        self.client
            .get(&format!("{}/{}", Self::repo_hooks(owner, repo)?, id))
            .await
    }

    /// Edits a repository webhook.
    pub async fn edit_hook(&self, owner: &str, repo: &str, id: u64, hook: &Hook) -> GitHubResult<Hook> {
        self.client
            .patch(&format!("{}/{}", Self::repo_hooks(owner, repo)?, id), hook)
            .await
    }

    /// Deletes a repository webhook.
    pub async fn delete_hook(&self, owner: &str, repo: &str, id: u64) -> GitHubResult<()> {
        self.client
            .delete(&format!("{}/{}", Self::repo_hooks(owner, repo)?, id))
            .await
    }

    /// Sends a `ping` event to a repository webhook.
    pub async fn ping_hook(&self, owner: &str, repo: &str, id: u64) -> GitHubResult<()> {
        self.client
            .post_empty(&format!("{}/{}/pings", Self::repo_hooks(owner, repo)?, id))
            .await
    }

    /// Triggers the hook with the latest push to the repository.
    pub async fn test_hook(&self, owner: &str, repo: &str, id: u64) -> GitHubResult<()> {
        self.client
            .post_empty(&format!("{}/{}/tests", Self::repo_hooks(owner, repo)?, id))
            .await
    }

    /// Gets the delivery configuration of a repository webhook.
    pub async fn get_hook_config(&self, owner: &str, repo: &str, id: u64) -> GitHubResult<HookConfig> {
        self.client
            .get(&format!("{}/{}/config", Self::repo_hooks(owner, repo)?, id))
            .await
    }

    /// Edits the delivery configuration of a repository webhook.
    pub async fn edit_hook_config(
        &self,
        owner: &str,
        repo: &str,
        id: u64,
        config: &HookConfig,
    ) -> GitHubResult<HookConfig> {
        self.client
            .patch(&format!("{}/{}/config", Self::repo_hooks(owner, repo)?, id), config)
            .await
    }

    /// Lists deliveries of a repository webhook. Uses cursor pagination.
    pub async fn list_hook_deliveries(
        &self,
        owner: &str,
        repo: &str,
        id: u64,
        opts: &ListCursorOptions,
    ) -> GitHubResult<Page<HookDelivery>> {
        let path = format!("{}/{}/deliveries", Self::repo_hooks(owner, repo)?, id);
        self.client.get_page(&path, opts).await
    }

    /// Gets one delivery, including request and response payloads.
    pub async fn get_hook_delivery(
        &self,
        owner: &str,
        repo: &str,
        hook_id: u64,
        delivery_id: u64,
    ) -> GitHubResult<HookDelivery> {
        self.client
            .get(&format!(
                "{}/{}/deliveries/{}",
                Self::repo_hooks(owner, repo)?,
                hook_id,
                delivery_id
            ))
            .await
    }

    /// Asks GitHub to send a delivery again.
    pub async fn redeliver_hook_delivery(
        &self,
        owner: &str,
        repo: &str,
        hook_id: u64,
        delivery_id: u64,
    ) -> GitHubResult<()> {
        self.client
            .post_empty(&format!(
                "{}/{}/deliveries/{}/attempts",
                Self::repo_hooks(owner, repo)?,
                hook_id,
                delivery_id
            ))
            .await
    }

    // Organization hooks

    /// Creates an organization webhook. `hook.name` defaults to `web`.
    pub async fn create_org_hook(&self, org: &str, hook: &Hook) -> GitHubResult<Hook> {
        self.create_at(&Self::org_hooks(org)?, hook).await
    }

    /// Lists organization webhooks.
    pub async fn list_org_hooks(&self, org: &str, opts: &ListOptions) -> GitHubResult<Page<Hook>> {
        self.client.get_page(&Self::org_hooks(org)?, opts).await
    }

    /// Gets an organization webhook.
    pub async fn get_org_hook(&self, org: &str, id: u64) -> GitHubResult<Hook> {
        self.client
            .get(&format!("{}/{}", Self::org_hooks(org)?, id))
            .await
    }

    /// Edits an organization webhook.
    pub async fn edit_org_hook(&self, org: &str, id: u64, hook: &Hook) -> GitHubResult<Hook> {
        self.client
            .patch(&format!("{}/{}", Self::org_hooks(org)?, id), hook)
            .await
    }

    /// Deletes an organization webhook.
    pub async fn delete_org_hook(&self, org: &str, id: u64) -> GitHubResult<()> {
        self.client
            .delete(&format!("{}/{}", Self::org_hooks(org)?, id))
            .await
    }

    /// Sends a `ping` event to an organization webhook.
    pub async fn ping_org_hook(&self, org: &str, id: u64) -> GitHubResult<()> {
        self.client
            .post_empty(&format!("{}/{}/pings", Self::org_hooks(org)?, id))
            .await
    }

    /// Gets the delivery configuration of an organization webhook.
    pub async fn get_org_hook_config(&self, org: &str, id: u64) -> GitHubResult<HookConfig> {
        self.client
            .get(&format!("{}/{}/config", Self::org_hooks(org)?, id))
            .await
    }

    /// Edits the delivery configuration of an organization webhook.
    pub async fn edit_org_hook_config(&self, org: &str, id: u64, config: &HookConfig) -> GitHubResult<HookConfig> {
        self.client
            .patch(&format!("{}/{}/config", Self::org_hooks(org)?, id), config)
            .await
    }

    async fn create_at(&self, path: &str, hook: &Hook) -> GitHubResult<Hook> {
        if hook.name.is_some() {
            return self.client.post(path, hook).await;
        }
        let hook = Hook {
            name: Some(DEFAULT_HOOK_NAME.to_string()),
            ..hook.clone()
        };
        self.client.post(path, &hook).await
    }

    fn repo_hooks(owner: &str, repo: &str) -> GitHubResult<String> {
        Ok(format!("{}/hooks", repo_path(owner, repo)?))
    }

    fn org_hooks(org: &str) -> GitHubResult<String> {
        Ok(format!("{}/hooks", org_path(org)?))
    }
}

/// A repository or organization webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    /// Hook ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Repository or Organization.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub hook_type: Option<String>,
    /// Always `web` for webhooks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ping_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliveries_url: Option<String>,
    /// Events the hook is triggered for (`*` for all).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    /// Whether deliveries are sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Delivery configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<HookConfig>,
    /// Result of the most recent delivery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_response: Option<HookLastResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

/// Where and how a hook delivers payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookConfig {
    /// json or form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// "0" verifies TLS certificates, "1" skips verification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure_ssl: Option<String>,
    /// Payload URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Signing secret. GitHub echoes it back masked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

/// Outcome of the most recent delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookLastResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One delivery attempt of a hook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookDelivery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Shared by redeliveries of the same event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redelivery: Option<bool>,
    /// Seconds taken to deliver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Event name, e.g. `push`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<HookDeliveryMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<HookDeliveryMessage>,
}

/// Headers and payload of a delivery request or response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookDeliveryMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// JSON object for requests, string for responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}
