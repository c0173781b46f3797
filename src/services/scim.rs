//! SCIM user provisioning for organizations and enterprises.
//!
//! SCIM payloads use camelCase keys, unlike the rest of the API.

use crate::client::GitHubClient;
use crate::errors::GitHubResult;
use crate::query::segment;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Service for SCIM operations.
pub struct ScimService<'a> {
    client: &'a GitHubClient,
}

impl<'a> ScimService<'a> {
    /// Creates a new SCIM service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists identities provisioned for an organization.
    pub async fn list_provisioned_identities(
        &self,
        org: &str,
        opts: &ListScimProvisionedIdentitiesOptions,
    ) -> GitHubResult<ScimProvisionedIdentities> {
        self.client.get_with_params(&Self::org_users(org)?, opts).await
    }

    /// Provisions a user and invites them to the organization.
    pub async fn provision_and_invite_user(&self, org: &str, user: &ScimUserAttributes) -> GitHubResult<ScimUser> {
        self.client.post(&Self::org_users(org)?, user).await
    }

    /// Gets the provisioning information of one user.
    pub async fn get_provisioning_info_for_user(&self, org: &str, scim_user_id: &str) -> GitHubResult<ScimUser> {
        self.client
            .get(&Self::org_user(org, scim_user_id)?)
            .await
    }

    /// Replaces every attribute of a provisioned user.
    pub async fn update_provisioned_org_membership(
        &self,
        org: &str,
        scim_user_id: &str,
        user: &ScimUserAttributes,
    ) -> GitHubResult<ScimUser> {
        self.client
            .put(&Self::org_user(org, scim_user_id)?, user)
            .await
    }

    /// Applies SCIM patch operations to a provisioned user.
    pub async fn update_attribute_for_user(
        &self,
        org: &str,
        scim_user_id: &str,
        opts: &UpdateAttributeForScimUserOptions,
    ) -> GitHubResult<ScimUser> {
        self.client
            .patch(&Self::org_user(org, scim_user_id)?, opts)
            .await
    }

    /// Deprovisions a user and removes them from the organization.
    pub async fn delete_user_from_org(&self, org: &str, scim_user_id: &str) -> GitHubResult<()> {
        self.client.delete(&Self::org_user(org, scim_user_id)?).await
    }

    /// Lists groups provisioned for an enterprise.
    pub async fn list_provisioned_groups(
        &self,
        enterprise: &str,
        opts: &ListProvisionedScimGroupsOptions,
    ) -> GitHubResult<ScimEnterpriseGroups> {
        let path = format!("/scim/v2/enterprises/{}/Groups", segment("enterprise", enterprise)?);
        self.client.get_with_params(&path, opts).await
    }

    /// Lists users provisioned for an enterprise.
    pub async fn list_provisioned_users(
        &self,
        enterprise: &str,
        opts: &ListProvisionedScimUsersOptions,
    ) -> GitHubResult<ScimEnterpriseUsers> {
        let path = format!("/scim/v2/enterprises/{}/Users", segment("enterprise", enterprise)?);
        self.client.get_with_params(&path, opts).await
    }

    fn org_users(org: &str) -> GitHubResult<String> {
        Ok(format!("/scim/v2/organizations/{}/Users", segment("org", org)?))
    }

    fn org_user(org: &str, scim_user_id: &str) -> GitHubResult<String> {
        Ok(format!(
            "{}/{}",
            Self::org_users(org)?,
            segment("scim_user_id", scim_user_id)?
        ))
    }
}

/// Name of a SCIM user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimUserName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

/// Email of a SCIM user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScimUserEmail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    /// work, home, other.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub email_type: Option<String>,
}

/// Resource metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Attributes sent when provisioning or replacing a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimUserAttributes {
    /// Identity-provider username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<ScimUserName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<ScimUserEmail>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// A provisioned SCIM user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimUser {
    /// SCIM user ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ScimMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub attributes: ScimUserAttributes,
}

/// Page of identities provisioned for an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimProvisionedIdentities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u64>,
    #[serde(rename = "Resources", default)]
    pub resources: Vec<ScimUser>,
}

/// Query options for organization identities.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListScimProvisionedIdentitiesOptions {
    /// 1-based index of the first result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u64>,
    /// Results per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// SCIM filter, e.g. `userName eq "octocat"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// One SCIM patch operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScimPatchOperation {
    /// add, remove or replace.
    pub op: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Body of a SCIM patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateAttributeForScimUserOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<String>>,
    #[serde(rename = "Operations")]
    pub operations: Vec<ScimPatchOperation>,
}

/// Member reference of an enterprise group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScimGroupMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// A group provisioned for an enterprise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimEnterpriseGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<ScimGroupMember>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ScimMeta>,
}

/// Page of enterprise groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimEnterpriseGroups {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u64>,
    #[serde(rename = "Resources", default)]
    pub resources: Vec<ScimEnterpriseGroup>,
}

/// Page of enterprise users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimEnterpriseUsers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u64>,
    #[serde(rename = "Resources", default)]
    pub resources: Vec<ScimUser>,
}

/// Query options for enterprise groups.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProvisionedScimGroupsOptions {
    /// Attributes to leave out, e.g. `members`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_attributes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u64>,
}

/// Query options for enterprise users.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProvisionedScimUsersOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u64>,
}
