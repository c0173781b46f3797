//! Organization operations.

use crate::client::GitHubClient;
use crate::errors::GitHubResult;
use crate::pagination::{ListOptions, Page};
use crate::query::{org_path, segment};
use crate::types::{Organization, User};
use serde::{Deserialize, Serialize};

/// Service for organization operations.
pub struct OrganizationsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> OrganizationsService<'a> {
    /// Creates a new organizations service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists every organization in creation order, starting after the ID in `opts.since`.
    pub async fn list_all(&self, opts: &OrganizationsListOptions) -> GitHubResult<Page<Organization>> {
        self.client.get_page("/organizations", opts).await
    }

    /// Lists organizations of `user`, or of the authenticated user when `None`.
    pub async fn list(&self, user: Option<&str>, opts: &ListOptions) -> GitHubResult<Page<Organization>> {
        let path = match user {
            Some(user) => format!("/users/{}/orgs", segment("user", user)?),
            None => "/user/orgs".to_string(),
        };
        self.client.get_page(&path, opts).await
    }

    /// Gets an organization.
    pub async fn get(&self, org: &str) -> GitHubResult<Organization> {
        self.client.get(&org_path(org)?).await
    }

    /// Gets an organization by its numeric ID.
    pub async fn get_by_id(&self, id: u64) -> GitHubResult<Organization> {
        self.client.get(&format!("/organizations/{}", id)).await
    }

    /// Edits an organization. Only fields set on `organization` are changed.
    pub async fn edit(&self, org: &str, organization: &Organization) -> GitHubResult<Organization> {
        self.client.patch(&org_path(org)?, organization).await
    }

    /// Lists organization members.
    pub async fn list_members(&self, org: &str, opts: &ListMembersOptions) -> GitHubResult<Page<User>> {
        let path = format!("{}/members", org_path(org)?);
        self.client.get_page(&path, opts).await
    }

    /// Checks whether a user is a member of the organization.
    pub async fn is_member(&self, org: &str, user: &str) -> GitHubResult<bool> {
        self.client
            .check(&format!("{}/members/{}", org_path(org)?, segment("user", user)?))
            .await
    }

    /// Removes a member from the organization.
    pub async fn remove_member(&self, org: &str, user: &str) -> GitHubResult<()> {
        self.client
            .delete(&format!("{}/members/{}", org_path(org)?, segment("user", user)?))
            .await
    }

    /// Gets the membership of `user` in `org`, or the authenticated user's when `None`.
    pub async fn get_org_membership(&self, user: Option<&str>, org: &str) -> GitHubResult<Membership> {
        let path = match user {
            Some(user) => format!("{}/memberships/{}", org_path(org)?, segment("user", user)?),
            None => format!("/user/memberships/orgs/{}", segment("org", org)?),
        };
        self.client.get(&path).await
    }

    /// Edits a membership.
    ///
    /// With a `user`, an owner sets that user's role (inviting them if needed).
    /// Without one, the authenticated user updates their own membership,
    /// typically setting `state` to `active` to accept an invitation.
    pub async fn edit_org_membership(
        &self,
        user: Option<&str>,
        org: &str,
        membership: &Membership,
    ) -> GitHubResult<Membership> {
        match user {
            Some(user) => {
                let path = format!("{}/memberships/{}", org_path(org)?, segment("user", user)?);
                self.client.put(&path, membership).await
            }
            None => {
                let path = format!("/user/memberships/orgs/{}", segment("org", org)?);
                self.client.patch(&path, membership).await
            }
        }
    }
}

/// Options for [`OrganizationsService::list_all`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizationsListOptions {
    /// Only organizations with an ID greater than this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<u64>,
    /// Items per page (max 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Options for listing members.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListMembersOptions {
    /// `2fa_disabled` or `all`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Role filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRoleFilter>,
    /// Pagination.
    #[serde(flatten)]
    pub list: ListOptions,
}

/// Role filter for member listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRoleFilter {
    All,
    Admin,
    Member,
}

/// Organization membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// State.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<MembershipState>,
    /// Role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<MembershipRole>,
    /// Organization URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_url: Option<String>,
    /// Organization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    /// User.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Membership state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MembershipState {
    Active,
    Pending,
}

/// Membership role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MembershipRole {
    Admin,
    Member,
    BillingManager,
}
