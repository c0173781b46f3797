//! Core data types for GitHub API.
//!
//! Every field is optional: responses routinely omit fields depending on the
//! endpoint and the caller's permissions, and request bodies must only carry
//! what the caller set. See [`crate::codec`] for the encoding rules.

pub mod rules;

use crate::codec::Timestamp;
use serde::{Deserialize, Serialize};

pub use rules::*;

/// GitHub user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Username (login).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    /// User ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Node ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Profile URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravatar_id: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Public email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hireable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_username: Option<String>,
    /// Public repository count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_repos: Option<u32>,
    /// Public gist count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_gists: Option<u32>,
    /// Follower count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<u32>,
    /// Following count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<u32>,
    /// Creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Last update time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    /// Suspension time (enterprise only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended_at: Option<Timestamp>,
    /// User type (User, Organization, Bot).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    /// Site admin flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_private_repos: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_private_repos: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_gists: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_usage: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub two_factor_authentication: Option<bool>,
    /// Billing plan, visible to the user themselves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    /// API URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repos_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_url: Option<String>,
}

/// Billing plan of a user or organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_repos: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filled_seats: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<u64>,
}

/// GitHub repository.
///
/// The same struct is used as the request body for create and edit, so only
/// the fields set by the caller are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Node ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Owner information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,
    /// Repository name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Full name (owner/repo).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Repository description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Default branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,
    /// Creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Last push time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pushed_at: Option<Timestamp>,
    /// Last update time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    /// API URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HTML URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Clone URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_url: Option<String>,
    /// SSH URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_url: Option<String>,
    /// Primary language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Whether the repository is a fork.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fork: Option<bool>,
    /// Fork count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forks_count: Option<u32>,
    /// Open issue count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_issues_count: Option<u32>,
    /// Stargazer count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stargazers_count: Option<u32>,
    /// Watcher count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watchers_count: Option<u32>,
    /// Repository size in KB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Create an initial commit with an empty README (create only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_init: Option<bool>,
    /// Parent of a fork.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<Repository>>,
    /// Root of the fork network.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Box<Repository>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_repository: Option<Box<Repository>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    /// Permissions of the authenticated user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_rebase_merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_squash_merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_merge_commit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_auto_merge: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_forking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_branch_on_merge: Option<bool>,
    /// Topics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    /// Whether the repository is archived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// Whether the repository is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// License information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    /// Whether the repository is private.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
    /// Whether issues are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_issues: Option<bool>,
    /// Whether wiki is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wiki: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_pages: Option<bool>,
    /// Whether projects are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_projects: Option<bool>,
    /// Whether downloads are enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_downloads: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_discussions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_template: Option<bool>,
    /// License keyword applied on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_template: Option<String>,
    /// `.gitignore` template applied on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gitignore_template: Option<String>,
    /// Team granted access on create (organization repositories).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u64>,
    /// Visibility (public, private, internal).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}

/// Permissions of the authenticated user on a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintain: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triage: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull: Option<bool>,
}

/// Repository license.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// License key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// License name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// SPDX ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spdx_id: Option<String>,
    /// License URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// GitHub branch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// Branch name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Head commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<BranchCommit>,
    /// Whether the branch is protected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
}

/// Commit reference in a branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchCommit {
    /// Commit SHA.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    /// Commit URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// GitHub organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    /// Organization ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Node ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// HTML URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Public email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_username: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Public repository count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_repos: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_gists: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub following: Option<u32>,
    /// Creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Last update time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_private_repos: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owned_private_repos: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_gists: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_usage: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborators: Option<u64>,
    /// Billing email, visible to owners only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_email: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub org_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub two_factor_requirement_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_organization_projects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_repository_projects: Option<bool>,
    /// Base permission for members (read, write, admin, none).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_repository_permission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members_can_create_repositories: Option<bool>,
    /// API URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repos_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hooks_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members_url: Option<String>,
}

/// GitHub issue.
///
/// Pull requests are also returned by the issue endpoints; those carry
/// [`Issue::pull_request`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Node ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Issue number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    /// Issue state (open, closed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Reason for the current state (completed, not_planned, reopened).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_reason: Option<String>,
    /// Whether the issue is locked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_lock_reason: Option<String>,
    /// Issue title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Issue body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_association: Option<String>,
    /// Issue author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    /// Primary assignee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    /// Assignees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<User>>,
    /// Comment count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u32>,
    /// Close time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<Timestamp>,
    /// Creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Last update time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_by: Option<User>,
    /// API URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HTML URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    /// Milestone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<Milestone>,
    /// Set when the issue is a pull request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestLinks>,
    /// Owning repository, only on cross-repository listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Reactions>,
}

impl Issue {
    /// Returns true if this issue is a pull request.
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Links attached to issues that are pull requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PullRequestLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<Timestamp>,
}

/// Reaction counts on an issue or comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u32>,
    #[serde(rename = "+1", skip_serializing_if = "Option::is_none")]
    pub plus_one: Option<u32>,
    #[serde(rename = "-1", skip_serializing_if = "Option::is_none")]
    pub minus_one: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laugh: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confused: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hooray: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rocket: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// GitHub label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Node ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// API URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Label name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Hex color without the leading `#`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether this is a default label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

/// GitHub milestone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Node ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Milestone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    /// State (open, closed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<User>,
    /// Open issue count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_issues: Option<u32>,
    /// Closed issue count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_issues: Option<u32>,
    /// Creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Last update time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    /// Close time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<Timestamp>,
    /// Due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels_url: Option<String>,
}

/// Comment on an issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueComment {
    /// Comment ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Node ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Comment body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Comment author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Reactions>,
    /// Creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Last update time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_association: Option<String>,
    /// API URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HTML URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_url: Option<String>,
}

/// Sort direction shared by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::assert_round_trip;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test]
    fn test_deserialize_user() {
        let json = r#"{
            "id": 1,
            "login": "octocat",
            "node_id": "MDQ6VXNlcjE=",
            "avatar_url": "https://github.com/images/error/octocat_happy.gif",
            "type": "User",
            "site_admin": false,
            "html_url": "https://github.com/octocat"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.login.as_deref(), Some("octocat"));
        assert_eq!(user.id, Some(1));
        assert_eq!(user.user_type.as_deref(), Some("User"));
        assert_eq!(user.site_admin, Some(false));
        assert_eq!(user.email, None);
    }

    #[test]
    fn test_issue_with_only_number() {
        let issues: Vec<Issue> = serde_json::from_str(r#"[{"number":1}]"#).unwrap();
        assert_eq!(
            issues,
            vec![Issue {
                number: Some(1),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn test_empty_repository_encodes_to_empty_object() {
        assert_eq!(serde_json::to_value(Repository::default()).unwrap(), json!({}));
    }

    #[test]
    fn test_false_and_zero_are_not_dropped() {
        let repo = Repository {
            private: Some(false),
            forks_count: Some(0),
            description: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&repo).unwrap(),
            json!({"private": false, "forks_count": 0, "description": ""})
        );
    }

    #[test]
    fn test_issue_round_trip() {
        let value = json!({
            "id": 42,
            "number": 7,
            "state": "open",
            "title": "Bug",
            "labels": [{"name": "bug", "color": "d73a4a", "default": true}],
            "user": {"login": "octocat", "id": 1},
            "created_at": "2024-01-02T03:04:05Z",
            "pull_request": {"url": "https://api.github.com/repos/o/r/pulls/7"},
            "reactions": {"total_count": 2, "+1": 1, "-1": 1}
        });

        let issue: Issue = serde_json::from_value(value.clone()).unwrap();
        assert!(issue.is_pull_request());
        assert_eq!(issue.reactions.as_ref().and_then(|r| r.plus_one), Some(1));
        assert_eq!(serde_json::to_value(&issue).unwrap(), value);
    }

    #[test]
    fn test_repository_parent_nesting() {
        let repo: Repository = serde_json::from_value(json!({
            "name": "fork",
            "fork": true,
            "parent": {"full_name": "upstream/repo"},
            "permissions": {"admin": false, "push": true}
        }))
        .unwrap();

        assert_eq!(
            repo.parent.as_ref().and_then(|p| p.full_name.as_deref()),
            Some("upstream/repo")
        );
        assert_eq!(repo.permissions.and_then(|p| p.push), Some(true));
    }

    #[test_case(json!({}) ; "empty")]
    #[test_case(json!({
        "login": "octocat",
        "id": 1,
        "type": "User",
        "site_admin": false,
        "hireable": true,
        "public_repos": 8,
        "created_at": "2008-01-14T04:33:35Z",
        "plan": {"name": "pro", "space": 976562499, "private_repos": 9999}
    }) ; "populated")]
    fn test_user_round_trip(value: Value) {
        assert_round_trip::<User>(value);
    }

    #[test_case(json!({}) ; "empty")]
    #[test_case(json!({
        "id": 1296269,
        "name": "Hello-World",
        "full_name": "octocat/Hello-World",
        "owner": {"login": "octocat", "id": 1},
        "private": false,
        "topics": ["octocat", "api"],
        "permissions": {"admin": false, "push": false, "pull": true},
        "license": {"key": "mit", "spdx_id": "MIT"},
        "pushed_at": "2011-01-26T19:06:43Z",
        "source": {"full_name": "upstream/Hello-World"},
        "visibility": "public"
    }) ; "populated")]
    fn test_repository_round_trip(value: Value) {
        assert_round_trip::<Repository>(value);
    }

    #[test_case(json!({}) ; "empty")]
    #[test_case(json!({
        "login": "github",
        "id": 1,
        "type": "Organization",
        "billing_email": "mona@github.com",
        "two_factor_requirement_enabled": true,
        "plan": {"name": "team", "seats": 10, "filled_seats": 4},
        "created_at": "2008-01-14T04:33:35Z"
    }) ; "populated")]
    fn test_organization_round_trip(value: Value) {
        assert_round_trip::<Organization>(value);
    }

    #[test_case(json!({}) ; "empty")]
    #[test_case(json!({"id": 208045946, "name": "bug", "color": "f29513", "description": "", "default": true}) ; "populated")]
    fn test_label_round_trip(value: Value) {
        assert_round_trip::<Label>(value);
    }

    #[test_case(json!({}) ; "empty")]
    #[test_case(json!({
        "number": 1,
        "state": "open",
        "title": "v1.0",
        "creator": {"login": "octocat"},
        "open_issues": 4,
        "closed_issues": 0,
        "due_on": "2012-10-09T23:39:01Z"
    }) ; "populated")]
    fn test_milestone_round_trip(value: Value) {
        assert_round_trip::<Milestone>(value);
    }

    #[test_case(json!({}) ; "empty")]
    #[test_case(json!({
        "id": 1,
        "body": "Me too",
        "user": {"login": "octocat"},
        "author_association": "COLLABORATOR",
        "reactions": {"total_count": 1, "heart": 1},
        "created_at": "2011-04-14T16:00:49Z"
    }) ; "populated")]
    fn test_issue_comment_round_trip(value: Value) {
        assert_round_trip::<IssueComment>(value);
    }

    #[test_case(json!({}) ; "empty")]
    #[test_case(json!({
        "name": "main",
        "commit": {"sha": "c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc"},
        "protected": true
    }) ; "populated")]
    fn test_branch_round_trip(value: Value) {
        assert_round_trip::<Branch>(value);
    }
}
