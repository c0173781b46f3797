//! Issue operations.
//!
//! Covers issues, issue comments, labels, milestones and assignees.

use crate::client::GitHubClient;
use crate::codec::{double_option, Timestamp};
use crate::errors::GitHubResult;
use crate::pagination::{ListOptions, Page};
use crate::query::{comma_separated, org_path, repo_path, segment};
use crate::types::{Direction, Issue, IssueComment, Label, Milestone, User};
use serde::{Deserialize, Serialize};

/// Service for issue operations.
pub struct IssuesService<'a> {
    client: &'a GitHubClient,
}

impl<'a> IssuesService<'a> {
    /// Creates a new issues service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists issues in a repository.
    pub async fn list_by_repo(
        &self,
        owner: &str,
        repo: &str,
        opts: &IssueListByRepoOptions,
    ) -> GitHubResult<Page<Issue>> {
        let path = format!("{}/issues", repo_path(owner, repo)?);
        self.client.get_page(&path, opts).await
    }

    /// Lists issues assigned to the authenticated user across all visible repositories.
    pub async fn list_for_authenticated_user(&self, opts: &IssueListOptions) -> GitHubResult<Page<Issue>> {
        self.client.get_page("/issues", opts).await
    }

    /// Lists issues in an organization's repositories.
    pub async fn list_by_org(&self, org: &str, opts: &IssueListOptions) -> GitHubResult<Page<Issue>> {
        let path = format!("{}/issues", org_path(org)?);
        self.client.get_page(&path, opts).await
    }

    /// Gets an issue.
    pub async fn get(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<Issue> {
        self.client
            .get(&format!("{}/issues/{}", repo_path(owner, repo)?, number))
            .await
    }

    /// Creates an issue.
    pub async fn create(&self, owner: &str, repo: &str, issue: &IssueRequest) -> GitHubResult<Issue> {
        self.client
            .post(&format!("{}/issues", repo_path(owner, repo)?), issue)
            .await
    }

    /// Edits an issue. Only fields set on `issue` are changed.
    pub async fn edit(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        issue: &IssueRequest,
    ) -> GitHubResult<Issue> {
        self.client
            .patch(&format!("{}/issues/{}", repo_path(owner, repo)?, number), issue)
            .await
    }

    /// Removes the milestone from an issue by sending an explicit `null`.
    pub async fn remove_milestone(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<Issue> {
        let request = IssueRequest {
            milestone: Some(None),
            ..Default::default()
        };
        self.edit(owner, repo, number, &request).await
    }

    /// Locks an issue's conversation.
    pub async fn lock(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        lock_reason: Option<LockReason>,
    ) -> GitHubResult<()> {
        let body = LockRequest { lock_reason };
        self.client
            .put_no_response(&format!("{}/issues/{}/lock", repo_path(owner, repo)?, number), &body)
            .await
    }

    /// Unlocks an issue's conversation.
    pub async fn unlock(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<()> {
        self.client
            .delete(&format!("{}/issues/{}/lock", repo_path(owner, repo)?, number))
            .await
    }

    // Comments

    /// Lists comments on an issue, or on every issue in the repository when
    /// `number` is `None`.
    pub async fn list_comments(
        &self,
        owner: &str,
        repo: &str,
        number: Option<u64>,
        opts: &IssueListCommentsOptions,
    ) -> GitHubResult<Page<IssueComment>> {
        let base = repo_path(owner, repo)?;
        let path = match number {
            Some(n) => format!("{}/issues/{}/comments", base, n),
            None => format!("{}/issues/comments", base),
        };
        self.client.get_page(&path, opts).await
    }

    /// Gets a comment.
    pub async fn get_comment(&self, owner: &str, repo: &str, comment_id: u64) -> GitHubResult<IssueComment> {
        self.client
            .get(&format!("{}/issues/comments/{}", repo_path(owner, repo)?, comment_id))
            .await
    }

    /// Creates a comment.
    pub async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        comment: &IssueComment,
    ) -> GitHubResult<IssueComment> {
        self.client
            .post(
                &format!("{}/issues/{}/comments", repo_path(owner, repo)?, number),
                comment,
            )
            .await
    }

    /// Edits a comment.
    pub async fn edit_comment(
        &self,
        owner: &str,
        repo: &str,
        comment_id: u64,
        comment: &IssueComment,
    ) -> GitHubResult<IssueComment> {
        self.client
            .patch(
                &format!("{}/issues/comments/{}", repo_path(owner, repo)?, comment_id),
                comment,
            )
            .await
    }

    /// Deletes a comment.
    pub async fn delete_comment(&self, owner: &str, repo: &str, comment_id: u64) -> GitHubResult<()> {
        self.client
            .delete(&format!("{}/issues/comments/{}", repo_path(owner, repo)?, comment_id))
            .await
    }

    // Labels

    /// Lists labels in a repository.
    pub async fn list_labels(&self, owner: &str, repo: &str, opts: &ListOptions) -> GitHubResult<Page<Label>> {
        let path = format!("{}/labels", repo_path(owner, repo)?);
        self.client.get_page(&path, opts).await
    }

    /// Gets a label.
    pub async fn get_label(&self, owner: &str, repo: &str, name: &str) -> GitHubResult<Label> {
        self.client
            .get(&format!("{}/labels/{}", repo_path(owner, repo)?, segment("name", name)?))
            .await
    }

    /// Creates a label.
    pub async fn create_label(&self, owner: &str, repo: &str, label: &Label) -> GitHubResult<Label> {
        self.client
            .post(&format!("{}/labels", repo_path(owner, repo)?), label)
            .await
    }

    /// Edits a label. Setting `label.name` renames it.
    pub async fn edit_label(&self, owner: &str, repo: &str, name: &str, label: &Label) -> GitHubResult<Label> {
        self.client
            .patch(
                &format!("{}/labels/{}", repo_path(owner, repo)?, segment("name", name)?),
                label,
            )
            .await
    }

    /// Deletes a label.
    pub async fn delete_label(&self, owner: &str, repo: &str, name: &str) -> GitHubResult<()> {
        self.client
            .delete(&format!("{}/labels/{}", repo_path(owner, repo)?, segment("name", name)?))
            .await
    }

    /// Lists labels on an issue.
    pub async fn list_labels_by_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        opts: &ListOptions,
    ) -> GitHubResult<Page<Label>> {
        let path = format!("{}/issues/{}/labels", repo_path(owner, repo)?, number);
        self.client.get_page(&path, opts).await
    }

    /// Adds labels to an issue and returns the resulting label set.
    pub async fn add_labels_to_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> GitHubResult<Vec<Label>> {
        self.client
            .post(
                &format!("{}/issues/{}/labels", repo_path(owner, repo)?, number),
                &LabelsRequest { labels },
            )
            .await
    }

    /// Replaces every label on an issue.
    pub async fn replace_labels_for_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> GitHubResult<Vec<Label>> {
        self.client
            .put(
                &format!("{}/issues/{}/labels", repo_path(owner, repo)?, number),
                &LabelsRequest { labels },
            )
            .await
    }

    /// Removes one label from an issue.
    pub async fn remove_label_for_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        label: &str,
    ) -> GitHubResult<()> {
        self.client
            .delete(&format!(
                "{}/issues/{}/labels/{}",
                repo_path(owner, repo)?,
                number,
                segment("label", label)?
            ))
            .await
    }

    /// Removes every label from an issue.
    pub async fn remove_labels_for_issue(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<()> {
        self.client
            .delete(&format!("{}/issues/{}/labels", repo_path(owner, repo)?, number))
            .await
    }

    // Milestones

    /// Lists milestones in a repository.
    pub async fn list_milestones(
        &self,
        owner: &str,
        repo: &str,
        opts: &MilestoneListOptions,
    ) -> GitHubResult<Page<Milestone>> {
        let path = format!("{}/milestones", repo_path(owner, repo)?);
        self.client.get_page(&path, opts).await
    }

    /// Gets a milestone.
    pub async fn get_milestone(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<Milestone> {
        self.client
            .get(&format!("{}/milestones/{}", repo_path(owner, repo)?, number))
            .await
    }

    /// Creates a milestone.
    pub async fn create_milestone(&self, owner: &str, repo: &str, milestone: &Milestone) -> GitHubResult<Milestone> {
        self.client
            .post(&format!("{}/milestones", repo_path(owner, repo)?), milestone)
            .await
    }

    /// Edits a milestone.
    pub async fn edit_milestone(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        milestone: &Milestone,
    ) -> GitHubResult<Milestone> {
        self.client
            .patch(&format!("{}/milestones/{}", repo_path(owner, repo)?, number), milestone)
            .await
    }

    /// Deletes a milestone.
    pub async fn delete_milestone(&self, owner: &str, repo: &str, number: u64) -> GitHubResult<()> {
        self.client
            .delete(&format!("{}/milestones/{}", repo_path(owner, repo)?, number))
            .await
    }

    // Assignees

    /// Lists users that issues in the repository can be assigned to.
    pub async fn list_assignees(&self, owner: &str, repo: &str, opts: &ListOptions) -> GitHubResult<Page<User>> {
        let path = format!("{}/assignees", repo_path(owner, repo)?);
        self.client.get_page(&path, opts).await
    }

    /// Checks whether a user can be assigned to issues in the repository.
    pub async fn is_assignee(&self, owner: &str, repo: &str, user: &str) -> GitHubResult<bool> {
        self.client
            .check(&format!("{}/assignees/{}", repo_path(owner, repo)?, segment("user", user)?))
            .await
    }

    /// Adds assignees to an issue.
    pub async fn add_assignees(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        assignees: &[String],
    ) -> GitHubResult<Issue> {
        self.client
            .post(
                &format!("{}/issues/{}/assignees", repo_path(owner, repo)?, number),
                &AssigneesRequest { assignees },
            )
            .await
    }

    /// Removes assignees from an issue.
    pub async fn remove_assignees(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        assignees: &[String],
    ) -> GitHubResult<Issue> {
        self.client
            .delete_with_body(
                &format!("{}/issues/{}/assignees", repo_path(owner, repo)?, number),
                &AssigneesRequest { assignees },
            )
            .await
    }
}

/// Body for creating or editing an issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueRequest {
    /// Issue title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Issue body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Label names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Single assignee (deprecated in favour of `assignees`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Issue state (open, closed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// completed, not_planned or reopened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_reason: Option<String>,
    /// Milestone number; `Some(None)` clears the milestone.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "double_option")]
    pub milestone: Option<Option<u64>>,
    /// Assignee logins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
}

/// Reason for locking an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LockReason {
    /// Off-topic.
    OffTopic,
    /// Too heated.
    #[serde(rename = "too heated")]
    TooHeated,
    /// Resolved.
    Resolved,
    /// Spam.
    Spam,
}

#[derive(Debug, Serialize)]
struct LockRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    lock_reason: Option<LockReason>,
}

#[derive(Debug, Serialize)]
struct LabelsRequest<'a> {
    labels: &'a [String],
}

#[derive(Debug, Serialize)]
struct AssigneesRequest<'a> {
    assignees: &'a [String],
}

/// Issue state filter for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStateFilter {
    Open,
    Closed,
    All,
}

/// Options for listing issues across repositories.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueListOptions {
    /// assigned, created, mentioned, subscribed, repos or all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// State filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueStateFilter>,
    /// Label names; issues must carry all of them.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "comma_separated")]
    pub labels: Option<Vec<String>>,
    /// created, updated or comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Only issues updated at or after this time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<Timestamp>,
    /// Pagination.
    #[serde(flatten)]
    pub list: ListOptions,
}

/// Options for listing issues in one repository.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueListByRepoOptions {
    /// Milestone number, `*` for any, or `none`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
    /// State filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueStateFilter>,
    /// Assignee login, `*` for any, or `none`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentioned: Option<String>,
    /// Label names; issues must carry all of them.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "comma_separated")]
    pub labels: Option<Vec<String>>,
    /// created, updated or comments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<Timestamp>,
    /// Pagination.
    #[serde(flatten)]
    pub list: ListOptions,
}

/// Options for listing issue comments.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueListCommentsOptions {
    /// created or updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<Timestamp>,
    /// Pagination.
    #[serde(flatten)]
    pub list: ListOptions,
}

/// Options for listing milestones.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MilestoneListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<IssueStateFilter>,
    /// due_on or completeness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Pagination.
    #[serde(flatten)]
    pub list: ListOptions,
}
