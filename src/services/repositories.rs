//! Repository operations.

use crate::client::GitHubClient;
use crate::errors::GitHubResult;
use crate::pagination::{ListOptions, Page};
use crate::query::{comma_separated, org_path, repo_path, segment};
use crate::types::{Branch, Direction, Repository};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Service for repository operations.
pub struct RepositoriesService<'a> {
    client: &'a GitHubClient,
}

impl<'a> RepositoriesService<'a> {
    /// Creates a new repositories service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    /// Lists public repositories of a user.
    pub async fn list_by_user(&self, user: &str, opts: &RepositoryListOptions) -> GitHubResult<Page<Repository>> {
        let path = format!("/users/{}/repos", segment("user", user)?);
        self.client.get_page(&path, opts).await
    }

    /// Lists repositories of an organization.
    pub async fn list_by_org(&self, org: &str, opts: &RepositoryListOptions) -> GitHubResult<Page<Repository>> {
        let path = format!("{}/repos", org_path(org)?);
        self.client.get_page(&path, opts).await
    }

    /// Lists repositories the authenticated user can access.
    pub async fn list_by_authenticated_user(&self, opts: &RepositoryListOptions) -> GitHubResult<Page<Repository>> {
        self.client.get_page("/user/repos", opts).await
    }

    /// Gets a repository.
    pub async fn get(&self, owner: &str, repo: &str) -> GitHubResult<Repository> {
        self.client.get(&repo_path(owner, repo)?).await
    }

    /// Gets a repository by its numeric ID.
    pub async fn get_by_id(&self, id: u64) -> GitHubResult<Repository> {
        self.client.get(&format!("/repositories/{}", id)).await
    }

    /// Creates a repository for the authenticated user, or in `org` when given.
    pub async fn create(&self, org: Option<&str>, repo: &Repository) -> GitHubResult<Repository> {
        let path = match org {
            Some(org) => format!("{}/repos", org_path(org)?),
            None => "/user/repos".to_string(),
        };
        self.client.post(&path, repo).await
    }

    /// Edits a repository. Only fields set on `repository` are changed.
    pub async fn edit(&self, owner: &str, repo: &str, repository: &Repository) -> GitHubResult<Repository> {
        self.client.patch(&repo_path(owner, repo)?, repository).await
    }

    /// Deletes a repository.
    pub async fn delete(&self, owner: &str, repo: &str) -> GitHubResult<()> {
        self.client.delete(&repo_path(owner, repo)?).await
    }

    /// Lists the topics of a repository.
    pub async fn list_all_topics(&self, owner: &str, repo: &str) -> GitHubResult<Vec<String>> {
        let topics: Topics = self
            .client
            .get(&format!("{}/topics", repo_path(owner, repo)?))
            .await?;
        Ok(topics.names.unwrap_or_default())
    }

    /// Replaces every topic of a repository. An empty slice removes them all.
    pub async fn replace_all_topics(&self, owner: &str, repo: &str, topics: &[String]) -> GitHubResult<Vec<String>> {
        let body = Topics {
            names: Some(topics.to_vec()),
        };
        let topics: Topics = self
            .client
            .put(&format!("{}/topics", repo_path(owner, repo)?), &body)
            .await?;
        Ok(topics.names.unwrap_or_default())
    }

    /// Lists languages with the number of bytes of code written in each.
    pub async fn list_languages(&self, owner: &str, repo: &str) -> GitHubResult<BTreeMap<String, u64>> {
        self.client
            .get(&format!("{}/languages", repo_path(owner, repo)?))
            .await
    }

    /// Lists branches.
    pub async fn list_branches(&self, owner: &str, repo: &str, opts: &BranchListOptions) -> GitHubResult<Page<Branch>> {
        let path = format!("{}/branches", repo_path(owner, repo)?);
        self.client.get_page(&path, opts).await
    }

    /// Gets a branch. Slashes in `branch` are kept inside the segment.
    pub async fn get_branch(&self, owner: &str, repo: &str, branch: &str) -> GitHubResult<Branch> {
        self.client
            .get(&format!(
                "{}/branches/{}",
                repo_path(owner, repo)?,
                segment("branch", branch)?
            ))
            .await
    }

    /// Lists contributors, sorted by number of commits.
    pub async fn list_contributors(
        &self,
        owner: &str,
        repo: &str,
        opts: &ListContributorsOptions,
    ) -> GitHubResult<Page<Contributor>> {
        let path = format!("{}/contributors", repo_path(owner, repo)?);
        self.client.get_page(&path, opts).await
    }
}

/// Repository type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoType {
    /// All repositories.
    All,
    /// Owned repositories.
    Owner,
    /// Public repositories.
    Public,
    /// Private repositories.
    Private,
    /// Forks.
    Forks,
    /// Sources (non-forks).
    Sources,
    /// Repositories where the user is a member.
    Member,
}

/// Repository sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoSort {
    /// Created time.
    Created,
    /// Updated time.
    Updated,
    /// Pushed time.
    Pushed,
    /// Full name.
    FullName,
}

/// Options for the repository list endpoints.
///
/// `visibility` and `affiliation` only apply to
/// [`RepositoriesService::list_by_authenticated_user`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepositoryListOptions {
    /// Repository type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub repo_type: Option<RepoType>,
    /// Sort field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<RepoSort>,
    /// Sort direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// all, public or private.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    /// Any of owner, collaborator, organization_member.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "comma_separated")]
    pub affiliation: Option<Vec<String>>,
    /// Pagination.
    #[serde(flatten)]
    pub list: ListOptions,
}

/// Options for listing branches.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BranchListOptions {
    /// Only protected (or only unprotected) branches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protected: Option<bool>,
    /// Pagination.
    #[serde(flatten)]
    pub list: ListOptions,
}

/// Options for listing contributors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListContributorsOptions {
    /// Include anonymous contributors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anon: Option<String>,
    /// Pagination.
    #[serde(flatten)]
    pub list: ListOptions,
}

/// Repository contributor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// User, Bot or Anonymous.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub contributor_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_admin: Option<bool>,
    /// Set for anonymous contributors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Commit count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributions: Option<u64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Topics {
    #[serde(skip_serializing_if = "Option::is_none")]
    names: Option<Vec<String>>,
}
