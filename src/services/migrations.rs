//! Organization and user migration archives.

use crate::client::GitHubClient;
use crate::codec::Timestamp;
use crate::errors::GitHubResult;
use crate::pagination::{ListOptions, Page};
use crate::query::{comma_separated, org_path, segment};
use crate::types::Repository;
use serde::{Deserialize, Serialize};

/// Service for migration operations.
pub struct MigrationsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> MigrationsService<'a> {
    /// Creates a new migrations service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    // Organization migrations

    /// Starts exporting the given repositories of an organization.
    pub async fn start_migration(
        &self,
        org: &str,
        repos: &[String],
        opts: &MigrationOptions,
    ) -> GitHubResult<Migration> {
        let body = StartMigration {
            repositories: Some(repos),
            options: opts,
        };
        self.client
            .post(&Self::org_migrations(org)?, &body)
            .await
    }

    /// Lists the most recent migrations of an organization.
    pub async fn list_migrations(&self, org: &str, opts: &ListMigrationsOptions) -> GitHubResult<Page<Migration>> {
        self.client.get_page(&Self::org_migrations(org)?, opts).await
    }

    /// Gets the status of an organization migration.
    pub async fn migration_status(&self, org: &str, id: u64) -> GitHubResult<Migration> {
        self.client
            .get(&format!("{}/{}", Self::org_migrations(org)?, id))
            .await
    }

    /// Returns the short-lived download URL of an exported archive.
    ///
    /// GitHub answers with a redirect; the `Location` is returned without
    /// following it.
    pub async fn migration_archive_url(&self, org: &str, id: u64) -> GitHubResult<String> {
        self.client
            .redirect_location(&format!("{}/{}/archive", Self::org_migrations(org)?, id))
            .await
    }

    /// Deletes the archive of an organization migration.
    pub async fn delete_migration_archive(&self, org: &str, id: u64) -> GitHubResult<()> {
        self.client
            .delete(&format!("{}/{}/archive", Self::org_migrations(org)?, id))
            .await
    }

    /// Unlocks a repository that was locked for migration.
    pub async fn unlock_repo(&self, org: &str, id: u64, repo: &str) -> GitHubResult<()> {
        self.client
            .delete(&format!(
                "{}/{}/repos/{}/lock",
                Self::org_migrations(org)?,
                id,
                segment("repo", repo)?
            ))
            .await
    }

    // User migrations

    /// Starts exporting repositories of the authenticated user.
    pub async fn start_user_migration(&self, repos: &[String], opts: &MigrationOptions) -> GitHubResult<Migration> {
        let body = StartMigration {
            repositories: Some(repos),
            options: opts,
        };
        self.client.post("/user/migrations", &body).await
    }

    /// Lists migrations of the authenticated user.
    pub async fn list_user_migrations(&self, opts: &ListMigrationsOptions) -> GitHubResult<Page<Migration>> {
        self.client.get_page("/user/migrations", opts).await
    }

    /// Gets the status of a user migration.
    pub async fn user_migration_status(&self, id: u64) -> GitHubResult<Migration> {
        self.client.get(&format!("/user/migrations/{}", id)).await
    }

    /// Returns the download URL of a user migration archive.
    pub async fn user_migration_archive_url(&self, id: u64) -> GitHubResult<String> {
        self.client
            .redirect_location(&format!("/user/migrations/{}/archive", id))
            .await
    }

    /// Deletes the archive of a user migration.
    pub async fn delete_user_migration_archive(&self, id: u64) -> GitHubResult<()> {
        self.client
            .delete(&format!("/user/migrations/{}/archive", id))
            .await
    }

    /// Unlocks a user repository that was locked for migration.
    pub async fn unlock_user_repo(&self, id: u64, repo: &str) -> GitHubResult<()> {
        self.client
            .delete(&format!("/user/migrations/{}/repos/{}/lock", id, segment("repo", repo)?))
            .await
    }

    fn org_migrations(org: &str) -> GitHubResult<String> {
        Ok(format!("{}/migrations", org_path(org)?))
    }
}

/// Export state of a migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationState {
    /// Not started yet.
    Pending,
    /// In progress.
    Exporting,
    /// Finished; the archive can be downloaded.
    Exported,
    /// Failed.
    Failed,
}

/// A migration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Migration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<MigrationState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_repositories: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_attachments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_releases: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_owner_projects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_metadata: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_git_data: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_metadata_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    /// Repositories included in the migration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<Repository>>,
}

/// What to include in a migration archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationOptions {
    /// Lock the repositories while they are exported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_repositories: Option<bool>,
    /// Leave out attachments such as issue images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_attachments: Option<bool>,
    /// Leave out release assets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_releases: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_owner_projects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_metadata: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_git_data: Option<bool>,
    /// Export organization metadata only; `repos` must be empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_metadata_only: Option<bool>,
    /// Related items to leave out, e.g. `repositories`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct StartMigration<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    repositories: Option<&'a [String]>,
    #[serde(flatten)]
    options: &'a MigrationOptions,
}

/// Options for listing migrations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListMigrationsOptions {
    /// Attributes to leave out of the response, e.g. `repositories`.
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "comma_separated")]
    pub exclude: Option<Vec<String>>,
    /// Pagination.
    #[serde(flatten)]
    pub list: ListOptions,
}
