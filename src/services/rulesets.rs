//! Repository and organization rulesets.

use crate::client::GitHubClient;
use crate::errors::GitHubResult;
use crate::pagination::{ListOptions, Page};
use crate::query::{org_path, repo_path, segment};
use crate::types::{BranchRule, RepositoryRuleset};
use serde::Serialize;

/// Service for ruleset operations.
pub struct RulesetsService<'a> {
    client: &'a GitHubClient,
}

impl<'a> RulesetsService<'a> {
    /// Creates a new rulesets service.
    pub fn new(client: &'a GitHubClient) -> Self {
        Self { client }
    }

    // Repository rulesets

    /// Lists rulesets of a repository, optionally with those inherited from the organization.
    pub async fn get_all_rulesets(
        &self,
        owner: &str,
        repo: &str,
        include_parents: bool,
    ) -> GitHubResult<Page<RepositoryRuleset>> {
        let opts = RulesetListOptions::with_parents(include_parents);
        let path = format!("{}/rulesets", repo_path(owner, repo)?);
        self.client.get_page(&path, &opts).await
    }

    /// Creates a repository ruleset.
    pub async fn create_ruleset(
        &self,
        owner: &str,
        repo: &str,
        ruleset: &RepositoryRuleset,
    ) -> GitHubResult<RepositoryRuleset> {
        self.client
            .post(&format!("{}/rulesets", repo_path(owner, repo)?), ruleset)
            .await
    }

    /// Gets a repository ruleset.
    pub async fn get_ruleset(
        &self,
        owner: &str,
        repo: &str,
        id: i64,
        include_parents: bool,
    ) -> GitHubResult<RepositoryRuleset> {
        let opts = RulesetListOptions::with_parents(include_parents);
        self.client
            .get_with_params(&format!("{}/rulesets/{}", repo_path(owner, repo)?, id), &opts)
            .await
    }

    /// Updates a repository ruleset.
    pub async fn update_ruleset(
        &self,
        owner: &str,
        repo: &str,
        id: i64,
        ruleset: &RepositoryRuleset,
    ) -> GitHubResult<RepositoryRuleset> {
        self.client
            .put(&format!("{}/rulesets/{}", repo_path(owner, repo)?, id), ruleset)
            .await
    }

    /// Removes every bypass actor from a repository ruleset.
    ///
    /// An unset `bypass_actors` leaves the list untouched, so the empty list
    /// has to be sent explicitly.
    pub async fn update_ruleset_clear_bypass_actors(
        &self,
        owner: &str,
        repo: &str,
        id: i64,
    ) -> GitHubResult<RepositoryRuleset> {
        self.client
            .put(
                &format!("{}/rulesets/{}", repo_path(owner, repo)?, id),
                &clear_bypass_actors(),
            )
            .await
    }

    /// Deletes a repository ruleset.
    pub async fn delete_ruleset(&self, owner: &str, repo: &str, id: i64) -> GitHubResult<()> {
        self.client
            .delete(&format!("{}/rulesets/{}", repo_path(owner, repo)?, id))
            .await
    }

    /// Lists every active rule that applies to a branch, whatever ruleset it comes from.
    pub async fn get_rules_for_branch(&self, owner: &str, repo: &str, branch: &str) -> GitHubResult<Vec<BranchRule>> {
        self.client
            .get(&format!(
                "{}/rules/branches/{}",
                repo_path(owner, repo)?,
                segment("branch", branch)?
            ))
            .await
    }

    // Organization rulesets

    /// Lists rulesets of an organization.
    pub async fn get_all_org_rulesets(&self, org: &str, opts: &ListOptions) -> GitHubResult<Page<RepositoryRuleset>> {
        let path = format!("{}/rulesets", org_path(org)?);
        self.client.get_page(&path, opts).await
    }

    /// Creates an organization ruleset.
    pub async fn create_org_ruleset(&self, org: &str, ruleset: &RepositoryRuleset) -> GitHubResult<RepositoryRuleset> {
        self.client
            .post(&format!("{}/rulesets", org_path(org)?), ruleset)
            .await
    }

    /// Gets an organization ruleset.
    pub async fn get_org_ruleset(&self, org: &str, id: i64) -> GitHubResult<RepositoryRuleset> {
        self.client
            .get(&format!("{}/rulesets/{}", org_path(org)?, id))
            .await
    }

    /// Updates an organization ruleset.
    pub async fn update_org_ruleset(
        &self,
        org: &str,
        id: i64,
        ruleset: &RepositoryRuleset,
    ) -> GitHubResult<RepositoryRuleset> {
        self.client
            .put(&format!("{}/rulesets/{}", org_path(org)?, id), ruleset)
            .await
    }

    /// Removes every bypass actor from an organization ruleset.
    pub async fn update_org_ruleset_clear_bypass_actors(&self, org: &str, id: i64) -> GitHubResult<RepositoryRuleset> {
        self.client
            .put(&format!("{}/rulesets/{}", org_path(org)?, id), &clear_bypass_actors())
            .await
    }

    /// Deletes an organization ruleset.
    pub async fn delete_org_ruleset(&self, org: &str, id: i64) -> GitHubResult<()> {
        self.client
            .delete(&format!("{}/rulesets/{}", org_path(org)?, id))
            .await
    }
}

fn clear_bypass_actors() -> RepositoryRuleset {
    RepositoryRuleset {
        bypass_actors: Some(Vec::new()),
        ..Default::default()
    }
}

/// Query options of the repository ruleset endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RulesetListOptions {
    /// Include rulesets configured at higher levels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub includes_parents: Option<bool>,
    /// Pagination.
    #[serde(flatten)]
    pub list: ListOptions,
}

impl RulesetListOptions {
    fn with_parents(include_parents: bool) -> Self {
        Self {
            includes_parents: include_parents.then_some(true),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::add_options;
    use serde_json::json;

    #[test]
    fn test_clear_bypass_actors_body() {
        assert_eq!(
            serde_json::to_value(clear_bypass_actors()).unwrap(),
            json!({"bypass_actors": []})
        );
    }

    #[test]
    fn test_includes_parents_query() {
        let with = RulesetListOptions::with_parents(true);
        let without = RulesetListOptions::with_parents(false);
        assert_eq!(add_options("/r", &with).unwrap(), "/r?includes_parents=true");
        assert_eq!(add_options("/r", &without).unwrap(), "/r");
    }
}
