//! Encrypted secrets for GitHub Actions, Dependabot and Codespaces.
//!
//! The three apps expose the same endpoint family under different path
//! prefixes, so one service covers them. Values must already be encrypted
//! with the public key returned by the `*_public_key` calls.

use crate::client::GitHubClient;
use crate::codec::Timestamp;
use crate::errors::{GitHubError, GitHubResult};
use crate::pagination::ListOptions;
use crate::query::{org_path, repo_path, segment};
use crate::types::Repository;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Which app a secret belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretsApp {
    /// GitHub Actions.
    Actions,
    /// Dependabot.
    Dependabot,
    /// Codespaces.
    Codespaces,
}

impl SecretsApp {
    /// Path segment of the app.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Actions => "actions",
            Self::Dependabot => "dependabot",
            Self::Codespaces => "codespaces",
        }
    }
}

impl fmt::Display for SecretsApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service for secret operations.
pub struct SecretsService<'a> {
    client: &'a GitHubClient,
    app: SecretsApp,
}

impl<'a> SecretsService<'a> {
    /// Creates a new secrets service for one app.
    pub fn new(client: &'a GitHubClient, app: SecretsApp) -> Self {
        Self { client, app }
    }

    /// Returns the app this service manages secrets for.
    pub fn app(&self) -> SecretsApp {
        self.app
    }

    // Public keys

    /// Gets the key used to encrypt repository secrets.
    pub async fn get_repo_public_key(&self, owner: &str, repo: &str) -> GitHubResult<PublicKey> {
        self.client
            .get(&format!("{}/public-key", self.repo_secrets(owner, repo)?))
            .await
    }

    /// Gets the key used to encrypt organization secrets.
    pub async fn get_org_public_key(&self, org: &str) -> GitHubResult<PublicKey> {
        self.client
            .get(&format!("{}/public-key", self.org_secrets(org)?))
            .await
    }

    // Repository secrets

    /// Lists repository secrets without their values.
    pub async fn list_repo_secrets(&self, owner: &str, repo: &str, opts: &ListOptions) -> GitHubResult<Secrets> {
        self.client
            .get_with_params(&self.repo_secrets(owner, repo)?, opts)
            .await
    }

    /// Gets a repository secret without its value.
    pub async fn get_repo_secret(&self, owner: &str, repo: &str, name: &str) -> GitHubResult<Secret> {
        self.client
            .get(&format!("{}/{}", self.repo_secrets(owner, repo)?, segment("name", name)?))
            .await
    }

    /// Creates or updates a repository secret.
    pub async fn create_or_update_repo_secret(
        &self,
        owner: &str,
        repo: &str,
        secret: &EncryptedSecret,
    ) -> GitHubResult<()> {
        self.client
            .put_no_response(
                &format!("{}/{}", self.repo_secrets(owner, repo)?, segment("name", &secret.name)?),
                secret,
            )
            .await
    }

    /// Deletes a repository secret.
    pub async fn delete_repo_secret(&self, owner: &str, repo: &str, name: &str) -> GitHubResult<()> {
        self.client
            .delete(&format!("{}/{}", self.repo_secrets(owner, repo)?, segment("name", name)?))
            .await
    }

    // Organization secrets

    /// Lists organization secrets without their values.
    pub async fn list_org_secrets(&self, org: &str, opts: &ListOptions) -> GitHubResult<Secrets> {
        self.client.get_with_params(&self.org_secrets(org)?, opts).await
    }

    /// Gets an organization secret without its value.
    pub async fn get_org_secret(&self, org: &str, name: &str) -> GitHubResult<Secret> {
        self.client
            .get(&format!("{}/{}", self.org_secrets(org)?, segment("name", name)?))
            .await
    }

    /// Creates or updates an organization secret.
    ///
    /// `visibility` is required by GitHub for organization secrets.
    pub async fn create_or_update_org_secret(&self, org: &str, secret: &EncryptedSecret) -> GitHubResult<()> {
        self.client
            .put_no_response(
                &format!("{}/{}", self.org_secrets(org)?, segment("name", &secret.name)?),
                secret,
            )
            .await
    }

    /// Deletes an organization secret.
    pub async fn delete_org_secret(&self, org: &str, name: &str) -> GitHubResult<()> {
        self.client
            .delete(&format!("{}/{}", self.org_secrets(org)?, segment("name", name)?))
            .await
    }

    /// Lists repositories that can read an organization secret with `selected` visibility.
    pub async fn list_selected_repos_for_org_secret(
        &self,
        org: &str,
        name: &str,
        opts: &ListOptions,
    ) -> GitHubResult<SelectedReposList> {
        let path = format!("{}/{}/repositories", self.org_secrets(org)?, segment("name", name)?);
        self.client.get_with_params(&path, opts).await
    }

    /// Replaces the repositories that can read an organization secret.
    pub async fn set_selected_repos_for_org_secret(
        &self,
        org: &str,
        name: &str,
        repository_ids: &[u64],
    ) -> GitHubResult<()> {
        let body = SelectedRepoIds {
            selected_repository_ids: repository_ids,
        };
        self.client
            .put_no_response(
                &format!("{}/{}/repositories", self.org_secrets(org)?, segment("name", name)?),
                &body,
            )
            .await
    }

    /// Grants one repository access to an organization secret.
    pub async fn add_selected_repo_to_org_secret(&self, org: &str, name: &str, repository_id: u64) -> GitHubResult<()> {
        self.client
            .put_empty(&format!(
                "{}/{}/repositories/{}",
                self.org_secrets(org)?,
                segment("name", name)?,
                repository_id
            ))
            .await
    }

    /// Revokes one repository's access to an organization secret.
    pub async fn remove_selected_repo_from_org_secret(
        &self,
        org: &str,
        name: &str,
        repository_id: u64,
    ) -> GitHubResult<()> {
        self.client
            .delete(&format!(
                "{}/{}/repositories/{}",
                self.org_secrets(org)?,
                segment("name", name)?,
                repository_id
            ))
            .await
    }

    // Environment secrets (Actions only)

    /// Gets the key used to encrypt environment secrets.
    pub async fn get_env_public_key(&self, repository_id: u64, environment: &str) -> GitHubResult<PublicKey> {
        self.client
            .get(&format!("{}/public-key", self.env_secrets(repository_id, environment)?))
            .await
    }

    /// Lists environment secrets without their values.
    pub async fn list_env_secrets(
        &self,
        repository_id: u64,
        environment: &str,
        opts: &ListOptions,
    ) -> GitHubResult<Secrets> {
        self.client
            .get_with_params(&self.env_secrets(repository_id, environment)?, opts)
            .await
    }

    /// Gets an environment secret without its value.
    pub async fn get_env_secret(&self, repository_id: u64, environment: &str, name: &str) -> GitHubResult<Secret> {
        self.client
            .get(&format!(
                "{}/{}",
                self.env_secrets(repository_id, environment)?,
                segment("name", name)?
            ))
            .await
    }

    /// Creates or updates an environment secret.
    pub async fn create_or_update_env_secret(
        &self,
        repository_id: u64,
        environment: &str,
        secret: &EncryptedSecret,
    ) -> GitHubResult<()> {
        self.client
            .put_no_response(
                &format!(
                    "{}/{}",
                    self.env_secrets(repository_id, environment)?,
                    segment("name", &secret.name)?
                ),
                secret,
            )
            .await
    }

    /// Deletes an environment secret.
    pub async fn delete_env_secret(&self, repository_id: u64, environment: &str, name: &str) -> GitHubResult<()> {
        self.client
            .delete(&format!(
                "{}/{}",
                self.env_secrets(repository_id, environment)?,
                segment("name", name)?
            ))
            .await
    }

    fn repo_secrets(&self, owner: &str, repo: &str) -> GitHubResult<String> {
        Ok(format!("{}/{}/secrets", repo_path(owner, repo)?, self.app))
    }

    fn org_secrets(&self, org: &str) -> GitHubResult<String> {
        Ok(format!("{}/{}/secrets", org_path(org)?, self.app))
    }

    fn env_secrets(&self, repository_id: u64, environment: &str) -> GitHubResult<String> {
        if self.app != SecretsApp::Actions {
            return Err(GitHubError::invalid_parameter(format!(
                "environment secrets are only available for actions, not {}",
                self.app
            )));
        }
        Ok(format!(
            "/repositories/{}/environments/{}/secrets",
            repository_id,
            segment("environment", environment)?
        ))
    }
}

/// Public key for encrypting secrets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    /// Key ID. Some endpoints send it as a number.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub key_id: Option<String>,
    /// Public key (base64 encoded).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum KeyId {
        Text(String),
        Number(i64),
    }

    Ok(Option::<KeyId>::deserialize(deserializer)?.map(|id| match id {
        KeyId::Text(s) => s,
        KeyId::Number(n) => n.to_string(),
    }))
}

/// A secret's metadata. Values are never returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Secret {
    /// Secret name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Created at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    /// Updated at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    /// all, private or selected (organization secrets only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_repositories_url: Option<String>,
}

/// Page of secrets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Secrets {
    /// Total count across all pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    /// Secrets on this page.
    #[serde(default)]
    pub secrets: Vec<Secret>,
}

/// Repositories with access to an organization secret.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedReposList {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub repositories: Vec<Repository>,
}

/// A secret value encrypted with the app's public key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EncryptedSecret {
    /// Secret name, used in the URL only.
    #[serde(skip)]
    pub name: String,
    /// ID of the key `encrypted_value` was sealed with.
    pub key_id: String,
    /// Base64 of the sealed-box encrypted value.
    pub encrypted_value: String,
    /// all, private or selected (organization secrets only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    /// Repositories allowed to read a `selected` secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_repository_ids: Option<Vec<u64>>,
}

#[derive(Debug, Serialize)]
struct SelectedRepoIds<'a> {
    selected_repository_ids: &'a [u64],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::assert_round_trip;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test]
    fn test_encrypted_secret_omits_name() {
        let secret = EncryptedSecret {
            name: "TOKEN".to_string(),
            key_id: "568250167242549743".to_string(),
            encrypted_value: "c2VjcmV0".to_string(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&secret).unwrap(),
            json!({"key_id": "568250167242549743", "encrypted_value": "c2VjcmV0"})
        );
    }

    #[test]
    fn test_public_key_id_accepts_numbers() {
        let text: PublicKey = serde_json::from_value(json!({"key_id": "1234", "key": "k"})).unwrap();
        let number: PublicKey = serde_json::from_value(json!({"key_id": 1234, "key": "k"})).unwrap();
        assert_eq!(text, number);

        let absent: PublicKey = serde_json::from_value(json!({"key": "k"})).unwrap();
        assert_eq!(absent.key_id, None);
    }

    #[test]
    fn test_app_path_segments() {
        assert_eq!(SecretsApp::Actions.to_string(), "actions");
        assert_eq!(SecretsApp::Dependabot.to_string(), "dependabot");
        assert_eq!(SecretsApp::Codespaces.to_string(), "codespaces");
    }

    #[test_case(json!({}) ; "empty")]
    #[test_case(json!({
        "name": "GIST_ID",
        "created_at": "2019-08-10T14:59:22Z",
        "updated_at": "2020-01-10T14:59:22Z",
        "visibility": "selected",
        "selected_repositories_url": "https://api.github.com/orgs/octo-org/actions/secrets/SUPER_SECRET/repositories"
    }) ; "populated")]
    fn test_secret_round_trip(value: Value) {
        assert_round_trip::<Secret>(value);
    }

    #[test_case(json!({"secrets": []}) ; "empty")]
    #[test_case(json!({"total_count": 1, "secrets": [{"name": "GH_TOKEN", "visibility": "all"}]}) ; "populated")]
    fn test_secrets_envelope_round_trip(value: Value) {
        assert_round_trip::<Secrets>(value);
    }
}
