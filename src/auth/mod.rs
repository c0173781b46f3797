//! Authentication mechanisms for GitHub API.

use crate::errors::{GitHubError, GitHubErrorKind, GitHubResult};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Authentication method for GitHub API.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    /// Personal Access Token (classic or fine-grained).
    Pat(SecretString),
    /// OAuth access token.
    OAuth(SecretString),
    /// GitHub Actions token (from GITHUB_TOKEN).
    Actions(SecretString),
    /// HTTP basic authentication with a username and password or token.
    Basic {
        /// Username.
        username: String,
        /// Password or token.
        password: SecretString,
    },
    /// GitHub App authentication (app-level JWT).
    App(AppAuth),
}

impl AuthMethod {
    /// Creates a PAT authentication method.
    pub fn pat(token: impl Into<String>) -> Self {
        Self::Pat(SecretString::new(token.into()))
    }

    /// Creates an OAuth authentication method.
    pub fn oauth(token: impl Into<String>) -> Self {
        Self::OAuth(SecretString::new(token.into()))
    }

    /// Creates a GitHub Actions token authentication method.
    pub fn actions(token: impl Into<String>) -> Self {
        Self::Actions(SecretString::new(token.into()))
    }

    /// Creates a basic authentication method.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// Creates a GitHub App authentication method.
    pub fn app(app_id: u64, private_key: impl Into<String>) -> Self {
        Self::App(AppAuth {
            app_id,
            private_key: SecretString::new(private_key.into()),
        })
    }

    /// Gets the token prefix for logging.
    pub fn token_prefix(&self) -> &'static str {
        match self {
            Self::Pat(t) => {
                let exposed = t.expose_secret();
                if exposed.starts_with("ghp_") {
                    "ghp_***"
                } else if exposed.starts_with("github_pat_") {
                    "github_pat_***"
                } else {
                    "***"
                }
            }
            Self::OAuth(_) => "gho_***",
            Self::Actions(_) => "ghs_***",
            Self::Basic { .. } => "basic",
            Self::App(_) => "app_jwt",
        }
    }

    /// Produces the Authorization header value for this method.
    pub fn header_value(&self) -> GitHubResult<String> {
        match self {
            Self::Pat(token) | Self::OAuth(token) | Self::Actions(token) => {
                Ok(format!("Bearer {}", token.expose_secret()))
            }
            Self::Basic { username, password } => {
                let raw = format!("{}:{}", username, password.expose_secret());
                Ok(format!("Basic {}", STANDARD.encode(raw)))
            }
            Self::App(app) => Ok(format!("Bearer {}", app.generate_jwt()?)),
        }
    }
}

/// GitHub App authentication configuration.
#[derive(Debug, Clone)]
pub struct AppAuth {
    /// GitHub App ID.
    pub app_id: u64,
    /// Private key (PEM format).
    pub private_key: SecretString,
}

/// JWT claims for GitHub App authentication.
#[derive(Debug, Serialize, Deserialize)]
struct JwtClaims {
    iat: i64,
    exp: i64,
    iss: String,
}

impl AppAuth {
    /// Generates a JWT for GitHub App authentication.
    fn generate_jwt(&self) -> GitHubResult<String> {
        let now = Utc::now();
        // Backdated to tolerate clock drift; GitHub caps lifetime at 10 minutes.
        let claims = JwtClaims {
            iat: (now - Duration::seconds(60)).timestamp(),
            exp: (now + Duration::minutes(9)).timestamp(),
            iss: self.app_id.to_string(),
        };

        let key = EncodingKey::from_rsa_pem(self.private_key.expose_secret().as_bytes())
            .map_err(|e| {
                GitHubError::new(
                    GitHubErrorKind::InvalidAppCredentials,
                    format!("Failed to parse private key: {}", e),
                )
            })?;

        encode(&Header::new(Algorithm::RS256), &claims, &key).map_err(|e| {
            GitHubError::new(
                GitHubErrorKind::AppAuthenticationFailed,
                format!("Failed to generate JWT: {}", e),
            )
        })
    }
}

/// Credential provider trait for dynamic credential resolution.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Gets the current authentication method, or `None` for anonymous access.
    async fn get_auth(&self) -> GitHubResult<Option<AuthMethod>>;
}

/// Static credential provider using fixed credentials.
pub struct StaticCredentialProvider {
    method: Option<AuthMethod>,
}

impl StaticCredentialProvider {
    /// Creates a new static credential provider.
    pub fn new(method: Option<AuthMethod>) -> Self {
        Self { method }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn get_auth(&self) -> GitHubResult<Option<AuthMethod>> {
        Ok(self.method.clone())
    }
}

/// Environment variable credential provider.
///
/// The variable is read on every request, so rotating it takes effect
/// without rebuilding the client.
pub struct EnvCredentialProvider {
    token_var: String,
}

impl EnvCredentialProvider {
    /// Creates a provider from GITHUB_TOKEN environment variable.
    pub fn from_github_token() -> Self {
        Self::from_env_var(crate::config::ENV_TOKEN)
    }

    /// Creates a provider from a custom environment variable.
    pub fn from_env_var(var_name: impl Into<String>) -> Self {
        Self {
            token_var: var_name.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn get_auth(&self) -> GitHubResult<Option<AuthMethod>> {
        std::env::var(&self.token_var)
            .map(|token| Some(AuthMethod::pat(token)))
            .map_err(|_| {
                GitHubError::new(
                    GitHubErrorKind::MissingAuth,
                    format!("Environment variable {} not set", self.token_var),
                )
            })
    }
}

/// Resolves the Authorization header for each request.
#[derive(Clone)]
pub struct AuthManager {
    provider: Arc<dyn CredentialProvider>,
}

impl AuthManager {
    /// Creates a manager for a fixed (possibly absent) authentication method.
    pub fn new(method: Option<AuthMethod>) -> Self {
        Self::with_provider(Arc::new(StaticCredentialProvider::new(method)))
    }

    /// Creates a manager backed by a custom credential provider.
    pub fn with_provider(provider: Arc<dyn CredentialProvider>) -> Self {
        Self { provider }
    }

    /// Generates the Authorization header value, if any.
    pub async fn get_auth_header(&self) -> GitHubResult<Option<String>> {
        match self.provider.get_auth().await? {
            Some(method) => method.header_value().map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pat_auth() {
        let auth = AuthMethod::pat("ghp_xxxxxxxxxxxx");
        assert_eq!(auth.token_prefix(), "ghp_***");
    }

    #[test]
    fn test_oauth_auth() {
        let auth = AuthMethod::oauth("gho_xxxxxxxxxxxx");
        assert_eq!(auth.token_prefix(), "gho_***");
    }

    #[test]
    fn test_basic_header() {
        let auth = AuthMethod::basic("test_user", "test_token");
        assert_eq!(
            auth.header_value().unwrap(),
            "Basic dGVzdF91c2VyOnRlc3RfdG9rZW4="
        );
    }

    #[test]
    fn test_app_auth_rejects_bad_key() {
        let auth = AuthMethod::app(12345, "not a pem");
        assert_eq!(auth.token_prefix(), "app_jwt");
        let err = auth.header_value().unwrap_err();
        assert_eq!(*err.kind(), GitHubErrorKind::InvalidAppCredentials);
    }

    #[tokio::test]
    async fn test_auth_manager_pat() {
        let manager = AuthManager::new(Some(AuthMethod::pat("ghp_test")));
        let header = manager.get_auth_header().await.unwrap();
        assert_eq!(header.as_deref(), Some("Bearer ghp_test"));
    }

    #[tokio::test]
    async fn test_auth_manager_anonymous() {
        let manager = AuthManager::new(None);
        assert!(manager.get_auth_header().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_env_provider_missing_var() {
        let provider = EnvCredentialProvider::from_env_var("INTEGRATIONS_GITHUB_REST_UNSET_VAR");
        let err = provider.get_auth().await.unwrap_err();
        assert_eq!(*err.kind(), GitHubErrorKind::MissingAuth);
    }
}
