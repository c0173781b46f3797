//! Configuration types for the GitHub client.

use crate::auth::AuthMethod;
use crate::errors::{GitHubError, GitHubErrorKind};
use std::time::Duration;

/// Default GitHub API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Default GitHub API version (date-based).
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = concat!("integrations-github-rest/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding an API base URL override.
pub const ENV_API_URL: &str = "GITHUB_API_URL";

/// Environment variable holding a token.
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";

/// Connection pool configuration, passed through to the HTTP client.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum idle connections per host.
    pub max_idle_per_host: usize,
    /// Idle connection timeout.
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 20,
            idle_timeout: Duration::from_secs(90),
        }
    }
}

/// GitHub client configuration.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API base URL.
    pub base_url: String,
    /// API version header.
    pub api_version: String,
    /// Authentication method. `None` sends anonymous requests.
    pub auth: Option<AuthMethod>,
    /// Request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// User-Agent header.
    pub user_agent: String,
    /// Connection pool configuration.
    pub pool: PoolConfig,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            auth: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            pool: PoolConfig::default(),
        }
    }
}

impl GitHubConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> GitHubConfigBuilder {
        GitHubConfigBuilder::new()
    }

    /// Builds a configuration from `GITHUB_API_URL` and `GITHUB_TOKEN`.
    ///
    /// Both variables are optional; without a token the client is anonymous.
    pub fn from_env() -> Result<Self, GitHubError> {
        let mut builder = Self::builder();
        if let Ok(url) = std::env::var(ENV_API_URL) {
            builder = builder.base_url(url);
        }
        if let Ok(token) = std::env::var(ENV_TOKEN) {
            if !token.is_empty() {
                builder = builder.auth(AuthMethod::pat(token));
            }
        }
        builder.build()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), GitHubError> {
        if self.base_url.is_empty() {
            return Err(GitHubError::new(
                GitHubErrorKind::InvalidBaseUrl,
                "Base URL cannot be empty",
            ));
        }

        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            GitHubError::new(
                GitHubErrorKind::InvalidBaseUrl,
                format!("Invalid base URL {:?}: {}", self.base_url, e),
            )
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(GitHubError::new(
                GitHubErrorKind::InvalidBaseUrl,
                "Base URL must start with http:// or https://",
            ));
        }

        if self.api_version.is_empty() {
            return Err(GitHubError::configuration("API version cannot be empty"));
        }

        if self.user_agent.is_empty() {
            return Err(GitHubError::configuration("User-Agent is required by GitHub API"));
        }

        Ok(())
    }
}

/// Builder for GitHubConfig.
#[derive(Debug, Default)]
pub struct GitHubConfigBuilder {
    base_url: Option<String>,
    api_version: Option<String>,
    auth: Option<AuthMethod>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    pool: Option<PoolConfig>,
}

impl GitHubConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL. GitHub Enterprise Server uses `https://HOST/api/v3`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the API version.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Sets the authentication method.
    pub fn auth(mut self, auth: AuthMethod) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the connection pool configuration.
    pub fn pool(mut self, config: PoolConfig) -> Self {
        self.pool = Some(config);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> Result<GitHubConfig, GitHubError> {
        let config = GitHubConfig {
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_version: self.api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            auth: self.auth,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            user_agent: self.user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            pool: self.pool.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}
