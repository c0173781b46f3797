//! GitHub API client implementation.
//!
//! Every endpoint method in `services` funnels through the helpers here:
//! build the URL, encode an optional JSON body, send exactly one request and
//! decode the response. Non-2xx responses become [`GitHubError`] values that
//! carry the status, request id and rate-limit headers.

use crate::auth::{AuthManager, AuthMethod, CredentialProvider};
use crate::config::{GitHubConfig, GitHubConfigBuilder};
use crate::errors::{ErrorResponseBody, GitHubError, GitHubErrorKind, GitHubResult, RateLimitInfo};
use crate::observability::{RequestTimer, TracingHooks};
use crate::pagination::{Page, PageFetcher, PageIterator, PaginationLinks};
use crate::query::add_options;
use crate::services::*;
use chrono::DateTime;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, CONTENT_TYPE, LOCATION, USER_AGENT};
use reqwest::{redirect, Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Media type requested on every call.
pub const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// GitHub API client.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// HTTP client.
    http: Client,
    /// HTTP client that does not follow redirects.
    no_redirect: Client,
    /// Configuration.
    config: Arc<GitHubConfig>,
    /// Authentication manager.
    auth: AuthManager,
}

impl GitHubClient {
    /// Creates a new GitHub client.
    pub fn new(config: GitHubConfig) -> GitHubResult<Self> {
        let auth = AuthManager::new(config.auth.clone());
        Self::with_auth_manager(config, auth)
    }

    /// Creates a client that resolves credentials through a provider on every request.
    pub fn with_credentials(
        config: GitHubConfig,
        provider: Arc<dyn CredentialProvider>,
    ) -> GitHubResult<Self> {
        Self::with_auth_manager(config, AuthManager::with_provider(provider))
    }

    fn with_auth_manager(config: GitHubConfig, auth: AuthManager) -> GitHubResult<Self> {
        config.validate()?;

        let http = Self::http_builder(&config).build().map_err(|e| {
            GitHubError::new(
                GitHubErrorKind::InvalidConfiguration,
                format!("Failed to create HTTP client: {}", e),
            )
        })?;
        let no_redirect = Self::http_builder(&config)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| {
                GitHubError::new(
                    GitHubErrorKind::InvalidConfiguration,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            http,
            no_redirect,
            config: Arc::new(config),
            auth,
        })
    }

    fn http_builder(config: &GitHubConfig) -> reqwest::ClientBuilder {
        Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool.max_idle_per_host)
            .pool_idle_timeout(config.pool.idle_timeout)
    }

    /// Creates a new client builder.
    pub fn builder() -> GitHubClientBuilder {
        GitHubClientBuilder::new()
    }

    /// Gets the base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // Service accessors

    /// Gets the issues service.
    pub fn issues(&self) -> IssuesService<'_> {
        IssuesService::new(self)
    }

    /// Gets the repositories service.
    pub fn repositories(&self) -> RepositoriesService<'_> {
        RepositoriesService::new(self)
    }

    /// Gets the webhook configuration service.
    pub fn hooks(&self) -> HooksService<'_> {
        HooksService::new(self)
    }

    /// Gets the GitHub Actions secrets service.
    pub fn actions_secrets(&self) -> SecretsService<'_> {
        SecretsService::new(self, SecretsApp::Actions)
    }

    /// Gets the Dependabot secrets service.
    pub fn dependabot_secrets(&self) -> SecretsService<'_> {
        SecretsService::new(self, SecretsApp::Dependabot)
    }

    /// Gets the Codespaces secrets service.
    pub fn codespaces_secrets(&self) -> SecretsService<'_> {
        SecretsService::new(self, SecretsApp::Codespaces)
    }

    /// Gets the rulesets service.
    pub fn rulesets(&self) -> RulesetsService<'_> {
        RulesetsService::new(self)
    }

    /// Gets the audit log service.
    pub fn audit_log(&self) -> AuditLogService<'_> {
        AuditLogService::new(self)
    }

    /// Gets the SCIM provisioning service.
    pub fn scim(&self) -> ScimService<'_> {
        ScimService::new(self)
    }

    /// Gets the migrations service.
    pub fn migrations(&self) -> MigrationsService<'_> {
        MigrationsService::new(self)
    }

    /// Gets the users service.
    pub fn users(&self) -> UsersService<'_> {
        UsersService::new(self)
    }

    /// Gets the organizations service.
    pub fn organizations(&self) -> OrganizationsService<'_> {
        OrganizationsService::new(self)
    }

    /// Gets the rate limit service.
    pub fn rate_limit(&self) -> RateLimitService<'_> {
        RateLimitService::new(self)
    }

    // HTTP methods

    /// Makes a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> GitHubResult<T> {
        self.request(Method::GET, path, Option::<&()>::None).await
    }

    /// Makes a GET request with query parameters.
    pub async fn get_with_params<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        path: &str,
        params: &P,
    ) -> GitHubResult<T> {
        let path = add_options(path, params)?;
        self.get(&path).await
    }

    /// Makes a GET request for one page of a list endpoint.
    pub async fn get_page<T: DeserializeOwned, P: Serialize + ?Sized>(
        &self,
        path: &str,
        params: &P,
    ) -> GitHubResult<Page<T>> {
        let path = add_options(path, params)?;
        self.get_page_url(&path).await
    }

    /// Fetches a page by path or by the absolute URL from a `Link` header.
    pub async fn get_page_url<T: DeserializeOwned>(&self, url: &str) -> GitHubResult<Page<T>> {
        let url = self.build_url(url);
        let response = self
            .execute(&self.http, Method::GET, &url, None)
            .await?;

        let links = PaginationLinks::from_headers(response.headers());
        let rate_limit = Self::extract_rate_limit(response.headers());
        let items: Vec<T> = Self::decode(response).await?;

        Ok(Page::new(items, links).with_rate_limit(rate_limit))
    }

    /// Returns an iterator over every page of a list endpoint.
    pub fn paginate<T, P>(&self, path: &str, params: &P) -> GitHubResult<PageIterator<T>>
    where
        T: DeserializeOwned + Send + 'static,
        P: Serialize + ?Sized,
    {
        let first = add_options(path, params)?;
        let client = self.clone();
        let fetcher: PageFetcher<T> = Box::new(move |next: Option<String>| {
            let client = client.clone();
            let url = next.unwrap_or_else(|| first.clone());
            Box::pin(async move { client.get_page_url(&url).await })
        });
        Ok(PageIterator::new(fetcher))
    }

    /// Makes a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> GitHubResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Makes a POST request without a response body.
    pub async fn post_no_response<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> GitHubResult<()> {
        self.request_no_response(Method::POST, path, Some(body)).await
    }

    /// Makes a bodiless POST request without a response body.
    pub async fn post_empty(&self, path: &str) -> GitHubResult<()> {
        self.request_no_response(Method::POST, path, Option::<&()>::None).await
    }

    /// Makes a PUT request.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> GitHubResult<T> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// Makes a PUT request without a response body.
    pub async fn put_no_response<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> GitHubResult<()> {
        self.request_no_response(Method::PUT, path, Some(body)).await
    }

    /// Makes a bodiless PUT request without a response body.
    pub async fn put_empty(&self, path: &str) -> GitHubResult<()> {
        self.request_no_response(Method::PUT, path, Option::<&()>::None).await
    }

    /// Makes a PATCH request.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> GitHubResult<T> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// Makes a DELETE request.
    pub async fn delete(&self, path: &str) -> GitHubResult<()> {
        self.request_no_response(Method::DELETE, path, Option::<&()>::None).await
    }

    /// Makes a DELETE request with a body and decodes the response.
    pub async fn delete_with_body<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> GitHubResult<T> {
        self.request(Method::DELETE, path, Some(body)).await
    }

    /// Makes a DELETE request with a body and no response body.
    pub async fn delete_with_body_no_response<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> GitHubResult<()> {
        self.request_no_response(Method::DELETE, path, Some(body)).await
    }

    /// Interprets a 204 as `true` and a 404 as `false`.
    pub async fn check(&self, path: &str) -> GitHubResult<bool> {
        let url = self.build_url(path);
        TracingHooks::on_request_start("GET", &url);
        let timer = RequestTimer::start();

        match self.send(&self.http, Method::GET, &url, None).await {
            Ok(response) => {
                TracingHooks::on_request_complete("GET", &url, response.status().as_u16(), timer.elapsed());
                Ok(true)
            }
            Err(e) if e.status_code() == Some(404) => {
                TracingHooks::on_request_complete("GET", &url, 404, timer.elapsed());
                Ok(false)
            }
            Err(e) => {
                TracingHooks::on_request_error("GET", &url, &e);
                Err(e)
            }
        }
    }

    /// Issues a GET without following redirects and returns the `Location` header.
    pub async fn redirect_location(&self, path: &str) -> GitHubResult<String> {
        let url = self.build_url(path);
        let response = self
            .execute(&self.no_redirect, Method::GET, &url, None)
            .await?;

        if !response.status().is_redirection() {
            return Err(GitHubError::new(
                GitHubErrorKind::UnexpectedFormat,
                format!("Expected a redirect, got HTTP {}", response.status().as_u16()),
            )
            .with_status(response.status().as_u16()));
        }

        response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or_else(|| {
                GitHubError::new(
                    GitHubErrorKind::UnexpectedFormat,
                    "Redirect response has no Location header",
                )
            })
    }

    /// Makes a request and returns the raw response.
    pub async fn raw_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> GitHubResult<Response> {
        let url = self.build_url(path);
        let body = Self::encode_body(body)?;
        self.execute(&self.http, method, &url, body).await
    }

    // Internal methods

    async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> GitHubResult<T> {
        let response = self.raw_request(method, path, body).await?;
        Self::decode(response).await
    }

    async fn request_no_response<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> GitHubResult<()> {
        self.raw_request(method, path, body).await?;
        Ok(())
    }

    fn encode_body<B: Serialize + ?Sized>(body: Option<&B>) -> GitHubResult<Option<Vec<u8>>> {
        body.map(serde_json::to_vec).transpose().map_err(|e| {
            GitHubError::new(
                GitHubErrorKind::InvalidParameter,
                format!("Failed to serialize request body: {}", e),
            )
            .with_cause(e)
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> GitHubResult<T> {
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(GitHubError::transport)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            GitHubError::deserialization(format!("Failed to deserialize response: {}", e))
                .with_status(status)
                .with_cause(e)
        })
    }

    async fn execute(
        &self,
        http: &Client,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> GitHubResult<Response> {
        let method_name = method.as_str().to_string();
        TracingHooks::on_request_start(&method_name, url);
        let timer = RequestTimer::start();

        let result = self.send(http, method, url, body).await;
        match &result {
            Ok(response) => TracingHooks::on_request_complete(
                &method_name,
                url,
                response.status().as_u16(),
                timer.elapsed(),
            ),
            Err(e) => TracingHooks::on_request_error(&method_name, url, e),
        }
        result
    }

    async fn send(
        &self,
        http: &Client,
        method: Method,
        url: &str,
        body: Option<Vec<u8>>,
    ) -> GitHubResult<Response> {
        let mut request = http
            .request(method, url)
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", &self.config.api_version);

        if let Some(auth_header) = self.auth.get_auth_header().await? {
            request = request.header(AUTHORIZATION, auth_header);
        }

        if let Some(bytes) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(bytes);
        }

        let response = request.send().await.map_err(GitHubError::transport)?;
        TracingHooks::on_response_headers(response.headers());

        let rate_limit = Self::extract_rate_limit(response.headers());
        if let Some(ref info) = rate_limit {
            TracingHooks::on_rate_limit_update(info);
        }

        let status = response.status();
        if status.is_success() || status.is_redirection() {
            return Ok(response);
        }

        Err(Self::handle_error_response(response, rate_limit).await)
    }

    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn extract_rate_limit(headers: &HeaderMap) -> Option<RateLimitInfo> {
        fn header<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        }

        let limit = header(headers, "x-ratelimit-limit")?;
        let remaining = header(headers, "x-ratelimit-remaining")?;
        let reset_timestamp: i64 = header(headers, "x-ratelimit-reset")?;
        let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

        Some(RateLimitInfo {
            limit,
            remaining,
            used: header(headers, "x-ratelimit-used"),
            reset_at,
            retry_after: header(headers, "retry-after"),
            resource: header(headers, "x-ratelimit-resource"),
        })
    }

    async fn handle_error_response(response: Response, rate_limit: Option<RateLimitInfo>) -> GitHubError {
        let status: StatusCode = response.status();
        let request_id = response
            .headers()
            .get("x-github-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = response
            .bytes()
            .await
            .ok()
            .and_then(|bytes| ErrorResponseBody::from_slice(&bytes));

        GitHubError::from_response(status.as_u16(), body, request_id, rate_limit)
    }
}

/// Builder for GitHubClient.
pub struct GitHubClientBuilder {
    config_builder: GitHubConfigBuilder,
    provider: Option<Arc<dyn CredentialProvider>>,
}

impl GitHubClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config_builder: GitHubConfig::builder(),
            provider: None,
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(url);
        self
    }

    /// Sets the authentication method.
    pub fn auth(mut self, auth: AuthMethod) -> Self {
        self.config_builder = self.config_builder.auth(auth);
        self
    }

    /// Sets a personal access token.
    pub fn pat(self, token: impl Into<String>) -> Self {
        self.auth(AuthMethod::pat(token))
    }

    /// Resolves credentials through a provider instead of a fixed method.
    pub fn credentials(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the User-Agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(ua);
        self
    }

    /// Builds the client.
    pub fn build(self) -> GitHubResult<GitHubClient> {
        let config = self.config_builder.build()?;
        match self.provider {
            Some(provider) => GitHubClient::with_credentials(config, provider),
            None => GitHubClient::new(config),
        }
    }
}

impl Default for GitHubClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
