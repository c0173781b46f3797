//! # GitHub REST Integration Library
//!
//! Typed bindings for the GitHub REST API:
//! - Service groupings per resource area (issues, repositories, hooks,
//!   secrets, rulesets, audit log, SCIM, migrations, users, organizations)
//! - Resource structs of independently optional fields, with explicit
//!   `null` support for partial updates
//! - Tagged-union ruleset rules keyed by their `type` discriminator
//! - `Link` header pagination
//! - Webhook signature verification and event payload parsing
//!
//! Every call is a single request/response exchange. Nothing is retried.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_github_rest::{GitHubClient, IssueRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GitHubClient::builder()
//!         .pat("ghp_xxxxxxxxxxxx")
//!         .build()?;
//!
//!     let issue = client
//!         .issues()
//!         .create("octocat", "hello-world", &IssueRequest {
//!             title: Some("Found a bug".to_string()),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("opened #{}", issue.number.unwrap_or_default());
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

// Core modules
pub mod codec;
pub mod config;
pub mod errors;
pub mod types;

// Authentication
pub mod auth;

// HTTP client and transport
pub mod client;
pub mod query;

// Pagination handling
pub mod pagination;

// API Services
pub mod services;

// Webhooks
pub mod webhooks;

// Observability
pub mod observability;

// Re-exports for convenience
pub use auth::{AuthManager, AuthMethod, CredentialProvider, EnvCredentialProvider, StaticCredentialProvider};
pub use client::{GitHubClient, GitHubClientBuilder};
pub use codec::Timestamp;
pub use config::{GitHubConfig, GitHubConfigBuilder};
pub use errors::{GitHubError, GitHubErrorKind, GitHubResult, RateLimitInfo};
pub use pagination::{ListCursorOptions, ListOptions, Page, PageIterator, PaginationLinks};
pub use services::*;
pub use types::*;
pub use webhooks::{parse_webhook, validate_payload, verify_signature, WebhookEvent, WebhookEventType, WebhookVerifier};
