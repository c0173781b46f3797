//! Incoming webhook deliveries: signature verification and payload parsing.
//!
//! The `X-GitHub-Event` header names the payload shape. [`parse_webhook`]
//! selects the matching struct and fails for event names it does not model.

use crate::codec::Timestamp;
use crate::errors::{GitHubError, GitHubErrorKind, GitHubResult};
use crate::observability::TracingHooks;
use crate::services::Hook;
use crate::types::{Issue, IssueComment, Label, Organization, Repository, RepositoryRuleset, User};
use hmac::{Hmac, Mac};
use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the HMAC-SHA256 signature.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";
/// Header carrying the event name.
pub const EVENT_TYPE_HEADER: &str = "x-github-event";
/// Header carrying the unique delivery ID.
pub const DELIVERY_ID_HEADER: &str = "x-github-delivery";

const SIGNATURE_PREFIX: &str = "sha256=";

/// Verifies a `sha256=<hex>` signature over `payload`.
///
/// The digest comparison is constant-time.
pub fn verify_signature(secret: &[u8], signature: &str, payload: &[u8]) -> GitHubResult<()> {
    let digest = signature
        .strip_prefix(SIGNATURE_PREFIX)
        .ok_or_else(|| GitHubError::invalid_signature("Invalid signature format: must start with 'sha256='"))?;

    let expected = hex::decode(digest)
        .map_err(|e| GitHubError::invalid_signature(format!("Invalid signature hex encoding: {}", e)))?;

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| GitHubError::invalid_signature(format!("Failed to create HMAC: {}", e)))?;
    mac.update(payload);

    mac.verify_slice(&expected)
        .map_err(|_| GitHubError::invalid_signature("Payload signature check failed"))
}

/// Computes the `sha256=<hex>` signature GitHub sends for `payload`.
pub fn compute_signature(secret: &[u8], payload: &[u8]) -> GitHubResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| GitHubError::invalid_signature(format!("Failed to create HMAC: {}", e)))?;
    mac.update(payload);
    Ok(format!("{}{}", SIGNATURE_PREFIX, hex::encode(mac.finalize().into_bytes())))
}

/// Webhook signature verification with a shared secret.
pub struct WebhookVerifier {
    secret: SecretString,
}

impl WebhookVerifier {
    /// Creates a new webhook verifier with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
        }
    }

    /// Verifies the signature of a payload.
    pub fn verify(&self, signature: &str, payload: &[u8]) -> GitHubResult<()> {
        verify_signature(self.secret.expose_secret().as_bytes(), signature, payload)
    }

    /// Verifies the signature, then parses the payload as `event_name`.
    pub fn verify_and_parse(
        &self,
        event_name: &str,
        signature: &str,
        payload: &[u8],
    ) -> GitHubResult<WebhookEvent> {
        let verified = self.verify(signature, payload);
        TracingHooks::on_webhook_verified(event_name, verified.is_ok());
        verified?;
        parse_webhook(event_name, payload)
    }
}

/// Validates a delivery from its request headers and raw body.
///
/// The body may be JSON or `application/x-www-form-urlencoded` with the JSON
/// in the `payload` field. The signature is always computed over the raw
/// body. An empty `secret` skips signature verification.
pub fn validate_payload(headers: &HeaderMap, body: &[u8], secret: &[u8]) -> GitHubResult<WebhookEvent> {
    let event_name = header_str(headers, EVENT_TYPE_HEADER)
        .ok_or_else(|| GitHubError::missing_parameter(EVENT_TYPE_HEADER))?;

    if !secret.is_empty() {
        let signature = header_str(headers, SIGNATURE_HEADER)
            .ok_or_else(|| GitHubError::invalid_signature("Missing signature header"))?;
        let verified = verify_signature(secret, signature, body);
        TracingHooks::on_webhook_verified(event_name, verified.is_ok());
        verified?;
    }

    let content_type = header_str(headers, "content-type").unwrap_or("application/json");
    let media_type = content_type.split(';').next().unwrap_or_default().trim();
    match media_type {
        "application/json" => parse_webhook(event_name, body),
        "application/x-www-form-urlencoded" => {
            let payload = url::form_urlencoded::parse(body)
                .find(|(key, _)| key == "payload")
                .map(|(_, value)| value.into_owned())
                .ok_or_else(|| payload_error("form body has no payload field"))?;
            parse_webhook(event_name, payload.as_bytes())
        }
        other => Err(payload_error(format!("unsupported content type {:?}", other))),
    }
}

/// Returns the delivery ID of a webhook request.
pub fn delivery_id(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, DELIVERY_ID_HEADER)
}

/// Returns the event name of a webhook request.
pub fn webhook_type(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, EVENT_TYPE_HEADER)
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn payload_error(message: impl fmt::Display) -> GitHubError {
    GitHubError::new(
        GitHubErrorKind::PayloadParseError,
        format!("Failed to parse webhook payload: {}", message),
    )
}

/// Event names with a typed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventType {
    /// Sent once when a hook is created.
    Ping,
    /// Commits pushed to a ref.
    Push,
    /// Issue opened, edited, closed and so on.
    Issues,
    /// Comment on an issue or pull request.
    IssueComment,
    /// Label created, edited or deleted.
    Label,
    /// Repository created, renamed, archived and so on.
    Repository,
    /// Repository ruleset created, edited or deleted.
    RepositoryRuleset,
    /// The hook itself was deleted.
    Meta,
}

impl WebhookEventType {
    /// Every event type with a typed payload.
    pub const ALL: [WebhookEventType; 8] = [
        WebhookEventType::Ping,
        WebhookEventType::Push,
        WebhookEventType::Issues,
        WebhookEventType::IssueComment,
        WebhookEventType::Label,
        WebhookEventType::Repository,
        WebhookEventType::RepositoryRuleset,
        WebhookEventType::Meta,
    ];

    /// Returns the header value for this event.
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookEventType::Ping => "ping",
            WebhookEventType::Push => "push",
            WebhookEventType::Issues => "issues",
            WebhookEventType::IssueComment => "issue_comment",
            WebhookEventType::Label => "label",
            WebhookEventType::Repository => "repository",
            WebhookEventType::RepositoryRuleset => "repository_ruleset",
            WebhookEventType::Meta => "meta",
        }
    }
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebhookEventType {
    type Err = GitHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WebhookEventType::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| {
                GitHubError::new(
                    GitHubErrorKind::UnsupportedEvent,
                    format!("Unknown X-GitHub-Event in message: {}", s),
                )
            })
    }
}

/// A parsed webhook payload.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookEvent {
    Ping(Box<PingEvent>),
    Push(Box<PushEvent>),
    Issues(Box<IssuesEvent>),
    IssueComment(Box<IssueCommentEvent>),
    Label(Box<LabelEvent>),
    Repository(Box<RepositoryEvent>),
    RepositoryRuleset(Box<RepositoryRulesetEvent>),
    Meta(Box<MetaEvent>),
}

impl WebhookEvent {
    /// Returns the event type of this payload.
    pub fn event_type(&self) -> WebhookEventType {
        match self {
            WebhookEvent::Ping(_) => WebhookEventType::Ping,
            WebhookEvent::Push(_) => WebhookEventType::Push,
            WebhookEvent::Issues(_) => WebhookEventType::Issues,
            WebhookEvent::IssueComment(_) => WebhookEventType::IssueComment,
            WebhookEvent::Label(_) => WebhookEventType::Label,
            WebhookEvent::Repository(_) => WebhookEventType::Repository,
            WebhookEvent::RepositoryRuleset(_) => WebhookEventType::RepositoryRuleset,
            WebhookEvent::Meta(_) => WebhookEventType::Meta,
        }
    }
}

/// Parses a payload whose shape is selected by `event_name`.
pub fn parse_webhook(event_name: &str, payload: &[u8]) -> GitHubResult<WebhookEvent> {
    let event_type: WebhookEventType = event_name.parse()?;
    let event = match event_type {
        WebhookEventType::Ping => WebhookEvent::Ping(decode(payload)?),
        WebhookEventType::Push => WebhookEvent::Push(decode(payload)?),
        WebhookEventType::Issues => WebhookEvent::Issues(decode(payload)?),
        WebhookEventType::IssueComment => WebhookEvent::IssueComment(decode(payload)?),
        WebhookEventType::Label => WebhookEvent::Label(decode(payload)?),
        WebhookEventType::Repository => WebhookEvent::Repository(decode(payload)?),
        WebhookEventType::RepositoryRuleset => WebhookEvent::RepositoryRuleset(decode(payload)?),
        WebhookEventType::Meta => WebhookEvent::Meta(decode(payload)?),
    };
    Ok(event)
}

fn decode<T: for<'de> Deserialize<'de>>(payload: &[u8]) -> GitHubResult<Box<T>> {
    serde_json::from_slice(payload).map_err(payload_error)
}

/// App installation a delivery was sent for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookInstallation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

/// Previous value of an edited field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeFrom {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

/// Fields changed by an `edited` or `renamed` action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<ChangeFrom>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ChangeFrom>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<ChangeFrom>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ChangeFrom>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<ChangeFrom>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<ChangeFrom>,
    /// Repository rename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<RepositoryNameChange>,
}

/// Old name of a renamed repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryNameChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<ChangeFrom>,
}

/// Payload of the `ping` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PingEvent {
    /// Random string of GitHub zen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook: Option<Hook>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<WebhookInstallation>,
}

/// Author or committer of a pushed commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitAuthor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Timestamp>,
}

/// A commit in a push payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadCommit {
    /// Commit SHA.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<CommitAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committer: Option<CommitAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<Vec<String>>,
}

/// Payload of the `push` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushEvent {
    /// Full ref that was pushed, e.g. `refs/heads/main`.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits: Option<Vec<HeadCommit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_commit: Option<HeadCommit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pusher: Option<CommitAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<WebhookInstallation>,
}

/// Payload of the `issues` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssuesEvent {
    /// `opened`, `edited`, `closed`, `labeled` and so on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<Issue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<EditChange>,
    /// Set for `assigned` and `unassigned`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    /// Set for `labeled` and `unlabeled`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<WebhookInstallation>,
}

/// Payload of the `issue_comment` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueCommentEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<Issue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<IssueComment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<EditChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<WebhookInstallation>,
}

/// Payload of the `label` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<EditChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<WebhookInstallation>,
}

/// Payload of the `repository` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryEvent {
    /// `created`, `deleted`, `archived`, `renamed` and so on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<EditChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<WebhookInstallation>,
}

/// Payload of the `repository_ruleset` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRulesetEvent {
    /// `created`, `edited` or `deleted`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_ruleset: Option<RepositoryRuleset>,
    /// Raw change set of an `edited` action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<WebhookInstallation>,
}

/// Payload of the `meta` event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaEvent {
    /// Always `deleted`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_id: Option<u64>,
    /// Configuration of the deleted hook.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook: Option<Hook>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation: Option<WebhookInstallation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RepositoryRule;
    use reqwest::header::HeaderValue;
    use serde_json::json;
    use test_case::test_case;

    const SECRET: &[u8] = b"It's a Secret to Everybody";

    #[test]
    fn test_known_signature() {
        // Example delivery from the GitHub webhook documentation.
        let signature = "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17";
        assert!(verify_signature(SECRET, signature, b"Hello, World!").is_ok());
        assert_eq!(compute_signature(SECRET, b"Hello, World!").unwrap(), signature);
    }

    #[test_case("sha256=00" ; "wrong digest")]
    #[test_case("sha256=zz" ; "bad hex")]
    #[test_case("sha1=757107ea0eb2509fc211221cce984b8a37570b6d" ; "wrong algorithm")]
    fn test_rejected_signature(signature: &str) {
        let err = verify_signature(SECRET, signature, b"Hello, World!").unwrap_err();
        assert_eq!(err.kind(), &GitHubErrorKind::InvalidSignature);
    }

    #[test]
    fn test_verifier_rejects_tampered_payload() {
        let verifier = WebhookVerifier::new("secret");
        let signature = compute_signature(b"secret", br#"{"zen":"a"}"#).unwrap();
        assert!(verifier.verify_and_parse("ping", &signature, br#"{"zen":"a"}"#).is_ok());
        assert!(verifier.verify_and_parse("ping", &signature, br#"{"zen":"b"}"#).is_err());
    }

    #[test]
    fn test_event_type_round_trip() {
        for event in WebhookEventType::ALL {
            assert_eq!(event.as_str().parse::<WebhookEventType>().unwrap(), event);
        }
    }

    #[test]
    fn test_unknown_event_name() {
        let err = parse_webhook("gollum", b"{}").unwrap_err();
        assert_eq!(err.kind(), &GitHubErrorKind::UnsupportedEvent);
        assert!(err.message().contains("gollum"));
    }

    #[test]
    fn test_malformed_payload() {
        let err = parse_webhook("push", b"{not json").unwrap_err();
        assert_eq!(err.kind(), &GitHubErrorKind::PayloadParseError);

        let err = parse_webhook("issues", br#"{"issue": 5}"#).unwrap_err();
        assert_eq!(err.kind(), &GitHubErrorKind::PayloadParseError);
    }

    #[test]
    fn test_parse_push() {
        let payload = json!({
            "ref": "refs/heads/main",
            "before": "0000000000000000000000000000000000000000",
            "after": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
            "created": true,
            "head_commit": {"id": "6dcb09b5", "message": "Fix", "timestamp": "2024-01-02T03:04:05Z"},
            "repository": {"full_name": "octo/hello"},
            "sender": {"login": "octocat"}
        });

        let event = parse_webhook("push", payload.to_string().as_bytes()).unwrap();
        assert_eq!(event.event_type(), WebhookEventType::Push);
        let WebhookEvent::Push(push) = event else {
            panic!("expected push");
        };
        assert_eq!(push.git_ref.as_deref(), Some("refs/heads/main"));
        assert_eq!(push.created, Some(true));
        assert_eq!(push.deleted, None);
        assert_eq!(
            push.head_commit.and_then(|c| c.message),
            Some("Fix".to_string())
        );
    }

    #[test]
    fn test_parse_issues_edited() {
        let payload = json!({
            "action": "edited",
            "issue": {"number": 7, "title": "New"},
            "changes": {"title": {"from": "Old"}}
        });

        let WebhookEvent::Issues(event) = parse_webhook("issues", payload.to_string().as_bytes()).unwrap() else {
            panic!("expected issues");
        };
        assert_eq!(event.issue.and_then(|i| i.number), Some(7));
        assert_eq!(
            event.changes.and_then(|c| c.title).and_then(|t| t.from),
            Some("Old".to_string())
        );
    }

    #[test]
    fn test_parse_repository_ruleset() {
        let payload = json!({
            "action": "created",
            "repository_ruleset": {
                "id": 21,
                "name": "main",
                "enforcement": "active",
                "rules": [{"type": "deletion"}]
            }
        });

        let WebhookEvent::RepositoryRuleset(event) =
            parse_webhook("repository_ruleset", payload.to_string().as_bytes()).unwrap()
        else {
            panic!("expected repository_ruleset");
        };
        let rules = event.repository_ruleset.and_then(|r| r.rules).unwrap();
        assert_eq!(rules, vec![RepositoryRule::Deletion]);
    }

    #[test]
    fn test_validate_payload_json() {
        let body = br#"{"action":"deleted","hook_id":42}"#;
        let mut headers = HeaderMap::new();
        headers.insert(EVENT_TYPE_HEADER, HeaderValue::from_static("meta"));
        headers.insert(DELIVERY_ID_HEADER, HeaderValue::from_static("72d3162e"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        let signature = compute_signature(SECRET, body).unwrap();
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_str(&signature).unwrap());

        let WebhookEvent::Meta(meta) = validate_payload(&headers, body, SECRET).unwrap() else {
            panic!("expected meta");
        };
        assert_eq!(meta.hook_id, Some(42));
        assert_eq!(delivery_id(&headers), Some("72d3162e"));
        assert_eq!(webhook_type(&headers), Some("meta"));
    }

    #[test]
    fn test_validate_payload_form() {
        let body = b"payload=%7B%22zen%22%3A%22Keep+it+logically+awesome.%22%7D";
        let mut headers = HeaderMap::new();
        headers.insert(EVENT_TYPE_HEADER, HeaderValue::from_static("ping"));
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        let WebhookEvent::Ping(ping) = validate_payload(&headers, body, b"").unwrap() else {
            panic!("expected ping");
        };
        assert_eq!(ping.zen.as_deref(), Some("Keep it logically awesome."));
    }

    #[test]
    fn test_validate_payload_missing_signature() {
        let mut headers = HeaderMap::new();
        headers.insert(EVENT_TYPE_HEADER, HeaderValue::from_static("ping"));

        let err = validate_payload(&headers, b"{}", SECRET).unwrap_err();
        assert_eq!(err.kind(), &GitHubErrorKind::InvalidSignature);
    }
}
