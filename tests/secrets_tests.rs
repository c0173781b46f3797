//! Integration tests for the secrets services.

mod common;

use common::{client, EmptyBody};
use integrations_github_rest::{EncryptedSecret, GitHubErrorKind, ListOptions};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_public_key_with_numeric_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/codespaces/secrets/public-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key_id": 1234,
            "key": "2Sg8iYjAxxmI2LvUXpJjkYrMxURPc8r+dB7TJyvv1234"
        })))
        .mount(&server)
        .await;

    let key = client(&server)
        .codespaces_secrets()
        .get_repo_public_key("o", "r")
        .await
        .unwrap();

    assert_eq!(key.key_id.as_deref(), Some("1234"));
}

#[tokio::test]
async fn test_create_or_update_repo_secret() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/repos/o/r/dependabot/secrets/NPM_TOKEN"))
        .and(body_json(json!({"key_id": "568250167242549743", "encrypted_value": "c2VjcmV0"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let secret = EncryptedSecret {
        name: "NPM_TOKEN".to_string(),
        key_id: "568250167242549743".to_string(),
        encrypted_value: "c2VjcmV0".to_string(),
        ..Default::default()
    };
    client(&server)
        .dependabot_secrets()
        .create_or_update_repo_secret("o", "r", &secret)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_org_secrets_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/actions/secrets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 2,
            "secrets": [
                {"name": "GH_TOKEN", "visibility": "all"},
                {"name": "GIST_ID", "visibility": "selected",
                 "selected_repositories_url": "https://api.github.com/orgs/acme/actions/secrets/GIST_ID/repositories"}
            ]
        })))
        .mount(&server)
        .await;

    let secrets = client(&server)
        .actions_secrets()
        .list_org_secrets("acme", &ListOptions::default())
        .await
        .unwrap();

    assert_eq!(secrets.total_count, Some(2));
    assert_eq!(secrets.secrets[1].name.as_deref(), Some("GIST_ID"));
}

#[tokio::test]
async fn test_add_selected_repo_has_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/orgs/acme/actions/secrets/GIST_ID/repositories/1296269"))
        .and(EmptyBody)
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .actions_secrets()
        .add_selected_repo_to_org_secret("acme", "GIST_ID", 1296269)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_environment_secrets_are_actions_only() {
    let server = MockServer::start().await;

    let err = client(&server)
        .dependabot_secrets()
        .list_env_secrets(1, "production", &ListOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &GitHubErrorKind::InvalidParameter);
    assert!(err.status_code().is_none());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
