//! Integration tests for mapping non-2xx responses onto errors.

mod common;

use common::client;
use integrations_github_rest::GitHubErrorKind;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_not_found_without_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-github-request-id", "CAFE:1234")
                .set_body_string("<html>nope</html>"),
        )
        .mount(&server)
        .await;

    let err = client(&server).repositories().get("o", "missing").await.unwrap_err();

    assert_eq!(err.kind(), &GitHubErrorKind::NotFound);
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.message(), "HTTP 404 error");
    assert_eq!(err.request_id(), Some("CAFE:1234"));
}

#[tokio::test]
async fn test_validation_failed_details() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/o/r/labels"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "errors": [{"resource": "Label", "code": "already_exists", "field": "name"}],
            "documentation_url": "https://docs.github.com/rest/issues/labels#create-a-label"
        })))
        .mount(&server)
        .await;

    let label = integrations_github_rest::Label {
        name: Some("bug".to_string()),
        ..Default::default()
    };
    let err = client(&server)
        .issues()
        .create_label("o", "r", &label)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &GitHubErrorKind::UnprocessableEntity);
    assert!(err.is_api_error());
    assert!(!err.is_validation_error());
    assert_eq!(err.errors().len(), 1);
    assert_eq!(err.errors()[0].code.as_deref(), Some("already_exists"));
    assert_eq!(
        err.documentation_url(),
        Some("https://docs.github.com/rest/issues/labels#create-a-label")
    );
    assert!(err.to_string().contains("Label.name: already_exists"));
}

#[tokio::test]
async fn test_primary_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-limit", "60")
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-used", "60")
                .insert_header("x-ratelimit-reset", "1700000000")
                .insert_header("x-ratelimit-resource", "core")
                .set_body_json(json!({"message": "API rate limit exceeded for 127.0.0.1."})),
        )
        .mount(&server)
        .await;

    let err = client(&server).users().get_authenticated().await.unwrap_err();

    assert_eq!(err.kind(), &GitHubErrorKind::PrimaryRateLimitExceeded);
    let info = err.rate_limit().unwrap();
    assert_eq!(info.limit, 60);
    assert_eq!(info.remaining, 0);
    assert_eq!(info.used, Some(60));
    assert_eq!(info.reset_at.timestamp(), 1_700_000_000);
    assert_eq!(info.resource.as_deref(), Some("core"));
}

#[test_case(403, "You have exceeded a secondary rate limit.", GitHubErrorKind::SecondaryRateLimitExceeded ; "secondary")]
#[test_case(403, "You have triggered an abuse detection mechanism.", GitHubErrorKind::AbuseDetected ; "abuse")]
#[test_case(403, "Resource not accessible by integration", GitHubErrorKind::Forbidden ; "forbidden")]
#[test_case(401, "Bad credentials", GitHubErrorKind::BadCredentials ; "unauthorized")]
#[test_case(409, "Git Repository is empty.", GitHubErrorKind::Conflict ; "conflict")]
#[test_case(410, "Issues are disabled for this repo", GitHubErrorKind::Gone ; "gone")]
#[test_case(502, "Server Error", GitHubErrorKind::BadGateway ; "bad gateway")]
#[test_case(504, "Gateway Timeout", GitHubErrorKind::InternalError ; "gateway timeout")]
#[tokio::test]
async fn test_status_mapping(status: u16, message: &str, expected: GitHubErrorKind) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues/1"))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("retry-after", "30")
                .set_body_json(json!({"message": message})),
        )
        .mount(&server)
        .await;

    let err = client(&server).issues().get("o", "r", 1).await.unwrap_err();

    assert_eq!(err.kind(), &expected);
    assert_eq!(err.status_code(), Some(status));
    assert_eq!(err.message(), message);
}

#[tokio::test]
async fn test_string_error_entries_keep_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "You have exceeded a secondary rate limit",
            "errors": ["rate limited"],
            "documentation_url": "https://docs.github.com/rest/overview/rate-limits-for-the-rest-api"
        })))
        .mount(&server)
        .await;

    let err = client(&server).users().get_authenticated().await.unwrap_err();

    assert_eq!(err.kind(), &GitHubErrorKind::SecondaryRateLimitExceeded);
    assert_eq!(err.message(), "You have exceeded a secondary rate limit");
    assert_eq!(err.errors().len(), 1);
    assert_eq!(err.errors()[0].message.as_deref(), Some("rate limited"));
    assert_eq!(
        err.documentation_url(),
        Some("https://docs.github.com/rest/overview/rate-limits-for-the-rest-api")
    );
}

#[tokio::test]
async fn test_null_error_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/o/r/issues"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "Validation Failed", "errors": null})),
        )
        .mount(&server)
        .await;

    let request = integrations_github_rest::IssueRequest {
        title: Some("t".to_string()),
        ..Default::default()
    };
    let err = client(&server).issues().create("o", "r", &request).await.unwrap_err();

    assert_eq!(err.kind(), &GitHubErrorKind::UnprocessableEntity);
    assert_eq!(err.message(), "Validation Failed");
    assert!(err.errors().is_empty());
}

#[tokio::test]
async fn test_malformed_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"number": "one"})))
        .mount(&server)
        .await;

    let err = client(&server).issues().get("o", "r", 1).await.unwrap_err();

    assert_eq!(err.kind(), &GitHubErrorKind::DeserializationError);
    assert_eq!(err.status_code(), Some(200));
}
