//! Integration tests for the audit log.

mod common;

use common::{client, ExactQuery};
use integrations_github_rest::{AuditLogInclude, Direction, GetAuditLogOptions, ListCursorOptions};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_entries_keep_unknown_fields() {
    let server = MockServer::start().await;
    let entry = json!({
        "@timestamp": 1615077308538_i64,
        "_document_id": "beeZYapIUe-wKg5-beadb33",
        "action": "team.add_member",
        "actor": "octocat",
        "created_at": 1615077308538_i64,
        "org": "acme",
        "team": "acme/engineering",
        "user": "hubot",
        "config": {"content_type": "json", "insecure_ssl": "0"}
    });
    Mock::given(method("GET"))
        .and(path("/orgs/acme/audit-log"))
        .and(ExactQuery("after=abc&include=all&order=asc&per_page=2&phrase=action%3Ateam"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    format!("<{}/orgs/acme/audit-log?after=def&per_page=2>; rel=\"next\"", server.uri()).as_str(),
                )
                .set_body_json(json!([entry])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let opts = GetAuditLogOptions {
        phrase: Some("action:team".to_string()),
        include: Some(AuditLogInclude::All),
        order: Some(Direction::Asc),
        cursor: ListCursorOptions {
            after: Some("abc".to_string()),
            per_page: Some(2),
            ..Default::default()
        },
    };
    let page = client(&server).audit_log().get_for_org("acme", &opts).await.unwrap();

    assert_eq!(page.links.next_cursor().as_deref(), Some("def"));
    let entry = &page.items[0];
    assert_eq!(entry.action.as_deref(), Some("team.add_member"));
    assert_eq!(entry.document_id.as_deref(), Some("beeZYapIUe-wKg5-beadb33"));
    assert_eq!(entry.additional_fields.get("team"), Some(&json!("acme/engineering")));
    assert_eq!(
        entry.additional_fields.get("config"),
        Some(&json!({"content_type": "json", "insecure_ssl": "0"}))
    );

    let encoded = serde_json::to_value(entry).unwrap();
    assert_eq!(encoded["team"], json!("acme/engineering"));
    assert_eq!(encoded["@timestamp"], json!("2021-03-07T00:35:08.538Z"));
}
