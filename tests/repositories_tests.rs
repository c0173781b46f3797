//! Integration tests for the repositories service.

mod common;

use common::{client, ExactQuery};
use integrations_github_rest::{BranchListOptions, Direction, ListOptions, RepoSort, RepoType, Repository, RepositoryListOptions};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_by_org_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(ExactQuery("direction=asc&per_page=50&sort=full_name&type=forks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "full_name": "acme/widgets", "fork": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let opts = RepositoryListOptions {
        repo_type: Some(RepoType::Forks),
        sort: Some(RepoSort::FullName),
        direction: Some(Direction::Asc),
        list: ListOptions::new().per_page(50),
        ..Default::default()
    };
    let repos = client(&server).repositories().list_by_org("acme", &opts).await.unwrap();

    assert_eq!(repos.items[0].full_name.as_deref(), Some("acme/widgets"));
    assert_eq!(repos.items[0].fork, Some(true));
}

#[tokio::test]
async fn test_list_by_authenticated_user_affiliation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/repos"))
        .and(ExactQuery("affiliation=owner%2Ccollaborator&visibility=private"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let opts = RepositoryListOptions {
        visibility: Some("private".to_string()),
        affiliation: Some(vec!["owner".to_string(), "collaborator".to_string()]),
        ..Default::default()
    };
    let repos = client(&server)
        .repositories()
        .list_by_authenticated_user(&opts)
        .await
        .unwrap();

    assert!(repos.is_empty());
}

#[tokio::test]
async fn test_create_in_org_sends_only_set_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orgs/acme/repos"))
        .and(body_json(json!({"name": "widgets", "private": true, "auto_init": false})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7,
            "name": "widgets",
            "private": true,
            "owner": {"login": "acme", "type": "Organization"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let repo = Repository {
        name: Some("widgets".to_string()),
        private: Some(true),
        auto_init: Some(false),
        ..Default::default()
    };
    let created = client(&server)
        .repositories()
        .create(Some("acme"), &repo)
        .await
        .unwrap();

    assert_eq!(created.id, Some(7));
    assert_eq!(created.owner.and_then(|o| o.login).as_deref(), Some("acme"));
}

#[tokio::test]
async fn test_replace_all_topics_with_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/repos/o/r/topics"))
        .and(body_json(json!({"names": []})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"names": []})))
        .expect(1)
        .mount(&server)
        .await;

    let topics = client(&server)
        .repositories()
        .replace_all_topics("o", "r", &[])
        .await
        .unwrap();

    assert!(topics.is_empty());
}

#[tokio::test]
async fn test_list_languages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"C": 78769, "Python": 7769})))
        .mount(&server)
        .await;

    let languages = client(&server).repositories().list_languages("o", "r").await.unwrap();

    assert_eq!(languages.get("C"), Some(&78769));
    assert_eq!(languages.len(), 2);
}

#[tokio::test]
async fn test_branches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/branches"))
        .and(ExactQuery("protected=true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "main", "protected": true, "commit": {"sha": "c5b97d5"}}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/branches/release%2Fv1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "release/v1", "protected": false})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let opts = BranchListOptions {
        protected: Some(true),
        ..Default::default()
    };
    let branches = client.repositories().list_branches("o", "r", &opts).await.unwrap();
    assert_eq!(
        branches.items[0].commit.as_ref().and_then(|c| c.sha.as_deref()),
        Some("c5b97d5")
    );

    let branch = client.repositories().get_branch("o", "r", "release/v1").await.unwrap();
    assert_eq!(branch.name.as_deref(), Some("release/v1"));
}

#[tokio::test]
async fn test_delete_repository() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/repos/o/r"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).repositories().delete("o", "r").await.unwrap();
}
