mod common;

use std::sync::Arc;

use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};

use common::{FailingLinkRepository, InMemoryLinkRepository};

#[tokio::test]
async fn test_list_urls_empty() {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let server = TestServer::new(common::test_router(common::create_test_state(repo))).unwrap();

    let response = server.get("/urls").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>(), serde_json::json!([]));
}

#[tokio::test]
async fn test_list_urls_newest_first() {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let now = Utc::now();
    repo.insert("middle", "https://example.com/2", now - Duration::hours(2), 0);
    repo.insert("newest", "https://example.com/3", now - Duration::minutes(5), 2);
    repo.insert("oldest", "https://example.com/1", now - Duration::hours(20), 9);

    let server = TestServer::new(common::test_router(common::create_test_state(repo))).unwrap();

    let response = server.get("/urls").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let items = json.as_array().unwrap();

    let codes: Vec<&str> = items
        .iter()
        .map(|i| i["shortCode"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["newest", "middle", "oldest"]);

    let created: Vec<DateTime<Utc>> = items
        .iter()
        .map(|i| i["createdAt"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(created.windows(2).all(|w| w[0] >= w[1]));

    assert_eq!(items[0]["originalUrl"], "https://example.com/3");
    assert_eq!(items[0]["clicks"], 2);
}

#[tokio::test]
async fn test_list_urls_storage_failure() {
    let server = TestServer::new(common::test_router(common::create_test_state(Arc::new(
        FailingLinkRepository,
    ))))
    .unwrap();

    let response = server.get("/urls").await;

    assert_eq!(response.status_code(), 500);
}
