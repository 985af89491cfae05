//! Integration tests for resolving a database to its data source

use diary_core::config::ConfigBuilder;
use diary_core::domain::DatabaseId;
use diary_core::ports::IDataSource;
use diary_notion::session::NotionSession;
use diary_notion::NotionError;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{self, DATABASE_ID, DATA_SOURCE_ID};

fn database_id() -> DatabaseId {
    DatabaseId::new(DATABASE_ID.to_string()).unwrap()
}

#[tokio::test]
async fn test_resolve_picks_first_data_source() {
    let (server, client) = common::setup_notion_mock().await;
    common::mount_database(&server, &[DATA_SOURCE_ID, "ds-0002"]).await;

    let session = NotionSession::resolve_with_client(client, database_id())
        .await
        .expect("resolve failed");

    assert_eq!(session.data_source_id().as_str(), DATA_SOURCE_ID);
    assert_eq!(session.database_id().as_str(), DATABASE_ID);
}

#[tokio::test]
async fn test_resolve_sends_auth_and_version_headers() {
    let (server, client) = common::setup_notion_mock().await;

    Mock::given(method("GET"))
        .and(path(format!("/databases/{DATABASE_ID}")))
        .and(header("authorization", "Bearer test-token"))
        .and(header("Notion-Version", "2025-09-03"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": DATABASE_ID,
            "data_sources": [{"id": DATA_SOURCE_ID, "name": "Diary"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = NotionSession::resolve_with_client(client, database_id())
        .await
        .expect("resolve failed");
    assert_eq!(session.data_source_id().as_str(), DATA_SOURCE_ID);
}

#[tokio::test]
async fn test_resolve_without_data_sources_fails() {
    let (server, client) = common::setup_notion_mock().await;
    common::mount_database(&server, &[]).await;

    let result = NotionSession::resolve_with_client(client, database_id()).await;

    match result {
        Err(NotionError::NoDataSource { database_id }) => assert_eq!(database_id, DATABASE_ID),
        other => panic!("expected NoDataSource, got {other:?}"),
    }
}

#[tokio::test]
async fn test_resolve_unknown_database_retries_then_fails() {
    let (server, client) = common::setup_notion_mock().await;

    // 1 attempt + 2 retries
    Mock::given(method("GET"))
        .and(path(format!("/databases/{DATABASE_ID}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find database"
        })))
        .expect(3)
        .mount(&server)
        .await;

    let result = NotionSession::resolve_with_client(client, database_id()).await;
    assert!(matches!(result, Err(NotionError::NotFound(_))));
}

#[tokio::test]
async fn test_resolve_from_config() {
    let server = MockServer::start().await;
    common::mount_database(&server, &[DATA_SOURCE_ID]).await;

    let config = ConfigBuilder::new()
        .notion_token("test-token")
        .notion_database(DATABASE_ID)
        .notion_base_url(server.uri())
        .notion_retry_interval_ms(0)
        .build();

    let session = NotionSession::resolve(&config).await.expect("resolve failed");
    assert_eq!(session.data_source_id().as_str(), DATA_SOURCE_ID);
}

#[tokio::test]
async fn test_resolve_rejects_missing_database_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = ConfigBuilder::new()
        .notion_token("test-token")
        .notion_base_url(server.uri())
        .build();

    let result = NotionSession::resolve(&config).await;
    assert!(matches!(result, Err(NotionError::InvalidConfig(_))));
}
