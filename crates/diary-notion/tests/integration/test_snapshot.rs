//! End-to-end snapshot retrieval against a mocked data source
//!
//! Resolves a session, runs `RetrieveSnapshotUseCase` over it, and checks
//! pagination, ordering, stale detection and failure handling.

use std::sync::Arc;

use chrono::Utc;
use diary_core::config::ConfigBuilder;
use diary_core::domain::{find_stale, DatabaseId, DiaryPage, DomainError};
use diary_core::usecases::RetrieveSnapshotUseCase;
use diary_notion::session::NotionSession;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{self, page_json, query_path, DATABASE_ID, DATA_SOURCE_ID};

const PAST: &str = "2025-01-05T10:00:00.000Z";

async fn resolved_session(server: &wiremock::MockServer, client: diary_notion::client::NotionClient) -> NotionSession {
    common::mount_database(server, &[DATA_SOURCE_ID]).await;
    NotionSession::resolve_with_client(client, DatabaseId::new(DATABASE_ID.to_string()).unwrap())
        .await
        .expect("resolve failed")
}

#[tokio::test]
async fn test_two_pages_are_concatenated_in_order() {
    let (server, client) = common::setup_notion_mock().await;
    common::mount_query_pages(
        &server,
        vec![
            vec![page_json("p1", PAST), page_json("p2", PAST), page_json("p3", PAST)],
            vec![page_json("p4", PAST), page_json("p5", PAST)],
        ],
    )
    .await;
    let session = resolved_session(&server, client).await;

    let before = Utc::now();
    let snapshot = RetrieveSnapshotUseCase::new(Arc::new(session))
        .execute()
        .await
        .expect("retrieval failed");

    let ids: Vec<&str> = snapshot.entries().iter().map(|e| e.id().as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3", "p4", "p5"]);
    assert!(snapshot.fetch_time() >= before);
    assert!(find_stale(&snapshot).is_empty());
}

#[tokio::test]
async fn test_entries_convert_to_diary_pages() {
    let (server, client) = common::setup_notion_mock().await;
    common::mount_query_pages(&server, vec![vec![page_json("p1", PAST)]]).await;
    let session = resolved_session(&server, client).await;

    let snapshot = RetrieveSnapshotUseCase::new(Arc::new(session))
        .execute()
        .await
        .expect("retrieval failed");

    let page = DiaryPage::from_entry(&snapshot.entries()[0], "Date", "Word Count").unwrap();
    assert_eq!(page.id.as_str(), "p1");
    assert_eq!(page.date, "2025-01-01");
    assert_eq!(page.word_count, 100);
}

#[tokio::test]
async fn test_single_empty_page_yields_empty_snapshot() {
    let (server, client) = common::setup_notion_mock().await;
    common::mount_query_pages(&server, vec![vec![]]).await;
    let session = resolved_session(&server, client).await;

    let snapshot = RetrieveSnapshotUseCase::new(Arc::new(session))
        .execute()
        .await
        .expect("retrieval failed");

    assert!(snapshot.is_empty());
    assert!(snapshot.find_stale().is_empty());
}

#[tokio::test]
async fn test_entry_edited_after_fetch_is_stale() {
    let (server, client) = common::setup_notion_mock().await;
    common::mount_query_pages(
        &server,
        vec![vec![
            page_json("old", PAST),
            page_json("future", "2999-01-01T00:00:00.000Z"),
        ]],
    )
    .await;
    let session = resolved_session(&server, client).await;

    let snapshot = RetrieveSnapshotUseCase::new(Arc::new(session))
        .execute()
        .await
        .expect("retrieval failed");

    let stale: Vec<&str> = find_stale(&snapshot)
        .iter()
        .map(|e| e.id().as_str())
        .collect();
    assert_eq!(stale, vec!["future"]);
}

#[tokio::test]
async fn test_nested_data_source_results_are_skipped() {
    let (server, client) = common::setup_notion_mock().await;
    let nested = serde_json::json!({
        "object": "data_source",
        "id": "ds-archive",
        "title": [{"plain_text": "Archive"}],
        "parent": {"type": "database_id", "database_id": DATABASE_ID},
        "properties": {
            "Name": {"id": "title", "name": "Name", "type": "title", "title": {}},
            "Word Count": {"id": "w", "name": "Word Count", "type": "number", "number": {"format": "number"}}
        }
    });
    common::mount_query_pages(
        &server,
        vec![vec![page_json("p1", PAST), nested], vec![page_json("p2", PAST)]],
    )
    .await;
    let session = resolved_session(&server, client).await;

    let snapshot = RetrieveSnapshotUseCase::new(Arc::new(session))
        .execute()
        .await
        .expect("retrieval failed");

    let ids: Vec<&str> = snapshot.entries().iter().map(|e| e.id().as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
}

#[tokio::test]
async fn test_failure_on_second_page_aborts_retrieval() {
    let (server, client) = common::setup_notion_mock().await;

    Mock::given(method("POST"))
        .and(path(query_path()))
        .and(body_json(serde_json::json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [page_json("p1", PAST)],
            "next_cursor": "cursor-2",
            "has_more": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    // 1 attempt + 2 retries, then the loop stops
    Mock::given(method("POST"))
        .and(path(query_path()))
        .and(body_partial_json(serde_json::json!({"start_cursor": "cursor-2"})))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let session = resolved_session(&server, client).await;
    let result = RetrieveSnapshotUseCase::new(Arc::new(session)).execute().await;

    let err = result.expect_err("retrieval should fail");
    assert!(format!("{err:#}").contains("page 2"));
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let (server, client) = common::setup_notion_mock().await;

    Mock::given(method("POST"))
        .and(path(query_path()))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    common::mount_query_pages(&server, vec![vec![page_json("p1", PAST)]]).await;

    let session = resolved_session(&server, client).await;
    let snapshot = RetrieveSnapshotUseCase::new(Arc::new(session))
        .execute()
        .await
        .expect("retrieval failed");

    assert_eq!(snapshot.len(), 1);
}

#[tokio::test]
async fn test_page_cap_stops_retrieval() {
    let (server, client) = common::setup_notion_mock().await;

    Mock::given(method("POST"))
        .and(path(query_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [page_json("loop", PAST)],
            "next_cursor": "again",
            "has_more": true
        })))
        .expect(2)
        .mount(&server)
        .await;

    let session = resolved_session(&server, client).await;
    let err = RetrieveSnapshotUseCase::new(Arc::new(session))
        .with_max_pages(Some(2))
        .execute()
        .await
        .expect_err("cap should stop retrieval");

    assert!(matches!(
        err.downcast_ref::<DomainError>(),
        Some(DomainError::PageLimitExceeded { limit: 2 })
    ));
}

#[tokio::test]
async fn test_configured_sort_is_sent_with_every_page() {
    let server = wiremock::MockServer::start().await;
    common::mount_database(&server, &[DATA_SOURCE_ID]).await;

    Mock::given(method("POST"))
        .and(path(query_path()))
        .and(body_json(serde_json::json!({
            "page_size": 2,
            "sorts": [{"property": "Date", "direction": "descending"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [page_json("p1", PAST), page_json("p2", PAST)],
            "next_cursor": "cursor-2",
            "has_more": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(query_path()))
        .and(body_json(serde_json::json!({
            "start_cursor": "cursor-2",
            "page_size": 2,
            "sorts": [{"property": "Date", "direction": "descending"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [page_json("p3", PAST)],
            "next_cursor": null,
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ConfigBuilder::new()
        .notion_token("test-token")
        .notion_database(DATABASE_ID)
        .notion_base_url(server.uri())
        .notion_retry_count(0)
        .query_page_size(2)
        .query_sort_by_date(true)
        .build();

    let session = NotionSession::resolve(&config).await.expect("resolve failed");
    let snapshot = RetrieveSnapshotUseCase::new(Arc::new(session))
        .execute()
        .await
        .expect("retrieval failed");

    assert_eq!(snapshot.len(), 3);
}
