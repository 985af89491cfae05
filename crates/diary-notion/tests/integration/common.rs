//! Shared test helpers for Notion API integration tests
//!
//! Provides wiremock-based mock server setup for the Notion endpoints.
//! Each helper mounts the necessary mock endpoints; clients are built with a
//! short retry interval so retry tests stay fast.

use std::time::Duration;

use diary_notion::client::{NotionClient, RetryPolicy};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Database ID used by the helpers
pub const DATABASE_ID: &str = "0123456789abcdef0123456789abcdef";

/// Data source ID returned by [`mount_database`] by default
pub const DATA_SOURCE_ID: &str = "ds-0001";

/// Retry policy used by test clients: 2 retries, 10ms apart
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        retry_count: 2,
        interval: Duration::from_millis(10),
    }
}

/// Starts a mock server and returns it with a client pointing at it
pub async fn setup_notion_mock() -> (MockServer, NotionClient) {
    let server = MockServer::start().await;
    let client = NotionClient::with_base_url("test-token", server.uri())
        .expect("build client")
        .with_retry_policy(fast_retry());
    (server, client)
}

/// Mounts `GET /databases/{DATABASE_ID}` listing the given data sources
pub async fn mount_database(server: &MockServer, data_source_ids: &[&str]) {
    let sources: Vec<serde_json::Value> = data_source_ids
        .iter()
        .map(|id| serde_json::json!({"id": id, "name": format!("source {id}")}))
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/databases/{DATABASE_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "object": "database",
            "id": DATABASE_ID,
            "title": [{"plain_text": "Diary"}],
            "data_sources": sources
        })))
        .mount(server)
        .await;
}

/// A diary page object edited at `last_edited`
pub fn page_json(id: &str, last_edited: &str) -> serde_json::Value {
    serde_json::json!({
        "object": "page",
        "id": id,
        "created_time": "2025-01-01T00:00:00.000Z",
        "last_edited_time": last_edited,
        "archived": false,
        "in_trash": false,
        "parent": {"type": "data_source_id", "data_source_id": DATA_SOURCE_ID},
        "url": format!("https://www.notion.so/{id}"),
        "icon": null,
        "cover": null,
        "properties": {
            "Name": {"id": "title", "type": "title", "title": [{"plain_text": format!("Entry {id}")}]},
            "Date": {"id": "d", "type": "date", "date": {"start": "2025-01-01", "end": null}},
            "Word Count": {"id": "w", "type": "number", "number": 100}
        }
    })
}

/// Path of the query endpoint for the default data source
pub fn query_path() -> String {
    format!("/data_sources/{DATA_SOURCE_ID}/query")
}

/// Mounts a chain of query pages.
///
/// Page 1 answers the cursor-less request body `{}`; page `k` answers
/// `{"start_cursor": "cursor-k"}`. Every page but the last links to the
/// next one. Each mock expects to be hit exactly once.
pub async fn mount_query_pages(server: &MockServer, pages: Vec<Vec<serde_json::Value>>) {
    let count = pages.len();
    for (index, results) in pages.into_iter().enumerate() {
        let number = index + 1;
        let request_body = if number == 1 {
            serde_json::json!({})
        } else {
            serde_json::json!({"start_cursor": format!("cursor-{number}")})
        };
        let next_cursor = if number < count {
            serde_json::json!(format!("cursor-{}", number + 1))
        } else {
            serde_json::Value::Null
        };

        Mock::given(method("POST"))
            .and(path(query_path()))
            .and(body_json(request_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "object": "list",
                "results": results,
                "next_cursor": next_cursor,
                "has_more": number < count
            })))
            .expect(1)
            .mount(server)
            .await;
    }
}
