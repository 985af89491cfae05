//! Integration tests for the HTTP transport: retries, status mapping and
//! response decoding

use diary_notion::client::{NotionClient, RetryPolicy};
use diary_notion::NotionError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn test_server_error_then_success() {
    let (server, client) = common::setup_notion_mock().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let body: serde_json::Value = client.get_json("/ping").await.expect("request failed");
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_client_errors_are_retried_too() {
    let (server, client) = common::setup_notion_mock().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(401))
        .expect(3)
        .mount(&server)
        .await;

    let result: Result<serde_json::Value, _> = client.get_json("/ping").await;
    assert!(matches!(result, Err(NotionError::Unauthorized(_))));
}

#[tokio::test]
async fn test_rate_limit_exhausts_retries() {
    let (server, client) = common::setup_notion_mock().await;

    Mock::given(method("POST"))
        .and(path("/data_sources/ds/query"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let result: Result<serde_json::Value, _> = client
        .post_json("/data_sources/ds/query", &serde_json::json!({}))
        .await;
    let err = result.unwrap_err();
    assert!(matches!(err, NotionError::RateLimited(_)));
    assert_eq!(err.status(), Some(429));
}

#[tokio::test]
async fn test_no_retry_policy_makes_single_attempt() {
    let server = MockServer::start().await;
    let client = NotionClient::with_base_url("test-token", server.uri())
        .unwrap()
        .with_retry_policy(RetryPolicy::none());

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let result: Result<serde_json::Value, _> = client.get_json("/ping").await;
    assert!(matches!(
        result,
        Err(NotionError::ServerError { status: 502, .. })
    ));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let (server, client) = common::setup_notion_mock().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let result: Result<serde_json::Value, _> = client.get_json("/ping").await;
    assert!(matches!(result, Err(NotionError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let client = NotionClient::with_base_url("test-token", "http://127.0.0.1:9")
        .unwrap()
        .with_retry_policy(common::fast_retry());

    let result: Result<serde_json::Value, _> = client.get_json("/ping").await;
    assert!(matches!(result, Err(NotionError::Network(_))));
}
