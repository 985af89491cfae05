//! Notion API client
//!
//! Provides a typed HTTP client for the Notion API. Every request carries the
//! bearer token and the `Notion-Version` header, is bounded by a per-request
//! timeout, and is retried a fixed number of times at a fixed interval.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use diary_notion::client::NotionClient;
//!
//! # async fn example() -> Result<(), diary_notion::NotionError> {
//! let client = NotionClient::new("secret_token")?;
//! let database: serde_json::Value = client.get_json("/databases/abc123").await?;
//! println!("{database}");
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use diary_core::config::{NotionConfig, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::NotionError;

/// Name of the API version header
const VERSION_HEADER: &str = "Notion-Version";

/// Default per-request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

// ============================================================================
// RetryPolicy
// ============================================================================

/// Fixed-interval retry policy applied to every call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub retry_count: u32,
    /// Delay between attempts
    pub interval: Duration,
}

impl RetryPolicy {
    /// Total number of attempts, including the first
    pub fn max_attempts(&self) -> u32 {
        self.retry_count.saturating_add(1)
    }

    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            retry_count: 0,
            interval: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_count: 3,
            interval: Duration::from_secs(1),
        }
    }
}

// ============================================================================
// NotionClient
// ============================================================================

/// HTTP client for Notion API calls
///
/// Wraps `reqwest::Client` with authentication headers, base URL
/// construction and the retry policy.
#[derive(Debug, Clone)]
pub struct NotionClient {
    /// The underlying HTTP client (carries the timeout)
    client: Client,
    /// Base URL for API requests, without a trailing slash
    base_url: String,
    /// Integration token
    token: String,
    /// Value of the `Notion-Version` header
    api_version: String,
    /// Retry policy for every request
    retry: RetryPolicy,
}

impl NotionClient {
    /// Creates a client for the public Notion API with default settings
    ///
    /// # Arguments
    /// * `token` - A Notion integration token
    pub fn new(token: impl Into<String>) -> Result<Self, NotionError> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (useful for testing)
    ///
    /// # Arguments
    /// * `token` - A Notion integration token
    /// * `base_url` - Custom base URL for API requests
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, NotionError> {
        Self::build(
            token.into(),
            base_url.into(),
            DEFAULT_API_VERSION.to_string(),
            DEFAULT_TIMEOUT,
            RetryPolicy::default(),
        )
    }

    /// Creates a client from the `notion` configuration section
    pub fn from_config(config: &NotionConfig) -> Result<Self, NotionError> {
        if config.token.trim().is_empty() {
            return Err(NotionError::InvalidConfig(
                "notion.token is empty".to_string(),
            ));
        }
        Self::build(
            config.token.clone(),
            config.base_url.clone(),
            config.api_version.clone(),
            Duration::from_secs(config.timeout_secs),
            RetryPolicy {
                retry_count: config.retry_count,
                interval: Duration::from_millis(config.retry_interval_ms),
            },
        )
    }

    fn build(
        token: String,
        base_url: String,
        api_version: String,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, NotionError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            api_version,
            retry,
        })
    }

    /// Replaces the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Returns the retry policy
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Returns the base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the `Notion-Version` header value
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Creates an authenticated request builder for the given method and path
    ///
    /// Prepends the base URL and adds the Authorization and
    /// `Notion-Version` headers.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - API path relative to base URL (e.g., "/databases/{id}")
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .bearer_auth(&self.token)
            .header(VERSION_HEADER, &self.api_version)
    }

    /// Sends a request, retrying on any failure.
    ///
    /// A transport error or non-success status fails the attempt. After
    /// [`RetryPolicy::max_attempts`] failed attempts the last error is
    /// returned. `build` is called once per attempt because a request with
    /// a body cannot be resent.
    ///
    /// # Arguments
    /// * `path` - API path, used for logging and error messages
    /// * `build` - Produces the request for each attempt
    pub async fn execute_with_retry<F>(&self, path: &str, build: F) -> Result<Response, NotionError>
    where
        F: Fn() -> RequestBuilder,
    {
        let max_attempts = self.retry.max_attempts();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let error = match build().send().await {
                Ok(response) if response.status().is_success() => {
                    if attempt > 1 {
                        info!(path, attempt, "Request succeeded after retry");
                    }
                    return Ok(response);
                }
                Ok(response) => NotionError::from_status(response.status(), path),
                Err(e) => NotionError::Network(e),
            };

            if attempt >= max_attempts {
                warn!(path, attempts = attempt, error = %error, "Retry limit exhausted");
                return Err(error);
            }

            debug!(
                path,
                attempt,
                retry_in_ms = self.retry.interval.as_millis() as u64,
                error = %error,
                "Request failed, retrying"
            );
            tokio::time::sleep(self.retry.interval).await;
        }
    }

    /// `GET path`, decoding the JSON body as `T`
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, NotionError> {
        let response = self
            .execute_with_retry(path, || self.request(Method::GET, path))
            .await?;
        decode(response, path).await
    }

    /// `POST path` with a JSON body, decoding the JSON response as `T`
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, NotionError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .execute_with_retry(path, || self.request(Method::POST, path).json(body))
            .await?;
        decode(response, path).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, NotionError> {
    response
        .json::<T>()
        .await
        .map_err(|e| NotionError::InvalidResponse(format!("{path}: {e}")))
}
