//! notion-diary Notion - Notion API client
//!
//! Provides async client for:
//! - Authenticated, retried HTTP calls against the Notion API
//! - Resolving a database to its data source
//! - Paged data source queries
//!
//! ## Modules
//!
//! - [`client`] - Notion API HTTP client (auth headers, timeout, fixed retry)
//! - [`schema`] - Wire types mirroring the Notion JSON shapes
//! - [`query`] - Single-page data source queries and page parsing
//! - [`session`] - Session initializer and [`IDataSource`](diary_core::ports::IDataSource) adapter

pub mod client;
pub mod query;
pub mod schema;
pub mod session;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when communicating with the Notion API
#[derive(Debug, Error)]
pub enum NotionError {
    /// Missing or invalid token or database identifier
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The integration token is invalid
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The integration has no access to the resource
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested resource does not exist or is not shared with the integration
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// A server-side error occurred (5xx)
    #[error("Server error {status}: {path}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Request path
        path: String,
    },

    /// Any other non-success status
    #[error("Unexpected status {status}: {path}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Request path
        path: String,
    },

    /// A network-level error occurred (connect failure, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The database reports no data source to query
    #[error("Database {database_id} has no data sources")]
    NoDataSource {
        /// The database that was looked up
        database_id: String,
    },
}

impl NotionError {
    /// Classifies a non-success status code.
    ///
    /// Only the status is inspected; the error body is ignored.
    pub fn from_status(status: StatusCode, path: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => NotionError::Unauthorized(path.to_string()),
            StatusCode::FORBIDDEN => NotionError::Forbidden(path.to_string()),
            StatusCode::NOT_FOUND => NotionError::NotFound(path.to_string()),
            StatusCode::TOO_MANY_REQUESTS => NotionError::RateLimited(path.to_string()),
            s if s.is_server_error() => NotionError::ServerError {
                status: s.as_u16(),
                path: path.to_string(),
            },
            s => NotionError::UnexpectedStatus {
                status: s.as_u16(),
                path: path.to_string(),
            },
        }
    }

    /// Returns the HTTP status this error was built from, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            NotionError::Unauthorized(_) => Some(401),
            NotionError::Forbidden(_) => Some(403),
            NotionError::NotFound(_) => Some(404),
            NotionError::RateLimited(_) => Some(429),
            NotionError::ServerError { status, .. }
            | NotionError::UnexpectedStatus { status, .. } => Some(*status),
            NotionError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
