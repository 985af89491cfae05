//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! including identifier validation, diary field extraction, and
//! retrieval limits.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid database identifier
    #[error("Invalid database ID: {0}")]
    InvalidDatabaseId(String),

    /// Invalid data source identifier
    #[error("Invalid data source ID: {0}")]
    InvalidDataSourceId(String),

    /// Invalid page identifier
    #[error("Invalid page ID: {0}")]
    InvalidPageId(String),

    /// Invalid pagination cursor
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    /// A configured diary field is absent from the entry's properties
    #[error("Entry {entry} has no property named {field:?}")]
    MissingField {
        /// The entry that was inspected
        entry: String,
        /// The configured property name
        field: String,
    },

    /// A configured diary field has an unexpected property type
    #[error("Property {field:?} on entry {entry} is {actual}, expected {expected}")]
    FieldTypeMismatch {
        /// The entry that was inspected
        entry: String,
        /// The configured property name
        field: String,
        /// The property type the field must have
        expected: String,
        /// The property type actually found
        actual: String,
    },

    /// The remote kept returning continuation cursors past the configured cap
    #[error("Pagination did not finish within {limit} pages")]
    PageLimitExceeded {
        /// The configured maximum page count
        limit: u32,
    },
}
