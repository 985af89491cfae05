//! Domain newtypes with validation
//!
//! This module provides strongly-typed wrappers for Notion identifiers and
//! pagination cursors. Each newtype ensures data validity at construction time.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Returns true if `id` is non-empty and made only of ASCII letters,
/// digits and dashes.
///
/// Notion renders IDs as dashed UUIDs or 32 bare hex characters; the
/// check accepts both without enforcing the UUID layout.
fn is_valid_notion_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

// ============================================================================
// Notion object identifiers
// ============================================================================

/// Identifier of a Notion database (the logical container)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DatabaseId(String);

impl DatabaseId {
    /// Create a new DatabaseId
    ///
    /// # Errors
    /// Returns error if the ID is empty or contains invalid characters
    pub fn new(id: String) -> Result<Self, DomainError> {
        let id = id.trim().to_string();
        if !is_valid_notion_id(&id) {
            return Err(DomainError::InvalidDatabaseId(id));
        }
        Ok(Self(id))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DatabaseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DatabaseId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for DatabaseId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<DatabaseId> for String {
    fn from(id: DatabaseId) -> Self {
        id.0
    }
}

/// Identifier of a data source, the queryable collection behind a database
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataSourceId(String);

impl DataSourceId {
    /// Create a new DataSourceId
    ///
    /// # Errors
    /// Returns error if the ID is empty or contains invalid characters
    pub fn new(id: String) -> Result<Self, DomainError> {
        if !is_valid_notion_id(&id) {
            return Err(DomainError::InvalidDataSourceId(id));
        }
        Ok(Self(id))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DataSourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DataSourceId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for DataSourceId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<DataSourceId> for String {
    fn from(id: DataSourceId) -> Self {
        id.0
    }
}

/// Identifier of a page (one diary entry)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PageId(String);

impl PageId {
    /// Create a new PageId
    ///
    /// # Errors
    /// Returns error if the ID is empty or contains invalid characters
    pub fn new(id: String) -> Result<Self, DomainError> {
        if !is_valid_notion_id(&id) {
            return Err(DomainError::InvalidPageId(id));
        }
        Ok(Self(id))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for PageId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PageId> for String {
    fn from(id: PageId) -> Self {
        id.0
    }
}

// ============================================================================
// Pagination cursor
// ============================================================================

/// Opaque continuation token returned by a paged query
///
/// The cursor is never inspected, only passed back on the next request.
/// An empty cursor cannot be constructed; "no cursor" is `Option::None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cursor(String);

impl Cursor {
    /// Create a new Cursor
    ///
    /// # Errors
    /// Returns error if the cursor is empty
    pub fn new(cursor: String) -> Result<Self, DomainError> {
        if cursor.is_empty() {
            return Err(DomainError::InvalidCursor(
                "Cursor cannot be empty".to_string(),
            ));
        }
        Ok(Self(cursor))
    }

    /// Interpret a `next_cursor` field from a list response.
    ///
    /// Both `null` and `""` mark the final page and map to `None`.
    #[must_use]
    pub fn from_next(next: Option<String>) -> Option<Self> {
        next.and_then(|c| Self::new(c).ok())
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Cursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Cursor {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Cursor> for String {
    fn from(cursor: Cursor) -> Self {
        cursor.0
    }
}
