//! Notion API wire types (JSON deserialization)
//!
//! Passive structures mirroring the JSON shapes of the endpoints this client
//! calls. Only the fields the client reads are modelled; unknown fields are
//! ignored by serde. Icon, cover and parent reuse the tagged unions from
//! [`diary_core::domain`], which already match the wire format.
//!
//! See: <https://developers.notion.com/reference/intro>

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use diary_core::domain::{FileObject, Icon, Parent};
use serde::{Deserialize, Serialize};

// ============================================================================
// GET /databases/{id}
// ============================================================================

/// Database object returned by `GET /databases/{id}`
#[derive(Debug, Deserialize)]
pub struct DatabaseObject {
    pub id: String,
    /// Data sources backing this database, in the order Notion reports them
    #[serde(default)]
    pub data_sources: Vec<DataSourceRef>,
    #[serde(default)]
    pub title: Vec<RichText>,
}

/// Reference to a data source inside a database object
#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

// ============================================================================
// POST /data_sources/{id}/query
// ============================================================================

/// Sort direction for a query sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort by a named property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySort {
    pub property: String,
    pub direction: SortDirection,
}

/// Body of a data source query
///
/// Every field is optional; the first request of a retrieval carries no
/// cursor and serializes to `{}` when no options are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryDataSourceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<PropertySort>,
}

/// Paginated list envelope returned by a data source query
///
/// Results stay as raw JSON until their `object` kind is known: a query can
/// return nested `data_source` objects whose properties are schemas, not
/// values, and those must not be decoded as [`PageObject`].
#[derive(Debug, Deserialize)]
pub struct QueryDataSourceResponse {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    /// Cursor of the next page; `null` on the last page
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

// ============================================================================
// Page object
// ============================================================================

/// A page object as returned in query results
#[derive(Debug, Deserialize)]
pub struct PageObject {
    /// Object kind; `"page"` for diary entries
    #[serde(default)]
    pub object: String,
    pub id: String,
    pub created_time: DateTime<Utc>,
    pub last_edited_time: DateTime<Utc>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub in_trash: bool,
    pub parent: Parent,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default)]
    pub cover: Option<FileObject>,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValueObject>,
}

/// A property value on a page
///
/// Notion stores the value under a key named after its `type`, so each
/// supported kind is an optional field and the parser dispatches on `kind`.
#[derive(Debug, Deserialize)]
pub struct PropertyValueObject {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: Option<Vec<RichText>>,
    #[serde(default)]
    pub rich_text: Option<Vec<RichText>>,
    #[serde(default)]
    pub number: Option<f64>,
    #[serde(default)]
    pub date: Option<DateValue>,
    #[serde(default)]
    pub checkbox: Option<bool>,
    #[serde(default)]
    pub select: Option<SelectOption>,
    #[serde(default)]
    pub multi_select: Option<Vec<SelectOption>>,
    #[serde(default)]
    pub status: Option<SelectOption>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_edited_time: Option<DateTime<Utc>>,
}

/// Value of a date property
#[derive(Debug, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
}

/// Option of a select, multi-select or status property
#[derive(Debug, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// One segment of rich text; only the plain text is kept
#[derive(Debug, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
}

/// Concatenates the plain text of rich text segments
pub fn plain_text(segments: &[RichText]) -> String {
    segments.iter().map(|s| s.plain_text.as_str()).collect()
}
