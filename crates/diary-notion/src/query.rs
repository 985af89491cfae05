//! Data source queries
//!
//! Fetches one page of a data source query and converts the wire objects
//! into domain [`Entry`] values. The retrieval loop that follows cursors
//! lives in `diary_core::usecases::RetrieveSnapshotUseCase`.

use diary_core::config::Config;
use diary_core::domain::{Cursor, DataSourceId, DateRange, Entry, PageId, PropertyValue};
use diary_core::ports::Page;
use tracing::{debug, trace, warn};

use crate::client::NotionClient;
use crate::schema::{
    plain_text, PageObject, PropertySort, PropertyValueObject, QueryDataSourceRequest,
    QueryDataSourceResponse, SortDirection,
};
use crate::NotionError;

/// Optional settings applied to every query request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Entries per page; Notion's default when `None`
    pub page_size: Option<u32>,
    /// Property to sort by, newest first
    pub sort_descending_by: Option<String>,
}

impl QueryOptions {
    /// Builds options from the `query` and `fields` sections
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_size: config.query.page_size,
            sort_descending_by: config
                .query
                .sort_by_date
                .then(|| config.fields.date.clone()),
        }
    }

    /// The request body for the page after `cursor`
    pub fn request(&self, cursor: Option<&Cursor>) -> QueryDataSourceRequest {
        QueryDataSourceRequest {
            start_cursor: cursor.map(|c| c.as_str().to_string()),
            page_size: self.page_size,
            sorts: self
                .sort_descending_by
                .iter()
                .map(|property| PropertySort {
                    property: property.clone(),
                    direction: SortDirection::Descending,
                })
                .collect(),
        }
    }
}

// ============================================================================
// QueryParser - converts wire objects to domain entries
// ============================================================================

/// Parser for converting Notion query results into domain entries
pub struct QueryParser;

impl QueryParser {
    /// Parses a full query response into a port-level [`Page`]
    ///
    /// Results that are not pages are skipped. A `next_cursor` that is
    /// `null` or empty marks the last page.
    pub fn parse_response(response: QueryDataSourceResponse) -> Result<Page, NotionError> {
        let mut entries = Vec::with_capacity(response.results.len());
        for result in response.results {
            if let Some(entry) = Self::parse_result(result)? {
                entries.push(entry);
            }
        }

        let next_cursor = Cursor::from_next(response.next_cursor);
        if response.has_more && next_cursor.is_none() {
            warn!("Query reported more results without a cursor; treating page as last");
        }

        Ok(Page {
            entries,
            next_cursor,
        })
    }

    /// Parses one raw result; `None` for objects that are not pages
    ///
    /// The `object` kind is checked before decoding, so other kinds are
    /// skipped whatever their shape.
    pub fn parse_result(result: serde_json::Value) -> Result<Option<Entry>, NotionError> {
        match result.get("object").and_then(serde_json::Value::as_str) {
            None | Some("page") => {}
            Some(kind) => {
                let id = result.get("id").and_then(serde_json::Value::as_str).unwrap_or("");
                debug!(id, object = kind, "Skipping non-page query result");
                return Ok(None);
            }
        }

        let object: PageObject = serde_json::from_value(result)
            .map_err(|e| NotionError::InvalidResponse(format!("page object: {e}")))?;
        Self::parse_page(object).map(Some)
    }

    /// Converts a decoded page object into a domain entry
    pub fn parse_page(object: PageObject) -> Result<Entry, NotionError> {
        let id = PageId::new(object.id)
            .map_err(|e| NotionError::InvalidResponse(e.to_string()))?;

        let mut entry = Entry::new(id, object.created_time, object.last_edited_time)
            .with_parent(object.parent)
            .with_flags(object.archived, object.in_trash);

        if let Some(url) = object.url {
            entry = entry.with_url(url);
        }
        if let Some(icon) = object.icon {
            entry = entry.with_icon(icon);
        }
        if let Some(cover) = object.cover {
            entry = entry.with_cover(cover);
        }
        for (name, value) in object.properties {
            entry = entry.with_property(name, Self::parse_property(value));
        }

        Ok(entry)
    }

    /// Converts a wire property value into its domain form
    ///
    /// Kinds this client does not model become [`PropertyValue::Unsupported`].
    pub fn parse_property(value: PropertyValueObject) -> PropertyValue {
        match value.kind.as_str() {
            "title" => PropertyValue::Title(plain_text(&value.title.unwrap_or_default())),
            "rich_text" => PropertyValue::RichText(plain_text(&value.rich_text.unwrap_or_default())),
            "number" => PropertyValue::Number(value.number),
            "date" => PropertyValue::Date(value.date.map(|d| DateRange {
                start: d.start,
                end: d.end,
            })),
            "checkbox" => PropertyValue::Checkbox(value.checkbox.unwrap_or(false)),
            "select" => PropertyValue::Select(value.select.map(|o| o.name)),
            "multi_select" => PropertyValue::MultiSelect(
                value
                    .multi_select
                    .unwrap_or_default()
                    .into_iter()
                    .map(|o| o.name)
                    .collect(),
            ),
            "status" => PropertyValue::Status(value.status.map(|o| o.name)),
            "url" => PropertyValue::Url(value.url),
            "email" => PropertyValue::Email(value.email),
            "phone_number" => PropertyValue::PhoneNumber(value.phone_number),
            "created_time" => match value.created_time {
                Some(t) => PropertyValue::CreatedTime(t),
                None => PropertyValue::Unsupported(value.kind),
            },
            "last_edited_time" => match value.last_edited_time {
                Some(t) => PropertyValue::LastEditedTime(t),
                None => PropertyValue::Unsupported(value.kind),
            },
            _ => PropertyValue::Unsupported(value.kind),
        }
    }
}

// ============================================================================
// Query function
// ============================================================================

/// Fetches a single page of a data source query
///
/// Issues `POST /data_sources/{id}/query` with `start_cursor` set when a
/// cursor is given.
///
/// # Errors
///
/// Returns an error if the request fails after retries, or the response
/// cannot be parsed.
pub async fn query_data_source(
    client: &NotionClient,
    data_source_id: &DataSourceId,
    cursor: Option<&Cursor>,
    options: &QueryOptions,
) -> Result<Page, NotionError> {
    let path = format!("/data_sources/{}/query", data_source_id.as_str());
    let body = options.request(cursor);

    trace!(path = %path, has_cursor = cursor.is_some(), "Querying data source");

    let response: QueryDataSourceResponse = client.post_json(&path, &body).await?;
    QueryParser::parse_response(response)
}
