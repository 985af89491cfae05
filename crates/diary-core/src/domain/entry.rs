//! Entry domain entity
//!
//! An [`Entry`] is one page retrieved from a data source query. Entries are
//! value data: once built by an adapter they are never mutated in place.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::PageId;

// ============================================================================
// Property values
// ============================================================================

/// Start/end pair of a date property, kept as the ISO strings Notion returns
///
/// Notion dates may be either `2024-05-01` or a full timestamp with offset,
/// so the raw string is preserved rather than parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Start date or datetime
    pub start: String,
    /// Optional end date or datetime
    pub end: Option<String>,
}

/// Typed value of a single page property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    /// Page title, flattened to plain text
    Title(String),
    /// Rich text, flattened to plain text
    RichText(String),
    /// Numeric value (None when the cell is empty)
    Number(Option<f64>),
    /// Date value (None when the cell is empty)
    Date(Option<DateRange>),
    /// Checkbox state
    Checkbox(bool),
    /// Selected option name
    Select(Option<String>),
    /// Selected option names
    MultiSelect(Vec<String>),
    /// Status option name
    Status(Option<String>),
    /// URL value
    Url(Option<String>),
    /// Email value
    Email(Option<String>),
    /// Phone number value
    PhoneNumber(Option<String>),
    /// Creation timestamp property
    CreatedTime(DateTime<Utc>),
    /// Last edit timestamp property
    LastEditedTime(DateTime<Utc>),
    /// Any property type this client does not model; holds the type name
    Unsupported(String),
}

impl PropertyValue {
    /// Returns the Notion type name of this value (e.g. `"number"`)
    pub fn kind(&self) -> &str {
        match self {
            PropertyValue::Title(_) => "title",
            PropertyValue::RichText(_) => "rich_text",
            PropertyValue::Number(_) => "number",
            PropertyValue::Date(_) => "date",
            PropertyValue::Checkbox(_) => "checkbox",
            PropertyValue::Select(_) => "select",
            PropertyValue::MultiSelect(_) => "multi_select",
            PropertyValue::Status(_) => "status",
            PropertyValue::Url(_) => "url",
            PropertyValue::Email(_) => "email",
            PropertyValue::PhoneNumber(_) => "phone_number",
            PropertyValue::CreatedTime(_) => "created_time",
            PropertyValue::LastEditedTime(_) => "last_edited_time",
            PropertyValue::Unsupported(kind) => kind,
        }
    }
}

// ============================================================================
// Object metadata
// ============================================================================

/// Where a page lives in the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parent {
    /// Row of a data source (current API versions)
    DataSourceId {
        data_source_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        database_id: Option<String>,
    },
    /// Row of a database (older API versions)
    DatabaseId { database_id: String },
    /// Child of another page
    PageId { page_id: String },
    /// Child of a block
    BlockId { block_id: String },
    /// Top-level workspace page
    Workspace {
        #[serde(default)]
        workspace: bool,
    },
    /// Parent kind not modelled by this client
    #[serde(other)]
    Unsupported,
}

/// A file hosted by Notion; the URL is signed and expires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedFile {
    pub url: String,
    #[serde(default)]
    pub expiry_time: Option<String>,
}

/// A file hosted outside Notion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

/// A file reference, either Notion-hosted or external (used for covers)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileObject {
    File { file: HostedFile },
    External { external: ExternalFile },
    #[serde(other)]
    Unsupported,
}

/// Page icon, resolved by the `type` discriminant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    /// Icon uploaded to Notion
    File { file: HostedFile },
    /// Icon linked from an external URL
    External { external: ExternalFile },
    /// Unicode emoji icon
    Emoji { emoji: String },
    /// Icon kind not modelled by this client (e.g. custom emoji)
    #[serde(other)]
    Unsupported,
}

// ============================================================================
// Entry
// ============================================================================

/// One record retrieved from a data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    id: PageId,
    created_time: DateTime<Utc>,
    last_edited_time: DateTime<Utc>,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    in_trash: bool,
    parent: Parent,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    icon: Option<Icon>,
    #[serde(default)]
    cover: Option<FileObject>,
    #[serde(default)]
    properties: BTreeMap<String, PropertyValue>,
}

impl Entry {
    /// Creates an entry with the given identity and timestamps.
    ///
    /// Metadata defaults to a workspace parent with no icon, cover or
    /// properties; adapters fill the rest in with the `with_*` methods.
    pub fn new(
        id: PageId,
        created_time: DateTime<Utc>,
        last_edited_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            created_time,
            last_edited_time,
            archived: false,
            in_trash: false,
            parent: Parent::Workspace { workspace: true },
            url: None,
            icon: None,
            cover: None,
            properties: BTreeMap::new(),
        }
    }

    /// Sets the parent reference
    pub fn with_parent(mut self, parent: Parent) -> Self {
        self.parent = parent;
        self
    }

    /// Sets the archived and trashed flags
    pub fn with_flags(mut self, archived: bool, in_trash: bool) -> Self {
        self.archived = archived;
        self.in_trash = in_trash;
        self
    }

    /// Sets the page URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the icon
    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Sets the cover image
    pub fn with_cover(mut self, cover: FileObject) -> Self {
        self.cover = Some(cover);
        self
    }

    /// Adds a named property value
    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn id(&self) -> &PageId {
        &self.id
    }

    pub fn created_time(&self) -> DateTime<Utc> {
        self.created_time
    }

    pub fn last_edited_time(&self) -> DateTime<Utc> {
        self.last_edited_time
    }

    pub fn is_archived(&self) -> bool {
        self.archived
    }

    pub fn is_in_trash(&self) -> bool {
        self.in_trash
    }

    pub fn parent(&self) -> &Parent {
        &self.parent
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn cover(&self) -> Option<&FileObject> {
        self.cover.as_ref()
    }

    pub fn properties(&self) -> &BTreeMap<String, PropertyValue> {
        &self.properties
    }

    /// Looks up a property by its name
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Returns the plain text of the title property, if the entry has one
    pub fn title(&self) -> Option<&str> {
        self.properties.values().find_map(|value| match value {
            PropertyValue::Title(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Returns true if the entry was edited strictly after `instant`
    pub fn modified_after(&self, instant: DateTime<Utc>) -> bool {
        self.last_edited_time > instant
    }
}
