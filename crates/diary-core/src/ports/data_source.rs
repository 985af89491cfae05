//! Data source port (driven/secondary port)
//!
//! This module defines the interface for reading pages from a queryable
//! data source. The Notion adapter implements it over HTTP; tests implement
//! it with scripted pages.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are adapter-specific
//!   and don't need domain-level classification.
//! - Uses `#[async_trait]` for async trait methods.
//! - Retries, timeouts and authentication belong to the implementation;
//!   callers treat every error as final.

use crate::domain::{Cursor, DataSourceId, Entry};

/// One page of a paginated query
///
/// Transient: the retrieval loop consumes it immediately.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Entries on this page, in remote order
    pub entries: Vec<Entry>,
    /// Cursor for the next page (None on the last page)
    pub next_cursor: Option<Cursor>,
}

impl Page {
    /// Returns true if no further page follows this one
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

/// Port trait for paged reads from a single data source
#[async_trait::async_trait]
pub trait IDataSource: Send + Sync {
    /// The data source this port reads from
    fn data_source_id(&self) -> &DataSourceId;

    /// Fetches one page of entries
    ///
    /// # Arguments
    /// * `cursor` - Continuation cursor from the previous page (None for the first page)
    ///
    /// # Returns
    /// The page's entries and the cursor of the following page, if any
    async fn query_page(&self, cursor: Option<&Cursor>) -> anyhow::Result<Page>;
}
