//! Snapshot retrieval use case
//!
//! Turns the paged query of a data source into one complete, time-stamped
//! [`Snapshot`]. Pages are requested strictly one after another; the cursor
//! of each page is only used once that page has arrived.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, trace};

use crate::{
    domain::{Cursor, DomainError, Snapshot},
    ports::IDataSource,
};

/// Use case for reading every entry of a data source
pub struct RetrieveSnapshotUseCase {
    data_source: Arc<dyn IDataSource>,
    max_pages: Option<u32>,
}

impl RetrieveSnapshotUseCase {
    /// Creates a new RetrieveSnapshotUseCase with no page cap
    ///
    /// # Arguments
    ///
    /// * `data_source` - Port to the data source being read
    pub fn new(data_source: Arc<dyn IDataSource>) -> Self {
        Self {
            data_source,
            max_pages: None,
        }
    }

    /// Caps the number of pages a single retrieval may request.
    ///
    /// `None` leaves pagination unbounded: the loop then ends only when the
    /// remote stops returning a cursor.
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Retrieves all entries of the data source
    ///
    /// This method:
    /// 1. Records the fetch time before any request is issued
    /// 2. Requests pages, appending each page's entries in order
    /// 3. Stops at the first page without a continuation cursor
    ///
    /// # Errors
    ///
    /// Returns the first page error unchanged in kind, discarding entries
    /// already accumulated, or [`DomainError::PageLimitExceeded`] when a
    /// page cap is set and the remote still has more pages.
    pub async fn execute(&self) -> Result<Snapshot> {
        let fetch_time = Utc::now();
        let data_source_id = self.data_source.data_source_id();

        let mut cursor: Option<Cursor> = None;
        let mut entries = Vec::new();
        let mut page_count: u32 = 0;

        loop {
            if let Some(limit) = self.max_pages {
                if page_count >= limit {
                    return Err(DomainError::PageLimitExceeded { limit }.into());
                }
            }
            page_count += 1;

            let page = self
                .data_source
                .query_page(cursor.as_ref())
                .await
                .with_context(|| {
                    format!("Failed to query page {page_count} of data source {data_source_id}")
                })?;

            trace!(
                page = page_count,
                items = page.entries.len(),
                has_next = page.next_cursor.is_some(),
                "Received data source page"
            );

            entries.extend(page.entries);

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        debug!(
            data_source = %data_source_id,
            count = entries.len(),
            pages = page_count,
            "Retrieved entries from data source"
        );

        Ok(Snapshot::new(fetch_time, entries))
    }
}
