//! Snapshot of a data source
//!
//! A [`Snapshot`] is the complete set of entries returned by one retrieval,
//! paired with the instant the retrieval started. The fetch time is taken
//! before the first page request, so any entry edited after it may have
//! changed while pages were being read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entry::Entry;

/// Complete, time-stamped set of entries from a single retrieval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    fetch_time: DateTime<Utc>,
    entries: Vec<Entry>,
}

impl Snapshot {
    /// Creates a snapshot from entries in remote pagination order
    pub fn new(fetch_time: DateTime<Utc>, entries: Vec<Entry>) -> Self {
        Self {
            fetch_time,
            entries,
        }
    }

    /// When retrieval began
    pub fn fetch_time(&self) -> DateTime<Utc> {
        self.fetch_time
    }

    /// Entries in the order the remote returned them
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries edited strictly after `instant`, in snapshot order
    pub fn modified_since(&self, instant: DateTime<Utc>) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|entry| entry.modified_after(instant))
            .collect()
    }

    /// Entries edited after this snapshot's fetch time.
    ///
    /// These may not reflect the state that was read, and must be
    /// re-fetched before anything is written back for them.
    pub fn find_stale(&self) -> Vec<&Entry> {
        self.modified_since(self.fetch_time)
    }
}

/// Returns the stale entries of `snapshot`; see [`Snapshot::find_stale`]
pub fn find_stale(snapshot: &Snapshot) -> Vec<&Entry> {
    snapshot.find_stale()
}
