//! Stale command - Report entries edited after a snapshot was taken
//!
//! Provides the `notion-diary stale` CLI command. Without arguments it takes
//! a fresh snapshot and lists the entries edited while it was being read.
//! With `--since` it compares a fresh snapshot against the fetch time of a
//! snapshot saved earlier by `fetch --save`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use diary_core::domain::{Entry, Snapshot};
use tracing::info;

use super::fetch::entry_json;
use super::{load_snapshot, load_valid_config, retrieve_snapshot};
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct StaleCommand {
    /// Compare against the fetch time of a saved snapshot
    #[arg(long, value_name = "SNAPSHOT")]
    pub since: Option<PathBuf>,

    /// Stop after this many pages (overrides query.max_pages)
    #[arg(long)]
    pub max_pages: Option<u32>,
}

impl StaleCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        let formatter = get_formatter(format);

        // Read the baseline first so a bad path fails before any request
        let baseline = match &self.since {
            Some(path) => Some(load_snapshot(path)?),
            None => None,
        };

        let config = load_valid_config(config_path, &*formatter)?;
        let (_, snapshot) = retrieve_snapshot(&config, self.max_pages).await?;

        let cutoff = reference_time(baseline.as_ref(), &snapshot);
        let changed = snapshot.modified_since(cutoff);

        info!(cutoff = %cutoff.to_rfc3339(), count = changed.len(), "Computed stale entries");

        if format.is_json() {
            let json = serde_json::json!({
                "since": cutoff.to_rfc3339(),
                "fetch_time": snapshot.fetch_time().to_rfc3339(),
                "count": changed.len(),
                "entries": changed
                    .iter()
                    .map(|e| entry_json(e, &config.fields))
                    .collect::<Vec<_>>(),
            });
            formatter.print_json(&json);
            return Ok(());
        }

        if changed.is_empty() {
            formatter.success(&format!("No entries edited after {}", cutoff.to_rfc3339()));
            return Ok(());
        }

        formatter.warn(&format!(
            "{} entr{} edited after {}",
            changed.len(),
            if changed.len() == 1 { "y" } else { "ies" },
            cutoff.to_rfc3339()
        ));
        for entry in &changed {
            formatter.info(&edit_line(entry));
        }

        Ok(())
    }
}

/// The instant entries are compared against: the baseline's fetch time when
/// one was given, otherwise the fresh snapshot's own
fn reference_time(baseline: Option<&Snapshot>, fresh: &Snapshot) -> DateTime<Utc> {
    baseline
        .map(Snapshot::fetch_time)
        .unwrap_or_else(|| fresh.fetch_time())
}

fn edit_line(entry: &Entry) -> String {
    format!(
        "{} {} last edited {}",
        entry.id(),
        entry.title().unwrap_or("(untitled)"),
        entry.last_edited_time().to_rfc3339()
    )
}
