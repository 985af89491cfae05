//! Fetch command - Retrieve a snapshot of the diary data source
//!
//! Provides the `notion-diary fetch` CLI command which:
//! 1. Loads configuration and resolves the database to its data source
//! 2. Pages through the data source into a single snapshot
//! 3. Lists each entry's date and word count
//! 4. Warns about entries edited while the snapshot was being taken
//! 5. Optionally saves the snapshot as JSON for later `stale --since` runs

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use diary_core::config::FieldsConfig;
use diary_core::domain::{find_stale, DiaryPage, Entry};
use tracing::warn;

use super::{default_snapshot_path, load_valid_config, retrieve_snapshot, save_snapshot};
use crate::output::{get_formatter, OutputFormat, OutputFormatter};

#[derive(Debug, Args)]
pub struct FetchCommand {
    /// Save the snapshot as JSON (default: data dir/notion-diary/snapshot.json)
    #[arg(long, value_name = "PATH")]
    pub save: Option<Option<PathBuf>>,

    /// Stop after this many pages (overrides query.max_pages)
    #[arg(long)]
    pub max_pages: Option<u32>,
}

impl FetchCommand {
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        let formatter = get_formatter(format);

        let config = load_valid_config(config_path, &*formatter)?;
        let (data_source, snapshot) = retrieve_snapshot(&config, self.max_pages).await?;

        let stale = find_stale(&snapshot);
        if !stale.is_empty() {
            warn!(count = stale.len(), "Entries changed during retrieval");
        }

        let saved_to = match &self.save {
            Some(path) => {
                let path = path.clone().unwrap_or_else(default_snapshot_path);
                save_snapshot(&snapshot, &path)?;
                Some(path)
            }
            None => None,
        };

        if format.is_json() {
            let json = serde_json::json!({
                "data_source": data_source.as_str(),
                "fetch_time": snapshot.fetch_time().to_rfc3339(),
                "count": snapshot.len(),
                "entries": snapshot
                    .entries()
                    .iter()
                    .map(|e| entry_json(e, &config.fields))
                    .collect::<Vec<_>>(),
                "stale": stale.iter().map(|e| e.id().as_str()).collect::<Vec<_>>(),
                "saved_to": saved_to.as_ref().map(|p| p.display().to_string()),
            });
            formatter.print_json(&json);
            return Ok(());
        }

        formatter.success(&format!(
            "Fetched {} entr{} from data source {}",
            snapshot.len(),
            if snapshot.len() == 1 { "y" } else { "ies" },
            data_source
        ));
        formatter.info(&format!("Fetch time: {}", snapshot.fetch_time().to_rfc3339()));
        formatter.info("");
        print_entries(snapshot.entries(), &config.fields, &*formatter);

        for entry in &stale {
            formatter.warn(&format!(
                "{} was edited at {} during retrieval; fetch again before relying on it",
                entry.id(),
                entry.last_edited_time().to_rfc3339()
            ));
        }

        if let Some(path) = saved_to {
            formatter.info("");
            formatter.info(&format!("Snapshot saved to {}", path.display()));
        }

        Ok(())
    }
}

/// Prints one row per entry with its date and word count
fn print_entries(
    entries: &[Entry],
    fields: &FieldsConfig,
    formatter: &dyn OutputFormatter,
) {
    formatter.info(&format!("{:<12} {:>8}  {}", "DATE", "WORDS", "TITLE"));
    for entry in entries {
        let title = entry.title().unwrap_or("(untitled)");
        match DiaryPage::from_entry(entry, &fields.date, &fields.word_count) {
            Ok(page) => formatter.info(&format!(
                "{:<12} {:>8}  {}",
                page.date, page.word_count, title
            )),
            Err(e) => formatter.info(&format!("{:<12} {:>8}  {} ({})", "-", "-", title, e)),
        }
    }
}

/// JSON view of one entry with its diary fields when they resolve
pub(crate) fn entry_json(entry: &Entry, fields: &FieldsConfig) -> serde_json::Value {
    let diary = DiaryPage::from_entry(entry, &fields.date, &fields.word_count);
    serde_json::json!({
        "id": entry.id().as_str(),
        "title": entry.title(),
        "last_edited_time": entry.last_edited_time().to_rfc3339(),
        "date": diary.as_ref().ok().map(|p| p.date.clone()),
        "word_count": diary.as_ref().ok().map(|p| p.word_count),
        "error": diary.as_ref().err().map(|e| e.to_string()),
    })
}
