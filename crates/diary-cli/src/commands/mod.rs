//! CLI subcommands
//!
//! - [`fetch`] - Retrieve a snapshot of the diary data source
//! - [`stale`] - Report entries edited after a snapshot was taken
//! - [`config`] - Show and validate the configuration

pub mod config;
pub mod fetch;
pub mod stale;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use diary_core::config::Config;
use diary_core::domain::{DataSourceId, Snapshot};
use diary_core::ports::IDataSource;
use diary_core::usecases::RetrieveSnapshotUseCase;
use diary_notion::session::NotionSession;
use tracing::{debug, info};

use crate::output::OutputFormatter;

/// Loads the configuration file, then applies environment overrides.
///
/// A missing file yields the defaults; a file that exists but does not
/// parse is an error.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?
    } else {
        debug!(config_path = %path.display(), "No configuration file, using defaults");
        Config::default()
    };
    config.apply_env();
    Ok(config)
}

/// Loads and validates the configuration, printing every problem found
pub fn load_valid_config(path: &Path, formatter: &dyn OutputFormatter) -> Result<Config> {
    let config = load_config(path)?;
    let errors = config.validate();
    if !errors.is_empty() {
        for error in &errors {
            formatter.error(&error.to_string());
        }
        anyhow::bail!("Configuration at {} is invalid", path.display());
    }
    Ok(config)
}

/// Resolves the configured database and retrieves a full snapshot of it
///
/// `max_pages` overrides `query.max_pages` when set.
pub async fn retrieve_snapshot(
    config: &Config,
    max_pages: Option<u32>,
) -> Result<(DataSourceId, Snapshot)> {
    let session = NotionSession::resolve(config)
        .await
        .context("Failed to resolve the diary data source")?;
    let data_source = session.data_source_id().clone();

    info!(database = %session.database_id(), data_source = %data_source, "Fetching snapshot");

    let snapshot = RetrieveSnapshotUseCase::new(Arc::new(session))
        .with_max_pages(max_pages.or(config.query.max_pages))
        .execute()
        .await?;

    Ok((data_source, snapshot))
}

/// Where `fetch --save` writes when no path is given
pub fn default_snapshot_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("notion-diary")
        .join("snapshot.json")
}

/// Writes `snapshot` as pretty JSON, creating parent directories
pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create snapshot directory")?;
    }
    let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
    Ok(())
}

/// Reads a snapshot written by [`save_snapshot`]
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))
}
