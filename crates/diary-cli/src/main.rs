//! notion-diary CLI - Command-line interface for notion-diary
//!
//! Provides commands for:
//! - Fetching a snapshot of the diary data source
//! - Finding entries edited after a snapshot was taken
//! - Viewing and validating configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use diary_core::config::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{config::ConfigCommand, fetch::FetchCommand, stale::StaleCommand};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "notion-diary",
    version,
    about = "Read a Notion diary database as consistent snapshots"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Retrieve every entry of the diary data source
    Fetch(FetchCommand),
    /// List entries edited after a snapshot was taken
    Stale(StaleCommand),
    /// View and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Log filter for the given flags, falling back to the configured level
fn log_filter(verbose: u8, quiet: bool, configured: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);

    // Setup tracing
    let configured = Config::load_or_default(&config_path).logging.level;
    let filter = log_filter(cli.verbose, cli.quiet, &configured);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = OutputFormat::from_flags(cli.json, cli.quiet);

    match cli.command {
        Commands::Fetch(cmd) => cmd.execute(format, &config_path).await,
        Commands::Stale(cmd) => cmd.execute(format, &config_path).await,
        Commands::Config(cmd) => cmd.execute(format, &config_path).await,
    }
}
