//! Config command - View and check notion-diary configuration
//!
//! Provides the `notion-diary config` CLI command which:
//! 1. Shows the effective configuration (YAML or JSON) with the token masked
//! 2. Validates the configuration file and reports errors

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use diary_core::config::Config;
use tracing::info;

use super::load_config;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Validate configuration file
    Validate,
}

impl ConfigCommand {
    /// Execute the config command
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(format, config_path),
            ConfigCommand::Validate => self.execute_validate(format, config_path),
        }
    }

    fn execute_show(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        let formatter = get_formatter(format);
        let config = load_config(config_path)?.redacted();

        info!(config_path = %config_path.display(), "Showing configuration");

        if format.is_json() {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", config_path.display()));
            formatter.info("");

            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;

            for line in yaml.lines() {
                formatter.info(line);
            }
        }

        Ok(())
    }

    fn execute_validate(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        let formatter = get_formatter(format);

        if !config_path.exists() {
            if format.is_json() {
                let json = serde_json::json!({
                    "valid": false,
                    "config_path": config_path.display().to_string(),
                    "errors": ["Configuration file not found"],
                });
                formatter.print_json(&json);
            } else {
                formatter.error(&format!(
                    "Configuration file not found at {}",
                    config_path.display()
                ));
                formatter.info("Create it with at least notion.database set, and export NOTION_TOKEN.");
            }
            return Ok(());
        }

        let config = match load_config(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                if format.is_json() {
                    let json = serde_json::json!({
                        "valid": false,
                        "config_path": config_path.display().to_string(),
                        "errors": [format!("{e:#}")],
                    });
                    formatter.print_json(&json);
                } else {
                    formatter.error(&format!("{e:#}"));
                }
                return Ok(());
            }
        };

        info!(config_path = %config_path.display(), "Validating configuration");

        report_validation(&config, format, config_path);
        Ok(())
    }
}

fn report_validation(config: &Config, format: OutputFormat, config_path: &Path) {
    let formatter = get_formatter(format);
    let errors = config.validate();

    if format.is_json() {
        let error_strings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        let json = serde_json::json!({
            "valid": errors.is_empty(),
            "config_path": config_path.display().to_string(),
            "errors": error_strings,
        });
        formatter.print_json(&json);
    } else if errors.is_empty() {
        formatter.success("Configuration is valid");
        formatter.info(&format!("File: {}", config_path.display()));
    } else {
        formatter.error(&format!(
            "Configuration has {} error{}:",
            errors.len(),
            if errors.len() == 1 { "" } else { "s" }
        ));
        formatter.info(&format!("File: {}", config_path.display()));
        formatter.info("");
        for error in &errors {
            formatter.info(&format!("  {} - {}", error.field, error.message));
        }
    }
}
