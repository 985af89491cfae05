//! Configuration module for notion-diary.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder pattern for programmatic use.
//!
//! The configuration is an ordinary value: it is loaded once at startup and
//! passed by reference to whatever needs it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::DatabaseId;

/// Environment variable that overrides `notion.token`.
pub const TOKEN_ENV_VAR: &str = "NOTION_TOKEN";

/// Default Notion API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// Notion API version sent with every request.
pub const DEFAULT_API_VERSION: &str = "2025-09-03";

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for notion-diary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub notion: NotionConfig,
    pub fields: FieldsConfig,
    pub query: QueryConfig,
    pub logging: LoggingConfig,
}

/// Connection and transport settings for the Notion API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    /// Integration token (`secret_...` / `ntn_...`).
    pub token: String,
    /// ID of the diary database.
    pub database: String,
    /// API base URL; overridden in tests.
    pub base_url: String,
    /// Value of the `Notion-Version` header.
    pub api_version: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries after the first failed attempt.
    pub retry_count: u32,
    /// Fixed delay between attempts, in milliseconds.
    pub retry_interval_ms: u64,
}

/// Names of the diary properties in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsConfig {
    /// Date property of each diary entry.
    pub date: String,
    /// Number property holding the entry's word count.
    pub word_count: String,
}

/// Data source query settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Page size sent with each query (1..=100); server default when unset.
    pub page_size: Option<u32>,
    /// Sort results by the date field, newest first.
    pub sort_by_date: bool,
    /// Abort retrieval after this many pages; unbounded when unset.
    pub max_pages: Option<u32>,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/notion-diary/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("notion-diary")
            .join("config.yaml")
    }

    /// Apply overrides from the process environment.
    ///
    /// Currently only [`TOKEN_ENV_VAR`], so the token can stay out of the file.
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            self.override_token(token);
        }
    }

    /// Replace the token unless `token` is blank.
    pub fn override_token(&mut self, token: String) {
        if !token.trim().is_empty() {
            self.notion.token = token;
        }
    }

    /// Copy of this configuration with the token masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.notion.token.is_empty() {
            copy.notion.token = "********".to_string();
        }
        copy
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            database: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: 15,
            retry_count: 3,
            retry_interval_ms: 1000,
        }
    }
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            word_count: "Word Count".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"notion.timeout_secs"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Notion caps `page_size` at 100.
const MAX_PAGE_SIZE: u32 = 100;

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- notion ---
        if self.notion.token.trim().is_empty() {
            errors.push(ValidationError {
                field: "notion.token".into(),
                message: format!("must be set (in the file or via {TOKEN_ENV_VAR})"),
            });
        }
        if self.notion.database.trim().is_empty() {
            errors.push(ValidationError {
                field: "notion.database".into(),
                message: "must be set".into(),
            });
        } else if let Err(e) = DatabaseId::new(self.notion.database.clone()) {
            errors.push(ValidationError {
                field: "notion.database".into(),
                message: e.to_string(),
            });
        }
        if !(self.notion.base_url.starts_with("http://")
            || self.notion.base_url.starts_with("https://"))
        {
            errors.push(ValidationError {
                field: "notion.base_url".into(),
                message: format!("not an http(s) URL: {}", self.notion.base_url),
            });
        }
        if self.notion.api_version.trim().is_empty() {
            errors.push(ValidationError {
                field: "notion.api_version".into(),
                message: "must not be empty".into(),
            });
        }
        if self.notion.timeout_secs == 0 {
            errors.push(ValidationError {
                field: "notion.timeout_secs".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- fields ---
        if self.fields.date.trim().is_empty() {
            errors.push(ValidationError {
                field: "fields.date".into(),
                message: "must not be empty".into(),
            });
        }
        if self.fields.word_count.trim().is_empty() {
            errors.push(ValidationError {
                field: "fields.word_count".into(),
                message: "must not be empty".into(),
            });
        }

        // --- query ---
        if let Some(size) = self.query.page_size {
            if size == 0 || size > MAX_PAGE_SIZE {
                errors.push(ValidationError {
                    field: "query.page_size".into(),
                    message: format!("must be in range 1..={MAX_PAGE_SIZE}"),
                });
            }
        }
        if self.query.max_pages == Some(0) {
            errors.push(ValidationError {
                field: "query.max_pages".into(),
                message: "must be greater than 0 when set".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust
/// use diary_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .notion_token("secret_abc")
///     .notion_database("0123456789abcdef0123456789abcdef")
///     .logging_level("debug")
///     .build();
/// assert!(config.validate().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    // --- notion ---

    pub fn notion_token(mut self, token: impl Into<String>) -> Self {
        self.config.notion.token = token.into();
        self
    }

    pub fn notion_database(mut self, database: impl Into<String>) -> Self {
        self.config.notion.database = database.into();
        self
    }

    pub fn notion_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.notion.base_url = base_url.into();
        self
    }

    pub fn notion_timeout_secs(mut self, seconds: u64) -> Self {
        self.config.notion.timeout_secs = seconds;
        self
    }

    pub fn notion_retry_count(mut self, retries: u32) -> Self {
        self.config.notion.retry_count = retries;
        self
    }

    pub fn notion_retry_interval_ms(mut self, millis: u64) -> Self {
        self.config.notion.retry_interval_ms = millis;
        self
    }

    // --- fields ---

    pub fn fields(mut self, date: impl Into<String>, word_count: impl Into<String>) -> Self {
        self.config.fields.date = date.into();
        self.config.fields.word_count = word_count.into();
        self
    }

    // --- query ---

    pub fn query_page_size(mut self, size: u32) -> Self {
        self.config.query.page_size = Some(size);
        self
    }

    pub fn query_sort_by_date(mut self, enabled: bool) -> Self {
        self.config.query.sort_by_date = enabled;
        self
    }

    pub fn query_max_pages(mut self, pages: u32) -> Self {
        self.config.query.max_pages = Some(pages);
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Consume the builder and return the [`Config`] without validation.
    pub fn build(self) -> Config {
        self.config
    }

    /// Consume the builder, validate, and return the [`Config`] or errors.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let errors = self.config.validate();
        if errors.is_empty() {
            Ok(self.config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
