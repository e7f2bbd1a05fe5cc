//! Configuration module for lnxcrash.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, defaults, and a builder pattern for
//! programmatic use. The loaded values are handed to component constructors
//! explicitly; nothing in the pipeline reads configuration globally.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for lnxcrash.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub ledger: LedgerConfig,
    pub metadata: MetadataConfig,
    pub logging: LoggingConfig,
}

/// Ingestion server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL the submission POST goes to.
    pub submission_url: String,
    /// Wire dialect: `custom` (self-hosted server) or `hosted`.
    pub dialect: String,
    /// Tenant identifier, required when `dialect` is `hosted`.
    pub app_identifier: Option<String>,
    /// Seconds before an exchange resolves to a network error.
    pub timeout_secs: u64,
    /// Maximum crash files submitted in one cycle.
    pub max_reports_per_run: usize,
}

/// Crash-capture directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory where the capture collaborator writes crash files.
    pub crash_dir: PathBuf,
    /// File suffix identifying crash files in that directory.
    pub file_suffix: String,
    /// Files last modified more than this many days ago are ignored.
    pub max_age_days: u32,
}

/// Processed-state ledger settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Path of the SQLite ledger database.
    pub db_path: PathBuf,
}

/// Static report metadata settings.
///
/// Run-time values (system version, platform, console log) are filled by
/// the caller; this section holds the parts that do not change per run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Display name of the host application.
    pub app_name: String,
    /// Reverse-DNS bundle identifier of the host application.
    pub bundle_identifier: String,
    /// Currently installed application version, used as the payload
    /// fallback when a crash log yields no version.
    pub app_version: Option<String>,
    /// Opaque user identity forwarded verbatim.
    pub user_id: String,
    /// Opaque contact field forwarded verbatim.
    pub contact: String,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
    /// Output format: `text` or `json`.
    pub format: String,
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
    /// Typically `$XDG_CONFIG_HOME/lnxcrash/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("lnxcrash")
            .join("config.yaml")
    }
}

impl ServerConfig {
    /// The exchange timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// Config::default()
// ---------------------------------------------------------------------------

// Config derives Default because all its fields implement Default.
// (clippy::derivable_impls)

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            submission_url: String::new(),
            dialect: "custom".to_string(),
            app_identifier: None,
            timeout_secs: 15,
            max_reports_per_run: 10,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("lnxcrash");
        Self {
            crash_dir: data_dir.join("pending"),
            file_suffix: ".crash".to_string(),
            max_age_days: 7,
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("lnxcrash");
        Self {
            db_path: data_dir.join("ledger.db"),
        }
    }
}

// MetadataConfig derives Default (empty strings, no version).
// (clippy::derivable_impls)

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"server.timeout_secs"`.
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

/// Valid values for `logging.format`.
const VALID_LOG_FORMATS: &[&str] = &["text", "json"];

/// Valid values for `server.dialect`.
const VALID_DIALECTS: &[&str] = &["custom", "hosted"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- server ---
        if self.server.submission_url.is_empty() {
            errors.push(ValidationError {
                field: "server.submission_url".into(),
                message: "must be set".into(),
            });
        } else if !self.server.submission_url.starts_with("http://")
            && !self.server.submission_url.starts_with("https://")
        {
            errors.push(ValidationError {
                field: "server.submission_url".into(),
                message: format!(
                    "must start with http:// or https://: {}",
                    self.server.submission_url
                ),
            });
        }
        if !VALID_DIALECTS.contains(&self.server.dialect.as_str()) {
            errors.push(ValidationError {
                field: "server.dialect".into(),
                message: format!(
                    "invalid dialect '{}'; valid options: {}",
                    self.server.dialect,
                    VALID_DIALECTS.join(", ")
                ),
            });
        }
        if self.server.dialect == "hosted" {
            match &self.server.app_identifier {
                None => errors.push(ValidationError {
                    field: "server.app_identifier".into(),
                    message: "required when server.dialect is 'hosted'".into(),
                }),
                Some(id) => {
                    if crate::domain::AppIdentifier::new(id.clone()).is_err() {
                        errors.push(ValidationError {
                            field: "server.app_identifier".into(),
                            message: format!("must be alphanumeric: {id}"),
                        });
                    }
                }
            }
        }
        if self.server.timeout_secs == 0 {
            errors.push(ValidationError {
                field: "server.timeout_secs".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.server.max_reports_per_run == 0 {
            errors.push(ValidationError {
                field: "server.max_reports_per_run".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- store ---
        if self.store.crash_dir.as_os_str().is_empty() {
            errors.push(ValidationError {
                field: "store.crash_dir".into(),
                message: "must be set".into(),
            });
        }
        if self.store.file_suffix.is_empty() {
            errors.push(ValidationError {
                field: "store.file_suffix".into(),
                message: "must be set".into(),
            });
        }
        if self.store.max_age_days == 0 {
            errors.push(ValidationError {
                field: "store.max_age_days".into(),
                message: "must be greater than 0".into(),
            });
        }

        // --- ledger ---
        if self.ledger.db_path.as_os_str().is_empty() {
            errors.push(ValidationError {
                field: "ledger.db_path".into(),
                message: "must be set".into(),
            });
        }

        // --- metadata ---
        if let Some(version) = &self.metadata.app_version {
            if crate::domain::AppVersion::new(version.clone()).is_err() {
                errors.push(ValidationError {
                    field: "metadata.app_version".into(),
                    message: format!(
                        "only alphanumeric characters, spaces, and dots are accepted: {version}"
                    ),
                });
            }
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
        if !VALID_LOG_FORMATS.contains(&self.logging.format.as_str()) {
            errors.push(ValidationError {
                field: "logging.format".into(),
                message: format!(
                    "invalid format '{}'; valid options: {}",
                    self.logging.format,
                    VALID_LOG_FORMATS.join(", ")
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
/// ```rust,no_run
/// use lnxcrash_core::config::ConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = ConfigBuilder::new()
///     .server_submission_url("https://crash.example.com/submit")
///     .store_crash_dir(PathBuf::from("/var/lib/myapp/crashes"))
///     .logging_level("debug")
///     .build();
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

    // --- server ---

    pub fn server_submission_url(mut self, url: impl Into<String>) -> Self {
        self.config.server.submission_url = url.into();
        self
    }

    pub fn server_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.config.server.dialect = dialect.into();
        self
    }

    pub fn server_app_identifier(mut self, id: impl Into<String>) -> Self {
        self.config.server.app_identifier = Some(id.into());
        self
    }

    pub fn server_timeout_secs(mut self, seconds: u64) -> Self {
        self.config.server.timeout_secs = seconds;
        self
    }

    pub fn server_max_reports_per_run(mut self, n: usize) -> Self {
        self.config.server.max_reports_per_run = n;
        self
    }

    // --- store ---

    pub fn store_crash_dir(mut self, dir: PathBuf) -> Self {
        self.config.store.crash_dir = dir;
        self
    }

    pub fn store_file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.store.file_suffix = suffix.into();
        self
    }

    pub fn store_max_age_days(mut self, days: u32) -> Self {
        self.config.store.max_age_days = days;
        self
    }

    // --- ledger ---

    pub fn ledger_db_path(mut self, path: PathBuf) -> Self {
        self.config.ledger.db_path = path;
        self
    }

    // --- metadata ---

    pub fn metadata_app_name(mut self, name: impl Into<String>) -> Self {
        self.config.metadata.app_name = name.into();
        self
    }

    pub fn metadata_bundle_identifier(mut self, id: impl Into<String>) -> Self {
        self.config.metadata.bundle_identifier = id.into();
        self
    }

    pub fn metadata_app_version(mut self, version: impl Into<String>) -> Self {
        self.config.metadata.app_version = Some(version.into());
        self
    }

    pub fn metadata_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.config.metadata.user_id = user_id.into();
        self
    }

    pub fn metadata_contact(mut self, contact: impl Into<String>) -> Self {
        self.config.metadata.contact = contact.into();
        self
    }

    // --- logging ---

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    pub fn logging_format(mut self, format: impl Into<String>) -> Self {
        self.config.logging.format = format.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
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

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
