//! Config command - View and manage LNXCrash configuration
//!
//! Provides the `lnxcrash config` CLI command which:
//! 1. Shows the current configuration (YAML or JSON)
//! 2. Sets individual configuration values via dot-notation keys
//! 3. Validates the configuration file and reports errors

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use crate::output::OutputFormat;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "server.submission_url")
        key: String,
        /// New value
        value: String,
    },
    /// Validate configuration file
    Validate,
}

impl ConfigCommand {
    /// Execute the config command
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        match self {
            ConfigCommand::Show => self.execute_show(format, config_path).await,
            ConfigCommand::Set { key, value } => {
                self.execute_set(key, value, format, config_path).await
            }
            ConfigCommand::Validate => self.execute_validate(format, config_path).await,
        }
    }

    /// Show current configuration
    async fn execute_show(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        use lnxcrash_core::config::Config;

        let formatter = format.formatter();
        let config = Config::load_or_default(config_path);

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

    /// Set a configuration value using dot-notation
    async fn execute_set(
        &self,
        key: &str,
        value: &str,
        format: OutputFormat,
        config_path: &Path,
    ) -> Result<()> {
        use lnxcrash_core::config::Config;

        let formatter = format.formatter();
        let mut config = Config::load_or_default(config_path);

        info!(key = %key, value = %value, "Setting configuration value");

        match apply_config_value(&mut config, key, value) {
            Ok(()) => {
                // Validate the new value; errors in other sections are
                // expected while the config is still being filled in
                let validation_errors = config.validate();
                let real_errors: Vec<_> = validation_errors
                    .iter()
                    .filter(|e| e.field == key)
                    .collect();

                if !real_errors.is_empty() {
                    let error_msgs: Vec<String> = real_errors
                        .iter()
                        .map(|e| format!("{}: {}", e.field, e.message))
                        .collect();

                    if format.is_json() {
                        let json = serde_json::json!({
                            "success": false,
                            "key": key,
                            "value": value,
                            "errors": error_msgs,
                        });
                        formatter.print_json(&json);
                    } else {
                        formatter.error(&format!(
                            "Invalid value for '{}': {}",
                            key,
                            error_msgs.join("; ")
                        ));
                    }
                    return Ok(());
                }

                // First write may land in a directory that does not exist yet
                if let Some(parent) = config_path.parent() {
                    std::fs::create_dir_all(parent)
                        .context("Failed to create configuration directory")?;
                }

                let yaml =
                    serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
                std::fs::write(config_path, &yaml)
                    .context("Failed to write configuration file")?;

                if format.is_json() {
                    let json = serde_json::json!({
                        "success": true,
                        "key": key,
                        "value": value,
                        "config_path": config_path.display().to_string(),
                    });
                    formatter.print_json(&json);
                } else {
                    formatter.success(&format!("Set {} = {}", key, value));
                    formatter.info(&format!("Saved to {}", config_path.display()));
                }
            }
            Err(e) => {
                if format.is_json() {
                    let json = serde_json::json!({
                        "success": false,
                        "key": key,
                        "value": value,
                        "error": e.to_string(),
                    });
                    formatter.print_json(&json);
                } else {
                    formatter.error(&format!("Failed to set '{}': {}", key, e));
                    formatter.info("");
                    formatter.info("Supported keys:");
                    formatter
                        .info("  server.submission_url       - Base URL for crash submission");
                    formatter.info("  server.dialect              - custom|hosted");
                    formatter.info(
                        "  server.app_identifier       - Hosted-backend app ID ('none' to clear)",
                    );
                    formatter
                        .info("  server.timeout_secs         - Seconds before a send times out");
                    formatter.info("  server.max_reports_per_run  - Max crash files per cycle");
                    formatter.info("  store.crash_dir             - Directory holding crash files");
                    formatter.info("  store.file_suffix           - Crash file name suffix");
                    formatter
                        .info("  store.max_age_days          - Ignore files older than this");
                    formatter.info("  ledger.db_path              - SQLite ledger location");
                    formatter.info("  metadata.app_name           - Application display name");
                    formatter.info("  metadata.bundle_identifier  - Reverse-DNS application ID");
                    formatter.info(
                        "  metadata.app_version        - Installed version ('none' to clear)",
                    );
                    formatter.info("  metadata.user_id            - Opaque user identity");
                    formatter.info("  metadata.contact            - Opaque contact field");
                    formatter.info("  logging.level               - trace|debug|info|warn|error");
                    formatter.info("  logging.format              - text|json");
                }
            }
        }

        Ok(())
    }

    /// Validate configuration file
    async fn execute_validate(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        use lnxcrash_core::config::Config;

        let formatter = format.formatter();

        // Load explicitly (not load_or_default) so parse errors surface
        let config = match Config::load(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                if !config_path.exists() {
                    if format.is_json() {
                        let json = serde_json::json!({
                            "valid": false,
                            "config_path": config_path.display().to_string(),
                            "errors": ["Configuration file not found. Using defaults."],
                        });
                        formatter.print_json(&json);
                    } else {
                        formatter.info(&format!(
                            "Configuration file not found at {}",
                            config_path.display()
                        ));
                        formatter.info(
                            "Using default configuration. Run 'lnxcrash config set' to create one.",
                        );
                    }
                    return Ok(());
                }

                if format.is_json() {
                    let json = serde_json::json!({
                        "valid": false,
                        "config_path": config_path.display().to_string(),
                        "errors": [format!("Failed to parse configuration: {}", e)],
                    });
                    formatter.print_json(&json);
                } else {
                    formatter.error(&format!("Failed to parse configuration: {}", e));
                    formatter.info(&format!("File: {}", config_path.display()));
                }
                return Ok(());
            }
        };

        info!(config_path = %config_path.display(), "Validating configuration");

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

        Ok(())
    }
}

/// Apply a dot-notation key/value pair to a Config struct
///
/// Supported keys:
/// - server.submission_url, server.dialect, server.app_identifier,
///   server.timeout_secs, server.max_reports_per_run
/// - store.crash_dir, store.file_suffix, store.max_age_days
/// - ledger.db_path
/// - metadata.app_name, metadata.bundle_identifier, metadata.app_version,
///   metadata.user_id, metadata.contact
/// - logging.level, logging.format
fn apply_config_value(
    config: &mut lnxcrash_core::config::Config,
    key: &str,
    value: &str,
) -> Result<()> {
    match key {
        // --- server ---
        "server.submission_url" => {
            config.server.submission_url = value.to_string();
        }
        "server.dialect" => {
            config.server.dialect = value.to_string();
        }
        "server.app_identifier" => {
            config.server.app_identifier = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.to_string())
            };
        }
        "server.timeout_secs" => {
            config.server.timeout_secs = value
                .parse::<u64>()
                .context("Expected a positive integer for server.timeout_secs")?;
        }
        "server.max_reports_per_run" => {
            config.server.max_reports_per_run = value
                .parse::<usize>()
                .context("Expected a positive integer for server.max_reports_per_run")?;
        }

        // --- store ---
        "store.crash_dir" => {
            config.store.crash_dir = PathBuf::from(value);
        }
        "store.file_suffix" => {
            config.store.file_suffix = value.to_string();
        }
        "store.max_age_days" => {
            config.store.max_age_days = value
                .parse::<u32>()
                .context("Expected a positive integer for store.max_age_days")?;
        }

        // --- ledger ---
        "ledger.db_path" => {
            config.ledger.db_path = PathBuf::from(value);
        }

        // --- metadata ---
        "metadata.app_name" => {
            config.metadata.app_name = value.to_string();
        }
        "metadata.bundle_identifier" => {
            config.metadata.bundle_identifier = value.to_string();
        }
        "metadata.app_version" => {
            config.metadata.app_version = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.to_string())
            };
        }
        "metadata.user_id" => {
            config.metadata.user_id = value.to_string();
        }
        "metadata.contact" => {
            config.metadata.contact = value.to_string();
        }

        // --- logging ---
        "logging.level" => {
            config.logging.level = value.to_string();
        }
        "logging.format" => {
            config.logging.format = value.to_string();
        }

        _ => {
            anyhow::bail!("Unknown configuration key: '{}'", key);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lnxcrash_core::config::Config;

    #[test]
    fn test_apply_submission_url() {
        let mut config = Config::default();
        apply_config_value(&mut config, "server.submission_url", "https://crash.example.com")
            .unwrap();
        assert_eq!(config.server.submission_url, "https://crash.example.com");
    }

    #[test]
    fn test_apply_dialect() {
        let mut config = Config::default();
        apply_config_value(&mut config, "server.dialect", "hosted").unwrap();
        assert_eq!(config.server.dialect, "hosted");
    }

    #[test]
    fn test_apply_app_identifier() {
        let mut config = Config::default();
        apply_config_value(&mut config, "server.app_identifier", "myapp01").unwrap();
        assert_eq!(config.server.app_identifier, Some("myapp01".to_string()));
    }

    #[test]
    fn test_apply_app_identifier_none() {
        let mut config = Config::default();
        config.server.app_identifier = Some("existing".to_string());
        apply_config_value(&mut config, "server.app_identifier", "none").unwrap();
        assert_eq!(config.server.app_identifier, None);
    }

    #[test]
    fn test_apply_timeout_secs() {
        let mut config = Config::default();
        apply_config_value(&mut config, "server.timeout_secs", "30").unwrap();
        assert_eq!(config.server.timeout_secs, 30);
    }

    #[test]
    fn test_apply_max_reports_per_run() {
        let mut config = Config::default();
        apply_config_value(&mut config, "server.max_reports_per_run", "25").unwrap();
        assert_eq!(config.server.max_reports_per_run, 25);
    }

    #[test]
    fn test_apply_crash_dir() {
        let mut config = Config::default();
        apply_config_value(&mut config, "store.crash_dir", "/var/lib/myapp/crashes").unwrap();
        assert_eq!(
            config.store.crash_dir,
            PathBuf::from("/var/lib/myapp/crashes")
        );
    }

    #[test]
    fn test_apply_file_suffix() {
        let mut config = Config::default();
        apply_config_value(&mut config, "store.file_suffix", ".dump").unwrap();
        assert_eq!(config.store.file_suffix, ".dump");
    }

    #[test]
    fn test_apply_max_age_days() {
        let mut config = Config::default();
        apply_config_value(&mut config, "store.max_age_days", "14").unwrap();
        assert_eq!(config.store.max_age_days, 14);
    }

    #[test]
    fn test_apply_db_path() {
        let mut config = Config::default();
        apply_config_value(&mut config, "ledger.db_path", "/tmp/ledger.db").unwrap();
        assert_eq!(config.ledger.db_path, PathBuf::from("/tmp/ledger.db"));
    }

    #[test]
    fn test_apply_app_name() {
        let mut config = Config::default();
        apply_config_value(&mut config, "metadata.app_name", "MyApp").unwrap();
        assert_eq!(config.metadata.app_name, "MyApp");
    }

    #[test]
    fn test_apply_bundle_identifier() {
        let mut config = Config::default();
        apply_config_value(&mut config, "metadata.bundle_identifier", "com.example.myapp")
            .unwrap();
        assert_eq!(config.metadata.bundle_identifier, "com.example.myapp");
    }

    #[test]
    fn test_apply_app_version() {
        let mut config = Config::default();
        apply_config_value(&mut config, "metadata.app_version", "1.0.1").unwrap();
        assert_eq!(config.metadata.app_version, Some("1.0.1".to_string()));
    }

    #[test]
    fn test_apply_app_version_none() {
        let mut config = Config::default();
        config.metadata.app_version = Some("1.0.0".to_string());
        apply_config_value(&mut config, "metadata.app_version", "").unwrap();
        assert_eq!(config.metadata.app_version, None);
    }

    #[test]
    fn test_apply_user_id_and_contact() {
        let mut config = Config::default();
        apply_config_value(&mut config, "metadata.user_id", "user-7").unwrap();
        apply_config_value(&mut config, "metadata.contact", "dev@example.com").unwrap();
        assert_eq!(config.metadata.user_id, "user-7");
        assert_eq!(config.metadata.contact, "dev@example.com");
    }

    #[test]
    fn test_apply_logging_level() {
        let mut config = Config::default();
        apply_config_value(&mut config, "logging.level", "debug").unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_apply_logging_format() {
        let mut config = Config::default();
        apply_config_value(&mut config, "logging.format", "json").unwrap();
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_apply_unknown_key_fails() {
        let mut config = Config::default();
        let result = apply_config_value(&mut config, "unknown.key", "value");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_invalid_u64_fails() {
        let mut config = Config::default();
        let result = apply_config_value(&mut config, "server.timeout_secs", "not_a_number");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_negative_number_fails() {
        let mut config = Config::default();
        let result = apply_config_value(&mut config, "store.max_age_days", "-5");
        assert!(result.is_err());
    }
}
