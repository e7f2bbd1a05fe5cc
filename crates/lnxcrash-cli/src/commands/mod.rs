//! CLI command implementations
//!
//! One module per subcommand, plus the wiring helpers shared by the
//! commands that assemble adapters into use cases: the discovery window,
//! the run-time report metadata, and the gateway construction.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use lnxcrash_core::config::Config;
use lnxcrash_core::domain::{AppIdentifier, AppVersion, ReportMeta};
use lnxcrash_wire::{Dialect, GatewayConfig, HttpReportGateway};
use tracing::warn;

pub mod comment;
pub mod config;
pub mod feedback;
pub mod scan;
pub mod send;

/// Oldest modification time discovery still considers new
///
/// Derived from `store.max_age_days`; crash files older than this are
/// left alone even when the ledger has never seen them.
pub(crate) fn discovery_since(config: &Config) -> DateTime<Utc> {
    Utc::now() - chrono::Duration::days(i64::from(config.store.max_age_days))
}

/// Run-time report metadata for this invocation
///
/// Static fields come from the `metadata` config section; system version,
/// platform, and sender version are filled in from the running machine.
pub(crate) fn runtime_meta(config: &Config) -> ReportMeta {
    let app_version = match &config.metadata.app_version {
        Some(raw) => match AppVersion::new(raw.clone()) {
            Ok(version) => Some(version),
            Err(e) => {
                warn!(%e, "Ignoring invalid metadata.app_version");
                None
            }
        },
        None => None,
    };

    ReportMeta {
        app_name: config.metadata.app_name.clone(),
        bundle_identifier: config.metadata.bundle_identifier.clone(),
        system_version: system_version(),
        platform: std::env::consts::ARCH.to_string(),
        sender_version: env!("CARGO_PKG_VERSION").to_string(),
        app_version,
        user_id: config.metadata.user_id.clone(),
        contact: config.metadata.contact.clone(),
        console_log: String::new(),
        application_log: String::new(),
    }
}

/// Build the HTTP gateway for the configured server
///
/// # Errors
///
/// Returns an error when the dialect is unknown or the hosted dialect is
/// missing a valid app identifier. Callers check `submission_url` first
/// for a friendlier message.
pub(crate) fn build_gateway(config: &Config) -> Result<HttpReportGateway> {
    let dialect = match config.server.dialect.as_str() {
        "custom" => Dialect::Custom,
        "hosted" => {
            let raw = config
                .server
                .app_identifier
                .as_deref()
                .context("server.app_identifier is required when server.dialect is 'hosted'")?;
            let app_identifier = AppIdentifier::new(raw.to_string())
                .context("Invalid server.app_identifier in configuration")?;
            Dialect::Hosted { app_identifier }
        }
        other => anyhow::bail!("Unknown server.dialect '{other}'; expected 'custom' or 'hosted'"),
    };

    Ok(HttpReportGateway::new(GatewayConfig {
        submission_url: config.server.submission_url.clone(),
        dialect,
        timeout: config.server.timeout(),
    }))
}

/// OS version string for the report payload
///
/// Prefers the PRETTY_NAME from /etc/os-release; falls back to the bare
/// OS name when the file is absent or unparseable.
fn system_version() -> String {
    std::fs::read_to_string("/etc/os-release")
        .ok()
        .and_then(|content| os_release_pretty_name(&content))
        .unwrap_or_else(|| std::env::consts::OS.to_string())
}

/// Extract PRETTY_NAME from os-release file content
fn os_release_pretty_name(content: &str) -> Option<String> {
    for line in content.lines() {
        if let Some(rest) = line.strip_prefix("PRETTY_NAME=") {
            let name = rest.trim().trim_matches('"');
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }
    None
}
