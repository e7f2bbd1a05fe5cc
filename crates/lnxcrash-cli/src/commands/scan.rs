//! Scan command - List unsubmitted crash reports
//!
//! Provides the `lnxcrash scan` CLI command which:
//! 1. Reads the processed names from the ledger
//! 2. Scans the crash directory for files inside the discovery window
//! 3. Builds and lists the batch that `send` would submit
//! 4. With --check, only answers whether anything is waiting

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use lnxcrash_core::config::Config;
use tracing::info;

use crate::output::OutputFormat;

/// Scan command with an optional existence-only mode
#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Only report whether any unsubmitted crash file exists
    #[arg(long)]
    pub check: bool,
}

impl ScanCommand {
    /// Execute the scan command
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        use lnxcrash_core::usecases::CollectReportsUseCase;
        use lnxcrash_ledger::SqliteLedger;
        use lnxcrash_store::DirCrashStore;

        let formatter = format.formatter();

        let config = Config::load_or_default(config_path);
        info!(config_path = %config_path.display(), "Loaded configuration");

        let ledger = Arc::new(
            SqliteLedger::open(&config.ledger.db_path)
                .await
                .context("Failed to open ledger database")?,
        );
        let store = Arc::new(DirCrashStore::new(
            config.store.crash_dir.clone(),
            config.store.file_suffix.clone(),
        ));

        let collect = CollectReportsUseCase::new(store, ledger);
        let since = super::discovery_since(&config);

        if self.check {
            let waiting = collect
                .has_new_crashes(since)
                .await
                .context("Failed to probe for new crash files")?;

            if format.is_json() {
                formatter.print_json(&serde_json::json!({ "new_crashes": waiting }));
            } else if waiting {
                formatter.success("New crash reports are waiting");
            } else {
                formatter.success("No new crash reports");
            }
            return Ok(());
        }

        // Same window and cap as a send cycle, so the listing is exactly
        // the batch send would submit
        let meta = super::runtime_meta(&config);
        let reports = collect
            .execute(since, config.server.max_reports_per_run, &meta)
            .await
            .context("Failed to collect crash reports")?;

        if format.is_json() {
            let entries: Vec<serde_json::Value> = reports
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "file_name": r.file_name,
                        "version": r.version.as_ref().map(|v| v.as_str()),
                        "short_version": r.short_version.as_ref().map(|v| v.as_str()),
                        "log_bytes": r.log.len(),
                        "has_comment": r.comment.is_some(),
                    })
                })
                .collect();

            formatter.print_json(&serde_json::json!({
                "crash_dir": config.store.crash_dir.display().to_string(),
                "count": reports.len(),
                "reports": entries,
            }));
            return Ok(());
        }

        if reports.is_empty() {
            formatter.success("No new crash reports");
            formatter.info(&format!("Watched: {}", config.store.crash_dir.display()));
            return Ok(());
        }

        formatter.success(&format!(
            "{} crash report{} ready to send",
            reports.len(),
            if reports.len() == 1 { "" } else { "s" }
        ));
        formatter.info("");

        for report in &reports {
            let version = report
                .version
                .as_ref()
                .map(|v| v.as_str())
                .unwrap_or("unknown");
            let comment_tag = if report.comment.is_some() {
                ", comment attached"
            } else {
                ""
            };
            formatter.info(&format!(
                "{} (version {}, {} bytes{})",
                report.file_name,
                version,
                report.log.len(),
                comment_tag
            ));
        }

        formatter.info("");
        formatter.info("Run 'lnxcrash send' to submit them.");

        Ok(())
    }
}
