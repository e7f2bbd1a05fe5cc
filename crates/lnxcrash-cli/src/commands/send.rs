//! Send command - Submit pending crash reports
//!
//! Provides the `lnxcrash send` CLI command which:
//! 1. Loads configuration and opens the ledger
//! 2. Collects the pending batch (discovery window, exclusion set, cap)
//! 3. Performs one submission exchange for the whole batch
//! 4. Displays the verdict; the batch is marked processed on any server
//!    reply, while a network error leaves it queued for the next run

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use lnxcrash_core::config::Config;
use lnxcrash_core::domain::SubmitOutcome;
use tracing::info;

use crate::output::OutputFormat;

/// Send command with a dry-run mode
#[derive(Debug, Args)]
pub struct SendCommand {
    /// Build the batch but do not contact the server
    #[arg(long)]
    pub dry_run: bool,
}

impl SendCommand {
    /// Execute the send command
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        use lnxcrash_core::usecases::{CollectReportsUseCase, SubmitReportsUseCase};
        use lnxcrash_ledger::SqliteLedger;
        use lnxcrash_store::DirCrashStore;

        let formatter = format.formatter();

        // Step 1: Load config and check the server section
        let config = Config::load_or_default(config_path);
        info!(config_path = %config_path.display(), "Loaded configuration");

        if config.server.submission_url.is_empty() {
            formatter.error(
                "No submission URL configured. Run 'lnxcrash config set server.submission_url <url>' first.",
            );
            return Ok(());
        }

        let gateway = match super::build_gateway(&config) {
            Ok(gateway) => Arc::new(gateway),
            Err(e) => {
                formatter.error(&format!("Invalid server configuration: {:#}", e));
                return Ok(());
            }
        };

        // Step 2: Open the ledger and the crash store
        let ledger = Arc::new(
            SqliteLedger::open(&config.ledger.db_path)
                .await
                .context("Failed to open ledger database")?,
        );
        let store = Arc::new(DirCrashStore::new(
            config.store.crash_dir.clone(),
            config.store.file_suffix.clone(),
        ));

        let collect = CollectReportsUseCase::new(store, ledger.clone());
        let submit = SubmitReportsUseCase::new(gateway, ledger);

        // Step 3: Collect the batch for this cycle
        let since = super::discovery_since(&config);
        let meta = super::runtime_meta(&config);

        let reports = collect
            .execute(since, config.server.max_reports_per_run, &meta)
            .await
            .context("Failed to collect crash reports")?;

        if reports.is_empty() {
            if format.is_json() {
                formatter.print_json(&serde_json::json!({
                    "submitted": 0,
                    "outcome": "empty",
                }));
            } else {
                formatter.success("Nothing to send");
                formatter.info(&format!("Watched: {}", config.store.crash_dir.display()));
            }
            return Ok(());
        }

        // Step 4: Handle --dry-run
        if self.dry_run {
            if format.is_json() {
                let names: Vec<&str> = reports.iter().map(|r| r.file_name.as_str()).collect();
                formatter.print_json(&serde_json::json!({
                    "dry_run": true,
                    "would_send": reports.len(),
                    "reports": names,
                }));
            } else {
                formatter.success(&format!(
                    "Dry run: {} report{} would be sent to {}",
                    reports.len(),
                    if reports.len() == 1 { "" } else { "s" },
                    config.server.submission_url
                ));
                for report in &reports {
                    formatter.info(&report.file_name);
                }
            }
            return Ok(());
        }

        // Step 5: One exchange for the whole batch
        formatter.info(&format!(
            "Sending {} report{}...",
            reports.len(),
            if reports.len() == 1 { "" } else { "s" }
        ));

        let outcome = submit
            .execute(&reports)
            .await
            .context("Submission cycle failed")?;

        // Step 6: Display the verdict
        let Some(outcome) = outcome else {
            return Ok(());
        };

        match &outcome {
            SubmitOutcome::Server(reply) => {
                if format.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "submitted": reports.len(),
                        "outcome": "server",
                        "status": reply.status.name(),
                        "code": reply.status.code(),
                        "rejected": reply.status.is_rejection(),
                        "feedback_token": reply.feedback_token.as_ref().map(|t| t.as_str()),
                        "feedback_delay_secs": reply.feedback_delay.map(|d| d.as_secs()),
                    }));
                    return Ok(());
                }

                if reply.status.is_rejection() {
                    formatter.warn(&format!("Server rejected the batch: {}", reply.status));
                    formatter.info("The files will not be offered again.");
                } else {
                    formatter.success(&format!(
                        "Submitted {} report{}",
                        reports.len(),
                        if reports.len() == 1 { "" } else { "s" }
                    ));
                    formatter.info(&format!("Server status: {}", reply.status));
                }

                if let Some(token) = &reply.feedback_token {
                    formatter.info(&format!("Feedback token: {}", token));
                    if let Some(delay) = reply.feedback_delay {
                        formatter.info(&format!("Poll after: {}s", delay.as_secs()));
                    }
                    formatter.info(&format!(
                        "Run 'lnxcrash feedback {}' to check the verdict.",
                        token
                    ));
                }
            }
            SubmitOutcome::NetworkError(reason) => {
                if format.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "submitted": 0,
                        "outcome": "network_error",
                        "reason": reason,
                    }));
                    return Ok(());
                }

                formatter.warn(&format!("No server verdict: {}", reason));
                formatter.info("The reports stay queued and will be retried on the next run.");
            }
        }

        Ok(())
    }
}
