//! Comment command - Attach a user comment to a crash report
//!
//! Provides the `lnxcrash comment` CLI command which stores a free-text
//! comment against a crash file name in the ledger. The comment travels
//! in the description field when `send` next submits that file.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use lnxcrash_core::config::Config;
use tracing::info;

use crate::output::OutputFormat;

/// Comment command taking the crash file name and the comment text
#[derive(Debug, Args)]
pub struct CommentCommand {
    /// Crash file name the comment belongs to
    pub file_name: String,

    /// Free-text comment to attach
    pub comment: String,
}

impl CommentCommand {
    /// Execute the comment command
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        use lnxcrash_core::ports::ILedger;
        use lnxcrash_ledger::SqliteLedger;

        let formatter = format.formatter();

        let config = Config::load_or_default(config_path);

        let ledger = SqliteLedger::open(&config.ledger.db_path)
            .await
            .context("Failed to open ledger database")?;

        // A comment on an already-submitted file is kept but never sent
        let already_submitted = ledger
            .is_processed(&self.file_name)
            .await
            .context("Failed to query ledger")?;

        ledger
            .store_comment(&self.file_name, &self.comment)
            .await
            .with_context(|| format!("Failed to store comment for {}", self.file_name))?;

        info!(file_name = %self.file_name, "Stored comment");

        if format.is_json() {
            formatter.print_json(&serde_json::json!({
                "success": true,
                "file_name": self.file_name,
                "already_submitted": already_submitted,
            }));
            return Ok(());
        }

        formatter.success(&format!("Comment stored for {}", self.file_name));
        if already_submitted {
            formatter
                .warn("This file was already submitted; the comment will not reach the server.");
        }

        Ok(())
    }
}
