//! Report collection use case
//!
//! Orchestrates the local half of a submission cycle: seeding the exclusion
//! set from the ledger, discovering new crash files, and running the pure
//! submission builder over them. No network is touched here.

use std::{collections::HashMap, sync::Arc};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{
    domain::{build_reports, CrashReport, ReportMeta},
    ports::{ICrashStore, ILedger},
};

/// Use case for assembling the pending crash reports of one cycle
///
/// Coordinates the crash store and the ledger so that processed files are
/// never re-offered and stored comments travel with their report.
pub struct CollectReportsUseCase {
    crash_store: Arc<dyn ICrashStore + Send + Sync>,
    ledger: Arc<dyn ILedger + Send + Sync>,
}

impl CollectReportsUseCase {
    /// Creates a new CollectReportsUseCase with the required dependencies
    ///
    /// # Arguments
    ///
    /// * `crash_store` - Discovery over the crash-capture directory
    /// * `ledger` - Durable processed-state bookkeeping
    pub fn new(
        crash_store: Arc<dyn ICrashStore + Send + Sync>,
        ledger: Arc<dyn ILedger + Send + Sync>,
    ) -> Self {
        Self {
            crash_store,
            ledger,
        }
    }

    /// Assembles the reports for all new crash files
    ///
    /// This method:
    /// 1. Reads the processed names from the ledger as the exclusion set
    /// 2. Lists crash files newer than `since`, capped at `limit`
    /// 3. Fetches the stored comment for each discovered file
    /// 4. Runs the pure builder to merge files, comments, and metadata
    ///
    /// # Arguments
    ///
    /// * `since` - Oldest modification time still considered new
    /// * `limit` - Maximum number of files per cycle
    /// * `meta` - Caller-supplied run-time metadata
    ///
    /// # Returns
    ///
    /// The built reports, oldest crash first; empty when nothing is new
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read
    pub async fn execute(
        &self,
        since: DateTime<Utc>,
        limit: usize,
        meta: &ReportMeta,
    ) -> Result<Vec<CrashReport>> {
        // Step 1: Processed files are excluded regardless of their mtime
        let excluded = self
            .ledger
            .processed_names()
            .await
            .context("Failed to read processed names from ledger")?;

        // Step 2: Discover new crash files
        let files = self
            .crash_store
            .list_new_crash_files(since, &excluded, limit)
            .await
            .context("Failed to list new crash files")?;

        if files.is_empty() {
            debug!("No new crash files discovered");
            return Ok(Vec::new());
        }

        // Step 3: Collect stored comments for the discovered files
        let mut comments = HashMap::new();
        for file in &files {
            let stored = self
                .ledger
                .comment(file.file_name())
                .await
                .with_context(|| {
                    format!("Failed to read stored comment for {}", file.file_name())
                })?;
            if let Some(text) = stored {
                comments.insert(file.file_name().to_string(), text);
            }
        }

        debug!(count = files.len(), "Building reports for new crash files");

        // Step 4: Pure merge; parse failures degrade inside the builder
        Ok(build_reports(&files, &comments, meta))
    }

    /// Whether any unreported crash file exists
    ///
    /// Backed by the same discovery path with `limit = 1`; used by hosts
    /// for the "did the user see unreported crashes" check without paying
    /// for a full collection pass.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read
    pub async fn has_new_crashes(&self, since: DateTime<Utc>) -> Result<bool> {
        let excluded = self
            .ledger
            .processed_names()
            .await
            .context("Failed to read processed names from ledger")?;

        let files = self
            .crash_store
            .list_new_crash_files(since, &excluded, 1)
            .await
            .context("Failed to probe for new crash files")?;

        Ok(!files.is_empty())
    }
}
