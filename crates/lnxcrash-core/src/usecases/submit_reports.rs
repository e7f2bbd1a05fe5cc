//! Report submission use case
//!
//! Orchestrates the network half of a submission cycle: one gateway
//! exchange for the whole batch, then the ledger update. The ordering is
//! the at-least-once guarantee: files are marked processed only after a
//! server verdict, so a timeout, a cancellation (dropping the future), or
//! a crash mid-cycle re-offers them on the next run.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::{
    domain::{CrashReport, SubmitOutcome},
    ports::{ILedger, IReportGateway},
};

/// Use case for submitting built reports and recording the outcome
///
/// Callers run at most one cycle at a time; the ledger is not designed for
/// concurrent writers over overlapping file sets.
pub struct SubmitReportsUseCase {
    gateway: Arc<dyn IReportGateway + Send + Sync>,
    ledger: Arc<dyn ILedger + Send + Sync>,
}

impl SubmitReportsUseCase {
    /// Creates a new SubmitReportsUseCase with the required dependencies
    ///
    /// # Arguments
    ///
    /// * `gateway` - Network exchange with the ingestion server
    /// * `ledger` - Durable processed-state bookkeeping
    pub fn new(
        gateway: Arc<dyn IReportGateway + Send + Sync>,
        ledger: Arc<dyn ILedger + Send + Sync>,
    ) -> Self {
        Self { gateway, ledger }
    }

    /// Submits the batch and marks it processed on any server verdict
    ///
    /// This method:
    /// 1. Returns `None` without touching the network when `reports` is
    ///    empty
    /// 2. Performs the single gateway exchange for the whole batch
    /// 3. On a `Server(..)` outcome — acceptance or rejection alike —
    ///    durably marks every submitted file processed (the server saw the
    ///    request; resubmission would not help)
    /// 4. On `NetworkError` leaves the ledger untouched so the next run
    ///    retries
    ///
    /// # Returns
    ///
    /// `None` when there was nothing to submit, otherwise the outcome of
    /// the exchange
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange cannot be attempted or if the
    /// ledger write fails after a server verdict; in the latter case the
    /// files remain unmarked and will be re-offered (at-least-once)
    pub async fn execute(&self, reports: &[CrashReport]) -> Result<Option<SubmitOutcome>> {
        // Step 1: An empty cycle makes no network call at all
        if reports.is_empty() {
            debug!("No reports to submit");
            return Ok(None);
        }

        // Step 2: One exchange for the whole batch
        let outcome = self
            .gateway
            .submit(reports)
            .await
            .context("Failed to perform submission exchange")?;

        // Step 3/4: Only a server verdict marks files processed
        match &outcome {
            SubmitOutcome::Server(reply) => {
                let names: Vec<String> = reports.iter().map(|r| r.file_name.clone()).collect();
                self.ledger
                    .mark_processed(&names)
                    .await
                    .with_context(|| {
                        format!(
                            "Server answered {} but marking {} file(s) processed failed",
                            reply.status,
                            names.len()
                        )
                    })?;
                info!(status = %reply.status, count = names.len(), "Submission recorded");
            }
            SubmitOutcome::NetworkError(reason) => {
                warn!(%reason, "Submission failed at transport level; will retry next run");
            }
        }

        Ok(Some(outcome))
    }

    /// Stores a user comment for a not-yet-submitted crash file
    ///
    /// Passthrough to the ledger so the presentation collaborator never
    /// holds a persistence handle of its own.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger write fails
    pub async fn store_user_comment(&self, file_name: &str, comment: &str) -> Result<()> {
        self.ledger
            .store_comment(file_name, comment)
            .await
            .with_context(|| format!("Failed to store comment for {file_name}"))
    }
}
