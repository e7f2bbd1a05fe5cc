//! Processed-state ledger port (driven/secondary port)
//!
//! This module defines the interface for the durable record of which crash
//! files have been submitted or dismissed, and of pending user comments.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because storage errors are adapter-specific and
//!   need no domain-level classification; what matters is that a write
//!   failure is visible to the caller, never swallowed.
//! - Records are keyed by crash-file name. A file marked processed must
//!   stay excluded from discovery across process restarts.
//! - A failed `mark_processed` must leave the affected files eligible for
//!   re-offer (at-least-once toward the server); duplicate submissions are
//!   acceptable, silent loss is not.

use std::collections::HashSet;

/// Port trait for durable processed-state bookkeeping
#[async_trait::async_trait]
pub trait ILedger: Send + Sync {
    /// Whether a submission attempt has been durably recorded for this file
    async fn is_processed(&self, file_name: &str) -> anyhow::Result<bool>;

    /// Durably marks the given files as processed
    ///
    /// Idempotent; the batch is atomic, so a failure leaves every file in
    /// its previous state. Must not discard a stored comment.
    async fn mark_processed(&self, file_names: &[String]) -> anyhow::Result<()>;

    /// Associates a free-text comment with a not-yet-submitted file
    ///
    /// Idempotent overwrite; must not flip the processed flag.
    async fn store_comment(&self, file_name: &str, comment: &str) -> anyhow::Result<()>;

    /// The stored comment for a file, if any
    async fn comment(&self, file_name: &str) -> anyhow::Result<Option<String>>;

    /// All file names currently marked processed
    ///
    /// Used to seed the discovery exclusion set at the start of a cycle.
    async fn processed_names(&self) -> anyhow::Result<HashSet<String>>;
}
