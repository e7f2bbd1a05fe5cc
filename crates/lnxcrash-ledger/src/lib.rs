//! LNXCrash Ledger - Processed-state persistence
//!
//! SQLite-based ledger recording:
//! - Which crash files have already been offered to the server
//! - When they were marked processed
//! - Pending user comments awaiting submission
//!
//! ## Architecture
//!
//! This crate implements the `ILedger` port from `lnxcrash-core` using
//! SQLite as the storage backend. It is a driven (secondary) adapter in
//! the hexagonal architecture.
//!
//! ## Key Components
//!
//! - [`SqliteLedger`] - Full `ILedger` implementation owning its pool
//! - [`LedgerError`] - Error types for ledger operations
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use lnxcrash_ledger::SqliteLedger;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let ledger = SqliteLedger::open(Path::new("/home/user/.local/share/lnxcrash/ledger.db")).await?;
//! // Use ledger as ILedger...
//! # Ok(())
//! # }
//! ```

pub mod repository;

pub use repository::SqliteLedger;

/// Errors that can occur during ledger operations
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Failed to establish a database connection
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A database query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Schema migration failed
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        LedgerError::QueryFailed(e.to_string())
    }
}
