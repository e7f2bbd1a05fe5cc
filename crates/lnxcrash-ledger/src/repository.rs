//! SQLite implementation of ILedger
//!
//! This module provides the concrete SQLite-based implementation of the
//! processed-state ledger port defined in lnxcrash-core.
//!
//! ## Type Mapping
//!
//! | Domain Type   | SQL Type | Strategy                                    |
//! |---------------|----------|---------------------------------------------|
//! | file name     | TEXT     | stored verbatim, primary key                |
//! | processed     | INTEGER  | 0/1 flag                                    |
//! | comment       | TEXT     | nullable, stored verbatim                   |
//! | DateTime<Utc> | TEXT     | ISO 8601 via `to_rfc3339()`                 |
//!
//! ## Upsert Discipline
//!
//! A row can be created by either `mark_processed` or `store_comment`,
//! in either order. Both therefore use `ON CONFLICT ... DO UPDATE` with
//! an explicit column list so that marking a file processed never clears
//! its comment, and storing a comment never flips the processed flag.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use lnxcrash_core::ports::ILedger;

use crate::LedgerError;

/// SQLite-backed processed-state ledger
///
/// Owns its connection pool; one instance per database file is enough for
/// the whole process, all operations go through the pool.
pub struct SqliteLedger {
    pool: SqlitePool,
}

impl SqliteLedger {
    /// Open (or create) the ledger database at `db_path`
    ///
    /// Missing parent directories are created, the schema is migrated, and
    /// WAL journal mode is enabled so a reader never blocks the writer. A
    /// 5-second busy timeout absorbs short write contention.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ConnectionFailed` if the file or its directory
    /// cannot be opened, `LedgerError::MigrationFailed` if the schema
    /// migration fails.
    pub async fn open(db_path: &Path) -> Result<Self, LedgerError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LedgerError::ConnectionFailed(format!(
                    "Failed to create ledger directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| {
                LedgerError::ConnectionFailed(format!(
                    "Failed to open ledger at {}: {}",
                    db_path.display(),
                    e
                ))
            })?;

        Self::migrate(&pool).await?;
        tracing::info!(path = %db_path.display(), "Ledger opened");

        Ok(Self { pool })
    }

    /// Open an in-memory ledger, used by tests
    ///
    /// Capped at one connection: an in-memory SQLite database lives and
    /// dies with its connection, so a second one would see an empty schema.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ConnectionFailed` or
    /// `LedgerError::MigrationFailed` like [`SqliteLedger::open`].
    pub async fn open_in_memory() -> Result<Self, LedgerError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| {
                LedgerError::ConnectionFailed(format!("Failed to open in-memory ledger: {}", e))
            })?;

        Self::migrate(&pool).await?;

        Ok(Self { pool })
    }

    /// Close the underlying pool, flushing WAL state to the database file
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn migrate(pool: &SqlitePool) -> Result<(), LedgerError> {
        sqlx::raw_sql(include_str!("migrations/20260815_initial.sql"))
            .execute(pool)
            .await
            .map_err(|e| LedgerError::MigrationFailed(format!("Schema migration failed: {}", e)))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ILedger for SqliteLedger {
    async fn is_processed(&self, file_name: &str) -> anyhow::Result<bool> {
        let processed: Option<i64> =
            sqlx::query_scalar("SELECT processed FROM crash_reports WHERE file_name = ?")
                .bind(file_name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(processed == Some(1))
    }

    async fn mark_processed(&self, file_names: &[String]) -> anyhow::Result<()> {
        if file_names.is_empty() {
            return Ok(());
        }

        let now = Utc::now().to_rfc3339();

        // One transaction for the whole batch so a mid-batch failure leaves
        // every file in its previous state.
        let mut tx = self.pool.begin().await?;
        for file_name in file_names {
            sqlx::query(
                "INSERT INTO crash_reports (file_name, processed, processed_at, updated_at) \
                 VALUES (?, 1, ?, ?) \
                 ON CONFLICT(file_name) DO UPDATE SET \
                   processed = 1, \
                   processed_at = excluded.processed_at, \
                   updated_at = excluded.updated_at",
            )
            .bind(file_name)
            .bind(&now)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::trace!(count = file_names.len(), "Marked files processed");
        Ok(())
    }

    async fn store_comment(&self, file_name: &str, comment: &str) -> anyhow::Result<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO crash_reports (file_name, processed, comment, updated_at) \
             VALUES (?, 0, ?, ?) \
             ON CONFLICT(file_name) DO UPDATE SET \
               comment = excluded.comment, \
               updated_at = excluded.updated_at",
        )
        .bind(file_name)
        .bind(comment)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::trace!(file = %file_name, "Stored comment");
        Ok(())
    }

    async fn comment(&self, file_name: &str) -> anyhow::Result<Option<String>> {
        let comment: Option<Option<String>> =
            sqlx::query_scalar("SELECT comment FROM crash_reports WHERE file_name = ?")
                .bind(file_name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(comment.flatten())
    }

    async fn processed_names(&self) -> anyhow::Result<HashSet<String>> {
        let rows = sqlx::query("SELECT file_name FROM crash_reports WHERE processed = 1")
            .fetch_all(&self.pool)
            .await?;

        let mut names = HashSet::with_capacity(rows.len());
        for row in &rows {
            let name: String = row.get("file_name");
            names.insert(name);
        }

        Ok(names)
    }
}
