//! Crash store port (driven/secondary port)
//!
//! This module defines the interface for enumerating on-disk crash files.
//! The files themselves are owned by the external crash-capture
//! collaborator; the store only reads.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::domain::CrashFile;

/// Port trait for crash file discovery
///
/// ## Implementation Notes
///
/// - Discovery failure (directory missing or unreadable) is not an error:
///   implementations log it and return an empty list, because a host
///   application must never fail just because crash reporting cannot run.
/// - Individual files that cannot be read are skipped, not fatal.
#[async_trait::async_trait]
pub trait ICrashStore: Send + Sync {
    /// Lists crash files newer than `since`, excluding known names
    ///
    /// Scans the configured directory (non-recursive), drops files whose
    /// name is in `excluded` or whose modification time is strictly older
    /// than `since`, orders the rest oldest-first, and caps the result at
    /// `limit`.
    async fn list_new_crash_files(
        &self,
        since: DateTime<Utc>,
        excluded: &HashSet<String>,
        limit: usize,
    ) -> anyhow::Result<Vec<CrashFile>>;
}
