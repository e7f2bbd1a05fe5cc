//! Crash directory scanner (secondary/driven adapter)
//!
//! Implements [`ICrashStore`] using `tokio::fs` for async directory and file
//! operations.
//!
//! ## Design Decisions
//!
//! - **Flat scan**: Only direct children of the crash directory are
//!   considered; subdirectories are never descended into.
//! - **Missing directory is not an error**: A crash directory that does not
//!   exist (or cannot be read) simply means there is nothing to submit yet;
//!   the scan returns an empty list and logs at debug level.
//! - **Lossy content decoding**: Crash files come from a collaborator we do
//!   not control, so invalid UTF-8 sequences are replaced rather than
//!   rejected.
//! - **Deterministic ordering**: Candidates are sorted by modification time
//!   (oldest first) with the file name as tie-breaker, so repeated scans of
//!   an unchanged directory return the same sequence.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use lnxcrash_core::{domain::CrashFile, ports::ICrashStore};
use tracing::{debug, instrument, warn};

// ============================================================================
// DirCrashStore struct
// ============================================================================

/// Adapter that bridges the [`ICrashStore`] port to a crash directory on
/// the local filesystem.
#[derive(Debug, Clone)]
pub struct DirCrashStore {
    /// Directory scanned for crash files.
    crash_dir: PathBuf,
    /// Suffix a file name must carry to be considered a crash file.
    file_suffix: String,
}

impl DirCrashStore {
    /// Create a new `DirCrashStore` over `crash_dir`, matching files whose
    /// name ends with `file_suffix`.
    #[must_use]
    pub fn new(crash_dir: PathBuf, file_suffix: impl Into<String>) -> Self {
        Self {
            crash_dir,
            file_suffix: file_suffix.into(),
        }
    }

    /// The directory this store scans.
    #[must_use]
    pub fn crash_dir(&self) -> &std::path::Path {
        &self.crash_dir
    }
}

/// A directory entry that passed the name, age, and exclusion filters and
/// is waiting to have its content read.
struct Candidate {
    path: PathBuf,
    file_name: String,
    modified_at: DateTime<Utc>,
}

/// Convert a filesystem modification time to `DateTime<Utc>`.
fn system_time_to_utc(st: std::time::SystemTime) -> Option<DateTime<Utc>> {
    st.duration_since(std::time::UNIX_EPOCH)
        .ok()
        .and_then(|dur| DateTime::from_timestamp(dur.as_secs() as i64, dur.subsec_nanos()))
}

// ============================================================================
// ICrashStore implementation
// ============================================================================

#[async_trait::async_trait]
impl ICrashStore for DirCrashStore {
    #[instrument(skip(self, excluded), fields(dir = %self.crash_dir.display()))]
    async fn list_new_crash_files(
        &self,
        since: DateTime<Utc>,
        excluded: &HashSet<String>,
        limit: usize,
    ) -> anyhow::Result<Vec<CrashFile>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        debug!(%since, limit, excluded = excluded.len(), "scanning crash directory");

        let mut read_dir = match tokio::fs::read_dir(&self.crash_dir).await {
            Ok(rd) => rd,
            Err(e) => {
                // A crash directory only appears once the first crash has
                // been captured, so an unreadable directory means no work.
                debug!(error = %e, "crash directory not readable, nothing to submit");
                return Ok(Vec::new());
            }
        };

        let mut candidates: Vec<Candidate> = Vec::new();
        loop {
            let entry = match read_dir.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "directory iteration failed, using entries seen so far");
                    break;
                }
            };

            let file_name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => {
                    warn!(entry = ?entry.file_name(), "skipping non-UTF-8 file name");
                    continue;
                }
            };

            if !file_name.ends_with(&self.file_suffix) {
                continue;
            }
            if excluded.contains(&file_name) {
                continue;
            }

            let metadata = match entry.metadata().await {
                Ok(m) => m,
                Err(e) => {
                    warn!(file = %file_name, error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            // Flat scan: never descend into subdirectories.
            if !metadata.is_file() {
                continue;
            }

            let modified_at = match metadata.modified().ok().and_then(system_time_to_utc) {
                Some(ts) => ts,
                None => {
                    warn!(file = %file_name, "skipping entry without modification time");
                    continue;
                }
            };
            if modified_at < since {
                continue;
            }

            candidates.push(Candidate {
                path: entry.path(),
                file_name,
                modified_at,
            });
        }

        // Oldest first, file name as tie-breaker for equal timestamps.
        candidates.sort_by(|a, b| {
            a.modified_at
                .cmp(&b.modified_at)
                .then_with(|| a.file_name.cmp(&b.file_name))
        });

        let mut files = Vec::new();
        for candidate in candidates {
            if files.len() == limit {
                break;
            }
            let bytes = match tokio::fs::read(&candidate.path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(file = %candidate.file_name, error = %e, "skipping unreadable file");
                    continue;
                }
            };
            let content = String::from_utf8_lossy(&bytes).into_owned();
            match CrashFile::new(candidate.path, content, candidate.modified_at) {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!(file = %candidate.file_name, error = %e, "skipping invalid crash file");
                }
            }
        }

        debug!(count = files.len(), "scan complete");
        Ok(files)
    }
}

// ============================================================================
// Unit tests
// ============================================================================
