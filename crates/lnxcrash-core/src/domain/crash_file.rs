//! CrashFile domain entity
//!
//! A crash file is the raw artifact written by the external crash-capture
//! collaborator, one file per abnormal termination. The core never mutates
//! or deletes crash files; it reads them and keys all processed-state
//! bookkeeping on the file name.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// An on-disk crash artifact as seen by the discovery scan
///
/// Identity is the absolute path; the file name component is what the
/// processed-state ledger records, so construction rejects paths without
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrashFile {
    path: PathBuf,
    file_name: String,
    content: String,
    modified_at: DateTime<Utc>,
}

impl CrashFile {
    /// Create a new CrashFile
    ///
    /// # Errors
    /// Returns `DomainError::InvalidCrashPath` if the path is relative or
    /// has no final file-name component
    pub fn new(
        path: PathBuf,
        content: String,
        modified_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if !path.is_absolute() {
            return Err(DomainError::InvalidCrashPath(format!(
                "Crash file path must be absolute: {}",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                DomainError::InvalidCrashPath(format!(
                    "Crash file path has no usable file name: {}",
                    path.display()
                ))
            })?;

        Ok(Self {
            path,
            file_name,
            content,
            modified_at,
        })
    }

    /// Absolute path of the crash file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component, the identity used by the ledger
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Raw crash text
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Last-modified timestamp as reported by the filesystem
    #[must_use]
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CrashFile {
        CrashFile::new(
            PathBuf::from("/var/crashes/app-2026-08-01.crash"),
            "Process: app\nVersion: 1.0 (108)\n".to_string(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_extracts_file_name() {
        let file = sample();
        assert_eq!(file.file_name(), "app-2026-08-01.crash");
    }

    #[test]
    fn test_relative_path_fails() {
        let result = CrashFile::new(
            PathBuf::from("crashes/app.crash"),
            String::new(),
            Utc::now(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_path_without_file_name_fails() {
        let result = CrashFile::new(PathBuf::from("/"), String::new(), Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn test_accessors() {
        let file = sample();
        assert!(file.content().contains("Version: 1.0 (108)"));
        assert_eq!(file.path(), Path::new("/var/crashes/app-2026-08-01.crash"));
    }
}
