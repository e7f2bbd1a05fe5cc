//! Domain entities and business logic
//!
//! This module contains the core domain types for lnxcrash:
//! - Newtypes for validated version strings, tokens, and identifiers
//! - Crash file and crash report types
//! - The crash log version parser
//! - The pure submission builder
//! - Server status vocabulary and submission outcomes
//! - Domain-specific error types

pub mod builder;
pub mod crash_file;
pub mod errors;
pub mod log_parser;
pub mod newtypes;
pub mod report;
pub mod status;

// Re-export commonly used types
pub use builder::{build_reports, truncate_to_tail};
pub use crash_file::CrashFile;
pub use errors::DomainError;
pub use log_parser::{parse_version, ParsedVersions};
pub use newtypes::{AppIdentifier, AppVersion, FeedbackToken};
pub use report::{CrashReport, ReportMeta, ReportState, MAX_CONSOLE_LOG_BYTES};
pub use status::{ServerReply, SubmissionStatus, SubmitOutcome};
