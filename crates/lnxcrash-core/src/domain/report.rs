//! CrashReport value object and report lifecycle
//!
//! A CrashReport is the transient, per-submission-attempt view over one
//! crash file: raw text merged with parsed version fields, the stored user
//! comment, and caller-supplied run-time metadata. It is built fresh for
//! every cycle and discarded after the exchange.
//!
//! ## Lifecycle
//!
//! ```text
//!  Discovered ──► Built ──► Submitting ──┬──► Accepted ──► Processed
//!       ▲                                ├──► Rejected ──► Processed
//!       │                                └──► NetworkError
//!       └────────────────────────────────────────┘
//! ```
//!
//! `NetworkError` returns the report to `Discovered` for the next run; the
//! ledger is only touched on the two `Processed` edges.
//!
//! Queued submissions additionally carry a feedback token that is polled
//! independently of this cycle. A later feedback verdict never re-opens the
//! already-processed ledger record.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::newtypes::AppVersion;

/// Upper bound on console-log bytes carried in one report
///
/// Pathological logs are cut to the most recent portion so a single report
/// can never blow up the request body.
pub const MAX_CONSOLE_LOG_BYTES: usize = 50_000;

/// Caller-supplied metadata merged into every report of a run
///
/// All fields are opaque strings owned by the excluded identity and
/// log-capture collaborators; the core forwards them verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportMeta {
    /// Display name of the host application
    pub app_name: String,
    /// Reverse-DNS bundle identifier of the host application
    pub bundle_identifier: String,
    /// OS version string of the machine that crashed
    pub system_version: String,
    /// Hardware/platform description
    pub platform: String,
    /// Version of this reporting library
    pub sender_version: String,
    /// Currently installed application version, used as the payload
    /// fallback when the crash log yields no version of its own
    pub app_version: Option<AppVersion>,
    /// Opaque user identity
    pub user_id: String,
    /// Opaque user contact field
    pub contact: String,
    /// Captured console log for this run (truncated at build time)
    pub console_log: String,
    /// Host-application log excerpt for this run
    pub application_log: String,
}

/// One outbound crash report, ready for wire serialization
///
/// Produced by the submission builder; every field the wire dialects need
/// is present here so the gateway performs no lookups of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashReport {
    /// File name of the originating crash file, the ledger identity
    pub file_name: String,
    /// Display name of the host application
    pub app_name: String,
    /// Reverse-DNS bundle identifier
    pub bundle_identifier: String,
    /// OS version of the crashed machine
    pub system_version: String,
    /// Hardware/platform description
    pub platform: String,
    /// Version of this reporting library
    pub sender_version: String,
    /// Build number of the crashed application, best effort
    pub version: Option<AppVersion>,
    /// Marketing version of the crashed application, best effort
    pub short_version: Option<AppVersion>,
    /// Raw crash text
    pub log: String,
    /// Opaque user identity
    pub user_id: String,
    /// Opaque user contact field
    pub contact: String,
    /// Free-text comment stored for this file, if any
    pub comment: Option<String>,
    /// Console log, already truncated to [`MAX_CONSOLE_LOG_BYTES`]
    pub console_log: String,
    /// Host-application log excerpt
    pub application_log: String,
}

// ============================================================================
// Report lifecycle state
// ============================================================================

/// Lifecycle state of one report across a submission cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportState {
    /// Crash file found by discovery, not yet built
    #[default]
    Discovered,
    /// Payload assembled, ready for the wire
    Built,
    /// Network exchange in flight
    Submitting,
    /// Server took the report (any non-rejection status)
    Accepted,
    /// Server refused the report
    Rejected,
    /// No server verdict was received; retry next run
    NetworkError,
    /// Durably recorded in the ledger; never re-offered
    Processed,
}

impl ReportState {
    /// True once the ledger has recorded this report
    #[must_use]
    pub fn is_processed(&self) -> bool {
        matches!(self, ReportState::Processed)
    }

    /// True while a retry on a later run is still expected
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, ReportState::Discovered | ReportState::NetworkError)
    }

    /// Whether `next` is a legal successor of this state
    #[must_use]
    pub fn can_advance_to(&self, next: &ReportState) -> bool {
        use ReportState::*;
        matches!(
            (self, next),
            (Discovered, Built)
                | (Built, Submitting)
                | (Submitting, Accepted)
                | (Submitting, Rejected)
                | (Submitting, NetworkError)
                | (Accepted, Processed)
                | (Rejected, Processed)
                | (NetworkError, Discovered)
        )
    }

    /// State name for logs and output
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ReportState::Discovered => "Discovered",
            ReportState::Built => "Built",
            ReportState::Submitting => "Submitting",
            ReportState::Accepted => "Accepted",
            ReportState::Rejected => "Rejected",
            ReportState::NetworkError => "NetworkError",
            ReportState::Processed => "Processed",
        }
    }
}

impl fmt::Display for ReportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod report_state_tests {
        use super::*;

        #[test]
        fn test_happy_path_edges() {
            use ReportState::*;
            assert!(Discovered.can_advance_to(&Built));
            assert!(Built.can_advance_to(&Submitting));
            assert!(Submitting.can_advance_to(&Accepted));
            assert!(Accepted.can_advance_to(&Processed));
        }

        #[test]
        fn test_rejection_still_ends_processed() {
            use ReportState::*;
            assert!(Submitting.can_advance_to(&Rejected));
            assert!(Rejected.can_advance_to(&Processed));
        }

        #[test]
        fn test_network_error_returns_to_discovered() {
            use ReportState::*;
            assert!(Submitting.can_advance_to(&NetworkError));
            assert!(NetworkError.can_advance_to(&Discovered));
            assert!(!NetworkError.can_advance_to(&Processed));
        }

        #[test]
        fn test_processed_is_terminal() {
            use ReportState::*;
            for next in [
                Discovered,
                Built,
                Submitting,
                Accepted,
                Rejected,
                NetworkError,
                Processed,
            ] {
                assert!(!Processed.can_advance_to(&next));
            }
        }

        #[test]
        fn test_no_skipping_submission() {
            use ReportState::*;
            assert!(!Discovered.can_advance_to(&Accepted));
            assert!(!Built.can_advance_to(&Processed));
        }

        #[test]
        fn test_retryable_classification() {
            assert!(ReportState::Discovered.is_retryable());
            assert!(ReportState::NetworkError.is_retryable());
            assert!(!ReportState::Processed.is_retryable());
            assert!(!ReportState::Accepted.is_retryable());
        }
    }
}
