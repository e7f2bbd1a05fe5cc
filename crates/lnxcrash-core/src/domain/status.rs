//! Server status vocabulary and submission outcomes
//!
//! The ingestion server answers every exchange with a signed integer status
//! code. Negative codes are failure classes, zero is unknown, positive codes
//! are server-side triage progress. The one exception is `Queued` (-80),
//! which means the report is waiting in the retrieval queue and a feedback
//! token may accompany it.
//!
//! Transport failures are deliberately not part of this vocabulary: a
//! submission resolves to either a [`SubmitOutcome::Server`] reply carrying
//! a status, or [`SubmitOutcome::NetworkError`] when no server opinion was
//! received at all.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::newtypes::FeedbackToken;

/// Server-assigned status of a submitted crash report
///
/// The numeric values are the server contract and must not change. Codes
/// the client does not recognize fold into `Unknown` so that a newer server
/// can never break response parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum SubmissionStatus {
    /// Report is waiting in the retrieval queue; a feedback token may follow
    Queued,
    /// The crashed application version is no longer maintained
    VersionDiscontinued,
    /// The reporting library version is not accepted by the server
    XmlSenderVersionNotAllowed,
    /// The crashed application version string was rejected
    XmlVersionNotAllowed,
    /// A server-internal storage failure, raw code retained
    ServerInternalError(i32),
    /// The POST carried no usable payload
    InvalidPostData,
    /// The payload XML could not be interpreted
    InvalidIncomingData,
    /// The server's database is not reachable
    DatabaseUnavailable,
    /// No verdict, or a code this client does not recognize
    Unknown,
    /// Report is assigned to an existing crash group
    Assigned,
    /// Report stored, awaiting triage
    Submitted,
    /// A fix is available for this crash
    Available,
}

/// Inclusive range of server-internal SQL-layer failure codes
const SERVER_INTERNAL_RANGE: std::ops::RangeInclusive<i32> = -18..=-10;

impl SubmissionStatus {
    /// Map a wire code to a status; total, never fails
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            -80 => Self::Queued,
            -30 => Self::VersionDiscontinued,
            -21 => Self::XmlSenderVersionNotAllowed,
            -20 => Self::XmlVersionNotAllowed,
            c if SERVER_INTERNAL_RANGE.contains(&c) => Self::ServerInternalError(c),
            -3 => Self::InvalidPostData,
            -2 => Self::InvalidIncomingData,
            -1 => Self::DatabaseUnavailable,
            1 => Self::Assigned,
            2 => Self::Submitted,
            3 => Self::Available,
            _ => Self::Unknown,
        }
    }

    /// The wire code for this status
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::Queued => -80,
            Self::VersionDiscontinued => -30,
            Self::XmlSenderVersionNotAllowed => -21,
            Self::XmlVersionNotAllowed => -20,
            Self::ServerInternalError(code) => *code,
            Self::InvalidPostData => -3,
            Self::InvalidIncomingData => -2,
            Self::DatabaseUnavailable => -1,
            Self::Unknown => 0,
            Self::Assigned => 1,
            Self::Submitted => 2,
            Self::Available => 3,
        }
    }

    /// True when the server rejected the submission outright
    ///
    /// `Queued` is negative on the wire but is a deferral, not a rejection.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        self.code() < 0 && !matches!(self, Self::Queued)
    }

    /// True when the verdict is deferred and a feedback token may accompany
    /// the reply
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Queued | Self::Assigned)
    }

    /// Status name without embedded codes
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Queued => "Queued",
            Self::VersionDiscontinued => "VersionDiscontinued",
            Self::XmlSenderVersionNotAllowed => "XmlSenderVersionNotAllowed",
            Self::XmlVersionNotAllowed => "XmlVersionNotAllowed",
            Self::ServerInternalError(_) => "ServerInternalError",
            Self::InvalidPostData => "InvalidPostData",
            Self::InvalidIncomingData => "InvalidIncomingData",
            Self::DatabaseUnavailable => "DatabaseUnavailable",
            Self::Unknown => "Unknown",
            Self::Assigned => "Assigned",
            Self::Submitted => "Submitted",
            Self::Available => "Available",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

impl From<i32> for SubmissionStatus {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

impl From<SubmissionStatus> for i32 {
    fn from(status: SubmissionStatus) -> Self {
        status.code()
    }
}

// ============================================================================
// Submission outcome
// ============================================================================

/// A parsed server reply to a submission or feedback exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerReply {
    /// Server-assigned status
    pub status: SubmissionStatus,
    /// Opaque token for later feedback polling, present only when the
    /// verdict is deferred
    pub feedback_token: Option<FeedbackToken>,
    /// How long the server asks the client to wait before polling
    pub feedback_delay: Option<Duration>,
}

impl ServerReply {
    /// A reply carrying only a status
    #[must_use]
    pub fn status_only(status: SubmissionStatus) -> Self {
        Self {
            status,
            feedback_token: None,
            feedback_delay: None,
        }
    }
}

/// Result of one network exchange with the ingestion server
///
/// Keeps transport failure distinct from a server opinion: only a
/// `Server(..)` outcome may mark crash files processed, `NetworkError`
/// always leaves them eligible for the next run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Timeout, connection failure, or an unparseable response body; no
    /// server verdict was received
    NetworkError(String),
    /// The server answered with a status
    Server(ServerReply),
}

impl SubmitOutcome {
    /// True when no server verdict was received
    #[must_use]
    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError(_))
    }

    /// The server reply, if one was received
    #[must_use]
    pub fn server_reply(&self) -> Option<&ServerReply> {
        match self {
            Self::Server(reply) => Some(reply),
            Self::NetworkError(_) => None,
        }
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkError(reason) => write!(f, "network error: {}", reason),
            Self::Server(reply) => write!(f, "server status {}", reply.status),
        }
    }
}
