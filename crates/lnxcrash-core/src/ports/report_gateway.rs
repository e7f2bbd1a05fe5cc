//! Report gateway port (driven/secondary port)
//!
//! This module defines the interface for the network exchange with the
//! crash-ingestion server. The submission URL, wire dialect, and timeout
//! are adapter construction state; per-call inputs are only the data that
//! varies per exchange.
//!
//! ## Design Notes
//!
//! - Transport failure is not an `Err`: it is the
//!   [`SubmitOutcome::NetworkError`] value, so callers can distinguish
//!   "server rejected" from "could not reach server" without inspecting
//!   error chains. `Err` is reserved for local conditions such as payload
//!   serialization failure.
//! - The gateway performs no persistence. Marking files processed after a
//!   server verdict is the caller's job, which keeps network and ledger
//!   concerns separately testable.
//! - Both calls are bounded by the configured timeout and resolve to
//!   `NetworkError` on expiry; they never hang. Dropping the returned
//!   future aborts the in-flight request.

use crate::domain::{CrashReport, FeedbackToken, SubmitOutcome};

/// Port trait for the crash-ingestion server exchange
#[async_trait::async_trait]
pub trait IReportGateway: Send + Sync {
    /// Submits all reports in one request and parses the reply
    ///
    /// The serialized payload is deterministic for identical reports.
    async fn submit(&self, reports: &[CrashReport]) -> anyhow::Result<SubmitOutcome>;

    /// Polls the server-side verdict for an earlier deferred submission
    ///
    /// Issues a single request keyed by `token`; the reply uses the same
    /// status vocabulary as `submit`. Cadence (honoring the advertised
    /// delay, backoff, give-up) is the caller's concern.
    async fn check_feedback(&self, token: &FeedbackToken) -> anyhow::Result<SubmitOutcome>;
}
