//! LNXCrash Wire - Crash-ingestion server protocol
//!
//! Provides the async client for:
//! - Serializing crash reports into the XML submission payload
//! - Submitting payloads over both wire dialects (custom server, hosted backend)
//! - Parsing server replies into domain `SubmitOutcome` values
//! - Polling deferred verdicts by feedback token
//!
//! ## Modules
//!
//! - [`payload`] - Outbound XML document construction
//! - [`response`] - Inbound XML reply parsing
//! - [`gateway`] - HTTP gateway implementing the `IReportGateway` port

pub mod gateway;
pub mod payload;
pub mod response;

pub use gateway::{Dialect, GatewayConfig, HttpReportGateway};

use thiserror::Error;

/// Errors that can occur while encoding or decoding wire payloads
///
/// Transport-level failures are not represented here; the gateway maps
/// those to the domain `SubmitOutcome::NetworkError` value instead.
#[derive(Debug, Error)]
pub enum WireError {
    /// The XML request body could not be constructed
    #[error("Payload serialization failed: {0}")]
    Payload(String),

    /// The server reply could not be parsed into a status
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
