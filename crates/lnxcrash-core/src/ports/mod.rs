//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`ICrashStore`] - Crash file discovery over the capture directory
//! - [`ILedger`] - Durable processed-state and comment bookkeeping
//! - [`IReportGateway`] - Network exchange with the ingestion server

pub mod crash_store;
pub mod ledger;
pub mod report_gateway;

pub use crash_store::ICrashStore;
pub use ledger::ILedger;
pub use report_gateway::IReportGateway;
