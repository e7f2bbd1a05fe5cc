//! Use cases (interactors) for lnxcrash
//!
//! This module contains the application use cases that orchestrate
//! domain entities and port interfaces. Use cases are thin coordinators
//! that delegate business rules to domain functions and I/O to ports.
//!
//! ## Use Cases
//!
//! - [`CollectReportsUseCase`] - Discovery, dedup, and report building
//! - [`SubmitReportsUseCase`] - Batch submission and processed-state update
//! - [`CheckFeedbackUseCase`] - Deferred-verdict polling by token

pub mod check_feedback;
pub mod collect_reports;
pub mod submit_reports;

pub use check_feedback::CheckFeedbackUseCase;
pub use collect_reports::CollectReportsUseCase;
pub use submit_reports::SubmitReportsUseCase;
