//! Integration tests for lnxcrash-wire
//!
//! Uses wiremock to simulate the crash-ingestion server and verifies
//! end-to-end behavior of submissions, reply interpretation, and feedback
//! polls across both wire dialects.

mod common;

mod test_feedback;
mod test_submit;
