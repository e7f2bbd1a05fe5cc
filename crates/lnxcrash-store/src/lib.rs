//! LNXCrash Store - Crash file store adapter
//!
//! Implements the [`ICrashStore`](lnxcrash_core::ports::ICrashStore) port on
//! top of a flat directory of crash files written by the capture
//! collaborator.
//!
//! ## Modules
//!
//! - [`scanner`] - Directory scanner with age, suffix, and exclusion filtering

pub mod scanner;

pub use scanner::DirCrashStore;
