//! LNXCrash Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `CrashFile`, `CrashReport`, `SubmissionStatus`, `SubmitOutcome`
//! - **Use cases** - `CollectReportsUseCase`, `SubmitReportsUseCase`, `CheckFeedbackUseCase`
//! - **Port definitions** - Traits for adapters: `ICrashStore`, `ILedger`, `IReportGateway`
//! - **Report lifecycle** - Discovery-to-processed state machine
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no external dependencies.
//! Ports define trait interfaces that adapter crates implement.
//! Use cases orchestrate domain entities through port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
