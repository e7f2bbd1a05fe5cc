//! Feedback command - Poll the verdict for a deferred submission
//!
//! Provides the `lnxcrash feedback` CLI command which performs a single
//! feedback exchange for a token handed out by an earlier `send`. The
//! reply uses the same status vocabulary as submission; scheduling of
//! repeat polls is left to the caller.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use lnxcrash_core::config::Config;
use lnxcrash_core::domain::{FeedbackToken, SubmissionStatus, SubmitOutcome};

use crate::output::OutputFormat;

/// Feedback command taking the token from a deferred submission
#[derive(Debug, Args)]
pub struct FeedbackCommand {
    /// Feedback token returned by an earlier send
    pub token: String,
}

impl FeedbackCommand {
    /// Execute the feedback command
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        use lnxcrash_core::usecases::CheckFeedbackUseCase;

        let formatter = format.formatter();

        let token = match FeedbackToken::new(self.token.clone()) {
            Ok(token) => token,
            Err(e) => {
                formatter.error(&format!("Invalid feedback token: {}", e));
                return Ok(());
            }
        };

        let config = Config::load_or_default(config_path);

        if config.server.submission_url.is_empty() {
            formatter.error(
                "No submission URL configured. Run 'lnxcrash config set server.submission_url <url>' first.",
            );
            return Ok(());
        }

        let gateway = match super::build_gateway(&config) {
            Ok(gateway) => Arc::new(gateway),
            Err(e) => {
                formatter.error(&format!("Invalid server configuration: {:#}", e));
                return Ok(());
            }
        };

        let check = CheckFeedbackUseCase::new(gateway);
        let outcome = check
            .execute(&token)
            .await
            .context("Feedback cycle failed")?;

        match &outcome {
            SubmitOutcome::Server(reply) => {
                if format.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "outcome": "server",
                        "status": reply.status.name(),
                        "code": reply.status.code(),
                        "pending": reply.status.is_pending(),
                        "rejected": reply.status.is_rejection(),
                        "fix_available": reply.status == SubmissionStatus::Available,
                        "feedback_delay_secs": reply.feedback_delay.map(|d| d.as_secs()),
                    }));
                    return Ok(());
                }

                formatter.success(&format!("Server status: {}", reply.status));

                if reply.status == SubmissionStatus::Available {
                    formatter.info("A fix for this crash is available.");
                } else if reply.status.is_pending() {
                    formatter.info("Verdict still pending.");
                    if let Some(delay) = reply.feedback_delay {
                        formatter.info(&format!("Poll again in {}s.", delay.as_secs()));
                    }
                } else if reply.status.is_rejection() {
                    formatter.warn("The submission was rejected.");
                }
            }
            SubmitOutcome::NetworkError(reason) => {
                if format.is_json() {
                    formatter.print_json(&serde_json::json!({
                        "outcome": "network_error",
                        "reason": reason,
                    }));
                    return Ok(());
                }

                formatter.warn(&format!("No server verdict: {}", reason));
                formatter.info("Try again later.");
            }
        }

        Ok(())
    }
}
