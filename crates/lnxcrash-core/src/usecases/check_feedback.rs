//! Feedback polling use case
//!
//! Single-call lookup of the server-side verdict for an earlier deferred
//! submission. Scheduling — honoring the advertised delay, backoff, and
//! give-up — belongs to the host; this use case only performs one exchange.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::{
    domain::{FeedbackToken, SubmitOutcome},
    ports::IReportGateway,
};

/// Use case for polling deferred-verdict feedback by token
pub struct CheckFeedbackUseCase {
    gateway: Arc<dyn IReportGateway + Send + Sync>,
}

impl CheckFeedbackUseCase {
    /// Creates a new CheckFeedbackUseCase
    ///
    /// # Arguments
    ///
    /// * `gateway` - Network exchange with the ingestion server
    pub fn new(gateway: Arc<dyn IReportGateway + Send + Sync>) -> Self {
        Self { gateway }
    }

    /// Performs one feedback exchange for the given token
    ///
    /// The reply uses the same status vocabulary as submission; a transport
    /// failure surfaces as `SubmitOutcome::NetworkError`. The main
    /// processed record of the originating file is never re-opened by any
    /// feedback result.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange cannot be attempted
    pub async fn execute(&self, token: &FeedbackToken) -> Result<SubmitOutcome> {
        debug!(token = %token, "Polling feedback");
        self.gateway
            .check_feedback(token)
            .await
            .context("Failed to perform feedback exchange")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::{CrashReport, ServerReply, SubmissionStatus};

    struct CannedGateway {
        outcome: SubmitOutcome,
    }

    #[async_trait::async_trait]
    impl IReportGateway for CannedGateway {
        async fn submit(&self, _reports: &[CrashReport]) -> Result<SubmitOutcome> {
            Ok(self.outcome.clone())
        }

        async fn check_feedback(&self, _token: &FeedbackToken) -> Result<SubmitOutcome> {
            Ok(self.outcome.clone())
        }
    }

    #[tokio::test]
    async fn test_returns_server_reported_status() {
        let uc = CheckFeedbackUseCase::new(Arc::new(CannedGateway {
            outcome: SubmitOutcome::Server(ServerReply::status_only(SubmissionStatus::Available)),
        }));

        let token = FeedbackToken::new("abc123".to_string()).unwrap();
        let outcome = uc.execute(&token).await.unwrap();

        assert_eq!(
            outcome.server_reply().unwrap().status,
            SubmissionStatus::Available
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error_outcome() {
        let uc = CheckFeedbackUseCase::new(Arc::new(CannedGateway {
            outcome: SubmitOutcome::NetworkError("timeout".to_string()),
        }));

        let token = FeedbackToken::new("abc123".to_string()).unwrap();
        let outcome = uc.execute(&token).await.unwrap();

        assert!(outcome.is_network_error());
    }
}
