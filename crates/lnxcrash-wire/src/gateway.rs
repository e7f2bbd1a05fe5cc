//! HTTP gateway to the crash-ingestion server (secondary/driven adapter)
//!
//! Implements [`IReportGateway`] over `reqwest` for both wire dialects.
//!
//! ## Design Decisions
//!
//! - **Transport failure is a value**: send errors, timeouts, and
//!   unparseable bodies all resolve to `Ok(SubmitOutcome::NetworkError)`.
//!   `Err` is reserved for local faults such as payload serialization.
//! - **Body over HTTP status**: a non-2xx response that still carries a
//!   parseable `<result>` body is interpreted via the body; the HTTP status
//!   is only logged. Self-hosted servers answer errors with 200 plus a
//!   negative code, so the body is the authoritative channel.
//! - **Per-request timeout**: every exchange carries the configured timeout
//!   so a stalled server resolves to `NetworkError` instead of hanging.

use std::time::Duration;

use anyhow::Context;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use lnxcrash_core::domain::{AppIdentifier, CrashReport, FeedbackToken, SubmitOutcome};
use lnxcrash_core::ports::IReportGateway;

use crate::{payload, response};

/// User-Agent header sent with every exchange.
pub const USER_AGENT: &str = concat!("lnxcrash/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Gateway configuration
// ============================================================================

/// Which wire dialect the ingestion server speaks.
#[derive(Debug, Clone)]
pub enum Dialect {
    /// Self-hosted server taking the payload directly at the submission URL.
    Custom,
    /// Hosted multi-tenant backend routing by application identifier.
    Hosted {
        /// Tenant identifier embedded in the submission path.
        app_identifier: AppIdentifier,
    },
}

/// Connection parameters for the gateway, fixed at construction.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the ingestion server.
    pub submission_url: String,
    /// Wire dialect the server speaks.
    pub dialect: Dialect,
    /// Upper bound for each network exchange.
    pub timeout: Duration,
}

// ============================================================================
// HttpReportGateway
// ============================================================================

/// Adapter that bridges the [`IReportGateway`] port to an HTTP server.
pub struct HttpReportGateway {
    /// The underlying HTTP client
    client: Client,
    /// Connection parameters fixed at construction
    config: GatewayConfig,
}

impl HttpReportGateway {
    /// Creates a new gateway with the given connection parameters.
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// The URL submissions are POSTed to, derived from the dialect.
    #[must_use]
    pub fn submission_endpoint(&self) -> String {
        match &self.config.dialect {
            Dialect::Custom => self.config.submission_url.clone(),
            Dialect::Hosted { app_identifier } => format!(
                "{}/api/2/apps/{}/crashes",
                self.config.submission_url.trim_end_matches('/'),
                app_identifier
            ),
        }
    }

    /// The URL a feedback poll for `token` is GETed from.
    #[must_use]
    pub fn feedback_endpoint(&self, token: &FeedbackToken) -> String {
        format!("{}?feedback={}", self.config.submission_url, token)
    }

    /// Wrap the XML document in the dialect-specific multipart form.
    fn submission_form(&self, xml: String) -> anyhow::Result<Form> {
        let form = match &self.config.dialect {
            Dialect::Custom => Form::new().text("xmlstring", xml),
            Dialect::Hosted { .. } => {
                let part = Part::text(xml)
                    .file_name("crash.xml")
                    .mime_str("text/xml")
                    .context("Failed to build crash.xml multipart part")?;
                Form::new().part("xml", part)
            }
        };
        Ok(form)
    }

    /// Interpret a reply body, falling back to `NetworkError` when it does
    /// not parse. Submissions and feedback polls share this path.
    fn outcome_from_body(http_status: StatusCode, body: &str) -> SubmitOutcome {
        match response::parse_server_reply(body) {
            Ok(reply) => {
                debug!(status = %reply.status, http_status = %http_status, "server verdict");
                SubmitOutcome::Server(reply)
            }
            Err(e) => {
                warn!(http_status = %http_status, error = %e, "server reply not parseable");
                SubmitOutcome::NetworkError(format!(
                    "unparseable server reply (HTTP {http_status}): {e}"
                ))
            }
        }
    }
}

#[async_trait::async_trait]
impl IReportGateway for HttpReportGateway {
    #[instrument(skip(self, reports), fields(count = reports.len()))]
    async fn submit(&self, reports: &[CrashReport]) -> anyhow::Result<SubmitOutcome> {
        let xml = payload::crashes_payload(reports).context("Failed to serialize crash reports")?;
        let form = self.submission_form(xml)?;
        let url = self.submission_endpoint();

        debug!(url = %url, "submitting crash reports");

        let response = match self
            .client
            .post(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(self.config.timeout)
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "submission transport failure");
                return Ok(SubmitOutcome::NetworkError(format!(
                    "submission failed: {e}"
                )));
            }
        };

        let http_status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "failed to read submission reply body");
                return Ok(SubmitOutcome::NetworkError(format!(
                    "failed to read server reply: {e}"
                )));
            }
        };

        Ok(Self::outcome_from_body(http_status, &body))
    }

    #[instrument(skip(self), fields(token = %token))]
    async fn check_feedback(&self, token: &FeedbackToken) -> anyhow::Result<SubmitOutcome> {
        let url = self.feedback_endpoint(token);

        debug!(url = %url, "polling feedback");

        let response = match self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(self.config.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "feedback transport failure");
                return Ok(SubmitOutcome::NetworkError(format!(
                    "feedback poll failed: {e}"
                )));
            }
        };

        let http_status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "failed to read feedback reply body");
                return Ok(SubmitOutcome::NetworkError(format!(
                    "failed to read server reply: {e}"
                )));
            }
        };

        Ok(Self::outcome_from_body(http_status, &body))
    }
}

// ============================================================================
// Unit tests
// ============================================================================
