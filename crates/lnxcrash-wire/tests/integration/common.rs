//! Shared test helpers for wire integration tests
//!
//! Provides wiremock-based mock server setup for the crash-ingestion
//! server plus canned reply bodies and sample reports.

use std::time::Duration;

use wiremock::MockServer;

use lnxcrash_core::domain::{AppIdentifier, AppVersion, CrashReport};
use lnxcrash_wire::{Dialect, GatewayConfig, HttpReportGateway};

/// Sets up a mock server and a custom-dialect gateway pointing at it.
pub async fn setup_custom() -> (MockServer, HttpReportGateway) {
    setup_custom_with_timeout(Duration::from_secs(5)).await
}

/// Custom-dialect setup with an explicit exchange timeout.
pub async fn setup_custom_with_timeout(timeout: Duration) -> (MockServer, HttpReportGateway) {
    let server = MockServer::start().await;
    let gateway = HttpReportGateway::new(GatewayConfig {
        submission_url: server.uri(),
        dialect: Dialect::Custom,
        timeout,
    });
    (server, gateway)
}

/// Sets up a mock server and a hosted-dialect gateway pointing at it.
pub async fn setup_hosted(app_id: &str) -> (MockServer, HttpReportGateway) {
    let server = MockServer::start().await;
    let gateway = HttpReportGateway::new(GatewayConfig {
        submission_url: server.uri(),
        dialect: Dialect::Hosted {
            app_identifier: AppIdentifier::new(app_id.to_string()).unwrap(),
        },
        timeout: Duration::from_secs(5),
    });
    (server, gateway)
}

/// A fully populated report for submission tests.
pub fn sample_report(file_name: &str) -> CrashReport {
    CrashReport {
        file_name: file_name.to_string(),
        app_name: "MyApp".to_string(),
        bundle_identifier: "com.example.myapp".to_string(),
        system_version: "6.5.0".to_string(),
        platform: "x86_64".to_string(),
        sender_version: "1.2.0".to_string(),
        version: Some(AppVersion::new("108".to_string()).unwrap()),
        short_version: Some(AppVersion::new("1.0.1".to_string()).unwrap()),
        log: format!("Version: 1.0.1 (108)\ncrash from {file_name}"),
        user_id: "user-1".to_string(),
        contact: "user@example.com".to_string(),
        comment: None,
        console_log: String::new(),
        application_log: String::new(),
    }
}

/// The bare reply shape: a `<result>` document root.
pub fn result_body(code: i32) -> String {
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?><result>{code}</result>")
}

/// The envelope reply shape carrying a feedback token and delay.
pub fn envelope_body(code: i32, token: &str, delay_secs: u64) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <response><result>{code}</result><token>{token}</token><delay>{delay_secs}</delay></response>"
    )
}
