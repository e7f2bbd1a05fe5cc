//! Submission tests: dialect routing, verdict mapping, failure handling

use std::time::{Duration, Instant};

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lnxcrash_core::domain::{SubmissionStatus, SubmitOutcome};
use lnxcrash_core::ports::IReportGateway;
use lnxcrash_wire::gateway::USER_AGENT;
use lnxcrash_wire::{Dialect, GatewayConfig, HttpReportGateway};

use crate::common::{
    envelope_body, result_body, sample_report, setup_custom, setup_custom_with_timeout,
    setup_hosted,
};

#[tokio::test]
async fn test_custom_dialect_round_trip() {
    let (server, gateway) = setup_custom().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("name=\"xmlstring\""))
        .and(body_string_contains("<crashes>"))
        .and(body_string_contains("<applicationname>MyApp</applicationname>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result_body(2)))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = gateway.submit(&[sample_report("a.crash")]).await.unwrap();

    let reply = outcome.server_reply().expect("expected a server verdict");
    assert_eq!(reply.status, SubmissionStatus::Submitted);
    assert!(reply.feedback_token.is_none());
}

#[tokio::test]
async fn test_hosted_dialect_posts_to_tenant_path() {
    let (server, gateway) = setup_hosted("myapp01").await;

    Mock::given(method("POST"))
        .and(path("/api/2/apps/myapp01/crashes"))
        .and(body_string_contains("name=\"xml\""))
        .and(body_string_contains("filename=\"crash.xml\""))
        .and(body_string_contains("text/xml"))
        .and(body_string_contains("<crashes>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result_body(1)))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = gateway.submit(&[sample_report("a.crash")]).await.unwrap();

    let reply = outcome.server_reply().expect("expected a server verdict");
    assert_eq!(reply.status, SubmissionStatus::Assigned);
}

#[tokio::test]
async fn test_all_verdict_codes_round_trip() {
    let cases = [
        (-80, SubmissionStatus::Queued),
        (-30, SubmissionStatus::VersionDiscontinued),
        (-21, SubmissionStatus::XmlSenderVersionNotAllowed),
        (-20, SubmissionStatus::XmlVersionNotAllowed),
        (-18, SubmissionStatus::ServerInternalError(-18)),
        (-15, SubmissionStatus::ServerInternalError(-15)),
        (-10, SubmissionStatus::ServerInternalError(-10)),
        (-3, SubmissionStatus::InvalidPostData),
        (-2, SubmissionStatus::InvalidIncomingData),
        (-1, SubmissionStatus::DatabaseUnavailable),
        (0, SubmissionStatus::Unknown),
        (1, SubmissionStatus::Assigned),
        (2, SubmissionStatus::Submitted),
        (3, SubmissionStatus::Available),
        (42, SubmissionStatus::Unknown),
    ];

    for (code, expected) in cases {
        let (server, gateway) = setup_custom().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(result_body(code)))
            .mount(&server)
            .await;

        let outcome = gateway.submit(&[sample_report("a.crash")]).await.unwrap();
        let reply = outcome.server_reply().expect("expected a server verdict");
        assert_eq!(reply.status, expected, "code {code}");
    }
}

#[tokio::test]
async fn test_queued_reply_carries_token_and_delay() {
    let (server, gateway) = setup_custom().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope_body(-80, "abc123", 30)))
        .mount(&server)
        .await;

    let outcome = gateway.submit(&[sample_report("a.crash")]).await.unwrap();

    let reply = outcome.server_reply().expect("expected a server verdict");
    assert_eq!(reply.status, SubmissionStatus::Queued);
    assert_eq!(reply.feedback_token.as_ref().unwrap().as_str(), "abc123");
    assert_eq!(reply.feedback_delay, Some(Duration::from_secs(30)));
}

#[tokio::test]
async fn test_multiple_reports_go_in_one_request() {
    let (server, gateway) = setup_custom().await;

    Mock::given(method("POST"))
        .and(body_string_contains("crash from a.crash"))
        .and(body_string_contains("crash from b.crash"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result_body(2)))
        .expect(1)
        .mount(&server)
        .await;

    let reports = vec![sample_report("a.crash"), sample_report("b.crash")];
    let outcome = gateway.submit(&reports).await.unwrap();

    assert!(!outcome.is_network_error());
}

#[tokio::test]
async fn test_non_2xx_with_parseable_body_uses_body() {
    let (server, gateway) = setup_custom().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string(result_body(2)))
        .mount(&server)
        .await;

    let outcome = gateway.submit(&[sample_report("a.crash")]).await.unwrap();

    let reply = outcome.server_reply().expect("expected a server verdict");
    assert_eq!(reply.status, SubmissionStatus::Submitted);
}

#[tokio::test]
async fn test_non_2xx_without_parseable_body_is_network_error() {
    let (server, gateway) = setup_custom().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let outcome = gateway.submit(&[sample_report("a.crash")]).await.unwrap();

    assert!(outcome.is_network_error());
}

#[tokio::test]
async fn test_unparseable_2xx_body_is_network_error_not_unknown() {
    let (server, gateway) = setup_custom().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("EVERYTHING IS FINE"))
        .mount(&server)
        .await;

    let outcome = gateway.submit(&[sample_report("a.crash")]).await.unwrap();

    match outcome {
        SubmitOutcome::NetworkError(reason) => {
            assert!(reason.contains("unparseable"), "reason: {reason}");
        }
        SubmitOutcome::Server(reply) => {
            panic!("gibberish body must not become a verdict, got {:?}", reply.status)
        }
    }
}

#[tokio::test]
async fn test_timeout_resolves_to_network_error() {
    let (server, gateway) = setup_custom_with_timeout(Duration::from_millis(500)).await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(result_body(2))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let started = Instant::now();
    let outcome = gateway.submit(&[sample_report("a.crash")]).await.unwrap();

    assert!(outcome.is_network_error());
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Take a port from a started server, then free it again.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let gateway = HttpReportGateway::new(GatewayConfig {
        submission_url: uri,
        dialect: Dialect::Custom,
        timeout: Duration::from_secs(5),
    });

    let outcome = gateway.submit(&[sample_report("a.crash")]).await.unwrap();

    assert!(outcome.is_network_error());
}

#[tokio::test]
async fn test_user_agent_header_is_sent() {
    let (server, gateway) = setup_custom().await;

    Mock::given(method("POST"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(result_body(2)))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = gateway.submit(&[sample_report("a.crash")]).await.unwrap();

    assert!(!outcome.is_network_error());
}
