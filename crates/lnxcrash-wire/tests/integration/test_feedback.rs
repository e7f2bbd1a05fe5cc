//! Feedback poll tests: token routing and verdict mapping

use std::time::Duration;

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use lnxcrash_core::domain::{FeedbackToken, SubmissionStatus};
use lnxcrash_core::ports::IReportGateway;
use lnxcrash_wire::gateway::USER_AGENT;

use crate::common::{envelope_body, result_body, setup_custom};

fn token(value: &str) -> FeedbackToken {
    FeedbackToken::new(value.to_string()).unwrap()
}

#[tokio::test]
async fn test_feedback_round_trip() {
    let (server, gateway) = setup_custom().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("feedback", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result_body(3)))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = gateway.check_feedback(&token("abc123")).await.unwrap();

    let reply = outcome.server_reply().expect("expected a server verdict");
    assert_eq!(reply.status, SubmissionStatus::Available);
}

#[tokio::test]
async fn test_feedback_still_pending_keeps_delay() {
    let (server, gateway) = setup_custom().await;

    Mock::given(method("GET"))
        .and(query_param("feedback", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope_body(-80, "abc123", 60)))
        .mount(&server)
        .await;

    let outcome = gateway.check_feedback(&token("abc123")).await.unwrap();

    let reply = outcome.server_reply().expect("expected a server verdict");
    assert_eq!(reply.status, SubmissionStatus::Queued);
    assert!(reply.status.is_pending());
    assert_eq!(reply.feedback_delay, Some(Duration::from_secs(60)));
}

#[tokio::test]
async fn test_feedback_unparseable_body_is_network_error() {
    let (server, gateway) = setup_custom().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("processing..."))
        .mount(&server)
        .await;

    let outcome = gateway.check_feedback(&token("abc123")).await.unwrap();

    assert!(outcome.is_network_error());
}

#[tokio::test]
async fn test_feedback_rejection_maps_like_submission() {
    let (server, gateway) = setup_custom().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(result_body(-30)))
        .mount(&server)
        .await;

    let outcome = gateway.check_feedback(&token("abc123")).await.unwrap();

    let reply = outcome.server_reply().expect("expected a server verdict");
    assert_eq!(reply.status, SubmissionStatus::VersionDiscontinued);
    assert!(reply.status.is_rejection());
}

#[tokio::test]
async fn test_feedback_sends_user_agent() {
    let (server, gateway) = setup_custom().await;

    Mock::given(method("GET"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(result_body(3)))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = gateway.check_feedback(&token("abc123")).await.unwrap();

    assert!(!outcome.is_network_error());
}
