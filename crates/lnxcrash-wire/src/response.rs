//! Inbound XML reply parsing
//!
//! Both dialects answer a submission (and a feedback poll) with the same
//! small vocabulary: a `<result>` element whose text is the integer status
//! code, either as the document root or nested in a `<response>` root that
//! may also carry `<token>` and `<delay>` elements.
//!
//! ## Tolerance
//!
//! The parser is deliberately lenient about everything except the status
//! code itself:
//! - unknown elements are ignored,
//! - a missing or malformed `<token>` parses to `None`,
//! - a malformed `<delay>` parses to `None`,
//! - only a missing or non-integer `<result>` fails the whole reply.

use std::time::Duration;

use quick_xml::events::Event;
use quick_xml::Reader;

use lnxcrash_core::domain::{FeedbackToken, ServerReply, SubmissionStatus};

use crate::WireError;

/// Parse a server reply body into a [`ServerReply`].
pub fn parse_server_reply(body: &str) -> Result<ServerReply, WireError> {
    let mut reader = Reader::from_str(body);

    let mut stack: Vec<String> = Vec::new();
    let mut result_text: Option<String> = None;
    let mut token_text: Option<String> = None;
    let mut delay_text: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| WireError::InvalidResponse(e.to_string()))?;
                capture(
                    &stack,
                    text.trim(),
                    &mut result_text,
                    &mut token_text,
                    &mut delay_text,
                );
            }
            Ok(Event::CData(c)) => {
                let bytes = c.into_inner();
                let text = String::from_utf8_lossy(&bytes);
                capture(
                    &stack,
                    text.trim(),
                    &mut result_text,
                    &mut token_text,
                    &mut delay_text,
                );
            }
            Ok(Event::Eof) => break,
            // Declarations, comments, PIs, empty elements carry no status.
            Ok(_) => {}
            Err(e) => return Err(WireError::InvalidResponse(e.to_string())),
        }
    }

    let result_text = result_text
        .ok_or_else(|| WireError::InvalidResponse("no <result> element in reply".to_string()))?;
    let code: i32 = result_text.parse().map_err(|_| {
        WireError::InvalidResponse(format!("non-integer <result> value: {result_text}"))
    })?;

    // A token the domain type refuses is treated as absent, like every
    // other optional field.
    let feedback_token = token_text.and_then(|t| FeedbackToken::new(t).ok());
    let feedback_delay = delay_text
        .and_then(|d| d.parse::<u64>().ok())
        .map(Duration::from_secs);

    Ok(ServerReply {
        status: SubmissionStatus::from_code(code),
        feedback_token,
        feedback_delay,
    })
}

/// Record text into the slot matching the innermost open element.
///
/// First occurrence wins so a duplicated element cannot overwrite an
/// already-captured value.
fn capture(
    stack: &[String],
    text: &str,
    result_text: &mut Option<String>,
    token_text: &mut Option<String>,
    delay_text: &mut Option<String>,
) {
    if text.is_empty() {
        return;
    }
    let slot = match stack.last().map(String::as_str) {
        Some("result") => result_text,
        Some("token") => token_text,
        Some("delay") => delay_text,
        _ => return,
    };
    if slot.is_none() {
        *slot = Some(text.to_string());
    }
}

// ============================================================================
// Unit tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_result_root() {
        let reply = parse_server_reply("<result>2</result>").unwrap();
        assert_eq!(reply.status, SubmissionStatus::Submitted);
        assert!(reply.feedback_token.is_none());
        assert!(reply.feedback_delay.is_none());
    }

    #[test]
    fn test_bare_result_with_declaration() {
        let body = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><result>-80</result>";
        let reply = parse_server_reply(body).unwrap();
        assert_eq!(reply.status, SubmissionStatus::Queued);
    }

    #[test]
    fn test_response_envelope_with_token_and_delay() {
        let body = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
                    <response><result>-80</result><token>abc123</token><delay>30</delay></response>";
        let reply = parse_server_reply(body).unwrap();
        assert_eq!(reply.status, SubmissionStatus::Queued);
        assert_eq!(reply.feedback_token.unwrap().as_str(), "abc123");
        assert_eq!(reply.feedback_delay, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_response_envelope_status_only() {
        let reply = parse_server_reply("<response><result>1</result></response>").unwrap();
        assert_eq!(reply.status, SubmissionStatus::Assigned);
        assert!(reply.feedback_token.is_none());
        assert!(reply.feedback_delay.is_none());
    }

    #[test]
    fn test_whitespace_around_code_is_trimmed() {
        let reply = parse_server_reply("<result>\n  3\n</result>").unwrap();
        assert_eq!(reply.status, SubmissionStatus::Available);
    }

    #[test]
    fn test_unknown_code_folds_to_unknown() {
        let reply = parse_server_reply("<result>777</result>").unwrap();
        assert_eq!(reply.status, SubmissionStatus::Unknown);
    }

    #[test]
    fn test_server_internal_code_keeps_raw_value() {
        let reply = parse_server_reply("<result>-14</result>").unwrap();
        assert_eq!(reply.status, SubmissionStatus::ServerInternalError(-14));
    }

    #[test]
    fn test_malformed_delay_degrades_to_none() {
        let body = "<response><result>-80</result><token>abc123</token><delay>soon</delay></response>";
        let reply = parse_server_reply(body).unwrap();
        assert_eq!(reply.status, SubmissionStatus::Queued);
        assert_eq!(reply.feedback_token.unwrap().as_str(), "abc123");
        assert!(reply.feedback_delay.is_none());
    }

    #[test]
    fn test_invalid_token_degrades_to_none() {
        let body = "<response><result>-80</result><token>has whitespace</token></response>";
        let reply = parse_server_reply(body).unwrap();
        assert_eq!(reply.status, SubmissionStatus::Queued);
        assert!(reply.feedback_token.is_none());
    }

    #[test]
    fn test_unknown_elements_are_ignored() {
        let body = "<response><server>ingest01</server><result>2</result><extra>ok</extra></response>";
        let reply = parse_server_reply(body).unwrap();
        assert_eq!(reply.status, SubmissionStatus::Submitted);
    }

    #[test]
    fn test_missing_result_is_an_error() {
        let err = parse_server_reply("<response><token>abc</token></response>").unwrap_err();
        assert!(err.to_string().contains("result"));
    }

    #[test]
    fn test_non_integer_result_is_an_error() {
        let err = parse_server_reply("<result>accepted</result>").unwrap_err();
        assert!(err.to_string().contains("non-integer"));
    }

    #[test]
    fn test_html_error_page_is_an_error() {
        let body = "<html><body><h1>502 Bad Gateway</h1></body></html>";
        assert!(parse_server_reply(body).is_err());
    }

    #[test]
    fn test_empty_body_is_an_error() {
        assert!(parse_server_reply("").is_err());
    }

    #[test]
    fn test_plain_text_body_is_an_error() {
        assert!(parse_server_reply("EVERYTHING IS FINE").is_err());
    }
}
