//! Outbound XML document construction
//!
//! Builds the `<crashes>` submission body shared by both wire dialects.
//! The element order inside each `<crash>` is part of the server contract
//! and must not change.
//!
//! ## CDATA handling
//!
//! Crash text and description are raw, user-influenced text and go out as
//! CDATA so stack frames full of `<`, `>`, and `&` survive untouched. A
//! literal `]]>` inside the text would terminate the section early, so the
//! sequence is split across two adjacent CDATA sections.

use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use lnxcrash_core::domain::CrashReport;

use crate::WireError;

/// Serialize all reports into one `<crashes>` XML document.
///
/// The output is deterministic: identical reports in identical order
/// produce a byte-identical document.
pub fn crashes_payload(reports: &[CrashReport]) -> Result<String, WireError> {
    let mut writer = Writer::new(Vec::<u8>::new());
    write_document(&mut writer, reports).map_err(|e| WireError::Payload(e.to_string()))?;
    String::from_utf8(writer.into_inner()).map_err(|e| WireError::Payload(e.to_string()))
}

fn write_document(
    writer: &mut Writer<Vec<u8>>,
    reports: &[CrashReport],
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("crashes")))?;
    for report in reports {
        write_crash(writer, report)?;
    }
    writer.write_event(Event::End(BytesEnd::new("crashes")))?;
    Ok(())
}

/// Write one `<crash>` element. Tag order is the server contract.
fn write_crash(writer: &mut Writer<Vec<u8>>, report: &CrashReport) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("crash")))?;

    write_text_element(writer, "applicationname", &report.app_name)?;
    write_text_element(writer, "bundleidentifier", &report.bundle_identifier)?;
    write_text_element(writer, "systemversion", &report.system_version)?;
    write_text_element(writer, "platform", &report.platform)?;
    write_text_element(writer, "senderversion", &report.sender_version)?;
    write_text_element(
        writer,
        "version",
        report.version.as_ref().map_or("", |v| v.as_str()),
    )?;
    write_cdata_element(writer, "log", &report.log)?;
    write_text_element(writer, "userid", &report.user_id)?;
    write_text_element(writer, "contact", &report.contact)?;
    write_cdata_element(writer, "description", &description_text(report))?;

    writer.write_event(Event::End(BytesEnd::new("crash")))?;
    Ok(())
}

/// The `<description>` body: user comment first, then the application log,
/// then the (already truncated) console log, blank-line separated.
fn description_text(report: &CrashReport) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(comment) = report.comment.as_deref() {
        if !comment.is_empty() {
            parts.push(comment);
        }
    }
    if !report.application_log.is_empty() {
        parts.push(&report.application_log);
    }
    if !report.console_log.is_empty() {
        parts.push(&report.console_log);
    }
    parts.join("\n\n")
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    value: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_cdata_element(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    value: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    // Split any embedded "]]>" across two sections: the first keeps "]]",
    // the next starts with ">", so the decoded text is unchanged.
    let mut pieces = value.split("]]>").peekable();
    let mut first = true;
    let mut section = String::new();
    while let Some(piece) = pieces.next() {
        section.clear();
        if !first {
            section.push('>');
        }
        section.push_str(piece);
        if pieces.peek().is_some() {
            section.push_str("]]");
        }
        writer.write_event(Event::CData(BytesCData::new(section.as_str())))?;
        first = false;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

// ============================================================================
// Unit tests
// ============================================================================
