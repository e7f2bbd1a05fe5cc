//! Submission builder
//!
//! Assembles the outbound [`CrashReport`] values for one submission cycle.
//! Pure over its inputs: no I/O, deterministic given the same files,
//! comments, and metadata, so the payload a cycle produces is byte-stable
//! and testable offline.

use std::collections::HashMap;

use super::crash_file::CrashFile;
use super::log_parser::parse_version;
use super::newtypes::AppVersion;
use super::report::{CrashReport, ReportMeta, MAX_CONSOLE_LOG_BYTES};

/// Build one report per crash file
///
/// For each file the crash text is parsed for version fields; fields that
/// fail the server charset gate degrade to the installed-version fallback
/// from `meta` (or to absent), never failing the report. The stored user
/// comment is looked up by file name. The console log is truncated once and
/// shared by all reports of the cycle.
#[must_use]
pub fn build_reports(
    files: &[CrashFile],
    comments: &HashMap<String, String>,
    meta: &ReportMeta,
) -> Vec<CrashReport> {
    let console_log = truncate_to_tail(&meta.console_log, MAX_CONSOLE_LOG_BYTES).to_string();

    files
        .iter()
        .map(|file| {
            let parsed = parse_version(file.content());
            let version = parsed
                .version
                .and_then(|v| AppVersion::new(v).ok())
                .or_else(|| meta.app_version.clone());
            let short_version = parsed
                .short_version
                .and_then(|v| AppVersion::new(v).ok());

            CrashReport {
                file_name: file.file_name().to_string(),
                app_name: meta.app_name.clone(),
                bundle_identifier: meta.bundle_identifier.clone(),
                system_version: meta.system_version.clone(),
                platform: meta.platform.clone(),
                sender_version: meta.sender_version.clone(),
                version,
                short_version,
                log: file.content().to_string(),
                user_id: meta.user_id.clone(),
                contact: meta.contact.clone(),
                comment: comments.get(file.file_name()).cloned(),
                console_log: console_log.clone(),
                application_log: meta.application_log.clone(),
            }
        })
        .collect()
}

/// Keep at most `max_bytes` from the end of `text`, cut on a char boundary
///
/// The tail is kept because the most recent console lines are the ones
/// relevant to the crash.
#[must_use]
pub fn truncate_to_tail(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }

    let mut start = text.len() - max_bytes;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}
