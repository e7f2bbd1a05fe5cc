//! Crash log version extraction
//!
//! Native crash reports carry a header block whose `Version:` line names
//! the build that crashed, in the shape `Version: 1.0.1 (108)` where the
//! parenthesized part is the build number and the leading part the
//! marketing version. Formats vary by OS release, so extraction is
//! best-effort: anything unrecognized degrades to absent fields and the
//! submission proceeds without them.

/// Raw version fields extracted from a crash log header
///
/// Values are unvalidated text; promotion to [`AppVersion`] (and the server
/// charset gate that comes with it) happens in the submission builder.
///
/// [`AppVersion`]: super::newtypes::AppVersion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedVersions {
    /// Build number of the crashed application
    pub version: Option<String>,
    /// Marketing version of the crashed application
    pub short_version: Option<String>,
}

/// Extract version fields from raw crash text
///
/// Scans for the first header line starting with `Version:` (leading
/// whitespace tolerated). `Version: 1.0.1 (108)` yields
/// `short_version = "1.0.1"`, `version = "108"`; a bare `Version: 108`
/// yields only `version`. A text with no recognizable header yields both
/// fields absent; this function never fails.
#[must_use]
pub fn parse_version(crash_text: &str) -> ParsedVersions {
    for line in crash_text.lines() {
        let Some(value) = line.trim_start().strip_prefix("Version:") else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        // "1.0.1 (108)" splits into marketing version and build number
        if let Some(open) = value.find('(') {
            if let Some(close) = value.rfind(')') {
                if close > open {
                    let short = value[..open].trim();
                    let build = value[open + 1..close].trim();
                    return ParsedVersions {
                        version: (!build.is_empty()).then(|| build.to_string()),
                        short_version: (!short.is_empty()).then(|| short.to_string()),
                    };
                }
            }
        }

        return ParsedVersions {
            version: Some(value.to_string()),
            short_version: None,
        };
    }

    ParsedVersions::default()
}
