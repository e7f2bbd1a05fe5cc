//! Domain newtypes with validation
//!
//! This module provides strongly-typed wrappers for domain values that cross
//! a validation boundary. Each newtype ensures data validity at construction
//! time, so the payload builder and the wire layer never see a value the
//! server contract would reject.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Maximum accepted length for version strings, in bytes
const MAX_VERSION_LEN: usize = 64;

/// Maximum accepted length for feedback tokens, in bytes
const MAX_TOKEN_LEN: usize = 128;

// ============================================================================
// Version strings
// ============================================================================

/// A validated application version string
///
/// The ingestion server accepts only alphanumeric characters, spaces, and
/// dots in version fields and rejects the whole payload otherwise, so the
/// restriction is enforced here at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppVersion(String);

impl AppVersion {
    /// Create a new AppVersion
    ///
    /// # Errors
    /// Returns `DomainError::InvalidVersion` if the string is empty, longer
    /// than 64 bytes, or contains characters outside alphanumeric, space,
    /// and `.`
    pub fn new(version: String) -> Result<Self, DomainError> {
        let trimmed = version.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidVersion(
                "Version cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > MAX_VERSION_LEN {
            return Err(DomainError::InvalidVersion(format!(
                "Version exceeds {MAX_VERSION_LEN} bytes: {trimmed}"
            )));
        }

        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '.')
        {
            return Err(DomainError::InvalidVersion(format!(
                "Version contains disallowed characters: {trimmed}"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AppVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AppVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for AppVersion {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AppVersion> for String {
    fn from(version: AppVersion) -> Self {
        version.0
    }
}

// ============================================================================
// Server handles
// ============================================================================

/// An opaque feedback token issued by the ingestion server
///
/// Returned when the server defers its verdict on a submission; used later
/// to poll for the final status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeedbackToken(String);

impl FeedbackToken {
    /// Create a new FeedbackToken
    ///
    /// # Errors
    /// Returns `DomainError::InvalidToken` if the token is empty, longer
    /// than 128 bytes, or contains whitespace
    pub fn new(token: String) -> Result<Self, DomainError> {
        if token.is_empty() {
            return Err(DomainError::InvalidToken(
                "Token cannot be empty".to_string(),
            ));
        }

        if token.len() > MAX_TOKEN_LEN {
            return Err(DomainError::InvalidToken(format!(
                "Token exceeds {MAX_TOKEN_LEN} bytes"
            )));
        }

        if token.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidToken(format!(
                "Token contains whitespace: {token}"
            )));
        }

        Ok(Self(token))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FeedbackToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FeedbackToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for FeedbackToken {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<FeedbackToken> for String {
    fn from(token: FeedbackToken) -> Self {
        token.0
    }
}

/// A hosted-backend application identifier
///
/// Identifies the tenant on a multi-tenant ingestion service. The value is
/// interpolated into a URL path segment, so only alphanumeric characters
/// are accepted; it is stored lowercase because the backend treats it
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppIdentifier(String);

impl AppIdentifier {
    /// Create a new AppIdentifier
    ///
    /// # Errors
    /// Returns `DomainError::InvalidAppIdentifier` if the identifier is
    /// empty or contains non-alphanumeric characters
    pub fn new(id: String) -> Result<Self, DomainError> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidAppIdentifier(
                "App identifier cannot be empty".to_string(),
            ));
        }

        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidAppIdentifier(format!(
                "App identifier must be alphanumeric: {trimmed}"
            )));
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Get the inner string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AppIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AppIdentifier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl TryFrom<String> for AppIdentifier {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AppIdentifier> for String {
    fn from(id: AppIdentifier) -> Self {
        id.0
    }
}
