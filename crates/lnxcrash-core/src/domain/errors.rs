//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! mostly charset and format gates on server-bound values.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Version string violates the server charset contract
    #[error("Invalid version string: {0}")]
    InvalidVersion(String),

    /// Feedback token format is invalid
    #[error("Invalid feedback token: {0}")]
    InvalidToken(String),

    /// Hosted-backend application identifier format is invalid
    #[error("Invalid app identifier: {0}")]
    InvalidAppIdentifier(String),

    /// Crash file path is not usable as an identity
    #[error("Invalid crash file path: {0}")]
    InvalidCrashPath(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::InvalidVersion("1.0;DROP".to_string());
        assert_eq!(err.to_string(), "Invalid version string: 1.0;DROP");

        let err = DomainError::InvalidToken("".to_string());
        assert_eq!(err.to_string(), "Invalid feedback token: ");

        let err = DomainError::InvalidCrashPath("relative/path".to_string());
        assert_eq!(err.to_string(), "Invalid crash file path: relative/path");
    }

    #[test]
    fn test_error_equality() {
        let err1 = DomainError::InvalidVersion("x".to_string());
        let err2 = DomainError::InvalidVersion("x".to_string());
        let err3 = DomainError::InvalidVersion("y".to_string());

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn test_error_clone() {
        let err = DomainError::InvalidAppIdentifier("bad id".to_string());
        let cloned = err.clone();
        assert_eq!(err, cloned);
    }
}
