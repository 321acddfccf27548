//! Error types for Presslift
//!
//! This module provides the error type hierarchy using `thiserror`.
//!
//! Blocked, empty, and transient outcomes during a fetch cascade are *not*
//! errors: they are internal `Outcome` classifications that advance the
//! cascade. Only exhaustion of every strategy and malformed transfer
//! payloads are terminal and user-visible.

use crate::article::FetchAttempt;
use thiserror::Error;

/// The main error type for Presslift operations
#[derive(Error, Debug)]
pub enum Error {
    /// Strategy-fetcher errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Transfer codec errors
    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    /// Orchestrator errors
    #[error("Acquisition error: {0}")]
    Acquire(#[from] AcquireError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Terminal failures of the strategy fetcher
#[derive(Error, Debug)]
pub enum FetchError {
    /// URL is missing, relative, or not http/https
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Every strategy in the cascade failed; manual content submission
    /// is required
    #[error("All fetch strategies exhausted after {} attempts; manual content submission required", attempts.len())]
    ExhaustedStrategies {
        /// One attempt record per strategy tried, in cascade order
        attempts: Vec<FetchAttempt>,
    },
}

/// Structural decode failures of the transfer codec.
///
/// These are distinct from (and more severe than) content truncation:
/// a truncated payload still decodes cleanly and is flagged on the
/// resulting article instead.
#[derive(Error, Debug)]
pub enum TransferError {
    /// Transport string is not valid base64
    #[error("Malformed transfer payload: invalid base64: {0}")]
    InvalidBase64(String),

    /// Decoded bytes are not valid UTF-8
    #[error("Malformed transfer payload: invalid UTF-8: {0}")]
    InvalidUtf8(String),

    /// Decoded text is not a well-formed payload object
    #[error("Malformed transfer payload: invalid JSON: {0}")]
    InvalidJson(String),
}

/// Errors surfaced by the acquisition orchestrator
#[derive(Error, Debug)]
pub enum AcquireError {
    /// The URL path failed terminally
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The transfer path failed to decode
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// Neither a URL nor a transport string was supplied
    #[error("No input provided: expected a URL or a transfer payload")]
    MissingInput,
}

/// Result type alias for Presslift operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a generic error from a string
    pub fn generic<S: Into<String>>(msg: S) -> Self {
        Error::Generic(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{AttemptOutcome, StrategyKind};

    #[test]
    fn exhausted_strategies_reports_attempt_count() {
        let err = FetchError::ExhaustedStrategies {
            attempts: vec![
                FetchAttempt {
                    strategy: StrategyKind::Readability,
                    outcome: AttemptOutcome::Blocked,
                    detail: "HTTP 403".to_string(),
                },
                FetchAttempt {
                    strategy: StrategyKind::HttpGet,
                    outcome: AttemptOutcome::Empty,
                    detail: "body below floor".to_string(),
                },
            ],
        };
        assert!(err.to_string().contains("2 attempts"));
        assert!(err.to_string().contains("manual content submission"));
    }

    #[test]
    fn transfer_error_display() {
        let err = TransferError::InvalidBase64("bad symbol".to_string());
        assert!(err.to_string().contains("Malformed transfer payload"));
        assert!(err.to_string().contains("base64"));
    }

    #[test]
    fn invalid_url_error() {
        let err = FetchError::InvalidUrl("ftp://example.com".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn acquire_error_wraps_fetch_transparently() {
        let err = AcquireError::Fetch(FetchError::InvalidUrl("nope".to_string()));
        assert_eq!(err.to_string(), "Invalid URL: nope");
    }

    #[test]
    fn generic_error() {
        let err = Error::generic("something went wrong");
        assert_eq!(err.to_string(), "something went wrong");
    }
}
