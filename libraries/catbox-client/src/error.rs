//! Error types for the Catbox client.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to Catbox or Litterbox.
#[derive(Error, Debug)]
pub enum CatboxError {
    /// Missing userhash, unnamed byte buffer, or another invalid setting
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request did not complete within its timeout
    #[error("Request timed out after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),

    /// Service could not be reached
    #[error("Failed to connect to Catbox: {0}")]
    Connection(String),

    /// Service answered with a non-success status
    #[error("HTTP error ({status}): {message}")]
    Http { status: u16, message: String },

    /// Any other client or transport failure
    #[error("Catbox error: {0}")]
    Service(String),

    /// File to upload does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error while reading an upload
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatboxError {
    /// Classify a transport error from a request sent with `timeout`.
    pub(crate) fn from_request(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            CatboxError::Timeout(timeout)
        } else if err.is_connect() {
            CatboxError::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            CatboxError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            CatboxError::Service(err.to_string())
        }
    }

    pub(crate) fn missing_userhash() -> Self {
        CatboxError::Config("Userhash is required.".to_string())
    }
}

/// Result type for Catbox client operations.
pub type Result<T> = std::result::Result<T, CatboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_reports_seconds() {
        let err = CatboxError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "Request timed out after 1.5 seconds");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CatboxError = io.into();
        assert!(matches!(err, CatboxError::Io(_)));
    }
}
