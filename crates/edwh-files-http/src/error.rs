//! HTTP client error types

use thiserror::Error;

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// HTTP client errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network request failed
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid proxy configuration
    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),

    /// Header value that cannot be sent
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// HTTP error status
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        status: reqwest::StatusCode,
        message: String,
    },

    /// Retry limit exceeded
    #[error("Retry limit exceeded after {attempts} attempts: {last_error}")]
    RetryLimitExceeded { attempts: u32, last_error: String },

    /// Client build error
    #[error("Failed to build HTTP client: {0}")]
    BuildError(String),

    /// Local file error while sending or receiving a body
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HttpError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            HttpError::RequestFailed(e) => e.is_timeout() || e.is_connect(),
            HttpError::Timeout(_) => true,
            HttpError::HttpStatus { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }

    /// Status code of the failed response, if the server answered at all
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            HttpError::HttpStatus { status, .. } => Some(*status),
            HttpError::RequestFailed(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::time::Duration;

    #[test]
    fn test_server_errors_are_retryable() {
        let err = HttpError::HttpStatus {
            status: StatusCode::BAD_GATEWAY,
            message: String::new(),
        };
        assert!(err.is_retryable());

        let err = HttpError::HttpStatus {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: String::new(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_client_errors_are_not_retryable() {
        let err = HttpError::HttpStatus {
            status: StatusCode::NOT_FOUND,
            message: "Not Found".to_string(),
        };
        assert!(!err.is_retryable());
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert!(!HttpError::InvalidUrl("x".into()).is_retryable());
    }

    #[test]
    fn test_timeout_is_retryable() {
        assert!(HttpError::Timeout(Duration::from_secs(1)).is_retryable());
    }
}
