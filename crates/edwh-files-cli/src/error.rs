// CLI error type and user-facing messages

use edwh_files_compression::CompressionError;
use edwh_files_http::HttpError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Compression(#[from] CompressionError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for CliError {
    fn from(e: config::ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<tokio::task::JoinError> for CliError {
    fn from(e: tokio::task::JoinError) -> Self {
        CliError::Internal(format!("background task failed: {e}"))
    }
}

impl CliError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!("Invalid argument: {}\n\nRun 'edwh-file --help' for usage information.", message)
            }
            CliError::Io(e) => format!("File operation failed: {}", e),
            CliError::Config(msg) => format!(
                "Configuration error: {}\n\nRun 'edwh-file config' to inspect the effective configuration.",
                msg
            ),
            CliError::Http(HttpError::HttpStatus { status, message }) => {
                if message.is_empty() {
                    format!("Something went wrong: {}", status.as_u16())
                } else {
                    format!("Something went wrong: {} {}", status.as_u16(), message)
                }
            }
            CliError::Http(HttpError::RequestFailed(e)) if e.is_connect() => {
                format!("Could not reach the server: {}\n\nCheck the --server option or your network.", e)
            }
            CliError::Http(HttpError::Timeout(limit)) => format!(
                "The server did not answer within {}s.\n\nRaise or unset timeout_secs in the configuration.",
                limit.as_secs()
            ),
            CliError::Http(e) => format!("Transfer failed: {}", e),
            CliError::Compression(CompressionError::UnknownFormat(ext)) => format!(
                "No compression backend available for '{}'.\n\nRun 'edwh-file tasks' to see the supported formats.",
                ext
            ),
            CliError::Compression(e) => format!("Something went wrong during compression: {}", e),
            CliError::Internal(msg) => format!("Internal error: {}\n\nPlease report this issue.", msg),
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

pub type CliResult<T> = Result<T, CliError>;
