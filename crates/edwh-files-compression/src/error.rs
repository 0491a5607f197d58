//! Compression error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for compression operations
pub type Result<T> = std::result::Result<T, CompressionError>;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("{program} failed: {message}")]
    CommandFailed { program: String, message: String },

    #[error("Compression backend '{0}' is not available on this system")]
    Unavailable(String),

    #[error("No compression backend available for '{0}'")]
    UnknownFormat(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Refusing to write {0} onto itself; provide a target path")]
    SameTarget(PathBuf),

    #[error("Source does not exist: {0}")]
    MissingSource(PathBuf),
}
