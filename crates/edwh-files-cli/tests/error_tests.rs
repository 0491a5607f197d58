//! Error handling tests
//!
//! Tests for CLI error types and user-friendly messages.

use edwh_files_cli::error::CliError;
use edwh_files_compression::CompressionError;
use edwh_files_http::{HttpError, StatusCode};

#[test]
fn test_http_status_user_message() {
    let error = CliError::from(HttpError::HttpStatus {
        status: StatusCode::NOT_FOUND,
        message: "Not Found".to_string(),
    });
    assert_eq!(error.user_message(), "Something went wrong: 404 Not Found");
}

#[test]
fn test_http_status_without_body() {
    let error = CliError::from(HttpError::HttpStatus {
        status: StatusCode::BAD_GATEWAY,
        message: String::new(),
    });
    assert_eq!(error.user_message(), "Something went wrong: 502");
}

#[test]
fn test_timeout_user_message_points_at_config() {
    let error = CliError::from(HttpError::Timeout(std::time::Duration::from_secs(30)));
    let msg = error.user_message();
    assert!(msg.contains("30s"));
    assert!(msg.contains("timeout_secs"));
}

#[test]
fn test_invalid_argument_user_message() {
    let error = CliError::invalid_argument("missing.txt does not exist");
    let msg = error.user_message();
    assert!(msg.contains("Invalid argument"));
    assert!(msg.contains("missing.txt"));
    assert!(msg.contains("edwh-file --help"));
}

#[test]
fn test_config_error_user_message() {
    let error = CliError::Config("compression_level must be between 1 and 9".to_string());
    let msg = error.user_message();
    assert!(msg.contains("Configuration error"));
    assert!(msg.contains("edwh-file config"));
}

#[test]
fn test_unknown_format_user_message() {
    let error = CliError::from(CompressionError::UnknownFormat("rar".to_string()));
    let msg = error.user_message();
    assert!(msg.contains("'rar'"));
    assert!(msg.contains("edwh-file tasks"));
}

#[test]
fn test_compression_failure_user_message() {
    let error = CliError::from(CompressionError::CommandFailed {
        program: "pigz".to_string(),
        message: "broken pipe".to_string(),
    });
    assert!(error
        .user_message()
        .starts_with("Something went wrong during compression"));
}

#[test]
fn test_technical_details_include_variant() {
    let error = CliError::Internal("boom".to_string());
    assert!(error.technical_details().contains("Internal"));
}
