//! HTTP plumbing for edwh-files
//!
//! Wraps reqwest behind a mockable client and speaks the transfer.sh
//! protocol used by files.edwh.nl.
//!
//! ## Features
//!
//! - **Trait-based design**: Mockable via `HttpClientTrait`
//! - **Configurable**: Timeouts, retries, proxy, user-agent
//! - **Middleware support**: Retry logic with exponential backoff
//! - **Transfers**: Multipart upload, streaming download, deletion

pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod transfer;

pub use client::{HttpClient, HttpClientTrait};
pub use config::HttpConfig;
pub use error::{HttpError, Result};
pub use middleware::{RetryConfig, RetryMiddleware};
pub use transfer::{
    default_output_name, require_protocol, DeleteReceipt, DownloadOptions, DownloadReceipt,
    ProgressCallback, TransferClient, UploadOptions, UploadReceipt, DEFAULT_SERVER,
};

/// Re-export commonly used types
pub use reqwest::{header, Method, Response, StatusCode};
