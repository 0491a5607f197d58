//! transfer.sh protocol client
//!
//! The server accepts multipart uploads on its root URL and answers with the
//! public download URL as plain text. The deletion URL comes back in the
//! `x-url-delete` header. Limits and encryption are requested through
//! custom headers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};

use crate::{
    client::{HttpClient, HttpClientTrait},
    config::HttpConfig,
    error::{HttpError, Result},
};

/// Server used when none is configured
pub const DEFAULT_SERVER: &str = "https://files.edwh.nl";

const MAX_DOWNLOADS: &str = "max-downloads";
const MAX_DAYS: &str = "max-days";
const ENCRYPT_PASSWORD: &str = "x-encrypt-password";
const DECRYPT_PASSWORD: &str = "x-decrypt-password";
const URL_DELETE: &str = "x-url-delete";

/// Called with `(bytes transferred so far, total bytes if known)`
pub type ProgressCallback = Arc<dyn Fn(u64, Option<u64>) + Send + Sync>;

/// Prefix `https://` unless the URL already carries an http(s) scheme
pub fn require_protocol(url: &str) -> String {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// File name a download is stored under when no output path is given
pub fn default_output_name(url: &str) -> Result<String> {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    without_query
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map(str::to_string)
        .ok_or_else(|| HttpError::InvalidUrl(format!("{url}: no file name to save to")))
}

/// Headers controlling how the server stores an upload
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    /// How often the file may be downloaded
    pub max_downloads: Option<u32>,
    /// How many days the file stays available
    pub max_days: Option<u32>,
    /// Server-side encryption password
    pub encrypt: Option<String>,
}

impl UploadOptions {
    /// Zero limits and empty passwords count as unset.
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(n) = self.max_downloads.filter(|n| *n > 0) {
            insert_header(&mut headers, MAX_DOWNLOADS, &n.to_string())?;
        }
        if let Some(n) = self.max_days.filter(|n| *n > 0) {
            insert_header(&mut headers, MAX_DAYS, &n.to_string())?;
        }
        if let Some(password) = self.encrypt.as_deref().filter(|p| !p.is_empty()) {
            insert_header(&mut headers, ENCRYPT_PASSWORD, password)?;
        }
        Ok(headers)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    /// Password for server-side decryption
    pub decrypt: Option<String>,
}

impl DownloadOptions {
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(password) = self.decrypt.as_deref().filter(|p| !p.is_empty()) {
            insert_header(&mut headers, DECRYPT_PASSWORD, password)?;
        }
        Ok(headers)
    }
}

fn insert_header(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<()> {
    let value = HeaderValue::from_str(value).map_err(|e| HttpError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}

/// Result of an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    pub status: u16,
    /// Public download URL
    pub url: String,
    /// URL that deletes the upload, when the server hands one out
    pub delete: Option<String>,
}

/// Result of a download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadReceipt {
    pub status: u16,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Result of a deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteReceipt {
    pub status: u16,
    pub response: String,
}

/// Client for a transfer.sh compatible server
pub struct TransferClient {
    http: Arc<dyn HttpClientTrait>,
    server: String,
}

impl TransferClient {
    /// Create a client for `server` using a fresh HTTP client
    pub fn new(config: HttpConfig, server: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(Arc::new(HttpClient::new(&config)?), server))
    }

    /// Create a client on top of an existing (possibly mocked) HTTP client
    pub fn with_client(http: Arc<dyn HttpClientTrait>, server: impl Into<String>) -> Self {
        Self {
            http,
            server: require_protocol(&server.into()),
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    /// Upload a single file to the server root
    pub async fn upload(
        &self,
        path: &Path,
        options: &UploadOptions,
        progress: Option<ProgressCallback>,
    ) -> Result<UploadReceipt> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                HttpError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("{} has no usable file name", path.display()),
                ))
            })?;

        let file = tokio::fs::File::open(path).await?;
        let length = file.metadata().await?.len();
        debug!(file = %path.display(), bytes = length, "Uploading");

        let stream = ReaderStream::new(file);
        let body = match progress {
            Some(callback) => {
                let mut sent = 0u64;
                Body::wrap_stream(stream.inspect(move |chunk| {
                    if let Ok(bytes) = chunk {
                        sent += bytes.len() as u64;
                        callback(sent, Some(length));
                    }
                }))
            }
            None => Body::wrap_stream(stream),
        };

        let part = Part::stream_with_length(body, length).file_name(name.clone());
        let form = Form::new().part(name, part);

        let response = self
            .http
            .post_multipart(&self.server, options.headers()?, form)
            .await?;

        let status = response.status().as_u16();
        let delete = response
            .headers()
            .get(URL_DELETE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let url = response.text().await?.trim().to_string();

        info!(url = %url, "Upload complete");
        Ok(UploadReceipt {
            status,
            url,
            delete,
        })
    }

    /// Stream `url` into `destination`.
    ///
    /// The destination is only created once the server has answered with a
    /// success status; a partially written file is removed on failure.
    pub async fn download(
        &self,
        url: &str,
        destination: &Path,
        options: &DownloadOptions,
        progress: Option<ProgressCallback>,
    ) -> Result<DownloadReceipt> {
        let url = require_protocol(url);
        let response = self.http.get(&url, options.headers()?).await?;
        let status = response.status().as_u16();
        let total = response.content_length();

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::File::create(destination).await?;
        let mut stream = response.bytes_stream();
        let mut downloaded = 0u64;

        let written: Result<()> = async {
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk).await?;
                downloaded += chunk.len() as u64;
                if let Some(callback) = &progress {
                    callback(downloaded, total);
                }
            }
            file.flush().await?;
            Ok(())
        }
        .await;

        if let Err(e) = written {
            drop(file);
            if let Err(cleanup) = tokio::fs::remove_file(destination).await {
                warn!("Could not remove partial download {}: {}", destination.display(), cleanup);
            }
            return Err(e);
        }

        info!(path = %destination.display(), bytes = downloaded, "Download complete");
        Ok(DownloadReceipt {
            status,
            path: destination.to_path_buf(),
            bytes: downloaded,
        })
    }

    /// Delete an upload through its deletion URL
    pub async fn delete(&self, deletion_url: &str) -> Result<DeleteReceipt> {
        let url = require_protocol(deletion_url);
        let response = self.http.delete(&url, HeaderMap::new()).await?;
        let status = response.status().as_u16();
        let response = response.text().await?.trim().to_string();
        Ok(DeleteReceipt { status, response })
    }
}
