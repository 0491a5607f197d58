//! HTTP client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::HeaderMap, multipart::Form, Method, Response};
use tracing::debug;

use crate::{
    config::HttpConfig,
    error::{HttpError, Result},
    middleware::{RetryConfig, RetryMiddleware},
};

/// Mockable HTTP client trait.
///
/// Every method fails with `HttpError::HttpStatus` when the server answers
/// with a non-success status, so callers only ever see good responses.
#[async_trait]
pub trait HttpClientTrait: Send + Sync {
    /// Execute a GET request
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<Response>;

    /// Execute a multipart POST request (never retried)
    async fn post_multipart(&self, url: &str, headers: HeaderMap, form: Form) -> Result<Response>;

    /// Execute a DELETE request
    async fn delete(&self, url: &str, headers: HeaderMap) -> Result<Response>;
}

/// Production HTTP client
pub struct HttpClient {
    inner: reqwest::Client,
    timeout: Option<Duration>,
    retry: RetryMiddleware,
}

impl HttpClient {
    /// Create a new HTTP client with configuration
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .redirect(if config.max_redirects > 0 {
                reqwest::redirect::Policy::limited(config.max_redirects)
            } else {
                reqwest::redirect::Policy::none()
            });

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| HttpError::InvalidProxy(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let inner = builder
            .build()
            .map_err(|e| HttpError::BuildError(e.to_string()))?;

        let retry_config = RetryConfig {
            max_attempts: config.retry_count,
            initial_delay: config.retry_delay,
            ..Default::default()
        };

        Ok(Self {
            inner,
            timeout: config.timeout,
            retry: RetryMiddleware::new(retry_config),
        })
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        form: Option<Form>,
    ) -> Result<Response> {
        let url = url
            .parse::<url::Url>()
            .map_err(|e| HttpError::InvalidUrl(format!("{url}: {e}")))?;

        let mut request = self.inner.request(method, url).headers(headers);
        if let Some(form) = form {
            request = request.multipart(form);
        }

        let response = request.send().await.map_err(|e| match self.timeout {
            Some(timeout) if e.is_timeout() => HttpError::Timeout(timeout),
            _ => HttpError::RequestFailed(e),
        })?;

        // 1xx and 3xx pass through; only 4xx and 5xx are failures
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let message = response
                .text()
                .await
                .map(|body| body.trim().to_string())
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HttpError::HttpStatus { status, message });
        }

        Ok(response)
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<Response> {
        debug!("HTTP GET: {}", url);
        let headers = &headers;
        self.retry
            .execute(move || self.send(Method::GET, url, headers.clone(), None))
            .await
    }

    async fn post_multipart(&self, url: &str, headers: HeaderMap, form: Form) -> Result<Response> {
        debug!("HTTP POST (multipart): {}", url);
        self.send(Method::POST, url, headers, Some(form)).await
    }

    async fn delete(&self, url: &str, headers: HeaderMap) -> Result<Response> {
        debug!("HTTP DELETE: {}", url);
        let headers = &headers;
        self.retry
            .execute(move || self.send(Method::DELETE, url, headers.clone(), None))
            .await
    }
}
