//! Transfer client settings

use std::time::Duration;

/// Settings for the reqwest client behind a [`TransferClient`](crate::TransferClient).
///
/// Defaults suit file transfers: no total timeout, so large uploads and
/// downloads are bounded only by the connect timeout and the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Total request timeout
    pub timeout: Option<Duration>,
    pub connect_timeout: Duration,
    /// Retries for GET and DELETE; uploads are sent once
    pub retry_count: u32,
    /// First backoff step, doubled per retry
    pub retry_delay: Duration,
    pub proxy: Option<String>,
    pub user_agent: String,
    /// 0 disables redirects
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: Duration::from_secs(10),
            retry_count: 3,
            retry_delay: Duration::from_secs(1),
            proxy: None,
            user_agent: format!("edwh-files/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
        }
    }
}

impl HttpConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_retry_count(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_have_no_total_timeout() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout, None);
        assert_eq!(config.retry_count, 3);
        assert!(config.user_agent.starts_with("edwh-files/"));
    }

    #[test]
    fn test_overrides() {
        let config = HttpConfig::default()
            .with_timeout(Duration::from_secs(120))
            .with_retry_count(0)
            .with_proxy("http://proxy.example.com:8080");

        assert_eq!(config.timeout, Some(Duration::from_secs(120)));
        assert_eq!(config.retry_count, 0);
        assert_eq!(config.proxy.as_deref(), Some("http://proxy.example.com:8080"));
    }
}
