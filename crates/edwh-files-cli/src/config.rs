//! Configuration loading
//!
//! Sources, lowest precedence first: built-in defaults, the TOML file
//! (`$CONFIG_DIR/edwh/files.toml` or `--config`), `EDWH_FILES_*` environment
//! variables. Command-line flags override all of these.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use edwh_files_compression::DEFAULT_COMPRESSION_LEVEL;
use edwh_files_http::{HttpConfig, DEFAULT_SERVER};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Environment prefix (`EDWH_FILES_SERVER`, `EDWH_FILES_COMPRESSION_LEVEL`, ...)
pub const ENV_PREFIX: &str = "EDWH_FILES";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesConfig {
    /// transfer.sh server to talk to
    #[serde(default = "default_server")]
    pub server: String,

    /// Preferred archive extension for packing (`zip`, `tgz`, `gz`)
    #[serde(default)]
    pub compression: Option<String>,

    #[serde(default = "default_compression_level")]
    pub compression_level: u32,

    /// Retries for downloads and deletions
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Total request timeout; unset lets large transfers finish
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub proxy: Option<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            compression: None,
            compression_level: default_compression_level(),
            retry_count: default_retry_count(),
            timeout_secs: None,
            proxy: None,
        }
    }
}

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

fn default_compression_level() -> u32 {
    DEFAULT_COMPRESSION_LEVEL
}

fn default_retry_count() -> u32 {
    3
}

impl FilesConfig {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("edwh")
            .join("files.toml")
    }

    /// Load configuration. An explicit `path` must exist; the default
    /// location is optional.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::default_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        let config = Config::builder()
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(required))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let files: FilesConfig = config.try_deserialize()?;
        files.validate()?;
        Ok(files)
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.server.trim().is_empty() {
            return Err(CliError::Config("server must not be empty".to_string()));
        }
        if !(1..=9).contains(&self.compression_level) {
            return Err(CliError::Config(format!(
                "compression_level must be between 1 and 9, got {}",
                self.compression_level
            )));
        }
        Ok(())
    }

    /// HTTP settings for transfers
    pub fn http_config(&self) -> HttpConfig {
        let mut http = HttpConfig::default().with_retry_count(self.retry_count);
        if let Some(secs) = self.timeout_secs {
            http = http.with_timeout(Duration::from_secs(secs));
        }
        if let Some(proxy) = &self.proxy {
            http = http.with_proxy(proxy.clone());
        }
        http
    }

    /// Render as TOML
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Internal(format!("could not render configuration: {e}")))
    }
}
