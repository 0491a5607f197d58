// Command handlers for the `file` namespace

pub mod compress;
pub mod config;
pub mod decompress;
pub mod delete;
pub mod download;
pub mod tasks;
pub mod upload;

pub use compress::CompressCommand;
pub use config::ConfigCommand;
pub use decompress::DecompressCommand;
pub use delete::DeleteCommand;
pub use download::DownloadCommand;
pub use tasks::TasksCommand;
pub use upload::UploadCommand;

use edwh_files_http::TransferClient;

use crate::config::FilesConfig;
use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self) -> CliResult<()>;
}

/// Transfer client for `server`, falling back to the configured one
pub(crate) fn transfer_client(config: &FilesConfig, server: Option<&str>) -> CliResult<TransferClient> {
    let server = server.unwrap_or(&config.server);
    Ok(TransferClient::new(config.http_config(), server)?)
}
