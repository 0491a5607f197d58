// Upload a file, packing directories first

use std::path::PathBuf;

use edwh_files_compression::normalize_level;
use edwh_files_http::{UploadOptions, UploadReceipt};
use tracing::debug;

use super::compress::{pack_into, select_backend};
use super::{transfer_client, Command};
use crate::config::FilesConfig;
use crate::error::{CliError, CliResult};
use crate::logging::VerbosityLevel;
use crate::output;
use crate::progress::{create_spinner, TransferProgress};

pub struct UploadCommand {
    file: PathBuf,
    server: Option<String>,
    options: UploadOptions,
    compress: bool,
    compression: Option<String>,
    level: Option<u32>,
    config: FilesConfig,
}

impl UploadCommand {
    pub fn new(file: PathBuf, config: FilesConfig) -> Self {
        Self {
            file,
            server: None,
            options: UploadOptions::default(),
            compress: false,
            compression: None,
            level: None,
            config,
        }
    }

    pub fn with_server(mut self, server: Option<String>) -> Self {
        self.server = server;
        self
    }

    pub fn with_options(mut self, options: UploadOptions) -> Self {
        self.options = options;
        self
    }

    /// Pack plain files too, not only directories
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_compression(mut self, compression: Option<String>) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_level(mut self, level: Option<u32>) -> Self {
        self.level = level;
        self
    }

    fn should_pack(&self) -> bool {
        self.file.is_dir() || self.compress || self.compression.is_some()
    }

    /// Upload and return the server's receipt
    pub async fn run(&self) -> CliResult<UploadReceipt> {
        if !self.file.exists() {
            return Err(CliError::invalid_argument(format!(
                "{} does not exist",
                self.file.display()
            )));
        }

        // keeps the packed archive alive until the upload finishes
        let workdir = tempfile::tempdir()?;
        let path = if self.should_pack() {
            let backend = select_backend(self.compression.as_deref(), &self.config)?;
            let level = normalize_level(self.level.unwrap_or(self.config.compression_level));
            let spinner = VerbosityLevel::Normal
                .should_output()
                .then(|| create_spinner(&format!("Packing {}", self.file.display())));
            let packed = pack_into(backend, &self.file, workdir.path(), level).await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            packed?
        } else {
            self.file.clone()
        };
        debug!(path = %path.display(), "Prepared upload");

        let client = transfer_client(&self.config, self.server.as_deref())?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let progress = TransferProgress::new(&format!("Uploading {name}"));
        let receipt = client
            .upload(&path, &self.options, Some(progress.callback()))
            .await;
        progress.finish();

        Ok(receipt?)
    }
}

#[async_trait::async_trait]
impl Command for UploadCommand {
    async fn execute(&self) -> CliResult<()> {
        let receipt = self.run().await?;
        output::print_json(&receipt)?;
        if let Some(delete) = &receipt.delete {
            output::print_info(&format!("Delete with: edwh-file delete {delete}"));
        }
        Ok(())
    }
}
