// Download a file, optionally unpacking it

use std::path::PathBuf;

use edwh_files_http::{default_output_name, DownloadOptions, DownloadReceipt};

use super::decompress::unpack;
use super::{transfer_client, Command};
use crate::config::FilesConfig;
use crate::error::CliResult;
use crate::logging;
use crate::output::{self, OutputStyle};
use crate::progress::TransferProgress;

pub struct DownloadCommand {
    url: String,
    output: Option<PathBuf>,
    options: DownloadOptions,
    unpack: bool,
    config: FilesConfig,
}

impl DownloadCommand {
    pub fn new(url: String, config: FilesConfig) -> Self {
        Self {
            url,
            output: None,
            options: DownloadOptions::default(),
            unpack: false,
            config,
        }
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_options(mut self, options: DownloadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_unpack(mut self, unpack: bool) -> Self {
        self.unpack = unpack;
        self
    }

    /// Output path: explicit, or the last URL segment in the working directory
    pub fn destination(&self) -> CliResult<PathBuf> {
        match &self.output {
            Some(output) => Ok(output.clone()),
            None => Ok(PathBuf::from(default_output_name(&self.url)?)),
        }
    }

    /// Download, then unpack when asked; returns the receipt and the unpacked path
    pub async fn run(&self) -> CliResult<(DownloadReceipt, Option<PathBuf>)> {
        let destination = self.destination()?;
        let client = transfer_client(&self.config, None)?;

        let progress = TransferProgress::new(&format!("Downloading {}", destination.display()));
        let receipt = client
            .download(&self.url, &destination, &self.options, Some(progress.callback()))
            .await;
        progress.finish();
        let receipt = receipt?;

        if !self.unpack {
            return Ok((receipt, None));
        }
        logging::debug(&format!("Unpacking {}", receipt.path.display()));
        let unpacked = unpack(&receipt.path, None, true).await?;
        Ok((receipt, unpacked))
    }
}

#[async_trait::async_trait]
impl Command for DownloadCommand {
    async fn execute(&self) -> CliResult<()> {
        let (receipt, unpacked) = self.run().await?;
        let style = OutputStyle::stderr();
        output::print_success(&format!(
            "Saved {} ({} bytes)",
            style.link(&receipt.path.display().to_string()),
            receipt.bytes
        ));
        if let Some(unpacked) = unpacked {
            output::print_success(&format!(
                "Unpacked to {}",
                style.link(&unpacked.display().to_string())
            ));
        }
        Ok(())
    }
}
