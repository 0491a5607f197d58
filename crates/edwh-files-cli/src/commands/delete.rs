// Delete an upload through its deletion URL

use edwh_files_http::DeleteReceipt;

use super::{transfer_client, Command};
use crate::config::FilesConfig;
use crate::error::CliResult;
use crate::output;

pub struct DeleteCommand {
    url: String,
    config: FilesConfig,
}

impl DeleteCommand {
    pub fn new(url: String, config: FilesConfig) -> Self {
        Self { url, config }
    }

    pub async fn run(&self) -> CliResult<DeleteReceipt> {
        let client = transfer_client(&self.config, None)?;
        Ok(client.delete(&self.url).await?)
    }
}

#[async_trait::async_trait]
impl Command for DeleteCommand {
    async fn execute(&self) -> CliResult<()> {
        let receipt = self.run().await?;
        output::print_json(&receipt)
    }
}
