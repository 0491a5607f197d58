// Show the effective configuration

use std::path::PathBuf;

use super::Command;
use crate::config::FilesConfig;
use crate::error::CliResult;
use crate::output;

pub struct ConfigCommand {
    config: FilesConfig,
    path: PathBuf,
}

impl ConfigCommand {
    /// `path` is the file the configuration was read from (or would be)
    pub fn new(config: FilesConfig, path: Option<PathBuf>) -> Self {
        Self {
            config,
            path: path.unwrap_or_else(FilesConfig::default_path),
        }
    }
}

#[async_trait::async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> CliResult<()> {
        let origin = if self.path.exists() { "" } else { " (not present)" };
        output::print_info(&format!("Config file: {}{}", self.path.display(), origin));
        print!("{}", self.config.to_toml()?);
        Ok(())
    }
}
