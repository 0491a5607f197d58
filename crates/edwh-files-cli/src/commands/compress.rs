// Pack a file or directory into an archive

use std::path::{Path, PathBuf};

use edwh_files_compression::{best, for_extension, normalize_level, Compression, CompressionError};
use tracing::debug;

use super::Command;
use crate::config::FilesConfig;
use crate::error::{CliError, CliResult};
use crate::output;

/// Pick a backend: explicit format, then the configured one, then the best available
pub(crate) fn select_backend(
    format: Option<&str>,
    config: &FilesConfig,
) -> CliResult<Box<dyn Compression>> {
    match format.or(config.compression.as_deref()) {
        Some(extension) => for_extension(extension)
            .ok_or_else(|| CompressionError::UnknownFormat(extension.to_string()).into()),
        None => best().ok_or_else(|| CompressionError::UnknownFormat("any".to_string()).into()),
    }
}

/// Pack `source` into `directory`, returning the archive path.
///
/// Runs the backend on the blocking pool.
pub(crate) async fn pack_into(
    backend: Box<dyn Compression>,
    source: &Path,
    directory: &Path,
    level: u32,
) -> CliResult<PathBuf> {
    let name = backend.filename(source).ok_or_else(|| {
        CliError::invalid_argument(format!("{} has no usable file name", source.display()))
    })?;
    let target = directory.join(name);
    let source = source.to_path_buf();

    debug!(backend = backend.name(), target = %target.display(), "Packing for upload");
    let archive = target.clone();
    tokio::task::spawn_blocking(move || backend.compress(&source, Some(&archive), level, true))
        .await??;
    Ok(target)
}

pub struct CompressCommand {
    source: PathBuf,
    target: Option<PathBuf>,
    format: Option<String>,
    level: Option<u32>,
    overwrite: bool,
    config: FilesConfig,
}

impl CompressCommand {
    pub fn new(source: PathBuf, config: FilesConfig) -> Self {
        Self {
            source,
            target: None,
            format: None,
            level: None,
            overwrite: true,
            config,
        }
    }

    pub fn with_target(mut self, target: Option<PathBuf>) -> Self {
        self.target = target;
        self
    }

    pub fn with_format(mut self, format: Option<String>) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: Option<u32>) -> Self {
        self.level = level;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    fn level(&self) -> u32 {
        normalize_level(self.level.unwrap_or(self.config.compression_level))
    }

    /// Run the compression, returning the archive path when one was written
    pub async fn run(&self) -> CliResult<Option<PathBuf>> {
        let backend = select_backend(self.format.as_deref(), &self.config)?;
        let target = match &self.target {
            Some(target) => target.clone(),
            None => backend.filepath(&self.source),
        };

        let source = self.source.clone();
        let archive = target.clone();
        let level = self.level();
        let overwrite = self.overwrite;
        let written = tokio::task::spawn_blocking(move || {
            backend.compress(&source, Some(&archive), level, overwrite)
        })
        .await??;

        Ok(written.then_some(target))
    }
}

#[async_trait::async_trait]
impl Command for CompressCommand {
    async fn execute(&self) -> CliResult<()> {
        match self.run().await? {
            Some(target) => output::print_success(&format!("Compressed to {}", target.display())),
            None => output::print_warning("Target already exists; pass it explicitly or allow overwriting"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_backend_prefers_explicit_format() {
        let config = FilesConfig {
            compression: Some("tgz".to_string()),
            ..Default::default()
        };
        let backend = select_backend(Some("zip"), &config).unwrap();
        assert_eq!(backend.name(), "zip");

        let backend = select_backend(None, &config).unwrap();
        assert_eq!(backend.extension(), "tgz");
    }

    #[test]
    fn test_select_backend_unknown_format() {
        let result = select_backend(Some("rar"), &FilesConfig::default());
        assert!(matches!(
            result,
            Err(CliError::Compression(CompressionError::UnknownFormat(ext))) if ext == "rar"
        ));
    }

    #[tokio::test]
    async fn test_compress_command_writes_archive() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.txt");
        std::fs::write(&source, "hello").unwrap();

        let cmd = CompressCommand::new(source.clone(), FilesConfig::default())
            .with_format(Some("zip".to_string()));
        let archive = cmd.run().await.unwrap().unwrap();

        assert_eq!(archive, dir.path().join("notes.txt.zip"));
        assert!(archive.is_file());
    }

    #[tokio::test]
    async fn test_compress_command_respects_no_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("notes.txt");
        std::fs::write(&source, "hello").unwrap();
        std::fs::write(dir.path().join("notes.txt.zip"), "existing").unwrap();

        let cmd = CompressCommand::new(source, FilesConfig::default())
            .with_format(Some("zip".to_string()))
            .with_overwrite(false);
        assert_eq!(cmd.run().await.unwrap(), None);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("notes.txt.zip")).unwrap(),
            "existing"
        );
    }

    #[tokio::test]
    async fn test_pack_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("project");
        std::fs::create_dir(&source).unwrap();
        std::fs::write(source.join("a.txt"), "a").unwrap();
        let out = tempfile::tempdir().unwrap();

        let backend = for_extension("zip").unwrap();
        let archive = pack_into(backend, &source, out.path(), 5).await.unwrap();
        assert_eq!(archive, out.path().join("project.zip"));
        assert!(archive.is_file());
    }
}
