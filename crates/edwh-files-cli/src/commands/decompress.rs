// Unpack an archive

use std::path::{Path, PathBuf};

use edwh_files_compression::{decompressed_path, for_extension, Compression, CompressionError};

use super::Command;
use crate::error::CliResult;
use crate::output;

/// Backend matching the archive's extension
pub(crate) fn backend_for(archive: &Path) -> CliResult<Box<dyn Compression>> {
    let extension = archive
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    for_extension(extension)
        .ok_or_else(|| CompressionError::UnknownFormat(extension.to_string()).into())
}

/// Unpack `archive` next to itself (or into `target`) on the blocking pool.
/// Returns the unpacked path when something was written.
pub(crate) async fn unpack(
    archive: &Path,
    target: Option<&Path>,
    overwrite: bool,
) -> CliResult<Option<PathBuf>> {
    let backend = backend_for(archive)?;
    let target = match target {
        Some(target) => target.to_path_buf(),
        None => decompressed_path(archive)?,
    };

    let source = archive.to_path_buf();
    let destination = target.clone();
    let written = tokio::task::spawn_blocking(move || {
        backend.decompress(&source, Some(&destination), overwrite)
    })
    .await??;

    Ok(written.then_some(target))
}

pub struct DecompressCommand {
    source: PathBuf,
    target: Option<PathBuf>,
    overwrite: bool,
}

impl DecompressCommand {
    pub fn new(source: PathBuf) -> Self {
        Self {
            source,
            target: None,
            overwrite: true,
        }
    }

    pub fn with_target(mut self, target: Option<PathBuf>) -> Self {
        self.target = target;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub async fn run(&self) -> CliResult<Option<PathBuf>> {
        unpack(&self.source, self.target.as_deref(), self.overwrite).await
    }
}

#[async_trait::async_trait]
impl Command for DecompressCommand {
    async fn execute(&self) -> CliResult<()> {
        match self.run().await? {
            Some(target) => output::print_success(&format!("Decompressed to {}", target.display())),
            None => output::print_warning("Target already exists; pass it explicitly or allow overwriting"),
        }
        Ok(())
    }
}
