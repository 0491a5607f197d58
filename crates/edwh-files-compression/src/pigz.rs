//! Pigz backend: same archive layout as [`Gzip`](crate::Gzip), but the
//! deflate work is piped through the parallel `pigz`/`unpigz` binaries.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use tracing::debug;

use crate::error::{CompressionError, Result};
use crate::gzip::{unpack_tarball, write_tarball};
use crate::paths::{self, is_tarball};
use crate::registry::Compression;

#[derive(Debug, Clone)]
pub struct Pigz {
    compressor: &'static str,
    decompressor: &'static str,
}

impl Default for Pigz {
    fn default() -> Self {
        Self {
            compressor: "pigz",
            decompressor: "unpigz",
        }
    }
}

impl Pigz {
    fn program(&self, name: &str) -> Result<PathBuf> {
        which::which(name).map_err(|_| CompressionError::Unavailable(name.to_string()))
    }
}

impl Compression for Pigz {
    fn name(&self) -> &'static str {
        "pigz"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["tgz", "gz"]
    }

    fn is_available(&self) -> bool {
        which::which(self.compressor).is_ok() && which::which(self.decompressor).is_ok()
    }

    fn filepath(&self, source: &Path) -> PathBuf {
        paths::gzip_path(source)
    }

    fn compress_into(
        &self,
        source: &Path,
        target: &Path,
        level: u32,
        overwrite: bool,
    ) -> Result<bool> {
        if target.exists() && !overwrite {
            return Ok(false);
        }

        let pigz = self.program(self.compressor)?;
        let out = File::create(target)?;
        let mut command = Command::new(&pigz);
        command
            .arg(format!("-{level}"))
            .arg("-c")
            .stdout(Stdio::from(out))
            .stderr(Stdio::piped());

        if source.is_dir() {
            let mut child = command.stdin(Stdio::piped()).spawn()?;
            let stdin = child
                .stdin
                .take()
                .ok_or_else(|| command_failed(self.compressor, "stdin unavailable"))?;
            match write_tarball(source, stdin) {
                Ok(stdin) => drop(stdin),
                Err(e) => return Err(abort(child, e)),
            }
            wait(self.compressor, child)?;
        } else {
            let output = command.arg(source).output()?;
            check(self.compressor, output.status.success(), &output.stderr)?;
        }

        debug!(program = %pigz.display(), target = %target.display(), "pigz finished");
        Ok(true)
    }

    fn decompress_into(&self, source: &Path, target: &Path, overwrite: bool) -> Result<bool> {
        if target.exists() && !overwrite {
            return Ok(false);
        }

        let unpigz = self.program(self.decompressor)?;
        let mut command = Command::new(&unpigz);
        command.arg("-c").arg(source).stderr(Stdio::piped());

        if is_tarball(source) {
            let mut child = command.stdout(Stdio::piped()).spawn()?;
            let stdout = child
                .stdout
                .take()
                .ok_or_else(|| command_failed(self.decompressor, "stdout unavailable"))?;
            if let Err(e) = unpack_tarball(stdout, target) {
                return Err(abort(child, e));
            }
            wait(self.decompressor, child)?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let out = File::create(target)?;
            let output = command.stdout(Stdio::from(out)).output()?;
            check(self.decompressor, output.status.success(), &output.stderr)?;
        }

        Ok(true)
    }
}

fn wait(program: &str, child: Child) -> Result<()> {
    let output = child.wait_with_output()?;
    check(program, output.status.success(), &output.stderr)
}

/// Kill and reap a child whose stream failed, keeping the original error
fn abort(mut child: Child, error: CompressionError) -> CompressionError {
    if let Err(e) = child.kill() {
        debug!("could not kill child process: {e}");
    }
    if let Err(e) = child.wait() {
        debug!("could not reap child process: {e}");
    }
    error
}

fn check(program: &str, success: bool, stderr: &[u8]) -> Result<()> {
    if success {
        Ok(())
    } else {
        Err(command_failed(program, String::from_utf8_lossy(stderr).trim()))
    }
}

fn command_failed(program: &str, message: impl Into<String>) -> CompressionError {
    CompressionError::CommandFailed {
        program: program.to_string(),
        message: message.into(),
    }
}
