//! Zip backend (deflate, in-process)

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use walkdir::WalkDir;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{CompressionError, Result};
use crate::registry::Compression;

#[derive(Debug, Clone, Copy, Default)]
pub struct Zip;

impl Compression for Zip {
    fn name(&self) -> &'static str {
        "zip"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["zip"]
    }

    fn is_available(&self) -> bool {
        true
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

        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(level as i32));
        let mut writer = ZipWriter::new(BufWriter::new(File::create(target)?));

        if source.is_dir() {
            for entry in WalkDir::new(source).sort_by_file_name() {
                let entry = entry.map_err(|e| CompressionError::Io(e.into()))?;
                if !entry.file_type().is_file() || entry.path() == target {
                    continue;
                }
                let relative = entry
                    .path()
                    .strip_prefix(source)
                    .map_err(|_| CompressionError::InvalidPath(entry.path().display().to_string()))?;
                let name = archive_name(relative)?;
                writer.start_file(name, options)?;
                io::copy(&mut BufReader::new(File::open(entry.path())?), &mut writer)?;
            }
        } else {
            let name = source
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| CompressionError::InvalidPath(source.display().to_string()))?;
            writer.start_file(name, options)?;
            io::copy(&mut BufReader::new(File::open(source)?), &mut writer)?;
        }

        writer.finish()?.flush()?;
        Ok(true)
    }

    fn decompress_into(&self, source: &Path, target: &Path, overwrite: bool) -> Result<bool> {
        let mut archive = ZipArchive::new(BufReader::new(File::open(source)?))?;

        // a single file member is extracted as the target itself
        if archive.len() == 1 {
            let mut entry = archive.by_index(0)?;
            if !entry.is_dir() {
                let member = entry
                    .enclosed_name()
                    .and_then(|p| p.file_name().map(|n| n.to_os_string()))
                    .ok_or_else(|| CompressionError::InvalidPath(entry.name().to_string()))?;

                let target = if target.is_dir() {
                    target.join(member)
                } else {
                    target.to_path_buf()
                };
                if target.exists() && !overwrite {
                    return Ok(false);
                }
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                copy_out(&mut entry, &target)?;
                return Ok(true);
            }
        }

        fs::create_dir_all(target)?;
        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let relative = entry
                .enclosed_name()
                .map(|p| p.to_path_buf())
                .ok_or_else(|| CompressionError::InvalidPath(entry.name().to_string()))?;
            let out = target.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&out)?;
                continue;
            }
            if out.exists() && !overwrite {
                continue;
            }
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent)?;
            }
            copy_out(&mut entry, &out)?;
        }

        Ok(true)
    }
}

fn copy_out(entry: &mut impl Read, path: &Path) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    io::copy(entry, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Zip member names always use `/`
fn archive_name(relative: &Path) -> Result<String> {
    let parts = relative
        .components()
        .map(|c| {
            c.as_os_str()
                .to_str()
                .ok_or_else(|| CompressionError::InvalidPath(relative.display().to_string()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join("/"))
}
