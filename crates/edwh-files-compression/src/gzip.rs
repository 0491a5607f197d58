//! Gzip backend (flate2 + tar, in-process)
//!
//! Directories become `<dir>.tgz` holding the directory under its own name;
//! single files become a plain `.gz` stream. Extraction of a tarball strips
//! that leading directory so the contents land directly in the target.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use tar::EntryType;

use crate::error::{CompressionError, Result};
use crate::paths::{self, check_link_target, ensure_within, is_tarball, strip_first_component};
use crate::registry::Compression;

#[derive(Debug, Clone, Copy, Default)]
pub struct Gzip;

impl Compression for Gzip {
    fn name(&self) -> &'static str {
        "gzip"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["tgz", "gz"]
    }

    fn is_available(&self) -> bool {
        true
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

        let out = BufWriter::new(File::create(target)?);
        let mut encoder = GzEncoder::new(out, flate2::Compression::new(level));
        if source.is_dir() {
            encoder = write_tarball(source, encoder)?;
        } else {
            io::copy(&mut BufReader::new(File::open(source)?), &mut encoder)?;
        }
        encoder.finish()?.flush()?;
        Ok(true)
    }

    fn decompress_into(&self, source: &Path, target: &Path, overwrite: bool) -> Result<bool> {
        if target.exists() && !overwrite {
            return Ok(false);
        }

        let decoder = GzDecoder::new(BufReader::new(File::open(source)?));
        if is_tarball(source) {
            unpack_tarball(decoder, target)?;
        } else {
            write_stream(decoder, target)?;
        }
        Ok(true)
    }
}

/// Write `source` as a tar stream with the directory's own name as root
pub(crate) fn write_tarball<W: Write>(source: &Path, writer: W) -> Result<W> {
    let root = source
        .file_name()
        .ok_or_else(|| CompressionError::InvalidPath(source.display().to_string()))?;
    let mut builder = tar::Builder::new(writer);
    builder.append_dir_all(root, source)?;
    Ok(builder.into_inner()?)
}

/// Extract a tar stream into `target`, dropping each member's first component
pub(crate) fn unpack_tarball<R: Read>(reader: R, target: &Path) -> Result<()> {
    fs::create_dir_all(target)?;
    let root = target.canonicalize()?;
    let mut archive = tar::Archive::new(reader);
    for entry in archive.entries()? {
        let mut entry = entry?;
        let member = entry.path()?.into_owned();
        let Some(relative) = strip_first_component(&member)? else {
            continue;
        };
        let out = root.join(relative);
        if let Some(parent) = out.parent() {
            ensure_within(&root, parent)?;
            fs::create_dir_all(parent)?;
            ensure_within(&root, parent)?;
        }
        // never write through a link left behind by an earlier member
        if fs::symlink_metadata(&out).is_ok_and(|m| m.file_type().is_symlink()) {
            fs::remove_file(&out)?;
        }

        match entry.header().entry_type() {
            EntryType::Symlink => {
                let link = link_name(&entry, &member)?;
                check_link_target(&member, &link)?;
                entry.unpack(&out)?;
            }
            EntryType::Link => {
                // hard link names are archive members, not filesystem paths
                let link = link_name(&entry, &member)?;
                let source = strip_first_component(&link)?
                    .map(|relative| root.join(relative))
                    .ok_or_else(|| CompressionError::InvalidPath(link.display().to_string()))?;
                ensure_within(&root, &source)?;
                if out.exists() {
                    fs::remove_file(&out)?;
                }
                fs::hard_link(&source, &out)?;
            }
            _ => {
                entry.unpack(&out)?;
            }
        }
    }
    Ok(())
}

fn link_name<R: Read>(entry: &tar::Entry<'_, R>, member: &Path) -> Result<PathBuf> {
    entry
        .link_name()?
        .map(|link| link.into_owned())
        .ok_or_else(|| CompressionError::InvalidPath(member.display().to_string()))
}

pub(crate) fn write_stream<R: Read>(mut reader: R, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(target)?);
    io::copy(&mut reader, &mut out)?;
    out.flush()?;
    Ok(())
}
