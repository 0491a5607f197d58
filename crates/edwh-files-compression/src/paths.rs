//! Path derivation for archives

use std::path::{Component, Path, PathBuf};

use crate::error::{CompressionError, Result};

/// Level used when the caller does not pick one (1 = fastest, 9 = smallest)
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 5;

/// Clamp a compression level into 1..=9
pub fn normalize_level(level: u32) -> u32 {
    level.clamp(1, 9)
}

/// Expand a leading `~` and make the path absolute
pub fn resolve_source(path: &Path) -> Result<PathBuf> {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .ok_or_else(|| CompressionError::InvalidPath("cannot expand ~: no home directory".into()))?
            .join(rest),
        Err(_) => path.to_path_buf(),
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(std::env::current_dir()?.join(expanded))
    }
}

/// `a.txt` → `a.txt.<ext>`; a directory has its extension replaced
pub fn archive_path(source: &Path, extension: &str) -> PathBuf {
    if source.is_file() {
        append_extension(source, extension)
    } else {
        source.with_extension(extension)
    }
}

/// `a.txt` → `a.txt.gz`; a directory becomes `<dir>.tgz`
pub fn gzip_path(source: &Path) -> PathBuf {
    if source.is_file() {
        append_extension(source, "gz")
    } else {
        source.with_extension("tgz")
    }
}

/// Strip only the last extension: `a.txt.gz` → `a.txt`, `data.tgz` → `data`
pub fn decompressed_path(source: &Path) -> Result<PathBuf> {
    if source.extension().is_none() {
        return Err(CompressionError::SameTarget(source.to_path_buf()));
    }
    Ok(source.with_extension(""))
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Whether the archive holds a tarball (`.tar.gz`, `.tgz`)
pub(crate) fn is_tarball(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| name.split('.').skip(1).any(|ext| ext == "tar" || ext == "tgz"))
        .unwrap_or(false)
}

/// Drop the first component of an archive member path, rejecting members
/// that would escape the extraction directory.
pub(crate) fn strip_first_component(path: &Path) -> Result<Option<PathBuf>> {
    let mut stripped = PathBuf::new();
    let mut skipped = false;
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => {
                if skipped {
                    stripped.push(part);
                }
                skipped = true;
            }
            _ => return Err(CompressionError::InvalidPath(path.display().to_string())),
        }
    }
    Ok((!stripped.as_os_str().is_empty()).then_some(stripped))
}

/// Symlink targets must stay relative and never climb out of their directory
pub(crate) fn check_link_target(member: &Path, link: &Path) -> Result<()> {
    let escapes = link
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(CompressionError::InvalidPath(format!(
            "{} -> {}",
            member.display(),
            link.display()
        )));
    }
    Ok(())
}

/// Fail unless `path` resolves (following symlinks) to somewhere under `root`.
/// Only the deepest existing ancestor is resolved, so this can run before
/// the directories are created. `root` must already be canonical.
pub(crate) fn ensure_within(root: &Path, path: &Path) -> Result<()> {
    let existing = path.ancestors().find(|p| p.exists()).unwrap_or(path);
    let resolved = existing.canonicalize()?;
    if resolved.starts_with(root) {
        Ok(())
    } else {
        Err(CompressionError::InvalidPath(path.display().to_string()))
    }
}
