//! Backend trait and priority registry

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::{
    error::{CompressionError, Result},
    gzip::Gzip,
    paths::{self, normalize_level, resolve_source},
    pigz::Pigz,
    zip_archive::Zip,
};

/// A way to pack a file or directory into a single archive and back.
///
/// Implementors provide `compress_into`/`decompress_into`; the provided
/// `compress`/`decompress` resolve paths and pick default targets.
/// Both report `Ok(false)` when the target exists and `overwrite` is off.
pub trait Compression: Send + Sync {
    /// Short backend name (`zip`, `gzip`, `pigz`)
    fn name(&self) -> &'static str;

    /// Extensions this backend handles; the first one is used for new archives
    fn extensions(&self) -> &'static [&'static str];

    fn extension(&self) -> &'static str {
        self.extensions()[0]
    }

    /// Whether the backend can run on this machine
    fn is_available(&self) -> bool;

    /// Archive path for `source` with this backend's extension
    fn filepath(&self, source: &Path) -> PathBuf {
        paths::archive_path(source, self.extension())
    }

    /// File name component of [`Compression::filepath`]
    fn filename(&self, source: &Path) -> Option<String> {
        self.filepath(source)
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
    }

    fn compress_into(&self, source: &Path, target: &Path, level: u32, overwrite: bool)
        -> Result<bool>;

    fn decompress_into(&self, source: &Path, target: &Path, overwrite: bool) -> Result<bool>;

    /// Compress `source` (file or directory) into `target`, or next to the
    /// source when no target is given.
    fn compress(
        &self,
        source: &Path,
        target: Option<&Path>,
        level: u32,
        overwrite: bool,
    ) -> Result<bool> {
        let source = resolve_source(source)?;
        if !source.exists() {
            return Err(CompressionError::MissingSource(source));
        }

        let target = match target {
            Some(target) => target.to_path_buf(),
            None => self.filepath(&source),
        };
        if target == source {
            return Err(CompressionError::SameTarget(source));
        }

        debug!(backend = self.name(), source = %source.display(), target = %target.display(), "Compressing");
        self.compress_into(&source, &target, normalize_level(level), overwrite)
            .inspect_err(|e| error!("Something went wrong during compression: {e}"))
    }

    /// Unpack `source` into `target`, or next to the source with its last
    /// extension stripped when no target is given.
    fn decompress(&self, source: &Path, target: Option<&Path>, overwrite: bool) -> Result<bool> {
        let source = resolve_source(source)?;
        if !source.is_file() {
            return Err(CompressionError::MissingSource(source));
        }

        let target = match target {
            Some(target) => target.to_path_buf(),
            None => paths::decompressed_path(&source)?,
        };

        debug!(backend = self.name(), source = %source.display(), target = %target.display(), "Decompressing");
        self.decompress_into(&source, &target, overwrite)
            .inspect_err(|e| error!("Something went wrong during decompression: {e}"))
    }
}

/// One `(priority, extension) → backend` entry
#[derive(Clone, Copy)]
pub struct Registration {
    pub priority: u8,
    pub extension: &'static str,
    factory: fn() -> Box<dyn Compression>,
}

impl Registration {
    const fn new(priority: u8, extension: &'static str, factory: fn() -> Box<dyn Compression>) -> Self {
        Self {
            priority,
            extension,
            factory,
        }
    }

    /// Instantiate the backend
    pub fn backend(&self) -> Box<dyn Compression> {
        (self.factory)()
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("priority", &self.priority)
            .field("extension", &self.extension)
            .field("backend", &self.backend().name())
            .finish()
    }
}

fn zip_backend() -> Box<dyn Compression> {
    Box::new(Zip)
}

fn gzip_backend() -> Box<dyn Compression> {
    Box::new(Gzip)
}

fn pigz_backend() -> Box<dyn Compression> {
    Box::new(Pigz::default())
}

static REGISTRY: &[Registration] = &[
    Registration::new(0, "zip", zip_backend),
    Registration::new(1, "tgz", gzip_backend),
    Registration::new(1, "gz", gzip_backend),
    Registration::new(2, "tgz", pigz_backend),
    Registration::new(2, "gz", pigz_backend),
];

/// Available registrations, best first (by priority, then extension).
/// `extension` restricts the list to one extension.
pub fn registrations(extension: Option<&str>) -> Vec<Registration> {
    let mut found: Vec<Registration> = REGISTRY
        .iter()
        .filter(|r| extension.map_or(true, |ext| r.extension == ext))
        .filter(|r| r.backend().is_available())
        .copied()
        .collect();
    found.sort_by(|a, b| (b.priority, b.extension).cmp(&(a.priority, a.extension)));
    found
}

/// Best available backend overall
pub fn best() -> Option<Box<dyn Compression>> {
    registrations(None).first().map(Registration::backend)
}

/// Best available backend for an extension such as `zip`, `.gz` or ` tgz `
pub fn for_extension(extension: &str) -> Option<Box<dyn Compression>> {
    let extension = extension.trim().trim_matches('.').trim().to_ascii_lowercase();
    registrations(Some(&extension)).first().map(Registration::backend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registrations_sorted_best_first() {
        let all = registrations(None);
        assert!(!all.is_empty());
        for pair in all.windows(2) {
            assert!((pair[0].priority, pair[0].extension) >= (pair[1].priority, pair[1].extension));
        }
    }

    #[test]
    fn test_best_prefers_pigz_when_installed() {
        let best = best().unwrap();
        if Pigz::default().is_available() {
            assert_eq!(best.name(), "pigz");
        } else {
            assert_eq!(best.name(), "gzip");
        }
    }

    #[test]
    fn test_for_extension_normalizes_input() {
        assert_eq!(for_extension("zip").unwrap().name(), "zip");
        assert_eq!(for_extension(".zip").unwrap().name(), "zip");
        assert_eq!(for_extension(" ZIP ").unwrap().name(), "zip");
        assert!(for_extension("rar").is_none());
    }

    #[test]
    fn test_gz_family_resolves() {
        let gz = for_extension("gz").unwrap();
        assert!(matches!(gz.name(), "gzip" | "pigz"));
        assert_eq!(gz.extensions(), &["tgz", "gz"]);
    }

    #[test]
    fn test_registration_filter() {
        let zips = registrations(Some("zip"));
        assert_eq!(zips.len(), 1);
        assert_eq!(zips[0].priority, 0);
    }
}
