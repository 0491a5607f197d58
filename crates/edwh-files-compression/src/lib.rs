//! Compression backends for edwh-files
//!
//! Every backend implements [`Compression`]. Backends register under one or
//! more file extensions with a priority; [`best`] and [`for_extension`] pick
//! the highest-priority backend that is usable on this machine.
//!
//! | backend | extensions | priority | needs |
//! |---------|------------|----------|-------|
//! | [`Zip`]  | `zip`      | 0 | nothing |
//! | [`Gzip`] | `tgz`, `gz` | 1 | nothing |
//! | [`Pigz`] | `tgz`, `gz` | 2 | `pigz` and `unpigz` on `PATH` |

pub mod error;
pub mod gzip;
pub mod paths;
pub mod pigz;
pub mod registry;
pub mod zip_archive;

pub use error::{CompressionError, Result};
pub use gzip::Gzip;
pub use paths::{decompressed_path, normalize_level, resolve_source, DEFAULT_COMPRESSION_LEVEL};
pub use pigz::Pigz;
pub use registry::{best, for_extension, registrations, Compression, Registration};
pub use zip_archive::Zip;
