//! Tar and tar.gz extraction with path sanitization and staged placement.
//!
//! # Architecture
//!
//! - `format.rs` - compression codec selection and magic-byte detection
//! - `sanitize.rs` - entry name and symlink target validation
//! - `extract/` - the two backends (in-process stream, system tar)
//! - `workspace.rs` - staged extraction with atomic commit
//! - `entry.rs` / `options.rs` - shared types

pub use entry::{Entry, EntryKind, ExtractReport};
pub use error::{Error, Result};
pub use extract::{Backend, Extractor, StreamExtractor, SystemTar};
pub use format::{Compression, detect_compression, detect_from_reader};
pub use options::{ExtractOptions, UnknownEntryPolicy};
pub use sanitize::{ResolvedPath, resolve_entry_path, resolve_link_target};
pub use workspace::{StagedExtraction, extract_to_workspace};

pub mod entry;
mod error;
pub mod extract;
pub mod format;
pub mod options;
mod sanitize;
mod workspace;

use std::path::Path;

/// Extract `archive` under `destination` with the in-process backend and
/// default options.
pub fn extract_file(
    archive: &Path,
    destination: &Path,
    compression: Compression,
) -> Result<ExtractReport> {
    StreamExtractor::new(compression).extract(archive, destination, &ExtractOptions::default())
}
