//! In-process backend: `tar` crate over an optional gzip decoder.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::entry::{Entry, EntryKind, ExtractReport};
use crate::error::{Error, Result};
use crate::format::Compression;
use crate::options::{ExtractOptions, UnknownEntryPolicy};
use crate::sanitize;

/// Streams the archive forward-only and materializes each entry as it is
/// read. Entries are applied in archive order; a failure aborts at the
/// current entry and leaves prior output on disk.
pub struct StreamExtractor {
    compression: Compression,
}

impl StreamExtractor {
    pub fn new(compression: Compression) -> Self {
        Self { compression }
    }

    pub fn extract(
        &self,
        archive: &Path,
        destination: &Path,
        options: &ExtractOptions,
    ) -> Result<ExtractReport> {
        let file = File::open(archive).map_err(|e| Error::Open {
            path: archive.to_path_buf(),
            source: e,
        })?;
        ensure_directory(destination)?;

        let reader = self.compression.decoder(BufReader::new(file));
        let mut tar = tar::Archive::new(reader);

        let mut entries = Vec::new();
        let mut total_bytes = 0u64;

        for next in tar.entries().map_err(|e| self.read_error(e))? {
            let mut entry = next.map_err(|e| self.read_error(e))?;
            let raw_path = entry
                .path()
                .map_err(|_| Error::InvalidPath)?
                .into_owned();

            let resolved =
                match sanitize::resolve_entry_path(&raw_path, destination, options.strip_components)
                {
                    Ok(resolved) => resolved,
                    Err(Error::StripExhausted { .. }) => {
                        debug!(path = %raw_path.display(), "strip_components consumed entry name, skipping");
                        continue;
                    }
                    Err(e) => return Err(e),
                };

            let header = entry.header();
            let size = header.size().unwrap_or(0);
            let mode = header.mode().ok();
            let entry_type = header.entry_type();

            let kind = if entry_type.is_dir() {
                ensure_directory(&resolved.resolved)?;
                if options.preserve_modes {
                    apply_mode(&resolved.resolved, mode)?;
                }
                EntryKind::Directory
            } else if entry_type.is_symlink() {
                let target = entry
                    .link_name()
                    .map_err(|_| Error::InvalidPath)?
                    .ok_or(Error::InvalidPath)?
                    .into_owned();
                sanitize::resolve_link_target(&target, &resolved.resolved, destination)?;
                write_symlink(&target, &resolved.resolved)?;
                EntryKind::Symlink { target }
            } else if entry_type.is_file() {
                write_file(&mut entry, &resolved.resolved)?;
                if options.preserve_modes {
                    apply_mode(&resolved.resolved, mode)?;
                }
                EntryKind::File
            } else {
                match options.unknown_entries {
                    UnknownEntryPolicy::Skip => {
                        debug!(
                            path = %raw_path.display(),
                            kind = ?entry_type,
                            "skipping unsupported entry kind"
                        );
                        continue;
                    }
                    UnknownEntryPolicy::Fail => {
                        return Err(Error::UnsupportedEntry { path: raw_path });
                    }
                }
            };

            total_bytes += size;
            entries.push(
                Entry::new(resolved.original, size, mode, kind)
                    .with_target_path(resolved.resolved),
            );
        }

        Ok(ExtractReport {
            compression: self.compression,
            entry_count: entries.len(),
            total_bytes,
            entries,
        })
    }

    /// A read failure with a codec active is a decompression failure; with
    /// no codec the container itself is bad. The streaming stack does not
    /// let us separate the two more precisely.
    fn read_error(&self, source: std::io::Error) -> Error {
        if self.compression.is_compressed() {
            Error::Decompress { source }
        } else {
            Error::Corrupted
        }
    }
}

fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| Error::CreateDir {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

/// Parent directories are created lazily per file; the archive is not
/// required to list a directory before the files inside it.
fn write_file<R: Read>(content: &mut R, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        ensure_directory(parent)?;
    }

    let mut file = File::create(target).map_err(|e| Error::Write {
        path: target.to_path_buf(),
        source: e,
    })?;
    std::io::copy(content, &mut file).map_err(|e| Error::Write {
        path: target.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// A pre-existing file or link at the link path is replaced, so
/// re-extraction is idempotent for symlinks as well as files.
fn write_symlink(target: &Path, link: &Path) -> Result<()> {
    if let Some(parent) = link.parent() {
        ensure_directory(parent)?;
    }

    if std::fs::symlink_metadata(link).is_ok() {
        std::fs::remove_file(link).map_err(|e| Error::Write {
            path: link.to_path_buf(),
            source: e,
        })?;
    }

    shoal_fs::symlink(target, link).map_err(|source| Error::Symlink {
        target: target.to_path_buf(),
        link: link.to_path_buf(),
        source,
    })
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode {
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).map_err(|e| {
            Error::Write {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> Result<()> {
    Ok(())
}
