use std::path::{Path, PathBuf};

use crate::format::Compression;

/// One record read from the archive stream.
///
/// `path` is the archive-relative name; `target_path` is filled in once the
/// name has been validated and resolved under the destination root.
#[derive(Clone, Debug)]
pub struct Entry {
    pub path: PathBuf,
    pub target_path: Option<PathBuf>,
    pub size: u64,
    pub mode: Option<u32>,
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(path: PathBuf, size: u64, mode: Option<u32>, kind: EntryKind) -> Self {
        Self {
            path,
            target_path: None,
            size,
            mode,
            kind,
        }
    }

    pub fn with_target_path(mut self, target_path: PathBuf) -> Self {
        self.target_path = Some(target_path);
        self
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    pub fn is_symlink(&self) -> bool {
        matches!(self.kind, EntryKind::Symlink { .. })
    }

    /// The link target as recorded in the archive, for symlink entries.
    pub fn symlink_target(&self) -> Option<&Path> {
        match &self.kind {
            EntryKind::Symlink { target } => Some(target),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink { target: PathBuf },
}

/// Summary of a completed extraction.
///
/// The system-tar backend fills `entries` best-effort from the verbose
/// listing; sizes are only known for the in-process backend.
#[derive(Clone, Debug)]
pub struct ExtractReport {
    pub compression: Compression,
    pub entry_count: usize,
    pub total_bytes: u64,
    pub entries: Vec<Entry>,
}
