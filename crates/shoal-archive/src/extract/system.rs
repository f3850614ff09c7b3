//! External-process backend: delegate to the platform `tar` binary.
//!
//! The exit status is the authoritative success signal; the verbose
//! listing is parsed only to give the report a best-effort entry list.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::entry::{Entry, EntryKind, ExtractReport};
use crate::error::{Error, Result};
use crate::format::Compression;
use crate::options::ExtractOptions;

pub struct SystemTar {
    compression: Compression,
    program: PathBuf,
}

impl SystemTar {
    /// Locate `tar` on PATH.
    pub fn locate(compression: Compression) -> Result<Self> {
        let program = which::which("tar").map_err(|_| Error::TarBinaryMissing)?;
        Ok(Self {
            compression,
            program,
        })
    }

    pub fn with_program(compression: Compression, program: impl Into<PathBuf>) -> Self {
        Self {
            compression,
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn extract(
        &self,
        archive: &Path,
        destination: &Path,
        options: &ExtractOptions,
    ) -> Result<ExtractReport> {
        // Surface a missing archive as Open rather than a tar exit status.
        if !archive.exists() {
            return Err(Error::Open {
                path: archive.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            });
        }

        if !destination.exists() {
            std::fs::create_dir_all(destination).map_err(|e| Error::CreateDir {
                path: destination.to_path_buf(),
                source: e,
            })?;
        }

        let mut cmd = Command::new(&self.program);
        cmd.arg(match self.compression {
            Compression::Gzip => "-xzvf",
            Compression::None => "-xvf",
        });
        cmd.arg(archive).arg("-C").arg(destination);
        if options.strip_components > 0 {
            cmd.arg(format!("--strip-components={}", options.strip_components));
        }

        debug!(program = %self.program.display(), archive = %archive.display(), "delegating to system tar");

        let output = cmd.output().map_err(|source| Error::Command {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(Error::CommandStatus {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let entries = parse_listing(&output.stdout, &output.stderr, destination);
        Ok(ExtractReport {
            compression: self.compression,
            entry_count: entries.len(),
            total_bytes: 0,
            entries,
        })
    }
}

/// GNU tar prints the `-v` listing on stdout, BSD tar on stderr; read both.
/// Kinds are inferred from a trailing slash and sizes are unknown.
fn parse_listing(stdout: &[u8], stderr: &[u8], destination: &Path) -> Vec<Entry> {
    let mut entries = Vec::new();
    for raw in [stdout, stderr] {
        for line in String::from_utf8_lossy(raw).lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            // BSD tar prefixes each extracted name with "x ".
            let name = line.strip_prefix("x ").unwrap_or(line);
            let kind = if name.ends_with('/') {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            let path = PathBuf::from(name.trim_end_matches('/'));
            let target = destination.join(&path);
            entries.push(Entry::new(path, 0, None, kind).with_target_path(target));
        }
    }
    entries
}
