//! Staged extraction: unpack into a temporary directory, rename into place
//! on success.
//!
//! Direct extraction leaves whatever was written before a failure on disk.
//! Callers that need all-or-nothing placement extract into a staging
//! workspace and commit only once the whole archive has been applied.

use std::path::Path;

use shoal_fs::Workspace;

use crate::entry::ExtractReport;
use crate::error::{Error, Result};
use crate::extract::Extractor;
use crate::options::ExtractOptions;

pub struct StagedExtraction {
    workspace: Workspace,
    report: ExtractReport,
}

impl StagedExtraction {
    /// Rename the staged tree to the destination. The destination's parent
    /// is created; an existing destination surfaces the OS rename error.
    pub fn commit(self) -> Result<ExtractReport> {
        self.workspace.commit()?;
        Ok(self.report)
    }

    /// Discard the staged tree.
    pub fn abort(self) {
        drop(self.workspace);
    }

    pub fn report(&self) -> &ExtractReport {
        &self.report
    }
}

/// Extract `archive` into a fresh staging directory aimed at `destination`.
///
/// The staging directory is removed if the returned value is dropped
/// without `commit`, including when this function itself fails mid-archive.
pub fn extract_to_workspace(
    extractor: &Extractor,
    archive: &Path,
    destination: &Path,
    options: &ExtractOptions,
) -> Result<StagedExtraction> {
    let staging = tempfile::Builder::new()
        .prefix("shoal-archive-")
        .tempdir()
        .map_err(|e| Error::Write {
            path: destination.to_path_buf(),
            source: e,
        })?
        .keep();

    // The workspace owns the staging path from here; commit renames it,
    // drop removes it.
    let workspace = Workspace::new(&staging, destination).map_err(Error::from)?;

    let report = extractor.extract(archive, workspace.staging(), options)?;

    Ok(StagedExtraction { workspace, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Backend;
    use crate::format::Compression;

    #[test]
    fn failed_extraction_cleans_staging() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("bad.tar");
        std::fs::write(&archive, [0xAB; 1024]).unwrap();

        let extractor = Extractor::new(Backend::Stream, Compression::None).unwrap();
        let dest = dir.path().join("dest");
        let result = extract_to_workspace(&extractor, &archive, &dest, &ExtractOptions::default());

        assert!(result.is_err());
        assert!(!dest.exists());
    }
}
