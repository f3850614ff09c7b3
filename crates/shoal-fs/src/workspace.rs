use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A staging directory paired with its final destination.
///
/// Work is written under `staging()`; `commit` renames the staging directory
/// into place. A workspace dropped without committing removes its staging
/// directory, so an aborted extraction leaves nothing behind.
pub struct Workspace {
    staging: PathBuf,
    destination: PathBuf,
    committed: bool,
}

impl Workspace {
    pub fn new(staging: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<Self> {
        let staging = staging.as_ref().to_path_buf();
        let destination = destination.as_ref().to_path_buf();

        if !staging.exists() {
            std::fs::create_dir_all(&staging).map_err(Error::from)?;
        }

        Ok(Self {
            staging,
            destination,
            committed: false,
        })
    }

    pub fn staging(&self) -> &Path {
        &self.staging
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn commit(mut self) -> Result<()> {
        crate::replace_dir(&self.staging, &self.destination)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if !self.committed {
            let _ = std::fs::remove_dir_all(&self.staging);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn commit_renames_staging() {
        let dir = tempdir().unwrap();
        let staging = dir.path().join("staging");
        let dest = dir.path().join("dest");

        let workspace = Workspace::new(&staging, &dest).unwrap();
        std::fs::write(workspace.staging().join("file.txt"), "data").unwrap();
        workspace.commit().unwrap();

        assert!(!staging.exists());
        assert!(dest.join("file.txt").exists());
    }

    #[test]
    fn drop_without_commit_cleans_up() {
        let dir = tempdir().unwrap();
        let staging = dir.path().join("staging");
        {
            let workspace = Workspace::new(&staging, dir.path().join("dest")).unwrap();
            std::fs::write(workspace.staging().join("file.txt"), "data").unwrap();
            assert!(staging.exists());
        }
        assert!(!staging.exists());
    }
}
