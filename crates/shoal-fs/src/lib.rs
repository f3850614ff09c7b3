//! Filesystem primitives shared by the shoal crates.
//!
//! - `symlink` - platform symlink creation
//! - `replace_dir` - move a directory into place with a single rename
//! - `Workspace` - staging directory with commit-or-cleanup semantics

mod error;
mod workspace;

pub use error::{Error, Result, from_io};
pub use workspace::Workspace;

use std::path::Path;

/// Create a symbolic link at `link` pointing at `target`.
///
/// The target is written as given; it is not resolved or required to exist.
#[cfg(unix)]
pub fn symlink(target: impl AsRef<Path>, link: impl AsRef<Path>) -> Result<()> {
    std::os::unix::fs::symlink(target.as_ref(), link.as_ref()).map_err(error::from_io)
}

#[cfg(windows)]
pub fn symlink(target: impl AsRef<Path>, link: impl AsRef<Path>) -> Result<()> {
    let target = target.as_ref();
    let link = link.as_ref();
    let is_dir_target = target.is_dir() || target.to_string_lossy().ends_with('/');
    if is_dir_target {
        std::os::windows::fs::symlink_dir(target, link).map_err(error::from_io)
    } else {
        std::os::windows::fs::symlink_file(target, link).map_err(error::from_io)
    }
}

/// Move `src` over `dest` with a single rename, creating `dest`'s parent first.
///
/// Fails if `dest` already exists and is a non-empty directory; callers that
/// need merge semantics must clear the destination themselves.
pub fn replace_dir(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<()> {
    let src = src.as_ref();
    let dest = dest.as_ref();

    if let Some(parent) = dest.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(error::from_io)?;
        }
    }

    std::fs::rename(src, dest).map_err(error::from_io)
}
