//! Entry name and symlink target validation.
//!
//! Archive entry names are attacker-controlled. Every name is normalized
//! and must resolve strictly under the destination root; absolute names
//! and names climbing above the root are rejected rather than silently
//! rewritten.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// A validated entry name together with its destination path.
#[derive(Clone, Debug)]
pub struct ResolvedPath {
    pub original: PathBuf,
    pub resolved: PathBuf,
}

/// Resolve an entry name under `base`, applying `strip_components` first.
pub fn resolve_entry_path(
    entry: &Path,
    base: &Path,
    strip_components: usize,
) -> Result<ResolvedPath> {
    let normalized = normalize(entry).ok_or_else(|| Error::PathEscape {
        entry: entry.to_path_buf(),
        resolved: base.join(entry),
    })?;

    let relative = if strip_components > 0 {
        strip_leading(&normalized, strip_components).ok_or_else(|| Error::StripExhausted {
            original: entry.to_path_buf(),
            count: strip_components,
        })?
    } else {
        normalized
    };

    let resolved = base.join(&relative);
    if !resolved.starts_with(base) {
        return Err(Error::PathEscape {
            entry: entry.to_path_buf(),
            resolved,
        });
    }

    Ok(ResolvedPath {
        original: entry.to_path_buf(),
        resolved,
    })
}

/// Validate a symlink target against the destination root.
///
/// `link` is the already-resolved location of the symlink itself. The target
/// is interpreted relative to the link's parent directory, as the platform
/// will when the link is followed. Returns the target's resolved location;
/// the caller still writes the original target text into the link.
pub fn resolve_link_target(target: &Path, link: &Path, base: &Path) -> Result<PathBuf> {
    if target.is_absolute() {
        return Err(Error::AbsoluteSymlinkTarget {
            target: target.to_path_buf(),
            link: link.to_path_buf(),
        });
    }

    let anchor = link.parent().unwrap_or(base);
    let anchor_rel = anchor.strip_prefix(base).unwrap_or(Path::new(""));

    let relative = normalize(&anchor_rel.join(target)).ok_or_else(|| Error::SymlinkEscape {
        target: target.to_path_buf(),
        resolved: anchor.join(target),
    })?;

    let resolved = base.join(relative);
    if !resolved.starts_with(base) {
        return Err(Error::SymlinkEscape {
            target: target.to_path_buf(),
            resolved,
        });
    }

    Ok(resolved)
}

/// Collapse `.` and `..`, refusing paths that are absolute or climb above
/// their own root.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}

fn strip_leading(path: &Path, count: usize) -> Option<PathBuf> {
    let components: Vec<_> = path.components().collect();
    if components.len() <= count {
        return None;
    }
    Some(components[count..].iter().collect())
}
