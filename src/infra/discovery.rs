//! Build target discovery
//!
//! Walks the source tree and collects every directory that directly contains
//! the entry-point file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::defaults::ENTRY_POINT_FILE;
use crate::core::target::BuildTarget;
use crate::error::DiscoveryError;

/// Find all build targets under `root`
///
/// Directories are returned in traversal order: depth first, with the entries
/// of each directory visited in file-name order. The entry-point file name is
/// matched case-insensitively. When `filter` is set and non-empty, only
/// directories whose absolute path contains it are kept.
///
/// Any traversal error aborts discovery; no partial list is returned.
pub fn discover_targets(root: &Path, filter: Option<&str>) -> Result<Vec<BuildTarget>, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(DiscoveryError::RootNotDirectory {
            path: root.to_path_buf(),
        });
    }

    let filter = filter.filter(|f| !f.is_empty());
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut targets = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| DiscoveryError::Traverse {
            path: e
                .path()
                .map_or_else(|| root.to_path_buf(), Path::to_path_buf),
            error: e.to_string(),
        })?;

        if entry.file_type().is_dir() || !is_entry_point(entry.file_name()) {
            continue;
        }

        let Some(dir) = entry.path().parent() else {
            continue;
        };

        if let Some(pattern) = filter {
            if !dir.to_string_lossy().contains(pattern) {
                tracing::debug!("Skipping {} (does not match '{}')", dir.display(), pattern);
                continue;
            }
        }

        if !seen.insert(dir.to_path_buf()) {
            continue;
        }

        let relative = dir
            .strip_prefix(root)
            .map_err(|_| DiscoveryError::OutsideRoot {
                path: dir.to_path_buf(),
                root: root.to_path_buf(),
            })?;

        tracing::debug!("Found target {}", dir.display());
        targets.push(BuildTarget::new(dir, relative));
    }

    tracing::info!("Discovered {} targets under {}", targets.len(), root.display());
    Ok(targets)
}

fn is_entry_point(name: &std::ffi::OsStr) -> bool {
    name.to_str()
        .is_some_and(|n| n.eq_ignore_ascii_case(ENTRY_POINT_FILE))
}
