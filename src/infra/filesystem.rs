//! Filesystem operations
//!
//! Handles path resolution and directory creation.

use std::path::{Component, Path, PathBuf};

use crate::error::{ConfigError, FilesystemError};

/// Resolve `path` to a clean absolute path
///
/// Relative paths are joined onto the current directory. `.` and `..`
/// components are removed lexically, so the path does not need to exist.
pub fn resolve_absolute(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::UnresolvablePath {
            path: path.to_path_buf(),
            error: "path is empty".to_string(),
        });
    }

    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = current_dir().map_err(|e| ConfigError::UnresolvablePath {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        cwd.join(path)
    };

    Ok(normalize(&joined))
}

/// Get the current working directory
pub fn current_dir() -> Result<PathBuf, FilesystemError> {
    std::env::current_dir().map_err(|e| FilesystemError::CurrentDir {
        error: e.to_string(),
    })
}

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                let at_root = matches!(
                    out.components().next_back(),
                    Some(Component::RootDir | Component::Prefix(_)) | None
                );
                if !at_root {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
