//! Toolchain management
//!
//! Locates the Go build tool that every target is compiled with.

use std::path::{Path, PathBuf};

use crate::config::defaults::DEFAULT_BUILD_TOOL;

/// Go toolchain wrapper
#[derive(Debug, Clone)]
pub struct GoToolchain {
    /// Program name or path of the go binary
    go_path: PathBuf,
}

impl GoToolchain {
    /// Create a new Go toolchain wrapper
    pub fn new(go_path: impl Into<PathBuf>) -> Self {
        Self {
            go_path: go_path.into(),
        }
    }

    /// Get the program name or path of the go binary
    pub fn go_path(&self) -> &Path {
        &self.go_path
    }

    /// Resolve the binary to a full path, searching PATH for bare names
    ///
    /// Returns `None` when the binary cannot be found. Builds are still
    /// attempted in that case and each reports a spawn failure.
    pub fn locate(&self) -> Option<PathBuf> {
        match which::which(&self.go_path) {
            Ok(path) => {
                tracing::debug!("Using build tool at {}", path.display());
                Some(path)
            }
            Err(e) => {
                tracing::debug!("Lookup of '{}' failed: {}", self.go_path.display(), e);
                None
            }
        }
    }
}

impl Default for GoToolchain {
    fn default() -> Self {
        Self::new(DEFAULT_BUILD_TOOL)
    }
}
