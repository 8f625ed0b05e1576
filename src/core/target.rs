//! Build target identity
//!
//! A target is one directory holding an entry-point file. It knows where it
//! lives and where its binary goes; nothing else.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::defaults::OUTPUT_BINARY_NAME;

/// One independently buildable source unit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildTarget {
    /// Absolute path of the directory containing the entry point
    source_dir: PathBuf,
    /// Path of `source_dir` relative to the source root
    relative_path: PathBuf,
}

impl BuildTarget {
    /// Create a target from its absolute directory and its path relative to the source root
    pub fn new(source_dir: impl Into<PathBuf>, relative_path: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            relative_path: relative_path.into(),
        }
    }

    /// Absolute directory containing the entry point
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Directory relative to the source root
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Where the compiled binary for this target is written
    ///
    /// Mirrors the target's position under the source root:
    /// `<dest_root>/<relative_path>/main`.
    pub fn output_path(&self, dest_root: &Path) -> PathBuf {
        dest_root.join(&self.relative_path).join(OUTPUT_BINARY_NAME)
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source_dir.display())
    }
}
