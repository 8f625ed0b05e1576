//! Error types for lambda-build
//!
//! Domain-specific error types using thiserror. Only configuration and
//! discovery problems are errors; a failed build is an outcome, not an error.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors detected before any build starts
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Path could not be turned into an absolute path
    #[error("Cannot resolve '{path}' to an absolute path: {error}")]
    UnresolvablePath { path: PathBuf, error: String },

    /// Concurrency cap outside the accepted range
    #[error("Concurrent builds must be at least 1, got {value}")]
    InvalidConcurrency { value: usize },
}

/// Target discovery errors
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Source root does not exist
    #[error("Source path not found: {path}")]
    RootNotFound { path: PathBuf },

    /// Source root is not a directory
    #[error("Source path is not a directory: {path}")]
    RootNotDirectory { path: PathBuf },

    /// Walking the tree failed part way through
    #[error("Failed to traverse '{path}': {error}")]
    Traverse { path: PathBuf, error: String },

    /// Entry point found outside the source root
    #[error("Target '{path}' is not under source root '{root}'")]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

/// Orchestration errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// A unit of work disappeared without producing an outcome
    #[error("{count} build task(s) ended without an outcome: {error}")]
    TasksLost { count: usize, error: String },

    /// Invalid orchestrator configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to read the current working directory
    #[error("Failed to read current directory: {error}")]
    CurrentDir { error: String },

    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },
}
