//! Build environment setup
//!
//! Provides the environment overrides applied to every build tool process.
//! Sets GOOS and GOARCH so that every target is cross-compiled to the same
//! platform no matter which host runs the build.

use std::collections::HashMap;

use crate::config::defaults::{TARGET_ARCH, TARGET_OS};

/// Environment overrides for a build tool process.
///
/// The values are layered on top of the inherited environment of each child
/// process. The environment of the running program is never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildEnvironment {
    /// Target operating system (e.g., "linux")
    pub goos: String,
    /// Target CPU architecture (e.g., "amd64")
    pub goarch: String,
    /// Additional environment variables
    pub extra_env: HashMap<String, String>,
}

impl BuildEnvironment {
    /// Create an environment for an explicit platform
    pub fn new(goos: &str, goarch: &str) -> Self {
        Self {
            goos: goos.to_string(),
            goarch: goarch.to_string(),
            extra_env: HashMap::new(),
        }
    }

    /// Environment for the Lambda execution platform (linux/amd64)
    pub fn for_lambda() -> Self {
        Self::new(TARGET_OS, TARGET_ARCH)
    }

    /// Add an extra environment variable
    #[must_use]
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.extra_env.insert(key.to_string(), value.to_string());
        self
    }

    /// Convert to environment variable map for process execution
    ///
    /// The platform variables always win over extra variables of the same name.
    pub fn to_env_map(&self) -> HashMap<String, String> {
        let mut env = self.extra_env.clone();
        env.insert("GOOS".to_string(), self.goos.clone());
        env.insert("GOARCH".to_string(), self.goarch.clone());
        env
    }

    /// Check if all required environment variables are set
    pub fn validate(&self) -> Result<(), BuildEnvError> {
        if self.goos.is_empty() {
            return Err(BuildEnvError::MissingVariable("GOOS".to_string()));
        }
        if self.goarch.is_empty() {
            return Err(BuildEnvError::MissingVariable("GOARCH".to_string()));
        }
        if let Some(key) = self.extra_env.keys().find(|k| k.is_empty() || k.contains('=')) {
            return Err(BuildEnvError::InvalidValue {
                variable: key.clone(),
                reason: "variable names must be non-empty and must not contain '='".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for BuildEnvironment {
    fn default() -> Self {
        Self::for_lambda()
    }
}

/// Build environment errors
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEnvError {
    /// Required variable is missing
    MissingVariable(String),
    /// Variable has invalid value
    InvalidValue { variable: String, reason: String },
}

impl std::fmt::Display for BuildEnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVariable(var) => write!(f, "Missing required environment variable: {var}"),
            Self::InvalidValue { variable, reason } => {
                write!(f, "Invalid value for {variable}: {reason}")
            }
        }
    }
}

impl std::error::Error for BuildEnvError {}
