//! Build command construction
//!
//! Turns a target plus build settings into the exact process invocation,
//! without running anything.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::build_env::BuildEnvironment;
use super::target::BuildTarget;
use crate::config::defaults::DEBUG_GCFLAGS;

/// Settings shared by every build of a run
#[derive(Debug, Clone)]
pub struct BuildSettings {
    /// Build tool program (name looked up on PATH, or a path)
    pub program: PathBuf,
    /// Root under which binaries are written
    pub dest_root: PathBuf,
    /// Build for step-through debugging
    pub debug: bool,
    /// Environment overrides for every build
    pub environment: BuildEnvironment,
}

impl BuildSettings {
    /// Create settings for the given tool and destination
    pub fn new(program: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            dest_root: dest_root.into(),
            debug: false,
            environment: BuildEnvironment::for_lambda(),
        }
    }

    /// Enable or disable debug builds
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Replace the environment overrides
    #[must_use]
    pub fn with_environment(mut self, environment: BuildEnvironment) -> Self {
        self.environment = environment;
        self
    }
}

/// A fully resolved build tool invocation
#[derive(Debug, Clone, PartialEq)]
pub struct BuildCommand {
    /// Program to execute
    pub program: PathBuf,
    /// Arguments, in order
    pub args: Vec<OsString>,
    /// Working directory of the process
    pub current_dir: PathBuf,
    /// Variables added to the inherited environment
    pub env: HashMap<String, String>,
}

impl BuildCommand {
    /// Build the `go build` invocation for one target
    ///
    /// `build -o <dest>/<rel>/main [-gcflags "all=-N -l"] <target dir>`,
    /// run from inside the target directory.
    pub fn for_target(target: &BuildTarget, settings: &BuildSettings) -> Self {
        let mut args: Vec<OsString> = vec![
            "build".into(),
            "-o".into(),
            target.output_path(&settings.dest_root).into_os_string(),
        ];
        if settings.debug {
            args.push("-gcflags".into());
            args.push(DEBUG_GCFLAGS.into());
        }
        args.push(target.source_dir().as_os_str().to_owned());

        Self {
            program: settings.program.clone(),
            args,
            current_dir: target.source_dir().to_path_buf(),
            env: settings.environment.to_env_map(),
        }
    }

    /// Whether the argument list contains `arg`
    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    /// Working directory of the process
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }
}
