//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Stand-in for `go`: echoes its arguments and platform, fails for any
/// directory whose path contains "broken"
pub const FAKE_GO: &str = r#"#!/bin/sh
echo "args:$*"
echo "platform:$GOOS/$GOARCH"
case "$(pwd)" in
  *broken*)
    echo "./main.go:3:1: syntax error" >&2
    echo "build failed" >&2
    exit 1
    ;;
esac
exit 0
"#;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Create a lambda entry point under `src/`
    pub fn create_lambda(&self, dir: &str) {
        self.create_file(&format!("src/{dir}/main.go"), "package main\n\nfunc main() {}\n");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Absolute path of a source directory under `src/`
    pub fn src(&self, dir: &str) -> PathBuf {
        self.dir.path().join("src").join(dir)
    }

    /// Install the fake build tool and return its path
    #[cfg(unix)]
    pub fn install_fake_go(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join("tools/go");
        self.create_file("tools/go", FAKE_GO);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake go executable");
        path
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Run lambda-build against `src/` and `dist/` of the project with extra arguments
pub fn run_lambda_build(project: &TestProject, tool: &Path, args: &[&str]) -> Output {
    run_lambda_build_with_env(project, tool, args, &[])
}

/// Run lambda-build with extra environment variables set for the child
pub fn run_lambda_build_with_env(
    project: &TestProject,
    tool: &Path,
    args: &[&str],
    env: &[(&str, &str)],
) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lambda-build"));
    cmd.current_dir(project.path());
    cmd.env_remove("LAMBDA_BUILD_GO");
    cmd.env_remove("RUST_LOG");
    cmd.envs(env.iter().copied());
    cmd.args(["--source-path", "src", "--destination-path", "dist"]);
    cmd.arg("--build-tool").arg(tool);
    cmd.args(args);
    cmd.output().expect("Failed to execute lambda-build")
}

/// Captured stdout as text
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Captured stderr as text
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
