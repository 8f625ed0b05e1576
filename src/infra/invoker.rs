//! Build tool invocation
//!
//! Runs the external build tool for one target and captures everything it
//! prints. The whole output is buffered and handed back at once.

use std::future::Future;
use std::process::{Output, Stdio};
use std::time::Instant;

use tokio::process::Command;

use crate::core::builder::Invoker;
use crate::core::command::{BuildCommand, BuildSettings};
use crate::core::outcome::BuildOutcome;
use crate::core::target::BuildTarget;

/// Invoker that compiles targets with `go build`
#[derive(Debug, Clone)]
pub struct GoInvoker {
    settings: BuildSettings,
}

impl GoInvoker {
    /// Create an invoker with the given build settings
    pub fn new(settings: BuildSettings) -> Self {
        Self { settings }
    }

    /// Build the command that would be run for `target`
    pub fn command_for(&self, target: &BuildTarget) -> BuildCommand {
        BuildCommand::for_target(target, &self.settings)
    }
}

impl Invoker for GoInvoker {
    fn invoke(&self, target: BuildTarget) -> impl Future<Output = BuildOutcome> + Send {
        async move {
            let command = self.command_for(&target);
            let started = Instant::now();
            tracing::info!("Building {}", target);

            if let Some(parent) = target.output_path(&self.settings.dest_root).parent() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    return BuildOutcome::spawn_failed(
                        target,
                        format!("failed to create output directory '{}': {e}", parent.display()),
                        started.elapsed(),
                    );
                }
            }

            match run_captured(&command).await {
                Ok(output) => BuildOutcome::completed(
                    target,
                    output.status.code(),
                    split_lines(&output.stdout),
                    split_lines(&output.stderr),
                    started.elapsed(),
                ),
                Err(e) => {
                    tracing::warn!(
                        "Failed to start '{}' for {}: {}",
                        command.program.display(),
                        target,
                        e
                    );
                    BuildOutcome::spawn_failed(
                        target,
                        format!("failed to start '{}': {e}", command.program.display()),
                        started.elapsed(),
                    )
                }
            }
        }
    }
}

/// Run a build command to completion, capturing stdout and stderr
///
/// The child inherits the current environment plus the command's overrides.
pub async fn run_captured(command: &BuildCommand) -> std::io::Result<Output> {
    tracing::debug!(
        "Running {} {:?} in {}",
        command.program.display(),
        command.args,
        command.current_dir.display()
    );

    Command::new(&command.program)
        .args(&command.args)
        .current_dir(&command.current_dir)
        .envs(&command.env)
        .stdin(Stdio::null())
        .output()
        .await
}

/// Split captured bytes into lines, replacing invalid UTF-8
fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}
