//! Build command implementation
//!
//! Resolves the source and destination paths, discovers every lambda, and
//! compiles them with a bounded number of concurrent builds.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::output::{self, render_summary, OutputConfig, Reporter};
use crate::config::defaults::ENTRY_POINT_FILE;
use crate::core::builder::{BuildOrchestrator, Invoker, OutcomeSink};
use crate::core::command::BuildSettings;
use crate::core::outcome::RunSummary;
use crate::core::target::BuildTarget;
use crate::error::BuildError;
use crate::infra::discovery::discover_targets;
use crate::infra::filesystem;
use crate::infra::invoker::GoInvoker;
use crate::infra::toolchain::GoToolchain;

/// Build options
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Base path of the lambda sources
    pub source_path: PathBuf,
    /// Base path of the built binaries
    pub destination_path: PathBuf,
    /// Maximum number of builds in flight
    pub concurrent_builds: usize,
    /// Disable optimizations and inlining
    pub debug_mode: bool,
    /// Only build directories whose path contains this text
    pub source_path_pattern: Option<String>,
    /// Go binary
    pub build_tool: PathBuf,
}

/// Execute the build command
///
/// Configuration and discovery problems are returned as errors. Failed
/// builds are reported on stdout and do not make this function fail.
pub async fn execute(options: BuildOptions, output: OutputConfig) -> Result<()> {
    let summary = run(&options, output).await?;

    if !output.quiet {
        let prefix = if summary.succeeded() == summary.len() {
            output::status::SUCCESS
        } else {
            output::status::WARNING
        };
        println!("{prefix} {}", render_summary(&summary));
    }

    Ok(())
}

/// Run the build and return every outcome
pub async fn run(options: &BuildOptions, output: OutputConfig) -> Result<RunSummary> {
    let source_root = filesystem::resolve_absolute(&options.source_path)
        .context("Invalid source path")?;
    let dest_root = filesystem::resolve_absolute(&options.destination_path)
        .context("Invalid destination path")?;

    tracing::info!("Source root: {}", source_root.display());
    tracing::info!("Destination root: {}", dest_root.display());

    let targets = discover_targets(&source_root, options.source_path_pattern.as_deref())
        .with_context(|| format!("Failed to discover lambdas under {}", source_root.display()))?;

    if targets.is_empty() {
        tracing::warn!(
            "No {} files found under {}",
            ENTRY_POINT_FILE,
            source_root.display()
        );
    }

    filesystem::create_dir_all(&dest_root).context("Invalid destination path")?;

    // Builds run inside each target directory, so pin the tool to a full path.
    let toolchain = GoToolchain::new(&options.build_tool);
    let program = toolchain.locate().unwrap_or_else(|| {
        tracing::warn!(
            "Build tool '{}' not found; every build will fail to start",
            toolchain.go_path().display()
        );
        toolchain.go_path().to_path_buf()
    });

    let settings = BuildSettings::new(program, &dest_root).with_debug(options.debug_mode);
    settings
        .environment
        .validate()
        .context("Invalid build environment")?;
    if options.debug_mode {
        tracing::info!("Debug mode: optimizations and inlining disabled");
    }

    let mut reporter = Reporter::new(std::io::stdout());
    if output.show_progress() {
        reporter = reporter.with_progress(output::create_build_bar(targets.len() as u64));
    }
    let reporter = Arc::new(reporter);

    let orchestrator = BuildOrchestrator::new(GoInvoker::new(settings))
        .with_concurrency(options.concurrent_builds);
    run_reported(&orchestrator, targets, reporter)
        .await
        .context("Build run did not complete")
}

/// Run the orchestrator into `reporter`, clearing its progress bar however the run ends
async fn run_reported<I, W>(
    orchestrator: &BuildOrchestrator<I>,
    targets: Vec<BuildTarget>,
    reporter: Arc<Reporter<W>>,
) -> Result<RunSummary, BuildError>
where
    I: Invoker,
    W: Write + Send + 'static,
{
    let sink: Arc<dyn OutcomeSink> = reporter.clone();
    let result = orchestrator.run(targets, sink).await;
    reporter.progress().finish_and_clear();
    result
}
