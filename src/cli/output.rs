//! Output formatting and progress indicators
//!
//! Renders build outcomes as text blocks, draws the progress bar, and prints
//! errors for the user.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::core::builder::OutcomeSink;
use crate::core::outcome::{BuildOutcome, BuildStatus, RunSummary};

/// Output settings derived from command-line flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress progress and summary output
    pub quiet: bool,
    /// Verbosity level (0 = warnings, 1 = info, 2+ = debug)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create output settings
    pub fn new(quiet: bool, verbose: u8) -> Self {
        Self { quiet, verbose }
    }

    /// Log level forced by `-q` or `-v`, if either was given
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.quiet {
            return Some(tracing::Level::ERROR);
        }
        match self.verbose {
            0 => None,
            1 => Some(tracing::Level::INFO),
            _ => Some(tracing::Level::DEBUG),
        }
    }

    /// Log filter from `RUST_LOG` directives, defaulting to `warn`
    ///
    /// A level from `-q` or `-v` replaces the default level of `rust_log`;
    /// per-target directives in `rust_log` still apply.
    pub fn log_filter(&self, rust_log: Option<&str>) -> EnvFilter {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse_lossy(rust_log.unwrap_or_default());
        match self.log_level() {
            Some(level) => filter.add_directive(LevelFilter::from_level(level).into()),
            None => filter,
        }
    }

    /// Whether the progress bar should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && console_is_interactive()
    }
}

fn console_is_interactive() -> bool {
    use std::io::IsTerminal;
    io::stderr().is_terminal()
}

/// Render one outcome as a text block
///
/// The first line is the status and the target directory. Every captured
/// stdout line, then every stderr line, follows indented by a tab.
pub fn render(outcome: &BuildOutcome) -> String {
    let mut block = String::new();
    let _ = writeln!(block, "{} {}", outcome.status.label(), outcome.target);
    if let BuildStatus::SpawnFailed { error } = &outcome.status {
        let _ = writeln!(block, "\t{error}");
    }
    for line in outcome.stdout.iter().chain(&outcome.stderr) {
        let _ = writeln!(block, "\t{line}");
    }
    block
}

/// Render the one-line run summary
pub fn render_summary(summary: &RunSummary) -> String {
    format!(
        "Built {} targets: {} ok, {} failed, {} errors",
        summary.len(),
        summary.succeeded(),
        summary.failed(),
        summary.spawn_failed()
    )
}

/// Writes outcome blocks to a shared writer
///
/// Each block is rendered first and then written with a single call under
/// the lock, so blocks from concurrently finishing builds never interleave.
pub struct Reporter<W: Write + Send> {
    writer: Mutex<W>,
    progress: ProgressBar,
}

impl<W: Write + Send> Reporter<W> {
    /// Create a reporter writing to `writer` without a progress bar
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            progress: ProgressBar::hidden(),
        }
    }

    /// Attach a progress bar that advances once per outcome
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// The progress bar advanced by this reporter
    pub fn progress(&self) -> &ProgressBar {
        &self.progress
    }

    fn write_atomic(&self, text: &str) {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        self.progress.suspend(|| {
            if let Err(e) = writer.write_all(text.as_bytes()).and_then(|()| writer.flush()) {
                tracing::warn!("Failed to write build output: {}", e);
            }
        });
    }
}

impl<W: Write + Send> OutcomeSink for Reporter<W> {
    fn emit(&self, outcome: &BuildOutcome) {
        self.write_atomic(&render(outcome));
        self.progress.inc(1);
        self.progress
            .set_message(format!("{} {}", outcome.status.label(), outcome.target));
    }
}

/// Create a progress bar for build steps
pub fn create_build_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} targets ({msg})")
            .expect("Invalid progress bar template")
            .progress_chars("█▓▒░"),
    );
    pb
}

/// Print an error and its causes to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} Error: {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";
}
