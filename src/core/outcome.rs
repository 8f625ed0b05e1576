//! Build outcomes
//!
//! The immutable record of one target's build and the summary of a whole run.

use std::fmt;
use std::time::Duration;

use super::target::BuildTarget;

/// How a single build ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    /// The build tool exited with code 0
    Ok,
    /// The build tool ran and exited non-zero, or was killed by a signal
    Failed { exit_code: Option<i32> },
    /// The build tool could not be started, or the build task crashed
    SpawnFailed { error: String },
}

impl BuildStatus {
    /// Derive the status from a process exit code
    ///
    /// `None` means the process was terminated without an exit code.
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => Self::Ok,
            exit_code => Self::Failed { exit_code },
        }
    }

    /// Label printed on the status line
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Failed { .. } => "FAILED",
            Self::SpawnFailed { .. } => "ERROR",
        }
    }

    /// Whether the build succeeded
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of building one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Target this outcome belongs to
    pub target: BuildTarget,
    /// How the build ended
    pub status: BuildStatus,
    /// Captured standard output, one entry per line
    pub stdout: Vec<String>,
    /// Captured standard error, one entry per line
    pub stderr: Vec<String>,
    /// Wall-clock time of the invocation
    pub duration: Duration,
}

impl BuildOutcome {
    /// Outcome of a build tool that ran to completion
    pub fn completed(
        target: BuildTarget,
        exit_code: Option<i32>,
        stdout: Vec<String>,
        stderr: Vec<String>,
        duration: Duration,
    ) -> Self {
        Self {
            target,
            status: BuildStatus::from_exit_code(exit_code),
            stdout,
            stderr,
            duration,
        }
    }

    /// Outcome of a build that never produced a process result
    pub fn spawn_failed(target: BuildTarget, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            target,
            status: BuildStatus::SpawnFailed {
                error: error.into(),
            },
            stdout: Vec::new(),
            stderr: Vec::new(),
            duration,
        }
    }
}

/// Every outcome of one run, in the order the builds were collected
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    outcomes: Vec<BuildOutcome>,
}

impl RunSummary {
    /// Create an empty summary sized for `capacity` outcomes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
        }
    }

    /// Record a completed outcome
    pub fn push(&mut self, outcome: BuildOutcome) {
        self.outcomes.push(outcome);
    }

    /// Outcomes in collection order
    pub fn outcomes(&self) -> &[BuildOutcome] {
        &self.outcomes
    }

    /// Number of outcomes recorded
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether no outcome was recorded
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of successful builds
    pub fn succeeded(&self) -> usize {
        self.count(|s| matches!(s, BuildStatus::Ok))
    }

    /// Number of builds the tool reported as failed
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, BuildStatus::Failed { .. }))
    }

    /// Number of builds that could not be run at all
    pub fn spawn_failed(&self) -> usize {
        self.count(|s| matches!(s, BuildStatus::SpawnFailed { .. }))
    }

    fn count(&self, pred: impl Fn(&BuildStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}
