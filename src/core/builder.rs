//! Build orchestration logic
//!
//! Runs every discovered target through an [`Invoker`] with at most `K`
//! builds in flight at once.
//!
//! Targets are admitted in discovery order. Admission waits on a counting
//! semaphore, so the submitting loop blocks while `K` builds are running and
//! resumes as soon as one of them finishes. Each admitted build runs as its
//! own task inside a [`JoinSet`]; the set is drained before [`BuildOrchestrator::run`]
//! returns, so every target has produced its outcome by then. Outcomes reach
//! the [`OutcomeSink`] in completion order.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::outcome::{BuildOutcome, RunSummary};
use super::target::BuildTarget;
use crate::config::defaults::DEFAULT_CONCURRENT_BUILDS;
use crate::error::{BuildError, ConfigError};

/// Builds a single target
///
/// Implementations never fail: every problem, including a tool that cannot
/// be started, is reported through the returned outcome.
pub trait Invoker: Send + Sync + 'static {
    /// Build `target` and report how it went
    fn invoke(&self, target: BuildTarget) -> impl Future<Output = BuildOutcome> + Send;
}

/// Receives outcomes as builds complete
///
/// Called concurrently from every running build.
pub trait OutcomeSink: Send + Sync {
    /// Handle one completed outcome
    fn emit(&self, outcome: &BuildOutcome);
}

/// Sink that drops every outcome
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl OutcomeSink for DiscardSink {
    fn emit(&self, _outcome: &BuildOutcome) {}
}

/// Build orchestrator state
#[derive(Debug)]
pub struct BuildOrchestrator<I> {
    /// Builds one target at a time
    invoker: Arc<I>,
    /// Maximum number of builds in flight
    concurrency: usize,
}

impl<I: Invoker> BuildOrchestrator<I> {
    /// Create a new build orchestrator
    pub fn new(invoker: I) -> Self {
        Self {
            invoker: Arc::new(invoker),
            concurrency: DEFAULT_CONCURRENT_BUILDS,
        }
    }

    /// Set the maximum number of concurrent builds
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Get the maximum number of concurrent builds
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Build every target, returning once all of them have completed
    ///
    /// A failed build never stops the others. The summary holds exactly one
    /// outcome per target, in the order the builds were collected.
    pub async fn run(
        &self,
        targets: Vec<BuildTarget>,
        sink: Arc<dyn OutcomeSink>,
    ) -> Result<RunSummary, BuildError> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency { value: 0 }.into());
        }

        let total = targets.len();
        tracing::info!(
            "Building {} targets with {} concurrent builds",
            total,
            self.concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut builds = JoinSet::new();

        for target in targets {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .expect("admission semaphore is never closed");

            tracing::debug!(
                "Admitted {} ({} running)",
                target,
                self.concurrency - semaphore.available_permits()
            );

            let invoker = Arc::clone(&self.invoker);
            let sink = Arc::clone(&sink);
            builds.spawn(async move {
                let started = Instant::now();
                let identity = target.clone();
                let outcome = AssertUnwindSafe(invoker.invoke(target))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|panic| {
                        let message = panic_message(panic.as_ref());
                        tracing::error!("Build task for {} panicked: {}", identity, message);
                        BuildOutcome::spawn_failed(
                            identity,
                            format!("build task panicked: {message}"),
                            started.elapsed(),
                        )
                    });
                drop(permit);

                tracing::debug!(
                    "Completed {} with {} in {:?}",
                    outcome.target,
                    outcome.status,
                    outcome.duration
                );
                sink.emit(&outcome);
                outcome
            });
        }

        let mut summary = RunSummary::with_capacity(total);
        let mut lost = Vec::new();
        while let Some(joined) = builds.join_next().await {
            match joined {
                Ok(outcome) => summary.push(outcome),
                Err(e) => {
                    tracing::error!("Build task ended without an outcome: {}", e);
                    lost.push(e.to_string());
                }
            }
        }

        if !lost.is_empty() {
            return Err(BuildError::TasksLost {
                count: lost.len(),
                error: lost.join("; "),
            });
        }

        tracing::info!(
            "Finished {} targets: {} ok, {} failed, {} errors",
            summary.len(),
            summary.succeeded(),
            summary.failed(),
            summary.spawn_failed()
        );
        Ok(summary)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
