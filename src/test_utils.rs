//! Test utilities
//!
//! Fake invokers and sinks for exercising the orchestrator without running
//! real builds, plus generators for proptest.

#[cfg(test)]
pub mod fakes {
    use std::collections::{HashMap, HashSet};
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use tokio::sync::Barrier;

    use crate::core::builder::{Invoker, OutcomeSink};
    use crate::core::outcome::BuildOutcome;
    use crate::core::target::BuildTarget;

    /// `n` distinct targets named `t00`, `t01`, ...
    pub fn targets(n: usize) -> Vec<BuildTarget> {
        (0..n)
            .map(|i| BuildTarget::new(format!("/src/t{i:02}"), format!("t{i:02}")))
            .collect()
    }

    /// Concurrency bookkeeping shared between a fake invoker and its test
    #[derive(Debug, Default)]
    pub struct InvokerStats {
        running: AtomicUsize,
        max_running: AtomicUsize,
        completed: AtomicUsize,
        started: Mutex<Vec<BuildTarget>>,
    }

    impl InvokerStats {
        fn start(&self, target: &BuildTarget) {
            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_running.fetch_max(now, Ordering::SeqCst);
            self.started.lock().unwrap().push(target.clone());
        }

        fn finish(&self) {
            self.running.fetch_sub(1, Ordering::SeqCst);
            self.completed.fetch_add(1, Ordering::SeqCst);
        }

        /// Builds currently inside the invoker
        pub fn running(&self) -> usize {
            self.running.load(Ordering::SeqCst)
        }

        /// Highest number of simultaneous builds seen
        pub fn max_running(&self) -> usize {
            self.max_running.load(Ordering::SeqCst)
        }

        /// Builds that have left the invoker
        pub fn completed(&self) -> usize {
            self.completed.load(Ordering::SeqCst)
        }

        /// Targets in the order their builds started
        pub fn started(&self) -> Vec<BuildTarget> {
            self.started.lock().unwrap().clone()
        }
    }

    /// Invoker that simulates builds with configurable timing and results
    #[derive(Debug, Default)]
    pub struct FakeInvoker {
        delay: Duration,
        target_delays: HashMap<BuildTarget, Duration>,
        failures: HashMap<BuildTarget, i32>,
        panics: HashSet<BuildTarget>,
        lines: usize,
        barrier: Option<Arc<Barrier>>,
        stats: Arc<InvokerStats>,
    }

    impl FakeInvoker {
        pub fn new() -> Self {
            Self::default()
        }

        /// Delay applied to every build
        #[must_use]
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        /// Delay applied to one target, overriding the default delay
        #[must_use]
        pub fn with_target_delay(mut self, target: BuildTarget, delay: Duration) -> Self {
            self.target_delays.insert(target, delay);
            self
        }

        /// Make `target` exit with `code`
        #[must_use]
        pub fn failing(mut self, target: BuildTarget, code: i32) -> Self {
            self.failures.insert(target, code);
            self
        }

        /// Make the build of `target` panic
        #[must_use]
        pub fn panicking(mut self, target: BuildTarget) -> Self {
            self.panics.insert(target);
            self
        }

        /// Number of stdout and stderr lines produced per build
        #[must_use]
        pub fn with_lines(mut self, lines: usize) -> Self {
            self.lines = lines;
            self
        }

        /// Hold every build until `barrier` releases
        #[must_use]
        pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
            self.barrier = Some(barrier);
            self
        }

        /// Shared statistics handle
        pub fn stats(&self) -> Arc<InvokerStats> {
            Arc::clone(&self.stats)
        }
    }

    impl Invoker for FakeInvoker {
        fn invoke(&self, target: BuildTarget) -> impl Future<Output = BuildOutcome> + Send {
            async move {
                let started = Instant::now();
                self.stats.start(&target);

                if let Some(barrier) = &self.barrier {
                    barrier.wait().await;
                }
                let delay = self.target_delays.get(&target).copied().unwrap_or(self.delay);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }

                self.stats.finish();
                assert!(!self.panics.contains(&target), "simulated crash in {target}");

                let stdout = (0..self.lines).map(|i| format!("{target} out {i}")).collect();
                let stderr = (0..self.lines).map(|i| format!("{target} err {i}")).collect();
                let code = self.failures.get(&target).copied().unwrap_or(0);
                BuildOutcome::completed(target, Some(code), stdout, stderr, started.elapsed())
            }
        }
    }

    /// Sink that keeps every outcome it receives
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        outcomes: Mutex<Vec<BuildOutcome>>,
    }

    impl RecordingSink {
        /// Outcomes in the order they were emitted
        pub fn outcomes(&self) -> Vec<BuildOutcome> {
            self.outcomes.lock().unwrap().clone()
        }
    }

    impl OutcomeSink for RecordingSink {
        fn emit(&self, outcome: &BuildOutcome) {
            self.outcomes.lock().unwrap().push(outcome.clone());
        }
    }
}

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a valid concurrency cap
    pub fn concurrency() -> impl Strategy<Value = usize> {
        1usize..=6
    }

    /// Generate per-target build delays in milliseconds
    pub fn delays() -> impl Strategy<Value = Vec<u64>> {
        prop::collection::vec(0u64..15, 0..16)
    }

    /// Generate a relative directory path such as `ab/c`
    pub fn relative_dir() -> impl Strategy<Value = String> {
        "[a-c]{1,2}(/[a-c]{1,2}){0,2}"
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use crate::config::defaults::MIN_PROPTEST_ITERATIONS;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(MIN_PROPTEST_ITERATIONS))]

        #[test]
        fn test_concurrency_generator(k in concurrency()) {
            prop_assert!(k >= 1);
        }

        #[test]
        fn test_relative_dir_generator(dir in relative_dir()) {
            prop_assert!(!dir.is_empty());
            prop_assert!(!dir.starts_with('/'));
            prop_assert!(dir.split('/').all(|part| !part.is_empty()));
        }
    }
}
