//! Bounded execution of a search strategy.
//!
//! [`BoundedRunner`] is the single entry point a benchmarking harness
//! needs. It owns the wall-clock deadline, the PRNG seed and the resource
//! accounting, and converts whatever happens inside a strategy (solution,
//! exhaustion, timeout, invalid input, panic) into a [`SolveOutcome`].
//!
//! Deadlines are cooperative: strategies poll their [`SearchBudget`] at
//! every suspension point. For steps that can stall past the deadline on
//! their own (a neighbourhood scan on a very large board, say),
//! [`BoundedRunner::with_hard_cancel`] moves the search onto a worker
//! thread and abandons it once `deadline + grace` elapses without a result.
//! The abandoned worker sees the raised cancel flag at its next poll and
//! exits; its late result is discarded.

use crate::backtrack::{BacktrackConfig, BacktrackRunner};
use crate::budget::{Progress, SearchBudget};
use crate::error::{Result, SolveError};
use crate::ga::{GaConfig, GaRunner};
use crate::hill::{HillConfig, HillRunner};
use crate::outcome::{Algorithm, SearchReport, SolveOutcome};
use crate::random::rng_from_seed;
use crate::sa::{SaConfig, SaRunner};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// A search strategy together with its configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    Backtracking(BacktrackConfig),
    HillClimbing(HillConfig),
    SimulatedAnnealing(SaConfig),
    Genetic(GaConfig),
}

impl Strategy {
    /// The tag reported in outcomes.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Strategy::Backtracking(_) => Algorithm::Backtracking,
            Strategy::HillClimbing(_) => Algorithm::HillClimbing,
            Strategy::SimulatedAnnealing(_) => Algorithm::SimulatedAnnealing,
            Strategy::Genetic(_) => Algorithm::Genetic,
        }
    }

    /// Runs the strategy on this thread with a PRNG built from `seed`.
    pub fn execute(
        &self,
        n: usize,
        seed: Option<u64>,
        budget: &mut SearchBudget,
    ) -> Result<SearchReport> {
        let mut rng = rng_from_seed(seed);
        match self {
            Strategy::Backtracking(config) => BacktrackRunner::run(n, config, budget),
            Strategy::HillClimbing(config) => HillRunner::run(n, config, &mut rng, budget),
            Strategy::SimulatedAnnealing(config) => SaRunner::run(n, config, &mut rng, budget),
            Strategy::Genetic(config) => GaRunner::run(n, config, &mut rng, budget),
        }
    }
}

/// Runs strategies under a deadline and turns every ending into a
/// [`SolveOutcome`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use nqueens_bench::backtrack::BacktrackConfig;
/// use nqueens_bench::runner::{BoundedRunner, Strategy};
///
/// let outcome = BoundedRunner::new()
///     .with_deadline(Duration::from_secs(5))
///     .run(&Strategy::Backtracking(BacktrackConfig::default()), 8);
/// assert!(outcome.success);
/// assert_eq!(outcome.conflicts, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoundedRunner {
    seed: Option<u64>,
    deadline: Option<Duration>,
    hard_cancel_grace: Option<Duration>,
    cancel: Option<Arc<AtomicBool>>,
}

impl BoundedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the run's PRNG. Without a seed, runs are not reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Runs on a watched worker thread and abandons it if no result arrives
    /// within `deadline + grace`. Has no effect without a deadline.
    pub fn with_hard_cancel(mut self, grace: Duration) -> Self {
        self.hard_cancel_grace = Some(grace);
        self
    }

    /// Shares an external cancellation flag. Setting it stops the run at its
    /// next suspension point, reported as a timeout.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Solves the `n`-queens problem with `strategy`.
    pub fn run(&self, strategy: &Strategy, n: usize) -> SolveOutcome {
        let worker = strategy.clone();
        let seed = self.seed;
        self.supervise(strategy.algorithm(), n, move |budget| {
            worker.execute(n, seed, budget)
        })
    }

    fn supervise<F>(&self, algorithm: Algorithm, n: usize, search: F) -> SolveOutcome
    where
        F: FnOnce(&mut SearchBudget) -> Result<SearchReport> + Send + 'static,
    {
        let started = Instant::now();
        let progress = Arc::new(Progress::new(n));

        if n == 0 {
            return SolveOutcome::from_error(
                algorithm,
                n,
                &SolveError::InvalidSize(n),
                progress.snapshot(),
                started.elapsed(),
            );
        }

        debug!(%algorithm, n, seed = ?self.seed, deadline = ?self.deadline, "solve started");
        let cancel = self.cancel.clone().unwrap_or_default();
        let result = match (self.deadline, self.hard_cancel_grace) {
            (Some(deadline), Some(grace)) => {
                run_watched(deadline, grace, cancel, progress.clone(), search)
            }
            _ => {
                let mut budget = SearchBudget::new(self.deadline)
                    .with_cancel(cancel)
                    .with_progress(progress.clone());
                guarded(&mut budget, search)
            }
        };
        let elapsed = started.elapsed();
        let peak = progress.snapshot().peak_bytes;

        let outcome = result.and_then(|report| {
            SolveOutcome::from_report(algorithm, n, report, elapsed, peak)
        });
        match outcome {
            Ok(outcome) => {
                debug!(
                    %algorithm,
                    n,
                    success = outcome.success,
                    timed_out = outcome.timed_out,
                    moves = outcome.moves,
                    conflicts = outcome.conflicts,
                    "solve finished"
                );
                outcome
            }
            Err(err) => {
                warn!(%algorithm, n, error = %err, "solve failed");
                SolveOutcome::from_error(algorithm, n, &err, progress.snapshot(), elapsed)
            }
        }
    }
}

/// Solves with a fresh [`BoundedRunner`]. `seed = None` means
/// non-reproducible randomness; `deadline = None` means unbounded.
pub fn solve(
    strategy: &Strategy,
    n: usize,
    seed: Option<u64>,
    deadline: Option<Duration>,
) -> SolveOutcome {
    let runner = BoundedRunner {
        seed,
        deadline,
        ..BoundedRunner::default()
    };
    runner.run(strategy, n)
}

/// Runs `search` on the current thread, turning a panic into an
/// [`SolveError::InternalFault`].
fn guarded<F>(budget: &mut SearchBudget, search: F) -> Result<SearchReport>
where
    F: FnOnce(&mut SearchBudget) -> Result<SearchReport>,
{
    panic::catch_unwind(AssertUnwindSafe(|| search(budget)))
        .unwrap_or_else(|payload| Err(SolveError::InternalFault(panic_message(payload.as_ref()))))
}

/// Runs `search` on a worker thread, giving up after `deadline + grace`.
fn run_watched<F>(
    deadline: Duration,
    grace: Duration,
    cancel: Arc<AtomicBool>,
    progress: Arc<Progress>,
    search: F,
) -> Result<SearchReport>
where
    F: FnOnce(&mut SearchBudget) -> Result<SearchReport> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let worker_cancel = cancel.clone();
    let handle = thread::Builder::new()
        .name("nqueens-search".into())
        .spawn(move || {
            let mut budget = SearchBudget::new(Some(deadline))
                .with_cancel(worker_cancel)
                .with_progress(progress);
            // The receiver is gone if the watchdog already gave up.
            let _ = tx.send(guarded(&mut budget, search));
        })
        .map_err(|e| SolveError::InternalFault(format!("failed to spawn search worker: {e}")))?;

    match rx.recv_timeout(deadline + grace) {
        Ok(result) => {
            let _ = handle.join();
            result
        }
        Err(RecvTimeoutError::Timeout) => {
            cancel.store(true, Ordering::Relaxed);
            warn!(?deadline, ?grace, "search worker missed its deadline; abandoning it");
            Err(SolveError::Timeout(grace))
        }
        Err(RecvTimeoutError::Disconnected) => {
            let detail = match handle.join() {
                Err(payload) => panic_message(payload.as_ref()),
                Ok(()) => "search worker exited without a result".to_string(),
            };
            Err(SolveError::InternalFault(detail))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("search panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("search panicked: {msg}")
    } else {
        "search panicked".to_string()
    }
}
