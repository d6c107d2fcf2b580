//! Cooperative run budget: deadline, cancellation and resource accounting.
//!
//! A [`SearchBudget`] is handed by `&mut` to a strategy, which polls
//! [`should_stop`](SearchBudget::should_stop) at each suspension point (once
//! per backtracking node, local-search iteration or generation). Progress is
//! published into a shared [`Progress`] so a watchdog can still report moves,
//! conflicts and memory for a worker it had to abandon.
//!
//! Clock reads are filtered by a bitmask on the step counter, so hot loops
//! pay for `Instant::now()` only every `mask + 1` polls. The first poll
//! always reads the clock, which makes a zero deadline stop a run before it
//! does any work.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Counters shared between a running strategy and its supervisor.
#[derive(Debug, Default)]
pub struct Progress {
    moves: AtomicU64,
    conflicts: AtomicUsize,
    peak_bytes: AtomicUsize,
}

/// Point-in-time copy of [`Progress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub moves: u64,
    pub conflicts: usize,
    pub peak_bytes: usize,
}

impl Progress {
    /// Creates progress for an `n`-queen run. Until a strategy publishes a
    /// board, every row counts as unresolved.
    pub fn new(n: usize) -> Self {
        Self {
            moves: AtomicU64::new(0),
            conflicts: AtomicUsize::new(n),
            peak_bytes: AtomicUsize::new(0),
        }
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            moves: self.moves.load(Ordering::Relaxed),
            conflicts: self.conflicts.load(Ordering::Relaxed),
            peak_bytes: self.peak_bytes.load(Ordering::Relaxed),
        }
    }
}

/// Deadline and cancellation state polled by a single strategy run.
#[derive(Debug)]
pub struct SearchBudget {
    deadline: Option<Instant>,
    cancel: Arc<AtomicBool>,
    progress: Arc<Progress>,
    clock_check_mask: u64,
    steps: u64,
    stopped: bool,
}

impl SearchBudget {
    /// Default mask: sample the clock every 64 polls.
    const DEFAULT_CLOCK_CHECK_MASK: u64 = 0x3F;

    /// Starts a budget now. `None` means no deadline.
    pub fn new(deadline: Option<Duration>) -> Self {
        Self {
            deadline: deadline.map(|d| Instant::now() + d),
            cancel: Arc::new(AtomicBool::new(false)),
            progress: Arc::new(Progress::default()),
            clock_check_mask: Self::DEFAULT_CLOCK_CHECK_MASK,
            steps: 0,
            stopped: false,
        }
    }

    /// A budget that never stops on its own.
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Shares an external cancellation flag.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Publishes progress into `progress` instead of a private counter set.
    pub fn with_progress(mut self, progress: Arc<Progress>) -> Self {
        self.progress = progress;
        self
    }

    /// Sets the clock sampling mask (`0` samples on every poll).
    pub fn with_clock_check_mask(mut self, mask: u64) -> Self {
        self.clock_check_mask = mask;
        self
    }

    /// Polls the budget from a cheap, frequent suspension point.
    ///
    /// Returns `true` once the deadline has passed or cancellation was
    /// requested. The result is sticky.
    #[inline]
    pub fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        let sample_clock = (self.steps & self.clock_check_mask) == 0;
        self.steps = self.steps.wrapping_add(1);
        self.stopped = self.cancel.load(Ordering::Relaxed) || (sample_clock && self.expired());
        self.stopped
    }

    /// Polls the budget, always reading the clock. For suspension points
    /// that are expensive enough on their own (a full neighbourhood scan or
    /// a generation).
    pub fn should_stop_now(&mut self) -> bool {
        if !self.stopped {
            self.steps = self.steps.wrapping_add(1);
            self.stopped = self.cancel.load(Ordering::Relaxed) || self.expired();
        }
        self.stopped
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Publishes the current move count and unresolved-conflict measure.
    #[inline]
    pub fn publish(&self, moves: u64, conflicts: usize) {
        self.progress.moves.store(moves, Ordering::Relaxed);
        self.progress.conflicts.store(conflicts, Ordering::Relaxed);
    }

    /// Records a working-set sample; the peak is kept.
    pub fn record_memory(&self, bytes: usize) {
        self.progress.peak_bytes.fetch_max(bytes, Ordering::Relaxed);
    }

    /// Largest working-set sample recorded so far.
    pub fn peak_memory(&self) -> usize {
        self.progress.peak_bytes.load(Ordering::Relaxed)
    }
}
