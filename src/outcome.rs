//! Uniform result records.
//!
//! Strategies return a [`SearchReport`]; the bounded runner stamps it with
//! timing and memory figures and turns it into an immutable
//! [`SolveOutcome`], the record a benchmarking harness consumes.

use crate::board::ConflictBoard;
use crate::budget::ProgressSnapshot;
use crate::error::{Result, SolveError};
use std::fmt;
use std::time::Duration;

/// Tag identifying which strategy produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Backtracking,
    HillClimbing,
    SimulatedAnnealing,
    Genetic,
}

impl Algorithm {
    /// Stable string tag used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Backtracking => "Backtracking",
            Algorithm::HillClimbing => "HillClimbing",
            Algorithm::SimulatedAnnealing => "SimulatedAnnealing",
            Algorithm::Genetic => "GeneticAlgorithm",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a strategy run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// A conflict-free placement was found.
    Solved,
    /// The strategy's own budget ran out (search space, restarts,
    /// temperature, iterations or generations).
    Exhausted,
    /// The deadline passed or cancellation was requested.
    Interrupted,
}

/// What a strategy hands back to the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub status: SearchStatus,
    pub moves: u64,
    pub restarts: u64,
    /// Conflicting pairs plus empty rows of the reported state.
    pub conflicts: usize,
    /// Placement array, present only when solved.
    pub solution: Option<Vec<usize>>,
}

impl SearchReport {
    pub fn solved(moves: u64, solution: Vec<usize>) -> Self {
        Self {
            status: SearchStatus::Solved,
            moves,
            restarts: 0,
            conflicts: 0,
            solution: Some(solution),
        }
    }

    pub fn exhausted(moves: u64, conflicts: usize) -> Self {
        Self {
            status: SearchStatus::Exhausted,
            moves,
            restarts: 0,
            conflicts,
            solution: None,
        }
    }

    pub fn interrupted(moves: u64, conflicts: usize) -> Self {
        Self {
            status: SearchStatus::Interrupted,
            moves,
            restarts: 0,
            conflicts,
            solution: None,
        }
    }

    pub fn with_restarts(mut self, restarts: u64) -> Self {
        self.restarts = restarts;
        self
    }
}

/// Immutable record of one solve invocation.
///
/// Every field is always populated; `board_snapshot` is present iff
/// `success`, and `error` only for faults or invalid input. `conflicts` is
/// zero exactly when `success` is true.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveOutcome {
    pub algorithm: Algorithm,
    pub n: usize,
    pub success: bool,
    pub timed_out: bool,
    pub elapsed_seconds: f64,
    /// Largest working set the strategy reported: board counters, frame
    /// stacks and populations, sized from their `Vec` capacities. An
    /// estimate of the search's own state, not the process allocation peak.
    pub peak_memory_bytes: u64,
    pub moves: u64,
    /// Random restarts performed (hill climbing only).
    pub restarts: u64,
    pub conflicts: usize,
    pub board_snapshot: Option<Vec<usize>>,
    pub error: Option<String>,
}

impl SolveOutcome {
    /// Builds an outcome from a finished strategy run.
    ///
    /// A solved report whose placement does not recompute to zero conflicts
    /// is an [`SolveError::InternalFault`].
    pub fn from_report(
        algorithm: Algorithm,
        n: usize,
        report: SearchReport,
        elapsed: Duration,
        peak_memory_bytes: usize,
    ) -> Result<Self> {
        let success = report.status == SearchStatus::Solved;
        let board_snapshot = if success {
            let solution = report.solution.ok_or_else(|| {
                SolveError::InternalFault("solved report without a placement".into())
            })?;
            let board = ConflictBoard::from_columns(&solution)
                .map_err(|e| SolveError::InternalFault(e.to_string()))?;
            if solution.len() != n || board.conflict_count() != 0 {
                return Err(SolveError::InternalFault(format!(
                    "reported solution {solution:?} is not a valid {n}-queens placement"
                )));
            }
            Some(solution)
        } else {
            None
        };

        Ok(Self {
            algorithm,
            n,
            success,
            timed_out: report.status == SearchStatus::Interrupted,
            elapsed_seconds: elapsed.as_secs_f64(),
            peak_memory_bytes: peak_memory_bytes as u64,
            moves: report.moves,
            restarts: report.restarts,
            conflicts: if success { 0 } else { report.conflicts.max(1) },
            board_snapshot,
            error: None,
        })
    }

    /// Builds the outcome of a run that faulted or never started.
    pub fn from_error(
        algorithm: Algorithm,
        n: usize,
        error: &SolveError,
        progress: ProgressSnapshot,
        elapsed: Duration,
    ) -> Self {
        Self {
            algorithm,
            n,
            success: false,
            timed_out: matches!(error, SolveError::Timeout(_)),
            elapsed_seconds: elapsed.as_secs_f64(),
            peak_memory_bytes: progress.peak_bytes as u64,
            moves: progress.moves,
            restarts: 0,
            conflicts: progress.conflicts.max(1),
            board_snapshot: None,
            error: Some(error.to_string()),
        }
    }
}
