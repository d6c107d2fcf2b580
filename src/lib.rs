//! Bounded N-Queens solving with interchangeable search strategies.
//!
//! Places `n` queens on an `n × n` board so that no two share a row,
//! column or diagonal, using one of four strategies:
//!
//! - **Backtracking**: Exhaustive depth-first search in fixed column order;
//!   deterministic, and proves unsolvability on small boards.
//! - **Hill Climbing**: Steepest-ascent local search with sideways moves and
//!   random restarts.
//! - **Simulated Annealing (SA)**: Single-queen random moves accepted by the
//!   Metropolis criterion under geometric cooling.
//! - **Genetic Algorithm (GA)**: Elitist population search with segment
//!   crossover and per-gene mutation.
//!
//! Every run goes through [`BoundedRunner`], which enforces a wall-clock
//! deadline, seeds the PRNG and reports a [`SolveOutcome`] (success,
//! timeout, moves, conflicts, elapsed time, peak working-set size) instead
//! of raising errors.
//!
//! # Architecture
//!
//! All strategies share one incremental [`ConflictBoard`] with per-column and
//! per-diagonal occupancy counters, so conflict counts and move deltas are
//! O(1). Strategies poll a [`budget::SearchBudget`] at each suspension point
//! and never read the clock themselves.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use nqueens_bench::{solve, Strategy};
//! use nqueens_bench::sa::SaConfig;
//!
//! let outcome = solve(
//!     &Strategy::SimulatedAnnealing(SaConfig::default()),
//!     12,
//!     Some(7),
//!     Some(Duration::from_secs(10)),
//! );
//! assert!(outcome.success == (outcome.conflicts == 0));
//! ```

pub mod backtrack;
pub mod batch;
pub mod board;
pub mod budget;
pub mod error;
pub mod ga;
pub mod hill;
pub mod outcome;
pub mod random;
pub mod runner;
pub mod sa;

pub use board::ConflictBoard;
pub use error::SolveError;
pub use outcome::{Algorithm, SolveOutcome};
pub use runner::{solve, BoundedRunner, Strategy};
