//! Exhaustive depth-first backtracking.
//!
//! Places queens row by row, trying columns in increasing order and pruning
//! with [`ConflictBoard::is_safe`](crate::board::ConflictBoard::is_safe).
//! Stops at the first complete placement. No randomness is involved, so two
//! runs with the same `n` attempt the same placements in the same order;
//! this makes it the fairness baseline for the stochastic strategies.
//!
//! The search uses an explicit stack of `(row, next column)` frames rather
//! than recursion, so depth is bounded only by memory and the deadline poll
//! sits at the top of the loop.

mod config;
mod runner;

pub use config::BacktrackConfig;
pub use runner::BacktrackRunner;
