//! Error taxonomy for solve invocations.
//!
//! None of these escape [`crate::runner::BoundedRunner`]: every error is
//! folded into a [`crate::SolveOutcome`] so a failing strategy shows up as a
//! data row, not a crash.

use std::time::Duration;
use thiserror::Error;

/// Errors raised while preparing or running a search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The board dimension cannot hold a single queen.
    #[error("invalid board size {0}: n must be at least 1")]
    InvalidSize(usize),

    /// A strategy configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The worker did not yield within its deadline plus grace period and
    /// was abandoned.
    #[error("worker abandoned after exceeding deadline by {0:?}")]
    Timeout(Duration),

    /// A board invariant was violated or the strategy panicked.
    #[error("internal fault: {0}")]
    InternalFault(String),
}

/// Result type alias for solver operations.
pub type Result<T> = std::result::Result<T, SolveError>;
