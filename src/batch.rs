//! Many independent solves in one call.
//!
//! Each [`SolveRequest`] runs under its own [`BoundedRunner`], so deadlines
//! and seeds never interact. With the `parallel` feature the requests are
//! spread over the rayon thread pool; results always come back in request
//! order.

use crate::outcome::SolveOutcome;
use crate::runner::{BoundedRunner, Strategy};
use std::time::Duration;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One entry of a batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveRequest {
    pub strategy: Strategy,
    pub n: usize,
    pub seed: Option<u64>,
    pub deadline: Option<Duration>,
}

impl SolveRequest {
    pub fn new(strategy: Strategy, n: usize) -> Self {
        Self {
            strategy,
            n,
            seed: None,
            deadline: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    fn runner(&self) -> BoundedRunner {
        let mut runner = BoundedRunner::new();
        if let Some(seed) = self.seed {
            runner = runner.with_seed(seed);
        }
        if let Some(deadline) = self.deadline {
            runner = runner.with_deadline(deadline);
        }
        runner
    }

    fn solve(&self) -> SolveOutcome {
        self.runner().run(&self.strategy, self.n)
    }
}

/// Solves every request and returns the outcomes in request order.
///
/// `parallel` is honoured only when the crate is built with the `parallel`
/// feature; otherwise requests always run one after another.
pub fn solve_batch(requests: &[SolveRequest], parallel: bool) -> Vec<SolveOutcome> {
    debug!(requests = requests.len(), parallel, "batch started");

    #[cfg(feature = "parallel")]
    {
        if parallel {
            return requests.par_iter().map(SolveRequest::solve).collect();
        }
    }

    requests.iter().map(SolveRequest::solve).collect()
}
