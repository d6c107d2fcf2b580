//! Backtracking execution loop.

use super::config::BacktrackConfig;
use crate::board::ConflictBoard;
use crate::budget::SearchBudget;
use crate::error::{Result, SolveError};
use crate::outcome::SearchReport;
use std::mem::size_of;
use tracing::debug;

/// Executes exhaustive backtracking.
pub struct BacktrackRunner;

impl BacktrackRunner {
    /// Searches for the first solution of the `n`-queens problem.
    ///
    /// Every attempted placement counts as one move, safe or not. When the
    /// search fails, the reported conflicts are the rows left empty by the
    /// deepest conflict-free prefix reached.
    pub fn run(
        n: usize,
        config: &BacktrackConfig,
        budget: &mut SearchBudget,
    ) -> Result<SearchReport> {
        config.validate().map_err(SolveError::InvalidConfig)?;
        debug!(n, node_limit = config.node_limit, "backtracking started");

        let mut board = ConflictBoard::empty(n);
        // frames[row] = next column to try in `row`; the top frame is the current row.
        let mut frames: Vec<usize> = Vec::with_capacity(n + 1);
        frames.push(0);
        budget.record_memory(board.heap_bytes() + frames.capacity() * size_of::<usize>());

        let mut moves = 0u64;
        let mut deepest = 0usize;

        loop {
            if budget.should_stop() {
                debug!(n, moves, deepest, "backtracking interrupted");
                return Ok(SearchReport::interrupted(moves, n - deepest));
            }

            let row = frames.len() - 1;
            if row == n {
                let solution = board.columns().ok_or_else(|| {
                    SolveError::InternalFault("full-depth frame stack over incomplete board".into())
                })?;
                budget.publish(moves, 0);
                debug!(n, moves, "backtracking found a solution");
                return Ok(SearchReport::solved(moves, solution));
            }

            let mut chosen = None;
            for col in frames[row]..n {
                if config.node_limit > 0 && moves >= config.node_limit {
                    debug!(n, moves, deepest, "backtracking hit node limit");
                    return Ok(SearchReport::exhausted(moves, n - deepest));
                }
                moves += 1;
                if board.is_safe(row, col) {
                    chosen = Some(col);
                    break;
                }
            }

            match chosen {
                Some(col) => {
                    board.place(row, col);
                    frames[row] = col + 1;
                    frames.push(0);
                    deepest = deepest.max(row + 1);
                }
                None => {
                    frames.pop();
                    if row == 0 {
                        debug!(n, moves, deepest, "backtracking exhausted the search space");
                        return Ok(SearchReport::exhausted(moves, n - deepest));
                    }
                    board.remove(row - 1);
                }
            }
            budget.publish(moves, n - deepest);
        }
    }
}
