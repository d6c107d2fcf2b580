//! Hill climbing execution loop.

use super::config::HillConfig;
use crate::board::ConflictBoard;
use crate::budget::SearchBudget;
use crate::error::{Result, SolveError};
use crate::outcome::SearchReport;
use rand::Rng;
use std::mem::size_of;
use tracing::{debug, trace};

/// Executes steepest-ascent hill climbing with random restarts.
pub struct HillRunner;

impl HillRunner {
    /// Runs restarting hill climbing on an `n`-queens board.
    ///
    /// One move is one full neighbourhood evaluation. On failure the report
    /// carries the lowest conflict count reached over all climbs.
    pub fn run<R: Rng>(
        n: usize,
        config: &HillConfig,
        rng: &mut R,
        budget: &mut SearchBudget,
    ) -> Result<SearchReport> {
        config.validate().map_err(SolveError::InvalidConfig)?;
        debug!(n, max_restarts = config.max_restarts, "hill climbing started");

        let mut search = Search::new(n);
        let mut restarts = 0u64;

        loop {
            if budget.should_stop_now() {
                return Ok(search.interrupted().with_restarts(restarts));
            }

            let mut board = ConflictBoard::random(n, rng);
            budget.record_memory(board.heap_bytes());
            match climb(&mut board, config, rng, budget, &mut search)? {
                Climb::Solved => return solved(&board, search.moves, restarts),
                Climb::Interrupted => {
                    debug!(n, moves = search.moves, restarts, "hill climbing interrupted");
                    return Ok(search.interrupted().with_restarts(restarts));
                }
                Climb::Stuck => {}
            }

            if restarts as usize >= config.max_restarts {
                debug!(
                    n,
                    moves = search.moves,
                    restarts,
                    best_seen = search.best_seen,
                    "hill climbing out of restarts"
                );
                return Ok(
                    SearchReport::exhausted(search.moves, search.best_seen).with_restarts(restarts)
                );
            }
            restarts += 1;
            trace!(restarts, "hill climbing restart");
        }
    }
}

/// How a single climb ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Climb {
    Solved,
    Stuck,
    Interrupted,
}

/// State carried across restarts.
#[derive(Debug)]
struct Search {
    moves: u64,
    best_seen: usize,
    ties: Vec<(usize, usize)>,
}

impl Search {
    fn new(n: usize) -> Self {
        Self {
            moves: 0,
            best_seen: n,
            ties: Vec::new(),
        }
    }

    fn interrupted(&self) -> SearchReport {
        SearchReport::interrupted(self.moves, self.best_seen)
    }
}

/// Sideways-move bookkeeping for one climb.
#[derive(Debug, Default)]
struct Plateau {
    run: usize,
    longest: usize,
}

impl Plateau {
    /// Whether a step whose best delta is `delta` is taken. Improving steps
    /// reset the sideways run.
    fn admit(&mut self, delta: isize, config: &HillConfig) -> bool {
        if delta < 0 {
            self.run = 0;
            true
        } else if delta == 0 && config.allow_sideways && self.run < config.max_sideways {
            self.run += 1;
            self.longest = self.longest.max(self.run);
            true
        } else {
            false
        }
    }
}

/// Climbs from `board` until it is solved, no admissible step remains, the
/// step cap is reached or the budget stops the run.
fn climb<R: Rng>(
    board: &mut ConflictBoard,
    config: &HillConfig,
    rng: &mut R,
    budget: &mut SearchBudget,
    search: &mut Search,
) -> Result<Climb> {
    let mut current = board.conflict_count();
    search.best_seen = search.best_seen.min(current);
    budget.publish(search.moves, search.best_seen);
    if current == 0 {
        return Ok(Climb::Solved);
    }

    let mut plateau = Plateau::default();
    for _ in 0..config.max_steps {
        if budget.should_stop_now() {
            return Ok(Climb::Interrupted);
        }

        let Some(delta) = best_moves(board, &mut search.ties) else {
            break;
        };
        search.moves += 1;
        budget.record_memory(
            board.heap_bytes() + search.ties.capacity() * size_of::<(usize, usize)>(),
        );
        if !plateau.admit(delta, config) {
            break;
        }

        let (row, col) = search.ties[rng.random_range(0..search.ties.len())];
        board.place(row, col);
        current = current.checked_add_signed(delta).ok_or_else(|| {
            SolveError::InternalFault(format!(
                "conflict count {current} cannot absorb delta {delta}"
            ))
        })?;
        search.best_seen = search.best_seen.min(current);
        budget.publish(search.moves, search.best_seen);

        if current == 0 {
            return Ok(Climb::Solved);
        }
    }

    board.verify()?;
    if board.conflict_count() != current {
        return Err(SolveError::InternalFault(format!(
            "tracked conflicts {current} disagree with board count {}",
            board.conflict_count()
        )));
    }
    trace!(current, longest_sideways = plateau.longest, "climb stuck");
    Ok(Climb::Stuck)
}

/// Scans every single-queen relocation and collects those with the lowest
/// delta into `ties`. Returns that delta, or `None` if the board has no
/// neighbours.
fn best_moves(board: &ConflictBoard, ties: &mut Vec<(usize, usize)>) -> Option<isize> {
    ties.clear();
    let n = board.n();
    let mut best = isize::MAX;
    for row in 0..n {
        let current = board.column(row)?;
        for col in (0..n).filter(|&c| c != current) {
            let delta = board.move_delta(row, col);
            if delta < best {
                best = delta;
                ties.clear();
                ties.push((row, col));
            } else if delta == best {
                ties.push((row, col));
            }
        }
    }
    (!ties.is_empty()).then_some(best)
}

fn solved(board: &ConflictBoard, moves: u64, restarts: u64) -> Result<SearchReport> {
    board.verify()?;
    let solution = board
        .columns()
        .filter(|_| board.conflict_count() == 0)
        .ok_or_else(|| SolveError::InternalFault("hill climbing solution failed recount".into()))?;
    debug!(n = board.n(), moves, restarts, "hill climbing found a solution");
    Ok(SearchReport::solved(moves, solution).with_restarts(restarts))
}
