//! SA execution loop.

use super::config::SaConfig;
use crate::board::ConflictBoard;
use crate::budget::SearchBudget;
use crate::error::{Result, SolveError};
use crate::outcome::SearchReport;
use crate::random::other_index;
use rand::Rng;
use tracing::{debug, trace};

/// Executes Simulated Annealing.
pub struct SaRunner;

/// Counters reported when a run ends.
#[derive(Debug, Default)]
struct Tally {
    moves: u64,
    accepted: u64,
    improving: u64,
}

impl SaRunner {
    /// Runs SA on an `n`-queens board.
    ///
    /// Every iteration is one move, accepted or not. On failure the report
    /// carries the conflicts of the final (not the best) board.
    pub fn run<R: Rng>(
        n: usize,
        config: &SaConfig,
        rng: &mut R,
        budget: &mut SearchBudget,
    ) -> Result<SearchReport> {
        config.validate().map_err(SolveError::InvalidConfig)?;
        debug!(
            n,
            initial_temperature = config.initial_temperature,
            cooling_rate = config.cooling_rate,
            "simulated annealing started"
        );

        if budget.should_stop() {
            return Ok(SearchReport::interrupted(0, n));
        }

        let mut board = ConflictBoard::random(n, rng);
        let mut current = board.conflict_count();
        budget.record_memory(board.heap_bytes());
        budget.publish(0, current);

        let mut tally = Tally::default();
        let mut temperature = config.initial_temperature;

        if current == 0 {
            return solved(&board, &tally);
        }

        for _ in 0..config.max_iterations {
            if budget.should_stop() {
                debug!(n, moves = tally.moves, current, temperature, "annealing interrupted");
                return Ok(SearchReport::interrupted(tally.moves, current));
            }

            let row = rng.random_range(0..n);
            let from = board.column(row).ok_or_else(|| {
                SolveError::InternalFault(format!("row {row} lost its queen"))
            })?;
            let to = other_index(n, from, rng);
            tally.moves += 1;

            let delta = board.move_delta(row, to);

            // Metropolis acceptance criterion
            let accept = if delta <= 0 {
                if delta < 0 {
                    tally.improving += 1;
                }
                true
            } else {
                let probability = (-(delta as f64) / temperature).exp();
                rng.random::<f64>() < probability
            };

            if accept {
                board.place(row, to);
                tally.accepted += 1;
                current = current.checked_add_signed(delta).ok_or_else(|| {
                    SolveError::InternalFault(format!(
                        "conflict count {current} cannot absorb delta {delta}"
                    ))
                })?;
                if current == 0 {
                    return solved(&board, &tally);
                }
            }
            budget.publish(tally.moves, current);

            temperature *= 1.0 - config.cooling_rate;
            if temperature < config.min_temperature {
                trace!(temperature, "annealing frozen");
                return finish_failed(&board, current, &tally, temperature);
            }
        }

        finish_failed(&board, current, &tally, temperature)
    }
}

fn solved(board: &ConflictBoard, tally: &Tally) -> Result<SearchReport> {
    board.verify()?;
    let solution = board
        .columns()
        .filter(|_| board.conflict_count() == 0)
        .ok_or_else(|| SolveError::InternalFault("annealing solution failed recount".into()))?;
    debug!(
        n = board.n(),
        moves = tally.moves,
        accepted = tally.accepted,
        improving = tally.improving,
        "annealing found a solution"
    );
    Ok(SearchReport::solved(tally.moves, solution))
}

fn finish_failed(
    board: &ConflictBoard,
    current: usize,
    tally: &Tally,
    temperature: f64,
) -> Result<SearchReport> {
    board.verify()?;
    if board.conflict_count() != current {
        return Err(SolveError::InternalFault(format!(
            "tracked conflicts {current} disagree with board count {}",
            board.conflict_count()
        )));
    }
    debug!(
        n = board.n(),
        moves = tally.moves,
        accepted = tally.accepted,
        improving = tally.improving,
        current,
        final_temperature = temperature,
        "annealing gave up"
    );
    Ok(SearchReport::exhausted(tally.moves, current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::brute_force_conflicts;
    use crate::outcome::SearchStatus;
    use crate::random::create_rng;
    use std::time::Duration;

    fn anneal(n: usize, config: &SaConfig, seed: u64) -> SearchReport {
        let mut rng = create_rng(seed);
        SaRunner::run(n, config, &mut rng, &mut SearchBudget::unbounded()).unwrap()
    }

    fn slow_cooling() -> SaConfig {
        SaConfig::default()
            .with_initial_temperature(2.0)
            .with_min_temperature(1e-4)
            .with_cooling_rate(1e-4)
            .with_max_iterations(200_000)
    }

    #[test]
    fn test_solves_eight_queens() {
        let report = anneal(8, &slow_cooling(), 42);
        assert_eq!(report.status, SearchStatus::Solved);
        assert_eq!(brute_force_conflicts(&report.solution.unwrap()), 0);
    }

    #[test]
    fn test_same_seed_same_report() {
        let config = SaConfig::default();
        let a = anneal(20, &config, 7);
        let b = anneal(20, &config, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_freezes_before_iteration_budget() {
        // 1 * 0.5^k drops below 0.01 after 7 iterations.
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(0.01)
            .with_cooling_rate(0.5)
            .with_max_iterations(1000);
        let report = anneal(3, &config, 1);
        assert_eq!(report.status, SearchStatus::Exhausted);
        assert_eq!(report.moves, 7);
        assert!(report.conflicts >= 1);
    }

    #[test]
    fn test_iteration_budget() {
        let config = SaConfig::default().with_max_iterations(25);
        let report = anneal(3, &config, 9);
        assert_eq!(report.status, SearchStatus::Exhausted);
        assert_eq!(report.moves, 25);
    }

    #[test]
    fn test_single_queen() {
        let report = anneal(1, &SaConfig::default(), 0);
        assert_eq!(report.status, SearchStatus::Solved);
        assert_eq!(report.moves, 0);
    }

    #[test]
    fn test_zero_deadline() {
        let mut rng = create_rng(0);
        let mut budget = SearchBudget::new(Some(Duration::ZERO));
        let report = SaRunner::run(20, &SaConfig::default(), &mut rng, &mut budget).unwrap();
        assert_eq!(report.status, SearchStatus::Interrupted);
        assert_eq!(report.moves, 0);
        assert_eq!(report.conflicts, 20);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut rng = create_rng(0);
        let config = SaConfig::default().with_cooling_rate(2.0);
        let err = SaRunner::run(8, &config, &mut rng, &mut SearchBudget::unbounded()).unwrap_err();
        assert!(matches!(err, SolveError::InvalidConfig(_)));
    }

    #[test]
    fn test_nan_floor_rejected_before_search() {
        // A NaN floor would never trigger the freeze stop.
        let mut rng = create_rng(0);
        let mut budget = SearchBudget::unbounded();
        let config = SaConfig::default().with_min_temperature(f64::NAN);
        let err = SaRunner::run(8, &config, &mut rng, &mut budget).unwrap_err();
        assert!(matches!(err, SolveError::InvalidConfig(_)));
        assert_eq!(budget.peak_memory(), 0);
    }
}
