//! End-to-end solves through the public entry points.

use nqueens_bench::backtrack::BacktrackConfig;
use nqueens_bench::board::brute_force_conflicts;
use nqueens_bench::ga::{GaConfig, MutationPolicy};
use nqueens_bench::hill::HillConfig;
use nqueens_bench::sa::SaConfig;
use nqueens_bench::{solve, Algorithm, BoundedRunner, ConflictBoard, SolveOutcome, Strategy};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn strategies() -> Vec<Strategy> {
    vec![
        Strategy::Backtracking(BacktrackConfig::default()),
        Strategy::HillClimbing(HillConfig::default()),
        Strategy::SimulatedAnnealing(SaConfig::default()),
        Strategy::Genetic(GaConfig::default()),
        Strategy::Genetic(GaConfig::fast().with_mutation_policy(MutationPolicy::Reassign)),
    ]
}

fn assert_well_formed(outcome: &SolveOutcome) {
    assert!(outcome.elapsed_seconds >= 0.0);
    assert_eq!(outcome.success, outcome.conflicts == 0, "{outcome:?}");
    assert_eq!(outcome.success, outcome.board_snapshot.is_some(), "{outcome:?}");
    if let Some(snapshot) = &outcome.board_snapshot {
        assert_eq!(snapshot.len(), outcome.n);
        assert_eq!(brute_force_conflicts(snapshot), 0);
        assert_eq!(ConflictBoard::from_columns(snapshot).unwrap().conflict_count(), 0);
    }
}

#[test]
fn backtracking_solves_eight_queens() {
    let strategy = Strategy::Backtracking(BacktrackConfig::default());
    let outcome = solve(&strategy, 8, None, Some(Duration::from_secs(5)));
    assert_eq!(outcome.algorithm, Algorithm::Backtracking);
    assert!(outcome.success);
    assert!(!outcome.timed_out);
    assert_eq!(outcome.conflicts, 0);
    assert!(outcome.moves > 0);
    assert_well_formed(&outcome);
}

#[test]
fn hill_climbing_cannot_solve_three_queens() {
    let strategy = Strategy::HillClimbing(HillConfig::default().with_max_restarts(5));
    let outcome = solve(&strategy, 3, Some(42), Some(Duration::from_secs(1)));
    assert!(!outcome.success);
    assert!(outcome.conflicts >= 1);
    assert!(outcome.board_snapshot.is_none());
    assert_well_formed(&outcome);
}

#[test]
fn annealing_is_reproducible_for_a_seed() {
    let strategy = Strategy::SimulatedAnnealing(SaConfig::default());
    let deadline = Some(Duration::from_secs(10));
    let first = solve(&strategy, 20, Some(7), deadline);
    let second = solve(&strategy, 20, Some(7), deadline);
    assert!(!first.timed_out);
    assert_eq!(first.conflicts, second.conflicts);
    assert_eq!(first.moves, second.moves);
    assert_eq!(first.board_snapshot, second.board_snapshot);
    assert_well_formed(&first);
}

#[test]
fn backtracking_existence_and_impossibility() {
    let strategy = Strategy::Backtracking(BacktrackConfig::default());
    for n in [1, 4, 5, 6, 7, 8, 9, 10, 11, 12] {
        let outcome = solve(&strategy, n, None, None);
        assert!(outcome.success, "n = {n}");
        assert_well_formed(&outcome);
    }
    for n in [2, 3] {
        let outcome = solve(&strategy, n, None, None);
        assert!(!outcome.success, "n = {n}");
        assert!(!outcome.timed_out);
        assert!(outcome.conflicts >= 1);
    }
}

#[test]
fn backtracking_is_deterministic() {
    let strategy = Strategy::Backtracking(BacktrackConfig::default());
    let a = solve(&strategy, 10, None, None);
    let b = solve(&strategy, 10, Some(99), None);
    assert_eq!(a.moves, b.moves);
    assert_eq!(a.board_snapshot, b.board_snapshot);
}

#[test]
fn zero_deadline_times_out_every_strategy() {
    for strategy in strategies() {
        for n in [1, 8, 50] {
            let outcome = solve(&strategy, n, Some(1), Some(Duration::ZERO));
            assert!(outcome.timed_out, "{:?} n = {n}", strategy.algorithm());
            assert!(!outcome.success);
            assert_eq!(outcome.moves, 0);
            assert!(outcome.conflicts >= 1);
            assert_well_formed(&outcome);
        }
    }
}

#[test]
fn seeded_randomized_searches_solve_eight_queens() {
    let deadline = Some(Duration::from_secs(20));
    for strategy in [
        Strategy::HillClimbing(HillConfig::default()),
        Strategy::Genetic(GaConfig::fast()),
    ] {
        let outcome = solve(&strategy, 8, Some(11), deadline);
        assert!(outcome.success, "{outcome:?}");
        assert!(outcome.peak_memory_bytes > 0);
        assert_well_formed(&outcome);
    }
}

#[test]
fn only_hill_climbing_reports_restarts() {
    let hill = solve(
        &Strategy::HillClimbing(HillConfig::default().with_max_restarts(3)),
        3,
        Some(5),
        None,
    );
    assert_eq!(hill.restarts, 3);
    let sa = solve(&Strategy::SimulatedAnnealing(SaConfig::default()), 8, Some(5), None);
    assert_eq!(sa.restarts, 0);
}

#[test]
fn external_cancel_stops_a_long_run() {
    let flag = Arc::new(AtomicBool::new(false));
    let trigger = flag.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        trigger.store(true, Ordering::Relaxed);
    });

    // Three queens have no solution and the temperature never freezes, so only the flag ends it.
    let strategy = Strategy::SimulatedAnnealing(
        SaConfig::default()
            .with_cooling_rate(1e-9)
            .with_max_iterations(usize::MAX),
    );
    let outcome = BoundedRunner::new()
        .with_seed(1)
        .with_cancel(flag)
        .run(&strategy, 3);
    canceller.join().unwrap();

    assert!(outcome.timed_out);
    assert!(!outcome.success);
    assert!(outcome.moves > 0);
    assert!(outcome.conflicts >= 1);
}

#[test]
fn hard_cancel_mode_still_honours_cooperative_deadline() {
    let strategy = Strategy::SimulatedAnnealing(
        SaConfig::default()
            .with_cooling_rate(1e-9)
            .with_max_iterations(usize::MAX),
    );
    let outcome = BoundedRunner::new()
        .with_seed(3)
        .with_deadline(Duration::from_millis(50))
        .with_hard_cancel(Duration::from_secs(5))
        .run(&strategy, 3);
    assert!(outcome.timed_out);
    assert!(!outcome.success);
    assert!(outcome.error.is_none());
}

#[test]
fn invalid_size_is_an_outcome_not_a_panic() {
    for strategy in strategies() {
        let outcome = solve(&strategy, 0, None, None);
        assert!(!outcome.success);
        assert!(outcome.error.is_some());
        assert_well_formed(&outcome);
    }
}
