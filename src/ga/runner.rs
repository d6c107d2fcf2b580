//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → sort → elitism → crossover → mutation → repeat.

use super::config::{GaConfig, MutationPolicy};
use super::operators::{pmx_crossover, reassign_mutation, swap_mutation};
use super::types::{Evaluator, Individual};
use crate::budget::SearchBudget;
use crate::error::{Result, SolveError};
use crate::outcome::SearchReport;
use crate::random::random_permutation;
use rand::Rng;
use tracing::debug;

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use nqueens_bench::budget::SearchBudget;
/// use nqueens_bench::ga::{GaConfig, GaRunner};
/// use nqueens_bench::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let mut budget = SearchBudget::unbounded();
/// let report = GaRunner::run(8, &GaConfig::fast(), &mut rng, &mut budget).unwrap();
/// assert!(report.moves >= 1);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA on an `n`-queens problem.
    ///
    /// The initial population is seeded with random permutations. One move
    /// is one evaluated population, the initial one included. On failure the
    /// report carries the best individual's conflict count.
    pub fn run<R: Rng>(
        n: usize,
        config: &GaConfig,
        rng: &mut R,
        budget: &mut SearchBudget,
    ) -> Result<SearchReport> {
        config.validate().map_err(SolveError::InvalidConfig)?;
        debug!(
            n,
            population_size = config.population_size,
            max_generations = config.max_generations,
            policy = ?config.mutation_policy,
            "genetic search started"
        );

        if budget.should_stop_now() {
            return Ok(SearchReport::interrupted(0, n));
        }

        // 1. Initialize and evaluate population
        let mut evaluator = Evaluator::new(n);
        let mut population: Vec<Individual> = (0..config.population_size)
            .map(|_| evaluator.evaluate(random_permutation(n, rng)))
            .collect();
        rank(&mut population);
        budget.record_memory(population_bytes(&population) + evaluator.heap_bytes());
        let mut generations = 1u64;

        // 2. Evolutionary loop
        loop {
            let best = population.first().ok_or_else(|| {
                SolveError::InternalFault("population became empty".into())
            })?;
            budget.publish(generations, best.conflicts());

            if best.is_solution() {
                debug!(n, generations, "genetic search found a solution");
                return Ok(SearchReport::solved(generations, best.genes.clone()));
            }
            if generations as usize >= config.max_generations {
                debug!(n, generations, best = best.conflicts(), "genetic search out of generations");
                return Ok(SearchReport::exhausted(generations, best.conflicts()));
            }
            if budget.should_stop_now() {
                debug!(n, generations, best = best.conflicts(), "genetic search interrupted");
                return Ok(SearchReport::interrupted(generations, best.conflicts()));
            }

            let mut next = next_generation(&population, config, &mut evaluator, rng);
            rank(&mut next);
            budget.record_memory(
                population_bytes(&population) + population_bytes(&next) + evaluator.heap_bytes(),
            );
            population = next;
            generations += 1;
        }
    }
}

/// Builds the next generation from a population sorted best-first.
///
/// The first `elite_count` individuals survive unchanged; the rest are
/// children of two parents drawn uniformly from the top `parent_pool`.
fn next_generation<R: Rng>(
    population: &[Individual],
    config: &GaConfig,
    evaluator: &mut Evaluator,
    rng: &mut R,
) -> Vec<Individual> {
    let pool = config.parent_pool.min(population.len());
    let mut next: Vec<Individual> = Vec::with_capacity(config.population_size);
    next.extend_from_slice(&population[..config.elite_count]);

    while next.len() < config.population_size {
        let p1 = &population[rng.random_range(0..pool)];
        let p2 = &population[rng.random_range(0..pool)];

        let mut genes = pmx_crossover(&p1.genes, &p2.genes, rng);
        match config.mutation_policy {
            MutationPolicy::Swap => swap_mutation(&mut genes, config.mutation_rate, rng),
            MutationPolicy::Reassign => reassign_mutation(&mut genes, config.mutation_rate, rng),
        }

        next.push(evaluator.evaluate(genes));
    }

    next
}

/// Orders a population best-first by fitness. The sort is stable.
fn rank(population: &mut [Individual]) {
    population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
}

fn population_bytes(population: &[Individual]) -> usize {
    std::mem::size_of_val(population) + population.iter().map(Individual::heap_bytes).sum::<usize>()
}

// ============================================================================
// Tests
// ============================================================================
