//! Genetic Algorithm over column arrays.
//!
//! Individuals are `genes[row] = column` vectors seeded as random
//! permutations. Each generation is sorted by fitness `1 / (1 + conflicts)`;
//! the top `elite_count` survive unchanged and the remainder are bred from
//! a top slice of the population by segment crossover and per-gene
//! mutation.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Population size, elitism, parent pool, mutation policy
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`Individual`]: A scored gene vector
//!
//! # Submodules
//!
//! - [`operators`]: Segment crossover and swap / reassign mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod types;

pub use config::{GaConfig, MutationPolicy};
pub use runner::GaRunner;
pub use types::{Evaluator, Individual};
