//! Simulated Annealing (SA).
//!
//! A single-board trajectory search. Each iteration relocates one random
//! row's queen to a different random column; improvements and sideways
//! moves are always accepted, worsening moves with the Metropolis
//! probability `exp(-Δ / T)`. The temperature cools geometrically by
//! `1 - cooling_rate` per iteration.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::SaRunner;
