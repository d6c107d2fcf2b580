//! Steepest-ascent hill climbing with sideways moves and random restarts.
//!
//! Each step scans the full neighbourhood (every row × every other column),
//! scoring candidates with the O(1)
//! [`move_delta`](crate::board::ConflictBoard::move_delta), and adopts one of
//! the best moves uniformly at random. Equal-cost ("sideways") moves are
//! taken up to a cap to cross plateaus. A local minimum triggers a restart
//! from a fresh random board until the restart budget is spent.
//!
//! # References
//!
//! - Russell & Norvig, *Artificial Intelligence: A Modern Approach*, §4.1
//!   (hill climbing with sideways moves and random restarts on 8-queens)

mod config;
mod runner;

pub use config::HillConfig;
pub use runner::HillRunner;
