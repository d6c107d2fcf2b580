//! Seedable randomness shared by every strategy.
//!
//! Searches never touch thread-local or global RNG state; the caller's seed
//! becomes one [`SearchRng`] that is threaded by `&mut` through the run.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The PRNG type used by all strategies.
pub type SearchRng = ChaCha8Rng;

/// Creates a deterministic PRNG from `seed`.
pub fn create_rng(seed: u64) -> SearchRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Creates a PRNG from `seed`, or from fresh entropy when `seed` is `None`.
pub fn rng_from_seed(seed: Option<u64>) -> SearchRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Returns a uniformly shuffled permutation of `0..n`.
pub fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    perm
}

/// Picks an index in `0..n` different from `current`, uniformly over the
/// `n - 1` alternatives.
///
/// # Panics
/// Panics if `n < 2`.
pub fn other_index<R: Rng>(n: usize, current: usize, rng: &mut R) -> usize {
    let idx = rng.random_range(0..n - 1);
    if idx >= current {
        idx + 1
    } else {
        idx
    }
}

/// Pick two distinct sorted indices `start < end` within `0..n`.
///
/// # Panics
/// Panics if `n < 2`.
pub fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = other_index(n, a, rng);
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
