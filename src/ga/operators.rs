//! Genetic operators on column arrays.
//!
//! These operate on `&[usize]` gene vectors where `genes[row] = column`.
//!
//! # Crossover
//!
//! - [`pmx_crossover`]: copy a random segment from one parent, fill the
//!   remaining positions in order with the other parent's unused genes.
//!   Children of two permutations are permutations.
//!
//! # Mutation
//!
//! - [`swap_mutation`]: per-gene exchange with another random position;
//!   preserves permutations
//! - [`reassign_mutation`]: per-gene replacement with a random column;
//!   may introduce duplicate columns
//!
//! # References
//!
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use crate::random::{distinct_pair, other_index};
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Partially mapped crossover over a random segment.
///
/// The segment `[start, end)` is drawn from two distinct positions, so it
/// holds at least one gene and never the whole array.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn pmx_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return parent1.to_vec();
    }

    let (start, end) = distinct_pair(n, rng);
    pmx_child(parent1, parent2, start, end)
}

/// Build one child: `template[start..end]` verbatim, every other position
/// filled left to right with `donor`'s genes (in donor order) that do not
/// occur in the copied segment.
///
/// When the donor is not a permutation it may run out of unused genes; the
/// remaining positions then take the donor's gene at the same position.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if the parents differ in length, `start > end`, `end > n`, or a
/// gene is not a column in `0..n`.
pub fn pmx_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    assert_eq!(n, donor.len(), "parents must have equal length");
    assert!(start <= end && end <= n, "invalid segment [{start}, {end}) for n = {n}");

    let mut child = template.to_vec();
    let mut in_segment = vec![false; n];
    for &gene in &template[start..end] {
        in_segment[gene] = true;
    }

    let mut fill = donor.iter().copied().filter(|&gene| !in_segment[gene]);
    for pos in (0..start).chain(end..n) {
        child[pos] = fill.next().unwrap_or(donor[pos]);
    }

    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation: each gene, with probability `rate`, trades places with a
/// different random gene.
pub fn swap_mutation<R: Rng>(genes: &mut [usize], rate: f64, rng: &mut R) {
    let n = genes.len();
    if n < 2 {
        return;
    }
    for i in 0..n {
        if rng.random::<f64>() < rate {
            let j = other_index(n, i, rng);
            genes.swap(i, j);
        }
    }
}

/// Reassign mutation: each gene, with probability `rate`, becomes a
/// uniformly random column in `0..n`.
pub fn reassign_mutation<R: Rng>(genes: &mut [usize], rate: f64, rng: &mut R) {
    let n = genes.len();
    for gene in genes.iter_mut() {
        if rng.random::<f64>() < rate {
            *gene = rng.random_range(0..n);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{create_rng, random_permutation};
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Check that a slice is a valid permutation of 0..n.
    fn is_valid_permutation(perm: &[usize], n: usize) -> bool {
        if perm.len() != n {
            return false;
        }
        let set: HashSet<usize> = perm.iter().copied().collect();
        set.len() == n && perm.iter().all(|&v| v < n)
    }

    // ---- Crossover ----

    #[test]
    fn test_pmx_child_known_case() {
        let p1 = vec![0, 1, 2, 3, 4, 5];
        let p2 = vec![5, 4, 3, 2, 1, 0];
        // Segment [2, 4) = {2, 3}; fill from p2 skipping 3 and 2: 5, 4, 1, 0.
        assert_eq!(pmx_child(&p1, &p2, 2, 4), vec![5, 4, 2, 3, 1, 0]);
    }

    #[test]
    fn test_pmx_preserves_segment() {
        let mut rng = create_rng(123);
        let p1 = random_permutation(10, &mut rng);
        let p2 = random_permutation(10, &mut rng);
        for start in 0..10 {
            for end in start..=10 {
                let child = pmx_child(&p1, &p2, start, end);
                assert_eq!(&child[start..end], &p1[start..end]);
            }
        }
    }

    #[test]
    fn test_pmx_single_element() {
        let mut rng = create_rng(42);
        assert_eq!(pmx_crossover(&[0], &[0], &mut rng), vec![0]);
    }

    #[test]
    fn test_pmx_identical_parents() {
        let mut rng = create_rng(42);
        let p = vec![3, 1, 0, 2];
        for _ in 0..20 {
            assert_eq!(pmx_crossover(&p, &p, &mut rng), p);
        }
    }

    #[test]
    fn test_pmx_random_segments_valid() {
        let mut rng = create_rng(42);
        let p1 = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let p2 = vec![3, 7, 5, 1, 6, 0, 2, 4];
        for _ in 0..100 {
            let child = pmx_crossover(&p1, &p2, &mut rng);
            assert!(is_valid_permutation(&child, 8), "PMX child not valid: {child:?}");
        }
    }

    #[test]
    fn test_pmx_non_permutation_donor_fills_every_slot() {
        let p1 = vec![0, 1, 2, 3];
        let p2 = vec![1, 1, 1, 1];
        let child = pmx_child(&p1, &p2, 0, 2);
        assert_eq!(child, vec![0, 1, 1, 1]);
        assert!(child.iter().all(|&g| g < 4));
    }

    // ---- Mutation ----

    #[test]
    fn test_swap_preserves_permutation() {
        let mut rng = create_rng(42);
        let mut perm = random_permutation(12, &mut rng);
        for _ in 0..100 {
            swap_mutation(&mut perm, 0.3, &mut rng);
            assert!(is_valid_permutation(&perm, 12));
        }
    }

    #[test]
    fn test_swap_zero_rate_is_noop() {
        let mut rng = create_rng(1);
        let mut perm = vec![2, 0, 3, 1];
        swap_mutation(&mut perm, 0.0, &mut rng);
        assert_eq!(perm, vec![2, 0, 3, 1]);
    }

    #[test]
    fn test_swap_single_element() {
        let mut rng = create_rng(42);
        let mut perm = vec![0];
        swap_mutation(&mut perm, 1.0, &mut rng);
        assert_eq!(perm, vec![0]);
    }

    #[test]
    fn test_reassign_stays_in_range() {
        let mut rng = create_rng(42);
        let mut genes = random_permutation(9, &mut rng);
        for _ in 0..50 {
            reassign_mutation(&mut genes, 0.5, &mut rng);
            assert!(genes.iter().all(|&g| g < 9));
        }
    }

    #[test]
    fn test_reassign_can_break_permutation() {
        let mut rng = create_rng(7);
        let mut genes: Vec<usize> = (0..6).collect();
        reassign_mutation(&mut genes, 1.0, &mut rng);
        let mut broke = !is_valid_permutation(&genes, 6);
        for _ in 0..20 {
            reassign_mutation(&mut genes, 1.0, &mut rng);
            broke |= !is_valid_permutation(&genes, 6);
        }
        assert!(broke);
    }

    proptest! {
        #[test]
        fn prop_pmx_child_is_permutation(
            seed in any::<u64>(),
            n in 1usize..=40,
            a in any::<usize>(),
            b in any::<usize>(),
        ) {
            let mut rng = create_rng(seed);
            let p1 = random_permutation(n, &mut rng);
            let p2 = random_permutation(n, &mut rng);
            let (x, y) = (a % (n + 1), b % (n + 1));
            let (start, end) = (x.min(y), x.max(y));
            let child = pmx_child(&p1, &p2, start, end);
            prop_assert!(is_valid_permutation(&child, n), "child {:?}", child);
        }
    }
}
