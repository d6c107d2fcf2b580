//! Individuals and their evaluation.
//!
//! An [`Individual`] is a plain column array (`genes[row] = column`). It is
//! only turned into a [`ConflictBoard`] at evaluation time, through a single
//! reusable scratch board owned by the [`Evaluator`].

use crate::board::ConflictBoard;
use std::mem::size_of;

/// A candidate placement in the GA population.
///
/// Genes need not be a permutation: duplicate columns are conflicts, not
/// invalid individuals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    pub genes: Vec<usize>,
    conflicts: usize,
}

impl Individual {
    /// Number of conflicting pairs in this placement.
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    /// `1 / (1 + conflicts)`: in (0, 1], and exactly 1 iff conflict-free.
    pub fn fitness(&self) -> f64 {
        1.0 / (1.0 + self.conflicts as f64)
    }

    pub fn is_solution(&self) -> bool {
        self.conflicts == 0
    }

    pub(crate) fn heap_bytes(&self) -> usize {
        self.genes.capacity() * size_of::<usize>()
    }
}

/// Scores gene arrays through one scratch [`ConflictBoard`].
#[derive(Debug, Clone)]
pub struct Evaluator {
    board: ConflictBoard,
}

impl Evaluator {
    pub fn new(n: usize) -> Self {
        Self {
            board: ConflictBoard::empty(n),
        }
    }

    /// Scores `genes` and wraps them as an [`Individual`].
    ///
    /// # Panics
    /// Panics if `genes` has the wrong length or an out-of-range column.
    pub fn evaluate(&mut self, genes: Vec<usize>) -> Individual {
        self.board.assign(&genes);
        Individual {
            conflicts: self.board.conflict_count(),
            genes,
        }
    }

    pub(crate) fn heap_bytes(&self) -> usize {
        self.board.heap_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::brute_force_conflicts;

    #[test]
    fn test_solution_has_unit_fitness() {
        let mut eval = Evaluator::new(4);
        let ind = eval.evaluate(vec![1, 3, 0, 2]);
        assert!(ind.is_solution());
        assert!((ind.fitness() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_fitness_decreases_with_conflicts() {
        let mut eval = Evaluator::new(4);
        let diagonal = eval.evaluate(vec![0, 1, 2, 3]);
        let column = eval.evaluate(vec![0, 0, 3, 1]);
        assert_eq!(diagonal.conflicts(), 6);
        assert!(diagonal.fitness() < column.fitness());
        assert!(diagonal.fitness() > 0.0);
    }

    #[test]
    fn test_duplicate_columns_count_as_conflicts() {
        let mut eval = Evaluator::new(5);
        let genes = vec![2, 2, 4, 0, 2];
        let expected = brute_force_conflicts(&genes);
        assert_eq!(eval.evaluate(genes).conflicts(), expected);
    }
}
