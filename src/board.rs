//! Incrementally maintained N-Queens board.
//!
//! [`ConflictBoard`] stores at most one queen per row plus three occupancy
//! counters (columns, rising diagonals, falling diagonals). Every mutation
//! goes through [`place`](ConflictBoard::place) or
//! [`remove`](ConflictBoard::remove), which update the placement array and
//! the counters together, so safety queries and single-move evaluation are
//! O(1).
//!
//! # Conflict definition
//!
//! A conflict is a pair of queens sharing a column or either diagonal. Each
//! pair is counted once.

use crate::error::{Result, SolveError};
use rand::Rng;

const EMPTY: usize = usize::MAX;

/// N×N board with one queen per row (or none, for partial boards).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictBoard {
    n: usize,
    column_of: Vec<usize>,
    col_count: Vec<usize>,
    /// Indexed by `row - col + n - 1`.
    diag1_count: Vec<usize>,
    /// Indexed by `row + col`.
    diag2_count: Vec<usize>,
    placed: usize,
}

impl ConflictBoard {
    /// Creates an `n`×`n` board with no queens.
    pub fn empty(n: usize) -> Self {
        let diagonals = (2 * n).saturating_sub(1);
        Self {
            n,
            column_of: vec![EMPTY; n],
            col_count: vec![0; n],
            diag1_count: vec![0; diagonals],
            diag2_count: vec![0; diagonals],
            placed: 0,
        }
    }

    /// Creates a complete board with each row's queen in a uniformly random
    /// column. Columns may repeat.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut board = Self::empty(n);
        for row in 0..n {
            let col = rng.random_range(0..n);
            board.place(row, col);
        }
        board
    }

    /// Creates a complete board from a caller-supplied placement, where
    /// `columns[row]` is the queen's column in `row`.
    pub fn from_columns(columns: &[usize]) -> Result<Self> {
        let n = columns.len();
        if let Some(&bad) = columns.iter().find(|&&c| c >= n) {
            return Err(SolveError::InvalidConfig(format!(
                "column {bad} out of range for n = {n}"
            )));
        }
        let mut board = Self::empty(n);
        board.assign(columns);
        Ok(board)
    }

    /// Reloads this board from `columns`, reusing its allocations.
    ///
    /// # Panics
    /// Panics if `columns.len() != n` or any column is out of range.
    pub fn assign(&mut self, columns: &[usize]) {
        assert_eq!(columns.len(), self.n, "placement length must equal n");
        self.column_of.fill(EMPTY);
        self.col_count.fill(0);
        self.diag1_count.fill(0);
        self.diag2_count.fill(0);
        self.placed = 0;
        for (row, &col) in columns.iter().enumerate() {
            self.place(row, col);
        }
    }

    /// Board dimension.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of rows currently holding a queen.
    pub fn placed(&self) -> usize {
        self.placed
    }

    /// Number of rows without a queen.
    pub fn unplaced(&self) -> usize {
        self.n - self.placed
    }

    /// Whether every row holds a queen.
    pub fn is_complete(&self) -> bool {
        self.placed == self.n
    }

    /// Column of the queen in `row`, if any.
    pub fn column(&self, row: usize) -> Option<usize> {
        match self.column_of[row] {
            EMPTY => None,
            col => Some(col),
        }
    }

    /// Copy of the placement array, or `None` while any row is empty.
    pub fn columns(&self) -> Option<Vec<usize>> {
        self.is_complete().then(|| self.column_of.clone())
    }

    #[inline]
    fn diag1(&self, row: usize, col: usize) -> usize {
        row + self.n - 1 - col
    }

    #[inline]
    fn diag2(row: usize, col: usize) -> usize {
        row + col
    }

    /// Moves the queen of `row` to `col`, removing any previous occupant.
    ///
    /// # Panics
    /// Panics if `row` or `col` is out of range.
    pub fn place(&mut self, row: usize, col: usize) {
        assert!(col < self.n, "column {col} out of range for n = {}", self.n);
        self.remove(row);
        let d1 = self.diag1(row, col);
        let d2 = Self::diag2(row, col);
        self.column_of[row] = col;
        self.col_count[col] += 1;
        self.diag1_count[d1] += 1;
        self.diag2_count[d2] += 1;
        self.placed += 1;
    }

    /// Removes the queen in `row`, returning its column.
    pub fn remove(&mut self, row: usize) -> Option<usize> {
        let col = self.column(row)?;
        let d1 = self.diag1(row, col);
        let d2 = Self::diag2(row, col);
        self.column_of[row] = EMPTY;
        self.col_count[col] -= 1;
        self.diag1_count[d1] -= 1;
        self.diag2_count[d2] -= 1;
        self.placed -= 1;
        Some(col)
    }

    /// True iff no queen currently attacks `(row, col)`.
    ///
    /// A queen already standing in `row` is counted, so callers clear the
    /// row first when asking about a replacement.
    #[inline]
    pub fn is_safe(&self, row: usize, col: usize) -> bool {
        self.col_count[col] == 0
            && self.diag1_count[self.diag1(row, col)] == 0
            && self.diag2_count[Self::diag2(row, col)] == 0
    }

    /// Number of conflicting pairs among the placed queens. O(n).
    pub fn conflict_count(&self) -> usize {
        let twice: usize = self
            .column_of
            .iter()
            .enumerate()
            .filter(|&(_, &col)| col != EMPTY)
            .map(|(row, &col)| {
                self.col_count[col] - 1
                    + self.diag1_count[self.diag1(row, col)]
                    - 1
                    + self.diag2_count[Self::diag2(row, col)]
                    - 1
            })
            .sum();
        twice / 2
    }

    /// Change in [`conflict_count`](Self::conflict_count) if the queen of
    /// `row` were moved to `col`. The board is not modified. O(1).
    pub fn move_delta(&self, row: usize, col: usize) -> isize {
        let current = self.column_of[row];
        if current == col {
            return 0;
        }
        // With `col != current`, none of the target lines contain the moving queen.
        let gained = self.col_count[col]
            + self.diag1_count[self.diag1(row, col)]
            + self.diag2_count[Self::diag2(row, col)];
        let lost = if current == EMPTY {
            0
        } else {
            self.col_count[current] - 1 + self.diag1_count[self.diag1(row, current)] - 1
                + self.diag2_count[Self::diag2(row, current)]
                - 1
        };
        gained as isize - lost as isize
    }

    /// Recomputes every counter from the placement array and reports any
    /// drift as an [`SolveError::InternalFault`].
    pub fn verify(&self) -> Result<()> {
        let mut expected = Self::empty(self.n);
        for (row, col) in (0..self.n).filter_map(|r| self.column(r).map(|c| (r, c))) {
            expected.place(row, col);
        }
        if expected != *self {
            return Err(SolveError::InternalFault(format!(
                "conflict counters out of sync with placement (n = {})",
                self.n
            )));
        }
        Ok(())
    }

    /// Approximate heap footprint in bytes.
    pub fn heap_bytes(&self) -> usize {
        (self.column_of.capacity()
            + self.col_count.capacity()
            + self.diag1_count.capacity()
            + self.diag2_count.capacity())
            * std::mem::size_of::<usize>()
    }
}

/// All-pairs conflict count of a complete placement. O(n²).
pub fn brute_force_conflicts(columns: &[usize]) -> usize {
    let mut conflicts = 0;
    for i in 0..columns.len() {
        for j in (i + 1)..columns.len() {
            if columns[i] == columns[j] || columns[i].abs_diff(columns[j]) == j - i {
                conflicts += 1;
            }
        }
    }
    conflicts
}
