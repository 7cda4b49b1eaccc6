//! Error type for `sudoku_core`'s public entry points.

use std::fmt;

/// Everything that can go wrong calling into a [`crate::state::SudokuState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SudokuCoreError {
    /// A coordinate fell outside the 9x9 board.
    OutOfBounds {
        /// 0-indexed row.
        row: usize,
        /// 0-indexed column.
        col: usize,
    },
    /// A value wasn't in `1..=9`.
    BadValue {
        /// 0-indexed row.
        row: usize,
        /// 0-indexed column.
        col: usize,
        /// The rejected value.
        value: u8,
    },
    /// The target cell already holds a value.
    AlreadyFilled {
        /// 0-indexed row.
        row: usize,
        /// 0-indexed column.
        col: usize,
    },
    /// The assignment contradicts an existing elimination, or an elimination emptied a unit's
    /// last remaining candidate.
    Contradiction,
}

impl fmt::Display for SudokuCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SudokuCoreError::OutOfBounds { row, col } => {
                write!(f, "({row}, {col}) is outside the 9x9 board")
            }
            SudokuCoreError::BadValue { row, col, value } => {
                write!(f, "({row}, {col}): {value} is not a digit in 1..=9")
            }
            SudokuCoreError::AlreadyFilled { row, col } => {
                write!(f, "({row}, {col}) is already filled")
            }
            SudokuCoreError::Contradiction => write!(f, "assignment contradicts an existing elimination"),
        }
    }
}

impl std::error::Error for SudokuCoreError {}
