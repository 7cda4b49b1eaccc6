//! Plain-text rendering of a board and its candidate matrix.
//!
//! Grounded on the teacher's own `impl Display for Board` (`write!(f, "{self:?}")`): a renderer
//! has no layout crate to reach for here, just a little more per-cell formatting than the
//! teacher needed.

use std::fmt;

use sudoku_core::state::SudokuState;

/// The filled/partial board as a 9x9 grid with 3x3 box separators, `.` for empty cells.
pub struct BoardView<'a>(pub &'a SudokuState);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..9 {
            if r > 0 && r % 3 == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for c in 0..9 {
                if c > 0 && c % 3 == 0 {
                    write!(f, "| ")?;
                }
                match self.0.value_at(r, c) {
                    0 => write!(f, ". ")?,
                    v => write!(f, "{v} ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The per-cell candidate sets: a solved cell shows `.`, an unsolved one shows its remaining
/// digits packed together (e.g. `147`).
pub struct CandidateMatrix<'a>(pub &'a SudokuState);

impl fmt::Display for CandidateMatrix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..9 {
            for c in 0..9 {
                if self.0.value_at(r, c) != 0 {
                    write!(f, "{:<10}", ".")?;
                    continue;
                }
                let digits: String = self
                    .0
                    .allowed(r, c)
                    .unresolved_keys()
                    .filter_map(|k| std::char::from_digit((k + 1) as u32, 10))
                    .collect();
                write!(f, "{digits:<10}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_view_shows_dots_for_an_empty_board() {
        let state = SudokuState::empty();
        let text = BoardView(&state).to_string();
        assert!(text.lines().next().unwrap().starts_with(". . . | . . . | . . ."));
    }

    #[test]
    fn board_view_shows_a_filled_cell() {
        let mut state = SudokuState::empty();
        state.assign(0, 0, 5).unwrap();
        let text = BoardView(&state).to_string();
        assert!(text.lines().next().unwrap().starts_with("5 . . | . . . | . . ."));
    }

    #[test]
    fn candidate_matrix_lists_all_nine_digits_for_an_untouched_cell() {
        let state = SudokuState::empty();
        let text = CandidateMatrix(&state).to_string();
        assert!(text.lines().next().unwrap().starts_with("123456789"));
    }

    #[test]
    fn candidate_matrix_shows_a_dot_for_a_solved_cell() {
        let mut state = SudokuState::empty();
        state.assign(0, 0, 5).unwrap();
        let text = CandidateMatrix(&state).to_string();
        assert!(text.lines().next().unwrap().starts_with('.'));
    }
}
