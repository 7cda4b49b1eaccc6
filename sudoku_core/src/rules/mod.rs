//! The deduction rule library: each rule sweeps the board (or a family of units) looking for one
//! pattern, and records whatever `CantBe`/`MustBe` facts it finds via [`SudokuState::ban`] /
//! [`SudokuState::must_be`].
//!
//! Grounded on `original_source/deduction_rules.py`'s rule set; `itertools::combinations` drives
//! the subset/fish searches the same way `sudoku_engine::board::naked_tuple_helper` does.

mod fish;
mod intersections;
mod singles;
mod subsets;
mod wings;

use crate::coords::{self, section};
use crate::state::{Contradiction, SlotOccupant, SudokuState};

/// One of the 27 units (9 rows, 9 columns, 9 sections) a rule can scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unit {
    Row(usize),
    Col(usize),
    Sec(usize),
}

impl Unit {
    pub(crate) fn all() -> impl Iterator<Item = Unit> {
        (0..9)
            .map(Unit::Row)
            .chain((0..9).map(Unit::Col))
            .chain((0..9).map(Unit::Sec))
    }

    pub(crate) fn cells(self) -> [(usize, usize); 9] {
        match self {
            Unit::Row(r) => coords::row_cells(r),
            Unit::Col(c) => coords::col_cells(c),
            Unit::Sec(s) => coords::section_cells(s),
        }
    }

    pub(crate) fn positions<'a>(self, state: &'a SudokuState, v: u8) -> &'a crate::slotmap::SlotMap<SlotOccupant> {
        match self {
            Unit::Row(r) => state.rowpos(r, v),
            Unit::Col(c) => state.colpos(c, v),
            Unit::Sec(s) => state.secpos(s, v),
        }
    }

    pub(crate) fn cell_for_key(self, key: usize) -> (usize, usize) {
        match self {
            Unit::Row(r) => (r, key),
            Unit::Col(c) => (key, c),
            Unit::Sec(s) => coords::to_global(s, key / 3, key % 3),
        }
    }

    pub(crate) fn desc(self) -> String {
        match self {
            Unit::Row(r) => format!("row {r}"),
            Unit::Col(c) => format!("column {c}"),
            Unit::Sec(s) => format!("section {s}"),
        }
    }
}

/// The remaining candidate digits for an unfilled cell.
pub(crate) fn candidates(state: &SudokuState, r: usize, c: usize) -> Vec<u8> {
    state.allowed(r, c).unresolved_keys().map(|k| (k + 1) as u8).collect()
}

/// Whether two distinct cells share a row, column, or section.
pub(crate) fn sees(a: (usize, usize), b: (usize, usize)) -> bool {
    a != b && (a.0 == b.0 || a.1 == b.1 || section(a.0, a.1) == section(b.0, b.1))
}

/// Signature every rule function shares, so the solver can hold them in a fixed-order list.
pub type RuleFn = fn(&mut SudokuState) -> Result<bool, Contradiction>;

/// Every rule, in the fixed application order the solver sweeps in.
pub const RULES: &[RuleFn] = &[
    singles::sole_candidate,
    singles::sole_position,
    subsets::naked_pair,
    subsets::naked_triple,
    subsets::hidden_pair,
    subsets::hidden_triple,
    intersections::square_line,
    intersections::line_square,
    fish::x_wing,
    wings::y_wing,
    fish::swordfish,
];
