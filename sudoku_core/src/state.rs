//! The live sudoku state: the board, the four candidate views, the proof graph, and the
//! filler set of still-unplaced forced values.

use std::collections::HashMap;

use crate::config::Config;
use crate::coords::section;
use crate::error::SudokuCoreError;
use crate::knowledge::{CoordView, Kind, Knowledge};
use crate::proof::{Consequence, DeductionId, Premise, ProofGraph, RuleTag};
use crate::slotmap::SlotMap;

/// What resolved a candidate slot: either a ground fact (a fill) or a still-growing deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOccupant {
    /// The slot was resolved by a board fill.
    Fact(Knowledge),
    /// The slot was resolved by (possibly several alternative routes to) this deduction.
    Deduction(DeductionId),
}

impl SlotOccupant {
    /// This occupant, as a premise citable by a later deduction.
    #[must_use]
    pub fn as_premise(self) -> Premise {
        match self {
            SlotOccupant::Fact(k) => Premise::Fact(k),
            SlotOccupant::Deduction(id) => Premise::Ded(id),
        }
    }
}

/// Raised when an assignment or elimination is inconsistent with what's already known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contradiction {
    /// The fact whose derivation ran into the inconsistency.
    pub at: Knowledge,
}

/// The full live state of one puzzle: the board, the four parallel candidate views, the proof
/// graph recording why each elimination holds, and the set of cells with a forced-but-unwritten
/// value (the filler set).
#[derive(Debug)]
pub struct SudokuState {
    board: Vec<Vec<u8>>,
    allowed: Vec<Vec<SlotMap<SlotOccupant>>>,
    rowpos: Vec<Vec<SlotMap<SlotOccupant>>>,
    colpos: Vec<Vec<SlotMap<SlotOccupant>>>,
    secpos: Vec<Vec<SlotMap<SlotOccupant>>>,
    graph: ProofGraph,
    filler: HashMap<(usize, usize), DeductionId>,
    config: Config,
}

impl SudokuState {
    /// A blank 9x9 state with no clues, default configuration.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            board: vec![vec![0u8; 9]; 9],
            allowed: vec![vec![SlotMap::new(); 9]; 9],
            rowpos: vec![vec![SlotMap::new(); 9]; 9],
            colpos: vec![vec![SlotMap::new(); 9]; 9],
            secpos: vec![vec![SlotMap::new(); 9]; 9],
            graph: ProofGraph::new(),
            filler: HashMap::new(),
            config: Config::default(),
        }
    }

    /// A state initialized from a clue set.
    ///
    /// # Errors
    /// Propagates the first [`SudokuCoreError`] raised assigning any clue.
    pub fn new(clues: &[(usize, usize, u8)]) -> Result<Self, SudokuCoreError> {
        let mut state = Self::empty();
        for &(r, c, v) in clues {
            state.assign(r, c, v)?;
        }
        Ok(state)
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the active configuration (the shell's `var` command writes through this).
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// The proof graph accumulated so far.
    #[must_use]
    pub fn graph(&self) -> &ProofGraph {
        &self.graph
    }

    /// The cells with a forced value not yet written to the board, each paired with the
    /// deduction that forces it.
    #[must_use]
    pub fn filler(&self) -> &HashMap<(usize, usize), DeductionId> {
        &self.filler
    }

    /// The value at `(r, c)`, or `0` if empty.
    #[must_use]
    pub fn value_at(&self, r: usize, c: usize) -> u8 {
        self.board[r][c]
    }

    /// Whether every cell is filled.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.board.iter().all(|row| row.iter().all(|&v| v != 0))
    }

    /// The `allowed[r][c]` candidate view.
    #[must_use]
    pub fn allowed(&self, r: usize, c: usize) -> &SlotMap<SlotOccupant> {
        &self.allowed[r][c]
    }

    /// The `rowpos[r][v]` candidate view (`v` is `1..=9`).
    #[must_use]
    pub fn rowpos(&self, r: usize, v: u8) -> &SlotMap<SlotOccupant> {
        &self.rowpos[r][(v - 1) as usize]
    }

    /// The `colpos[c][v]` candidate view (`v` is `1..=9`).
    #[must_use]
    pub fn colpos(&self, c: usize, v: u8) -> &SlotMap<SlotOccupant> {
        &self.colpos[c][(v - 1) as usize]
    }

    /// The `secpos[s][v]` candidate view (`v` is `1..=9`).
    #[must_use]
    pub fn secpos(&self, s: usize, v: u8) -> &SlotMap<SlotOccupant> {
        &self.secpos[s][(v - 1) as usize]
    }

    /// Validated clue/forced-fill entry point: checks bounds, value range, that the cell is
    /// empty, and that `v` hasn't already been eliminated there, before writing.
    ///
    /// # Errors
    /// Returns the specific [`SudokuCoreError`] variant describing which precondition failed.
    pub fn assign(&mut self, r: usize, c: usize, v: u8) -> Result<(), SudokuCoreError> {
        if r >= 9 || c >= 9 {
            return Err(SudokuCoreError::OutOfBounds { row: r, col: c });
        }
        if !(1..=9).contains(&v) {
            return Err(SudokuCoreError::BadValue { row: r, col: c, value: v });
        }
        if self.board[r][c] != 0 {
            return Err(SudokuCoreError::AlreadyFilled { row: r, col: c });
        }
        if self.allowed[r][c].get((v - 1) as usize).is_some() {
            return Err(SudokuCoreError::Contradiction);
        }
        self.set_cell(r, c, v);
        Ok(())
    }

    /// Writes `v` at `(r, c)` and stamps an `IsValue` fact into every candidate slot this fill
    /// resolves: all other values at this cell, and this value at every other cell sharing the
    /// row, column, or section.
    ///
    /// Callers must have already checked that `(r, c)` is empty and `v` is still allowed there.
    fn set_cell(&mut self, r: usize, c: usize, v: u8) {
        let value_idx = (v - 1) as usize;
        let sec = section(r, c);
        let (li, lj) = crate::coords::local(r, c);
        let local_idx = li * 3 + lj;

        self.board[r][c] = v;
        let fact = Knowledge { kind: Kind::IsValue, view: CoordView::Allowed, position: (r as u8, c as u8), value: v };

        for val_idx in 0..9 {
            if self.allowed[r][c].get(val_idx).is_none() {
                self.allowed[r][c].set(val_idx, SlotOccupant::Fact(fact));
            }
        }
        for col in 0..9 {
            if self.rowpos[r][value_idx].get(col).is_none() {
                self.rowpos[r][value_idx].set(col, SlotOccupant::Fact(fact));
            }
        }
        for row in 0..9 {
            if self.colpos[c][value_idx].get(row).is_none() {
                self.colpos[c][value_idx].set(row, SlotOccupant::Fact(fact));
            }
        }
        for idx in 0..9 {
            if self.secpos[sec][value_idx].get(idx).is_none() {
                self.secpos[sec][value_idx].set(idx, SlotOccupant::Fact(fact));
            }
        }

        self.filler.remove(&(r, c));
    }

    fn slot_get(&self, view: CoordView, r: usize, c: usize, v: u8) -> Option<SlotOccupant> {
        let value_idx = (v - 1) as usize;
        match view {
            CoordView::Allowed => self.allowed[r][c].get(value_idx),
            CoordView::RowPos => self.rowpos[r][value_idx].get(c),
            CoordView::ColPos => self.colpos[c][value_idx].get(r),
            CoordView::SecPos => {
                let sec = section(r, c);
                let (li, lj) = crate::coords::local(r, c);
                self.secpos[sec][value_idx].get(li * 3 + lj)
            }
        }
    }

    /// Writes `occupant` into the named slot and returns the view's remaining-unresolved count
    /// after the write.
    fn slot_set(&mut self, view: CoordView, r: usize, c: usize, v: u8, occupant: SlotOccupant) -> usize {
        let value_idx = (v - 1) as usize;
        match view {
            CoordView::Allowed => {
                self.allowed[r][c].set(value_idx, occupant);
                self.allowed[r][c].len()
            }
            CoordView::RowPos => {
                self.rowpos[r][value_idx].set(c, occupant);
                self.rowpos[r][value_idx].len()
            }
            CoordView::ColPos => {
                self.colpos[c][value_idx].set(r, occupant);
                self.colpos[c][value_idx].len()
            }
            CoordView::SecPos => {
                let sec = section(r, c);
                let (li, lj) = crate::coords::local(r, c);
                self.secpos[sec][value_idx].set(li * 3 + lj, occupant);
                self.secpos[sec][value_idx].len()
            }
        }
    }

    /// Records a `CantBe` across all four mirror views for `(r, c, v)`, citing `premises` under
    /// `rule`. Returns `true` if any of the four views was newly resolved by this call.
    ///
    /// # Errors
    /// Returns [`Contradiction`] if any view's candidate count for the targeted unit reaches
    /// zero.
    pub fn ban(
        &mut self,
        r: usize,
        c: usize,
        v: u8,
        rule: RuleTag,
        premises: Vec<Premise>,
        details: Option<String>,
    ) -> Result<bool, Contradiction> {
        let pos = (r as u8, c as u8);
        let mut changed = false;
        changed |= self.make_deduction(
            Knowledge { kind: Kind::CantBe, view: CoordView::Allowed, position: pos, value: v },
            rule,
            premises.clone(),
            details.clone(),
        )?;
        changed |= self.make_deduction(
            Knowledge { kind: Kind::CantBe, view: CoordView::RowPos, position: pos, value: v },
            rule,
            premises.clone(),
            details.clone(),
        )?;
        changed |= self.make_deduction(
            Knowledge { kind: Kind::CantBe, view: CoordView::ColPos, position: pos, value: v },
            rule,
            premises.clone(),
            details.clone(),
        )?;
        changed |= self.make_deduction(
            Knowledge { kind: Kind::CantBe, view: CoordView::SecPos, position: pos, value: v },
            rule,
            premises,
            details,
        )?;
        Ok(changed)
    }

    /// Forces `(r, c)` to `v` without writing it to the board yet, citing `premises` under
    /// `rule`. Repeated calls for the same cell and value merely add alternative consequences;
    /// forcing two different values at the same cell is a contradiction.
    ///
    /// # Errors
    /// Returns [`Contradiction`] if the cell already has a different forced value.
    pub fn must_be(
        &mut self,
        r: usize,
        c: usize,
        v: u8,
        rule: RuleTag,
        premises: Vec<Premise>,
        details: Option<String>,
    ) -> Result<bool, Contradiction> {
        let knowledge = Knowledge { kind: Kind::MustBe, view: CoordView::Allowed, position: (r as u8, c as u8), value: v };
        self.make_deduction(knowledge, rule, premises, details)
    }

    /// The single entry point for recording a non-ground fact: dispatches on `knowledge.kind`,
    /// consulting (and updating) the filler set for `MustBe` and the relevant candidate slot for
    /// `CantBe`.
    fn make_deduction(
        &mut self,
        knowledge: Knowledge,
        rule: RuleTag,
        premises: Vec<Premise>,
        details: Option<String>,
    ) -> Result<bool, Contradiction> {
        let (r, c) = (knowledge.position.0 as usize, knowledge.position.1 as usize);
        let is_filled = self.board[r][c] != 0;

        match knowledge.kind {
            Kind::IsValue => unreachable!("rules never conclude IsValue directly; set_cell does"),
            Kind::MustBe => {
                if is_filled {
                    return Ok(false);
                }
                let cons = Consequence { rule, premises, details };
                if let Some(&id) = self.filler.get(&(r, c)) {
                    if self.graph.get(id).conclusion != knowledge {
                        return Err(Contradiction { at: knowledge });
                    }
                    Ok(self.graph.add_consequence(id, cons))
                } else {
                    let id = self.graph.create(knowledge);
                    self.graph.add_consequence(id, cons);
                    self.filler.insert((r, c), id);
                    Ok(true)
                }
            }
            Kind::CantBe => {
                if is_filled {
                    if self.config.ignore_filled {
                        let fact = Knowledge {
                            kind: Kind::IsValue,
                            view: CoordView::Allowed,
                            position: knowledge.position,
                            value: self.board[r][c],
                        };
                        let mut full_premises = premises;
                        full_premises.push(Premise::Fact(fact));
                        let id = self.graph.create(knowledge);
                        self.graph.add_consequence(id, Consequence { rule, premises: full_premises, details });
                    }
                    return Ok(false);
                }

                let cons = Consequence { rule, premises, details };
                match self.slot_get(knowledge.view, r, c, knowledge.value) {
                    Some(SlotOccupant::Deduction(id)) => Ok(self.graph.add_consequence(id, cons)),
                    Some(SlotOccupant::Fact(_)) => {
                        unreachable!("an unfilled cell cannot have a fact-resolved candidate slot")
                    }
                    None => {
                        let id = self.graph.create(knowledge);
                        self.graph.add_consequence(id, cons);
                        let remaining = self.slot_set(knowledge.view, r, c, knowledge.value, SlotOccupant::Deduction(id));
                        if remaining == 0 {
                            return Err(Contradiction { at: knowledge });
                        }
                        Ok(true)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_resolves_all_four_views() {
        let mut state = SudokuState::empty();
        state.assign(0, 0, 5).unwrap();
        assert_eq!(state.value_at(0, 0), 5);
        assert!(state.allowed(0, 0).is_empty());
        assert!(state.rowpos(0, 5).is_empty());
        assert!(state.colpos(0, 5).is_empty());
        assert!(state.secpos(0, 5).is_empty());
        // a different cell in the same row/col/section lost candidate 5
        assert_eq!(state.allowed(0, 1).get(4), Some(SlotOccupant::Fact(Knowledge {
            kind: Kind::IsValue, view: CoordView::Allowed, position: (0, 0), value: 5,
        })));
    }

    #[test]
    fn assign_rejects_out_of_bounds() {
        let mut state = SudokuState::empty();
        assert_eq!(state.assign(9, 0, 1), Err(SudokuCoreError::OutOfBounds { row: 9, col: 0 }));
    }

    #[test]
    fn assign_rejects_already_filled() {
        let mut state = SudokuState::empty();
        state.assign(0, 0, 1).unwrap();
        assert_eq!(state.assign(0, 0, 2), Err(SudokuCoreError::AlreadyFilled { row: 0, col: 0 }));
    }

    #[test]
    fn assign_rejects_eliminated_value() {
        let mut state = SudokuState::empty();
        state.ban(0, 1, 7, RuleTag::DeusEx, vec![], None).unwrap();
        assert_eq!(state.assign(0, 1, 7), Err(SudokuCoreError::Contradiction));
    }

    #[test]
    fn ban_is_idempotent_for_repeated_identical_consequence() {
        let mut state = SudokuState::empty();
        let changed_first = state.ban(0, 0, 1, RuleTag::DeusEx, vec![], None).unwrap();
        let changed_second = state.ban(0, 0, 1, RuleTag::DeusEx, vec![], None).unwrap();
        assert!(changed_first);
        assert!(!changed_second);
    }

    #[test]
    fn ban_on_filled_cell_is_discarded_by_default() {
        let mut state = SudokuState::empty();
        state.assign(0, 0, 1).unwrap();
        let graph_len_before = state.graph().len();
        let changed = state.ban(0, 0, 2, RuleTag::DeusEx, vec![], None).unwrap();
        assert!(!changed);
        assert_eq!(state.graph().len(), graph_len_before);
    }

    #[test]
    fn ban_on_filled_cell_is_recorded_when_ignore_filled_is_set() {
        let mut state = SudokuState::empty();
        state.config_mut().ignore_filled = true;
        state.assign(0, 0, 1).unwrap();
        let graph_len_before = state.graph().len();
        state.ban(0, 0, 2, RuleTag::DeusEx, vec![], None).unwrap();
        assert!(state.graph().len() > graph_len_before);
    }

    #[test]
    fn must_be_populates_filler_set() {
        let mut state = SudokuState::empty();
        state.must_be(2, 2, 9, RuleTag::SoleCandidate, vec![], None).unwrap();
        assert_eq!(state.filler().len(), 1);
        assert!(state.filler().contains_key(&(2, 2)));
    }

    #[test]
    fn must_be_with_conflicting_value_is_a_contradiction() {
        let mut state = SudokuState::empty();
        state.must_be(2, 2, 9, RuleTag::SoleCandidate, vec![], None).unwrap();
        assert!(state.must_be(2, 2, 8, RuleTag::SoleCandidate, vec![], None).is_err());
    }

    #[test]
    fn ban_emptying_a_unit_is_a_contradiction() {
        let mut state = SudokuState::empty();
        for v in 1..=9u8 {
            let result = state.ban(4, 4, v, RuleTag::DeusEx, vec![], None);
            if v < 9 {
                assert!(result.is_ok());
            } else {
                assert!(result.is_err());
            }
        }
    }
}
