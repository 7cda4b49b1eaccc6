//! Sole candidate (one cell, one remaining value) and sole position (one unit, one remaining
//! cell for a value).

use super::Unit;
use crate::proof::{Premise, RuleTag};
use crate::state::{Contradiction, SlotOccupant, SudokuState};

/// Every unfilled cell with exactly one remaining candidate must take it.
pub fn sole_candidate(state: &mut SudokuState) -> Result<bool, Contradiction> {
    let mut changed = false;
    for r in 0..9 {
        for c in 0..9 {
            if state.value_at(r, c) != 0 {
                continue;
            }
            if state.allowed(r, c).len() == 1 {
                let v = (state.allowed(r, c).sole() + 1) as u8;
                let premises: Vec<Premise> = state.allowed(r, c).resolved().map(SlotOccupant::as_premise).collect();
                changed |= state.must_be(r, c, v, RuleTag::SoleCandidate, premises, None)?;
            }
        }
    }
    Ok(changed)
}

/// Every unit with exactly one remaining position for some value forces that cell.
pub fn sole_position(state: &mut SudokuState) -> Result<bool, Contradiction> {
    let mut changed = false;
    for unit in Unit::all() {
        for v in 1..=9u8 {
            let map = unit.positions(state, v);
            if map.len() != 1 {
                continue;
            }
            let (r, c) = unit.cell_for_key(map.sole());
            if state.value_at(r, c) != 0 {
                continue;
            }
            let premises: Vec<Premise> = map.resolved().map(SlotOccupant::as_premise).collect();
            changed |= state.must_be(r, c, v, RuleTag::SolePosition, premises, Some(unit.desc()))?;
        }
    }
    Ok(changed)
}
