//! Naked and hidden pairs/triples. Both are expressed as one generic "n values/cells confined to
//! each other" search, which sidesteps the classic naked-triple "which shape of 2/3 candidates
//! across 3 cells counts" ambiguity: any n unfilled cells whose combined candidate set has
//! exactly n members qualifies, regardless of how those candidates are distributed among them.

use std::collections::HashSet;

use itertools::Itertools;

use super::{candidates, Unit};
use crate::proof::{Premise, RuleTag};
use crate::state::{Contradiction, SlotOccupant, SudokuState};

fn naked_subset(state: &mut SudokuState, unit: Unit, n: usize, rule: RuleTag) -> Result<bool, Contradiction> {
    let mut changed = false;
    let unfilled: Vec<(usize, usize)> = unit
        .cells()
        .into_iter()
        .filter(|&(r, c)| state.value_at(r, c) == 0)
        .collect();

    for combo in unfilled.iter().copied().combinations(n) {
        let mut union: HashSet<u8> = HashSet::new();
        for &(r, c) in &combo {
            union.extend(candidates(state, r, c));
        }
        if union.len() != n {
            continue;
        }

        let mut premises = Vec::new();
        for &(r, c) in &combo {
            premises.extend(state.allowed(r, c).resolved().map(SlotOccupant::as_premise));
        }

        for &(r, c) in &unfilled {
            if combo.contains(&(r, c)) {
                continue;
            }
            for &v in &union {
                if state.allowed(r, c).get((v - 1) as usize).is_none() {
                    changed |= state.ban(r, c, v, rule, premises.clone(), Some(unit.desc()))?;
                }
            }
        }
    }
    Ok(changed)
}

fn hidden_subset(state: &mut SudokuState, unit: Unit, n: usize, rule: RuleTag) -> Result<bool, Contradiction> {
    let mut changed = false;
    let values: Vec<u8> = (1..=9u8)
        .filter(|&v| {
            let len = unit.positions(state, v).len();
            (2..=n).contains(&len)
        })
        .collect();

    for combo in values.iter().copied().combinations(n) {
        let mut union_keys: HashSet<usize> = HashSet::new();
        for &v in &combo {
            union_keys.extend(unit.positions(state, v).unresolved_keys());
        }
        if union_keys.len() != n {
            continue;
        }

        let mut premises = Vec::new();
        for &v in &combo {
            premises.extend(unit.positions(state, v).resolved().map(SlotOccupant::as_premise));
        }

        for &key in &union_keys {
            let (r, c) = unit.cell_for_key(key);
            if state.value_at(r, c) != 0 {
                continue;
            }
            for v in 1..=9u8 {
                if combo.contains(&v) {
                    continue;
                }
                if state.allowed(r, c).get((v - 1) as usize).is_none() {
                    changed |= state.ban(r, c, v, rule, premises.clone(), Some(unit.desc()))?;
                }
            }
        }
    }
    Ok(changed)
}

/// Two unfilled cells in a unit whose combined candidates are exactly two values.
pub fn naked_pair(state: &mut SudokuState) -> Result<bool, Contradiction> {
    let mut changed = false;
    for unit in Unit::all() {
        changed |= naked_subset(state, unit, 2, RuleTag::NakedPair)?;
    }
    Ok(changed)
}

/// Three unfilled cells in a unit whose combined candidates are exactly three values.
pub fn naked_triple(state: &mut SudokuState) -> Result<bool, Contradiction> {
    let mut changed = false;
    for unit in Unit::all() {
        changed |= naked_subset(state, unit, 3, RuleTag::NakedTriple)?;
    }
    Ok(changed)
}

/// Two values in a unit whose combined remaining positions are exactly two cells.
pub fn hidden_pair(state: &mut SudokuState) -> Result<bool, Contradiction> {
    let mut changed = false;
    for unit in Unit::all() {
        changed |= hidden_subset(state, unit, 2, RuleTag::HiddenPair)?;
    }
    Ok(changed)
}

/// Three values in a unit whose combined remaining positions are exactly three cells.
pub fn hidden_triple(state: &mut SudokuState) -> Result<bool, Contradiction> {
    let mut changed = false;
    for unit in Unit::all() {
        changed |= hidden_subset(state, unit, 3, RuleTag::HiddenTriple)?;
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::RuleTag as RT;

    #[test]
    fn naked_pair_eliminates_from_rest_of_row() {
        let mut state = SudokuState::empty();
        // confine row 0 columns 0 and 1 to {1, 2} by banning every other value there
        for &c in &[0usize, 1] {
            for v in 3..=9u8 {
                state.ban(0, c, v, RT::DeusEx, vec![], None).unwrap();
            }
        }
        naked_pair(&mut state).unwrap();
        assert!(state.allowed(0, 2).get(0).is_some()); // value 1 banned at (0,2)
        assert!(state.allowed(0, 2).get(1).is_some()); // value 2 banned at (0,2)
    }

    #[test]
    fn hidden_pair_eliminates_other_candidates_from_the_pair_cells() {
        let mut state = SudokuState::empty();
        // confine values 1 and 2 in row 0 to columns 0 and 1 only
        for v in [1u8, 2] {
            for c in 2..9 {
                state.ban(0, c, v, RT::DeusEx, vec![], None).unwrap();
            }
        }
        hidden_pair(&mut state).unwrap();
        // at (0,0) and (0,1), every value other than 1/2 should now be banned
        for v in 3..=9u8 {
            assert!(state.allowed(0, 0).get((v - 1) as usize).is_some());
        }
    }
}
