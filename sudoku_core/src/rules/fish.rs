//! X-wing and swordfish: an n x n grid of candidate positions for a value across n rows (or n
//! columns) confined to the same n columns (or rows) eliminates that value from the rest of
//! those columns (or rows).

use std::collections::HashSet;

use itertools::Itertools;

use crate::proof::{Premise, RuleTag};
use crate::state::{Contradiction, SlotOccupant, SudokuState};

fn fish(state: &mut SudokuState, v: u8, n: usize, rule: RuleTag) -> Result<bool, Contradiction> {
    let mut changed = false;

    let candidate_rows: Vec<usize> = (0..9)
        .filter(|&r| (2..=n).contains(&state.rowpos(r, v).len()))
        .collect();
    for combo in candidate_rows.iter().copied().combinations(n) {
        let mut cols: HashSet<usize> = HashSet::new();
        for &r in &combo {
            cols.extend(state.rowpos(r, v).unresolved_keys());
        }
        if cols.len() != n {
            continue;
        }
        let mut premises = Vec::new();
        for &r in &combo {
            premises.extend(state.rowpos(r, v).resolved().map(SlotOccupant::as_premise));
        }
        for &c in &cols {
            for r in 0..9 {
                if combo.contains(&r) || state.value_at(r, c) != 0 {
                    continue;
                }
                if state.allowed(r, c).get((v - 1) as usize).is_none() {
                    changed |= state.ban(r, c, v, rule, premises.clone(), Some(format!("rows {combo:?}")))?;
                }
            }
        }
    }

    let candidate_cols: Vec<usize> = (0..9)
        .filter(|&c| (2..=n).contains(&state.colpos(c, v).len()))
        .collect();
    for combo in candidate_cols.iter().copied().combinations(n) {
        let mut rows: HashSet<usize> = HashSet::new();
        for &c in &combo {
            rows.extend(state.colpos(c, v).unresolved_keys());
        }
        if rows.len() != n {
            continue;
        }
        let mut premises = Vec::new();
        for &c in &combo {
            premises.extend(state.colpos(c, v).resolved().map(SlotOccupant::as_premise));
        }
        for &r in &rows {
            for c in 0..9 {
                if combo.contains(&c) || state.value_at(r, c) != 0 {
                    continue;
                }
                if state.allowed(r, c).get((v - 1) as usize).is_none() {
                    changed |= state.ban(r, c, v, rule, premises.clone(), Some(format!("columns {combo:?}")))?;
                }
            }
        }
    }

    Ok(changed)
}

/// 2x2 fish.
pub fn x_wing(state: &mut SudokuState) -> Result<bool, Contradiction> {
    let mut changed = false;
    for v in 1..=9u8 {
        changed |= fish(state, v, 2, RuleTag::XWing)?;
    }
    Ok(changed)
}

/// 3x3 fish.
pub fn swordfish(state: &mut SudokuState) -> Result<bool, Contradiction> {
    let mut changed = false;
    for v in 1..=9u8 {
        changed |= fish(state, v, 3, RuleTag::Swordfish)?;
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::RuleTag as RT;

    #[test]
    fn x_wing_eliminates_outside_the_two_columns() {
        let mut state = SudokuState::empty();
        // confine value 3 in rows 0 and 1 to columns 0 and 4 only
        for &r in &[0usize, 1] {
            for c in 0..9 {
                if c != 0 && c != 4 {
                    state.ban(r, c, 3, RT::DeusEx, vec![], None).unwrap();
                }
            }
        }
        x_wing(&mut state).unwrap();
        assert!(state.allowed(5, 0).get(2).is_some());
        assert!(state.allowed(5, 4).get(2).is_some());
    }
}
