//! Y-wing: a bi-value pivot cell {a, b} paired with two bi-value wing cells {a, c} and {b, c},
//! each sharing a unit with the pivot. Any cell seeing both wings cannot be `c`.
//!
//! The three textbook geometries (wings sharing row+col, row+section, or col+section with the
//! pivot) all fall out of the single `sees` predicate below, which treats "shares a row, column,
//! or section" as one OR'd condition rather than three separately-tracked branches — so a result
//! from one geometry can never be silently discarded by another.

use super::{candidates, sees};
use crate::proof::RuleTag;
use crate::state::{Contradiction, SlotOccupant, SudokuState};

/// Sweeps every bi-value cell as a candidate pivot.
pub fn y_wing(state: &mut SudokuState) -> Result<bool, Contradiction> {
    let mut changed = false;

    let bivalue: Vec<(usize, usize)> = (0..9)
        .flat_map(|r| (0..9).map(move |c| (r, c)))
        .filter(|&(r, c)| state.value_at(r, c) == 0 && state.allowed(r, c).len() == 2)
        .collect();

    for &pivot in &bivalue {
        let pivot_cands = candidates(state, pivot.0, pivot.1);
        let (a, b) = (pivot_cands[0], pivot_cands[1]);

        let wings: Vec<(usize, usize)> = bivalue
            .iter()
            .copied()
            .filter(|&w| w != pivot && sees(pivot, w))
            .collect();

        for &x in &wings {
            for &y in &wings {
                if x == y {
                    continue;
                }
                let xc = candidates(state, x.0, x.1);
                let yc = candidates(state, y.0, y.1);
                if !(xc.contains(&a) && !xc.contains(&b)) {
                    continue;
                }
                if !(yc.contains(&b) && !yc.contains(&a)) {
                    continue;
                }
                let common: Vec<u8> = xc.iter().copied().filter(|v| yc.contains(v) && *v != a && *v != b).collect();
                if common.len() != 1 {
                    continue;
                }
                let c = common[0];

                let mut premises = Vec::new();
                premises.extend(state.allowed(pivot.0, pivot.1).resolved().map(SlotOccupant::as_premise));
                premises.extend(state.allowed(x.0, x.1).resolved().map(SlotOccupant::as_premise));
                premises.extend(state.allowed(y.0, y.1).resolved().map(SlotOccupant::as_premise));

                for r in 0..9 {
                    for cc in 0..9 {
                        let cell = (r, cc);
                        if cell == pivot || cell == x || cell == y || state.value_at(r, cc) != 0 {
                            continue;
                        }
                        if sees(cell, x) && sees(cell, y) && state.allowed(r, cc).get((c - 1) as usize).is_none() {
                            changed |= state.ban(r, cc, c, RuleTag::YWing, premises.clone(), Some("y-wing".to_string()))?;
                        }
                    }
                }
            }
        }
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::RuleTag as RT;

    #[test]
    fn y_wing_eliminates_from_a_cell_seeing_both_wings() {
        let mut state = SudokuState::empty();
        // pivot (0,0): {1,2}; wing x (0,3): {1,3} shares row with pivot; wing y (3,0): {2,3}
        // shares column with pivot. Target (3,3) shares column with x and row with y, so it
        // cannot be 3.
        for v in 3..=9u8 {
            state.ban(0, 0, v, RT::DeusEx, vec![], None).unwrap();
        }
        for v in [2u8, 4, 5, 6, 7, 8, 9] {
            state.ban(0, 3, v, RT::DeusEx, vec![], None).unwrap();
        }
        for v in [1u8, 4, 5, 6, 7, 8, 9] {
            state.ban(3, 0, v, RT::DeusEx, vec![], None).unwrap();
        }
        y_wing(&mut state).unwrap();
        assert!(state.allowed(3, 3).get(2).is_some());
    }
}
