//! Box/line and line/box intersections: a value confined to one line within a section eliminates
//! from the rest of that line outside the section, and vice versa.

use std::collections::HashSet;

use crate::coords::{section, section_cells};
use crate::proof::{Premise, RuleTag};
use crate::state::{Contradiction, SlotOccupant, SudokuState};

fn fire_square_line(state: &mut SudokuState, sec: usize, v: u8) -> Result<bool, Contradiction> {
    let map = state.secpos(sec, v);
    if map.is_empty() {
        return Ok(false);
    }
    let cells: Vec<(usize, usize)> = map.unresolved_keys().map(|k| crate::coords::to_global(sec, k / 3, k % 3)).collect();
    let rows: HashSet<usize> = cells.iter().map(|&(r, _)| r).collect();
    let cols: HashSet<usize> = cells.iter().map(|&(_, c)| c).collect();
    let premises: Vec<Premise> = map.resolved().map(SlotOccupant::as_premise).collect();

    let mut changed = false;
    if rows.len() == 1 {
        let r = *rows.iter().next().expect("checked len == 1");
        for c in 0..9 {
            if section(r, c) == sec || state.value_at(r, c) != 0 {
                continue;
            }
            if state.allowed(r, c).get((v - 1) as usize).is_none() {
                changed |= state.ban(r, c, v, RuleTag::SquareLine, premises.clone(), Some(format!("section {sec}, row {r}")))?;
            }
        }
    } else if cols.len() == 1 {
        let c = *cols.iter().next().expect("checked len == 1");
        for r in 0..9 {
            if section(r, c) == sec || state.value_at(r, c) != 0 {
                continue;
            }
            if state.allowed(r, c).get((v - 1) as usize).is_none() {
                changed |= state.ban(r, c, v, RuleTag::SquareLine, premises.clone(), Some(format!("section {sec}, column {c}")))?;
            }
        }
    }
    Ok(changed)
}

fn fire_line_square_row(state: &mut SudokuState, r: usize, v: u8) -> Result<bool, Contradiction> {
    let map = state.rowpos(r, v);
    if map.is_empty() {
        return Ok(false);
    }
    let cols: Vec<usize> = map.unresolved_keys().collect();
    let secs: HashSet<usize> = cols.iter().map(|&c| section(r, c)).collect();
    if secs.len() != 1 {
        return Ok(false);
    }
    let sec = *secs.iter().next().expect("checked len == 1");
    let premises: Vec<Premise> = map.resolved().map(SlotOccupant::as_premise).collect();

    let mut changed = false;
    for (rr, cc) in section_cells(sec) {
        if rr == r || state.value_at(rr, cc) != 0 {
            continue;
        }
        if state.allowed(rr, cc).get((v - 1) as usize).is_none() {
            changed |= state.ban(rr, cc, v, RuleTag::LineSquare, premises.clone(), Some(format!("row {r}, section {sec}")))?;
        }
    }
    Ok(changed)
}

fn fire_line_square_col(state: &mut SudokuState, c: usize, v: u8) -> Result<bool, Contradiction> {
    // The column branch cites colpos, mirroring the row branch's rowpos — a prior version of
    // this rule cited rowpos here by mistake, which misreads a value's row-spread as its
    // column-spread.
    let map = state.colpos(c, v);
    if map.is_empty() {
        return Ok(false);
    }
    let rows: Vec<usize> = map.unresolved_keys().collect();
    let secs: HashSet<usize> = rows.iter().map(|&r| section(r, c)).collect();
    if secs.len() != 1 {
        return Ok(false);
    }
    let sec = *secs.iter().next().expect("checked len == 1");
    let premises: Vec<Premise> = map.resolved().map(SlotOccupant::as_premise).collect();

    let mut changed = false;
    for (rr, cc) in section_cells(sec) {
        if cc == c || state.value_at(rr, cc) != 0 {
            continue;
        }
        if state.allowed(rr, cc).get((v - 1) as usize).is_none() {
            changed |= state.ban(rr, cc, v, RuleTag::LineSquare, premises.clone(), Some(format!("column {c}, section {sec}")))?;
        }
    }
    Ok(changed)
}

/// A value confined to one row or column within a section eliminates from the rest of that
/// row/column outside the section.
pub fn square_line(state: &mut SudokuState) -> Result<bool, Contradiction> {
    let mut changed = false;
    for sec in 0..9 {
        for v in 1..=9u8 {
            changed |= fire_square_line(state, sec, v)?;
        }
    }
    Ok(changed)
}

/// A value confined to one section within a row or column eliminates from the rest of that
/// section outside the row/column.
pub fn line_square(state: &mut SudokuState) -> Result<bool, Contradiction> {
    let mut changed = false;
    for r in 0..9 {
        for v in 1..=9u8 {
            changed |= fire_line_square_row(state, r, v)?;
        }
    }
    for c in 0..9 {
        for v in 1..=9u8 {
            changed |= fire_line_square_col(state, c, v)?;
        }
    }
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::RuleTag as RT;

    #[test]
    fn square_line_eliminates_outside_the_section_row() {
        let mut state = SudokuState::empty();
        // confine value 4 within section 0 to row 0 only (ban it from local rows 1,2 of section 0)
        for c in 0..3 {
            for r in 1..3 {
                state.ban(r, c, 4, RT::DeusEx, vec![], None).unwrap();
            }
        }
        square_line(&mut state).unwrap();
        assert!(state.allowed(0, 5).get(3).is_some());
    }

    #[test]
    fn line_square_col_uses_colpos_not_rowpos() {
        let mut state = SudokuState::empty();
        // confine value 6 in column 0 to section 0 (rows 0-2) by banning it from rows 3..9
        for r in 3..9 {
            state.ban(r, 0, 6, RT::DeusEx, vec![], None).unwrap();
        }
        line_square(&mut state).unwrap();
        // section 0 cells outside column 0 should have 6 eliminated
        assert!(state.allowed(0, 1).get(5).is_some());
    }
}
