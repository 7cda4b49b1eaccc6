//! Coordinate math shared by every candidate view: rows, columns, and the 9 fixed 3x3 sections.

/// Board side length.
pub const SIZE: usize = 9;
/// Section (box) side length.
pub const BOX: usize = 3;

/// The section index (0..9, row-major over boxes) that `(r, c)` falls in.
#[inline]
#[must_use]
pub fn section(r: usize, c: usize) -> usize {
    BOX * (r / BOX) + c / BOX
}

/// `(r, c)`'s position within its own section, as `(local_row, local_col)` each in `0..3`.
#[inline]
#[must_use]
pub fn local(r: usize, c: usize) -> (usize, usize) {
    (r % BOX, c % BOX)
}

/// The global `(r, c)` for the cell at `(i, j)` (each `0..3`) within section `sec`.
#[inline]
#[must_use]
pub fn to_global(sec: usize, i: usize, j: usize) -> (usize, usize) {
    (BOX * (sec / BOX) + i, BOX * (sec % BOX) + j)
}

/// The 9 cells of row `r`, in column order.
#[must_use]
pub fn row_cells(r: usize) -> [(usize, usize); SIZE] {
    std::array::from_fn(|c| (r, c))
}

/// The 9 cells of column `c`, in row order.
#[must_use]
pub fn col_cells(c: usize) -> [(usize, usize); SIZE] {
    std::array::from_fn(|r| (r, c))
}

/// The 9 cells of section `sec`, in local row-major order.
#[must_use]
pub fn section_cells(sec: usize) -> [(usize, usize); SIZE] {
    std::array::from_fn(|k| to_global(sec, k / BOX, k % BOX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sections_partition_the_board() {
        let mut seen = HashSet::new();
        for sec in 0..9 {
            for (r, c) in section_cells(sec) {
                assert!(seen.insert((r, c)), "cell ({r},{c}) covered by two sections");
                assert_eq!(section(r, c), sec);
            }
        }
        assert_eq!(seen.len(), 81);
    }

    #[test]
    fn local_and_to_global_round_trip() {
        for r in 0..9 {
            for c in 0..9 {
                let sec = section(r, c);
                let (i, j) = local(r, c);
                assert_eq!(to_global(sec, i, j), (r, c));
            }
        }
    }

    #[test]
    fn corner_sections() {
        assert_eq!(section(0, 0), 0);
        assert_eq!(section(0, 8), 2);
        assert_eq!(section(8, 0), 6);
        assert_eq!(section(8, 8), 8);
        assert_eq!(section(4, 4), 4);
    }

    #[test]
    fn unit_cells_have_nine_members() {
        for r in 0..9 {
            assert_eq!(row_cells(r).len(), 9);
        }
        for c in 0..9 {
            assert_eq!(col_cells(c).len(), 9);
        }
    }
}
