//! The three kinds of fact the engine reasons about, and the four parallel coordinate
//! views each fact can be recorded against.

use std::fmt;

/// Which of the four candidate views a [`Knowledge`] instance was recorded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordView {
    /// `allowed[r][c]`, keyed by value.
    Allowed,
    /// `rowpos[r][v]`, keyed by column.
    RowPos,
    /// `colpos[c][v]`, keyed by row.
    ColPos,
    /// `secpos[s][v]`, keyed by local position.
    SecPos,
}

impl fmt::Display for CoordView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CoordView::Allowed => "allowed",
            CoordView::RowPos => "rowpos",
            CoordView::ColPos => "colpos",
            CoordView::SecPos => "secpos",
        };
        f.write_str(s)
    }
}

/// What a [`Knowledge`] instance asserts about a cell/value pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The cell is filled with this value.
    IsValue,
    /// The cell must eventually take this value (forced, not yet written).
    MustBe,
    /// The cell cannot take this value.
    CantBe,
}

/// A single fact the engine knows: a `(kind, view, position, value)` tuple. Two `Knowledge`
/// instances are equal only if all three of kind/position/value match *and* they were recorded
/// under the same coordinate view — a `CantBe` posted via `rowpos` is a distinct fact from the
/// structurally-identical `CantBe` posted via `allowed` for the same cell and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Knowledge {
    /// What this fact asserts.
    pub kind: Kind,
    /// Which view recorded it.
    pub view: CoordView,
    /// Global `(row, col)`.
    pub position: (u8, u8),
    /// The value in question, `1..=9`.
    pub value: u8,
}

impl fmt::Display for Knowledge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, c) = self.position;
        match self.kind {
            Kind::IsValue => write!(f, "({r},{c}) is {}", self.value),
            Kind::MustBe => write!(f, "({r},{c}) must be {}", self.value),
            Kind::CantBe => write!(f, "({r},{c}) can't be {} [{}]", self.value, self.view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_fields_are_equal() {
        let a = Knowledge { kind: Kind::CantBe, view: CoordView::Allowed, position: (0, 0), value: 5 };
        let b = Knowledge { kind: Kind::CantBe, view: CoordView::Allowed, position: (0, 0), value: 5 };
        assert_eq!(a, b);
    }

    #[test]
    fn different_view_is_a_different_fact() {
        let a = Knowledge { kind: Kind::CantBe, view: CoordView::Allowed, position: (0, 0), value: 5 };
        let b = Knowledge { kind: Kind::CantBe, view: CoordView::RowPos, position: (0, 0), value: 5 };
        assert_ne!(a, b);
    }
}
