//! The proof graph: an arena of `Deduction` nodes, each possibly supported by several
//! alternative `Consequence`s (independent derivations of the same conclusion).

use crate::knowledge::Knowledge;
use std::fmt;

/// Identifies a [`Deduction`] by its arena slot. Two deductions with an identical conclusion
/// still get distinct ids — identity here is "when it was created", not "what it concludes",
/// which is what lets the proof graph tell apart two separately-discovered routes to the same
/// fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeductionId(pub(crate) usize);

/// A named deduction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleTag {
    /// A cell has exactly one remaining candidate.
    SoleCandidate,
    /// A value has exactly one remaining position in some unit.
    SolePosition,
    /// Naked pair.
    NakedPair,
    /// Naked triple.
    NakedTriple,
    /// Hidden pair.
    HiddenPair,
    /// Hidden triple.
    HiddenTriple,
    /// A value confined to one line within a section.
    SquareLine,
    /// A value confined to one section within a line.
    LineSquare,
    /// X-wing.
    XWing,
    /// Y-wing.
    YWing,
    /// Swordfish.
    Swordfish,
    /// An externally supplied clue or forced assignment, not derived by any rule.
    DeusEx,
}

impl fmt::Display for RuleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RuleTag::SoleCandidate => "sole candidate",
            RuleTag::SolePosition => "sole position",
            RuleTag::NakedPair => "naked pair",
            RuleTag::NakedTriple => "naked triple",
            RuleTag::HiddenPair => "hidden pair",
            RuleTag::HiddenTriple => "hidden triple",
            RuleTag::SquareLine => "box/line",
            RuleTag::LineSquare => "line/box",
            RuleTag::XWing => "x-wing",
            RuleTag::YWing => "y-wing",
            RuleTag::Swordfish => "swordfish",
            RuleTag::DeusEx => "given",
        };
        f.write_str(s)
    }
}

/// A premise cited by a [`Consequence`]: either a ground fact or another deduction in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Premise {
    /// A ground fact (a clue, or a forced fill already written to the board).
    Fact(Knowledge),
    /// Another node in the proof graph.
    Ded(DeductionId),
}

/// One way of deriving a [`Deduction`]'s conclusion: a rule plus the premises it cites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consequence {
    /// Which rule fired.
    pub rule: RuleTag,
    /// What it cited.
    pub premises: Vec<Premise>,
    /// Free-form rule-specific detail (e.g. which unit, which geometry) for rendering.
    pub details: Option<String>,
}

/// A node in the proof graph: a conclusion plus every independent way found to derive it.
#[derive(Debug, Clone)]
pub struct Deduction {
    /// What this node asserts.
    pub conclusion: Knowledge,
    /// Every distinct way to derive `conclusion` found so far.
    pub consequences: Vec<Consequence>,
}

/// An arena of [`Deduction`] nodes addressed by [`DeductionId`].
#[derive(Debug, Default)]
pub struct ProofGraph {
    nodes: Vec<Deduction>,
}

impl ProofGraph {
    /// An empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Creates a fresh node for `conclusion`, with no consequences yet, and returns its id.
    pub fn create(&mut self, conclusion: Knowledge) -> DeductionId {
        let id = DeductionId(self.nodes.len());
        self.nodes.push(Deduction { conclusion, consequences: Vec::new() });
        id
    }

    /// The node at `id`.
    #[must_use]
    pub fn get(&self, id: DeductionId) -> &Deduction {
        &self.nodes[id.0]
    }

    /// Appends `consequence` to `id` unless an equal one is already recorded.
    ///
    /// Returns `true` if this changed the node (the posting-the-same-conclusion-twice case is a
    /// no-op and returns `false`).
    pub fn add_consequence(&mut self, id: DeductionId, consequence: Consequence) -> bool {
        let node = &mut self.nodes[id.0];
        if node.consequences.contains(&consequence) {
            return false;
        }
        node.consequences.push(consequence);
        true
    }

    /// How many nodes the graph holds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{CoordView, Kind};

    fn knowledge(value: u8) -> Knowledge {
        Knowledge { kind: Kind::CantBe, view: CoordView::Allowed, position: (0, 0), value }
    }

    #[test]
    fn structurally_identical_conclusions_get_distinct_ids() {
        let mut graph = ProofGraph::new();
        let a = graph.create(knowledge(5));
        let b = graph.create(knowledge(5));
        assert_ne!(a, b);
        assert_eq!(graph.get(a).conclusion, graph.get(b).conclusion);
    }

    #[test]
    fn duplicate_consequence_is_a_no_op() {
        let mut graph = ProofGraph::new();
        let id = graph.create(knowledge(5));
        let cons = Consequence { rule: RuleTag::DeusEx, premises: vec![], details: None };
        assert!(graph.add_consequence(id, cons.clone()));
        assert!(!graph.add_consequence(id, cons));
        assert_eq!(graph.get(id).consequences.len(), 1);
    }

    #[test]
    fn distinct_consequences_both_recorded() {
        let mut graph = ProofGraph::new();
        let id = graph.create(knowledge(5));
        graph.add_consequence(id, Consequence { rule: RuleTag::SoleCandidate, premises: vec![], details: None });
        graph.add_consequence(id, Consequence { rule: RuleTag::SolePosition, premises: vec![], details: None });
        assert_eq!(graph.get(id).consequences.len(), 2);
    }
}
