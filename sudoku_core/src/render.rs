//! Turns a built proof into the human-readable lemma list `spec.md` calls an "export": one
//! numbered line per deduction, citing the reference numbers of whatever it rests on, plus
//! summary statistics across a whole solve.
//!
//! Simplified from `original_source/graph.py::print_graph`'s box-drawing tree into a flat list —
//! the lemma numbers alone carry the dependency structure.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::proof::{DeductionId, Premise, ProofGraph, RuleTag};
use crate::step_builder::{BuiltStep, Proof};

/// Renders `proof`'s lemmas in citation order, one per line, each prefixed with its reference
/// number and citing the numbers of the premises it used.
#[must_use]
pub fn render_proof(graph: &ProofGraph, proof: &Proof, selection: &crate::step_builder::Selection) -> String {
    let mut numbers: HashMap<DeductionId, usize> = HashMap::new();
    for (i, &id) in proof.order.iter().enumerate() {
        numbers.insert(id, i + 1);
    }

    let mut out = String::new();
    for (i, &id) in proof.order.iter().enumerate() {
        let n = i + 1;
        let node = graph.get(id);
        let Some(chosen) = selection.get(id) else { continue };
        let cons = &node.consequences[chosen];
        let refs: Vec<String> = cons
            .premises
            .iter()
            .filter_map(|p| match p {
                Premise::Ded(pid) => numbers.get(pid).map(|n| n.to_string()),
                Premise::Fact(_) => None,
            })
            .collect();

        let mut line = format!("[{n}] {}", node.conclusion);
        let _ = write!(line, " — {}", cons.rule);
        if let Some(details) = &cons.details {
            let _ = write!(line, " ({details})");
        }
        if !refs.is_empty() {
            let _ = write!(line, ", citing [{}]", refs.join(", "));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Aggregate statistics across however many steps a solve run produced.
#[derive(Debug, Default, Clone)]
pub struct Stats {
    /// How many cells were filled.
    pub steps: usize,
    /// How many of those steps fell back to the greedy (non-optimal) selection.
    pub approximate_steps: usize,
    /// Histogram of `k` (distinct ground clues used) across every step.
    pub k_histogram: HashMap<usize, usize>,
    /// How many times each rule fired in a chosen proof.
    pub rule_counts: HashMap<RuleTag, usize>,
}

impl Stats {
    /// Builds statistics from a completed run's steps and the graph used to derive them.
    #[must_use]
    pub fn from_steps(graph: &ProofGraph, steps: &[BuiltStep], selections: &[crate::step_builder::Selection]) -> Self {
        let mut stats = Self::default();
        for (step, selection) in steps.iter().zip(selections) {
            stats.steps += 1;
            if step.used_approximation {
                stats.approximate_steps += 1;
            }
            *stats.k_histogram.entry(step.proof.k).or_insert(0) += 1;
            for &id in &step.proof.order {
                if let Some(chosen) = selection.get(id) {
                    *stats.rule_counts.entry(graph.get(id).consequences[chosen].rule).or_insert(0) += 1;
                }
            }
        }
        stats
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "steps: {}", self.steps)?;
        writeln!(f, "approximate steps: {}", self.approximate_steps)?;
        write!(f, "k histogram:")?;
        let mut ks: Vec<&usize> = self.k_histogram.keys().collect();
        ks.sort_unstable();
        for k in ks {
            write!(f, " {k}:{}", self.k_histogram[k])?;
        }
        writeln!(f)?;
        write!(f, "rule counts:")?;
        let mut rules: Vec<&RuleTag> = self.rule_counts.keys().collect();
        rules.sort_by_key(|r| format!("{r}"));
        for rule in rules {
            write!(f, " {rule}:{}", self.rule_counts[rule])?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{CoordView, Kind, Knowledge};
    use crate::proof::Consequence;
    use crate::step_builder::build_step;
    use std::time::Duration;

    #[test]
    fn render_proof_cites_earlier_lemma_numbers() {
        let mut graph = ProofGraph::new();
        let leaf = graph.create(Knowledge { kind: Kind::MustBe, view: CoordView::Allowed, position: (1, 1), value: 3 });
        let fact = Knowledge { kind: Kind::IsValue, view: CoordView::Allowed, position: (0, 1), value: 5 };
        graph.add_consequence(leaf, Consequence { rule: RuleTag::DeusEx, premises: vec![Premise::Fact(fact)], details: None });

        let root = graph.create(Knowledge { kind: Kind::MustBe, view: CoordView::Allowed, position: (0, 0), value: 9 });
        graph.add_consequence(root, Consequence { rule: RuleTag::SoleCandidate, premises: vec![Premise::Ded(leaf)], details: None });

        let filler = HashMap::from([((0, 0), root)]);
        let built = build_step(&graph, &filler, Duration::from_millis(1), false).unwrap();
        let text = render_proof(&graph, &built.proof, &built.selection);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[1]"));
        assert!(lines[1].starts_with("[2]"));
        assert!(lines[1].contains("citing [1]"));
    }

    #[test]
    fn stats_count_steps_and_rules() {
        let mut graph = ProofGraph::new();
        let root = graph.create(Knowledge { kind: Kind::MustBe, view: CoordView::Allowed, position: (0, 0), value: 9 });
        let fact = Knowledge { kind: Kind::IsValue, view: CoordView::Allowed, position: (0, 1), value: 5 };
        graph.add_consequence(root, Consequence { rule: RuleTag::SoleCandidate, premises: vec![Premise::Fact(fact)], details: None });

        let filler = HashMap::from([((0, 0), root)]);
        let built = build_step(&graph, &filler, Duration::from_millis(1), false).unwrap();
        let stats = Stats::from_steps(&graph, std::slice::from_ref(&built), std::slice::from_ref(&built.selection));
        assert_eq!(stats.steps, 1);
        assert_eq!(stats.approximate_steps, 1);
        assert_eq!(stats.rule_counts.get(&RuleTag::SoleCandidate), Some(&1));
    }
}
