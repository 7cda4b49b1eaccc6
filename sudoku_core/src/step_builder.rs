//! Turns the filler set (every still-unwritten forced cell) into one concrete, minimal, acyclic
//! proof step: which forced cell to write, which consequence to use for every deduction its proof
//! depends on, and in what order to present them.
//!
//! Step A (cycle-breaking) mirrors `original_source/graph.py::_make_acyclic` almost exactly.
//! Step B (k-optimal selection) poses the joint choice of *which* filler to write and *how* to
//! justify it as a single 0/1 integer program — a `use[d]` variable per candidate filler,
//! `sum(use) == 1`, minimizing the ground clues used by whichever filler gets chosen — and hands
//! it to `good_lp`; Step C is the greedy fallback (first resolvable filler, first acyclic
//! alternative at each node) when the IP times out or is disabled; Step D produces the
//! topological citation order and counts the distinct ground clues used (`k`). Step E, pruning
//! the filler set of other deductions for the same cell, lives in `SudokuState::set_cell` since
//! it only matters once the chosen value is actually written.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use good_lp::solvers::microlp::microlp;
use good_lp::{constraint, variable, Expression, ProblemVariables, Solution, SolverModel, Variable};

use crate::knowledge::Kind;
use crate::proof::{DeductionId, Premise, ProofGraph};

/// The acyclic view of a proof graph rooted at one node: for each deduction that can be resolved
/// without passing back through itself, the indices of its consequences that qualify.
#[derive(Debug, Default)]
pub struct AcyclicPaths {
    allowed: HashMap<DeductionId, Vec<usize>>,
}

impl AcyclicPaths {
    /// Builds the acyclic view of `graph` rooted at `root` via a two-color
    /// (unseen / on-stack / resolved) depth-first search.
    #[must_use]
    pub fn build(graph: &ProofGraph, root: DeductionId) -> Self {
        let mut paths = Self::default();
        let mut stack = HashSet::new();
        Self::visit(graph, root, &mut stack, &mut paths.allowed);
        paths
    }

    fn visit(
        graph: &ProofGraph,
        id: DeductionId,
        stack: &mut HashSet<DeductionId>,
        allowed: &mut HashMap<DeductionId, Vec<usize>>,
    ) -> bool {
        if stack.contains(&id) {
            return false;
        }
        if allowed.contains_key(&id) {
            return true;
        }
        stack.insert(id);
        let mut possibles = Vec::new();
        for (i, cons) in graph.get(id).consequences.iter().enumerate() {
            let resolvable = cons.premises.iter().all(|p| match p {
                Premise::Fact(_) => true,
                Premise::Ded(pid) => Self::visit(graph, *pid, stack, allowed),
            });
            if resolvable {
                possibles.push(i);
            }
        }
        stack.remove(&id);
        if possibles.is_empty() {
            return false;
        }
        allowed.insert(id, possibles);
        true
    }

    /// Whether `id` has at least one acyclic-resolvable consequence.
    #[must_use]
    pub fn is_resolvable(&self, id: DeductionId) -> bool {
        self.allowed.contains_key(&id)
    }

    /// The acyclic-resolvable consequence indices for `id`, if any.
    #[must_use]
    pub fn alternatives(&self, id: DeductionId) -> Option<&[usize]> {
        self.allowed.get(&id).map(Vec::as_slice)
    }
}

/// One consequence chosen per deduction needed to justify the root.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    chosen: HashMap<DeductionId, usize>,
}

impl Selection {
    /// The chosen consequence index for `id`, if it was part of this selection.
    #[must_use]
    pub fn get(&self, id: DeductionId) -> Option<usize> {
        self.chosen.get(&id).copied()
    }
}

/// Jointly selects which of `roots` to write this step and the minimal-`k` proof for it (fewest
/// distinct ground clues), via a single 0/1 integer program: a `use[d]` variable per candidate
/// root constrained to `sum(use) == 1`, so the objective trades off justification cost across the
/// whole filler set instead of optimizing a single predetermined cell. Returns `None` if
/// `deadline` has already passed or the solver can't find a feasible assignment.
fn solve_k_optimal(graph: &ProofGraph, roots: &[((usize, usize), DeductionId, AcyclicPaths)], deadline: Instant) -> Option<(DeductionId, Selection)> {
    if Instant::now() >= deadline {
        return None;
    }

    let mut vars = ProblemVariables::new();
    let use_vars: HashMap<DeductionId, Variable> = roots.iter().map(|(_, root, _)| (*root, vars.add(variable().binary()))).collect();

    // Cycle-breaking is root-relative, so each root keeps its own namespaced "active"/"choice"
    // variables even when its reachable set overlaps another root's.
    let mut active: HashMap<(DeductionId, DeductionId), Variable> = HashMap::new();
    let mut choice: HashMap<(DeductionId, DeductionId, usize), Variable> = HashMap::new();
    let mut fact_vars: HashMap<(u8, u8), Variable> = HashMap::new();
    let mut reachable_by_root: HashMap<DeductionId, HashSet<DeductionId>> = HashMap::new();

    for (_, root, acyclic) in roots {
        let reachable = reachable_set(graph, *root, acyclic);
        for &id in &reachable {
            active.entry((*root, id)).or_insert_with(|| vars.add(variable().binary()));
            for &i in acyclic.alternatives(id).unwrap_or(&[]) {
                choice.entry((*root, id, i)).or_insert_with(|| vars.add(variable().binary()));
                for premise in &graph.get(id).consequences[i].premises {
                    if let Premise::Fact(k) = premise {
                        if k.kind == Kind::IsValue {
                            fact_vars.entry(k.position).or_insert_with(|| vars.add(variable().binary()));
                        }
                    }
                }
            }
        }
        reachable_by_root.insert(*root, reachable);
    }

    let objective: Expression = fact_vars.values().copied().sum();
    let mut model = vars.minimise(objective).using(microlp);

    let use_sum: Expression = use_vars.values().copied().map(Expression::from).sum();
    model = model.with(constraint!(use_sum == 1));

    for (_, root, acyclic) in roots {
        let root_active = active[&(*root, *root)];
        model = model.with(constraint!(root_active == use_vars[root]));

        for &id in &reachable_by_root[root] {
            let alts = acyclic.alternatives(id).unwrap_or(&[]);
            let id_active = active[&(*root, id)];
            let sum: Expression = alts.iter().map(|&i| Expression::from(choice[&(*root, id, i)])).sum();
            model = model.with(constraint!(sum == id_active));

            for &i in alts {
                let this_choice = choice[&(*root, id, i)];
                for premise in &graph.get(id).consequences[i].premises {
                    match premise {
                        Premise::Ded(pid) => {
                            let dep_active = active[&(*root, *pid)];
                            model = model.with(constraint!(this_choice <= dep_active));
                        }
                        Premise::Fact(k) if k.kind == Kind::IsValue => {
                            let fact_var = fact_vars[&k.position];
                            model = model.with(constraint!(this_choice <= fact_var));
                        }
                        Premise::Fact(_) => {}
                    }
                }
            }
        }
    }

    let solution = model.solve().ok()?;

    let &chosen_root = use_vars.iter().find(|(_, &var)| solution.value(var) > 0.5).map(|(root, _)| root)?;

    let mut selection = Selection::default();
    for (&(root, id, i), &var) in &choice {
        if root == chosen_root && solution.value(var) > 0.5 {
            selection.chosen.insert(id, i);
        }
    }
    Some((chosen_root, selection))
}

fn reachable_set(graph: &ProofGraph, root: DeductionId, acyclic: &AcyclicPaths) -> HashSet<DeductionId> {
    let mut reachable = HashSet::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if !reachable.insert(id) {
            continue;
        }
        for &i in acyclic.alternatives(id).unwrap_or(&[]) {
            for premise in &graph.get(id).consequences[i].premises {
                if let Premise::Ded(pid) = premise {
                    stack.push(*pid);
                }
            }
        }
    }
    reachable
}

/// Picks the first acyclic-resolvable consequence for every deduction reachable from `root`,
/// with no attempt at minimizing `k`.
fn choose_greedy(graph: &ProofGraph, root: DeductionId, acyclic: &AcyclicPaths) -> Option<Selection> {
    let mut selection = Selection::default();
    let mut seen = HashSet::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        let alts = acyclic.alternatives(id)?;
        let chosen = alts[0];
        selection.chosen.insert(id, chosen);
        for premise in &graph.get(id).consequences[chosen].premises {
            if let Premise::Ded(pid) = premise {
                stack.push(*pid);
            }
        }
    }
    Some(selection)
}

/// A fully-ordered, k-counted proof: `order` lists every deduction in citation order (premises
/// before whatever cites them), and `k` is how many distinct ground clues the proof ultimately
/// rests on.
#[derive(Debug, Clone)]
pub struct Proof {
    /// Deductions in the order they should be presented (topological, premises first).
    pub order: Vec<DeductionId>,
    /// The number of distinct ground clues (`IsValue` facts) this proof cites.
    pub k: usize,
}

fn topological_order(graph: &ProofGraph, root: DeductionId, selection: &Selection) -> Proof {
    let mut order = Vec::new();
    let mut visited = HashSet::new();
    let mut ground_facts = HashSet::new();
    visit_order(graph, root, selection, &mut visited, &mut ground_facts, &mut order);
    Proof { order, k: ground_facts.len() }
}

fn visit_order(
    graph: &ProofGraph,
    id: DeductionId,
    selection: &Selection,
    visited: &mut HashSet<DeductionId>,
    ground_facts: &mut HashSet<(u8, u8)>,
    order: &mut Vec<DeductionId>,
) {
    if !visited.insert(id) {
        return;
    }
    if let Some(chosen) = selection.get(id) {
        for premise in &graph.get(id).consequences[chosen].premises {
            match premise {
                Premise::Ded(pid) => visit_order(graph, *pid, selection, visited, ground_facts, order),
                Premise::Fact(k) if k.kind == Kind::IsValue => {
                    ground_facts.insert(k.position);
                }
                Premise::Fact(_) => {}
            }
        }
    }
    order.push(id);
}

/// The fully-built proof for one candidate step: which cell/value it concludes, the ordered
/// proof, and whether it had to fall back to the greedy (non-optimal) selection.
#[derive(Debug, Clone)]
pub struct BuiltStep {
    /// The cell this step fills.
    pub cell: (usize, usize),
    /// The value this step fills it with.
    pub value: u8,
    /// The ordered, k-counted proof justifying it.
    pub proof: Proof,
    /// Which consequence was chosen for each deduction in `proof.order`, for rendering.
    pub selection: Selection,
    /// Whether the greedy fallback (rather than the k-optimal IP) produced this selection.
    pub used_approximation: bool,
}

/// Builds the proof step for the whole filler set: which forced cell to write (jointly chosen
/// alongside its proof when `k_opt` is set, so the IP can prefer a smaller-`k` alternative over
/// whichever filler it's handed first) and the minimal, acyclic proof that justifies it. Returns
/// `None` if no filler is resolvable at all (every one's proof graph is a pure cycle).
#[must_use]
pub fn build_step(graph: &ProofGraph, filler: &HashMap<(usize, usize), DeductionId>, ip_time_limit: Duration, k_opt: bool) -> Option<BuiltStep> {
    let mut resolvable: Vec<((usize, usize), DeductionId, AcyclicPaths)> = filler
        .iter()
        .filter_map(|(&cell, &id)| {
            let acyclic = AcyclicPaths::build(graph, id);
            acyclic.is_resolvable(id).then_some((cell, id, acyclic))
        })
        .collect();
    if resolvable.is_empty() {
        return None;
    }
    // deterministic order so the greedy fallback always prefers the same filler when there's no
    // time-budget winner
    resolvable.sort_by_key(|(cell, _, _)| *cell);

    let (chosen, selection, used_approximation) = if k_opt {
        let deadline = Instant::now() + ip_time_limit;
        match solve_k_optimal(graph, &resolvable, deadline) {
            Some((root, sel)) => (root, sel, false),
            None => {
                let (_, root, acyclic) = &resolvable[0];
                (*root, choose_greedy(graph, *root, acyclic)?, true)
            }
        }
    } else {
        let (_, root, acyclic) = &resolvable[0];
        (*root, choose_greedy(graph, *root, acyclic)?, true)
    };

    let conclusion = graph.get(chosen).conclusion;
    let cell = (conclusion.position.0 as usize, conclusion.position.1 as usize);
    let value = conclusion.value;

    let proof = topological_order(graph, chosen, &selection);
    Some(BuiltStep { cell, value, proof, selection, used_approximation })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{CoordView, Knowledge};
    use crate::proof::{Consequence, RuleTag};

    fn fact(value: u8) -> Knowledge {
        Knowledge { kind: Kind::IsValue, view: CoordView::Allowed, position: (0, 1), value }
    }

    #[test]
    fn acyclic_paths_breaks_a_self_citing_cycle() {
        let mut graph = ProofGraph::new();
        let knowledge = Knowledge { kind: Kind::MustBe, view: CoordView::Allowed, position: (0, 0), value: 5 };
        let id = graph.create(knowledge);
        // a consequence that (absurdly) cites itself as a premise — must not be usable
        graph.add_consequence(id, Consequence { rule: RuleTag::SoleCandidate, premises: vec![Premise::Ded(id)], details: None });
        // a second, ground-fact-only consequence — must remain usable
        graph.add_consequence(id, Consequence { rule: RuleTag::DeusEx, premises: vec![Premise::Fact(fact(5))], details: None });

        let acyclic = AcyclicPaths::build(&graph, id);
        assert!(acyclic.is_resolvable(id));
        assert_eq!(acyclic.alternatives(id), Some(&[1usize][..]));
    }

    #[test]
    fn greedy_selection_counts_ground_facts() {
        let mut graph = ProofGraph::new();
        let fact_a = Knowledge { kind: Kind::IsValue, view: CoordView::Allowed, position: (2, 2), value: 1 };
        let fact_b = Knowledge { kind: Kind::IsValue, view: CoordView::Allowed, position: (2, 3), value: 2 };
        let leaf = graph.create(Knowledge { kind: Kind::MustBe, view: CoordView::Allowed, position: (1, 1), value: 3 });
        graph.add_consequence(leaf, Consequence { rule: RuleTag::DeusEx, premises: vec![Premise::Fact(fact_a), Premise::Fact(fact_b)], details: None });

        let root = graph.create(Knowledge { kind: Kind::MustBe, view: CoordView::Allowed, position: (0, 0), value: 9 });
        graph.add_consequence(root, Consequence { rule: RuleTag::SoleCandidate, premises: vec![Premise::Ded(leaf)], details: None });

        let filler = HashMap::from([((0, 0), root)]);
        let built = build_step(&graph, &filler, Duration::from_millis(1), false).unwrap();
        assert!(built.used_approximation);
        assert_eq!(built.proof.k, 2);
        assert_eq!(built.proof.order, vec![leaf, root]);
    }

    #[test]
    fn unresolvable_root_yields_no_step() {
        let mut graph = ProofGraph::new();
        let id = graph.create(Knowledge { kind: Kind::MustBe, view: CoordView::Allowed, position: (0, 0), value: 1 });
        graph.add_consequence(id, Consequence { rule: RuleTag::SoleCandidate, premises: vec![Premise::Ded(id)], details: None });
        let filler = HashMap::from([((0, 0), id)]);
        assert!(build_step(&graph, &filler, Duration::from_millis(1), false).is_none());
    }

    /// Two cells are simultaneously ready to write: the lower-coordinate one needs two ground
    /// clues, the other needs only one. The joint IP must pick the cheaper one.
    #[test]
    fn k_optimal_selection_picks_the_cheaper_filler_over_the_lowest_coordinate_one() {
        let mut graph = ProofGraph::new();
        let fact_a = Knowledge { kind: Kind::IsValue, view: CoordView::Allowed, position: (2, 2), value: 1 };
        let fact_b = Knowledge { kind: Kind::IsValue, view: CoordView::Allowed, position: (2, 3), value: 2 };
        let fact_c = Knowledge { kind: Kind::IsValue, view: CoordView::Allowed, position: (3, 3), value: 4 };

        let expensive = graph.create(Knowledge { kind: Kind::MustBe, view: CoordView::Allowed, position: (0, 0), value: 9 });
        graph.add_consequence(expensive, Consequence { rule: RuleTag::DeusEx, premises: vec![Premise::Fact(fact_a), Premise::Fact(fact_b)], details: None });

        let cheap = graph.create(Knowledge { kind: Kind::MustBe, view: CoordView::Allowed, position: (0, 1), value: 7 });
        graph.add_consequence(cheap, Consequence { rule: RuleTag::DeusEx, premises: vec![Premise::Fact(fact_c)], details: None });

        let filler = HashMap::from([((0, 0), expensive), ((0, 1), cheap)]);
        let built = build_step(&graph, &filler, Duration::from_secs(1), true).unwrap();

        assert!(!built.used_approximation);
        assert_eq!(built.cell, (0, 1));
        assert_eq!(built.value, 7);
        assert_eq!(built.proof.k, 1);
    }
}
