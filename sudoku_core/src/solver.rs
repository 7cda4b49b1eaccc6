//! The main solve loop: alternate running the rule sweep (C6) and writing whatever forced value
//! the filler set yields, building a minimal proof for each write via `step_builder` (C7).

use crate::proof::DeductionId;
use crate::rules;
use crate::state::{Contradiction, SudokuState};
use crate::step_builder::{self, BuiltStep};

/// What one call to [`Solver::step`] accomplished.
#[derive(Debug)]
pub enum StepOutcome {
    /// The board was already complete.
    AlreadySolved,
    /// A forced cell was written, with its proof.
    Filled(BuiltStep),
    /// At least one rule found something new, but nothing was ready to write yet.
    RuleFiredNoFill,
    /// No rule fired and there was nothing left to write: the solver is stuck.
    Stuck,
}

/// The result of running the solver to completion or until it gets stuck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    /// The board is completely filled.
    Solved,
    /// No further progress can be made without guessing.
    Stuck,
}

/// Drives the rule sweep and the proof-step builder. Remembers where the last sweep left off, so
/// `reset-always = false` can resume there instead of rescanning every rule from the top.
#[derive(Debug, Default)]
pub struct Solver {
    rule_cursor: usize,
}

impl Solver {
    /// A fresh solver, starting its rule sweep from the first rule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one unit of work: write a pending forced cell if one is ready, otherwise sweep the
    /// rules once looking for new facts.
    ///
    /// # Errors
    /// Propagates a [`Contradiction`] raised by a rule or by writing a forced value.
    pub fn step(&mut self, state: &mut SudokuState) -> Result<StepOutcome, Contradiction> {
        if state.is_solved() {
            return Ok(StepOutcome::AlreadySolved);
        }

        if let Some(built) = self.apply_one_filler(state)? {
            return Ok(StepOutcome::Filled(built));
        }

        let fired = self.sweep_rules(state)?;

        if let Some(built) = self.apply_one_filler(state)? {
            return Ok(StepOutcome::Filled(built));
        }

        if fired {
            Ok(StepOutcome::RuleFiredNoFill)
        } else {
            Ok(StepOutcome::Stuck)
        }
    }

    /// Repeatedly calls [`Solver::step`] until the board is solved or no more progress can be
    /// made, returning every forced write's proof along the way.
    ///
    /// # Errors
    /// Propagates a [`Contradiction`] raised along the way.
    pub fn run_to_completion(&mut self, state: &mut SudokuState) -> Result<(SolveOutcome, Vec<BuiltStep>), Contradiction> {
        let mut steps = Vec::new();
        // The board has 81 cells; a well-formed run writes at most one per iteration, so this
        // bound can never be hit by a correct solve — it's a backstop against an infinite loop.
        for _ in 0..=81 {
            match self.step(state)? {
                StepOutcome::AlreadySolved => return Ok((SolveOutcome::Solved, steps)),
                StepOutcome::Filled(built) => {
                    steps.push(built);
                    if state.is_solved() {
                        return Ok((SolveOutcome::Solved, steps));
                    }
                }
                StepOutcome::RuleFiredNoFill => {}
                StepOutcome::Stuck => return Ok((SolveOutcome::Stuck, steps)),
            }
        }
        Ok((SolveOutcome::Stuck, steps))
    }

    fn sweep_rules(&mut self, state: &mut SudokuState) -> Result<bool, Contradiction> {
        let config = *state.config();
        if config.reset_always {
            self.rule_cursor = 0;
        }
        let n = rules::RULES.len();
        let mut any = false;
        for offset in 0..n {
            let idx = (self.rule_cursor + offset) % n;
            if rules::RULES[idx](state)? {
                any = true;
                self.rule_cursor = idx;
                if config.greedy {
                    break;
                }
            }
        }
        Ok(any)
    }

    fn apply_one_filler(&mut self, state: &mut SudokuState) -> Result<Option<BuiltStep>, Contradiction> {
        if state.filler().is_empty() {
            return Ok(None);
        }
        let config = *state.config();

        let Some(built) = step_builder::build_step(state.graph(), state.filler(), config.ip_time_limit, config.k_opt) else {
            return Ok(None);
        };

        let conclusion = state.graph().get(*state.filler().get(&built.cell).expect("build_step only picks cells in the filler set")).conclusion;
        state
            .assign(built.cell.0, built.cell.1, built.value)
            .map_err(|_| Contradiction { at: conclusion })?;
        Ok(Some(built))
    }
}

/// The deduction a yet-unwritten forced cell rests on, for REPL inspection (`proof` without a
/// completed step yet).
#[must_use]
pub fn pending_root(state: &SudokuState, cell: (usize, usize)) -> Option<DeductionId> {
    state.filler().get(&cell).copied()
}
