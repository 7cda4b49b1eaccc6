//! Human-style 9x9 sudoku solving with a minimal, auditable proof attached to every forced cell.
//!
//! The board is tracked across four parallel candidate views (cell-major and position-major for
//! rows, columns, and sections). Every elimination and every forced value is recorded as a node
//! in a proof graph; when a cell is finally ready to write, the engine selects the smallest
//! acyclic subset of that graph that justifies it — exactly, via integer programming, when time
//! allows, or approximately via a greedy fallback otherwise.

pub mod config;
pub mod coords;
pub mod error;
pub mod knowledge;
pub mod proof;
pub mod render;
pub mod rules;
pub mod slotmap;
pub mod solver;
pub mod state;
pub mod step_builder;
pub mod uniqueness;

pub use config::Config;
pub use error::SudokuCoreError;
pub use solver::{pending_root, SolveOutcome, Solver, StepOutcome};
pub use state::{Contradiction, SudokuState};
pub use step_builder::{build_step, BuiltStep, Proof};
