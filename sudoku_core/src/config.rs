//! Runtime-tunable behavior, exposed to `sudoku_shell` as the `var` command's five names.

use std::time::Duration;

/// The five knobs a session can adjust, matching `spec.md`'s REPL variable table.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Run the k-optimal (ILP) step selector (Step B) before falling back to greedy.
    pub k_opt: bool,
    /// Wall-clock budget given to the ILP solve before falling back to greedy.
    pub ip_time_limit: Duration,
    /// Apply the first firing rule and stop the sweep, instead of collecting every rule's output.
    pub greedy: bool,
    /// Re-run every rule from scratch each iteration instead of resuming where the last left off.
    pub reset_always: bool,
    /// Record eliminations that target an already-filled cell as bookkeeping premises, instead of
    /// silently discarding them.
    pub ignore_filled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            k_opt: true,
            ip_time_limit: Duration::from_secs(5),
            greedy: false,
            reset_always: false,
            ignore_filled: false,
        }
    }
}
