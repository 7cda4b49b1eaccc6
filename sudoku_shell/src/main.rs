//! An interactive command-line shell for driving `sudoku_core` one step at a time.
//!
//! Mirrors `sudoku_solver::main`'s plain `clap::Parser` entry point, then drops into a
//! line-oriented command loop instead of solving and exiting immediately.

use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use board_render::{BoardView, CandidateMatrix};
use sudoku_core::proof::RuleTag;
use sudoku_core::render::{render_proof, Stats};
use sudoku_core::solver::{SolveOutcome, Solver, StepOutcome};
use sudoku_core::state::SudokuState;
use sudoku_core::step_builder::BuiltStep;
use sudoku_core::uniqueness::{self, Uniqueness};

/// A command-line shell over a single sudoku puzzle.
#[derive(Parser)]
#[command(author, version, about, name = "sudoku_shell")]
struct Args {
    /// Path to a puzzle file (9x9 ASCII grid), or `-` to read one from stdin.
    path: PathBuf,
}

fn read_puzzle(path: &PathBuf) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}

fn main() {
    let args = Args::parse();

    let text = match read_puzzle(&args.path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error reading puzzle: {e}");
            return;
        }
    };

    let clues = match board_io::from_grid(&text) {
        Ok(clues) => clues,
        Err(e) => {
            eprintln!("error parsing puzzle: {e}");
            return;
        }
    };

    let mut state = match SudokuState::new(&clues) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("error building board: {e}");
            return;
        }
    };

    let mut solver = Solver::new();
    let mut history: Vec<BuiltStep> = Vec::new();

    let stdin = io::stdin();
    print!("> ");
    let _ = io::stdout().flush();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if !run_command(line.trim(), &mut state, &mut solver, &mut history) {
            break;
        }
        print!("> ");
        let _ = io::stdout().flush();
    }
}

/// Runs one REPL command. Returns `false` when the session should end.
fn run_command(line: &str, state: &mut SudokuState, solver: &mut Solver, history: &mut Vec<BuiltStep>) -> bool {
    if line.is_empty() {
        return run_to_completion(state, solver, history);
    }

    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("set") => cmd_set(&mut parts, state),
        Some("ban") => cmd_ban(line, state),
        Some("step") => cmd_step(&mut parts, state, solver, history),
        Some("proof") => cmd_proof(&mut parts, state, history),
        Some("stats") => cmd_stats(state, history),
        Some("unique") => cmd_unique(state),
        Some("var") => cmd_var(&mut parts, state),
        Some(other) => {
            eprintln!("unrecognized command: {other}");
            true
        }
        None => true,
    }
}

fn cmd_set(parts: &mut std::str::SplitWhitespace, state: &mut SudokuState) -> bool {
    let (Some(r), Some(c), Some(v)) = (parts.next(), parts.next(), parts.next()) else {
        eprintln!("usage: set r c v");
        return true;
    };
    let (Ok(r), Ok(c), Ok(v)) = (r.parse::<usize>(), c.parse::<usize>(), v.parse::<u8>()) else {
        eprintln!("set: r, c and v must be numbers");
        return true;
    };
    if let Err(e) = state.assign(r, c, v) {
        eprintln!("set: {e}");
    }
    true
}

/// `ban r c : v1 v2 ...` — an externally-supplied elimination, tagged `deus_ex`.
fn cmd_ban(line: &str, state: &mut SudokuState) -> bool {
    let Some((cells, values)) = line.split_once(':') else {
        eprintln!("usage: ban r c : values");
        return true;
    };
    let mut cell_parts = cells.split_whitespace().skip(1); // skip "ban"
    let (Some(r), Some(c)) = (cell_parts.next(), cell_parts.next()) else {
        eprintln!("usage: ban r c : values");
        return true;
    };
    let (Ok(r), Ok(c)) = (r.parse::<usize>(), c.parse::<usize>()) else {
        eprintln!("ban: r and c must be numbers");
        return true;
    };
    for token in values.split_whitespace() {
        let Ok(v) = token.parse::<u8>() else {
            eprintln!("ban: {token} is not a digit");
            continue;
        };
        match state.ban(r, c, v, RuleTag::DeusEx, vec![], None) {
            Ok(_) => {}
            Err(e) => {
                eprintln!("ban: contradiction at {}", e.at);
                return false;
            }
        }
    }
    true
}

fn cmd_step(parts: &mut std::str::SplitWhitespace, state: &mut SudokuState, solver: &mut Solver, history: &mut Vec<BuiltStep>) -> bool {
    let n: usize = parts.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    for _ in 0..n {
        match solver.step(state) {
            Ok(StepOutcome::AlreadySolved) => {
                println!("solved");
                return true;
            }
            Ok(StepOutcome::Filled(built)) => {
                println!("filled ({}, {}) = {}", built.cell.0, built.cell.1, built.value);
                history.push(built);
            }
            Ok(StepOutcome::RuleFiredNoFill) => {}
            Ok(StepOutcome::Stuck) => return report_stuck(state),
            Err(c) => return report_contradiction(state, c.at),
        }
    }
    true
}

fn run_to_completion(state: &mut SudokuState, solver: &mut Solver, history: &mut Vec<BuiltStep>) -> bool {
    match solver.run_to_completion(state) {
        Ok((SolveOutcome::Solved, steps)) => {
            println!("solved in {} steps", steps.len());
            history.extend(steps);
            true
        }
        Ok((SolveOutcome::Stuck, steps)) => {
            history.extend(steps);
            report_stuck(state)
        }
        Err(c) => report_contradiction(state, c.at),
    }
}

fn report_stuck(state: &SudokuState) -> bool {
    println!("stuck");
    print!("{}", BoardView(state));
    print!("{}", CandidateMatrix(state));
    false
}

fn report_contradiction(state: &SudokuState, at: sudoku_core::knowledge::Knowledge) -> bool {
    println!("contradiction: {at}");
    print!("{}", BoardView(state));
    print!("{}", CandidateMatrix(state));
    false
}

fn cmd_proof(parts: &mut std::str::SplitWhitespace, state: &SudokuState, history: &[BuiltStep]) -> bool {
    let Some(built) = history.last() else {
        println!("no step recorded yet");
        return true;
    };
    let text = render_proof(state.graph(), &built.proof, &built.selection);
    let lines: Vec<&str> = text.lines().collect();

    match parts.next() {
        None => {
            for line in &lines {
                println!("{line}");
            }
        }
        Some(range) => {
            let Some((start, end)) = range.split_once(':') else {
                eprintln!("usage: proof [start:end]");
                return true;
            };
            let start: usize = start.parse().unwrap_or(1);
            let end: usize = end.parse().unwrap_or(lines.len());
            for line in lines.iter().take(end).skip(start.saturating_sub(1)) {
                println!("{line}");
            }
        }
    }
    true
}

fn cmd_stats(state: &SudokuState, history: &[BuiltStep]) -> bool {
    let selections: Vec<_> = history.iter().map(|b| b.selection.clone()).collect();
    let stats = Stats::from_steps(state.graph(), history, &selections);
    print!("{stats}");
    true
}

fn cmd_unique(state: &SudokuState) -> bool {
    let mut grid = [[0u8; 9]; 9];
    for r in 0..9 {
        for c in 0..9 {
            grid[r][c] = state.value_at(r, c);
        }
    }
    match uniqueness::check(&grid) {
        Uniqueness::Unique => println!("unique"),
        Uniqueness::None => println!("no completion"),
        Uniqueness::Multiple(a, b) => {
            println!("multiple completions, e.g.:");
            print_grid(&a);
            println!("and:");
            print_grid(&b);
        }
    }
    true
}

fn print_grid(grid: &uniqueness::Grid) {
    for row in grid {
        let line: String = row.iter().map(|&v| if v == 0 { '.' } else { (b'0' + v) as char }).collect();
        println!("{line}");
    }
}

fn cmd_var(parts: &mut std::str::SplitWhitespace, state: &mut SudokuState) -> bool {
    let (Some(name), Some(value)) = (parts.next(), parts.next()) else {
        eprintln!("usage: var <name> <value>");
        return true;
    };
    let config = state.config_mut();
    match name {
        "k-opt" => match value.parse::<bool>() {
            Ok(b) => config.k_opt = b,
            Err(_) => eprintln!("var: k-opt expects true/false"),
        },
        "greedy" => match value.parse::<bool>() {
            Ok(b) => config.greedy = b,
            Err(_) => eprintln!("var: greedy expects true/false"),
        },
        "reset-always" => match value.parse::<bool>() {
            Ok(b) => config.reset_always = b,
            Err(_) => eprintln!("var: reset-always expects true/false"),
        },
        "ignore-filled" => match value.parse::<bool>() {
            Ok(b) => config.ignore_filled = b,
            Err(_) => eprintln!("var: ignore-filled expects true/false"),
        },
        "ip-time-limit" => match value.parse::<u64>() {
            Ok(ms) => config.ip_time_limit = Duration::from_millis(ms),
            Err(_) => eprintln!("var: ip-time-limit expects a number of milliseconds"),
        },
        other => eprintln!("var: unknown variable {other}"),
    }
    true
}
