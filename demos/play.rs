//! Manual play against a generated board.
//!
//! Commands: `ROW COL VALUE` places a value, `HINT` asks the solver for the
//! next cell, `EXIT` quits.

use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use binairo::puzzle::generate::{Generator, GeneratorConfig};
use binairo::puzzle::grid::{Bit, Move};
use binairo::puzzle::rules::BinairoRules;
use binairo::solver::oracle::RuleOracle;
use binairo::solver::{config::SolverConfig, engine::BacktrackingSolver};

#[derive(Parser)]
#[command(about = "Play a Binairo/Takuzu puzzle in the terminal")]
struct Args {
    /// Side length; must be positive and even.
    #[arg(long, default_value_t = 6)]
    size: usize,

    /// RNG seed for a reproducible board.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut generator = match args.seed {
        Some(seed) => Generator::with_seed(seed),
        None => Generator::new(),
    };
    let generated = generator
        .generate(&GeneratorConfig::new(args.size))
        .unwrap_or_else(|e| {
            eprintln!("{}", e);
            std::process::exit(1);
        });

    let rules = BinairoRules;
    let mut grid = generated.puzzle;
    let stdin = io::stdin();

    while !rules.is_complete(&grid) {
        print!("{}", grid);
        print!("Move (ROW COL VALUE), HINT or EXIT: ");
        io::stdout().flush().unwrap();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap() == 0 {
            return;
        }
        let input = line.trim().to_uppercase();

        if input == "EXIT" {
            return;
        }
        if input == "HINT" {
            let config = SolverConfig {
                use_mrv: true,
                use_forward_checking: true,
                ..SolverConfig::default()
            };
            let mut solver = BacktrackingSolver::new(rules, config);
            let (solution, _) = solver.solve(grid.clone());
            match solution {
                Some(solved) => {
                    if let Some(var) = rules.unassigned_variables(&grid).first() {
                        let value = solved.cell(var.row, var.col).unwrap();
                        println!("Hint: {} at {},{}", value.digit(), var.row, var.col);
                    }
                }
                None => println!("No solution from here!"),
            }
            continue;
        }

        let fields: Vec<&str> = input.split_whitespace().collect();
        let parsed = match fields.as_slice() {
            [r, c, v] => match (r.parse(), c.parse(), v.parse::<u8>()) {
                (Ok(row), Ok(col), Ok(value)) if value <= 1 => Some((row, col, value)),
                _ => None,
            },
            _ => None,
        };
        let Some((row, col, value)) = parsed else {
            println!("Bad input.");
            continue;
        };
        if row >= grid.size() || col >= grid.size() {
            println!("Out of bounds.");
            continue;
        }
        let value = if value == 0 { Bit::Zero } else { Bit::One };

        // Re-placing over an assigned cell replaces it; an illegal move
        // leaves the board untouched.
        let mut candidate = grid.clone();
        candidate.clear(row, col);
        let mv = Move::new(row, col, value);
        if rules.is_legal_move(&candidate, mv) {
            candidate.place(mv);
            grid = candidate;
        } else {
            println!("Illegal move!");
        }
    }
    print!("{}", grid);
    println!("Solved, congratulations!");
}
