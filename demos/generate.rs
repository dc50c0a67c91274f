//! Generate a fresh Binairo puzzle.
//!
//! ```text
//! cargo run --example generate -- --size 8 --holes 0.6
//! ```

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use binairo::puzzle::generate::{Generator, GeneratorConfig};

#[derive(Parser)]
#[command(about = "Generate a Binairo/Takuzu puzzle")]
struct Args {
    /// Side length; must be positive and even.
    #[arg(long, default_value_t = 8)]
    size: usize,

    /// Fraction of cells to clear, in [0, 1).
    #[arg(long, default_value_t = 0.6)]
    holes: f64,

    /// RNG seed for reproducible boards.
    #[arg(long)]
    seed: Option<u64>,

    /// Randomized solve attempts before giving up.
    #[arg(long, default_value_t = 10)]
    attempts: u32,

    /// Per-attempt time budget in milliseconds.
    #[arg(long, default_value_t = 5000)]
    budget_ms: u64,

    /// Also print the full solution.
    #[arg(long)]
    show_solution: bool,
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
    let config = GeneratorConfig {
        size: args.size,
        holes_fraction: args.holes,
        max_attempts: args.attempts,
        attempt_budget: Duration::from_millis(args.budget_ms),
    };

    match generator.generate(&config) {
        Ok(generated) => {
            print!("{}", generated.puzzle);
            if args.show_solution {
                println!("Solution:");
                print!("{}", generated.solution);
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
