//! Solve a Binairo grid from a file (or stdin) with a chosen heuristic mix.
//!
//! ```text
//! cargo run --example solve -- puzzle.txt --mrv --forward-checking
//! ```
//!
//! The grid text uses one line per row with `0`, `1` or `.` per cell.

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use binairo::puzzle::{grid::Grid, rules::BinairoRules};
use binairo::solver::{config::SolverConfig, engine::BacktrackingSolver};

#[derive(Parser)]
#[command(about = "Solve a Binairo/Takuzu grid")]
struct Args {
    /// Path to the grid file; reads stdin when omitted.
    file: Option<PathBuf>,

    /// Minimum-Remaining-Values variable ordering.
    #[arg(long)]
    mrv: bool,

    /// Degree variable ordering (MRV tie-breaker when both are set).
    #[arg(long)]
    degree: bool,

    /// Least-Constraining-Value value ordering.
    #[arg(long)]
    lcv: bool,

    /// Forward Checking propagation.
    #[arg(long)]
    forward_checking: bool,

    /// AC-3 arc-consistency propagation.
    #[arg(long)]
    arc_consistency: bool,

    /// Wall-clock budget in milliseconds.
    #[arg(long)]
    time_limit_ms: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path).expect("failed to read grid file"),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .expect("failed to read stdin");
            buf
        }
    };
    let puzzle: Grid = text.parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    let config = SolverConfig {
        use_mrv: args.mrv,
        use_degree: args.degree,
        use_lcv: args.lcv,
        use_forward_checking: args.forward_checking,
        use_arc_consistency: args.arc_consistency,
        shuffle_values: false,
        time_limit: args.time_limit_ms.map(Duration::from_millis),
    };

    let mut solver = BacktrackingSolver::new(BinairoRules, config);
    let (solution, stats) = solver.solve(puzzle);

    match solution {
        Some(grid) => print!("{}", grid),
        None => println!("No solution."),
    }
    println!(
        "nodes: {}  backtracks: {}  time: {:.4}s",
        stats.nodes_explored,
        stats.backtracks,
        stats.elapsed_seconds()
    );
}
