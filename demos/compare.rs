//! Compare heuristic configurations on one grid, in the style of the
//! classic BT / MRV / MRV+FC / MRV+LCV / MRV+AC3 table.
//!
//! ```text
//! cargo run --example compare -- puzzle.txt
//! cargo run --example compare -- --json
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use binairo::puzzle::{grid::Grid, rules::BinairoRules};
use binairo::solver::{
    config::SolverConfig,
    engine::BacktrackingSolver,
    stats::{render_comparison_table, ComparisonRow},
};

/// A moderately constrained 8x8 start used when no file is given.
const DEFAULT_PUZZLE: &str = "0..1010.\n1.10.01.\n..1.100.\n100.0.1.\n\
                              .011..10\n1.0.100.\n..11..1.\n.10.1.0.";

#[derive(Parser)]
#[command(about = "Compare solver configurations on one Binairo grid")]
struct Args {
    /// Path to the grid file; a built-in 8x8 board when omitted.
    file: Option<PathBuf>,

    /// Emit the rows as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn configurations() -> Vec<(&'static str, SolverConfig)> {
    let base = SolverConfig::default();
    vec![
        ("BT Simple", base.clone()),
        (
            "MRV",
            SolverConfig {
                use_mrv: true,
                ..base.clone()
            },
        ),
        (
            "MRV+FC",
            SolverConfig {
                use_mrv: true,
                use_forward_checking: true,
                ..base.clone()
            },
        ),
        (
            "MRV+LCV",
            SolverConfig {
                use_mrv: true,
                use_lcv: true,
                ..base.clone()
            },
        ),
        (
            "MRV+AC3",
            SolverConfig {
                use_mrv: true,
                use_arc_consistency: true,
                ..base
            },
        ),
    ]
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path).expect("failed to read grid file"),
        None => DEFAULT_PUZZLE.to_string(),
    };
    let puzzle: Grid = text.parse().unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    let mut rows = Vec::new();
    for (label, config) in configurations() {
        let mut solver = BacktrackingSolver::new(BinairoRules, config);
        let (solution, stats) = solver.solve(puzzle.clone());
        rows.push(ComparisonRow {
            label: label.to_string(),
            solved: solution.is_some(),
            stats,
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows).unwrap());
    } else {
        print!("{}", render_comparison_table(&rows));
    }
}
