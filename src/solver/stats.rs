use std::time::Duration;

use prettytable::{Cell, Row, Table};
use serde::Serialize;

/// Counters observable after a `solve` call.
///
/// A timed-out search and a certified-unsatisfiable search both return no
/// solution; these counters are the only way to tell them apart post hoc
/// (a timeout shows the elapsed time pinned at the budget, exhaustion
/// usually does not).
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    /// Search nodes entered, including the root and nodes cut by the time
    /// budget.
    pub nodes_explored: u64,
    /// Candidate values that failed to lead to a solution.
    pub backtracks: u64,
    /// Wall-clock time of the whole call.
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// One line of an algorithm-comparison run.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub label: String,
    pub solved: bool,
    pub stats: SearchStats,
}

/// Renders comparison rows as a text table.
pub fn render_comparison_table(rows: &[ComparisonRow]) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Configuration"),
        Cell::new("Solved"),
        Cell::new("Nodes"),
        Cell::new("Backtracks"),
        Cell::new("Time (s)"),
    ]));

    for row in rows {
        table.add_row(Row::new(vec![
            Cell::new(&row.label),
            Cell::new(if row.solved { "yes" } else { "no" }),
            Cell::new(&row.stats.nodes_explored.to_string()),
            Cell::new(&row.stats.backtracks.to_string()),
            Cell::new(&format!("{:.4}", row.stats.elapsed_seconds())),
        ]));
    }

    table.to_string()
}
