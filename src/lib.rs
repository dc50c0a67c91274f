//! A backtracking constraint-satisfaction solver and generator for
//! Binairo/Takuzu puzzles.
//!
//! The crate is split into a generic solver backend and a puzzle-specific
//! frontend:
//!
//! - **[`RuleOracle`]**: the trait a puzzle implements to tell the engine
//!   what is legal, what is complete, and how to propagate an assignment.
//! - **[`BacktrackingSolver`]**: the depth-first engine. Variable ordering
//!   (MRV, Degree), value ordering (LCV or shuffled), and propagation
//!   (Forward Checking or AC-3 arc consistency) are all selected through an
//!   immutable [`SolverConfig`].
//! - **[`Grid`] / [`BinairoRules`]**: the Binairo frontend — a bitmask
//!   domain per cell, parity counters per row and column, and the triple,
//!   parity and uniqueness rules.
//!
//! The engine returns the *first* solution found, or `None` when the
//! position is unsatisfiable or the configured time budget runs out.
//!
//! # Example
//!
//! ```
//! use binairo::puzzle::{grid::Grid, rules::BinairoRules};
//! use binairo::solver::{config::SolverConfig, engine::BacktrackingSolver};
//!
//! let puzzle: Grid = "01..\n10..\n..11\n..00".parse().unwrap();
//!
//! let config = SolverConfig {
//!     use_mrv: true,
//!     use_forward_checking: true,
//!     ..SolverConfig::default()
//! };
//! let mut solver = BacktrackingSolver::new(BinairoRules, config);
//! let (solution, stats) = solver.solve(puzzle);
//!
//! let solution = solution.expect("this puzzle is satisfiable");
//! assert_eq!(solution.assigned_cells(), 16);
//! assert!(stats.nodes_explored >= 1);
//! ```
//!
//! [`RuleOracle`]: solver::oracle::RuleOracle
//! [`BacktrackingSolver`]: solver::engine::BacktrackingSolver
//! [`SolverConfig`]: solver::config::SolverConfig
//! [`Grid`]: puzzle::grid::Grid
//! [`BinairoRules`]: puzzle::rules::BinairoRules

pub mod error;
pub mod puzzle;
pub mod solver;
