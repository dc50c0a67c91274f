//! The generic search backend: a backtracking engine over a [`RuleOracle`],
//! with configuration-driven heuristics and propagation.
//!
//! [`RuleOracle`]: oracle::RuleOracle

pub mod config;
pub mod engine;
pub mod heuristics;
pub mod oracle;
pub mod stats;
pub mod work_list;
