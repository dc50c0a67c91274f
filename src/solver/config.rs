use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Heuristic and propagation toggles for one solver run.
///
/// A config is an immutable value handed to the solver at construction; two
/// solvers never share mutable toggle state, so repeated or interleaved
/// runs stay independent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Minimum-Remaining-Values variable ordering.
    pub use_mrv: bool,
    /// Degree variable ordering (tie-breaker when combined with MRV).
    pub use_degree: bool,
    /// Least-Constraining-Value value ordering.
    pub use_lcv: bool,
    /// Forward Checking after each assignment.
    pub use_forward_checking: bool,
    /// Full arc consistency after each assignment. Takes precedence over
    /// Forward Checking when both are set.
    pub use_arc_consistency: bool,
    /// Shuffle value order when LCV is off. This is what diversifies
    /// randomized full-board generation; leave it off for deterministic
    /// solving.
    pub shuffle_values: bool,
    /// Wall-clock budget, checked once per search node. On expiry the
    /// search unwinds and returns no solution, indistinguishable from
    /// exhaustion except through the statistics.
    pub time_limit: Option<Duration>,
}

impl SolverConfig {
    /// The configuration used for randomized full-board generation:
    /// MRV + Degree + Forward Checking, shuffled values, no LCV, no AC-3
    /// (too costly to initialize on large empty boards).
    pub fn generation() -> Self {
        Self {
            use_mrv: true,
            use_degree: true,
            use_forward_checking: true,
            shuffle_values: true,
            ..Self::default()
        }
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_runs_plain_backtracking() {
        let config = SolverConfig::default();
        assert!(!config.use_mrv);
        assert!(!config.use_degree);
        assert!(!config.use_lcv);
        assert!(!config.use_forward_checking);
        assert!(!config.use_arc_consistency);
        assert!(!config.shuffle_values);
        assert!(config.time_limit.is_none());
    }

    #[test]
    fn generation_preset_matches_the_driver_contract() {
        let config = SolverConfig::generation();
        assert!(config.use_mrv && config.use_degree && config.use_forward_checking);
        assert!(config.shuffle_values);
        assert!(!config.use_lcv && !config.use_arc_consistency);
    }

    #[test]
    fn round_trips_through_json() {
        let config = SolverConfig::generation().with_time_limit(Duration::from_secs(5));
        let text = serde_json::to_string(&config).unwrap();
        let back: SolverConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back, config);
    }
}
