use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::solver::{
    config::SolverConfig, heuristics, oracle::RuleOracle, stats::SearchStats,
};

/// Depth-first backtracking search over a [`RuleOracle`].
///
/// Each recursive call owns a private deep copy of the state, so a failed
/// branch is dropped and nothing is ever undone. The engine returns the
/// first solution found; it never enumerates alternatives.
///
/// The search is purely sequential. Its only interruption mechanism is the
/// configured wall-clock budget, checked once per node: on expiry every
/// enclosing call unwinds with no solution, which at the API boundary looks
/// exactly like exhaustion. The [`SearchStats`] are the only way to tell
/// the two apart.
pub struct BacktrackingSolver<O: RuleOracle> {
    oracle: O,
    config: SolverConfig,
    rng: ChaCha8Rng,
}

impl<O: RuleOracle> BacktrackingSolver<O> {
    pub fn new(oracle: O, config: SolverConfig) -> Self {
        Self {
            oracle,
            config,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Like [`new`](Self::new) but with a fixed RNG seed, for reproducible
    /// shuffled-value runs.
    pub fn with_seed(oracle: O, config: SolverConfig, seed: u64) -> Self {
        Self {
            oracle,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Runs the search from `initial`.
    ///
    /// `None` means no solution was found: either the position is
    /// unsatisfiable as constrained, or the time budget expired first.
    pub fn solve(&mut self, initial: O::State) -> (Option<O::State>, SearchStats) {
        let mut stats = SearchStats::default();
        let started = Instant::now();
        let result = self.search(initial, started, &mut stats);
        stats.elapsed = started.elapsed();
        debug!(
            solved = result.is_some(),
            nodes = stats.nodes_explored,
            backtracks = stats.backtracks,
            elapsed_s = stats.elapsed_seconds(),
            "search finished"
        );
        (result, stats)
    }

    fn search(
        &mut self,
        mut state: O::State,
        started: Instant,
        stats: &mut SearchStats,
    ) -> Option<O::State> {
        stats.nodes_explored += 1;

        if let Some(limit) = self.config.time_limit {
            if started.elapsed() > limit {
                return None;
            }
        }

        if self.oracle.is_complete(&state) {
            return Some(state);
        }

        // Dead end: nothing left to assign but the state is incomplete.
        let var = heuristics::select_variable(&self.oracle, &state, &self.config)?;
        let values =
            heuristics::order_values(&self.oracle, &mut state, var, &self.config, &mut self.rng);

        for value in values {
            // Local rules first: an illegal value is skipped outright, no
            // clone and no node.
            if !self.oracle.is_legal(&state, var, value) {
                continue;
            }

            let mut child = state.clone();
            self.oracle.apply(&mut child, var, value);

            if self.config.use_arc_consistency {
                if !self.oracle.enforce_arc_consistency(&mut child) {
                    stats.backtracks += 1;
                    continue;
                }
            } else if self.config.use_forward_checking {
                if !self.oracle.forward_check(&mut child, var) {
                    stats.backtracks += 1;
                    continue;
                }
            }

            if let Some(found) = self.search(child, started, stats) {
                return Some(found);
            }
            stats.backtracks += 1;
        }

        None
    }
}
