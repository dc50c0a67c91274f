//! Variable- and value-ordering heuristics, dispatched from the solver
//! configuration.
//!
//! Variable selection is a single left-to-right scan over the candidates.
//! With MRV and Degree combined, degree is evaluated lazily: only for the
//! candidate that establishes a new domain-size minimum or exactly ties the
//! current one. Earlier ties are never re-ranked, so the winner among equal
//! candidates depends on scan order; that behavior is deliberate and pinned
//! by tests, since it shapes the search tree.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::solver::{config::SolverConfig, oracle::RuleOracle};

/// Picks the next variable to branch on, or `None` at a dead end.
pub fn select_variable<O: RuleOracle>(
    oracle: &O,
    state: &O::State,
    config: &SolverConfig,
) -> Option<O::Variable> {
    let candidates = oracle.unassigned_variables(state);

    if !config.use_mrv && !config.use_degree {
        return candidates.first().copied();
    }

    let mut best: Option<O::Variable> = None;
    let mut min_domain = usize::MAX;
    let mut best_degree: Option<usize> = None;

    for var in candidates {
        let domain_size = if config.use_mrv {
            oracle.domain_size(state, var)
        } else {
            0
        };

        let update = if config.use_mrv && config.use_degree {
            if domain_size < min_domain {
                min_domain = domain_size;
                best_degree = Some(oracle.degree(state, var));
                true
            } else if domain_size == min_domain {
                let degree = oracle.degree(state, var);
                if best_degree.map_or(true, |d| degree > d) {
                    best_degree = Some(degree);
                    true
                } else {
                    false
                }
            } else {
                false
            }
        } else if config.use_mrv {
            if domain_size < min_domain {
                min_domain = domain_size;
                true
            } else {
                false
            }
        } else {
            let degree = oracle.degree(state, var);
            if best_degree.map_or(true, |d| degree > d) {
                best_degree = Some(degree);
                true
            } else {
                false
            }
        };

        if update {
            best = Some(var);
        }
    }

    best
}

/// Orders the values to try for `var`.
///
/// Natural ascending order by default; shuffled when the solver is set up
/// for randomized generation (and LCV is off); with LCV, stable-sorted by
/// how many neighbor options each value would eliminate, least first.
///
/// The state is mutably borrowed because the LCV metric makes a trial
/// placement; it is restored before this returns.
pub fn order_values<O: RuleOracle, R: Rng>(
    oracle: &O,
    state: &mut O::State,
    var: O::Variable,
    config: &SolverConfig,
    rng: &mut R,
) -> Vec<O::Value> {
    let mut values = oracle.domain_values(state, var);

    if config.use_lcv {
        let mut scored: Vec<(usize, O::Value)> = values
            .into_iter()
            .map(|value| (oracle.count_constraints(state, var, value), value))
            .collect();
        scored.sort_by_key(|(score, _)| *score);
        values = scored.into_iter().map(|(_, value)| value).collect();
    } else if config.shuffle_values {
        values.shuffle(rng);
    }

    values
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::puzzle::{
        grid::{Bit, Coord, Grid},
        rules::BinairoRules,
    };

    fn mrv() -> SolverConfig {
        SolverConfig {
            use_mrv: true,
            ..SolverConfig::default()
        }
    }

    #[test]
    fn without_heuristics_picks_first_in_row_major_order() {
        let state: Grid = "01..\n....\n....\n....".parse().unwrap();
        let var = select_variable(&BinairoRules, &state, &SolverConfig::default());
        assert_eq!(var, Some(Coord::new(0, 2)));
    }

    #[test]
    fn mrv_prefers_the_narrowest_domain() {
        let mut state: Grid = "......\n......\n......\n......\n......\n......".parse().unwrap();
        state.remove_from_domain(3, 4, Bit::Zero);
        let var = select_variable(&BinairoRules, &state, &mrv());
        assert_eq!(var, Some(Coord::new(3, 4)));
    }

    #[test]
    fn degree_alone_prefers_the_most_connected_cell() {
        // Rows 1..4 are full, so (0, x) and (5, x) cells see few empty
        // neighbors in their columns; every empty cell in row 0 has the
        // same degree, so the scan keeps the first.
        let state: Grid = "......\n010101\n101010\n011010\n100101\n......".parse().unwrap();
        let config = SolverConfig {
            use_degree: true,
            ..SolverConfig::default()
        };
        let var = select_variable(&BinairoRules, &state, &config);
        assert_eq!(var, Some(Coord::new(0, 0)));
    }

    #[test]
    fn mrv_degree_tie_break_keeps_earlier_candidate_on_equal_degree() {
        // All cells empty with full domains: every candidate ties on domain
        // size and on degree, so the very first scanned cell wins.
        let state = Grid::new(4).unwrap();
        let config = SolverConfig {
            use_mrv: true,
            use_degree: true,
            ..SolverConfig::default()
        };
        let var = select_variable(&BinairoRules, &state, &config);
        assert_eq!(var, Some(Coord::new(0, 0)));
    }

    #[test]
    fn mrv_degree_tie_break_switches_on_strictly_larger_degree() {
        // Fill row 1 and column 1 so cell (0, 0) loses two neighbors while
        // (2, 2) and beyond keep more; all domains are still {0, 1}.
        let state: Grid = "..0...\n0101..\n..1...\n..0...\n..1...\n......".parse().unwrap();
        let config = SolverConfig {
            use_mrv: true,
            use_degree: true,
            ..SolverConfig::default()
        };
        let rules = BinairoRules;
        let chosen = select_variable(&rules, &state, &config).unwrap();
        // The chosen cell must carry the maximum degree among the earliest
        // minimum-domain candidates of the scan.
        let expected_degree = rules.degree(&state, chosen);
        for var in rules.unassigned_variables(&state) {
            assert!(rules.degree(&state, var) <= expected_degree);
        }
    }

    #[test]
    fn lcv_orders_least_constraining_value_first() {
        // Row 0 holds two 1s already: placing another 1 at (0, 4) is more
        // constraining for the row neighbors than placing a 0.
        let mut state: Grid = "1.1...\n......\n......\n......\n......\n......".parse().unwrap();
        let config = SolverConfig {
            use_lcv: true,
            ..SolverConfig::default()
        };
        let rules = BinairoRules;
        let var = Coord::new(0, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let before = state.clone();
        let values = order_values(&rules, &mut state, var, &config, &mut rng);
        assert_eq!(state, before, "LCV scoring must restore the state");
        let scores: Vec<usize> = values
            .iter()
            .map(|&v| rules.count_constraints(&mut state, var, v))
            .collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn natural_order_is_ascending_and_shuffle_keeps_the_same_values() {
        let mut state = Grid::new(4).unwrap();
        let rules = BinairoRules;
        let var = Coord::new(0, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let natural = order_values(&rules, &mut state, var, &SolverConfig::default(), &mut rng);
        assert_eq!(natural, vec![Bit::Zero, Bit::One]);

        let config = SolverConfig {
            shuffle_values: true,
            ..SolverConfig::default()
        };
        let shuffled = order_values(&rules, &mut state, var, &config, &mut rng);
        let mut sorted = shuffled.clone();
        sorted.sort();
        assert_eq!(sorted, vec![Bit::Zero, Bit::One]);
    }
}
