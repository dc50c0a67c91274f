//! Puzzle generation: a randomized full-board search followed by hole
//! punching.
//!
//! The driver consumes the engine through its public surface only and may
//! be swapped out freely; what it must respect are the grid invariants when
//! un-assigning cells (counters decremented, cell emptied, domain reset),
//! which [`Grid::clear`] guarantees.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::{Error, Result};
use crate::puzzle::{grid::Grid, rules::BinairoRules};
use crate::solver::{config::SolverConfig, engine::BacktrackingSolver};

/// Tuning knobs for the generator: 10 attempts of 5 seconds each and 60 %
/// of the cells removed, unless overridden.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Side length of the board; must be positive and even.
    pub size: usize,
    /// Fraction of cells to clear from the solved board, in `[0, 1)`.
    pub holes_fraction: f64,
    /// How many randomized solve attempts before giving up.
    pub max_attempts: u32,
    /// Wall-clock budget per attempt, to escape pathological branches.
    pub attempt_budget: Duration,
}

impl GeneratorConfig {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            holes_fraction: 0.6,
            max_attempts: 10,
            attempt_budget: Duration::from_secs(5),
        }
    }
}

/// A generated puzzle together with the full board it was punched from.
/// The solution is kept for hinting and preview.
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    pub puzzle: Grid,
    pub solution: Grid,
}

pub struct Generator {
    rng: ChaCha8Rng,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// A generator with a fixed seed, for reproducible boards.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generates a puzzle: solves an empty board with the randomized
    /// generation configuration (MRV + Degree + Forward Checking, shuffled
    /// values), retrying under a per-attempt time budget, then removes
    /// `floor(n² · holes_fraction)` cells at random coordinates.
    pub fn generate(&mut self, config: &GeneratorConfig) -> Result<GeneratedPuzzle> {
        let n = config.size;
        if !(0.0..1.0).contains(&config.holes_fraction) {
            return Err(Error::InvalidHolesFraction(config.holes_fraction));
        }
        let empty = Grid::new(n)?;

        let solver_config =
            SolverConfig::generation().with_time_limit(config.attempt_budget);

        let mut solution = None;
        for attempt in 1..=config.max_attempts {
            let seed = self.rng.gen();
            let mut solver =
                BacktrackingSolver::with_seed(BinairoRules, solver_config.clone(), seed);
            let (result, stats) = solver.solve(empty.clone());
            debug!(
                attempt,
                solved = result.is_some(),
                nodes = stats.nodes_explored,
                elapsed_s = stats.elapsed_seconds(),
                "generation attempt"
            );
            if let Some(full) = result {
                solution = Some(full);
                break;
            }
        }
        let solution = solution.ok_or(Error::GenerationFailed {
            attempts: config.max_attempts,
            budget: config.attempt_budget,
        })?;

        let mut puzzle = solution.clone();
        let holes = ((n * n) as f64 * config.holes_fraction) as usize;
        let mut removed = 0;
        while removed < holes {
            let row = self.rng.gen_range(0..n);
            let col = self.rng.gen_range(0..n);
            if !puzzle.is_empty_cell(row, col) {
                puzzle.clear(row, col);
                removed += 1;
            }
        }

        Ok(GeneratedPuzzle { puzzle, solution })
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}
