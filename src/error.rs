use std::time::Duration;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while constructing or generating puzzles.
///
/// Search failure is never an error: an unsolvable (or timed-out) search
/// returns `None` from the solver, and propagation failure is a plain
/// `false`. Everything here is rejected before any grid state exists.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("grid size must be a positive even number, got {0}")]
    InvalidSize(usize),

    #[error("holes fraction must be in [0, 1), got {0}")]
    InvalidHolesFraction(f64),

    #[error("malformed grid text: {0}")]
    MalformedGrid(String),

    #[error("generation failed after {attempts} attempts ({budget:?} per attempt)")]
    GenerationFailed { attempts: u32, budget: Duration },
}
