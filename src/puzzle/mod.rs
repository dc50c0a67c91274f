//! The Binairo/Takuzu frontend: grid state, rule oracle, and the puzzle
//! generator.

pub mod generate;
pub mod grid;
pub mod rules;
