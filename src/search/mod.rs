//! the per-connection A* search engine (spec §4.5) and its commit/rip-up controller
//! (spec §4.6).

pub mod astar;
pub mod ripup;

pub use astar::{AStarEngine, StepOutcome};
