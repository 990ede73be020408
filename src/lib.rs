//! Hypergraph routing engine: an A*-style best-first search across a planar hypergraph
//! of regions joined by shared-boundary ports, with per-region chord-crossing conflict
//! detection and rip-up/reroute backtracking.
//!
//! Two graph variants share this one core solver: a "jumper" graph whose interior
//! regions may host at most one net at a time per chord-ordering, and a "via" graph
//! whose via-regions are exclusive to a single net outright. See [`variant::Variant`].
//!
//! The crate consumes an already-built hypergraph ([`model::Hypergraph`]) and a list of
//! [`model::Connection`]s; it does not generate topology, load datasets, or render
//! anything — those are the responsibility of callers.

pub mod chord_engine;
pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod heuristic;
pub mod ids;
pub mod model;
pub mod queue;
pub mod search;
pub mod variant;

pub use config::SolverConfig;
pub use driver::Solver;
pub use error::SolverError;
pub use model::{Connection, Hypergraph, SerializedConnection, SerializedGraph, SolvedRoute};
pub use variant::Variant;

/// initializes `env_logger` from the `RUST_LOG` environment variable. Intended for
/// binaries and examples embedding this crate; the library itself never initializes
/// logging on its own (spec §5: no global state, no side effects outside a solver
/// instance).
pub fn init_logging() {
    let _ = env_logger::try_init();
}
