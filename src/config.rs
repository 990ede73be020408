//! solver configuration (spec §6): the numeric knobs exposed as optional overrides,
//! layered over the chosen [`crate::variant::Variant`]'s own defaults — the same
//! override-over-default pattern the teacher crate uses for per-query config layered
//! over workspace defaults.

use serde::{Deserialize, Serialize};

use crate::variant::Variant;

/// base iteration budget and per-unit scaling factors used before any connection or
/// crossing counts are known.
const DEFAULT_BASE_MAX_ITERATIONS: u64 = 10_000;
const DEFAULT_PER_CONNECTION: u64 = 200;
const DEFAULT_PER_CROSSING: u64 = 50;

/// optional overrides for a [`crate::driver::Solver`] (spec §6). Every field defaults to
/// the chosen variant's built-in value (or, for the iteration-budget fields, to the
/// constants above) when left `None`.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct SolverConfig {
    pub greedy_multiplier: Option<f64>,
    pub rip_cost: Option<f64>,
    pub port_usage_penalty: Option<f64>,
    pub port_usage_penalty_sq: Option<f64>,
    pub crossing_penalty: Option<f64>,
    pub crossing_penalty_sq: Option<f64>,
    pub base_max_iterations: Option<u64>,
    pub additional_max_iterations_per_connection: Option<u64>,
    pub additional_max_iterations_per_crossing: Option<u64>,
    pub ripping_enabled: Option<bool>,
}

impl SolverConfig {
    /// overwrites `variant`'s fields with every override this config sets.
    pub fn apply_to(&self, variant: &mut Variant) {
        if let Some(v) = self.greedy_multiplier {
            variant.greedy_multiplier = v;
        }
        if let Some(v) = self.rip_cost {
            variant.rip_cost = v;
        }
        if let Some(v) = self.port_usage_penalty {
            variant.port_usage_penalty = v;
        }
        if let Some(v) = self.port_usage_penalty_sq {
            variant.port_usage_penalty_sq = v;
        }
        if let Some(v) = self.crossing_penalty {
            variant.crossing_penalty = v;
        }
        if let Some(v) = self.crossing_penalty_sq {
            variant.crossing_penalty_sq = v;
        }
        if let Some(v) = self.ripping_enabled {
            variant.ripping_enabled = v;
        }
    }

    /// the per-solve iteration budget (spec §4.5/§4.7): `base + perConnection·|connections|
    /// + perCrossing·inputCrossings`.
    pub fn max_iterations(&self, n_connections: usize, input_crossings: usize) -> u64 {
        let base = self.base_max_iterations.unwrap_or(DEFAULT_BASE_MAX_ITERATIONS);
        let per_connection = self
            .additional_max_iterations_per_connection
            .unwrap_or(DEFAULT_PER_CONNECTION);
        let per_crossing = self
            .additional_max_iterations_per_crossing
            .unwrap_or(DEFAULT_PER_CROSSING);
        base + per_connection * n_connections as u64 + per_crossing * input_crossings as u64
    }
}
