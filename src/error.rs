use crate::ids::{ConnectionId, PortId, RegionId};

/// error taxonomy for the hypergraph router, split into construction-time failures
/// (returned directly to the caller) and runtime failures (recorded on the
/// [`crate::driver::Solver`] as `failed = true` plus the retained error, per spec §7).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("malformed graph: {0}")]
    MalformedGraph(String),

    #[error("connection {0} references region {1} which is not present in the graph")]
    MissingRegion(ConnectionId, RegionId),

    #[error("invalid connection {0}: {1}")]
    InvalidConnection(ConnectionId, String),

    #[error("iteration budget exhausted after {iterations} iterations (limit {limit})")]
    BudgetExhausted { iterations: u64, limit: u64 },

    #[error("no path exists for connection {0}: candidate queue exhausted")]
    UnreachableGoal(ConnectionId),

    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

impl SolverError {
    /// ports referenced by a malformed-graph error, when known, for diagnostics.
    pub fn involving_port(port: PortId, reason: &str) -> Self {
        SolverError::MalformedGraph(format!("port {port}: {reason}"))
    }
}
