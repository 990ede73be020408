use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SolverError;
use crate::ids::{ConnectionId, NetId, RegionId};

/// an external routing request: connect `start_region` to `end_region`. Connections are
/// never mutated by the solver (spec §3).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub connection_id: ConnectionId,
    pub net_id: NetId,
    pub start_region: RegionId,
    pub end_region: RegionId,
}

impl Connection {
    pub fn new(connection_id: ConnectionId, net_id: NetId, start_region: RegionId, end_region: RegionId) -> Self {
        Connection {
            connection_id,
            net_id,
            start_region,
            end_region,
        }
    }

    pub fn is_trivial(&self) -> bool {
        self.start_region == self.end_region
    }
}

/// serialized form of a [`Connection`], referencing its regions by id (spec §4.1/§6).
/// `mutually_connected_network_id` defaults to the connection's own id when omitted,
/// matching the source's behavior of treating an un-grouped connection as its own net.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SerializedConnection {
    pub connection_id: usize,
    pub mutually_connected_network_id: Option<usize>,
    pub start_region_id: usize,
    pub end_region_id: usize,
}

impl From<SerializedConnection> for Connection {
    fn from(sc: SerializedConnection) -> Self {
        let net_id = NetId(sc.mutually_connected_network_id.unwrap_or(sc.connection_id));
        Connection::new(
            ConnectionId(sc.connection_id),
            net_id,
            RegionId(sc.start_region_id),
            RegionId(sc.end_region_id),
        )
    }
}

/// hydrates serialized ID-referencing connections into [`Connection`]s (spec §2 component
/// #8, §4.1/§6). Region references are left unvalidated here — [`crate::driver::Solver::new`]
/// checks them against the hydrated graph and reports [`SolverError::MissingRegion`] — but a
/// repeated `connection_id` within the input itself is rejected immediately.
pub fn hydrate_connections(serialized: Vec<SerializedConnection>) -> Result<Vec<Connection>, SolverError> {
    let mut seen = HashSet::with_capacity(serialized.len());
    let mut connections = Vec::with_capacity(serialized.len());
    for sc in serialized {
        let connection_id = ConnectionId(sc.connection_id);
        if !seen.insert(connection_id) {
            return Err(SolverError::InvalidConnection(
                connection_id,
                "duplicate connection_id in serialized input".to_string(),
            ));
        }
        connections.push(Connection::from(sc));
    }
    Ok(connections)
}
