use crate::ids::{ConnectionId, NetId, PortId, RegionId};

/// a committed chord in a region, owned by one connection (spec §3/GLOSSARY). `net_id`
/// is denormalized from the owning connection so the chord-crossing engine can filter by
/// net without a connection-table lookup on every candidate expansion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub region: RegionId,
    pub port1: PortId,
    pub port2: PortId,
    pub connection: ConnectionId,
    pub net_id: NetId,
}

impl Assignment {
    pub fn new(
        region: RegionId,
        port1: PortId,
        port2: PortId,
        connection: ConnectionId,
        net_id: NetId,
    ) -> Self {
        Assignment {
            region,
            port1,
            port2,
            connection,
            net_id,
        }
    }

    /// whether this assignment uses either of the two given ports.
    pub fn uses_port(&self, port: PortId) -> bool {
        self.port1 == port || self.port2 == port
    }

    /// an [`Assignment`] is identified (for rip-up bookkeeping) by its region and the
    /// unordered pair of ports it connects.
    pub fn key(&self) -> AssignmentKey {
        AssignmentKey {
            region: self.region,
            port1: self.port1,
            port2: self.port2,
        }
    }
}

/// a region/port-pair identity for an assignment, used by the rip-up controller to name
/// assignments to remove without holding a live reference into a region's assignment
/// list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssignmentKey {
    pub region: RegionId,
    pub port1: PortId,
    pub port2: PortId,
}
