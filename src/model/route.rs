use crate::ids::{ConnectionId, PortId, RegionId};
use crate::model::assignment::AssignmentKey;

/// a read-only snapshot of a [`crate::model::candidate::Candidate`], detached from its
/// arena so it can outlive the per-connection search and be returned to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateSnapshot {
    pub port: PortId,
    pub next_region: RegionId,
    pub g: f64,
    pub h: f64,
    pub f: f64,
    pub hops: u32,
    pub last_port: Option<PortId>,
    pub last_region: Option<RegionId>,
    pub rip_required: bool,
}

/// the solved output for one [`crate::model::connection::Connection`] (spec §3/§6): the
/// ordered path of candidates from start to end, the assignments committed along the
/// way, and whether a rip-up was required to find it.
#[derive(Clone, Debug)]
pub struct SolvedRoute {
    pub connection: ConnectionId,
    pub path: Vec<CandidateSnapshot>,
    pub required_rip: bool,
    /// the assignment keys committed for this route, in root-to-goal order; retained so
    /// a later rip-up cascade can detach exactly this route's assignments (spec §4.6).
    pub assignments: Vec<AssignmentKey>,
}

impl SolvedRoute {
    /// ordered port sequence of the route, the externally-visible result (spec §1).
    pub fn ports(&self) -> Vec<PortId> {
        self.path.iter().map(|c| c.port).collect()
    }
}
