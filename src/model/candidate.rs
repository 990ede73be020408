use crate::ids::{PortId, RegionId};
use crate::model::assignment::AssignmentKey;

/// index of a [`Candidate`] within a per-connection [`CandidateArena`]. Serves as the
/// parent pointer described in spec §3/§9: candidates form a tree rooted at the
/// connection's start, with parent stored as an arena index rather than a pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CandidateIndex(pub usize);

/// a search-node record (spec §3). `port` is the port just used to exit `last_region`
/// and enter `next_region` (or, for the root candidate, the start region's connection
/// port into the first transited region). `next_region` is the region this candidate
/// will expand from when dequeued.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub port: PortId,
    pub next_region: RegionId,
    pub g: f64,
    pub h: f64,
    pub f: f64,
    pub hops: u32,
    pub parent: Option<CandidateIndex>,
    pub last_port: Option<PortId>,
    pub last_region: Option<RegionId>,
    pub rip_required: bool,
    /// the assignments that would need ripping if this candidate is accepted, recorded
    /// at enqueue time so they can be applied atomically on commit (spec §4.6).
    pub rip_set: Vec<AssignmentKey>,
    /// the rip counter observed on each port in `rip_set` at the moment this candidate
    /// was enqueued, used to detect staleness on dequeue (spec §4.5).
    pub rip_counters_at_enqueue: Vec<(PortId, u32)>,
    pub insertion_seq: u64,
}

impl Candidate {
    #[allow(clippy::too_many_arguments)]
    pub fn root(port: PortId, next_region: RegionId, g: f64, h: f64, f: f64, insertion_seq: u64) -> Self {
        Candidate {
            port,
            next_region,
            g,
            h,
            f,
            hops: 0,
            parent: None,
            last_port: None,
            last_region: None,
            rip_required: false,
            rip_set: Vec::new(),
            rip_counters_at_enqueue: Vec::new(),
            insertion_seq,
        }
    }
}

/// an arena of [`Candidate`]s for a single connection's search, freed (dropped) once the
/// connection completes or fails (spec §9).
#[derive(Default)]
pub struct CandidateArena {
    nodes: Vec<Candidate>,
}

impl CandidateArena {
    pub fn new() -> Self {
        CandidateArena { nodes: Vec::new() }
    }

    pub fn push(&mut self, candidate: Candidate) -> CandidateIndex {
        let idx = CandidateIndex(self.nodes.len());
        self.nodes.push(candidate);
        idx
    }

    pub fn get(&self, idx: CandidateIndex) -> &Candidate {
        &self.nodes[idx.0]
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// walks the parent chain from `goal` back to the root, returning candidates in
    /// root-to-goal (visit) order.
    pub fn path_to(&self, goal: CandidateIndex) -> Vec<CandidateIndex> {
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(parent) = self.get(current).parent {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
}
