//! commit and rip-up controller (spec §4.6): turns a solved candidate path into
//! committed [`Assignment`]s, ripping any conflicting prior assignments (and every
//! downstream assignment of their owning connections) atomically before appending the
//! new ones.

use std::collections::HashSet;

use crate::error::SolverError;
use crate::ids::ConnectionId;
use crate::model::assignment::AssignmentKey;
use crate::model::candidate::{CandidateArena, CandidateIndex};
use crate::model::route::{CandidateSnapshot, SolvedRoute};
use crate::model::{Assignment, Hypergraph};

fn snapshot(arena: &CandidateArena, idx: CandidateIndex) -> CandidateSnapshot {
    let c = arena.get(idx);
    CandidateSnapshot {
        port: c.port,
        next_region: c.next_region,
        g: c.g,
        h: c.h,
        f: c.f,
        hops: c.hops,
        last_port: c.last_port,
        last_region: c.last_region,
        rip_required: c.rip_required,
    }
}

/// commits `path` (root-to-goal candidate indices) as the solved route for
/// `connection`/`net_id`. Performs the full rip cascade before appending any new
/// assignment (spec §4.6: "must not re-enter during commit; queue rip actions and apply
/// once"). Returns the committed route and the set of connections reopened by the
/// cascade, which the driver must requeue.
pub fn commit_path(
    graph: &mut Hypergraph,
    arena: &CandidateArena,
    path: &[CandidateIndex],
    connection_id: ConnectionId,
    net_id: crate::ids::NetId,
) -> Result<(SolvedRoute, Vec<ConnectionId>), SolverError> {
    let mut rip_keys: HashSet<AssignmentKey> = HashSet::new();
    for window in path.windows(2) {
        let next = arena.get(window[1]);
        if next.rip_required {
            rip_keys.extend(next.rip_set.iter().copied());
        }
    }

    // find the connections that directly own the conflicting assignments, then cascade
    // to every other assignment those connections hold anywhere in the graph (spec
    // §4.6: "rip every downstream assignment of the same connection").
    let mut reopened: HashSet<ConnectionId> = HashSet::new();
    let mut owners: HashSet<ConnectionId> = HashSet::new();
    for key in &rip_keys {
        let region = graph.region(key.region)?;
        if let Some(assignment) = region.assignments.iter().find(|a| a.key() == *key) {
            if assignment.connection != connection_id {
                owners.insert(assignment.connection);
            }
        }
    }
    for &owner in &owners {
        for region_id in graph.region_ids() {
            let region = graph.region(region_id)?;
            for assignment in region.assignments.iter().filter(|a| a.connection == owner) {
                rip_keys.insert(assignment.key());
            }
        }
        reopened.insert(owner);
    }

    for key in &rip_keys {
        let region = graph.region_mut(key.region)?;
        let before = region.assignments.len();
        region.assignments.retain(|a| a.key() != *key);
        if region.assignments.len() == before {
            return Err(SolverError::InternalInvariant(format!(
                "rip target {key:?} not found in region {}",
                key.region
            )));
        }
        graph.port_mut(key.port1)?.rip_count += 1;
        graph.port_mut(key.port2)?.rip_count += 1;
    }

    let mut committed = Vec::new();
    for window in path.windows(2) {
        let next = arena.get(window[1]);
        let region_id = next.last_region.ok_or_else(|| {
            SolverError::InternalInvariant("non-root path candidate missing last_region".into())
        })?;
        let p_in = next.last_port.ok_or_else(|| {
            SolverError::InternalInvariant("non-root path candidate missing last_port".into())
        })?;
        let p_out = next.port;
        let assignment = Assignment::new(region_id, p_in, p_out, connection_id, net_id);
        graph.region_mut(region_id)?.assignments.push(assignment);
        committed.push(assignment.key());
    }

    let required_rip = path.iter().any(|&idx| arena.get(idx).rip_required);
    let snapshots = path.iter().map(|&idx| snapshot(arena, idx)).collect();

    Ok((
        SolvedRoute {
            connection: connection_id,
            path: snapshots,
            required_rip,
            assignments: committed,
        },
        reopened.into_iter().collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{NetId, PortId, RegionId};
    use crate::model::candidate::Candidate;
    use crate::model::graph::test_fixtures::two_regions_one_port;

    #[test]
    fn trivial_path_commits_no_assignments() {
        let mut graph = Hypergraph::hydrate(two_regions_one_port()).unwrap();
        let mut arena = CandidateArena::new();
        let idx = arena.push(Candidate::root(PortId(0), RegionId(0), 0.0, 0.0, 0.0, 0));
        let (route, reopened) =
            commit_path(&mut graph, &arena, &[idx], ConnectionId(0), NetId(0)).unwrap();
        assert!(route.assignments.is_empty());
        assert!(reopened.is_empty());
    }

    #[test]
    fn two_candidate_path_commits_one_assignment_in_the_transit_region() {
        let mut graph = Hypergraph::hydrate(two_regions_one_port()).unwrap();
        let mut arena = CandidateArena::new();
        let root = arena.push(Candidate::root(PortId(0), RegionId(0), 0.0, 1.0, 1.0, 0));
        let mut child = Candidate::root(PortId(0), RegionId(1), 1.0, 0.0, 1.0, 1);
        child.parent = Some(root);
        child.last_region = Some(RegionId(0));
        child.last_port = Some(PortId(0));
        let child_idx = arena.push(child);
        let path = arena.path_to(child_idx);
        let (route, _) = commit_path(&mut graph, &arena, &path, ConnectionId(0), NetId(0)).unwrap();
        assert_eq!(route.assignments.len(), 1);
        assert_eq!(graph.region(RegionId(0)).unwrap().assignments.len(), 1);
    }
}
