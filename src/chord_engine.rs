//! the per-region chord-crossing detector (spec §4.3): given a region and a candidate
//! port pair, counts and lists the existing assignments that conflict with it. Via
//! regions (`region.flags.is_via_region`) are exclusive rather than chord-ordered: any
//! different-net assignment counts as a conflict regardless of geometry.

use crate::geometry::chord_crosses;
use crate::ids::{NetId, PortId};
use crate::model::{Assignment, Hypergraph, Port, Region};

/// counts existing assignments in `region` whose owning connection's net differs from
/// `current_net` and whose chord crosses `(p1, p2)` (spec §4.3). For via regions, every
/// different-net assignment counts, regardless of whether its chord geometrically
/// crosses `(p1, p2)`.
pub fn count_crossings_with_other_nets(
    graph: &Hypergraph,
    region: &Region,
    p1: &Port,
    p2: &Port,
    current_net: NetId,
) -> usize {
    conflicting_assignments(graph, region, p1, p2, current_net).len()
}

/// the assignments that conflict with the candidate chord `(p1, p2)` under `current_net`
/// (spec §4.3): different-net assignments whose chord crosses it, or — for via regions —
/// every different-net assignment in the region.
pub fn conflicting_assignments<'a>(
    graph: &Hypergraph,
    region: &'a Region,
    p1: &Port,
    p2: &Port,
    current_net: NetId,
) -> Vec<&'a Assignment> {
    if region.flags.is_via_region {
        region.other_net_assignments(current_net).collect()
    } else {
        region
            .other_net_assignments(current_net)
            .filter(|a| {
                let ap1 = graph.port(a.port1).expect("assignment ports exist");
                let ap2 = graph.port(a.port2).expect("assignment ports exist");
                chord_crosses(region, p1, p2, ap1, ap2)
            })
            .collect()
    }
}

/// the assignments whose chord crosses `(p1, p2)`, in insertion order, irrespective of
/// net (spec §4.3's `listCrossingAssignments`). Used by introspection and by callers that
/// want the raw geometric relation rather than the net-filtered conflict set.
pub fn list_crossing_assignments<'a>(
    graph: &Hypergraph,
    region: &'a Region,
    p1: &Port,
    p2: &Port,
) -> Vec<&'a Assignment> {
    region
        .assignments
        .iter()
        .filter(|a| {
            let ap1 = graph.port(a.port1).expect("assignment ports exist");
            let ap2 = graph.port(a.port2).expect("assignment ports exist");
            chord_crosses(region, p1, p2, ap1, ap2)
        })
        .collect()
}

/// a static, pre-search count of geometrically-crossing port pairs, per region, across
/// the whole graph — independent of nets or committed assignments. Feeds the
/// `perCrossing` term of the iteration budget (spec §4.5/§4.7's `inputCrossings`),
/// computed once at solver construction.
pub fn count_static_geometric_crossings(graph: &Hypergraph) -> usize {
    use itertools::Itertools;

    let mut total = 0;
    for region_id in graph.region_ids() {
        let region = graph.region(region_id).expect("region id in bounds");
        let chords: Vec<(PortId, PortId)> = region
            .ports
            .iter()
            .copied()
            .tuple_combinations()
            .collect();
        for (chord_a, chord_b) in chords.iter().tuple_combinations() {
            let (a, b) = *chord_a;
            let (c, d) = *chord_b;
            if a == c || a == d || b == c || b == d {
                continue;
            }
            let pa = graph.port(a).expect("incident port exists");
            let pb = graph.port(b).expect("incident port exists");
            let pc = graph.port(c).expect("incident port exists");
            let pd = graph.port(d).expect("incident port exists");
            if chord_crosses(region, pa, pb, pc, pd) {
                total += 1;
            }
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ConnectionId, PortId, RegionId};
    use crate::model::graph::test_fixtures::square_with_hub;
    use crate::model::{Assignment, RegionFlags};

    fn hub_with_ab_assignment() -> (Hypergraph, RegionId) {
        let mut graph = Hypergraph::hydrate(square_with_hub()).unwrap();
        let hub = RegionId(4);
        graph
            .region_mut(hub)
            .unwrap()
            .assignments
            .push(Assignment::new(
                hub,
                PortId(0),
                PortId(2),
                ConnectionId(0),
                NetId(0),
            ));
        (graph, hub)
    }

    #[test]
    fn jumper_region_counts_only_geometric_crossings() {
        let (graph, hub) = hub_with_ab_assignment();
        let region = graph.region(hub).unwrap();
        let p1 = graph.port(PortId(1)).unwrap();
        let p3 = graph.port(PortId(3)).unwrap();
        // B-D crosses A-C in the square hub arrangement.
        let count = count_crossings_with_other_nets(&graph, region, p1, p3, NetId(1));
        assert_eq!(count, 1);
    }

    #[test]
    fn same_net_assignments_never_count_as_conflicts() {
        let (graph, hub) = hub_with_ab_assignment();
        let region = graph.region(hub).unwrap();
        let p1 = graph.port(PortId(1)).unwrap();
        let p3 = graph.port(PortId(3)).unwrap();
        let count = count_crossings_with_other_nets(&graph, region, p1, p3, NetId(0));
        assert_eq!(count, 0);
    }

    #[test]
    fn via_region_counts_every_other_net_assignment_regardless_of_geometry() {
        let mut graph = Hypergraph::hydrate(square_with_hub()).unwrap();
        let hub = RegionId(4);
        graph.region_mut(hub).unwrap().flags = RegionFlags {
            is_via_region: true,
            ..RegionFlags::default()
        };
        graph
            .region_mut(hub)
            .unwrap()
            .assignments
            .push(Assignment::new(
                hub,
                PortId(0),
                PortId(1),
                ConnectionId(0),
                NetId(0),
            ));
        let region = graph.region(hub).unwrap();
        // A-B does not geometrically cross C-D, but via-exclusivity ignores geometry.
        let p2 = graph.port(PortId(2)).unwrap();
        let p3 = graph.port(PortId(3)).unwrap();
        let count = count_crossings_with_other_nets(&graph, region, p2, p3, NetId(1));
        assert_eq!(count, 1);
    }
}
