//! the distance-to-end heuristic map (spec §4.8): unweighted BFS over the region graph,
//! run once per distinct end region and cached on each port, giving `estimateCostToEnd`
//! an admissible hop-count floor for hop-unit variants.

use std::collections::VecDeque;

use crate::ids::RegionId;
use crate::model::Hypergraph;

/// runs BFS from `end_region` over the region graph (regions as nodes, ports as edges)
/// and writes, for every port, the minimum of its two regions' hop distances to
/// `end_region` into the port's `distance_to_end_cache`. No-op if already computed for
/// this end region (spec §4.8: "lazily populated once per end region, never
/// invalidated").
pub fn ensure_distance_map(graph: &Hypergraph, end_region: RegionId) {
    if graph.heuristic_computed_for(end_region) {
        return;
    }
    let n = graph.n_regions();
    let mut dist: Vec<Option<u32>> = vec![None; n];
    if end_region.0 < n {
        dist[end_region.0] = Some(0);
        let mut frontier = VecDeque::new();
        frontier.push_back(end_region);
        while let Some(current) = frontier.pop_front() {
            let d = dist[current.0].expect("enqueued node has a distance");
            let region = graph.region(current).expect("region id in bounds");
            for &port_id in &region.ports {
                let port = graph.port(port_id).expect("incident port exists");
                let neighbor = port.other_region(current);
                if dist[neighbor.0].is_none() {
                    dist[neighbor.0] = Some(d + 1);
                    frontier.push_back(neighbor);
                }
            }
        }
    }
    for port in graph.ports_iter() {
        let d1 = dist[port.region1.0];
        let d2 = dist[port.region2.0];
        let best = match (d1, d2) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => u32::MAX,
        };
        port.cache_distance_to_end(end_region, best);
    }
    graph.mark_heuristic_computed(end_region);
}

/// the cached hop distance from `port` to `end_region`, computed by [`ensure_distance_map`].
/// Panics if the map for `end_region` has not been computed yet, a programming error in
/// the search engine rather than a user-facing condition.
pub fn distance_to_end(graph: &Hypergraph, port_id: crate::ids::PortId, end_region: RegionId) -> u32 {
    let port = graph.port(port_id).expect("port exists");
    port.cached_distance_to_end(end_region)
        .expect("distance map must be computed before querying it")
}
