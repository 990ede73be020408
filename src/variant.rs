//! variant policies (spec §4.9): the jumper and via hypergraphs share one solver core but
//! differ in heuristic, penalty, and exclusivity rules. Modeled as a sealed tagged union
//! rather than a trait object, per the "struct of function pointers or sealed tagged
//! union" guidance — there are exactly two variants and neither is user-extensible.

use crate::chord_engine;
use crate::heuristic;
use crate::ids::{NetId, PortId, RegionId};
use crate::model::{Assignment, Hypergraph, Region};

/// the unit expansion cost is measured in, per variant (spec §4.9).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnitOfCost {
    Hops,
    Distance,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VariantKind {
    Jumper,
    Via,
}

/// the numeric knobs and the `UNIT_OF_COST` selection a variant carries (spec §4.9,
/// §6). Overridable per-field by [`crate::config::SolverConfig`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Variant {
    pub kind: VariantKind,
    pub unit_of_cost: UnitOfCost,
    pub greedy_multiplier: f64,
    pub rip_cost: f64,
    pub crossing_penalty: f64,
    pub crossing_penalty_sq: f64,
    pub port_usage_penalty: f64,
    pub port_usage_penalty_sq: f64,
    pub ripping_enabled: bool,
}

impl Variant {
    /// the jumper variant (spec §4.9): distance units, zero penalties by default,
    /// rip-up enabled, chord-crossing as the conflict metric.
    pub fn jumper() -> Self {
        Variant {
            kind: VariantKind::Jumper,
            unit_of_cost: UnitOfCost::Distance,
            greedy_multiplier: 1.0,
            rip_cost: 50.0,
            crossing_penalty: 0.0,
            crossing_penalty_sq: 0.0,
            port_usage_penalty: 0.0,
            port_usage_penalty_sq: 0.0,
            ripping_enabled: true,
        }
    }

    /// the via variant (spec §4.9): hop units, BFS heuristic, non-zero crossing penalty,
    /// via-region exclusivity layered on top of chord-crossing.
    pub fn via() -> Self {
        Variant {
            kind: VariantKind::Via,
            unit_of_cost: UnitOfCost::Hops,
            greedy_multiplier: 1.0,
            rip_cost: 50.0,
            crossing_penalty: 10.0,
            crossing_penalty_sq: 5.0,
            port_usage_penalty: 1.0,
            port_usage_penalty_sq: 0.0,
            ripping_enabled: true,
        }
    }

    /// `estimateCostToEnd(port)` (spec §4.8/§4.9): BFS hop distance for hop-unit variants,
    /// Euclidean distance to the end region's center for distance-unit variants.
    pub fn estimate_cost_to_end(&self, graph: &Hypergraph, port_id: PortId, end_region: RegionId) -> f64 {
        heuristic::ensure_distance_map(graph, end_region);
        match self.unit_of_cost {
            UnitOfCost::Hops => heuristic::distance_to_end(graph, port_id, end_region) as f64,
            UnitOfCost::Distance => {
                let port = graph.port(port_id).expect("port exists");
                let end = graph.region(end_region).expect("end region exists");
                let dx = port.position.x - end.center.x;
                let dy = port.position.y - end.center.y;
                (dx * dx + dy * dy).sqrt()
            }
        }
    }

    /// `stepCost` (spec §4.5 step 3): one hop, or Euclidean distance between the two
    /// ports, depending on `unit_of_cost`.
    pub fn step_cost(&self, graph: &Hypergraph, from_port: PortId, to_port: PortId) -> f64 {
        match self.unit_of_cost {
            UnitOfCost::Hops => 1.0,
            UnitOfCost::Distance => {
                let a = graph.port(from_port).expect("port exists");
                let b = graph.port(to_port).expect("port exists");
                let dx = a.position.x - b.position.x;
                let dy = a.position.y - b.position.y;
                (dx * dx + dy * dy).sqrt()
            }
        }
    }

    /// `getPortUsagePenalty(port)` (spec §4.9): resolved as a quadratic in the port's
    /// current usage count (the number of committed assignments, across both of its
    /// regions, that reference it) — `penalty·usage + penaltySq·usage²`.
    pub fn port_usage_penalty(&self, graph: &Hypergraph, port_id: PortId) -> f64 {
        let port = graph.port(port_id).expect("port exists");
        let r1 = graph.region(port.region1).expect("region exists");
        let r2 = graph.region(port.region2).expect("region exists");
        let usage = r1.assignments.iter().filter(|a| a.uses_port(port_id)).count()
            + r2.assignments.iter().filter(|a| a.uses_port(port_id)).count();
        let usage = usage as f64;
        self.port_usage_penalty * usage + self.port_usage_penalty_sq * usage * usage
    }

    /// `computeRegionCostIfPortsUsed(region, p1, p2)` (spec §4.5 steps 1-2, §4.9):
    /// crossing count against other nets, priced quadratically, plus the entry port's
    /// usage penalty.
    pub fn region_cost_if_ports_used(
        &self,
        graph: &Hypergraph,
        region: &Region,
        p1: PortId,
        p2: PortId,
        current_net: NetId,
    ) -> f64 {
        let port1 = graph.port(p1).expect("port exists");
        let port2 = graph.port(p2).expect("port exists");
        let crossings =
            chord_engine::count_crossings_with_other_nets(graph, region, port1, port2, current_net) as f64;
        crossings * self.crossing_penalty
            + crossings * crossings * self.crossing_penalty_sq
            + self.port_usage_penalty(graph, p2)
    }

    /// `isRipRequiredForPortUsage(region, p1, p2)` (spec §4.9): whether committing the
    /// candidate chord `(p1, p2)` would conflict with an existing different-net
    /// assignment — chord-crossing for jumper regions, any different-net occupancy for
    /// via regions (spec §4.3).
    pub fn is_rip_required_for_port_usage(
        &self,
        graph: &Hypergraph,
        region: &Region,
        p1: PortId,
        p2: PortId,
        current_net: NetId,
    ) -> bool {
        if !self.ripping_enabled {
            return false;
        }
        let port1 = graph.port(p1).expect("port exists");
        let port2 = graph.port(p2).expect("port exists");
        !chord_engine::conflicting_assignments(graph, region, port1, port2, current_net).is_empty()
    }

    /// `getRipsRequiredForPortUsage(region, p1, p2)` (spec §4.9): the exact assignments
    /// that would need ripping to admit the candidate chord.
    pub fn rips_required_for_port_usage(
        &self,
        graph: &Hypergraph,
        region: &Region,
        p1: PortId,
        p2: PortId,
        current_net: NetId,
    ) -> Vec<Assignment> {
        let port1 = graph.port(p1).expect("port exists");
        let port2 = graph.port(p2).expect("port exists");
        chord_engine::conflicting_assignments(graph, region, port1, port2, current_net)
            .into_iter()
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jumper_uses_distance_units_and_via_uses_hops() {
        assert_eq!(Variant::jumper().unit_of_cost, UnitOfCost::Distance);
        assert_eq!(Variant::via().unit_of_cost, UnitOfCost::Hops);
    }

    #[test]
    fn via_carries_nonzero_crossing_penalty_by_default() {
        assert!(Variant::via().crossing_penalty > 0.0);
        assert_eq!(Variant::jumper().crossing_penalty, 0.0);
    }
}
