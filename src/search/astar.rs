//! per-connection best-first expansion (spec §4.5). One [`AStarEngine`] is built per
//! connection and discarded once that connection commits or fails, taking its candidate
//! arena with it (spec §9: "free the arena after the connection commits").

use log::trace;

use crate::chord_engine;
use crate::ids::{NetId, PortId};
use crate::model::candidate::{Candidate, CandidateArena, CandidateIndex};
use crate::model::connection::Connection;
use crate::model::Hypergraph;
use crate::queue::CandidateQueue;
use crate::variant::Variant;

/// the result of a single [`AStarEngine::step`] call.
#[derive(Debug)]
pub enum StepOutcome {
    /// the dequeued candidate was expanded into its children.
    Expanded,
    /// the dequeued candidate referenced a since-ripped assignment and was discarded.
    Stale,
    /// the dequeued candidate's `next_region` is the connection's end region.
    Solved(CandidateIndex),
    /// the queue emptied without reaching the end region.
    QueueEmpty,
}

pub struct AStarEngine {
    pub connection: Connection,
    arena: CandidateArena,
    queue: CandidateQueue,
    next_seq: u64,
}

impl AStarEngine {
    pub fn new(connection: Connection) -> Self {
        AStarEngine {
            connection,
            arena: CandidateArena::new(),
            queue: CandidateQueue::new(),
            next_seq: 0,
        }
    }

    pub fn arena(&self) -> &CandidateArena {
        &self.arena
    }

    pub fn candidate(&self, idx: CandidateIndex) -> &Candidate {
        self.arena.get(idx)
    }

    pub fn path_to(&self, idx: CandidateIndex) -> Vec<CandidateIndex> {
        self.arena.path_to(idx)
    }

    pub fn queue_peek(&self, k: usize) -> Vec<CandidateIndex> {
        self.queue.peek_many(k)
    }

    fn next_insertion_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// enqueues the root candidate(s) (spec §4.5's "Initialization"). A trivial
    /// connection (start region == end region, spec §3/§8) gets a single root candidate
    /// already sitting at the end region, so the very next [`Self::step`] call solves it
    /// with no expansion and no assignment. A non-trivial connection gets one root
    /// candidate per port incident to the start region — the source's "the start
    /// region's connection port" assumes exactly one such port (the synthetic
    /// start/end-region case, spec §9's Open Questions); enqueuing all of them
    /// generalizes cleanly to start regions with more than one port.
    pub fn initialize(&mut self, graph: &Hypergraph, variant: &Variant) -> Vec<CandidateIndex> {
        self.arena.clear();
        self.queue.clear();
        self.next_seq = 0;
        let start = self.connection.start_region;
        let end = self.connection.end_region;

        if self.connection.is_trivial() {
            let region = graph.region(start).expect("start region exists");
            let port = region.ports.first().copied().unwrap_or(PortId(usize::MAX));
            let seq = self.next_insertion_seq();
            let root = Candidate::root(port, start, 0.0, 0.0, 0.0, seq);
            let idx = self.arena.push(root);
            self.queue.enqueue(idx, 0.0, 0.0, 0, seq);
            return vec![idx];
        }

        let region = graph.region(start).expect("start region exists");
        let mut roots = Vec::with_capacity(region.ports.len());
        for &port_id in &region.ports {
            let port = graph.port(port_id).expect("incident port exists");
            let next_region = port.other_region(start);
            let h = variant.estimate_cost_to_end(graph, port_id, end);
            let f = variant.greedy_multiplier * h;
            let seq = self.next_insertion_seq();
            let root = Candidate::root(port_id, next_region, 0.0, h, f, seq);
            let idx = self.arena.push(root);
            self.queue.enqueue(idx, f, h, 0, seq);
            roots.push(idx);
        }
        roots
    }

    /// whether `candidate`'s rip context is stale: some port in its recorded rip set has
    /// a higher rip counter now than when the candidate was enqueued (spec §4.5's
    /// "Staleness").
    fn is_stale(&self, graph: &Hypergraph, candidate: &Candidate) -> bool {
        candidate.rip_counters_at_enqueue.iter().any(|(port_id, recorded)| {
            graph
                .port(*port_id)
                .map(|p| p.rip_count > *recorded)
                .unwrap_or(true)
        })
    }

    /// pops the min-`f` candidate and either reports it solved, discards it as stale, or
    /// expands it into its children (spec §4.5's "Iteration"). Returns [`StepOutcome::QueueEmpty`]
    /// if the frontier is exhausted.
    pub fn step(&mut self, graph: &Hypergraph, variant: &Variant, net: NetId) -> StepOutcome {
        let idx = match self.queue.dequeue() {
            Some(i) => i,
            None => return StepOutcome::QueueEmpty,
        };
        let candidate = self.arena.get(idx).clone();
        if self.is_stale(graph, &candidate) {
            return StepOutcome::Stale;
        }
        if candidate.next_region == self.connection.end_region {
            return StepOutcome::Solved(idx);
        }
        self.expand(graph, variant, net, idx, &candidate);
        StepOutcome::Expanded
    }

    /// expands `candidate` (spec §4.5's "Otherwise, expand" steps 1-6): one child per
    /// port of `candidate.next_region` other than the port just used to enter it.
    fn expand(&mut self, graph: &Hypergraph, variant: &Variant, net: NetId, idx: CandidateIndex, candidate: &Candidate) {
        let region = graph
            .region(candidate.next_region)
            .expect("candidate.next_region is always a valid region id");
        for &p_out in &region.ports {
            if p_out == candidate.port {
                continue;
            }
            let region_cost =
                variant.region_cost_if_ports_used(graph, region, candidate.port, p_out, net);
            let mut step_cost = variant.step_cost(graph, candidate.port, p_out) + region_cost;

            let rip_required =
                variant.is_rip_required_for_port_usage(graph, region, candidate.port, p_out, net);
            let mut rip_set = Vec::new();
            let mut rip_counters_at_enqueue = Vec::new();
            if rip_required {
                step_cost += variant.rip_cost;
                for assignment in
                    variant.rips_required_for_port_usage(graph, region, candidate.port, p_out, net)
                {
                    rip_set.push(assignment.key());
                    let p1 = graph.port(assignment.port1).expect("assignment port exists");
                    let p2 = graph.port(assignment.port2).expect("assignment port exists");
                    rip_counters_at_enqueue.push((assignment.port1, p1.rip_count));
                    rip_counters_at_enqueue.push((assignment.port2, p2.rip_count));
                }
            }

            let new_region = graph
                .port(p_out)
                .expect("p_out is incident to candidate.next_region")
                .other_region(candidate.next_region);
            let new_g = candidate.g + step_cost;
            let new_h = variant.estimate_cost_to_end(graph, p_out, self.connection.end_region);
            let new_f = new_g + variant.greedy_multiplier * new_h;
            let new_hops = candidate.hops + 1;
            let seq = self.next_insertion_seq();

            let mut child = Candidate::root(p_out, new_region, new_g, new_h, new_f, seq);
            child.hops = new_hops;
            child.parent = Some(idx);
            child.last_port = Some(candidate.port);
            child.last_region = Some(candidate.next_region);
            child.rip_required = rip_required;
            child.rip_set = rip_set;
            child.rip_counters_at_enqueue = rip_counters_at_enqueue;

            let child_idx = self.arena.push(child);
            self.queue.enqueue(child_idx, new_f, new_h, new_hops, seq);
            trace!(
                "expanded candidate {:?} -> port {p_out:?} into region {new_region:?}: g={new_g:.3} h={new_h:.3} f={new_f:.3} rip_required={rip_required}",
                idx,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ConnectionId, NetId, RegionId};
    use crate::model::graph::test_fixtures::two_regions_one_port;

    #[test]
    fn trivial_connection_solves_on_first_step_with_no_expansion() {
        let graph = Hypergraph::hydrate(two_regions_one_port()).unwrap();
        let connection = Connection::new(ConnectionId(0), NetId(0), RegionId(0), RegionId(0));
        let mut engine = AStarEngine::new(connection);
        engine.initialize(&graph, &Variant::jumper());
        let outcome = engine.step(&graph, &Variant::jumper(), NetId(0));
        assert!(matches!(outcome, StepOutcome::Solved(_)));
    }

    #[test]
    fn two_region_connection_solves_after_one_expansion() {
        let graph = Hypergraph::hydrate(two_regions_one_port()).unwrap();
        let connection = Connection::new(ConnectionId(0), NetId(0), RegionId(0), RegionId(1));
        let variant = Variant::jumper();
        let mut engine = AStarEngine::new(connection);
        engine.initialize(&graph, &variant);
        let outcome = engine.step(&graph, &variant, NetId(0));
        assert!(matches!(outcome, StepOutcome::Solved(_)));
        if let StepOutcome::Solved(idx) = outcome {
            let path = engine.path_to(idx);
            assert_eq!(path.len(), 1);
            assert_eq!(engine.candidate(idx).port, crate::ids::PortId(0));
        }
    }
}
