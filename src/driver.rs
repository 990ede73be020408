//! the multi-connection driver (spec §4.7): orders connections, resets per-connection
//! search state, accumulates solved routes, and halts on success, failure, or budget
//! exhaustion.

use std::collections::{HashMap, HashSet, VecDeque};

use log::{debug, trace, warn};

use crate::chord_engine;
use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::ids::{ConnectionId, RegionId};
use crate::model::candidate::CandidateIndex;
use crate::model::connection::{hydrate_connections, Connection, SerializedConnection};
use crate::model::route::{CandidateSnapshot, SolvedRoute};
use crate::model::Hypergraph;
use crate::search::astar::{AStarEngine, StepOutcome};
use crate::search::ripup;
use crate::variant::Variant;

/// the hypergraph router (spec §4.7/§6): owns the graph, the connection queue, and the
/// in-flight per-connection search state. Construction validates connections against the
/// graph (spec §7); `step()`/`solve()` drive the search to completion.
pub struct Solver {
    graph: Hypergraph,
    variant: Variant,
    connections: HashMap<ConnectionId, Connection>,
    pending: VecDeque<ConnectionId>,
    pending_set: HashSet<ConnectionId>,
    solved_routes: HashMap<ConnectionId, SolvedRoute>,
    iterations: u64,
    max_iterations: u64,
    solved: bool,
    failed: bool,
    last_error: Option<SolverError>,
    current: Option<AStarEngine>,
}

impl Solver {
    /// builds a solver for `graph` and `connections` under `variant`, with `config`
    /// overrides applied on top of the variant's defaults (spec §6). Fails immediately if
    /// any connection references a region absent from the graph (spec §7's
    /// `MissingRegion`).
    pub fn new(
        graph: Hypergraph,
        connections: Vec<Connection>,
        variant: Variant,
        config: SolverConfig,
    ) -> Result<Self, SolverError> {
        for c in &connections {
            if !graph.has_region(c.start_region) {
                return Err(SolverError::MissingRegion(c.connection_id, c.start_region));
            }
            if !graph.has_region(c.end_region) {
                return Err(SolverError::MissingRegion(c.connection_id, c.end_region));
            }
        }

        let mut variant = variant;
        config.apply_to(&mut variant);

        let input_crossings = chord_engine::count_static_geometric_crossings(&graph);
        let max_iterations = config.max_iterations(connections.len(), input_crossings);
        debug!(
            "solver initialized: {} connections, {} static crossings, max_iterations={}",
            connections.len(),
            input_crossings,
            max_iterations
        );

        let pending: VecDeque<ConnectionId> = connections.iter().map(|c| c.connection_id).collect();
        let pending_set: HashSet<ConnectionId> = pending.iter().copied().collect();
        let solved = connections.is_empty();
        let connections = connections.into_iter().map(|c| (c.connection_id, c)).collect();

        Ok(Solver {
            graph,
            variant,
            connections,
            pending,
            pending_set,
            solved_routes: HashMap::new(),
            iterations: 0,
            max_iterations,
            solved,
            failed: false,
            last_error: None,
            current: None,
        })
    }

    /// builds a solver from the serialized ID-referencing connection form (spec §2
    /// component #8, §4.1/§6): `{ connectionId, mutuallyConnectedNetworkId?, startRegionId,
    /// endRegionId }`, hydrated via [`hydrate_connections`] before construction proceeds
    /// exactly as [`Self::new`].
    pub fn new_from_serialized(
        graph: Hypergraph,
        connections: Vec<SerializedConnection>,
        variant: Variant,
        config: SolverConfig,
    ) -> Result<Self, SolverError> {
        let connections = hydrate_connections(connections)?;
        Self::new(graph, connections, variant, config)
    }

    /// one expansion: pops the next pending connection if none is in flight, then
    /// advances its [`AStarEngine`] by one candidate (spec §4.5/§5). A no-op once
    /// `solved` or `failed` is set.
    pub fn step(&mut self) -> Result<(), SolverError> {
        if self.solved || self.failed {
            return Ok(());
        }
        if self.iterations >= self.max_iterations {
            warn!("iteration budget exhausted at {} iterations", self.iterations);
            self.failed = true;
            self.last_error = Some(SolverError::BudgetExhausted {
                iterations: self.iterations,
                limit: self.max_iterations,
            });
            return Ok(());
        }

        if self.current.is_none() {
            let connection_id = match self.pending.pop_front() {
                Some(id) => id,
                None => {
                    self.solved = true;
                    return Ok(());
                }
            };
            self.pending_set.remove(&connection_id);
            let connection = *self
                .connections
                .get(&connection_id)
                .expect("pending connection id always has a Connection record");
            let mut engine = AStarEngine::new(connection);
            engine.initialize(&self.graph, &self.variant);
            trace!("starting search for connection {connection_id}");
            self.current = Some(engine);
        }

        self.iterations += 1;
        let engine = self.current.as_mut().expect("just ensured Some");
        let connection = engine.connection;
        let outcome = engine.step(&self.graph, &self.variant, connection.net_id);

        match outcome {
            StepOutcome::Expanded | StepOutcome::Stale => {}
            StepOutcome::QueueEmpty => {
                warn!("connection {} unreachable: queue exhausted", connection.connection_id);
                self.failed = true;
                self.last_error = Some(SolverError::UnreachableGoal(connection.connection_id));
            }
            StepOutcome::Solved(idx) => {
                self.commit(connection, idx)?;
            }
        }
        Ok(())
    }

    fn commit(&mut self, connection: Connection, idx: CandidateIndex) -> Result<(), SolverError> {
        let engine = self.current.as_ref().expect("commit only called mid-step");
        let path = engine.path_to(idx);
        let (route, reopened) = ripup::commit_path(
            &mut self.graph,
            engine.arena(),
            &path,
            connection.connection_id,
            connection.net_id,
        )?;
        debug!(
            "connection {} solved ({} hops, required_rip={})",
            connection.connection_id,
            route.path.len(),
            route.required_rip
        );
        self.solved_routes.insert(connection.connection_id, route);

        for reopened_id in reopened {
            warn!("connection {reopened_id} ripped up, requeued");
            self.solved_routes.remove(&reopened_id);
            if self.pending_set.insert(reopened_id) {
                self.pending.push_back(reopened_id);
            }
        }

        self.current = None;
        if self.pending.is_empty() {
            self.solved = true;
        }
        Ok(())
    }

    /// runs [`Self::step`] until the solver reaches a terminal state (spec §4.7/§5).
    pub fn solve(&mut self) -> Result<(), SolverError> {
        while !self.solved && !self.failed {
            self.step()?;
        }
        Ok(())
    }

    pub fn solved(&self) -> bool {
        self.solved
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    pub fn last_error(&self) -> Option<&SolverError> {
        self.last_error.as_ref()
    }

    pub fn solved_routes(&self) -> Vec<&SolvedRoute> {
        self.solved_routes.values().collect()
    }

    pub fn graph(&self) -> &Hypergraph {
        &self.graph
    }

    /// read-only introspection (spec §4.11/§6): the connection currently being searched.
    pub fn current_connection(&self) -> Option<ConnectionId> {
        self.current.as_ref().map(|e| e.connection.connection_id)
    }

    pub fn current_end_region(&self) -> Option<RegionId> {
        self.current.as_ref().map(|e| e.connection.end_region)
    }

    /// the top-`k` queued candidates of the in-flight search, without removing them.
    pub fn peek_queue(&self, k: usize) -> Vec<CandidateSnapshot> {
        let Some(engine) = self.current.as_ref() else {
            return Vec::new();
        };
        engine
            .queue_peek(k)
            .into_iter()
            .map(|idx| {
                let c = engine.candidate(idx);
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
            })
            .collect()
    }
}
