use std::cell::RefCell;
use std::collections::HashSet;

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::error::SolverError;
use crate::ids::{PortId, RegionId};
use crate::model::port::{Port, SerializedPort};
use crate::model::region::{Boundary, Region, RegionFlags};

/// the hydrated hypergraph of regions joined by ports (spec §1/§3). Regions and ports
/// live in index-addressed arenas; `RegionId`/`PortId` are indices into them, which
/// breaks the region<->port reference cycle for ownership purposes (spec §9).
#[derive(Debug)]
pub struct Hypergraph {
    regions: Vec<Region>,
    ports: Vec<Port>,
    /// end regions for which the BFS distance map (spec §4.8) has already been computed
    /// and written into the relevant ports' caches.
    heuristic_computed: RefCell<HashSet<RegionId>>,
}

/// serialized form of a region, referencing no other entity by id (spec §4.1/§6).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SerializedRegion {
    pub region_id: usize,
    pub boundary: Boundary,
    #[serde(default)]
    pub flags: RegionFlags,
}

/// the serialized ID-form accepted by [`Hypergraph::hydrate`] (spec §4.1/§6).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SerializedGraph {
    pub regions: Vec<SerializedRegion>,
    pub ports: Vec<SerializedPort>,
}

impl Hypergraph {
    /// builds a hypergraph from an already-hydrated set of regions and ports, validating
    /// the same invariants hydration would (spec §3: every port's two regions exist,
    /// region1 != region2). Used for programmatic construction and for the idempotence
    /// property (hydrating an already-hydrated graph yields an equivalent graph).
    pub fn from_parts(mut regions: Vec<Region>, mut ports: Vec<Port>) -> Result<Self, SolverError> {
        regions.sort_by_key(|r| r.region_id.0);
        ports.sort_by_key(|p| p.port_id.0);
        for (idx, r) in regions.iter().enumerate() {
            if r.region_id.0 != idx {
                return Err(SolverError::MalformedGraph(format!(
                    "region ids must be dense and zero-based; found gap at index {idx}"
                )));
            }
        }
        for (idx, p) in ports.iter().enumerate() {
            if p.port_id.0 != idx {
                return Err(SolverError::MalformedGraph(format!(
                    "port ids must be dense and zero-based; found gap at index {idx}"
                )));
            }
            if p.region1 == p.region2 {
                return Err(SolverError::involving_port(
                    p.port_id,
                    "region1 and region2 must differ",
                ));
            }
            if p.region1.0 >= regions.len() || p.region2.0 >= regions.len() {
                return Err(SolverError::involving_port(p.port_id, "references an unknown region"));
            }
        }
        // rebuild incidence lists fresh so duplicated hydration is idempotent rather than
        // append-accumulating.
        for r in regions.iter_mut() {
            r.ports.clear();
        }
        for p in ports.iter() {
            regions[p.region1.0].ports.push(p.port_id);
            regions[p.region2.0].ports.push(p.port_id);
        }
        Ok(Hypergraph {
            regions,
            ports,
            heuristic_computed: RefCell::new(HashSet::new()),
        })
    }

    /// hydrates a serialized ID-referencing graph into pointer-linked (index-linked)
    /// structures with back-references, per spec §4.1: two passes, regions first (with
    /// empty incidence lists), then ports (with direct region references, appending
    /// themselves to each region's incidence list). Missing referents fail with
    /// [`SolverError::MalformedGraph`].
    pub fn hydrate(serialized: SerializedGraph) -> Result<Self, SolverError> {
        let mut by_id: Vec<Option<SerializedRegion>> = Vec::new();
        for r in serialized.regions {
            let idx = r.region_id;
            if by_id.len() <= idx {
                by_id.resize_with(idx + 1, || None);
            }
            by_id[idx] = Some(r);
        }
        let mut regions: Vec<Region> = Vec::with_capacity(by_id.len());
        for (idx, slot) in by_id.into_iter().enumerate() {
            let sr = slot.ok_or_else(|| {
                SolverError::MalformedGraph(format!("region id {idx} has no definition"))
            })?;
            regions.push(Region::new(RegionId(sr.region_id), sr.boundary, sr.flags));
        }

        let mut by_port_id: Vec<Option<SerializedPort>> = Vec::new();
        for p in serialized.ports {
            let idx = p.port_id;
            if by_port_id.len() <= idx {
                by_port_id.resize_with(idx + 1, || None);
            }
            by_port_id[idx] = Some(p);
        }
        let mut ports: Vec<Port> = Vec::with_capacity(by_port_id.len());
        for (idx, slot) in by_port_id.into_iter().enumerate() {
            let sp = slot.ok_or_else(|| {
                SolverError::MalformedGraph(format!("port id {idx} has no definition"))
            })?;
            let r1 = RegionId(sp.region1_id);
            let r2 = RegionId(sp.region2_id);
            if r1 == r2 {
                return Err(SolverError::involving_port(
                    PortId(sp.port_id),
                    "region1 and region2 must differ",
                ));
            }
            if r1.0 >= regions.len() {
                return Err(SolverError::MalformedGraph(format!(
                    "port {} references unknown region {}",
                    sp.port_id, sp.region1_id
                )));
            }
            if r2.0 >= regions.len() {
                return Err(SolverError::MalformedGraph(format!(
                    "port {} references unknown region {}",
                    sp.port_id, sp.region2_id
                )));
            }
            let position: Coord<f64> = sp.position.into();
            ports.push(Port::new(PortId(sp.port_id), r1, r2, position));
        }

        for p in ports.iter() {
            regions[p.region1.0].ports.push(p.port_id);
            regions[p.region2.0].ports.push(p.port_id);
        }

        Ok(Hypergraph {
            regions,
            ports,
            heuristic_computed: RefCell::new(HashSet::new()),
        })
    }

    /// produces the serialized ID-form of this (already hydrated) graph, used to verify
    /// hydration's idempotence: `hydrate(graph.to_serialized())` is equivalent to `graph`.
    pub fn to_serialized(&self) -> SerializedGraph {
        let regions = self
            .regions
            .iter()
            .map(|r| SerializedRegion {
                region_id: r.region_id.0,
                boundary: r.boundary.clone(),
                flags: r.flags,
            })
            .collect();
        let ports = self
            .ports
            .iter()
            .map(|p| SerializedPort {
                port_id: p.port_id.0,
                region1_id: p.region1.0,
                region2_id: p.region2.0,
                position: p.position.into(),
            })
            .collect();
        SerializedGraph { regions, ports }
    }

    pub fn region(&self, id: RegionId) -> Result<&Region, SolverError> {
        self.regions
            .get(id.0)
            .ok_or_else(|| SolverError::MalformedGraph(format!("region {id} not found")))
    }

    pub fn region_mut(&mut self, id: RegionId) -> Result<&mut Region, SolverError> {
        self.regions
            .get_mut(id.0)
            .ok_or_else(|| SolverError::MalformedGraph(format!("region {id} not found")))
    }

    pub fn port(&self, id: PortId) -> Result<&Port, SolverError> {
        self.ports
            .get(id.0)
            .ok_or_else(|| SolverError::MalformedGraph(format!("port {id} not found")))
    }

    pub fn port_mut(&mut self, id: PortId) -> Result<&mut Port, SolverError> {
        self.ports
            .get_mut(id.0)
            .ok_or_else(|| SolverError::MalformedGraph(format!("port {id} not found")))
    }

    pub fn n_regions(&self) -> usize {
        self.regions.len()
    }

    pub fn n_ports(&self) -> usize {
        self.ports.len()
    }

    pub fn region_ids(&self) -> impl Iterator<Item = RegionId> {
        (0..self.regions.len()).map(RegionId)
    }

    pub fn ports_iter(&self) -> impl Iterator<Item = &Port> {
        self.ports.iter()
    }

    pub fn has_region(&self, id: RegionId) -> bool {
        id.0 < self.regions.len()
    }

    pub fn heuristic_computed_for(&self, end_region: RegionId) -> bool {
        self.heuristic_computed.borrow().contains(&end_region)
    }

    pub fn mark_heuristic_computed(&self, end_region: RegionId) {
        self.heuristic_computed.borrow_mut().insert(end_region);
    }
}
