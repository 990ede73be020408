use std::cell::RefCell;
use std::collections::HashMap;

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::ids::{PortId, RegionId};
use crate::model::region::CoordDto;

/// a point on the shared boundary of exactly two regions. Routes hop from region to
/// region by crossing ports (spec §3/GLOSSARY).
#[derive(Clone, Debug)]
pub struct Port {
    pub port_id: PortId,
    pub region1: RegionId,
    pub region2: RegionId,
    pub position: Coord<f64>,
    /// monotonically-increasing rip counter, incremented every time an assignment using
    /// this port is ripped up (spec §3, §4.6).
    pub rip_count: u32,
    /// cached perimeter-T for this port on each of its two regions, keyed by region id
    /// (a port only ever needs an entry for `region1` and `region2`).
    perimeter_t_cache: RefCell<HashMap<RegionId, f64>>,
    /// cached minimum hop distance to a given end region, lazily populated once per end
    /// region by the BFS heuristic map (spec §4.8) and never invalidated.
    distance_to_end_cache: RefCell<HashMap<RegionId, u32>>,
}

impl Port {
    pub fn new(port_id: PortId, region1: RegionId, region2: RegionId, position: Coord<f64>) -> Self {
        Port {
            port_id,
            region1,
            region2,
            position,
            rip_count: 0,
            perimeter_t_cache: RefCell::new(HashMap::new()),
            distance_to_end_cache: RefCell::new(HashMap::new()),
        }
    }

    /// the region this port bridges that is not `from`. panics if `from` is neither of
    /// this port's two regions, which would indicate a malformed graph elsewhere.
    pub fn other_region(&self, from: RegionId) -> RegionId {
        if from == self.region1 {
            self.region2
        } else if from == self.region2 {
            self.region1
        } else {
            panic!(
                "port {} touches regions {} and {}, not {from}",
                self.port_id, self.region1, self.region2
            )
        }
    }

    pub fn touches(&self, region: RegionId) -> bool {
        self.region1 == region || self.region2 == region
    }

    pub fn cached_perimeter_t(&self, region: RegionId) -> Option<f64> {
        self.perimeter_t_cache.borrow().get(&region).copied()
    }

    pub fn cache_perimeter_t(&self, region: RegionId, t: f64) {
        self.perimeter_t_cache.borrow_mut().insert(region, t);
    }

    pub fn cached_distance_to_end(&self, end_region: RegionId) -> Option<u32> {
        self.distance_to_end_cache.borrow().get(&end_region).copied()
    }

    pub fn cache_distance_to_end(&self, end_region: RegionId, distance: u32) {
        self.distance_to_end_cache
            .borrow_mut()
            .insert(end_region, distance);
    }
}

/// serialized form of a [`Port`], referencing its regions by id (spec §4.1/§6).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SerializedPort {
    pub port_id: usize,
    pub region1_id: usize,
    pub region2_id: usize,
    pub position: CoordDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_region_returns_the_far_side() {
        let p = Port::new(
            PortId(0),
            RegionId(1),
            RegionId(2),
            Coord { x: 0.0, y: 0.0 },
        );
        assert_eq!(p.other_region(RegionId(1)), RegionId(2));
        assert_eq!(p.other_region(RegionId(2)), RegionId(1));
    }

    #[test]
    #[should_panic(expected = "touches regions")]
    fn other_region_panics_on_region_it_does_not_touch() {
        let p = Port::new(PortId(0), RegionId(1), RegionId(2), Coord { x: 0.0, y: 0.0 });
        p.other_region(RegionId(99));
    }

    #[test]
    fn perimeter_t_cache_round_trips() {
        let p = Port::new(PortId(0), RegionId(1), RegionId(2), Coord { x: 0.0, y: 0.0 });
        assert_eq!(p.cached_perimeter_t(RegionId(1)), None);
        p.cache_perimeter_t(RegionId(1), 3.5);
        assert_eq!(p.cached_perimeter_t(RegionId(1)), Some(3.5));
        assert_eq!(p.cached_perimeter_t(RegionId(2)), None);
    }
}
