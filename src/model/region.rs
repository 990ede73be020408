use std::cell::RefCell;

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::ids::{PortId, RegionId};
use crate::model::assignment::Assignment;

/// the boundary of a region: either an axis-aligned rectangle or an explicit polygon
/// vertex sequence, walked in the order given (spec §4.2).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Boundary {
    /// axis-aligned rectangle given by its min (top-left) and max (bottom-right) corners.
    Rect { min: CoordDto, max: CoordDto },
    /// a simple polygon with at least 3 vertices, walked as given.
    Polygon(Vec<CoordDto>),
}

/// serde-friendly stand-in for `geo::Coord<f64>`, which does not implement Serialize/Deserialize
/// in the version of `geo` this crate depends on.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordDto {
    pub x: f64,
    pub y: f64,
}

impl From<CoordDto> for Coord<f64> {
    fn from(c: CoordDto) -> Self {
        Coord { x: c.x, y: c.y }
    }
}

impl From<Coord<f64>> for CoordDto {
    fn from(c: Coord<f64>) -> Self {
        CoordDto { x: c.x, y: c.y }
    }
}

impl Boundary {
    /// the ordered vertex loop used for perimeter walking: for a rectangle, the four
    /// corners starting at the top-left corner, clockwise; for a polygon, the vertices
    /// exactly as given.
    pub fn vertex_loop(&self) -> Vec<Coord<f64>> {
        match self {
            Boundary::Rect { min, max } => {
                let min: Coord<f64> = (*min).into();
                let max: Coord<f64> = (*max).into();
                vec![
                    min,
                    Coord { x: max.x, y: min.y },
                    max,
                    Coord { x: min.x, y: max.y },
                ]
            }
            Boundary::Polygon(points) => points.iter().map(|p| (*p).into()).collect(),
        }
    }

    pub fn centroid(&self) -> Coord<f64> {
        let loop_pts = self.vertex_loop();
        let n = loop_pts.len() as f64;
        let sum = loop_pts
            .iter()
            .fold(Coord { x: 0.0, y: 0.0 }, |acc, p| Coord {
                x: acc.x + p.x,
                y: acc.y + p.y,
            });
        Coord {
            x: sum.x / n,
            y: sum.y / n,
        }
    }
}

/// flags describing the special roles a region may play, per spec §3's `Region` entity.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct RegionFlags {
    pub is_pad: bool,
    pub is_through_jumper: bool,
    pub is_via_region: bool,
    pub is_connection_region: bool,
}

/// the perimeter parameterization cache described in spec §4.2: edge lengths and their
/// prefix sums, lazily computed and never invalidated (the polygon never changes during
/// solving, per spec §9).
#[derive(Clone, Debug)]
pub struct PerimeterCache {
    pub edge_lengths: Vec<f64>,
    pub prefix_sums: Vec<f64>,
    pub total: f64,
}

/// a planar region: the atomic unit of routing traversal. Holds its own committed
/// assignments and the back-reference list of incident ports (spec §3).
#[derive(Clone, Debug)]
pub struct Region {
    pub region_id: RegionId,
    pub boundary: Boundary,
    pub center: Coord<f64>,
    pub flags: RegionFlags,
    pub ports: Vec<PortId>,
    pub assignments: Vec<Assignment>,
    perimeter_cache: RefCell<Option<PerimeterCache>>,
}

impl Region {
    pub fn new(region_id: RegionId, boundary: Boundary, flags: RegionFlags) -> Self {
        let center = boundary.centroid();
        Region {
            region_id,
            boundary,
            center,
            flags,
            ports: Vec::new(),
            assignments: Vec::new(),
            perimeter_cache: RefCell::new(None),
        }
    }

    pub fn with_center(mut self, center: Coord<f64>) -> Self {
        self.center = center;
        self
    }

    /// returns the (lazily computed, memoized) perimeter cache for this region's boundary.
    pub fn perimeter_cache(&self) -> PerimeterCache {
        let mut cache = self.perimeter_cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(crate::geometry::perimeter::build_cache(&self.boundary));
        }
        cache.as_ref().expect("just populated").clone()
    }

    /// assignments currently committed in this region whose owning connection's net
    /// differs from `net`.
    pub fn other_net_assignments(&self, net: crate::ids::NetId) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter().filter(move |a| a.net_id != net)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_vertex_loop_is_clockwise_from_top_left() {
        let b = Boundary::Rect {
            min: CoordDto { x: 0.0, y: 0.0 },
            max: CoordDto { x: 4.0, y: 2.0 },
        };
        let loop_pts = b.vertex_loop();
        assert_eq!(
            loop_pts,
            vec![
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 4.0, y: 0.0 },
                Coord { x: 4.0, y: 2.0 },
                Coord { x: 0.0, y: 2.0 },
            ]
        );
    }

    #[test]
    fn perimeter_cache_is_memoized() {
        let region = Region::new(
            RegionId(0),
            Boundary::Rect {
                min: CoordDto { x: 0.0, y: 0.0 },
                max: CoordDto { x: 4.0, y: 2.0 },
            },
            RegionFlags::default(),
        );
        let first = region.perimeter_cache();
        let second = region.perimeter_cache();
        assert_eq!(first.total, second.total);
        assert_eq!(first.total, 12.0);
    }
}
