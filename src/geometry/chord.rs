use geo::Coord;

use crate::geometry::perimeter::{project_to_perimeter, COINCIDENCE_EPS};
use crate::model::port::Port;
use crate::model::region::Region;

/// epsilon used by the Cartesian segment-intersection fallback (spec §4.2/§6): `1e-9`.
pub const SEGMENT_EPS: f64 = 1e-9;

/// the perimeter-T coordinate of `port` on `region`, using (and populating) the port's
/// per-region cache so repeated lookups are bit-identical (spec §8: "Perimeter-T is
/// stable").
pub fn port_t(region: &Region, port: &Port) -> f64 {
    if let Some(t) = port.cached_perimeter_t(region.region_id) {
        return t;
    }
    let cache = region.perimeter_cache();
    let t = project_to_perimeter(&region.boundary, &cache, port.position);
    port.cache_perimeter_t(region.region_id, t);
    t
}

/// whether `x` lies in the open arc `(a, b)` on a circle of circumference `perimeter`,
/// walked in the increasing-`t` direction and wrapping at `perimeter` (spec §4.2).
/// Coincidence with either endpoint, within [`COINCIDENCE_EPS`], is excluded from the
/// open arc.
fn in_open_arc(a: f64, b: f64, x: f64, perimeter: f64) -> bool {
    if perimeter <= 0.0 {
        return false;
    }
    let norm = |v: f64| -> f64 {
        let m = v.rem_euclid(perimeter);
        if m < 0.0 {
            m + perimeter
        } else {
            m
        }
    };
    let aa = norm(a);
    let bb = norm(b);
    let xx = norm(x);
    if (aa - bb).abs() < COINCIDENCE_EPS {
        return false;
    }
    if (xx - aa).abs() < COINCIDENCE_EPS || (xx - bb).abs() < COINCIDENCE_EPS {
        return false;
    }
    if aa < bb {
        xx > aa && xx < bb
    } else {
        xx > aa || xx < bb
    }
}

/// the perimeter-interleaving chord-crossing test (spec §4.2): two chords `(a,b)` and
/// `(c,d)` cross iff exactly one of `c, d` lies in the open arc `(a,b)`.
fn perimeter_chords_cross(a: f64, b: f64, c: f64, d: f64, perimeter: f64) -> bool {
    let c_in = in_open_arc(a, b, c, perimeter);
    let d_in = in_open_arc(a, b, d, perimeter);
    c_in != d_in
}

fn cross2(o: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn coincident(a: Coord<f64>, b: Coord<f64>) -> bool {
    (a.x - b.x).abs() < SEGMENT_EPS && (a.y - b.y).abs() < SEGMENT_EPS
}

/// standard cross-product straddling test for whether segment `p1`-`p2` crosses segment
/// `p3`-`p4`, excluding coincident endpoints (spec §4.2).
fn segments_cross(p1: Coord<f64>, p2: Coord<f64>, p3: Coord<f64>, p4: Coord<f64>) -> bool {
    if coincident(p1, p3) || coincident(p1, p4) || coincident(p2, p3) || coincident(p2, p4) {
        return false;
    }
    let d1 = cross2(p3, p4, p1);
    let d2 = cross2(p3, p4, p2);
    let d3 = cross2(p1, p2, p3);
    let d4 = cross2(p1, p2, p4);
    let straddle = |x: f64, y: f64| (x > SEGMENT_EPS && y < -SEGMENT_EPS) || (x < -SEGMENT_EPS && y > SEGMENT_EPS);
    straddle(d1, d2) && straddle(d3, d4)
}

/// whether the chord `(port_a, port_b)` geometrically crosses the chord `(port_c,
/// port_d)` within `region`: the perimeter-interleaving test OR the Cartesian
/// segment-intersection fallback report a crossing (spec §4.2). The fallback exists
/// because the perimeter test alone can false-negative when both chord endpoints fall on
/// the same polygon edge.
pub fn chord_crosses(
    region: &Region,
    port_a: &Port,
    port_b: &Port,
    port_c: &Port,
    port_d: &Port,
) -> bool {
    let cache = region.perimeter_cache();
    let ta = port_t(region, port_a);
    let tb = port_t(region, port_b);
    let tc = port_t(region, port_c);
    let td = port_t(region, port_d);
    let perimeter_says_cross = perimeter_chords_cross(ta, tb, tc, td, cache.total);
    let segment_says_cross =
        segments_cross(port_a.position, port_b.position, port_c.position, port_d.position);
    perimeter_says_cross || segment_says_cross
}
