//! Routed connection curves.
//!
//! Connections are drawn as cubic curves whose control points project
//! outward from each anchor along its side's normal, so an edge always
//! leaves and enters a node perpendicular to the node border regardless of
//! where the two nodes sit relative to each other.
//!
//! All routing happens in diagram space; callers convert through the
//! viewport for rendering or hit-testing.

use crate::geometry::{AnchorSide, Point};

/// Default minimum control-point offset for routed curves.
pub const DEFAULT_CURVE_OFFSET: f32 = 50.0;

/// Below this endpoint distance a curve degenerates to a straight segment,
/// which avoids zig-zags between near-coincident points.
const STRAIGHT_THRESHOLD: f32 = 10.0;

/// A cubic curve between two anchor points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicCurve {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicCurve {
    /// Evaluate the curve at parameter `t` in `[0, 1]`.
    pub fn eval(&self, t: f32) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        Point::new(
            mt3 * self.p0.x + 3.0 * mt2 * t * self.p1.x + 3.0 * mt * t2 * self.p2.x + t3 * self.p3.x,
            mt3 * self.p0.y + 3.0 * mt2 * t * self.p1.y + 3.0 * mt * t2 * self.p2.y + t3 * self.p3.y,
        )
    }

    /// True when the control points collapse onto the endpoints (the curve
    /// renders as a straight segment).
    pub fn is_straight(&self) -> bool {
        self.p1 == self.p0 && self.p2 == self.p3
    }

    /// SVG path command string for the curve ("M … C …", or "M … L …" for a
    /// degenerate straight segment).
    pub fn to_svg_path(&self) -> String {
        if self.is_straight() {
            format!(
                "M {} {} L {} {}",
                self.p0.x, self.p0.y, self.p3.x, self.p3.y
            )
        } else {
            format!(
                "M {} {} C {} {} {} {} {} {}",
                self.p0.x,
                self.p0.y,
                self.p1.x,
                self.p1.y,
                self.p2.x,
                self.p2.y,
                self.p3.x,
                self.p3.y
            )
        }
    }
}

/// Route a curve between two anchors.
///
/// Control points extend from each endpoint along the anchor side's outward
/// normal by `max(min_offset, distance / 2)`. Coincident or very close
/// endpoints produce a straight segment.
pub fn route_path(
    from: Point,
    from_side: AnchorSide,
    to: Point,
    to_side: AnchorSide,
    min_offset: f32,
) -> CubicCurve {
    let dist = from.distance_to(to);
    if dist < STRAIGHT_THRESHOLD {
        return CubicCurve {
            p0: from,
            p1: from,
            p2: to,
            p3: to,
        };
    }

    let offset = (dist * 0.5).max(min_offset);
    let from_n = from_side.normal();
    let to_n = to_side.normal();

    CubicCurve {
        p0: from,
        p1: from.offset(from_n.x * offset, from_n.y * offset),
        p2: to.offset(to_n.x * offset, to_n.y * offset),
        p3: to,
    }
}

/// Route a live curve from an anchor to a free cursor position.
///
/// The start leaves the node along the anchor side's normal as in
/// [`route_path`]; the far end has no side constraint, so the curve simply
/// arrives at the cursor.
pub fn live_route_path(
    from: Point,
    from_side: AnchorSide,
    cursor: Point,
    min_offset: f32,
) -> CubicCurve {
    let dist = from.distance_to(cursor);
    if dist < STRAIGHT_THRESHOLD {
        return CubicCurve {
            p0: from,
            p1: from,
            p2: cursor,
            p3: cursor,
        };
    }

    let offset = (dist * 0.5).max(min_offset);
    let n = from_side.normal();

    CubicCurve {
        p0: from,
        p1: from.offset(n.x * offset, n.y * offset),
        p2: cursor,
        p3: cursor,
    }
}

/// Squared distance from a point to a line segment.
fn distance_to_segment_sq(point: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let ap = point - a;
    let ab_len_sq = ab.x * ab.x + ab.y * ab.y;

    if ab_len_sq < f32::EPSILON {
        return ap.x * ap.x + ap.y * ap.y;
    }

    let t = ((ap.x * ab.x + ap.y * ab.y) / ab_len_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * ab.x, a.y + t * ab.y);
    point.distance_sq(closest)
}

/// Minimum distance from a point to a curve, by sampling the curve into
/// `num_samples` line segments.
pub fn distance_to_curve(point: Point, curve: &CubicCurve, num_samples: usize) -> f32 {
    let num_samples = if num_samples == 0 { 20 } else { num_samples };

    let mut min_dist_sq = f32::MAX;
    let mut prev = curve.eval(0.0);

    for i in 1..=num_samples {
        let t = i as f32 / num_samples as f32;
        let curr = curve.eval(t);
        let dist_sq = distance_to_segment_sq(point, prev, curr);
        if dist_sq < min_dist_sq {
            min_dist_sq = dist_sq;
        }
        prev = curr;
    }

    min_dist_sq.sqrt()
}
