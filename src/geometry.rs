//! Geometric primitives shared by every other module.
//!
//! All coordinates are `f32`. Two coordinate systems exist: *diagram space*
//! (where node positions live, zoom/pan independent) and *screen space*
//! (canvas pixels). The types here are agnostic; [`crate::viewport::Viewport`]
//! converts between the two.

/// Distance in diagram units between a node edge and its anchor dot, so the
/// connector dot renders just outside the node body.
pub const ANCHOR_OUTSET: f32 = 6.0;

/// A 2D point (or vector) in either coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f32 {
        self.distance_sq(other).sqrt()
    }

    /// Squared distance; cheaper when only comparing.
    pub fn distance_sq(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when the size encloses no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Axis-aligned rectangle, stored as origin + size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a normalized rect from two corner points in any order.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Strict AABB overlap test. Rects that merely touch along an edge do
    /// not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Smallest rect enclosing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// The node border an anchor sits on. Determines where the anchor dot is
/// placed and which direction a connection leaves the node in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl AnchorSide {
    /// Outward unit normal of the side.
    pub fn normal(&self) -> Point {
        match self {
            AnchorSide::Left => Point::new(-1.0, 0.0),
            AnchorSide::Right => Point::new(1.0, 0.0),
            AnchorSide::Top => Point::new(0.0, -1.0),
            AnchorSide::Bottom => Point::new(0.0, 1.0),
        }
    }
}

/// Position of an anchor on a node border.
///
/// `t` is the fractional position along the side's edge (0.0 = top/left end,
/// 1.0 = bottom/right end, 0.5 = centered). The returned point sits
/// [`ANCHOR_OUTSET`] outside the node body along the side's normal.
pub fn anchor_position(position: Point, size: Size, side: AnchorSide, t: f32) -> Point {
    let t = t.clamp(0.0, 1.0);
    match side {
        AnchorSide::Left => Point::new(position.x - ANCHOR_OUTSET, position.y + size.height * t),
        AnchorSide::Right => Point::new(
            position.x + size.width + ANCHOR_OUTSET,
            position.y + size.height * t,
        ),
        AnchorSide::Top => Point::new(position.x + size.width * t, position.y - ANCHOR_OUTSET),
        AnchorSide::Bottom => Point::new(
            position.x + size.width * t,
            position.y + size.height + ANCHOR_OUTSET,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Rect construction and queries
    // ========================================================================

    #[test]
    fn test_rect_from_points_normalizes() {
        let r = Rect::from_points(Point::new(100.0, 80.0), Point::new(20.0, 10.0));
        assert_eq!(r, Rect::new(20.0, 10.0, 80.0, 70.0));
    }

    #[test]
    fn test_rect_from_identical_points_is_empty() {
        let r = Rect::from_points(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
        assert!(r.is_empty());
    }

    #[test]
    fn test_rect_contains_boundary() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(!r.contains(Point::new(10.1, 10.0)));
    }

    #[test]
    fn test_rect_intersects_overlapping() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_rect_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 30.0, 5.0, 5.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 25.0, 35.0));
    }

    // ========================================================================
    // Anchor placement
    // ========================================================================

    #[test]
    fn test_anchor_position_left_sits_outside_node() {
        let p = anchor_position(
            Point::new(100.0, 100.0),
            Size::new(150.0, 80.0),
            AnchorSide::Left,
            0.5,
        );
        assert_eq!(p, Point::new(100.0 - ANCHOR_OUTSET, 140.0));
    }

    #[test]
    fn test_anchor_position_right_mirrors_left() {
        let p = anchor_position(
            Point::new(100.0, 100.0),
            Size::new(150.0, 80.0),
            AnchorSide::Right,
            0.5,
        );
        assert_eq!(p, Point::new(250.0 + ANCHOR_OUTSET, 140.0));
    }

    #[test]
    fn test_anchor_position_top_and_bottom() {
        let pos = Point::new(0.0, 0.0);
        let size = Size::new(100.0, 40.0);
        assert_eq!(
            anchor_position(pos, size, AnchorSide::Top, 0.25),
            Point::new(25.0, -ANCHOR_OUTSET)
        );
        assert_eq!(
            anchor_position(pos, size, AnchorSide::Bottom, 0.25),
            Point::new(25.0, 40.0 + ANCHOR_OUTSET)
        );
    }

    #[test]
    fn test_anchor_position_clamps_t() {
        let pos = Point::new(0.0, 0.0);
        let size = Size::new(100.0, 40.0);
        let over = anchor_position(pos, size, AnchorSide::Left, 2.0);
        let max = anchor_position(pos, size, AnchorSide::Left, 1.0);
        assert_eq!(over, max);
    }

    #[test]
    fn test_side_normals_are_unit_vectors() {
        for side in [
            AnchorSide::Left,
            AnchorSide::Right,
            AnchorSide::Top,
            AnchorSide::Bottom,
        ] {
            let n = side.normal();
            assert!(((n.x * n.x + n.y * n.y) - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(b) - 5.0).abs() < 0.001);
        assert_eq!(a.distance_sq(b), 25.0);
    }
}
