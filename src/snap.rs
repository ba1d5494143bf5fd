//! Snapping: uniform grid, magnetic anchor attraction, alignment guides.
//!
//! All three are pure functions over diagram-space input. Magnetic
//! thresholds are specified in screen pixels and divided by the current
//! scale before comparison, so the attraction radius the user feels is
//! constant across zoom levels.

use crate::geometry::{Point, Rect};
use crate::registry::ResolvedAnchor;
use smallvec::SmallVec;

/// Snap a point to the nearest multiple of `grid_size` on both axes.
///
/// A non-positive `grid_size` is the identity. Idempotent: snapping an
/// already-snapped point changes nothing.
pub fn snap_to_grid(point: Point, grid_size: f32) -> Point {
    if grid_size <= 0.0 {
        return point;
    }
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// The anchor a magnetic snap resolved to, for visual feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct MagneticTarget {
    pub node_id: String,
    pub anchor: String,
    pub position: Point,
}

/// Snap `point` to the closest candidate anchor within `threshold_px`
/// screen pixels.
///
/// Anchors on `exclude_node` are skipped (the node a connection is being
/// drawn from must not attract its own cursor). Distance exactly equal to
/// the threshold still snaps. Ties between equidistant anchors resolve to
/// the first candidate in input order.
///
/// Returns the resolved point and the matched target, or the original point
/// with `None` when nothing is in range.
pub fn snap_to_magnetic(
    point: Point,
    candidates: &[ResolvedAnchor],
    exclude_node: Option<&str>,
    threshold_px: f32,
    scale: f32,
) -> (Point, Option<MagneticTarget>) {
    let threshold = threshold_px / scale;
    let mut best: Option<(f32, &ResolvedAnchor)> = None;

    for anchor in candidates {
        if exclude_node == Some(anchor.node_id.as_str()) {
            continue;
        }
        let dist = point.distance_to(anchor.position);
        if dist > threshold {
            continue;
        }
        // Strict < keeps the first of equidistant candidates.
        match best {
            Some((best_dist, _)) if dist >= best_dist => {}
            _ => best = Some((dist, anchor)),
        }
    }

    match best {
        Some((_, anchor)) => (
            anchor.position,
            Some(MagneticTarget {
                node_id: anchor.node_id.clone(),
                anchor: anchor.name.clone(),
                position: anchor.position,
            }),
        ),
        None => (point, None),
    }
}

/// Which line family a guide belongs to: `X` guides are vertical lines at a
/// constant x, `Y` guides horizontal lines at a constant y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideAxis {
    X,
    Y,
}

/// A rendered alignment hint: a line segment where a moving node lines up
/// with another node's edge or center.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentGuide {
    pub axis: GuideAxis,
    /// Constant coordinate of the line (x for `X` guides, y for `Y`).
    pub position: f32,
    /// Extent of the segment along the other axis, covering both rects.
    pub start: f32,
    pub end: f32,
}

fn x_lines(r: &Rect) -> [f32; 3] {
    [r.x, r.x + r.width / 2.0, r.right()]
}

fn y_lines(r: &Rect) -> [f32; 3] {
    [r.y, r.y + r.height / 2.0, r.bottom()]
}

/// Compute alignment guides between a moving node and the other nodes.
///
/// For each axis, every other node whose edge or center line falls within
/// `tolerance` (diagram units) of the moving node's corresponding line
/// contributes one guide segment. The guides are rendering feedback only;
/// nothing is snapped automatically.
pub fn alignment_guides(
    moving: Rect,
    others: &[Rect],
    tolerance: f32,
) -> SmallVec<[AlignmentGuide; 8]> {
    let mut guides = SmallVec::new();

    for other in others {
        for (moving_line, other_line) in x_lines(&moving)
            .iter()
            .zip(x_lines(other).iter())
        {
            if (moving_line - other_line).abs() <= tolerance {
                guides.push(AlignmentGuide {
                    axis: GuideAxis::X,
                    position: *other_line,
                    start: moving.y.min(other.y),
                    end: moving.bottom().max(other.bottom()),
                });
            }
        }
        for (moving_line, other_line) in y_lines(&moving)
            .iter()
            .zip(y_lines(other).iter())
        {
            if (moving_line - other_line).abs() <= tolerance {
                guides.push(AlignmentGuide {
                    axis: GuideAxis::Y,
                    position: *other_line,
                    start: moving.x.min(other.x),
                    end: moving.right().max(other.right()),
                });
            }
        }
    }

    guides
}
