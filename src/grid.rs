//! Background grid rendering.
//!
//! Produces screen-space SVG line commands for the visible portion of the
//! diagram grid, so hosts can feed a single path string to whatever vector
//! surface they render with. Lines sit on diagram-space multiples of the
//! grid size, so they pan and zoom together with the content.

use crate::geometry::{Point, Size};
use crate::viewport::Viewport;
use std::fmt::Write as _;

/// Below this on-screen line spacing the grid is omitted entirely rather
/// than rendered as near-solid noise.
pub const MIN_VISIBLE_SPACING: f32 = 4.0;

/// SVG path commands ("M x y L x y" per line) for every grid line visible
/// in a viewport of `viewport_size` screen pixels.
///
/// Returns an empty string when `grid_size` is non-positive or the
/// effective spacing `grid_size * scale` drops below
/// [`MIN_VISIBLE_SPACING`].
pub fn grid_path(viewport: &Viewport, viewport_size: Size, grid_size: f32) -> String {
    if grid_size <= 0.0 || grid_size * viewport.scale < MIN_VISIBLE_SPACING {
        return String::new();
    }

    let top_left = viewport.to_diagram(Point::ZERO);
    let bottom_right = viewport.to_diagram(Point::new(
        viewport_size.width,
        viewport_size.height,
    ));

    let mut path = String::new();

    let first_col = (top_left.x / grid_size).floor() as i64;
    let last_col = (bottom_right.x / grid_size).ceil() as i64;
    for col in first_col..=last_col {
        let x = viewport.to_screen(Point::new(col as f32 * grid_size, 0.0)).x;
        let _ = write!(path, "M {} 0 L {} {} ", x, x, viewport_size.height);
    }

    let first_row = (top_left.y / grid_size).floor() as i64;
    let last_row = (bottom_right.y / grid_size).ceil() as i64;
    for row in first_row..=last_row {
        let y = viewport.to_screen(Point::new(0.0, row as f32 * grid_size)).y;
        let _ = write!(path, "M 0 {} L {} {} ", y, viewport_size.width, y);
    }

    path.truncate(path.trim_end().len());
    path
}
