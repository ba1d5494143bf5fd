//! Viewport transform between diagram space and screen space.
//!
//! The mapping is `screen = diagram * scale + translate`; panning operates
//! directly on `translate` in screen pixels, zooming rescales around a fixed
//! screen point so the content under the cursor stays put.

use crate::geometry::{Point, Rect, Size};

/// Default lower zoom bound.
pub const DEFAULT_MIN_SCALE: f32 = 0.1;
/// Default upper zoom bound.
pub const DEFAULT_MAX_SCALE: f32 = 3.0;

/// Scale and translation mapping diagram coordinates to screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub translate: Point,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Identity viewport with the default zoom bounds.
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            translate: Point::ZERO,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }

    /// Identity viewport with custom zoom bounds.
    pub fn with_scale_bounds(min_scale: f32, max_scale: f32) -> Self {
        Self {
            scale: 1.0,
            translate: Point::ZERO,
            min_scale,
            max_scale,
        }
    }

    /// Diagram → screen.
    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.translate.x,
            p.y * self.scale + self.translate.y,
        )
    }

    /// Screen → diagram. Inverse of [`to_screen`](Self::to_screen).
    pub fn to_diagram(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.translate.x) / self.scale,
            (p.y - self.translate.y) / self.scale,
        )
    }

    /// Convert a screen-pixel length to diagram units at the current zoom.
    pub fn to_diagram_len(&self, len: f32) -> f32 {
        len / self.scale
    }

    /// Zoom by `factor` around a fixed screen point.
    ///
    /// The scale is clamped to `[min_scale, max_scale]` and the translation
    /// recomputed so that `to_diagram(screen_point)` is unchanged by the
    /// operation. Returns `true` if the viewport actually changed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f32) -> bool {
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        if new_scale == self.scale {
            return false;
        }
        // Keep the diagram point under the cursor mapped to the same pixel.
        let pivot = self.to_diagram(screen_point);
        self.scale = new_scale;
        self.translate = Point::new(
            screen_point.x - pivot.x * new_scale,
            screen_point.y - pivot.y * new_scale,
        );
        true
    }

    /// Pan by a screen-space delta. Panning is not affected by zoom.
    pub fn pan_by(&mut self, screen_delta: Point) {
        self.translate = self.translate + screen_delta;
    }

    /// Fit `bounds` (padded by `margin` on every side, in diagram units)
    /// into `viewport_size`, centered, without zooming in past 1.0.
    ///
    /// A zero-area `bounds` (no content) leaves the viewport untouched.
    /// Returns `true` if the viewport changed.
    pub fn fit_to_content(&mut self, bounds: Rect, viewport_size: Size, margin: f32) -> bool {
        if bounds.is_empty() || viewport_size.is_empty() {
            return false;
        }
        let padded = Rect::new(
            bounds.x - margin,
            bounds.y - margin,
            bounds.width + margin * 2.0,
            bounds.height + margin * 2.0,
        );
        let scale_x = viewport_size.width / padded.width;
        let scale_y = viewport_size.height / padded.height;
        let scale = scale_x
            .min(scale_y)
            .min(1.0)
            .clamp(self.min_scale, self.max_scale);

        let center = padded.center();
        let translate = Point::new(
            viewport_size.width / 2.0 - center.x * scale,
            viewport_size.height / 2.0 - center.y * scale,
        );
        if scale == self.scale && translate == self.translate {
            return false;
        }
        self.scale = scale;
        self.translate = translate;
        true
    }
}
