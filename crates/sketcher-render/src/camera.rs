//! Pan/zoom view transform between screen and world coordinates.

use kurbo::{Affine, Point, Vec2};

/// Default zoom bounds.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// The view transform: `screen = world * zoom + offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Screen position of the world origin.
    pub offset: Vec2,
    /// Screen pixels per world unit.
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl Camera {
    /// Identity camera: screen and world coincide.
    pub fn new() -> Self {
        Self::default()
    }

    /// World to screen.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Screen to world.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Convert a screen-space length (pixels) to world units.
    pub fn screen_to_world_distance(&self, pixels: f64) -> f64 {
        pixels / self.zoom
    }

    /// Pan the view by a delta in screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom by `factor`, keeping the world point under `screen_point` fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let anchor = self.screen_to_world(screen_point);
        self.zoom = zoom;
        self.offset += screen_point - self.world_to_screen(anchor);
    }

    /// Back to the identity view.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0;
    }
}
