//! The rendering collaborator as seen from the core.
//!
//! The core never draws. It tells a [`Renderer`] which shapes exist and what
//! changed about them, and asks it to map screen positions to world points
//! and to shapes. Implementations keep whatever derived scene they need; the
//! document stays the source of truth.

use crate::shapes::{Shape, ShapeId, ShapeKind};
use kurbo::Point;

/// In-progress geometry shown while a tool is drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Line { start: Point, end: Point },
    Circle { center: Point, radius: f64 },
    Ellipse { center: Point, radius_x: f64, radius_y: f64 },
    /// Committed vertices followed by the point under the cursor.
    Polyline { points: Vec<Point> },
}

impl Preview {
    /// The tool slot this preview belongs to.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Preview::Line { .. } => ShapeKind::Line,
            Preview::Circle { .. } => ShapeKind::Circle,
            Preview::Ellipse { .. } => ShapeKind::Ellipse,
            Preview::Polyline { .. } => ShapeKind::Polyline,
        }
    }
}

/// Scene collaborator driven by the editor.
pub trait Renderer {
    /// Rebuild the scene from `shapes` (in document order).
    fn render(&mut self, shapes: &[&Shape]);

    /// Drop every scene object, preview and highlight.
    fn clear(&mut self);

    fn remove_shape(&mut self, id: ShapeId);

    /// Recreate the object for `shape` after a geometry change.
    fn update_object(&mut self, shape: &Shape);

    /// Reposition the object for `shape`.
    fn update_transform(&mut self, shape: &Shape);

    /// Refresh the color of the object for `shape`.
    fn update_material(&mut self, shape: &Shape);

    fn update_visibility(&mut self, shape: &Shape);

    /// Highlight the selected shape, or nothing.
    fn update_selection(&mut self, id: Option<ShapeId>);

    /// Highlight the hovered shape, or nothing.
    fn update_hover(&mut self, id: Option<ShapeId>);

    /// Topmost visible shape under a screen position.
    fn pick(&self, position: Point) -> Option<ShapeId>;

    /// Same as [`pick`](Self::pick), also updating the hover highlight.
    fn hover(&mut self, position: Point) -> Option<ShapeId> {
        let hit = self.pick(position);
        self.update_hover(hit);
        hit
    }

    /// Convert a screen position to world coordinates.
    fn world_point(&self, position: Point) -> Point;

    /// Show or replace the preview for its tool slot.
    fn update_preview(&mut self, preview: Preview);

    fn clear_preview(&mut self, kind: ShapeKind);
}
