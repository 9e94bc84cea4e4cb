//! Shape definitions for the sketch.

mod circle;
mod dto;
mod ellipse;
mod line;
mod polyline;

pub use circle::Circle;
pub use dto::ShapeDto;
pub use ellipse::Ellipse;
pub use line::Line;
pub use polyline::Polyline;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Color given to shapes that were created without an explicit one.
pub const DEFAULT_COLOR: &str = "#333333";

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Errors raised while reconstructing or editing shapes.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("Unsupported shape type: {0}")]
    UnsupportedShapeKind(String),
    #[error("Invalid {kind} geometry: {source}")]
    InvalidGeometry {
        kind: ShapeKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("Duplicate shape id: {0}")]
    DuplicateId(ShapeId),
    #[error("Cannot apply a {draft} draft to a {shape}")]
    DraftKindMismatch { shape: ShapeKind, draft: ShapeKind },
}

/// The closed set of shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Circle,
    Ellipse,
    Polyline,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Line,
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Polyline,
    ];

    /// The `type` tag used in serialized documents.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Polyline => "polyline",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ShapeError::UnsupportedShapeKind(s.to_string()))
    }
}

/// Appearance shared by every shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color as `#rrggbb`.
    pub color: String,
    /// Hidden shapes stay in the document but are not drawn or pickable.
    pub visible: bool,
}

impl ShapeStyle {
    /// Visible style with the given color.
    pub fn with_color(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            visible: true,
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::with_color(DEFAULT_COLOR)
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the kind of this shape.
    fn kind(&self) -> ShapeKind;

    /// Get the bounding box in world coordinates.
    fn bounds(&self) -> Rect;

    /// Translate every owned point by `delta`.
    fn translate(&mut self, delta: Vec2);

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Produce the serialized form. The result shares nothing with `self`.
    fn to_dto(&self) -> ShapeDto;
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(Line),
    Circle(Circle),
    Ellipse(Ellipse),
    Polyline(Polyline),
}

impl Shape {
    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Line(s) => s,
            Shape::Circle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Polyline(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Line(s) => s,
            Shape::Circle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Polyline(s) => s,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.as_trait().id()
    }

    pub fn kind(&self) -> ShapeKind {
        self.as_trait().kind()
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    /// Move the shape by `delta` (component-wise addition on every point).
    pub fn translate(&mut self, delta: Vec2) {
        self.as_trait_mut().translate(delta);
    }

    pub fn style(&self) -> &ShapeStyle {
        self.as_trait().style()
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        self.as_trait_mut().style_mut()
    }

    pub fn color(&self) -> &str {
        &self.style().color
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.style_mut().color = color.into();
    }

    pub fn is_visible(&self) -> bool {
        self.style().visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.style_mut().visible = visible;
    }

    pub fn to_dto(&self) -> ShapeDto {
        self.as_trait().to_dto()
    }

    /// A representative point: the first vertex for lines and polylines,
    /// the center otherwise.
    pub fn anchor(&self) -> Point {
        match self {
            Shape::Line(l) => l.start,
            Shape::Circle(c) => c.center,
            Shape::Ellipse(e) => e.center,
            Shape::Polyline(p) => p.points.first().copied().unwrap_or(Point::ZERO),
        }
    }
}

impl From<Line> for Shape {
    fn from(line: Line) -> Self {
        Shape::Line(line)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Ellipse> for Shape {
    fn from(ellipse: Ellipse) -> Self {
        Shape::Ellipse(ellipse)
    }
}

impl From<Polyline> for Shape {
    fn from(polyline: Polyline) -> Self {
        Shape::Polyline(polyline)
    }
}

/// Bounding box of a set of points; empty input yields a zero rect at the origin.
pub(crate) fn points_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |rect, p| {
            rect.union_pt(*p)
        })
}
