//! Property editing: a detached copy of a shape's editable fields, and the
//! reconciliation that writes it back.
//!
//! A properties panel edits a [`ShapeDraft`] through dotted field paths
//! (`center.x`, `radiusX`, `points.2.y`, ...). On commit the draft is compared
//! with the live shape to decide whether the renderer can keep its object and
//! just move or recolor it ([`UpdateClass::Transform`]) or has to rebuild the
//! geometry ([`UpdateClass::Rebuild`]).

use crate::shapes::{Shape, ShapeError, ShapeId, ShapeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised by draft field edits.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("Unknown {kind} field: {path}")]
    UnknownField { kind: ShapeKind, path: String },
    #[error("Field {path} must be a finite number")]
    NotFinite { path: String },
    #[error("Point editing needs a polyline, got a {0}")]
    NotAPolyline(ShapeKind),
    #[error("Point index {index} out of range for {len} points")]
    PointIndexOutOfRange { index: usize, len: usize },
    #[error("A polyline needs at least two points")]
    TooFewPoints,
}

/// How the renderer has to react to a committed edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateClass {
    /// Geometry changed shape: the render object must be recreated.
    Rebuild,
    /// Position or color changed: the render object can be updated in place.
    Transform,
}

/// Editable geometry per shape kind.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftGeometry {
    Line { start: Point, end: Point },
    Circle { center: Point, radius: f64 },
    Ellipse { center: Point, radius_x: f64, radius_y: f64 },
    Polyline { points: Vec<Point> },
}

impl DraftGeometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            DraftGeometry::Line { .. } => ShapeKind::Line,
            DraftGeometry::Circle { .. } => ShapeKind::Circle,
            DraftGeometry::Ellipse { .. } => ShapeKind::Ellipse,
            DraftGeometry::Polyline { .. } => ShapeKind::Polyline,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            _ => None,
        }
    }

    fn get(self, p: &Point) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }

    fn get_mut(self, p: &mut Point) -> &mut f64 {
        match self {
            Axis::X => &mut p.x,
            Axis::Y => &mut p.y,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
        })
    }
}

/// A parsed field path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldPath {
    Start(Axis),
    End(Axis),
    Center(Axis),
    Radius,
    RadiusX,
    RadiusY,
    Point(usize, Axis),
}

impl FieldPath {
    fn parse(path: &str) -> Option<Self> {
        let parts: Vec<&str> = path.split('.').collect();
        match parts.as_slice() {
            ["start", axis] => Axis::parse(axis).map(FieldPath::Start),
            ["end", axis] => Axis::parse(axis).map(FieldPath::End),
            ["center", axis] => Axis::parse(axis).map(FieldPath::Center),
            ["radius"] => Some(FieldPath::Radius),
            ["radiusX"] => Some(FieldPath::RadiusX),
            ["radiusY"] => Some(FieldPath::RadiusY),
            ["points", index, axis] => {
                let index = index.parse().ok()?;
                Axis::parse(axis).map(|axis| FieldPath::Point(index, axis))
            }
            _ => None,
        }
    }
}

/// A value copy of one shape's editable properties.
///
/// Visibility is not part of the draft; it has its own toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDraft {
    id: ShapeId,
    /// Stroke color.
    pub color: String,
    /// Editable geometry.
    pub geometry: DraftGeometry,
}

impl ShapeDraft {
    /// Copy the editable fields of `shape`.
    pub fn from_shape(shape: &Shape) -> Self {
        let geometry = match shape {
            Shape::Line(l) => DraftGeometry::Line {
                start: l.start,
                end: l.end,
            },
            Shape::Circle(c) => DraftGeometry::Circle {
                center: c.center,
                radius: c.radius,
            },
            Shape::Ellipse(e) => DraftGeometry::Ellipse {
                center: e.center,
                radius_x: e.radius_x,
                radius_y: e.radius_y,
            },
            Shape::Polyline(p) => DraftGeometry::Polyline {
                points: p.points.clone(),
            },
        };
        Self {
            id: shape.id(),
            color: shape.color().to_string(),
            geometry,
        }
    }

    /// Id of the shape this draft was taken from.
    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    /// Read a numeric field by path.
    pub fn field(&self, path: &str) -> Result<f64, DraftError> {
        let parsed = FieldPath::parse(path).ok_or_else(|| self.unknown(path))?;
        let value = match (&self.geometry, parsed) {
            (DraftGeometry::Line { start, .. }, FieldPath::Start(axis)) => axis.get(start),
            (DraftGeometry::Line { end, .. }, FieldPath::End(axis)) => axis.get(end),
            (
                DraftGeometry::Circle { center, .. } | DraftGeometry::Ellipse { center, .. },
                FieldPath::Center(axis),
            ) => axis.get(center),
            (DraftGeometry::Circle { radius, .. }, FieldPath::Radius) => *radius,
            (DraftGeometry::Ellipse { radius_x, .. }, FieldPath::RadiusX) => *radius_x,
            (DraftGeometry::Ellipse { radius_y, .. }, FieldPath::RadiusY) => *radius_y,
            (DraftGeometry::Polyline { points }, FieldPath::Point(index, axis)) => {
                let point = points.get(index).ok_or(DraftError::PointIndexOutOfRange {
                    index,
                    len: points.len(),
                })?;
                axis.get(point)
            }
            _ => return Err(self.unknown(path)),
        };
        Ok(value)
    }

    /// Write a numeric field by path.
    pub fn set_field(&mut self, path: &str, value: f64) -> Result<(), DraftError> {
        if !value.is_finite() {
            return Err(DraftError::NotFinite {
                path: path.to_string(),
            });
        }
        let parsed = FieldPath::parse(path).ok_or_else(|| self.unknown(path))?;
        let kind = self.kind();
        let slot = match (&mut self.geometry, parsed) {
            (DraftGeometry::Line { start, .. }, FieldPath::Start(axis)) => axis.get_mut(start),
            (DraftGeometry::Line { end, .. }, FieldPath::End(axis)) => axis.get_mut(end),
            (
                DraftGeometry::Circle { center, .. } | DraftGeometry::Ellipse { center, .. },
                FieldPath::Center(axis),
            ) => axis.get_mut(center),
            (DraftGeometry::Circle { radius, .. }, FieldPath::Radius) => radius,
            (DraftGeometry::Ellipse { radius_x, .. }, FieldPath::RadiusX) => radius_x,
            (DraftGeometry::Ellipse { radius_y, .. }, FieldPath::RadiusY) => radius_y,
            (DraftGeometry::Polyline { points }, FieldPath::Point(index, axis)) => {
                let len = points.len();
                let point = points
                    .get_mut(index)
                    .ok_or(DraftError::PointIndexOutOfRange { index, len })?;
                axis.get_mut(point)
            }
            _ => {
                return Err(DraftError::UnknownField {
                    kind,
                    path: path.to_string(),
                });
            }
        };
        *slot = value;
        Ok(())
    }

    /// Every editable numeric field with its current value, in form order.
    pub fn fields(&self) -> Vec<(String, f64)> {
        let point = |name: &str, p: &Point| {
            [Axis::X, Axis::Y].map(|axis| (format!("{name}.{axis}"), axis.get(p)))
        };
        match &self.geometry {
            DraftGeometry::Line { start, end } => {
                let mut out = point("start", start).to_vec();
                out.extend(point("end", end));
                out
            }
            DraftGeometry::Circle { center, radius } => {
                let mut out = point("center", center).to_vec();
                out.push(("radius".to_string(), *radius));
                out
            }
            DraftGeometry::Ellipse {
                center,
                radius_x,
                radius_y,
            } => {
                let mut out = point("center", center).to_vec();
                out.push(("radiusX".to_string(), *radius_x));
                out.push(("radiusY".to_string(), *radius_y));
                out
            }
            DraftGeometry::Polyline { points } => points
                .iter()
                .enumerate()
                .flat_map(|(i, p)| point(&format!("points.{i}"), p))
                .collect(),
        }
    }

    /// Append a vertex to a polyline draft.
    pub fn push_point(&mut self, point: Point) -> Result<(), DraftError> {
        match &mut self.geometry {
            DraftGeometry::Polyline { points } => {
                points.push(point);
                Ok(())
            }
            other => Err(DraftError::NotAPolyline(other.kind())),
        }
    }

    /// Remove a vertex from a polyline draft, keeping at least two.
    pub fn remove_point(&mut self, index: usize) -> Result<Point, DraftError> {
        match &mut self.geometry {
            DraftGeometry::Polyline { points } => {
                if index >= points.len() {
                    return Err(DraftError::PointIndexOutOfRange {
                        index,
                        len: points.len(),
                    });
                }
                if points.len() <= 2 {
                    return Err(DraftError::TooFewPoints);
                }
                Ok(points.remove(index))
            }
            other => Err(DraftError::NotAPolyline(other.kind())),
        }
    }

    /// Write the draft onto `shape`, returning how the change must be rendered.
    ///
    /// The classification is made against the shape as it was before the write.
    pub fn apply(&self, shape: &mut Shape) -> Result<UpdateClass, ShapeError> {
        let class = classify(shape, self);
        match (shape, &self.geometry) {
            (Shape::Line(l), DraftGeometry::Line { start, end }) => {
                l.start = *start;
                l.end = *end;
                l.style.color.clone_from(&self.color);
            }
            (Shape::Circle(c), DraftGeometry::Circle { center, radius }) => {
                c.center = *center;
                c.radius = *radius;
                c.style.color.clone_from(&self.color);
            }
            (
                Shape::Ellipse(e),
                DraftGeometry::Ellipse {
                    center,
                    radius_x,
                    radius_y,
                },
            ) => {
                e.center = *center;
                e.radius_x = *radius_x;
                e.radius_y = *radius_y;
                e.style.color.clone_from(&self.color);
            }
            (Shape::Polyline(p), DraftGeometry::Polyline { points }) => {
                p.points.clone_from(points);
                p.style.color.clone_from(&self.color);
            }
            (shape, geometry) => {
                return Err(ShapeError::DraftKindMismatch {
                    shape: shape.kind(),
                    draft: geometry.kind(),
                });
            }
        }
        Ok(class)
    }

    fn unknown(&self, path: &str) -> DraftError {
        DraftError::UnknownField {
            kind: self.kind(),
            path: path.to_string(),
        }
    }
}

impl From<&Shape> for ShapeDraft {
    fn from(shape: &Shape) -> Self {
        ShapeDraft::from_shape(shape)
    }
}

/// Decide whether committing `draft` over `original` needs a geometry rebuild.
///
/// A rebuild is needed when a circle radius, an ellipse radius or a polyline
/// point count changes. Everything else, including any line edit, is a
/// transform.
pub fn classify(original: &Shape, draft: &ShapeDraft) -> UpdateClass {
    let rebuild = match (original, &draft.geometry) {
        (Shape::Line(_), DraftGeometry::Line { .. }) => false,
        (Shape::Circle(c), DraftGeometry::Circle { radius, .. }) => c.radius != *radius,
        (
            Shape::Ellipse(e),
            DraftGeometry::Ellipse {
                radius_x, radius_y, ..
            },
        ) => e.radius_x != *radius_x || e.radius_y != *radius_y,
        (Shape::Polyline(p), DraftGeometry::Polyline { points }) => p.points.len() != points.len(),
        _ => true,
    };
    if rebuild {
        UpdateClass::Rebuild
    } else {
        UpdateClass::Transform
    }
}
