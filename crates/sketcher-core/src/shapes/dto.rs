//! Serialized shape form and the factory that rebuilds typed shapes from it.
//!
//! A document file is a JSON array of these objects:
//!
//! ```json
//! [{ "id": "<uuid>", "type": "circle", "color": "#333333", "visible": true,
//!    "center": { "x": 0.0, "y": 0.0 }, "radius": 2.0 }]
//! ```
//!
//! The envelope (`id`, `type`, `color`, `visible`) is typed; the variant fields
//! are kept as raw JSON members so that an unknown `type` survives parsing and
//! is rejected by [`Shape::from_dto`] instead.

use super::{
    Circle, Ellipse, Line, Polyline, Shape, ShapeError, ShapeId, ShapeKind, ShapeStyle,
};
use kurbo::Point;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_visible() -> bool {
    true
}

/// serde_json writes non-finite floats as `null`.
fn has_null(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.iter().any(has_null),
        Value::Object(map) => map.values().any(has_null),
        _ => false,
    }
}

/// Serialized shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDto {
    pub id: ShapeId,
    /// Shape kind tag (`line`, `circle`, `ellipse`, `polyline`).
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Variant specific fields.
    #[serde(flatten)]
    pub geometry: Map<String, Value>,
}

impl ShapeDto {
    pub(crate) fn from_fields<T: Serialize>(
        id: ShapeId,
        kind: ShapeKind,
        style: &ShapeStyle,
        fields: &T,
    ) -> Self {
        let geometry = match serde_json::to_value(fields) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                log::warn!("{kind} {id}: geometry is not an object ({other}), dropped");
                Map::new()
            }
            Err(e) => {
                log::warn!("{kind} {id}: failed to serialize geometry: {e}");
                Map::new()
            }
        };
        if geometry.values().any(has_null) {
            log::warn!("{kind} {id} has non-finite geometry and will not load back");
        }
        Self {
            id,
            kind: kind.as_str().to_string(),
            color: style.color.clone(),
            visible: style.visible,
            geometry,
        }
    }

    /// Resolve the `type` tag.
    pub fn shape_kind(&self) -> Result<ShapeKind, ShapeError> {
        self.kind.parse()
    }

    fn style(&self) -> ShapeStyle {
        ShapeStyle {
            color: self.color.clone(),
            visible: self.visible,
        }
    }

    fn fields<T: DeserializeOwned>(&self, kind: ShapeKind) -> Result<T, ShapeError> {
        serde_json::from_value(Value::Object(self.geometry.clone()))
            .map_err(|source| ShapeError::InvalidGeometry { kind, source })
    }
}

#[derive(Serialize, Deserialize)]
pub(crate) struct LineFields {
    pub start: Point,
    pub end: Point,
}

#[derive(Serialize, Deserialize)]
pub(crate) struct CircleFields {
    pub center: Point,
    pub radius: f64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EllipseFields {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
}

#[derive(Serialize, Deserialize)]
pub(crate) struct PolylineFields {
    pub points: Vec<Point>,
}

impl Shape {
    /// Rebuild a shape from its serialized form.
    ///
    /// The identity, color and visibility are taken verbatim from the DTO, so
    /// the result is indistinguishable from the shape that produced it.
    pub fn from_dto(dto: &ShapeDto) -> Result<Self, ShapeError> {
        let kind = dto.shape_kind()?;
        let style = dto.style();
        let shape = match kind {
            ShapeKind::Line => {
                let f: LineFields = dto.fields(kind)?;
                Shape::Line(Line::reconstruct(dto.id, f.start, f.end, style))
            }
            ShapeKind::Circle => {
                let f: CircleFields = dto.fields(kind)?;
                Shape::Circle(Circle::reconstruct(dto.id, f.center, f.radius, style))
            }
            ShapeKind::Ellipse => {
                let f: EllipseFields = dto.fields(kind)?;
                Shape::Ellipse(Ellipse::reconstruct(
                    dto.id, f.center, f.radius_x, f.radius_y, style,
                ))
            }
            ShapeKind::Polyline => {
                let f: PolylineFields = dto.fields(kind)?;
                Shape::Polyline(Polyline::reconstruct(dto.id, f.points, style))
            }
        };
        Ok(shape)
    }
}

impl TryFrom<&ShapeDto> for Shape {
    type Error = ShapeError;

    fn try_from(dto: &ShapeDto) -> Result<Self, Self::Error> {
        Shape::from_dto(dto)
    }
}

impl From<&Shape> for ShapeDto {
    fn from(shape: &Shape) -> Self {
        shape.to_dto()
    }
}
