//! Ellipse shape.

use super::dto::{EllipseFields, ShapeDto};
use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait};
use kurbo::{Ellipse as KurboEllipse, Point, Rect, Vec2};
use uuid::Uuid;

/// An axis-aligned ellipse.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self::reconstruct(
            Uuid::new_v4(),
            center,
            radius_x,
            radius_y,
            ShapeStyle::default(),
        )
    }

    /// Reconstruct an ellipse with a specific ID (for storage).
    pub(crate) fn reconstruct(
        id: ShapeId,
        center: Point,
        radius_x: f64,
        radius_y: f64,
        style: ShapeStyle,
    ) -> Self {
        Self {
            id,
            center,
            radius_x,
            radius_y,
            style,
        }
    }

    /// Get as a kurbo Ellipse.
    pub fn as_kurbo(&self) -> KurboEllipse {
        KurboEllipse::new(self.center, (self.radius_x, self.radius_y), 0.0)
    }
}

impl ShapeTrait for Ellipse {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Ellipse
    }

    fn bounds(&self) -> Rect {
        let (rx, ry) = (self.radius_x.abs(), self.radius_y.abs());
        Rect::new(
            self.center.x - rx,
            self.center.y - ry,
            self.center.x + rx,
            self.center.y + ry,
        )
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn to_dto(&self) -> ShapeDto {
        ShapeDto::from_fields(
            self.id,
            ShapeKind::Ellipse,
            &self.style,
            &EllipseFields {
                center: self.center,
                radius_x: self.radius_x,
                radius_y: self.radius_y,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipse_creation() {
        let ellipse = Ellipse::new(Point::new(50.0, 50.0), 30.0, 20.0);
        assert!((ellipse.center.x - 50.0).abs() < f64::EPSILON);
        assert!((ellipse.radius_x - 30.0).abs() < f64::EPSILON);
        assert!((ellipse.radius_y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds() {
        let ellipse = Ellipse::new(Point::new(50.0, 50.0), 30.0, 20.0);
        let bounds = ellipse.bounds();
        assert!((bounds.x0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 30.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 80.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dto_uses_camel_case_radii() {
        let dto = Ellipse::new(Point::ZERO, 3.0, 1.5).to_dto();
        assert_eq!(dto.geometry["radiusX"], 3.0);
        assert_eq!(dto.geometry["radiusY"], 1.5);
        assert!(!dto.geometry.contains_key("radius_x"));
    }
}
