//! Circle shape.

use super::dto::{CircleFields, ShapeDto};
use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait};
use kurbo::{Circle as KurboCircle, Point, Rect, Vec2};
use uuid::Uuid;

/// A circle given by center and radius.
///
/// The radius is not validated; producers decide what is meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Radius in world units.
    pub radius: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self::reconstruct(Uuid::new_v4(), center, radius, ShapeStyle::default())
    }

    /// Reconstruct a circle with a specific ID (for storage).
    pub(crate) fn reconstruct(id: ShapeId, center: Point, radius: f64, style: ShapeStyle) -> Self {
        Self {
            id,
            center,
            radius,
            style,
        }
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center, self.radius)
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn bounds(&self) -> Rect {
        let r = self.radius.abs();
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
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
            ShapeKind::Circle,
            &self.style,
            &CircleFields {
                center: self.center,
                radius: self.radius,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_creation() {
        let circle = Circle::new(Point::new(2.0, 3.0), 4.0);
        assert_eq!(circle.center, Point::new(2.0, 3.0));
        assert!((circle.radius - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_radius_is_allowed() {
        let circle = Circle::new(Point::ZERO, 0.0);
        assert_eq!(circle.bounds(), Rect::ZERO);
    }

    #[test]
    fn test_translate_keeps_radius() {
        let mut circle = Circle::new(Point::new(0.0, 0.0), 2.0);
        circle.translate(Vec2::new(1.0, 1.0));
        assert_eq!(circle.center, Point::new(1.0, 1.0));
        assert!((circle.radius - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds() {
        let circle = Circle::new(Point::new(10.0, 10.0), 5.0);
        assert_eq!(circle.bounds(), Rect::new(5.0, 5.0, 15.0, 15.0));
    }
}
