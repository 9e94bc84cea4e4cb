//! Polyline shape.

use super::dto::{PolylineFields, ShapeDto};
use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait, points_bounds};
use kurbo::{BezPath, Point, Rect, Vec2};
use uuid::Uuid;

/// An open chain of connected segments.
///
/// Point order is geometry order. The entity accepts any number of points;
/// the polyline tool only ever produces two or more.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub(crate) id: ShapeId,
    /// Vertices in drawing order.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Polyline {
    /// Create a polyline from its vertices.
    pub fn new(points: Vec<Point>) -> Self {
        Self::reconstruct(Uuid::new_v4(), points, ShapeStyle::default())
    }

    /// Reconstruct a polyline with a specific ID (for storage).
    pub(crate) fn reconstruct(id: ShapeId, points: Vec<Point>, style: ShapeStyle) -> Self {
        Self { id, points, style }
    }

    /// Get the open path through all vertices.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for p in iter {
                path.line_to(*p);
            }
        }
        path
    }
}

impl ShapeTrait for Polyline {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Polyline
    }

    fn bounds(&self) -> Rect {
        points_bounds(&self.points)
    }

    fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
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
            ShapeKind::Polyline,
            &self.style,
            &PolylineFields {
                points: self.points.clone(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> Polyline {
        Polyline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(6.0, 0.0),
        ])
    }

    #[test]
    fn test_translate_moves_every_point() {
        let mut polyline = zigzag();
        polyline.translate(Vec2::new(1.0, 2.0));
        assert_eq!(
            polyline.points,
            vec![
                Point::new(1.0, 2.0),
                Point::new(4.0, 6.0),
                Point::new(7.0, 2.0)
            ]
        );
    }

    #[test]
    fn test_dto_is_independent_copy() {
        let mut polyline = zigzag();
        let dto = polyline.to_dto();
        polyline.translate(Vec2::new(100.0, 100.0));
        assert_eq!(dto.geometry["points"][1]["x"], 3.0);
    }

    #[test]
    fn test_path_has_one_segment_per_edge() {
        let path = zigzag().to_path();
        assert_eq!(path.elements().len(), 3);
    }
}
