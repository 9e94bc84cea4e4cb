//! Line shape.

use super::dto::{LineFields, ShapeDto};
use super::{ShapeId, ShapeKind, ShapeStyle, ShapeTrait};
use kurbo::{Line as KurboLine, Point, Rect, Vec2};
use uuid::Uuid;

/// A straight segment between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self::reconstruct(Uuid::new_v4(), start, end, ShapeStyle::default())
    }

    /// Reconstruct a line with a specific ID (for storage).
    pub(crate) fn reconstruct(id: ShapeId, start: Point, end: Point, style: ShapeStyle) -> Self {
        Self {
            id,
            start,
            end,
            style,
        }
    }

    /// Get as a kurbo Line.
    pub fn as_kurbo(&self) -> KurboLine {
        KurboLine::new(self.start, self.end)
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
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
            ShapeKind::Line,
            &self.style,
            &LineFields {
                start: self.start,
                end: self.end,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_creation() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert_eq!(line.start, Point::new(0.0, 0.0));
        assert_eq!(line.end, Point::new(100.0, 0.0));
        assert_eq!(line.style.color, crate::shapes::DEFAULT_COLOR);
    }

    #[test]
    fn test_translate_moves_both_endpoints() {
        let mut line = Line::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        line.translate(Vec2::new(10.0, -1.0));
        assert_eq!(line.start, Point::new(11.0, 1.0));
        assert_eq!(line.end, Point::new(13.0, 3.0));
    }

    #[test]
    fn test_bounds() {
        let line = Line::new(Point::new(50.0, 20.0), Point::new(10.0, 80.0));
        let bounds = line.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dto_fields() {
        let line = Line::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        let dto = line.to_dto();
        assert_eq!(dto.kind, "line");
        assert_eq!(dto.id, line.id);
        assert_eq!(dto.geometry["start"]["x"], 1.0);
        assert_eq!(dto.geometry["end"]["y"], 4.0);
    }
}
