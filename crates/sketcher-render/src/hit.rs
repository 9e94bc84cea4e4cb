//! Stroke hit testing in world coordinates.
//!
//! Shapes are drawn as outlines, so a point hits a shape when it lies close
//! to the stroke, not anywhere inside it.

use kurbo::{Point, Vec2};
use sketcher_core::Shape;
use std::f64::consts::TAU;

/// Segments used to approximate an ellipse outline.
const ELLIPSE_SEGMENTS: usize = 72;

/// Distance from `point` to the segment `a`-`b`.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let ab: Vec2 = b - a;
    let len_sq = ab.hypot2();
    if len_sq < f64::EPSILON {
        return (point - a).hypot();
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (point - (a + ab * t)).hypot()
}

/// Distance from `point` to the connected segments through `points`.
pub fn distance_to_polyline(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => (point - *only).hypot(),
        _ => points
            .windows(2)
            .map(|w| distance_to_segment(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Distance from `point` to the outline of a shape.
pub fn distance_to_shape(shape: &Shape, point: Point) -> f64 {
    match shape {
        Shape::Line(line) => distance_to_segment(point, line.start, line.end),
        Shape::Circle(circle) => ((point - circle.center).hypot() - circle.radius.abs()).abs(),
        Shape::Ellipse(ellipse) => {
            let outline: Vec<Point> = (0..=ELLIPSE_SEGMENTS)
                .map(|i| {
                    let angle = TAU * i as f64 / ELLIPSE_SEGMENTS as f64;
                    Point::new(
                        ellipse.center.x + ellipse.radius_x * angle.cos(),
                        ellipse.center.y + ellipse.radius_y * angle.sin(),
                    )
                })
                .collect();
            distance_to_polyline(point, &outline)
        }
        Shape::Polyline(polyline) => distance_to_polyline(point, &polyline.points),
    }
}

/// Whether `point` lies within `tolerance` of the shape's outline.
pub fn hit_test(shape: &Shape, point: Point, tolerance: f64) -> bool {
    distance_to_shape(shape, point) <= tolerance
}
