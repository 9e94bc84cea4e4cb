//! Polyline tool: click to place vertices, double-click to finish.

use super::{DrawTool, ToolContext, ToolKind, ToolOutcome};
use crate::input::ESCAPE_KEY;
use crate::renderer::{Preview, Renderer};
use crate::shapes::{Polyline, ShapeKind, ShapeStyle};
use kurbo::Point;

/// Accumulates vertices into a [`Polyline`].
///
/// Each press appends a vertex. A double click commits when at least two
/// vertices exist; with fewer it is ignored and drawing continues. The double
/// click itself does not add a vertex.
#[derive(Debug, Clone)]
pub struct PolylineTool {
    style: ShapeStyle,
    points: Vec<Point>,
}

impl PolylineTool {
    pub fn new(style: ShapeStyle) -> Self {
        Self {
            style,
            points: Vec::new(),
        }
    }

    /// Vertices placed so far.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    fn preview(&self, renderer: &mut dyn Renderer, cursor: Option<Point>) {
        let mut points = self.points.clone();
        points.extend(cursor);
        renderer.update_preview(Preview::Polyline { points });
    }
}

impl DrawTool for PolylineTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Polyline
    }

    fn is_drawing(&self) -> bool {
        !self.points.is_empty()
    }

    fn pointer_down(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome {
        let started = self.points.is_empty();
        self.points.push(point);
        if started {
            log::debug!("Polyline started at ({}, {})", point.x, point.y);
            return ToolOutcome::Started;
        }
        self.preview(ctx.renderer, None);
        ToolOutcome::Previewed
    }

    fn pointer_move(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome {
        if self.points.is_empty() {
            return ToolOutcome::Ignored;
        }
        self.preview(ctx.renderer, Some(point));
        ToolOutcome::Previewed
    }

    fn double_click(&mut self, ctx: &mut ToolContext<'_>, _point: Point) -> ToolOutcome {
        if self.points.len() < 2 {
            return ToolOutcome::Ignored;
        }
        let points = std::mem::take(&mut self.points);
        self.reset(ctx.renderer);

        let mut polyline = Polyline::new(points);
        polyline.style = self.style.clone();
        let id = polyline.id;
        log::debug!(
            "Polyline committed: {id} ({} points)",
            polyline.points.len()
        );
        ctx.document.add_shape(polyline.into());
        ToolOutcome::Committed(id)
    }

    fn key_down(&mut self, ctx: &mut ToolContext<'_>, key: &str) -> ToolOutcome {
        if key != ESCAPE_KEY {
            return ToolOutcome::Ignored;
        }
        let was_drawing = self.is_drawing();
        self.reset(ctx.renderer);
        if was_drawing {
            log::debug!("Polyline cancelled");
            ToolOutcome::Cancelled
        } else {
            ToolOutcome::Ignored
        }
    }

    fn reset(&mut self, renderer: &mut dyn Renderer) {
        self.points.clear();
        renderer.clear_preview(ShapeKind::Polyline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SketchDocument;
    use crate::input::PointerEvent;
    use crate::renderer::testing::RecordingRenderer;
    use crate::shapes::Shape;
    use crate::tools::testing::{drive, press, pt};

    fn setup() -> (PolylineTool, SketchDocument, RecordingRenderer) {
        (
            PolylineTool::new(ShapeStyle::default()),
            SketchDocument::new(),
            RecordingRenderer::new(),
        )
    }

    #[test]
    fn test_double_click_commits_placed_points() {
        let (mut tool, mut doc, mut renderer) = setup();
        let outcomes = drive(
            &mut tool,
            &mut doc,
            &mut renderer,
            &[
                PointerEvent::down(pt(0.0, 0.0)),
                PointerEvent::up(pt(0.0, 0.0)),
                PointerEvent::down(pt(1.0, 0.0)),
                PointerEvent::moved(pt(2.0, 2.0)),
                PointerEvent::down(pt(1.0, 1.0)),
                PointerEvent::double_click(pt(1.0, 1.0)),
            ],
        );
        assert_eq!(outcomes[0], ToolOutcome::Started);
        assert_eq!(outcomes[1], ToolOutcome::Ignored);
        let ToolOutcome::Committed(id) = outcomes[5] else {
            panic!("expected a commit, got {:?}", outcomes[5]);
        };
        let Some(Shape::Polyline(polyline)) = doc.shape(id) else {
            panic!("expected a polyline");
        };
        assert_eq!(
            polyline.points,
            vec![pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0)]
        );
        assert!(!tool.is_drawing());
        assert!(renderer.preview(ShapeKind::Polyline).is_none());
    }

    #[test]
    fn test_single_point_double_click_keeps_drawing() {
        let (mut tool, mut doc, mut renderer) = setup();
        let outcomes = drive(
            &mut tool,
            &mut doc,
            &mut renderer,
            &[
                PointerEvent::down(pt(0.0, 0.0)),
                PointerEvent::double_click(pt(0.0, 0.0)),
            ],
        );
        assert_eq!(outcomes[1], ToolOutcome::Ignored);
        assert!(doc.is_empty());
        assert!(tool.is_drawing());
        assert_eq!(tool.points(), [pt(0.0, 0.0)]);

        // Drawing continues from the kept vertex.
        let outcomes = drive(
            &mut tool,
            &mut doc,
            &mut renderer,
            &[
                PointerEvent::down(pt(3.0, 0.0)),
                PointerEvent::double_click(pt(3.0, 0.0)),
            ],
        );
        assert!(matches!(outcomes[1], ToolOutcome::Committed(_)));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_double_click_while_idle_is_ignored() {
        let (mut tool, mut doc, mut renderer) = setup();
        let outcomes = drive(
            &mut tool,
            &mut doc,
            &mut renderer,
            &[PointerEvent::double_click(pt(0.0, 0.0))],
        );
        assert_eq!(outcomes, [ToolOutcome::Ignored]);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_preview_includes_cursor() {
        let (mut tool, mut doc, mut renderer) = setup();
        drive(
            &mut tool,
            &mut doc,
            &mut renderer,
            &[
                PointerEvent::down(pt(0.0, 0.0)),
                PointerEvent::down(pt(1.0, 0.0)),
                PointerEvent::moved(pt(5.0, 5.0)),
            ],
        );
        assert_eq!(
            renderer.preview(ShapeKind::Polyline),
            Some(&Preview::Polyline {
                points: vec![pt(0.0, 0.0), pt(1.0, 0.0), pt(5.0, 5.0)]
            })
        );
    }

    #[test]
    fn test_escape_discards_points() {
        let (mut tool, mut doc, mut renderer) = setup();
        drive(
            &mut tool,
            &mut doc,
            &mut renderer,
            &[
                PointerEvent::down(pt(0.0, 0.0)),
                PointerEvent::down(pt(1.0, 0.0)),
            ],
        );
        assert_eq!(
            press(&mut tool, &mut doc, &mut renderer, "Escape"),
            ToolOutcome::Cancelled
        );
        assert!(tool.points().is_empty());
        assert!(renderer.preview(ShapeKind::Polyline).is_none());
        assert!(doc.is_empty());
    }
}
