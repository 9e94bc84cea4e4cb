//! Line tool: press at the start point, drag, release at the end point.

use super::{DrawTool, ToolContext, ToolKind, ToolOutcome};
use crate::renderer::{Preview, Renderer};
use crate::shapes::{Line, ShapeKind, ShapeStyle};
use kurbo::Point;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum LineState {
    #[default]
    Idle,
    Drawing {
        start: Point,
    },
}

/// Draws a [`Line`] per drag gesture.
///
/// Releasing on the press point discards the gesture without a finish
/// notification. The tool has no cancel key.
#[derive(Debug, Clone)]
pub struct LineTool {
    style: ShapeStyle,
    state: LineState,
}

impl LineTool {
    pub fn new(style: ShapeStyle) -> Self {
        Self {
            style,
            state: LineState::Idle,
        }
    }
}

impl DrawTool for LineTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Line
    }

    fn is_drawing(&self) -> bool {
        matches!(self.state, LineState::Drawing { .. })
    }

    fn pointer_down(&mut self, _ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome {
        self.state = LineState::Drawing { start: point };
        log::debug!("Line started at ({}, {})", point.x, point.y);
        ToolOutcome::Started
    }

    fn pointer_move(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome {
        let LineState::Drawing { start } = self.state else {
            return ToolOutcome::Ignored;
        };
        ctx.renderer
            .update_preview(Preview::Line { start, end: point });
        ToolOutcome::Previewed
    }

    fn pointer_up(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome {
        let LineState::Drawing { start } = self.state else {
            return ToolOutcome::Ignored;
        };
        self.reset(ctx.renderer);
        if start == point {
            log::debug!("Line discarded: zero length");
            return ToolOutcome::Aborted;
        }

        let mut line = Line::new(start, point);
        line.style = self.style.clone();
        let id = line.id;
        ctx.document.add_shape(line.into());
        log::debug!("Line committed: {id}");
        ToolOutcome::Committed(id)
    }

    fn reset(&mut self, renderer: &mut dyn Renderer) {
        self.state = LineState::Idle;
        renderer.clear_preview(ShapeKind::Line);
    }
}
