//! Circle tool: press at the center, drag out the radius.

use super::{DrawTool, MIN_EXTENT, ToolContext, ToolKind, ToolOutcome};
use crate::input::ESCAPE_KEY;
use crate::renderer::{Preview, Renderer};
use crate::shapes::{Circle, ShapeKind, ShapeStyle};
use kurbo::Point;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum CircleState {
    #[default]
    Idle,
    Drawing {
        center: Point,
    },
}

/// Draws a [`Circle`] per drag gesture.
///
/// The radius is the distance from the press point to the release point.
/// Gestures that stay within [`MIN_EXTENT`] produce nothing, but still end
/// with [`ToolOutcome::Finished`]. Escape cancels a gesture in progress.
#[derive(Debug, Clone)]
pub struct CircleTool {
    style: ShapeStyle,
    state: CircleState,
}

impl CircleTool {
    pub fn new(style: ShapeStyle) -> Self {
        Self {
            style,
            state: CircleState::Idle,
        }
    }
}

impl DrawTool for CircleTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Circle
    }

    fn is_drawing(&self) -> bool {
        matches!(self.state, CircleState::Drawing { .. })
    }

    fn pointer_down(&mut self, _ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome {
        self.state = CircleState::Drawing { center: point };
        log::debug!("Circle started at ({}, {})", point.x, point.y);
        ToolOutcome::Started
    }

    fn pointer_move(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome {
        let CircleState::Drawing { center } = self.state else {
            return ToolOutcome::Ignored;
        };
        ctx.renderer.update_preview(Preview::Circle {
            center,
            radius: center.distance(point),
        });
        ToolOutcome::Previewed
    }

    fn pointer_up(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome {
        let CircleState::Drawing { center } = self.state else {
            return ToolOutcome::Ignored;
        };
        self.reset(ctx.renderer);

        let radius = center.distance(point);
        if radius <= MIN_EXTENT {
            log::debug!("Circle discarded: radius {radius} too small");
            return ToolOutcome::Finished;
        }

        let mut circle = Circle::new(center, radius);
        circle.style = self.style.clone();
        let id = circle.id;
        ctx.document.add_shape(circle.into());
        log::debug!("Circle committed: {id}");
        ToolOutcome::Committed(id)
    }

    fn key_down(&mut self, ctx: &mut ToolContext<'_>, key: &str) -> ToolOutcome {
        if key != ESCAPE_KEY {
            return ToolOutcome::Ignored;
        }
        let was_drawing = self.is_drawing();
        self.reset(ctx.renderer);
        if was_drawing {
            log::debug!("Circle cancelled");
            ToolOutcome::Cancelled
        } else {
            ToolOutcome::Ignored
        }
    }

    fn reset(&mut self, renderer: &mut dyn Renderer) {
        self.state = CircleState::Idle;
        renderer.clear_preview(ShapeKind::Circle);
    }
}
