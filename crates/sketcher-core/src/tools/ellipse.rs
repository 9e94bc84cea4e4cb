//! Ellipse tool: press at the center, drag out both radii.

use super::{DrawTool, MIN_EXTENT, ToolContext, ToolKind, ToolOutcome};
use crate::input::ESCAPE_KEY;
use crate::renderer::{Preview, Renderer};
use crate::shapes::{Ellipse, ShapeKind, ShapeStyle};
use kurbo::Point;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum EllipseState {
    #[default]
    Idle,
    Drawing {
        center: Point,
    },
}

/// Axis radii spanned from `center` to `point`.
fn radii(center: Point, point: Point) -> (f64, f64) {
    ((point.x - center.x).abs(), (point.y - center.y).abs())
}

/// Draws an axis-aligned [`Ellipse`] per drag gesture.
///
/// Both radii must exceed [`MIN_EXTENT`] for a shape to be created.
#[derive(Debug, Clone)]
pub struct EllipseTool {
    style: ShapeStyle,
    state: EllipseState,
}

impl EllipseTool {
    pub fn new(style: ShapeStyle) -> Self {
        Self {
            style,
            state: EllipseState::Idle,
        }
    }
}

impl DrawTool for EllipseTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Ellipse
    }

    fn is_drawing(&self) -> bool {
        matches!(self.state, EllipseState::Drawing { .. })
    }

    fn pointer_down(&mut self, _ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome {
        self.state = EllipseState::Drawing { center: point };
        log::debug!("Ellipse started at ({}, {})", point.x, point.y);
        ToolOutcome::Started
    }

    fn pointer_move(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome {
        let EllipseState::Drawing { center } = self.state else {
            return ToolOutcome::Ignored;
        };
        let (radius_x, radius_y) = radii(center, point);
        ctx.renderer.update_preview(Preview::Ellipse {
            center,
            radius_x,
            radius_y,
        });
        ToolOutcome::Previewed
    }

    fn pointer_up(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome {
        let EllipseState::Drawing { center } = self.state else {
            return ToolOutcome::Ignored;
        };
        self.reset(ctx.renderer);

        let (radius_x, radius_y) = radii(center, point);
        if radius_x <= MIN_EXTENT || radius_y <= MIN_EXTENT {
            log::debug!("Ellipse discarded: radii {radius_x}x{radius_y} too small");
            return ToolOutcome::Finished;
        }

        let mut ellipse = Ellipse::new(center, radius_x, radius_y);
        ellipse.style = self.style.clone();
        let id = ellipse.id;
        ctx.document.add_shape(ellipse.into());
        log::debug!("Ellipse committed: {id}");
        ToolOutcome::Committed(id)
    }

    fn key_down(&mut self, ctx: &mut ToolContext<'_>, key: &str) -> ToolOutcome {
        if key != ESCAPE_KEY {
            return ToolOutcome::Ignored;
        }
        let was_drawing = self.is_drawing();
        self.reset(ctx.renderer);
        if was_drawing {
            log::debug!("Ellipse cancelled");
            ToolOutcome::Cancelled
        } else {
            ToolOutcome::Ignored
        }
    }

    fn reset(&mut self, renderer: &mut dyn Renderer) {
        self.state = EllipseState::Idle;
        renderer.clear_preview(ShapeKind::Ellipse);
    }
}
