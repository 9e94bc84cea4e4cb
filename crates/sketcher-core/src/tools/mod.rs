//! Drawing tools: one state machine per shape kind.
//!
//! A tool turns a stream of pointer and key events into at most one shape
//! insertion per gesture. Tools see the world through a [`ToolContext`]: the
//! document they commit into and the renderer they preview on and use for
//! screen to world conversion.

mod circle;
mod ellipse;
mod line;
mod polyline;

pub use circle::CircleTool;
pub use ellipse::EllipseTool;
pub use line::LineTool;
pub use polyline::PolylineTool;

use crate::document::SketchDocument;
use crate::input::{KeyEvent, MouseButton, PointerEvent};
use crate::renderer::Renderer;
use crate::shapes::{ShapeId, ShapeKind, ShapeStyle};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest radius (world units) a circle or ellipse gesture must reach to
/// produce a shape.
pub const MIN_EXTENT: f64 = 0.01;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// No drawing tool; clicks pick and select.
    #[default]
    Select,
    Line,
    Polyline,
    Circle,
    Ellipse,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Select,
        ToolKind::Line,
        ToolKind::Polyline,
        ToolKind::Circle,
        ToolKind::Ellipse,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Line => "line",
            ToolKind::Polyline => "polyline",
            ToolKind::Circle => "circle",
            ToolKind::Ellipse => "ellipse",
        }
    }

    /// The shape kind this tool produces.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Select => None,
            ToolKind::Line => Some(ShapeKind::Line),
            ToolKind::Polyline => Some(ShapeKind::Polyline),
            ToolKind::Circle => Some(ShapeKind::Circle),
            ToolKind::Ellipse => Some(ShapeKind::Ellipse),
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown tool: {s}"))
    }
}

/// What a tool did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The event means nothing in the current state.
    Ignored,
    /// A gesture began.
    Started,
    /// In-progress geometry changed.
    Previewed,
    /// A shape was added to the document.
    Committed(ShapeId),
    /// The gesture ended without a shape; collaborators still re-sync.
    Finished,
    /// The gesture ended silently.
    Aborted,
    /// The gesture was cancelled by the user.
    Cancelled,
}

impl ToolOutcome {
    /// Whether the gesture ended in a way that collaborators must re-sync on.
    pub fn needs_sync(self) -> bool {
        matches!(self, ToolOutcome::Committed(_) | ToolOutcome::Finished)
    }
}

/// Everything a tool may touch while handling one event.
pub struct ToolContext<'a> {
    pub document: &'a mut SketchDocument,
    pub renderer: &'a mut dyn Renderer,
}

impl<'a> ToolContext<'a> {
    pub fn new(document: &'a mut SketchDocument, renderer: &'a mut dyn Renderer) -> Self {
        Self { document, renderer }
    }
}

/// A drawing-tool state machine.
///
/// Handlers take world coordinates. [`handle_pointer`](Self::handle_pointer)
/// converts screen positions and filters out non-left buttons.
pub trait DrawTool {
    fn kind(&self) -> ToolKind;

    /// True between the start of a gesture and its end.
    fn is_drawing(&self) -> bool;

    fn pointer_down(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome;

    fn pointer_move(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome;

    fn pointer_up(&mut self, _ctx: &mut ToolContext<'_>, _point: Point) -> ToolOutcome {
        ToolOutcome::Ignored
    }

    fn double_click(&mut self, _ctx: &mut ToolContext<'_>, _point: Point) -> ToolOutcome {
        ToolOutcome::Ignored
    }

    fn key_down(&mut self, _ctx: &mut ToolContext<'_>, _key: &str) -> ToolOutcome {
        ToolOutcome::Ignored
    }

    /// Drop in-progress state and clear the preview.
    fn reset(&mut self, renderer: &mut dyn Renderer);

    /// Final teardown before the tool is dropped.
    fn destroy(&mut self, renderer: &mut dyn Renderer) {
        self.reset(renderer);
    }

    /// Route a pointer event (screen coordinates) to the matching handler.
    fn handle_pointer(&mut self, ctx: &mut ToolContext<'_>, event: PointerEvent) -> ToolOutcome {
        if event.button().is_some_and(|b| b != MouseButton::Left) {
            return ToolOutcome::Ignored;
        }
        let point = ctx.renderer.world_point(event.position());
        match event {
            PointerEvent::Down { .. } => self.pointer_down(ctx, point),
            PointerEvent::Up { .. } => self.pointer_up(ctx, point),
            PointerEvent::Move { .. } => self.pointer_move(ctx, point),
            PointerEvent::DoubleClick { .. } => self.double_click(ctx, point),
        }
    }

    /// Route a key event; only presses reach the tool.
    fn handle_key(&mut self, ctx: &mut ToolContext<'_>, event: &KeyEvent) -> ToolOutcome {
        match event {
            KeyEvent::Pressed(key) => self.key_down(ctx, key),
            KeyEvent::Released(_) => ToolOutcome::Ignored,
        }
    }
}

/// Instantiate the tool for `kind`, drawing with `style`.
///
/// [`ToolKind::Select`] has no drawing tool.
pub fn create_tool(kind: ToolKind, style: ShapeStyle) -> Option<Box<dyn DrawTool>> {
    let tool: Box<dyn DrawTool> = match kind {
        ToolKind::Select => return None,
        ToolKind::Line => Box::new(LineTool::new(style)),
        ToolKind::Polyline => Box::new(PolylineTool::new(style)),
        ToolKind::Circle => Box::new(CircleTool::new(style)),
        ToolKind::Ellipse => Box::new(EllipseTool::new(style)),
    };
    Some(tool)
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::renderer::testing::RecordingRenderer;

    #[test]
    fn test_tool_kind_names() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.name().parse::<ToolKind>().unwrap(), kind);
        }
        assert!("rectangle".parse::<ToolKind>().is_err());
        assert_eq!(ToolKind::default(), ToolKind::Select);
    }

    #[test]
    fn test_create_tool() {
        assert!(create_tool(ToolKind::Select, ShapeStyle::default()).is_none());
        for kind in ToolKind::ALL.into_iter().skip(1) {
            let tool = create_tool(kind, ShapeStyle::default()).unwrap();
            assert_eq!(tool.kind(), kind);
            assert!(!tool.is_drawing());
            assert!(kind.shape_kind().is_some());
        }
    }

    #[test]
    fn test_non_left_buttons_are_ignored() {
        let mut doc = SketchDocument::new();
        let mut renderer = RecordingRenderer::new();
        let mut tool = CircleTool::new(ShapeStyle::default());
        let outcomes = drive(
            &mut tool,
            &mut doc,
            &mut renderer,
            &[
                PointerEvent::Down {
                    position: pt(0.0, 0.0),
                    button: MouseButton::Right,
                },
                PointerEvent::Up {
                    position: pt(5.0, 0.0),
                    button: MouseButton::Right,
                },
            ],
        );
        assert_eq!(outcomes, [ToolOutcome::Ignored, ToolOutcome::Ignored]);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut doc = SketchDocument::new();
        let mut renderer = RecordingRenderer::new();
        let mut tool = CircleTool::new(ShapeStyle::default());
        drive(&mut tool, &mut doc, &mut renderer, &[PointerEvent::down(pt(0.0, 0.0))]);
        let mut ctx = ToolContext::new(&mut doc, &mut renderer);
        let outcome = tool.handle_key(&mut ctx, &KeyEvent::Released("Escape".to_string()));
        assert_eq!(outcome, ToolOutcome::Ignored);
        assert!(tool.is_drawing());
    }

    #[test]
    fn test_needs_sync() {
        assert!(ToolOutcome::Committed(ShapeId::new_v4()).needs_sync());
        assert!(ToolOutcome::Finished.needs_sync());
        assert!(!ToolOutcome::Aborted.needs_sync());
        assert!(!ToolOutcome::Cancelled.needs_sync());
        assert!(!ToolOutcome::Previewed.needs_sync());
    }
}
