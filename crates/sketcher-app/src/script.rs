//! Scripted editing sessions.
//!
//! A script is a JSON array of steps, each tagged by `op`, replayed through an
//! [`Editor`] exactly as a host shell would deliver them:
//!
//! ```json
//! [
//!   { "op": "tool", "tool": "circle" },
//!   { "op": "pointer_down", "x": 0, "y": 0 },
//!   { "op": "pointer_move", "x": 2, "y": 0 },
//!   { "op": "pointer_up", "x": 2, "y": 0 },
//!   { "op": "edit", "shape": 0, "fields": { "radius": 5 } }
//! ]
//! ```
//!
//! Shapes are addressed by their index in document order.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use sketcher_core::{
    DraftError, Editor, KeyEvent, MouseButton, PointerEvent, Renderer, ShapeError, ShapeId,
    ToolKind, ToolOutcome,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading or replaying a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Step {step}: no shape at index {index}")]
    NoShapeAt { step: usize, index: usize },
    #[error("Step {step}: {source}")]
    Draft { step: usize, source: DraftError },
    #[error("Step {step}: {source}")]
    Shape { step: usize, source: ShapeError },
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Activate a drawing tool, or `select` for none.
    Tool { tool: ToolKind },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
    },
    PointerMove { x: f64, y: f64 },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
    },
    DoubleClick { x: f64, y: f64 },
    Key { key: String },
    /// Select a shape, or clear the selection when `shape` is absent.
    Select {
        #[serde(default)]
        shape: Option<usize>,
    },
    Delete { shape: usize },
    ToggleVisibility { shape: usize },
    /// Recolor a shape, or set the drawing color when `shape` is absent.
    SetColor {
        #[serde(default)]
        shape: Option<usize>,
        color: String,
    },
    MoveSelected { dx: f64, dy: f64 },
    /// Edit a shape through a property draft and commit it.
    Edit {
        shape: usize,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        fields: BTreeMap<String, f64>,
        #[serde(default)]
        add_points: Vec<Point>,
    },
}

/// What a replay did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    /// Shapes committed by drawing tools, in order.
    pub committed: Vec<ShapeId>,
}

/// A parsed script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        let text = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Replay every step, stopping at the first one that fails.
    pub fn run<R: Renderer>(&self, editor: &mut Editor<R>) -> Result<ReplaySummary, ScriptError> {
        let mut summary = ReplaySummary::default();
        for (step, action) in self.steps.iter().enumerate() {
            if let Some(outcome) = run_step(editor, step, action)? {
                log::debug!("Step {step}: {outcome:?}");
                if let ToolOutcome::Committed(id) = outcome {
                    summary.committed.push(id);
                }
            }
            summary.steps += 1;
        }
        Ok(summary)
    }
}

fn shape_at<R: Renderer>(
    editor: &Editor<R>,
    step: usize,
    index: usize,
) -> Result<ShapeId, ScriptError> {
    editor
        .document()
        .shape_id_at(index)
        .ok_or(ScriptError::NoShapeAt { step, index })
}

fn run_step<R: Renderer>(
    editor: &mut Editor<R>,
    step: usize,
    action: &Step,
) -> Result<Option<ToolOutcome>, ScriptError> {
    let outcome = match action {
        Step::Tool { tool } => {
            editor.activate_tool(*tool);
            None
        }
        Step::PointerDown { x, y, button } => Some(editor.handle_pointer(PointerEvent::Down {
            position: Point::new(*x, *y),
            button: *button,
        })),
        Step::PointerMove { x, y } => {
            Some(editor.handle_pointer(PointerEvent::moved(Point::new(*x, *y))))
        }
        Step::PointerUp { x, y, button } => Some(editor.handle_pointer(PointerEvent::Up {
            position: Point::new(*x, *y),
            button: *button,
        })),
        Step::DoubleClick { x, y } => {
            Some(editor.handle_pointer(PointerEvent::double_click(Point::new(*x, *y))))
        }
        Step::Key { key } => Some(editor.handle_key(&KeyEvent::pressed(key.as_str()))),
        Step::Select { shape } => {
            let id = shape.map(|index| shape_at(editor, step, index)).transpose()?;
            editor.select(id);
            None
        }
        Step::Delete { shape } => {
            let id = shape_at(editor, step, *shape)?;
            editor.delete_shape(id);
            None
        }
        Step::ToggleVisibility { shape } => {
            let id = shape_at(editor, step, *shape)?;
            editor.toggle_visibility(id);
            None
        }
        Step::SetColor { shape, color } => {
            match shape {
                Some(index) => {
                    let id = shape_at(editor, step, *index)?;
                    editor.set_color(id, color.as_str());
                }
                None => editor.set_current_color(color.as_str()),
            }
            None
        }
        Step::MoveSelected { dx, dy } => {
            editor.move_selected(Vec2::new(*dx, *dy));
            None
        }
        Step::Edit {
            shape,
            color,
            fields,
            add_points,
        } => {
            let id = shape_at(editor, step, *shape)?;
            let Some(mut draft) = editor.draft_for(id) else {
                return Err(ScriptError::NoShapeAt { step, index: *shape });
            };
            let draft_err = |source| ScriptError::Draft { step, source };
            if let Some(color) = color {
                draft.set_color(color.as_str());
            }
            for (path, value) in fields {
                draft.set_field(path, *value).map_err(draft_err)?;
            }
            for point in add_points {
                draft.push_point(*point).map_err(draft_err)?;
            }
            let class = editor
                .commit_draft(&draft)
                .map_err(|source| ScriptError::Shape { step, source })?;
            log::debug!("Step {step}: edit committed as {class:?}");
            None
        }
    };
    Ok(outcome)
}
