//! Editor session: the document, its renderer and the active tool.
//!
//! The editor is the only place where the document and the renderer meet.
//! Every mutation goes to the document first; the editor then tells the
//! renderer what changed.

use crate::document::{DocumentError, SketchDocument};
use crate::input::{KeyEvent, MouseButton, PointerEvent};
use crate::properties::{ShapeDraft, UpdateClass};
use crate::renderer::Renderer;
use crate::shapes::{DEFAULT_COLOR, Shape, ShapeDto, ShapeError, ShapeId, ShapeStyle};
use crate::storage::{Storage, StorageError};
use crate::tools::{DrawTool, ToolContext, ToolKind, ToolOutcome, create_tool};
use kurbo::Vec2;
use thiserror::Error;

/// Errors surfaced by editor persistence.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// An editing session over one document.
pub struct Editor<R: Renderer> {
    document: SketchDocument,
    renderer: R,
    current_color: String,
    tool: Option<Box<dyn DrawTool>>,
}

impl<R: Renderer> Editor<R> {
    /// Start a session on an empty document.
    pub fn new(renderer: R) -> Self {
        Self::with_document(SketchDocument::new(), renderer)
    }

    /// Start a session on an existing document and draw it.
    pub fn with_document(document: SketchDocument, renderer: R) -> Self {
        let mut editor = Self {
            document,
            renderer,
            current_color: DEFAULT_COLOR.to_string(),
            tool: None,
        };
        editor.sync();
        editor
    }

    pub fn document(&self) -> &SketchDocument {
        &self.document
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Color given to newly drawn shapes.
    pub fn current_color(&self) -> &str {
        &self.current_color
    }

    /// Change the drawing color. An active tool is recreated with the new
    /// color, dropping any gesture in progress.
    pub fn set_current_color(&mut self, color: impl Into<String>) {
        self.current_color = color.into();
        let active = self.active_tool();
        if active != ToolKind::Select {
            self.activate_tool(active);
        }
    }

    /// The active tool, or [`ToolKind::Select`] when none is.
    pub fn active_tool(&self) -> ToolKind {
        self.tool.as_ref().map_or(ToolKind::Select, |t| t.kind())
    }

    /// Whether the active tool is in the middle of a gesture.
    pub fn is_drawing(&self) -> bool {
        self.tool.as_ref().is_some_and(|t| t.is_drawing())
    }

    /// Switch tools. The previous tool is torn down before the new one exists.
    pub fn activate_tool(&mut self, kind: ToolKind) {
        self.deactivate_tool();
        self.tool = create_tool(kind, ShapeStyle::with_color(self.current_color.as_str()));
        self.renderer.update_hover(None);
        log::debug!("Activated tool: {kind}");
    }

    /// Tear down the active tool; false when there was none.
    fn deactivate_tool(&mut self) -> bool {
        let Some(mut tool) = self.tool.take() else {
            return false;
        };
        tool.destroy(&mut self.renderer);
        log::debug!("Destroyed tool: {}", tool.kind());
        true
    }

    /// Feed a pointer event (screen coordinates).
    ///
    /// With a tool active the event goes to the tool. Otherwise a left
    /// release picks and selects, and a move updates the hover highlight.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> ToolOutcome {
        if let Some(tool) = self.tool.as_mut() {
            let mut ctx = ToolContext::new(&mut self.document, &mut self.renderer);
            let outcome = tool.handle_pointer(&mut ctx, event);
            if outcome.needs_sync() {
                self.sync();
            }
            return outcome;
        }

        match event {
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => {
                let hit = self.renderer.pick(position);
                self.document.select_shape(hit);
                self.renderer.update_selection(hit);
            }
            PointerEvent::Move { position } => {
                self.renderer.hover(position);
            }
            _ => {}
        }
        ToolOutcome::Ignored
    }

    /// Feed a key event.
    ///
    /// Escape always ends up in select mode: an active tool sees it first,
    /// is then destroyed, and the scene is re-synced. Without a tool Escape
    /// does nothing.
    pub fn handle_key(&mut self, event: &KeyEvent) -> ToolOutcome {
        let mut outcome = ToolOutcome::Ignored;
        if let Some(tool) = self.tool.as_mut() {
            let mut ctx = ToolContext::new(&mut self.document, &mut self.renderer);
            outcome = tool.handle_key(&mut ctx, event);
            if outcome.needs_sync() {
                self.sync();
            }
        }
        if event.is_escape() && self.deactivate_tool() {
            self.sync();
        }
        outcome
    }

    /// Redraw every shape from the document.
    pub fn sync(&mut self) {
        let shapes: Vec<&Shape> = self.document.shapes_ordered().collect();
        self.renderer.render(&shapes);
    }

    /// Select a shape from a panel. Hidden or unknown shapes select nothing.
    pub fn select(&mut self, id: Option<ShapeId>) {
        self.deactivate_tool();
        let id = id.filter(|id| self.document.shape(*id).is_some_and(Shape::is_visible));
        self.document.select_shape(id);
        self.renderer.update_selection(id);
    }

    /// Delete a shape.
    pub fn delete_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let was_selected = self.document.selected_shape_id() == Some(id);
        let removed = self.document.remove_shape(id)?;
        self.renderer.remove_shape(id);
        if was_selected {
            self.renderer.update_selection(None);
        }
        log::debug!("Deleted {} {id}", removed.kind());
        Some(removed)
    }

    /// Show or hide a shape; returns the new visibility.
    pub fn toggle_visibility(&mut self, id: ShapeId) -> Option<bool> {
        let was_selected = self.document.selected_shape_id() == Some(id);
        let visible = self.document.toggle_visibility(id)?;
        if let Some(shape) = self.document.shape(id) {
            self.renderer.update_visibility(shape);
        }
        if was_selected && self.document.selected_shape_id().is_none() {
            self.renderer.update_selection(None);
        }
        Some(visible)
    }

    /// Recolor a shape; false for unknown ids.
    pub fn set_color(&mut self, id: ShapeId, color: impl Into<String>) -> bool {
        if !self.document.set_color(id, color) {
            return false;
        }
        if let Some(shape) = self.document.shape(id) {
            self.renderer.update_material(shape);
        }
        true
    }

    /// Translate the selected shape.
    pub fn move_selected(&mut self, delta: Vec2) -> Option<ShapeId> {
        let id = self.document.move_selected_shape(delta)?;
        if let Some(shape) = self.document.shape(id) {
            self.renderer.update_transform(shape);
        }
        Some(id)
    }

    /// A property draft of the selected shape.
    pub fn draft_for_selection(&self) -> Option<ShapeDraft> {
        self.document.selected_shape().map(ShapeDraft::from_shape)
    }

    /// A property draft of any shape.
    pub fn draft_for(&self, id: ShapeId) -> Option<ShapeDraft> {
        self.document.shape(id).map(ShapeDraft::from_shape)
    }

    /// Write an edited draft back and update the renderer accordingly.
    ///
    /// Returns `Ok(None)` when the shape has been deleted in the meantime.
    pub fn commit_draft(&mut self, draft: &ShapeDraft) -> Result<Option<UpdateClass>, ShapeError> {
        let Some(class) = self.document.apply_draft(draft)? else {
            return Ok(None);
        };
        if let Some(shape) = self.document.shape(draft.id()) {
            match class {
                UpdateClass::Rebuild => self.renderer.update_object(shape),
                UpdateClass::Transform => {
                    self.renderer.update_transform(shape);
                    self.renderer.update_material(shape);
                }
            }
        }
        self.renderer
            .update_selection(self.document.selected_shape_id());
        log::debug!("Committed {class:?} edit to {}", draft.id());
        Ok(Some(class))
    }

    /// Replace the document with `dtos` and redraw everything.
    ///
    /// A reconstruction failure leaves the document, and the scene, empty.
    pub fn load_dtos(&mut self, dtos: &[ShapeDto]) -> Result<(), ShapeError> {
        let result = self.document.load_from_dtos(dtos);
        self.renderer.clear();
        self.sync();
        self.renderer.update_selection(None);
        match &result {
            Ok(()) => log::info!("Loaded document with {} shapes", self.document.len()),
            Err(e) => log::error!("Failed to load document: {e}"),
        }
        result
    }

    /// Load from JSON text. Malformed text leaves the session untouched.
    pub fn load_json(&mut self, json: &str) -> Result<(), DocumentError> {
        let dtos: Vec<ShapeDto> = serde_json::from_str(json).inspect_err(|e| {
            log::warn!("Ignoring malformed document: {e}");
        })?;
        self.load_dtos(&dtos)?;
        Ok(())
    }

    /// Load the document stored under `name`.
    ///
    /// Storage errors leave the session untouched.
    pub fn load_from(&mut self, storage: &dyn Storage, name: &str) -> Result<(), EditorError> {
        let dtos = storage.load(name)?;
        self.load_dtos(&dtos)?;
        Ok(())
    }

    /// Save the document under `name`.
    pub fn save_to(&self, storage: &dyn Storage, name: &str) -> Result<(), EditorError> {
        storage.save(name, &self.document.to_dtos())?;
        log::info!("Saved document {name:?} ({} shapes)", self.document.len());
        Ok(())
    }

    /// End the session, tearing down the active tool.
    pub fn into_parts(mut self) -> (SketchDocument, R) {
        self.deactivate_tool();
        (self.document, self.renderer)
    }
}
