//! Sketch document: the shape collection and the current selection.

use crate::properties::{ShapeDraft, UpdateClass};
use crate::shapes::{Shape, ShapeDto, ShapeError, ShapeId};
use kurbo::{Rect, Vec2};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors raised while loading a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Malformed document JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// The single source of truth for what is drawn.
///
/// Shapes are kept in insertion order. At most one shape is selected, and a
/// selected shape is always visible: hiding or removing it drops the
/// selection.
#[derive(Debug, Clone, Default)]
pub struct SketchDocument {
    /// All shapes in the document, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Insertion order (back to front).
    z_order: Vec<ShapeId>,
    /// Currently selected shape.
    selected: Option<ShapeId>,
}

impl SketchDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape. Callers guarantee the id is not already present.
    pub fn add_shape(&mut self, shape: Shape) {
        let id = shape.id();
        if self.shapes.insert(id, shape).is_none() {
            self.z_order.push(id);
        }
    }

    /// Remove a shape, dropping the selection if it pointed at it.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let removed = self.shapes.remove(&id)?;
        self.z_order.retain(|&shape_id| shape_id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(removed)
    }

    /// Set the selection. The id is not checked against the document.
    pub fn select_shape(&mut self, id: Option<ShapeId>) {
        self.selected = id;
    }

    /// The selected shape, if the selection resolves.
    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.shapes.get(&id))
    }

    pub fn selected_shape_id(&self) -> Option<ShapeId> {
        self.selected
    }

    /// Get a shape by ID.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Get shapes in insertion order.
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Id of the shape at `index` in insertion order.
    pub fn shape_id_at(&self, index: usize) -> Option<ShapeId> {
        self.z_order.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.z_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Flip a shape's visibility and return the new value.
    ///
    /// Hiding the selected shape clears the selection. Unknown ids are ignored.
    pub fn toggle_visibility(&mut self, id: ShapeId) -> Option<bool> {
        let shape = self.shapes.get_mut(&id)?;
        let visible = !shape.is_visible();
        shape.set_visible(visible);
        if !visible && self.selected == Some(id) {
            self.selected = None;
        }
        Some(visible)
    }

    /// Translate the selected shape. Returns its id when something moved.
    pub fn move_selected_shape(&mut self, delta: Vec2) -> Option<ShapeId> {
        let id = self.selected?;
        let shape = self.shapes.get_mut(&id)?;
        shape.translate(delta);
        Some(id)
    }

    /// Recolor a shape. Returns false for unknown ids.
    pub fn set_color(&mut self, id: ShapeId, color: impl Into<String>) -> bool {
        match self.shapes.get_mut(&id) {
            Some(shape) => {
                shape.set_color(color);
                true
            }
            None => false,
        }
    }

    /// Serialized form of every shape, in insertion order.
    pub fn to_dtos(&self) -> Vec<ShapeDto> {
        self.shapes_ordered().map(Shape::to_dto).collect()
    }

    /// Replace the document with the shapes described by `dtos`.
    ///
    /// The document is cleared first; if any entry fails to reconstruct, or
    /// repeats an earlier id, the document stays empty.
    pub fn load_from_dtos(&mut self, dtos: &[ShapeDto]) -> Result<(), ShapeError> {
        self.clear();
        let mut seen = HashSet::with_capacity(dtos.len());
        let shapes = dtos
            .iter()
            .map(|dto| {
                if !seen.insert(dto.id) {
                    return Err(ShapeError::DuplicateId(dto.id));
                }
                Shape::from_dto(dto)
            })
            .collect::<Result<Vec<_>, _>>()?;
        for shape in shapes {
            self.add_shape(shape);
        }
        log::debug!("Loaded {} shapes", self.len());
        Ok(())
    }

    /// Remove every shape and the selection.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
        self.selected = None;
    }

    /// Pretty-printed JSON array of the serialized shapes.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&self.to_dtos())?)
    }

    /// Load from JSON text. Malformed text leaves the document untouched.
    pub fn load_from_json(&mut self, json: &str) -> Result<(), DocumentError> {
        let dtos: Vec<ShapeDto> = serde_json::from_str(json)?;
        self.load_from_dtos(&dtos)?;
        Ok(())
    }

    /// Write a property draft onto the shape it was taken from.
    ///
    /// Returns `Ok(None)` when the shape no longer exists.
    pub fn apply_draft(&mut self, draft: &ShapeDraft) -> Result<Option<UpdateClass>, ShapeError> {
        match self.shapes.get_mut(&draft.id()) {
            Some(shape) => draft.apply(shape).map(Some),
            None => Ok(None),
        }
    }

    /// Get the bounding box of all shapes.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes_ordered()
            .map(Shape::bounds)
            .reduce(|acc, rect| acc.union(rect))
    }
}
