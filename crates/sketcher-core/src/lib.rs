//! Sketcher Core Library
//!
//! Platform-agnostic core of the Sketcher 2D vector editor: the shape model
//! and its serialized form, the document, the drawing tools, property editing
//! and the editor session that ties them to a renderer.

pub mod document;
pub mod editor;
pub mod input;
pub mod properties;
pub mod renderer;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use document::{DocumentError, SketchDocument};
pub use editor::{Editor, EditorError};
pub use input::{ESCAPE_KEY, KeyEvent, MouseButton, PointerEvent};
pub use properties::{DraftError, DraftGeometry, ShapeDraft, UpdateClass, classify};
pub use renderer::{Preview, Renderer};
pub use shapes::{
    Circle, DEFAULT_COLOR, Ellipse, Line, Polyline, Shape, ShapeDto, ShapeError, ShapeId,
    ShapeKind, ShapeStyle, ShapeTrait,
};
pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
pub use tools::{DrawTool, MIN_EXTENT, ToolContext, ToolKind, ToolOutcome, create_tool};
