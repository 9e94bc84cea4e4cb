//! Sketcher Render Library
//!
//! Retained scene implementation of the core [`Renderer`](sketcher_core::Renderer):
//! camera transform, stroke hit testing, color resolution and the per-shape
//! scene objects a drawing backend consumes.

pub mod camera;
pub mod color;
pub mod hit;
pub mod scene;

pub use camera::Camera;
pub use color::{parse_hex_color, resolve_color};
pub use hit::{distance_to_shape, hit_test};
pub use scene::{DEFAULT_PICK_TOLERANCE, DrawItem, Highlight, SceneObject, SceneRenderer};
