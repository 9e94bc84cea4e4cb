//! Pointer and keyboard events as delivered by the host shell.
//!
//! Positions are in screen coordinates; tools convert them with
//! [`Renderer::world_point`](crate::renderer::Renderer::world_point).

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Key name the shell reports for the escape key.
pub const ESCAPE_KEY: &str = "Escape";

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Pointer event type for unified mouse/touch handling.
///
/// A double click arrives as its own event after the two presses that make it
/// up; it carries no extra point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    DoubleClick {
        position: Point,
    },
}

impl PointerEvent {
    /// Left button press at `position`.
    pub fn down(position: Point) -> Self {
        PointerEvent::Down {
            position,
            button: MouseButton::Left,
        }
    }

    /// Left button release at `position`.
    pub fn up(position: Point) -> Self {
        PointerEvent::Up {
            position,
            button: MouseButton::Left,
        }
    }

    pub fn moved(position: Point) -> Self {
        PointerEvent::Move { position }
    }

    pub fn double_click(position: Point) -> Self {
        PointerEvent::DoubleClick { position }
    }

    /// Screen position of the event.
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::DoubleClick { position } => position,
        }
    }

    /// The button involved, for press and release events.
    pub fn button(&self) -> Option<MouseButton> {
        match *self {
            PointerEvent::Down { button, .. } | PointerEvent::Up { button, .. } => Some(button),
            PointerEvent::Move { .. } | PointerEvent::DoubleClick { .. } => None,
        }
    }
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

impl KeyEvent {
    pub fn pressed(key: impl Into<String>) -> Self {
        KeyEvent::Pressed(key.into())
    }

    pub fn key(&self) -> &str {
        match self {
            KeyEvent::Pressed(key) | KeyEvent::Released(key) => key,
        }
    }

    /// True for a press of the escape key.
    pub fn is_escape(&self) -> bool {
        matches!(self, KeyEvent::Pressed(key) if key == ESCAPE_KEY)
    }
}
