use std::fmt;

use crate::coords::Vec2;

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MouseButton::Other(code) => write!(f, "Other({code})"),
            other => write!(f, "{:?}", other),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Pointer move event in window coordinates (logical pixels).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

impl PointerMoveEvent {
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Pointer button event.
///
/// Coordinates are included so a press can be attributed to a position even when
/// no move event preceded it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
}

/// Platform-agnostic input events emitted by a platform.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

impl InputEvent {
    /// Shorthand for a pointer move to `(x, y)`.
    pub fn moved(x: f32, y: f32) -> Self {
        Self::PointerMoved(PointerMoveEvent { x, y })
    }

    /// Shorthand for a button press at `(x, y)`.
    pub fn pressed(button: MouseButton, x: f32, y: f32) -> Self {
        Self::PointerButton(PointerButtonEvent { button, state: MouseButtonState::Pressed, x, y })
    }

    /// Shorthand for a button release at `(x, y)`.
    pub fn released(button: MouseButton, x: f32, y: f32) -> Self {
        Self::PointerButton(PointerButtonEvent { button, state: MouseButtonState::Released, x, y })
    }
}
