//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Platforms translate their window-system events into `InputEvent`s (see
//! [`platform::winit`] for the winit adapter) and feed them through
//! [`InputState::apply_event`]. The stage reads the resulting state once per frame
//! and condenses it into [`ButtonStates`] for actors.

mod buttons;
mod frame;
mod state;
mod types;

pub mod platform;

pub use buttons::{ButtonMask, ButtonStates};
pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};
