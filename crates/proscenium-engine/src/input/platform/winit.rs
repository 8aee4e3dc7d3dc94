//! winit adapter for a window-backed [`Platform`](crate::platform::Platform).
//!
//! The crate ships no winit platform of its own. A host that implements
//! `Platform` on top of a winit event loop forwards each `WindowEvent` through
//! [`translate_window_event`] and applies the result to the `InputState` and
//! `InputFrame` it hands out from `Platform::input`:
//!
//! ```no_run
//! use proscenium_engine::input::platform::winit::translate_window_event;
//! use proscenium_engine::input::{InputFrame, InputState};
//! use winit::event::WindowEvent;
//!
//! fn on_window_event(input: &mut InputState, frame: &mut InputFrame, scale_factor: f64, event: &WindowEvent) {
//!     if let Some(ev) = translate_window_event(scale_factor, input, event) {
//!         input.apply_event(frame, ev);
//!     }
//! }
//! ```

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};

use crate::input::{InputEvent, InputState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// `scale_factor` is the window's current DPI scale; positions are reported in
/// logical pixels. Returns `None` for events not represented by the input subsystem.
pub fn translate_window_event(
    scale_factor: f64,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(scale_factor, *position);
            Some(InputEvent::PointerMoved(PointerMoveEvent { x, y }))
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            // winit 0.30 has no cursor query; use the tracked pointer position.
            let (x, y) = state.pointer_pos.map(|p| (p.x, p.y)).unwrap_or((0.0, 0.0));

            Some(InputEvent::PointerButton(PointerButtonEvent {
                button: map_mouse_button(*button),
                state: map_button_state(*st),
                x,
                y,
            }))
        }

        _ => None,
    }
}

fn to_logical_f32(scale_factor: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x as f32, logical.y as f32)
}

pub fn map_button_state(st: ElementState) -> MouseButtonState {
    match st {
        ElementState::Pressed => MouseButtonState::Pressed,
        ElementState::Released => MouseButtonState::Released,
    }
}

pub fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}
