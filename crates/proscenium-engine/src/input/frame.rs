use super::buttons::ButtonMask;
use super::types::InputEvent;

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held buttons, pointer position).
/// `InputFrame` provides events and transition sets for the current frame. Platforms
/// clear it when they start pumping the events of a new frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Mouse buttons that went down this frame.
    pub buttons_pressed: ButtonMask,

    /// Mouse buttons that went up this frame.
    pub buttons_released: ButtonMask,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.buttons_pressed = ButtonMask::empty();
        self.buttons_released = ButtonMask::empty();
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
