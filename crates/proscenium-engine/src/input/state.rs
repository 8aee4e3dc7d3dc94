use crate::coords::Vec2;

use super::buttons::ButtonMask;
use super::frame::InputFrame;
use super::types::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};

/// Current pointer state for a single window.
///
/// Holds "is down" information and the pointer position in window coordinates.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in window coordinates. `None` while outside the window.
    pub pointer_pos: Option<Vec2>,

    /// Currently held mouse buttons.
    pub buttons_down: ButtonMask,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Buttons released while unfocused never reach us; drop them now
                    // so nothing stays stuck down.
                    frame.buttons_released |= self.buttons_down;
                    self.buttons_down = ButtonMask::empty();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some(Vec2::new(*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y }) => {
                self.pointer_pos = Some(Vec2::new(*x, *y));

                let mask = ButtonMask::from(*button);
                match state {
                    MouseButtonState::Pressed => {
                        if !self.buttons_down.contains(mask) {
                            self.buttons_down.insert(mask);
                            frame.buttons_pressed.insert(mask);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.contains(mask) {
                            self.buttons_down.remove(mask);
                            frame.buttons_released.insert(mask);
                        }
                    }
                }
            }
        }

        frame.push_event(ev);
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(ButtonMask::from(btn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(state: &mut InputState, frame: &mut InputFrame, events: &[InputEvent]) {
        for ev in events {
            state.apply_event(frame, ev.clone());
        }
    }

    #[test]
    fn press_marks_down_and_pressed() {
        let (mut state, mut frame) = (InputState::default(), InputFrame::default());
        apply(&mut state, &mut frame, &[InputEvent::pressed(MouseButton::Left, 3.0, 4.0)]);

        assert!(state.button_down(MouseButton::Left));
        assert_eq!(frame.buttons_pressed, ButtonMask::LEFT);
        assert_eq!(state.pointer_pos, Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn click_within_one_frame_is_pressed_but_not_down() {
        let (mut state, mut frame) = (InputState::default(), InputFrame::default());
        apply(&mut state, &mut frame, &[
            InputEvent::pressed(MouseButton::Right, 0.0, 0.0),
            InputEvent::released(MouseButton::Right, 0.0, 0.0),
        ]);

        assert!(!state.button_down(MouseButton::Right));
        assert_eq!(frame.buttons_pressed, ButtonMask::RIGHT);
        assert_eq!(frame.buttons_released, ButtonMask::RIGHT);
        assert_eq!(frame.events.len(), 2);
    }

    #[test]
    fn repeated_press_is_not_a_new_transition() {
        let (mut state, mut frame) = (InputState::default(), InputFrame::default());
        apply(&mut state, &mut frame, &[InputEvent::pressed(MouseButton::Left, 0.0, 0.0)]);
        frame.clear();
        apply(&mut state, &mut frame, &[InputEvent::pressed(MouseButton::Left, 0.0, 0.0)]);

        assert!(frame.buttons_pressed.is_empty());
        assert!(state.button_down(MouseButton::Left));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let (mut state, mut frame) = (InputState::default(), InputFrame::default());
        apply(&mut state, &mut frame, &[InputEvent::released(MouseButton::Middle, 0.0, 0.0)]);
        assert!(frame.buttons_released.is_empty());
    }

    #[test]
    fn focus_loss_releases_held_buttons() {
        let (mut state, mut frame) = (InputState::default(), InputFrame::default());
        apply(&mut state, &mut frame, &[
            InputEvent::Focused(true),
            InputEvent::pressed(MouseButton::Left, 0.0, 0.0),
        ]);
        frame.clear();
        apply(&mut state, &mut frame, &[InputEvent::Focused(false)]);

        assert!(!state.focused);
        assert!(state.buttons_down.is_empty());
        assert_eq!(frame.buttons_released, ButtonMask::LEFT);
    }

    #[test]
    fn pointer_leave_clears_position() {
        let (mut state, mut frame) = (InputState::default(), InputFrame::default());
        apply(&mut state, &mut frame, &[InputEvent::moved(10.0, 12.0), InputEvent::PointerLeft]);
        assert_eq!(state.pointer_pos, None);
    }
}
