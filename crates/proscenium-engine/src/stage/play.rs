use crate::coords::{Vec2, Viewport};
use crate::input::{ButtonStates, InputFrame, InputState, MouseButton};

/// Per-frame context handed to every hook.
///
/// Refreshed exactly once per frame, before timers and ticks run.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Play {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Index of the current frame, starting at 0.
    pub frame: u64,

    /// Pointer in stage pixels, sub-pixel precise.
    pub pointer: Vec2,
    /// Pointer stage pixel (floored `pointer`).
    pub pointer_px: (i32, i32),
    /// Pointer in window coordinates.
    pub window_pointer: Vec2,
    /// Whether the pointer is inside the window.
    pub pointer_present: bool,

    pub stage_size: Vec2,
    pub window_size: Vec2,
    /// Window pixels per stage pixel.
    pub scale: f32,

    pub buttons: ButtonStates,
}

impl Play {
    pub(crate) fn new(stage_size: Vec2, window_size: Vec2, scale: f32) -> Self {
        Self { stage_size, window_size, scale, ..Self::default() }
    }

    /// Frame delta in milliseconds, the unit timers run on.
    #[inline]
    pub fn dt_ms(&self) -> f32 {
        self.dt * 1000.0
    }

    /// Whether the pointer lies on the stage surface.
    pub fn pointer_on_stage(&self) -> bool {
        self.pointer_present
            && (0.0..self.stage_size.x).contains(&self.pointer.x)
            && (0.0..self.stage_size.y).contains(&self.pointer.y)
    }

    #[inline]
    pub fn pressed(&self, b: MouseButton) -> bool {
        self.buttons.is_pressed(b)
    }

    #[inline]
    pub fn held(&self, b: MouseButton) -> bool {
        self.buttons.is_held(b)
    }

    #[inline]
    pub fn released(&self, b: MouseButton) -> bool {
        self.buttons.is_released(b)
    }

    pub(crate) fn refresh(
        &mut self,
        dt: f32,
        frame: u64,
        viewport: &Viewport,
        window_size: Vec2,
        input: &InputState,
        input_frame: &InputFrame,
    ) {
        self.dt = dt;
        self.frame = frame;
        self.window_size = window_size;
        self.scale = viewport.scale;

        // Without a pointer in the window the last known position is kept.
        self.pointer_present = input.pointer_pos.is_some();
        if let Some(p) = input.pointer_pos {
            self.window_pointer = p;
        }
        self.pointer = viewport.to_stage(self.window_pointer);
        let px = self.pointer.floor();
        self.pointer_px = (px.x as i32, px.y as i32);

        self.buttons = ButtonStates::advance(self.buttons, input_frame.buttons_pressed, input.buttons_down);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ButtonMask, InputEvent};

    fn viewport() -> Viewport {
        // 256x192 stage in an 800x384 window: scale 2, origin (144, 0).
        Viewport::fit(Vec2::new(256.0, 192.0), Vec2::new(800.0, 384.0), false)
    }

    #[test]
    fn pointer_converted_to_stage_space() {
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        input.apply_event(&mut frame, InputEvent::moved(155.0, 21.0));

        let mut play = Play::new(Vec2::new(256.0, 192.0), Vec2::new(800.0, 384.0), 2.0);
        play.refresh(0.25, 3, &viewport(), Vec2::new(800.0, 384.0), &input, &frame);

        assert_eq!(play.pointer, Vec2::new(5.5, 10.5));
        assert_eq!(play.pointer_px, (5, 10));
        assert_eq!(play.frame, 3);
        assert_eq!(play.dt_ms(), 250.0);
        assert!(play.pointer_on_stage());
    }

    #[test]
    fn pointer_in_letterbox_is_off_stage() {
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        input.apply_event(&mut frame, InputEvent::moved(10.0, 10.0));

        let mut play = Play::new(Vec2::new(256.0, 192.0), Vec2::new(800.0, 384.0), 2.0);
        play.refresh(0.0, 0, &viewport(), Vec2::new(800.0, 384.0), &input, &frame);

        assert_eq!(play.pointer_px, (-67, 5));
        assert!(!play.pointer_on_stage());
    }

    #[test]
    fn buttons_advance_between_refreshes() {
        let vp = viewport();
        let size = Vec2::new(800.0, 384.0);
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        let mut play = Play::default();

        input.apply_event(&mut frame, InputEvent::pressed(MouseButton::Left, 200.0, 100.0));
        play.refresh(0.1, 0, &vp, size, &input, &frame);
        assert!(play.pressed(MouseButton::Left));

        frame.clear();
        play.refresh(0.1, 1, &vp, size, &input, &frame);
        assert!(play.held(MouseButton::Left));

        input.apply_event(&mut frame, InputEvent::released(MouseButton::Left, 200.0, 100.0));
        play.refresh(0.1, 2, &vp, size, &input, &frame);
        assert!(play.released(MouseButton::Left));
        assert_eq!(play.buttons.up, ButtonMask::all());
    }
}
