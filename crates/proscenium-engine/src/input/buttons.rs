use bitflags::bitflags;

use super::types::MouseButton;

bitflags! {
    /// Set of mouse buttons. Button `n` (0-based, left first) occupies bit `n + 1`;
    /// bit 0 is never set.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct ButtonMask: u8 {
        const LEFT = 1 << 1;
        const RIGHT = 1 << 2;
        const MIDDLE = 1 << 3;
        const BACK = 1 << 4;
        const FORWARD = 1 << 5;
        const OTHER = 1 << 6;
    }
}

impl From<MouseButton> for ButtonMask {
    fn from(b: MouseButton) -> Self {
        match b {
            MouseButton::Left => ButtonMask::LEFT,
            MouseButton::Right => ButtonMask::RIGHT,
            MouseButton::Middle => ButtonMask::MIDDLE,
            MouseButton::Back => ButtonMask::BACK,
            MouseButton::Forward => ButtonMask::FORWARD,
            MouseButton::Other(_) => ButtonMask::OTHER,
        }
    }
}

/// Per-frame button summary handed to actors and scenes.
///
/// For every tracked button exactly one of `pressed`, `held` and `up` is set.
/// `released` is a subset of `up`: the buttons that were pressed or held on the
/// previous frame and are up now.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ButtonStates {
    pub pressed: ButtonMask,
    pub held: ButtonMask,
    pub up: ButtonMask,
    pub released: ButtonMask,
}

impl ButtonStates {
    /// Computes this frame's states from the previous frame's and the platform's
    /// pressed-this-frame and currently-down sets.
    pub fn advance(prev: ButtonStates, pressed_now: ButtonMask, down_now: ButtonMask) -> Self {
        let pressed = pressed_now;
        let held = down_now & !pressed;
        let up = !(pressed | held);
        let released = (prev.held | prev.pressed) & up;

        Self { pressed, held, up, released }
    }

    #[inline]
    pub fn is_pressed(&self, b: MouseButton) -> bool {
        self.pressed.contains(b.into())
    }

    #[inline]
    pub fn is_held(&self, b: MouseButton) -> bool {
        self.held.contains(b.into())
    }

    #[inline]
    pub fn is_up(&self, b: MouseButton) -> bool {
        self.up.contains(b.into())
    }

    #[inline]
    pub fn is_released(&self, b: MouseButton) -> bool {
        self.released.contains(b.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const L: ButtonMask = ButtonMask::LEFT;
    const NONE: ButtonMask = ButtonMask::empty();

    #[test]
    fn bit_layout_skips_bit_zero() {
        assert_eq!(ButtonMask::LEFT.bits(), 0b10);
        assert_eq!(ButtonMask::OTHER.bits(), 0b100_0000);
        assert_eq!(ButtonMask::all().bits() & 1, 0);
        assert_eq!(ButtonMask::from(MouseButton::Other(9)), ButtonMask::OTHER);
    }

    #[test]
    fn press_hold_release_sequence() {
        let f0 = ButtonStates::advance(ButtonStates::default(), NONE, NONE);
        assert!(f0.is_up(MouseButton::Left));
        assert!(!f0.is_released(MouseButton::Left));

        let f1 = ButtonStates::advance(f0, L, L);
        assert!(f1.is_pressed(MouseButton::Left));
        assert!(!f1.is_held(MouseButton::Left));
        assert!(!f1.is_up(MouseButton::Left));

        let f2 = ButtonStates::advance(f1, NONE, L);
        assert!(f2.is_held(MouseButton::Left));
        assert!(!f2.is_pressed(MouseButton::Left));

        let f3 = ButtonStates::advance(f2, NONE, NONE);
        assert!(f3.is_up(MouseButton::Left));
        assert!(f3.is_released(MouseButton::Left));

        let f4 = ButtonStates::advance(f3, NONE, NONE);
        assert!(f4.is_up(MouseButton::Left));
        assert!(!f4.is_released(MouseButton::Left));
    }

    #[test]
    fn click_inside_one_frame_releases_on_the_next() {
        // Pressed and let go between two pumps: reported pressed, not held.
        let f1 = ButtonStates::advance(ButtonStates::default(), L, NONE);
        assert!(f1.is_pressed(MouseButton::Left));
        assert!(!f1.is_held(MouseButton::Left));
        assert!(!f1.is_up(MouseButton::Left));

        let f2 = ButtonStates::advance(f1, NONE, NONE);
        assert!(f2.is_released(MouseButton::Left));
    }

    #[test]
    fn states_partition_all_buttons() {
        let prev = ButtonStates::advance(ButtonStates::default(), ButtonMask::RIGHT, ButtonMask::RIGHT);
        let s = ButtonStates::advance(prev, L, L | ButtonMask::RIGHT);

        assert_eq!(s.pressed | s.held | s.up, ButtonMask::all());
        assert!((s.pressed & s.held).is_empty());
        assert!((s.held & s.up).is_empty());
        assert!(s.released.difference(s.up).is_empty());
        assert_eq!(s.held, ButtonMask::RIGHT);
    }
}
