use super::{Rect, Vec2};

/// Placement of the stage surface inside the window.
///
/// The stage is scaled uniformly to the largest size that fits the window and
/// centered; the uncovered area is the letterbox border.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    /// Destination rectangle in window coordinates.
    pub rect: Rect,
    /// Window pixels per stage pixel.
    pub scale: f32,
}

impl Viewport {
    /// Fits a `stage`-sized surface into `window`.
    ///
    /// With `integer_scale` the factor is floored, but never below 1, so pixel art
    /// stays crisp at the cost of a wider border.
    pub fn fit(stage: Vec2, window: Vec2, integer_scale: bool) -> Self {
        let mut scale = (window.x / stage.x).min(window.y / stage.y);

        if integer_scale {
            scale = scale.floor().max(1.0);
        }

        if !scale.is_finite() || scale <= 0.0 {
            scale = 1.0;
        }

        let size = stage * scale;
        let origin = (window - size) * 0.5;

        Self {
            rect: Rect::from_origin_size(origin, size),
            scale,
        }
    }

    /// Converts a window-space point into stage space.
    #[inline]
    pub fn to_stage(&self, window_point: Vec2) -> Vec2 {
        (window_point - self.rect.origin) / self.scale
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.scale > 0.0 && self.scale.is_finite() && self.rect.origin.is_finite()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            rect: Rect::default(),
            scale: 1.0,
        }
    }
}
