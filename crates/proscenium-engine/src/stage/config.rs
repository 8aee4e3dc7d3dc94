use crate::paint::Color;

use super::attributes::Attribute;
use super::error::ConfigError;

/// Construction-time stage options.
#[derive(Debug, Clone, PartialEq)]
pub struct StageConfig {
    pub title: String,
    /// Logical stage width in stage pixels.
    pub width: u32,
    /// Logical stage height in stage pixels.
    pub height: u32,
    /// Initial window size as a multiple of the stage size.
    pub scale: f32,
    /// Fixed number of actor slots.
    pub capacity: u32,
    /// Snap the viewport scale down to whole numbers (never below 1).
    pub integer_scale: bool,
    /// Window clear color around the letterboxed stage.
    pub border_color: Color,
    /// Stage surface clear color.
    pub background_color: Color,
    /// User attributes as `(id, name)` pairs.
    pub attributes: Vec<(Attribute, String)>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            title: "proscenium".to_string(),
            width: 256,
            height: 192,
            scale: 2.0,
            capacity: 64,
            integer_scale: false,
            border_color: Color::from_srgb_u8(0x00, 0x88, 0xff, 0xff),
            background_color: Color::from_srgb_u8(0x00, 0x00, 0xaa, 0xff),
            attributes: Vec::new(),
        }
    }
}

impl StageConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_integer_scale(mut self, on: bool) -> Self {
        self.integer_scale = on;
        self
    }

    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Declares a user attribute.
    pub fn with_attribute(mut self, attr: Attribute, name: impl Into<String>) -> Self {
        self.attributes.push((attr, name.into()));
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyStage { width: self.width, height: self.height });
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::InvalidScale(self.scale));
        }

        for (i, (attr, _)) in self.attributes.iter().enumerate() {
            if attr.is_reserved() {
                return Err(ConfigError::ReservedAttribute(*attr));
            }
            if self.attributes[..i].iter().any(|(a, _)| a == attr) {
                return Err(ConfigError::DuplicateAttribute(*attr));
            }
        }

        Ok(())
    }
}
