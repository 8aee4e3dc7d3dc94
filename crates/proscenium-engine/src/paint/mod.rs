//! Color model shared by the stage configuration and draw commands.

mod color;

pub use color::Color;
