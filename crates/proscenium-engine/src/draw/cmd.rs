use crate::coords::{Rect, Vec2};
use crate::paint::Color;

/// Filled axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub color: Color,
}

/// Filled circle.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Straight line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    pub thickness: f32,
    pub color: Color,
}

/// Single line of text anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub origin: Vec2,
    pub text: String,
    pub size: f32,
    pub color: Color,
}

/// Renderer-agnostic draw command.
///
/// Coordinates are stage pixels inside a stage pass and window pixels inside a
/// window pass.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Circle(CircleCmd),
    Line(LineCmd),
    Text(TextCmd),
}

impl DrawCmd {
    pub fn color(&self) -> Color {
        match self {
            DrawCmd::Rect(c) => c.color,
            DrawCmd::Circle(c) => c.color,
            DrawCmd::Line(c) => c.color,
            DrawCmd::Text(c) => c.color,
        }
    }
}
