use crate::coords::{Rect, Vec2};
use crate::paint::Color;

use super::cmd::{CircleCmd, DrawCmd, LineCmd, RectCmd, TextCmd};

/// Recorded draw stream for one pass of one frame.
///
/// `push()` is O(1). Clearing keeps the allocation, so a list reused across
/// frames stops allocating once warmed.
#[derive(Debug, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded commands. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCmd::Rect(RectCmd { rect, color }));
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCmd::Circle(CircleCmd { center, radius, color }));
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        self.push(DrawCmd::Line(LineCmd { from, to, thickness, color }));
    }

    pub fn text(&mut self, origin: Vec2, text: impl Into<String>, size: f32, color: Color) {
        self.push(DrawCmd::Text(TextCmd { origin, text: text.into(), size, color }));
    }

    /// Commands in paint order (back-to-front).
    #[inline]
    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.cmds.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }
}
