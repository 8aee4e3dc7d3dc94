//! Window/render collaborator seam.
//!
//! The stage never talks to a window system directly. A [`Platform`] opens the
//! window and the off-screen stage surface, pumps events into the input state,
//! and consumes the draw lists recorded each frame. [`HeadlessPlatform`] is the
//! in-memory implementation used by tests and the demo.

mod headless;

pub use headless::{HeadlessPlatform, HeadlessStats};

use crate::coords::{Rect, Vec2};
use crate::draw::DrawList;
use crate::input::{InputFrame, InputState};
use crate::paint::Color;

/// Parameters for opening the window and the stage surface.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowOptions {
    pub title: String,
    /// Initial window size in logical pixels.
    pub window_size: Vec2,
    /// Size of the off-screen stage surface in stage pixels.
    pub stage_size: Vec2,
}

/// Contract between the stage frame loop and a window/render backend.
///
/// Call order within one frame is fixed: `pump_events`, `take_resized`,
/// `frame_time`, `input`, then `begin_stage`/`end_stage` followed by
/// `begin_window`/`blit_stage`/`end_window`.
pub trait Platform {
    /// Creates the window and the stage surface. Called once before the first frame.
    fn open(&mut self, options: &WindowOptions) -> anyhow::Result<()>;

    /// Processes pending window-system events and updates the input state.
    fn pump_events(&mut self);

    /// Whether the user or the host asked for the window to close.
    fn should_close(&self) -> bool;

    /// Returns `true` once after the window size changed.
    fn take_resized(&mut self) -> bool;

    /// Current window size in logical pixels.
    fn window_size(&self) -> Vec2;

    /// Seconds elapsed since the previous frame.
    fn frame_time(&mut self) -> f32;

    fn input(&self) -> (&InputState, &InputFrame);

    /// Starts drawing into the stage surface, cleared to `clear`.
    fn begin_stage(&mut self, clear: Color);
    fn end_stage(&mut self, list: &DrawList);

    /// Starts drawing into the window, cleared to `clear` (the letterbox border).
    fn begin_window(&mut self, clear: Color);

    /// Draws the stage surface into `dest` (window coordinates).
    fn blit_stage(&mut self, dest: Rect);
    fn end_window(&mut self, list: &DrawList);

    /// Releases window resources. Called once after the last frame.
    fn close(&mut self);
}
