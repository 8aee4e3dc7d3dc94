use std::collections::BTreeMap;

use anyhow::anyhow;

use crate::coords::{Rect, Vec2};
use crate::draw::{DrawCmd, DrawList};
use crate::input::{InputEvent, InputFrame, InputState};
use crate::paint::Color;
use crate::time::{FrameClock, FrameStep};

use super::{Platform, WindowOptions};

/// Counters recorded by [`HeadlessPlatform`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessStats {
    /// Number of `pump_events` calls.
    pub pumps: u64,
    /// Number of completed window passes (presented frames).
    pub frames: u64,
    pub stage_passes: u64,
    pub blits: u64,
    pub last_viewport: Option<Rect>,
    pub resizes: u64,
}

/// In-memory platform with a scripted timeline.
///
/// Frame numbers used for scripting are 0-based pump counts: events pushed for
/// frame `n` are delivered by the `n`-th call to `pump_events`.
#[derive(Debug)]
pub struct HeadlessPlatform {
    step: FrameStep,
    last_dt: f32,

    title: String,
    window_size: Vec2,
    stage_size: Vec2,
    opened: bool,
    closed: bool,
    resized: bool,
    fail_open: Option<String>,
    close_after: Option<u64>,

    events: BTreeMap<u64, Vec<InputEvent>>,
    resizes: BTreeMap<u64, Vec2>,

    input: InputState,
    input_frame: InputFrame,

    stage_clear: Option<Color>,
    window_clear: Option<Color>,
    stage_cmds: Vec<DrawCmd>,
    window_cmds: Vec<DrawCmd>,
    stats: HeadlessStats,
}

impl HeadlessPlatform {
    /// Headless platform at 60 fixed frames per second.
    pub fn new() -> Self {
        Self::with_step(FrameStep::fixed_fps(60.0))
    }

    /// Every frame advances by exactly `dt` seconds.
    pub fn with_fixed_step(dt: f32) -> Self {
        Self::with_step(FrameStep::Fixed(dt))
    }

    /// Frame deltas are measured with a wall clock.
    pub fn with_realtime_clock() -> Self {
        Self::with_step(FrameStep::Clock(FrameClock::new()))
    }

    fn with_step(step: FrameStep) -> Self {
        Self {
            step,
            last_dt: 0.0,
            title: String::new(),
            window_size: Vec2::zero(),
            stage_size: Vec2::zero(),
            opened: false,
            closed: false,
            resized: false,
            fail_open: None,
            close_after: None,
            events: BTreeMap::new(),
            resizes: BTreeMap::new(),
            input: InputState { focused: true, ..InputState::default() },
            input_frame: InputFrame::default(),
            stage_clear: None,
            window_clear: None,
            stage_cmds: Vec::new(),
            window_cmds: Vec::new(),
            stats: HeadlessStats::default(),
        }
    }

    /// Requests close once `frames` pumps have happened.
    pub fn close_after(mut self, frames: u64) -> Self {
        self.close_after = Some(frames);
        self
    }

    /// Makes `open` fail with `message`.
    pub fn failing_open(mut self, message: impl Into<String>) -> Self {
        self.fail_open = Some(message.into());
        self
    }

    /// Schedules `ev` for delivery on pump `frame`.
    pub fn push_event(&mut self, frame: u64, ev: InputEvent) {
        self.events.entry(frame).or_default().push(ev);
    }

    /// Schedules a window resize on pump `frame`.
    pub fn resize_at(&mut self, frame: u64, size: Vec2) {
        self.resizes.insert(frame, size);
    }

    /// Chaining variant of [`push_event`](Self::push_event).
    pub fn with_event(mut self, frame: u64, ev: InputEvent) -> Self {
        self.push_event(frame, ev);
        self
    }

    /// Requests close on the next `should_close` check.
    pub fn request_close(&mut self) {
        self.closed = true;
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn stage_size(&self) -> Vec2 {
        self.stage_size
    }

    pub fn stats(&self) -> &HeadlessStats {
        &self.stats
    }

    /// Commands of the last completed stage pass.
    pub fn stage_commands(&self) -> &[DrawCmd] {
        &self.stage_cmds
    }

    /// Commands of the last completed window pass.
    pub fn window_commands(&self) -> &[DrawCmd] {
        &self.window_cmds
    }

    pub fn stage_clear(&self) -> Option<Color> {
        self.stage_clear
    }

    pub fn window_clear(&self) -> Option<Color> {
        self.window_clear
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for HeadlessPlatform {
    fn open(&mut self, options: &WindowOptions) -> anyhow::Result<()> {
        if let Some(msg) = &self.fail_open {
            return Err(anyhow!("{msg}"));
        }

        self.title = options.title.clone();
        self.window_size = options.window_size;
        self.stage_size = options.stage_size;
        self.opened = true;
        self.closed = false;
        self.step.reset();

        log::debug!(
            "headless window '{}' opened at {}x{}",
            self.title, self.window_size.x, self.window_size.y
        );
        Ok(())
    }

    fn pump_events(&mut self) {
        let frame = self.stats.pumps;
        self.input_frame.clear();

        if let Some(size) = self.resizes.remove(&frame) {
            self.window_size = size;
            self.resized = true;
            self.stats.resizes += 1;
        }

        if let Some(events) = self.events.remove(&frame) {
            for ev in events {
                self.input.apply_event(&mut self.input_frame, ev);
            }
        }

        self.last_dt = self.step.next_dt();
        self.stats.pumps += 1;
    }

    fn should_close(&self) -> bool {
        self.closed || self.close_after.is_some_and(|n| self.stats.pumps >= n)
    }

    fn take_resized(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }

    fn window_size(&self) -> Vec2 {
        self.window_size
    }

    fn frame_time(&mut self) -> f32 {
        self.last_dt
    }

    fn input(&self) -> (&InputState, &InputFrame) {
        (&self.input, &self.input_frame)
    }

    fn begin_stage(&mut self, clear: Color) {
        self.stage_clear = Some(clear);
    }

    fn end_stage(&mut self, list: &DrawList) {
        self.stage_cmds.clear();
        self.stage_cmds.extend_from_slice(list.cmds());
        self.stats.stage_passes += 1;
    }

    fn begin_window(&mut self, clear: Color) {
        self.window_clear = Some(clear);
    }

    fn blit_stage(&mut self, dest: Rect) {
        self.stats.blits += 1;
        self.stats.last_viewport = Some(dest);
    }

    fn end_window(&mut self, list: &DrawList) {
        self.window_cmds.clear();
        self.window_cmds.extend_from_slice(list.cmds());
        self.stats.frames += 1;
    }

    fn close(&mut self) {
        self.opened = false;
        log::debug!("headless window '{}' closed after {} frames", self.title, self.stats.frames);
    }
}
