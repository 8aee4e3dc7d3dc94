use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a stalled process (debugger, minimized window) does not
/// hand a multi-second step to every actor and timer at once.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps (0.1 ms ..= 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the clock baseline.
    ///
    /// Call after the window is opened so the first frame does not include setup time.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Source of per-frame delta time for a platform.
#[derive(Debug, Clone)]
pub enum FrameStep {
    /// Every frame advances by the same number of seconds.
    Fixed(f32),
    /// Delta time is measured with a wall clock.
    Clock(FrameClock),
}

impl FrameStep {
    /// Fixed step of `1 / fps` seconds.
    pub fn fixed_fps(fps: f32) -> Self {
        Self::Fixed(1.0 / fps)
    }

    /// Returns the delta time of the next frame in seconds.
    pub fn next_dt(&mut self) -> f32 {
        match self {
            Self::Fixed(dt) => *dt,
            Self::Clock(clock) => clock.tick().dt,
        }
    }

    /// Re-baselines a wall clock; no-op for fixed steps.
    pub fn reset(&mut self) {
        if let Self::Clock(clock) = self {
            clock.reset();
        }
    }
}

impl Default for FrameStep {
    fn default() -> Self {
        Self::Clock(FrameClock::new())
    }
}
