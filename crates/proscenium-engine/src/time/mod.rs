//! Time subsystem.
//!
//! Provides frame timing for platforms without coupling to any of them.
//! Intended usage:
//! - real-time platforms keep one `FrameClock` and call `tick()` once per presented frame
//! - deterministic hosts (tests, replays) use `FrameStep::Fixed`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameStep, FrameTime};
