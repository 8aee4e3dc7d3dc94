//! Proscenium engine crate.
//!
//! A per-frame runtime for small 2D programs: a fixed pool of actors with
//! deterministic tick and draw order, tag-like attributes, deferred scene
//! changes and millisecond timers, all driven by one frame loop. Windowing and
//! rendering sit behind the `platform::Platform` trait.

pub mod input;
pub mod platform;
pub mod stage;
pub mod time;

pub mod logging;
pub mod coords;
pub mod draw;
pub mod paint;

pub use stage::{
    Actor, ActorHandle, Attribute, Capabilities, FrameControl, Play, Scene, SceneControl, Stage,
    StageConfig, Timer, TimerId, ZIndex,
};
