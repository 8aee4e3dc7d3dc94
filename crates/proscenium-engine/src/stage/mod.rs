//! Stage runtime.
//!
//! The [`Stage`] owns a fixed pool of actors, the attribute index, the current
//! scene and the running timers, and drives them from a single frame loop:
//!
//! 1. apply a pending scene change
//! 2. pump platform events, handle resizes, refresh [`Play`]
//! 3. step timers
//! 4. tick the scene, then the actors (reclaiming unregistered ones first)
//! 5. stage pass, then window pass
//!
//! Nothing is removed while it is being iterated: unregistering an actor,
//! stopping a timer from a timer callback and changing scene are all queued and
//! applied at a defined point of a later step.

mod actor;
mod attributes;
mod config;
mod error;
mod order;
mod play;
mod pool;
mod scene;
mod timer;
mod z_index;


pub use actor::{Actor, Capabilities};
pub use attributes::Attribute;
pub use config::StageConfig;
pub use error::{AttributeError, ConfigError, TimerError};
pub use play::Play;
pub use pool::ActorHandle;
pub use scene::{Scene, SceneControl, SceneState};
pub use timer::{Timer, TimerId, TimerProgress};
pub use z_index::ZIndex;

use std::any::Any;

use anyhow::Context;

use crate::coords::{Vec2, Viewport};
use crate::draw::DrawList;
use crate::platform::{Platform, WindowOptions};

use attributes::AttributeIndex;
use pool::ActorPool;
use scene::SceneMachine;
use timer::TimerList;

/// What the stage is doing right now.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StageProcess {
    /// Between frames, or not playing.
    Paused,
    /// Timers, scene and actor ticks.
    Update,
    /// Stage pass.
    Draw,
    /// Window pass.
    WindowDraw,
    SwapScene,
    Shutdown,
}

/// Result of one frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameControl {
    Continue,
    /// No scene is left to run.
    Finished,
}

/// Per-frame runtime for actors, attributes, scenes and timers.
pub struct Stage {
    config: StageConfig,
    pool: ActorPool,
    attributes: AttributeIndex,
    scenes: SceneMachine,
    timers: TimerList,

    play: Play,
    viewport: Viewport,
    process: StageProcess,
    frame: u64,

    stage_list: DrawList,
    window_list: DrawList,
    tick_scratch: Vec<ActorHandle>,
}

impl Stage {
    /// Validates `config` and builds an idle stage.
    pub fn new(config: StageConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let stage_size = Vec2::new(config.width as f32, config.height as f32);
        let window_size = stage_size * config.scale;
        let viewport = Viewport::fit(stage_size, window_size, config.integer_scale);

        Ok(Self {
            pool: ActorPool::new(config.capacity),
            attributes: AttributeIndex::new(&config.attributes),
            scenes: SceneMachine::new(),
            timers: TimerList::new(),
            play: Play::new(stage_size, window_size, viewport.scale),
            viewport,
            process: StageProcess::Paused,
            frame: 0,
            stage_list: DrawList::new(),
            window_list: DrawList::new(),
            tick_scratch: Vec::new(),
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    #[inline]
    pub fn process(&self) -> StageProcess {
        self.process
    }

    /// Frame context of the current (or last) frame.
    #[inline]
    pub fn play_context(&self) -> &Play {
        &self.play
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of frames run so far.
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn stage_size(&self) -> Vec2 {
        self.play.stage_size
    }

    // ── actors ──────────────────────────────────────────────────────────────

    /// Registers `actor` at draw priority `z` and calls its `on_enter`.
    ///
    /// # Panics
    /// Panics when every actor slot is occupied.
    pub fn register<A: Actor>(&mut self, actor: A, z: impl Into<ZIndex>) -> ActorHandle {
        self.register_boxed(Box::new(actor), z.into())
    }

    pub fn register_boxed(&mut self, mut actor: Box<dyn Actor>, z: ZIndex) -> ActorHandle {
        let caps = actor.capabilities();
        let handle = self.pool.acquire(z, caps);

        for attr in caps.implied_attributes() {
            self.attributes.insert(attr, handle);
        }
        for attr in actor.attributes() {
            if attr.is_reserved() {
                log::warn!("{} declares {}; ignored", actor.name(), AttributeError::Reserved(attr));
            } else if !self.attributes.insert(attr, handle) && !self.attributes.is_known(attr) {
                log::warn!("{} declares {}; ignored", actor.name(), AttributeError::Unknown(attr));
            }
        }

        log::debug!("actor {handle} ({}) registered at {z}", actor.name());

        actor.on_enter(self, handle);
        self.pool.restore(handle, actor);
        handle
    }

    /// Queues the actor for reclamation at the start of the next tick pass.
    ///
    /// The actor drops out of every attribute right away and is only listed under
    /// `PENDING_REMOVAL`. It keeps ticking and drawing for the rest of the current
    /// frame, and its `on_leave` runs exactly once. Returns `false` (and warns) for a handle
    /// that is no longer on stage.
    ///
    /// # Panics
    /// Panics if the handle does not belong to this stage.
    pub fn unregister(&mut self, handle: ActorHandle) -> bool {
        if !self.pool.is_live(handle) {
            log::warn!("unregister: actor {handle} is not on stage");
            return false;
        }
        if self.pool.schedule_release(handle) {
            self.attributes.strip(handle);
            self.attributes.insert(Attribute::PENDING_REMOVAL, handle);
            log::debug!("actor {handle} queued for removal");
        }
        true
    }

    /// Whether `handle` names a registered actor (pending removal included).
    pub fn is_registered(&self, handle: ActorHandle) -> bool {
        self.pool.is_live(handle)
    }

    pub fn is_pending_removal(&self, handle: ActorHandle) -> bool {
        self.pool.is_pending(handle)
    }

    /// Moves the actor to draw priority `z`. The draw order follows after the
    /// current tick pass. Returns `false` if the handle is stale or `z` is unchanged.
    pub fn set_zindex(&mut self, handle: ActorHandle, z: impl Into<ZIndex>) -> bool {
        self.pool.set_zindex(handle, z.into())
    }

    pub fn zindex(&self, handle: ActorHandle) -> Option<ZIndex> {
        self.pool.zindex(handle)
    }

    /// The actor behind `handle`. `None` for stale handles and while the actor
    /// runs one of its own hooks.
    pub fn actor(&self, handle: ActorHandle) -> Option<&(dyn Actor + 'static)> {
        self.pool.actor(handle)
    }

    pub fn actor_mut(&mut self, handle: ActorHandle) -> Option<&mut (dyn Actor + 'static)> {
        self.pool.actor_mut(handle)
    }

    pub fn actor_as<A: Actor>(&self, handle: ActorHandle) -> Option<&A> {
        self.actor(handle).and_then(|a| (a as &dyn Any).downcast_ref::<A>())
    }

    pub fn actor_as_mut<A: Actor>(&mut self, handle: ActorHandle) -> Option<&mut A> {
        self.actor_mut(handle).and_then(|a| (a as &mut dyn Any).downcast_mut::<A>())
    }

    /// Number of occupied slots, pending removals included.
    pub fn actor_count(&self) -> usize {
        self.pool.len()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Drawn actors back-to-front, as of the last draw-order repair.
    pub fn draw_order(&self) -> Vec<ActorHandle> {
        self.pool.draw_order()
    }

    /// Reclaims queued actors: `on_leave`, attribute strip, slot release.
    fn reclaim_pending(&mut self) {
        for handle in self.pool.take_reclaim() {
            self.reclaim(handle);
        }
    }

    fn reclaim(&mut self, handle: ActorHandle) {
        if !self.pool.is_live(handle) {
            return;
        }
        if let Some(mut actor) = self.pool.take(handle) {
            actor.on_leave(self);
            log::debug!("actor {handle} ({}) reclaimed", actor.name());
        }
        self.attributes.strip(handle);
        self.pool.release(handle);
    }

    fn tick_actors(&mut self) {
        self.reclaim_pending();

        let mut handles = std::mem::take(&mut self.tick_scratch);
        handles.clear();
        self.pool.collect_occupied(&mut handles);

        let play = self.play;
        for &handle in &handles {
            let ticks = self.pool.capabilities(handle).is_some_and(|c| c.contains(Capabilities::TICK));
            if !ticks {
                continue;
            }
            if let Some(mut actor) = self.pool.take(handle) {
                actor.on_tick(self, &play);
                self.pool.restore(handle, actor);
            }
        }
        self.tick_scratch = handles;

        self.pool.repair_order();
    }

    /// Calls `on_leave` for every actor still on stage and empties the pool.
    fn clear_actors(&mut self) {
        self.reclaim_pending();

        let mut handles = Vec::new();
        loop {
            handles.clear();
            self.pool.collect_occupied(&mut handles);
            if handles.is_empty() {
                break;
            }
            for &handle in &handles {
                self.reclaim(handle);
            }
            // on_leave may have queued more removals.
            self.pool.take_reclaim();
        }
        self.attributes.clear();
    }

    // ── frame loop ──────────────────────────────────────────────────────────

    /// Runs `first_scene` until play ends or the platform closes.
    ///
    /// # Errors
    /// Fails before any frame runs if the platform cannot open its window.
    pub fn play<S: Scene>(&mut self, platform: &mut dyn Platform, first_scene: S) -> anyhow::Result<()> {
        self.start(platform, Box::new(first_scene))?;

        while !platform.should_close() {
            if self.run_frame(platform) == FrameControl::Finished {
                break;
            }
        }

        self.shutdown(platform);
        Ok(())
    }

    /// Opens the platform and loads `first_scene`.
    pub fn start(&mut self, platform: &mut dyn Platform, first_scene: Box<dyn Scene>) -> anyhow::Result<()> {
        let options = WindowOptions {
            title: self.config.title.clone(),
            window_size: self.play.window_size,
            stage_size: self.play.stage_size,
        };
        platform
            .open(&options)
            .with_context(|| format!("failed to open stage window '{}'", options.title))?;

        self.fit_viewport(platform.window_size());
        log::info!(
            "stage '{}' playing at {}x{} (capacity {})",
            self.config.title, self.config.width, self.config.height, self.config.capacity
        );

        self.change_scene_boxed(first_scene);
        self.apply_scene_change();
        Ok(())
    }

    fn fit_viewport(&mut self, window_size: Vec2) {
        self.viewport = Viewport::fit(self.play.stage_size, window_size, self.config.integer_scale);
        self.play.window_size = window_size;
        self.play.scale = self.viewport.scale;
        log::debug!(
            "viewport {}x{} at ({}, {}), scale {}",
            self.viewport.rect.size.x, self.viewport.rect.size.y,
            self.viewport.rect.origin.x, self.viewport.rect.origin.y, self.viewport.scale
        );
    }

    /// Runs one frame.
    pub fn run_frame(&mut self, platform: &mut dyn Platform) -> FrameControl {
        self.apply_scene_change();
        if self.scenes.state() == SceneState::Unloaded {
            self.process = StageProcess::Paused;
            return FrameControl::Finished;
        }

        self.process = StageProcess::Update;
        platform.pump_events();
        if platform.take_resized() {
            self.fit_viewport(platform.window_size());
        }

        let dt = platform.frame_time();
        let window_size = platform.window_size();
        let (input, input_frame) = platform.input();
        self.play.refresh(dt, self.frame, &self.viewport, window_size, input, input_frame);

        self.step_timers(dt);

        if let Some(mut scene) = self.scenes.take_current() {
            let play = self.play;
            let control = scene.on_tick(self, &play);
            self.scenes.restore_current(scene);
            self.apply_control(control);
        }

        self.tick_actors();

        self.process = StageProcess::Draw;
        self.draw_stage(platform);

        self.process = StageProcess::WindowDraw;
        self.draw_window(platform);

        log::trace!("frame {} done ({} actors, {} timers)", self.frame, self.pool.len(), self.timer_count());
        self.frame += 1;
        self.process = StageProcess::Paused;
        FrameControl::Continue
    }

    fn draw_stage(&mut self, platform: &mut dyn Platform) {
        self.stage_list.clear();
        platform.begin_stage(self.config.background_color);

        if let Some(scene) = self.scenes.current_mut() {
            scene.on_draw_background(&mut self.stage_list, &self.play);
        }

        let mut cursor = self.pool.first_drawn();
        while let Some(handle) = cursor {
            let draws = self.pool.capabilities(handle).is_some_and(|c| c.contains(Capabilities::STAGE_DRAW));
            if draws {
                if let Some(actor) = self.pool.actor_mut(handle) {
                    actor.on_stage_draw(&mut self.stage_list, &self.play);
                }
            }
            cursor = self.pool.next_drawn(handle);
        }

        if let Some(scene) = self.scenes.current_mut() {
            scene.on_draw_foreground(&mut self.stage_list, &self.play);
        }

        platform.end_stage(&self.stage_list);
    }

    fn draw_window(&mut self, platform: &mut dyn Platform) {
        self.window_list.clear();
        platform.begin_window(self.config.border_color);
        platform.blit_stage(self.viewport.rect);

        let mut cursor = self.pool.first_drawn();
        while let Some(handle) = cursor {
            let draws = self.pool.capabilities(handle).is_some_and(|c| c.contains(Capabilities::WINDOW_DRAW));
            if draws {
                if let Some(actor) = self.pool.actor_mut(handle) {
                    actor.on_window_draw(&mut self.window_list, &self.play);
                }
            }
            cursor = self.pool.next_drawn(handle);
        }

        if let Some(scene) = self.scenes.current_mut() {
            scene.on_window_draw(&mut self.window_list, &self.play);
        }

        platform.end_window(&self.window_list);
    }

    /// Unloads the scene, clears every actor and timer, and closes the platform.
    pub fn shutdown(&mut self, platform: &mut dyn Platform) {
        self.process = StageProcess::Shutdown;

        self.unload_scene();
        self.clear_actors();
        self.timers.clear();
        platform.close();

        log::info!("stage '{}' stopped after {} frames", self.config.title, self.frame);
        self.process = StageProcess::Paused;
    }
}
