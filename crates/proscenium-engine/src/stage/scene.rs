//! Scene state machine.
//!
//! Exactly one scene is current at a time. Change requests are recorded and
//! applied at the start of the next frame; the latest request of a frame wins.

use std::any::Any;

use crate::draw::DrawList;

use super::play::Play;
use super::{Stage, StageProcess};

/// What the current scene wants after its tick.
pub enum SceneControl {
    Continue,
    /// Swap to another scene at the start of the next frame.
    ChangeTo(Box<dyn Scene>),
    /// Unload the current scene and end play.
    End,
}

/// Top-level controller of a stretch of play.
pub trait Scene: Any {
    /// Called once when the scene becomes current.
    fn on_load(&mut self, stage: &mut Stage) {
        let _ = stage;
    }

    /// Called every frame while current, before the actors tick.
    fn on_tick(&mut self, stage: &mut Stage, play: &Play) -> SceneControl {
        let _ = (stage, play);
        SceneControl::Continue
    }

    /// Stage pass, before the actors.
    fn on_draw_background(&mut self, list: &mut DrawList, play: &Play) {
        let _ = (list, play);
    }

    /// Stage pass, after the actors.
    fn on_draw_foreground(&mut self, list: &mut DrawList, play: &Play) {
        let _ = (list, play);
    }

    /// Window pass, after the actors.
    fn on_window_draw(&mut self, list: &mut DrawList, play: &Play) {
        let _ = (list, play);
    }

    /// Called once when the scene is replaced. `requested` is the scene asked for
    /// (`None` when play is ending); the returned scene is loaded instead.
    fn on_unload(&mut self, stage: &mut Stage, requested: Option<Box<dyn Scene>>) -> Option<Box<dyn Scene>> {
        let _ = stage;
        requested
    }

    /// Name used in log output.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Scene machine state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SceneState {
    Unloaded,
    Active,
    Swapping,
}

pub(crate) struct SceneMachine {
    /// `None` while unloaded, and while the scene is lent out to its own hook.
    current: Option<Box<dyn Scene>>,
    /// `Some(next)` once a change was requested; `Some(None)` ends play.
    request: Option<Option<Box<dyn Scene>>>,
    state: SceneState,
    unloading: bool,
}

impl SceneMachine {
    pub(crate) fn new() -> Self {
        Self { current: None, request: None, state: SceneState::Unloaded, unloading: false }
    }

    #[inline]
    pub(crate) fn state(&self) -> SceneState {
        self.state
    }

    pub(crate) fn request(&mut self, next: Option<Box<dyn Scene>>) {
        if self.unloading {
            log::warn!("scene change requested during unload; ignored");
            return;
        }
        if self.request.is_some() {
            log::debug!("pending scene change replaced by a newer request");
        }
        self.request = Some(next);
    }

    pub(crate) fn take_current(&mut self) -> Option<Box<dyn Scene>> {
        self.current.take()
    }

    pub(crate) fn restore_current(&mut self, scene: Box<dyn Scene>) {
        self.current = Some(scene);
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut (dyn Scene + 'static)> {
        self.current.as_deref_mut()
    }

    pub(crate) fn current(&self) -> Option<&(dyn Scene + 'static)> {
        self.current.as_deref()
    }
}

// ── stage API ───────────────────────────────────────────────────────────────

impl Stage {
    /// Requests a swap to `next` at the start of the next frame.
    pub fn change_scene<S: Scene>(&mut self, next: S) {
        self.change_scene_boxed(Box::new(next));
    }

    pub fn change_scene_boxed(&mut self, next: Box<dyn Scene>) {
        log::debug!("scene change to {} requested", next.name());
        self.scenes.request(Some(next));
    }

    /// Requests the current scene to unload with nothing after it, ending play.
    pub fn end_play(&mut self) {
        log::debug!("end of play requested");
        self.scenes.request(None);
    }

    pub fn scene_state(&self) -> SceneState {
        self.scenes.state()
    }

    /// The current scene. `None` while unloaded or inside the scene's own hooks.
    pub fn scene(&self) -> Option<&(dyn Scene + 'static)> {
        self.scenes.current()
    }

    /// Downcasts the current scene.
    pub fn scene_as<S: Scene>(&self) -> Option<&S> {
        self.scene().and_then(|s| (s as &dyn Any).downcast_ref::<S>())
    }

    pub(super) fn apply_control(&mut self, control: SceneControl) {
        match control {
            SceneControl::Continue => {}
            SceneControl::ChangeTo(next) => self.change_scene_boxed(next),
            SceneControl::End => self.end_play(),
        }
    }

    /// Applies the pending scene change, if any.
    ///
    /// The outgoing scene's `on_unload` has the last word on what loads next.
    /// Requests made while it unloads are dropped; requests made by the incoming
    /// scene's `on_load` stay pending for the next frame.
    pub(super) fn apply_scene_change(&mut self) {
        let Some(requested) = self.scenes.request.take() else {
            return;
        };

        let previous = self.process;
        self.process = StageProcess::SwapScene;
        self.scenes.state = SceneState::Swapping;

        let next = match self.scenes.take_current() {
            Some(mut outgoing) => {
                self.scenes.unloading = true;
                let next = outgoing.on_unload(self, requested);
                self.scenes.unloading = false;
                log::debug!("scene {} unloaded", outgoing.name());
                next
            }
            None => requested,
        };

        match next {
            Some(mut incoming) => {
                log::info!("scene {} loading", incoming.name());
                incoming.on_load(self);
                self.scenes.restore_current(incoming);
                self.scenes.state = SceneState::Active;
            }
            None => {
                log::info!("no scene to load; play ends");
                self.scenes.state = SceneState::Unloaded;
            }
        }

        self.process = previous;
    }

    /// Unloads the current scene for shutdown. Whatever it returns is dropped.
    pub(super) fn unload_scene(&mut self) {
        self.scenes.request = None;
        if let Some(mut outgoing) = self.scenes.take_current() {
            self.scenes.state = SceneState::Swapping;
            self.scenes.unloading = true;
            if let Some(next) = outgoing.on_unload(self, None) {
                log::debug!("scene {} returned during shutdown; dropped", next.name());
            }
            self.scenes.unloading = false;
            log::debug!("scene {} unloaded", outgoing.name());
        }
        self.scenes.state = SceneState::Unloaded;
    }
}
