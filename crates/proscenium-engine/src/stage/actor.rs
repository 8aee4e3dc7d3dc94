use std::any::Any;

use bitflags::bitflags;

use crate::draw::DrawList;

use super::attributes::Attribute;
use super::play::Play;
use super::pool::ActorHandle;
use super::Stage;

bitflags! {
    /// Hooks an actor takes part in. Hooks outside this set are never called.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// `on_tick` every frame. Implies the `TICKING` attribute.
        const TICK = 1 << 0;
        /// `on_stage_draw` in the stage pass. Implies `VISIBLE`.
        const STAGE_DRAW = 1 << 1;
        /// `on_window_draw` in the window pass. Implies `VISIBLE`.
        const WINDOW_DRAW = 1 << 2;

        const DRAW = Self::STAGE_DRAW.bits() | Self::WINDOW_DRAW.bits();
    }
}

impl Capabilities {
    /// Attributes derived from this capability set.
    pub fn implied_attributes(self) -> impl Iterator<Item = Attribute> {
        let ticking = self.contains(Capabilities::TICK).then_some(Attribute::TICKING);
        let visible = self.intersects(Capabilities::DRAW).then_some(Attribute::VISIBLE);
        ticking.into_iter().chain(visible)
    }
}

/// A unit ticked and drawn by the stage once registered.
///
/// Every hook has a no-op default. While one of its own hooks runs the actor is
/// lent out of its slot, so `Stage::actor` on its own handle returns `None`.
pub trait Actor: Any {
    /// Called once, synchronously, from `Stage::register`.
    fn on_enter(&mut self, stage: &mut Stage, handle: ActorHandle) {
        let _ = (stage, handle);
    }

    /// Called every frame while registered, after the scene's tick.
    fn on_tick(&mut self, stage: &mut Stage, play: &Play) {
        let _ = (stage, play);
    }

    /// Draws into the stage surface, in stage pixels.
    fn on_stage_draw(&mut self, list: &mut DrawList, play: &Play) {
        let _ = (list, play);
    }

    /// Draws over the scaled stage, in window pixels.
    fn on_window_draw(&mut self, list: &mut DrawList, play: &Play) {
        let _ = (list, play);
    }

    /// Called exactly once when the actor is reclaimed or the stage shuts down.
    fn on_leave(&mut self, stage: &mut Stage) {
        let _ = stage;
    }

    /// User attributes declared at registration.
    fn attributes(&self) -> Vec<Attribute> {
        Vec::new()
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    /// Name used in log output.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
