//! Fixed-capacity actor slots.

use std::collections::BTreeSet;
use std::fmt;

use super::actor::{Actor, Capabilities};
use super::order::DrawOrder;
use super::z_index::ZIndex;

/// Identifies a registered actor.
///
/// Valid from registration until the slot is reclaimed. Reclamation bumps the
/// slot's generation, so a handle kept past that point never reaches a later
/// occupant of the same slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ActorHandle {
    index: u32,
    generation: u32,
}

impl ActorHandle {
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ActorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

#[derive(Default)]
struct Slot {
    /// `None` while free, and while the actor is lent out to one of its hooks.
    actor: Option<Box<dyn Actor>>,
    generation: u32,
    occupied: bool,
    pending: bool,
    caps: Option<Capabilities>,
}

pub(crate) struct ActorPool {
    slots: Vec<Slot>,
    free: BTreeSet<u32>,
    order: DrawOrder,
    reclaim: Vec<ActorHandle>,
    occupied: usize,
}

impl ActorPool {
    pub(crate) fn new(capacity: u32) -> Self {
        Self {
            slots: (0..capacity).map(|_| Slot::default()).collect(),
            free: (0..capacity).collect(),
            order: DrawOrder::new(capacity),
            reclaim: Vec::new(),
            occupied: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.occupied
    }

    /// Claims the lowest free slot. The actor is stored later with [`restore`](Self::restore).
    ///
    /// # Panics
    /// Panics when every slot is occupied.
    pub(crate) fn acquire(&mut self, z: ZIndex, caps: Capabilities) -> ActorHandle {
        let Some(index) = self.free.pop_first() else {
            panic!("actor limit reached: all {} slots are occupied", self.capacity());
        };

        let slot = &mut self.slots[index as usize];
        slot.occupied = true;
        slot.pending = false;
        slot.caps = Some(caps);
        self.occupied += 1;

        self.order.set_z(index, z);

        ActorHandle { index, generation: slot.generation }
    }

    /// Whether `handle` names the current occupant of its slot.
    ///
    /// # Panics
    /// Panics if the handle's index lies outside the pool.
    pub(crate) fn is_live(&self, handle: ActorHandle) -> bool {
        let Some(slot) = self.slots.get(handle.index as usize) else {
            panic!(
                "actor handle {handle} does not belong to this stage (capacity {})",
                self.capacity()
            );
        };
        slot.occupied && slot.generation == handle.generation
    }

    fn live_slot(&self, handle: ActorHandle) -> Option<&Slot> {
        self.is_live(handle).then(|| &self.slots[handle.index as usize])
    }

    fn live_slot_mut(&mut self, handle: ActorHandle) -> Option<&mut Slot> {
        if self.is_live(handle) { Some(&mut self.slots[handle.index as usize]) } else { None }
    }

    /// Lends the actor out of its slot.
    pub(crate) fn take(&mut self, handle: ActorHandle) -> Option<Box<dyn Actor>> {
        self.live_slot_mut(handle).and_then(|s| s.actor.take())
    }

    /// Puts a lent actor back. Dropped if the slot was reclaimed meanwhile.
    pub(crate) fn restore(&mut self, handle: ActorHandle, actor: Box<dyn Actor>) {
        match self.live_slot_mut(handle) {
            Some(slot) => slot.actor = Some(actor),
            None => log::debug!("actor {handle} reclaimed while lent out; dropping it"),
        }
    }

    pub(crate) fn actor(&self, handle: ActorHandle) -> Option<&(dyn Actor + 'static)> {
        self.live_slot(handle).and_then(|s| s.actor.as_deref())
    }

    pub(crate) fn actor_mut(&mut self, handle: ActorHandle) -> Option<&mut (dyn Actor + 'static)> {
        self.live_slot_mut(handle).and_then(|s| s.actor.as_deref_mut())
    }

    pub(crate) fn capabilities(&self, handle: ActorHandle) -> Option<Capabilities> {
        self.live_slot(handle).and_then(|s| s.caps)
    }

    pub(crate) fn zindex(&self, handle: ActorHandle) -> Option<ZIndex> {
        self.is_live(handle).then(|| self.order.z(handle.index))
    }

    /// Records a z-index change; the draw order follows at the next repair.
    pub(crate) fn set_zindex(&mut self, handle: ActorHandle, z: ZIndex) -> bool {
        self.is_live(handle) && self.order.set_z(handle.index, z)
    }

    /// Queues `handle` for reclamation. Returns `false` if it was already queued.
    pub(crate) fn schedule_release(&mut self, handle: ActorHandle) -> bool {
        let Some(slot) = self.live_slot_mut(handle) else {
            return false;
        };
        if slot.pending {
            return false;
        }
        slot.pending = true;
        self.reclaim.push(handle);
        true
    }

    pub(crate) fn is_pending(&self, handle: ActorHandle) -> bool {
        self.live_slot(handle).is_some_and(|s| s.pending)
    }

    pub(crate) fn take_reclaim(&mut self) -> Vec<ActorHandle> {
        std::mem::take(&mut self.reclaim)
    }

    /// Frees the slot behind `handle` and invalidates the handle.
    pub(crate) fn release(&mut self, handle: ActorHandle) {
        let Some(slot) = self.live_slot_mut(handle) else {
            return;
        };
        slot.actor = None;
        slot.occupied = false;
        slot.pending = false;
        slot.caps = None;
        slot.generation = slot.generation.wrapping_add(1);

        self.order.remove(handle.index);
        self.free.insert(handle.index);
        self.occupied -= 1;
    }

    /// Appends every occupied handle, ordered by slot.
    pub(crate) fn collect_occupied(&self, out: &mut Vec<ActorHandle>) {
        out.extend(self.slots.iter().enumerate().filter(|(_, s)| s.occupied).map(|(i, s)| {
            ActorHandle { index: i as u32, generation: s.generation }
        }));
    }

    pub(crate) fn repair_order(&mut self) {
        self.order.repair();
    }

    fn handle_at(&self, index: u32) -> ActorHandle {
        ActorHandle { index, generation: self.slots[index as usize].generation }
    }

    /// First actor in draw order.
    pub(crate) fn first_drawn(&self) -> Option<ActorHandle> {
        self.order.first().map(|i| self.handle_at(i))
    }

    /// Actor drawn after `handle`.
    pub(crate) fn next_drawn(&self, handle: ActorHandle) -> Option<ActorHandle> {
        self.order.after(handle.index).map(|i| self.handle_at(i))
    }

    pub(crate) fn draw_order(&self) -> Vec<ActorHandle> {
        self.order.iter().map(|i| self.handle_at(i)).collect()
    }
}
