//! Attribute tags and the per-tag membership index.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::actor::Actor;
use super::error::AttributeError;
use super::pool::ActorHandle;
use super::Stage;

/// Tag an actor can carry.
///
/// Ids below [`Attribute::FIRST_CUSTOM`] are reserved for tags the stage manages
/// itself. User tags are built with [`Attribute::custom`] and must be declared in
/// `StageConfig::attributes` before use.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Attribute(u16);

impl Attribute {
    /// Set on actors queued for reclamation.
    pub const PENDING_REMOVAL: Self = Self(0);
    /// Derived from `Capabilities::TICK`.
    pub const TICKING: Self = Self(1);
    /// Derived from either draw capability.
    pub const VISIBLE: Self = Self(2);

    pub const FIRST_CUSTOM: u16 = 16;

    const RESERVED: [(Attribute, &'static str); 3] = [
        (Self::PENDING_REMOVAL, "PENDING_REMOVAL"),
        (Self::TICKING, "TICKING"),
        (Self::VISIBLE, "VISIBLE"),
    ];

    /// The `n`-th user tag.
    #[inline]
    pub const fn custom(n: u16) -> Self {
        Self(Self::FIRST_CUSTOM.saturating_add(n))
    }

    #[inline]
    pub const fn id(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_reserved(self) -> bool {
        self.0 < Self::FIRST_CUSTOM
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Self::RESERVED.iter().find(|(a, _)| a == self) {
            Some((_, name)) => f.write_str(name),
            None if self.is_reserved() => write!(f, "reserved({})", self.0),
            None => write!(f, "custom({})", self.0 - Self::FIRST_CUSTOM),
        }
    }
}

/// `Attribute -> set of handles`, one set per known tag.
#[derive(Debug, Default)]
pub(crate) struct AttributeIndex {
    sets: BTreeMap<Attribute, BTreeSet<ActorHandle>>,
    names: BTreeMap<Attribute, String>,
}

impl AttributeIndex {
    /// Index with the reserved tags plus `user` tags. Validation happens in `StageConfig`.
    pub(crate) fn new(user: &[(Attribute, String)]) -> Self {
        let mut index = Self::default();
        for (attr, name) in Attribute::RESERVED {
            index.define(attr, name.to_string());
        }
        for (attr, name) in user {
            index.define(*attr, name.clone());
        }
        index
    }

    fn define(&mut self, attr: Attribute, name: String) {
        self.sets.insert(attr, BTreeSet::new());
        self.names.insert(attr, name);
    }

    #[inline]
    pub(crate) fn is_known(&self, attr: Attribute) -> bool {
        self.sets.contains_key(&attr)
    }

    pub(crate) fn name(&self, attr: Attribute) -> Option<&str> {
        self.names.get(&attr).map(String::as_str)
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<Attribute> {
        self.names.iter().find(|(_, n)| n.as_str() == name).map(|(a, _)| *a)
    }

    /// Returns `false` for unknown tags and existing members.
    pub(crate) fn insert(&mut self, attr: Attribute, handle: ActorHandle) -> bool {
        self.sets.get_mut(&attr).is_some_and(|set| set.insert(handle))
    }

    pub(crate) fn remove(&mut self, attr: Attribute, handle: ActorHandle) -> bool {
        self.sets.get_mut(&attr).is_some_and(|set| set.remove(&handle))
    }

    pub(crate) fn contains(&self, attr: Attribute, handle: ActorHandle) -> bool {
        self.sets.get(&attr).is_some_and(|set| set.contains(&handle))
    }

    /// Members of `attr` ordered by slot.
    pub(crate) fn members(&self, attr: Attribute) -> impl Iterator<Item = ActorHandle> + '_ {
        self.sets.get(&attr).into_iter().flatten().copied()
    }

    /// Drops `handle` from every set.
    pub(crate) fn strip(&mut self, handle: ActorHandle) {
        for set in self.sets.values_mut() {
            set.remove(&handle);
        }
    }

    pub(crate) fn clear(&mut self) {
        for set in self.sets.values_mut() {
            set.clear();
        }
    }
}

// ── stage API ───────────────────────────────────────────────────────────────

impl Stage {
    fn check_toggle(&self, handle: ActorHandle, attr: Attribute) -> Result<(), AttributeError> {
        let err = if attr.is_reserved() {
            AttributeError::Reserved(attr)
        } else if !self.attributes.is_known(attr) {
            AttributeError::Unknown(attr)
        } else if !self.pool.is_live(handle) {
            AttributeError::NotOnStage(handle)
        } else {
            return Ok(());
        };

        log::warn!("{err}");
        Err(err)
    }

    /// Tags a registered actor with a user attribute.
    ///
    /// Reserved tags, undeclared tags, handles not on stage and actors pending
    /// removal are reported and leave the index untouched.
    ///
    /// # Panics
    /// Panics if the handle does not belong to this stage.
    pub fn add_attribute(&mut self, handle: ActorHandle, attr: Attribute) -> Result<(), AttributeError> {
        self.check_toggle(handle, attr)?;
        if self.pool.is_pending(handle) {
            let err = AttributeError::NotOnStage(handle);
            log::warn!("{err} (pending removal)");
            return Err(err);
        }
        self.attributes.insert(attr, handle);
        Ok(())
    }

    /// Removes a user attribute from a registered actor. Removing a tag the actor
    /// does not carry is not an error.
    pub fn remove_attribute(&mut self, handle: ActorHandle, attr: Attribute) -> Result<(), AttributeError> {
        self.check_toggle(handle, attr)?;
        self.attributes.remove(attr, handle);
        Ok(())
    }

    /// Whether `handle` is indexed under `attr`. Works for reserved tags too.
    pub fn has_attribute(&self, handle: ActorHandle, attr: Attribute) -> bool {
        self.attributes.contains(attr, handle)
    }

    /// Handles indexed under a user attribute, ordered by slot.
    ///
    /// Reserved and undeclared tags yield an empty list and a warning.
    pub fn query(&self, attr: Attribute) -> Vec<ActorHandle> {
        if attr.is_reserved() {
            log::warn!("{}", AttributeError::Reserved(attr));
            return Vec::new();
        }
        if !self.attributes.is_known(attr) {
            log::warn!("{}", AttributeError::Unknown(attr));
            return Vec::new();
        }
        self.attributes.members(attr).collect()
    }

    /// Like [`query`](Self::query) but resolves the actors. Actors currently lent
    /// out to one of their own hooks are skipped.
    pub fn query_actors(&self, attr: Attribute) -> Vec<(ActorHandle, &(dyn Actor + 'static))> {
        self.query(attr)
            .into_iter()
            .filter_map(|h| self.pool.actor(h).map(|a| (h, a)))
            .collect()
    }

    /// Configured name of `attr`.
    pub fn attribute_name(&self, attr: Attribute) -> Option<&str> {
        self.attributes.name(attr)
    }

    /// Attribute declared under `name`.
    pub fn attribute_named(&self, name: &str) -> Option<Attribute> {
        self.attributes.lookup(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::pool::ActorPool;
    use crate::stage::actor::Capabilities;
    use crate::stage::z_index::ZIndex;

    const NPC: Attribute = Attribute::custom(0);

    fn handles(n: u32) -> Vec<ActorHandle> {
        let mut pool = ActorPool::new(n);
        (0..n).map(|_| pool.acquire(ZIndex::NONE, Capabilities::empty())).collect()
    }

    #[test]
    fn reserved_ids_and_names() {
        assert!(Attribute::VISIBLE.is_reserved());
        assert!(!NPC.is_reserved());
        assert_eq!(NPC.id(), 16);
        assert_eq!(Attribute::TICKING.to_string(), "TICKING");
        assert_eq!(Attribute::custom(3).to_string(), "custom(3)");
    }

    #[test]
    fn index_knows_reserved_and_user_tags() {
        let index = AttributeIndex::new(&[(NPC, "NPC".into())]);
        assert!(index.is_known(Attribute::PENDING_REMOVAL));
        assert!(index.is_known(NPC));
        assert!(!index.is_known(Attribute::custom(1)));
        assert_eq!(index.name(NPC), Some("NPC"));
        assert_eq!(index.lookup("VISIBLE"), Some(Attribute::VISIBLE));
    }

    #[test]
    fn insert_remove_and_members() {
        let hs = handles(3);
        let mut index = AttributeIndex::new(&[(NPC, "NPC".into())]);

        assert!(index.insert(NPC, hs[2]));
        assert!(index.insert(NPC, hs[0]));
        assert!(!index.insert(NPC, hs[0]));
        assert!(!index.insert(Attribute::custom(9), hs[1]));

        assert_eq!(index.members(NPC).collect::<Vec<_>>(), [hs[0], hs[2]]);
        assert!(index.remove(NPC, hs[0]));
        assert!(!index.contains(NPC, hs[0]));
    }

    #[test]
    fn strip_removes_from_every_set() {
        let hs = handles(2);
        let mut index = AttributeIndex::new(&[(NPC, "NPC".into())]);
        index.insert(NPC, hs[0]);
        index.insert(Attribute::TICKING, hs[0]);
        index.insert(Attribute::TICKING, hs[1]);

        index.strip(hs[0]);
        assert_eq!(index.members(NPC).count(), 0);
        assert_eq!(index.members(Attribute::TICKING).collect::<Vec<_>>(), [hs[1]]);
    }
}
