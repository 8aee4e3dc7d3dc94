use std::fmt;

/// Draw priority of an actor.
///
/// Higher values draw later (on top). `ZIndex::NONE` (0) means the actor is
/// ticked but never drawn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub u16);

impl ZIndex {
    pub const NONE: Self = Self(0);
    pub const MAX: Self = Self(u16::MAX);

    #[inline]
    pub const fn new(v: u16) -> Self {
        Self(v)
    }

    /// Whether an actor at this z-index takes part in the draw passes.
    #[inline]
    pub const fn is_drawn(self) -> bool {
        self.0 != 0
    }
}

impl From<u16> for ZIndex {
    #[inline]
    fn from(v: u16) -> Self {
        Self(v)
    }
}

impl fmt::Display for ZIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "z{}", self.0)
    }
}
