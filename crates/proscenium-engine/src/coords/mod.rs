//! Coordinate and geometry types shared by the stage and its collaborators.
//!
//! Canonical CPU space:
//! - Logical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! Stage space is the fixed logical resolution actors draw into. Window space is
//! whatever the platform reports; [`Viewport`] maps between the two.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
