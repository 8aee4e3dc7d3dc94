//! Draw stream types.
//!
//! Draw hooks record renderer-agnostic commands into a [`DrawList`]; the platform
//! consumes the list at the end of each draw pass. Paint order is push order:
//! the stage already calls hooks back-to-front.

mod cmd;
mod list;

pub use cmd::{CircleCmd, DrawCmd, LineCmd, RectCmd, TextCmd};
pub use list::DrawList;
