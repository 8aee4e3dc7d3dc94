//! Window-system adapters that feed the input subsystem.

pub mod winit;
