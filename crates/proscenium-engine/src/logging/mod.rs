//! Logging utilities.
//!
//! The engine only emits through the `log` facade. This module gives binaries a
//! one-call `env_logger` setup with the engine's defaults.

mod init;

pub use init::{init_logging, LoggingConfig};
