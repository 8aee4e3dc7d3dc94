use std::fmt;

use super::attributes::Attribute;
use super::pool::ActorHandle;
use super::timer::TimerId;

/// Rejected attribute toggle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AttributeError {
    /// The handle does not name a registered actor.
    NotOnStage(ActorHandle),
    /// The tag is managed by the stage and cannot be toggled.
    Reserved(Attribute),
    /// The tag was not declared in `StageConfig::attributes`.
    Unknown(Attribute),
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOnStage(h) => write!(f, "actor {h} is not on stage"),
            Self::Reserved(a) => write!(f, "attribute {a} is reserved and cannot be toggled or queried"),
            Self::Unknown(a) => write!(f, "attribute {a} was not declared in the stage config"),
        }
    }
}

impl std::error::Error for AttributeError {}

/// Rejected timer operation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TimerError {
    /// No running timer carries this id.
    NotRunning(TimerId),
    /// The timer cannot be handed back while timers are being stepped.
    Busy(TimerId),
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRunning(id) => write!(f, "timer {id} is not running"),
            Self::Busy(id) => write!(f, "timer {id} cannot be taken while timers are stepping"),
        }
    }
}

impl std::error::Error for TimerError {}

/// Invalid `StageConfig`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroCapacity,
    EmptyStage { width: u32, height: u32 },
    InvalidScale(f32),
    ReservedAttribute(Attribute),
    DuplicateAttribute(Attribute),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => f.write_str("stage capacity must be at least 1"),
            Self::EmptyStage { width, height } => {
                write!(f, "stage size {width}x{height} must be non-zero in both dimensions")
            }
            Self::InvalidScale(s) => write!(f, "window scale {s} must be finite and positive"),
            Self::ReservedAttribute(a) => write!(f, "attribute id {} is reserved", a.id()),
            Self::DuplicateAttribute(a) => write!(f, "attribute {a} is declared more than once"),
        }
    }
}

impl std::error::Error for ConfigError {}
