//! Error types for ptmidi-core.

use crate::Tick;
use thiserror::Error;

/// Result type alias for ptmidi-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building unit timelines.
#[derive(Debug, Error)]
pub enum Error {
    /// A series was queried before its first breakpoint.
    #[error("No value defined at tick {tick}")]
    NoValueDefined { tick: Tick },

    /// The record stream went backwards in time.
    #[error("Records out of order: tick {tick} follows tick {previous}")]
    UnorderedRecords { previous: Tick, tick: Tick },

    /// A record referenced a unit the project does not declare.
    #[error("Unknown unit {index} (project has {count} units)")]
    UnknownUnit { index: usize, count: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
