//! Error types for ptmidi-pitch.

use thiserror::Error;

/// Result type alias for ptmidi-pitch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building pitch curves.
#[derive(Debug, Error)]
pub enum Error {
    /// Timeline query failure (unseeded series).
    #[error(transparent)]
    Timeline(#[from] ptmidi_core::Error),
}
