//! Centralized error type for the ptmidi umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] ptmidi_core::Error),

    #[error("Pitch: {0}")]
    Pitch(#[from] ptmidi_pitch::Error),

    #[error("MIDI: {0}")]
    Midi(#[from] ptmidi_midi::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
