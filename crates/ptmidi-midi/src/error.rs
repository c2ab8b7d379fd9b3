//! Error types for MIDI emission and SMF output.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("MIDI parse error: {0}")]
    MidiFileParse(String),

    #[error("Unsupported MIDI timing format")]
    MidiUnsupportedTiming,

    #[error("Gap of {delta} ticks before tick {tick} does not fit a MIDI delta time")]
    DeltaTooLarge { tick: u32, delta: u32 },

    #[error("Invalid ticks per quarter note: {0}")]
    InvalidTicksPerQuarter(u16),

    #[error(transparent)]
    Timeline(#[from] ptmidi_core::Error),

    #[error(transparent)]
    Pitch(#[from] ptmidi_pitch::Error),
}

impl From<midly::Error> for Error {
    fn from(e: midly::Error) -> Self {
        Error::MidiFileParse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
