//! # ptmidi - pxtone to General MIDI
//!
//! Converts the event timeline of a pxtone project into a multi-track
//! Standard MIDI File. Portamento and fine tuning have no direct MIDI
//! equivalent; they are rebuilt as a sampled pitch-offset curve per unit and
//! sent as pitch bends with a per-event bend range.
//!
//! ## Architecture
//!
//! ptmidi is an umbrella crate that coordinates:
//! - **ptmidi-core** - Time series, event records, unit timelines, woices, config
//! - **ptmidi-pitch** - Portamento synthesis, tuning overlay, pitch-bend encoding
//! - **ptmidi-midi** - Channel allocation, track emission, SMF output
//!
//! ## Quick Start
//!
//! ```ignore
//! use ptmidi::prelude::*;
//!
//! let converter = Converter::builder().build()?;
//! let song = converter.convert(&project)?;
//! song.save("song.mid")?;
//! ```

/// Re-export of ptmidi-core for direct access
pub use ptmidi_core as core;

/// Re-export of ptmidi-pitch for direct access
pub use ptmidi_pitch as pitch;

/// Re-export of ptmidi-midi for direct access
pub use ptmidi_midi as midi;

pub use ptmidi_core::{
    build_timelines, resolve_woices, ConvertConfig, Press, Project, ProjectInfo, Tick, TimeSeries,
    UnitTimeline, Woice,
};
pub use ptmidi_core::record::{EventKind, EventRecord};
pub use ptmidi_midi::{MidiEventType, MidiSong, MidiTrack, TimedMidiEvent};
pub use ptmidi_pitch::{BendPoint, PitchBendEncoder, PitchOffsetCurve, PortamentoEngine};

mod error;
pub use error::{Error, Result};

mod builder;
pub use builder::ConverterBuilder;

mod converter;
pub use converter::Converter;

pub mod prelude {
    pub use crate::{
        ConvertConfig, Converter, ConverterBuilder, EventKind, EventRecord, MidiSong, Project,
        ProjectInfo, Woice,
    };
    pub use crate::{Error, Result};
}
