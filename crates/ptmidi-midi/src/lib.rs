//! MIDI output for ptmidi.
//!
//! - [`TrackEmitter`] / [`metadata_track`]: per-unit and track-0 events
//! - [`ChannelAllocator`]: melodic channel assignment around the drum channel
//! - [`MidiSong`]: in-memory song, SMF building and parsing via `midly`
//!
//! # Example
//!
//! ```ignore
//! use ptmidi_midi::{metadata_track, ChannelAllocator, MidiSong, TrackEmitter};
//!
//! let channels = ChannelAllocator::new(units.len());
//! let mut song = MidiSong::default();
//! song.tracks.push(metadata_track(&project.info));
//! for (i, unit) in units.iter().enumerate() {
//!     let track = TrackEmitter::new(&names[i], channels.channel(i), &woices)
//!         .emit_unit(unit, &bends[i])?;
//!     song.tracks.push(track);
//! }
//! song.save("out.mid")?;
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod event;
pub use event::{MidiEventType, TimedMidiEvent};

pub mod channel;
pub use channel::{melodic_channel, ChannelAllocator, DRUM_CHANNEL};

pub mod emitter;
pub use emitter::{metadata_track, TrackEmitter};

mod file;
pub use file::{MidiSong, MidiTrack, DEFAULT_TICKS_PER_QUARTER, MAX_DELTA};
