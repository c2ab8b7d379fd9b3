//! MIDI File I/O
//!
//! Builds Standard MIDI Files from a [`MidiSong`] using the `midly` crate,
//! and reads them back into the same representation.

use crate::error::{Error, Result};
use crate::event::{sort_events, MidiEventType, TimedMidiEvent};
use midly::num::{u14, u15, u24, u28, u4, u7};
use midly::{
    Format, Header, MetaMessage, MidiMessage, PitchBend, Smf, Timing, Track, TrackEvent,
    TrackEventKind,
};
use ptmidi_core::Tick;
use std::path::Path;
use tracing::debug;

/// Default resolution, matching pxtone's clock.
pub const DEFAULT_TICKS_PER_QUARTER: u16 = 480;

/// Largest delta time a variable-length quantity can hold.
pub const MAX_DELTA: Tick = 0x0FFF_FFFF;

/// One track of tick-stamped events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MidiTrack {
    /// Display name (also emitted as a TrackName meta event)
    pub name: String,

    /// Events with absolute ticks
    pub events: Vec<TimedMidiEvent>,
}

impl MidiTrack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, tick: Tick, event: MidiEventType) {
        self.events.push(TimedMidiEvent::new(tick, event));
    }

    /// Stable sort by `(tick, priority)`.
    pub fn sort(&mut self) {
        sort_events(&mut self.events);
    }

    /// Tick of the last event, 0 for an empty track.
    pub fn last_tick(&self) -> Tick {
        self.events.iter().map(|e| e.tick).max().unwrap_or(0)
    }
}

/// A complete multi-track song, ready to be written as SMF format 1.
#[derive(Debug, Clone, PartialEq)]
pub struct MidiSong {
    /// Ticks per quarter note
    pub ticks_per_quarter: u16,

    /// Track 0 holds tempo and meter, one track per unit follows
    pub tracks: Vec<MidiTrack>,
}

impl Default for MidiSong {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_QUARTER)
    }
}

impl MidiSong {
    pub fn new(ticks_per_quarter: u16) -> Self {
        Self {
            ticks_per_quarter,
            tracks: Vec::new(),
        }
    }

    /// Sort every track.
    pub fn sort(&mut self) {
        for track in &mut self.tracks {
            track.sort();
        }
    }

    /// Re-time every event for a new resolution, keeping musical positions.
    ///
    /// Ticks are rounded to the nearest tick of the new grid and each track
    /// is re-sorted, since events may collapse onto the same tick.
    pub fn rescale(&mut self, ticks_per_quarter: u16) {
        let from = u64::from(self.ticks_per_quarter);
        let to = u64::from(ticks_per_quarter);
        if from != to && from != 0 {
            for track in &mut self.tracks {
                for event in &mut track.events {
                    let scaled = (u64::from(event.tick) * to + from / 2) / from;
                    event.tick = Tick::try_from(scaled).unwrap_or(Tick::MAX);
                }
                track.sort();
            }
            debug!("Rescaled song from {} to {} ticks per quarter", from, to);
        }
        self.ticks_per_quarter = ticks_per_quarter;
    }

    /// All events of all tracks, in track order.
    pub fn events(&self) -> impl Iterator<Item = &TimedMidiEvent> {
        self.tracks.iter().flat_map(|t| t.events.iter())
    }

    /// Build the `midly` representation. Tracks are emitted in
    /// `(tick, priority)` order with delta times and a closing EndOfTrack.
    pub fn to_smf(&self) -> Result<Smf<'_>> {
        if self.ticks_per_quarter == 0 || self.ticks_per_quarter > 0x7FFF {
            return Err(Error::InvalidTicksPerQuarter(self.ticks_per_quarter));
        }
        let header = Header::new(
            Format::Parallel,
            Timing::Metrical(u15::new(self.ticks_per_quarter)),
        );
        let mut smf = Smf::new(header);

        for track in &self.tracks {
            let mut ordered: Vec<&TimedMidiEvent> = track.events.iter().collect();
            ordered.sort_by_key(|e| (e.tick, e.event.priority()));

            let mut out: Track<'_> = Vec::with_capacity(ordered.len() + 1);
            let mut last_tick: Tick = 0;
            for event in ordered {
                let delta = event.tick - last_tick;
                if delta > MAX_DELTA {
                    return Err(Error::DeltaTooLarge {
                        tick: event.tick,
                        delta,
                    });
                }
                last_tick = event.tick;
                out.push(TrackEvent {
                    delta: u28::new(delta),
                    kind: to_track_event_kind(&event.event),
                });
            }
            out.push(TrackEvent {
                delta: u28::new(0),
                kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
            });
            smf.tracks.push(out);
        }

        debug!(
            "Built SMF: {} tracks, {} ticks per quarter",
            smf.tracks.len(),
            self.ticks_per_quarter
        );
        Ok(smf)
    }

    /// Serialize as SMF bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let smf = self.to_smf()?;
        let mut bytes = Vec::new();
        smf.write_std(&mut bytes)?;
        Ok(bytes)
    }

    /// Write the song to `path` as a Standard MIDI File.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let smf = self.to_smf()?;
        smf.save(path.as_ref())?;
        debug!("Saved MIDI file to {}", path.as_ref().display());
        Ok(())
    }

    /// Load and parse a MIDI file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::parse(&data)
    }

    /// Parse a MIDI file from bytes. Events the converter never produces are
    /// ignored.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let smf = Smf::parse(data)?;

        let ticks_per_quarter = match smf.header.timing {
            Timing::Metrical(tpq) => tpq.as_int(),
            Timing::Timecode(_, _) => {
                return Err(Error::MidiUnsupportedTiming);
            }
        };

        let tracks = smf.tracks.iter().map(parse_track).collect();
        Ok(Self {
            ticks_per_quarter,
            tracks,
        })
    }
}

fn parse_track(track: &Track) -> MidiTrack {
    let mut parsed = MidiTrack::default();
    let mut current_tick = 0u64;

    for event in track.iter() {
        // Accumulate delta time
        current_tick += u64::from(event.delta.as_int());
        let Some(kind) = from_track_event_kind(&event.kind) else {
            continue;
        };
        if let MidiEventType::TrackName(name) = &kind {
            if parsed.name.is_empty() {
                parsed.name = name.clone();
            }
        }
        parsed.push(Tick::try_from(current_tick).unwrap_or(Tick::MAX), kind);
    }
    parsed
}

fn midi<'a>(channel: u8, message: MidiMessage) -> TrackEventKind<'a> {
    TrackEventKind::Midi {
        channel: u4::new(channel.min(15)),
        message,
    }
}

fn to_track_event_kind(event: &MidiEventType) -> TrackEventKind<'_> {
    match *event {
        MidiEventType::TrackName(ref name) => {
            TrackEventKind::Meta(MetaMessage::TrackName(name.as_bytes()))
        }
        MidiEventType::Tempo { micros_per_quarter } => TrackEventKind::Meta(MetaMessage::Tempo(
            u24::new(micros_per_quarter.min(0x00FF_FFFF)),
        )),
        MidiEventType::TimeSignature {
            numerator,
            denominator_pow2,
        } => TrackEventKind::Meta(MetaMessage::TimeSignature(numerator, denominator_pow2, 24, 8)),
        MidiEventType::NoteOn {
            channel,
            note,
            velocity,
        } => midi(
            channel,
            MidiMessage::NoteOn {
                key: u7::new(note.min(127)),
                vel: u7::new(velocity.min(127)),
            },
        ),
        MidiEventType::NoteOff {
            channel,
            note,
            velocity,
        } => midi(
            channel,
            MidiMessage::NoteOff {
                key: u7::new(note.min(127)),
                vel: u7::new(velocity.min(127)),
            },
        ),
        MidiEventType::ControlChange {
            channel,
            controller,
            value,
        } => midi(
            channel,
            MidiMessage::Controller {
                controller: u7::new(controller.min(127)),
                value: u7::new(value.min(127)),
            },
        ),
        MidiEventType::ProgramChange { channel, program } => midi(
            channel,
            MidiMessage::ProgramChange {
                program: u7::new(program.min(127)),
            },
        ),
        MidiEventType::PitchBend { channel, value } => {
            // midly stores bends as u14 (0-16383), center = 8192
            let raw = (i32::from(value).clamp(-8192, 8191) + 8192) as u16;
            midi(
                channel,
                MidiMessage::PitchBend {
                    bend: PitchBend(u14::new(raw)),
                },
            )
        }
    }
}

fn from_track_event_kind(kind: &TrackEventKind) -> Option<MidiEventType> {
    match kind {
        TrackEventKind::Midi { channel, message } => {
            let channel = channel.as_int();
            let event = match message {
                MidiMessage::NoteOn { key, vel } => {
                    // Note: velocity 0 is treated as Note Off
                    if vel.as_int() == 0 {
                        MidiEventType::NoteOff {
                            channel,
                            note: key.as_int(),
                            velocity: 0,
                        }
                    } else {
                        MidiEventType::NoteOn {
                            channel,
                            note: key.as_int(),
                            velocity: vel.as_int(),
                        }
                    }
                }
                MidiMessage::NoteOff { key, vel } => MidiEventType::NoteOff {
                    channel,
                    note: key.as_int(),
                    velocity: vel.as_int(),
                },
                MidiMessage::Controller { controller, value } => MidiEventType::ControlChange {
                    channel,
                    controller: controller.as_int(),
                    value: value.as_int(),
                },
                MidiMessage::ProgramChange { program } => MidiEventType::ProgramChange {
                    channel,
                    program: program.as_int(),
                },
                MidiMessage::PitchBend { bend } => MidiEventType::PitchBend {
                    channel,
                    value: bend.0.as_int() as i16 - 8192,
                },
                _ => return None,
            };
            Some(event)
        }
        TrackEventKind::Meta(MetaMessage::TrackName(name)) => Some(MidiEventType::TrackName(
            String::from_utf8_lossy(name).into_owned(),
        )),
        TrackEventKind::Meta(MetaMessage::Tempo(tempo)) => Some(MidiEventType::Tempo {
            micros_per_quarter: tempo.as_int(),
        }),
        TrackEventKind::Meta(MetaMessage::TimeSignature(numerator, denominator_pow2, _, _)) => {
            Some(MidiEventType::TimeSignature {
                numerator: *numerator,
                denominator_pow2: *denominator_pow2,
            })
        }
        _ => None,
    }
}
