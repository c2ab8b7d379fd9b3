//! Per-unit track emission.
//!
//! A [`TrackEmitter`] collects the MIDI events of one unit: controller
//! breakpoints, program changes, note pairs and the encoded pitch-bend
//! sequence. [`metadata_track`] builds track 0.

use ptmidi_core::{ProjectInfo, Tick, UnitTimeline, Woice};
use ptmidi_pitch::BendPoint;
use tracing::{debug, warn};

use crate::channel::DRUM_CHANNEL;
use crate::error::Result;
use crate::event::MidiEventType;
use crate::file::MidiTrack;

/// Controller numbers.
pub mod cc {
    pub const DATA_ENTRY_MSB: u8 = 6;
    pub const VOLUME: u8 = 7;
    pub const BALANCE: u8 = 8;
    pub const PAN: u8 = 10;
    pub const RPN_LSB: u8 = 100;
    pub const RPN_MSB: u8 = 101;
}

const DEFAULT_MICROS_PER_QUARTER: u32 = 500_000;

/// Clip a tracker value into a 7-bit MIDI data byte.
#[inline]
pub fn clip_7bit(value: i32) -> u8 {
    value.clamp(0, 127) as u8
}

/// Microseconds per quarter note for `bpm`.
pub fn micros_per_quarter(bpm: f32) -> u32 {
    if !(bpm.is_finite() && bpm > 0.0) {
        warn!("Invalid tempo {} BPM, using 120", bpm);
        return DEFAULT_MICROS_PER_QUARTER;
    }
    (60_000_000.0 / f64::from(bpm)).round().min(f64::from(0x00FF_FFFFu32)) as u32
}

/// Track 0: title, tempo and time signature, all at tick 0.
pub fn metadata_track(info: &ProjectInfo) -> MidiTrack {
    let mut track = MidiTrack::new(info.title.clone());
    track.push(0, MidiEventType::TrackName(info.title.clone()));
    track.push(
        0,
        MidiEventType::Tempo {
            micros_per_quarter: micros_per_quarter(info.tempo_bpm),
        },
    );
    track.push(
        0,
        MidiEventType::TimeSignature {
            numerator: info.beats_per_measure,
            denominator_pow2: 2,
        },
    );
    track
}

/// Builds the track of a single unit.
///
/// # Example
/// ```ignore
/// let track = TrackEmitter::new("Lead", 0, &woices).emit_unit(&unit, &bends)?;
/// ```
pub struct TrackEmitter<'a> {
    channel: u8,
    woices: &'a [Woice],
    track: MidiTrack,
}

impl<'a> TrackEmitter<'a> {
    /// Start a track named `name` whose melodic events go to `channel`.
    pub fn new(name: impl Into<String>, channel: u8, woices: &'a [Woice]) -> Self {
        let name = name.into();
        let mut track = MidiTrack::new(name.clone());
        track.push(0, MidiEventType::TrackName(name));
        Self {
            channel,
            woices,
            track,
        }
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Woice for a voice index; unknown indices play as the default woice.
    pub fn woice(&self, voice: i32) -> Woice {
        usize::try_from(voice)
            .ok()
            .and_then(|i| self.woices.get(i))
            .copied()
            .unwrap_or_default()
    }

    /// Add a Control Change on the unit channel.
    pub fn cc(&mut self, tick: Tick, controller: u8, value: i32) -> &mut Self {
        self.track.push(
            tick,
            MidiEventType::ControlChange {
                channel: self.channel,
                controller,
                value: clip_7bit(value),
            },
        );
        self
    }

    /// Add a Program Change on the unit channel.
    pub fn program_change(&mut self, tick: Tick, program: u8) -> &mut Self {
        self.track.push(
            tick,
            MidiEventType::ProgramChange {
                channel: self.channel,
                program: program.min(127),
            },
        );
        self
    }

    /// Add a note-on at `start` and its note-off at `end`.
    pub fn note(&mut self, channel: u8, start: Tick, end: Tick, note: u8, velocity: i32) -> &mut Self {
        self.track.push(
            start,
            MidiEventType::NoteOn {
                channel,
                note,
                velocity: clip_7bit(velocity),
            },
        );
        self.track.push(
            end,
            MidiEventType::NoteOff {
                channel,
                note,
                velocity: 0,
            },
        );
        self
    }

    /// Add a pitch bend (-8192 to 8191) on the unit channel.
    pub fn pitch_bend(&mut self, tick: Tick, value: i16) -> &mut Self {
        self.track.push(
            tick,
            MidiEventType::PitchBend {
                channel: self.channel,
                value,
            },
        );
        self
    }

    /// Select RPN 0 (pitch-bend sensitivity) so later data entry sets the range.
    pub fn select_bend_range(&mut self) -> &mut Self {
        self.cc(0, cc::RPN_MSB, 0).cc(0, cc::RPN_LSB, 0)
    }

    /// Bend range via data entry, then the bend itself.
    pub fn bend_point(&mut self, point: &BendPoint) -> &mut Self {
        self.cc(point.tick, cc::DATA_ENTRY_MSB, i32::from(point.range))
            .pitch_bend(point.tick, point.bend_value())
    }

    /// Emit everything for `unit` and return the sorted track.
    pub fn emit_unit(mut self, unit: &UnitTimeline, bends: &[BendPoint]) -> Result<MidiTrack> {
        self.select_bend_range();

        for (tick, &volume) in unit.volume.iter() {
            self.cc(tick, cc::VOLUME, volume);
        }
        for (tick, &pan) in unit.pan_volume.iter() {
            self.cc(tick, cc::PAN, pan);
        }
        for (tick, &balance) in unit.pan_time.iter() {
            self.cc(tick, cc::BALANCE, balance);
        }
        for (tick, &voice) in unit.voice.iter() {
            let woice = self.woice(voice);
            if !woice.is_drum {
                self.program_change(tick, woice.program);
            }
        }

        let mut notes = 0usize;
        for (start, press) in unit.sounding_presses() {
            let woice = self.woice(unit.voice.at(start)?);
            let (channel, note) = if woice.is_drum {
                (DRUM_CHANNEL, woice.program)
            } else {
                (self.channel, clip_7bit(unit.notes.at(start)?))
            };
            self.note(channel, start, press.end(start), note, press.velocity);
            notes += 1;
        }

        for point in bends {
            self.bend_point(point);
        }

        debug!(
            "Track '{}' on channel {}: {} notes, {} bend points",
            self.track.name,
            self.channel,
            notes,
            bends.len()
        );

        let mut track = self.track;
        track.sort();
        Ok(track)
    }
}
