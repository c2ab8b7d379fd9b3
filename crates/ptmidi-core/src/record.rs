//! Decoded tracker event records.
//!
//! The project decoder produces a flat list of these, ordered by tick.

use serde::{Deserialize, Serialize};

use crate::Tick;

/// Kind of a tracker event.
///
/// Codes follow the pxtone event numbering. Kinds this crate does not map
/// (tempo, repeat and so on) decode to [`EventKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Note start; value is the length in ticks.
    NoteOn,
    /// Note velocity, 0-128.
    Velocity,
    /// Pitch in 1/256 semitone units, offset by 27 semitones.
    Key,
    /// Frequency multiplier, an `f32` stored in the value's bits.
    Tuning,
    /// Glide time in ticks.
    Portamento,
    Volume,
    PanVolume,
    PanTime,
    /// Index of the woice (instrument definition) the unit plays.
    Voice,
    Group,
    /// Any other event code.
    Other(u8),
}

impl EventKind {
    /// Decode a raw pxtone event code.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => EventKind::NoteOn,
            2 => EventKind::Key,
            3 => EventKind::PanVolume,
            4 => EventKind::Velocity,
            5 => EventKind::Volume,
            6 => EventKind::Portamento,
            12 => EventKind::Voice,
            13 => EventKind::Group,
            14 => EventKind::Tuning,
            15 => EventKind::PanTime,
            other => EventKind::Other(other),
        }
    }

    /// The raw pxtone event code.
    pub fn code(self) -> u8 {
        match self {
            EventKind::NoteOn => 1,
            EventKind::Key => 2,
            EventKind::PanVolume => 3,
            EventKind::Velocity => 4,
            EventKind::Volume => 5,
            EventKind::Portamento => 6,
            EventKind::Voice => 12,
            EventKind::Group => 13,
            EventKind::Tuning => 14,
            EventKind::PanTime => 15,
            EventKind::Other(code) => code,
        }
    }
}

/// One decoded event: `value` changes `kind` on unit `unit_index` at `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub unit_index: usize,
    pub kind: EventKind,
    pub tick: Tick,
    pub value: i32,
}

impl EventRecord {
    pub fn new(unit_index: usize, kind: EventKind, tick: Tick, value: i32) -> Self {
        Self {
            unit_index,
            kind,
            tick,
            value,
        }
    }

    /// Raw key value for a semitone pitch, the inverse of the key decoding.
    pub fn key(unit_index: usize, tick: Tick, semitone: i32) -> Self {
        Self::new(unit_index, EventKind::Key, tick, (semitone + 27) * 256)
    }

    /// Tuning record carrying `multiplier` as its bit pattern.
    pub fn tuning(unit_index: usize, tick: Tick, multiplier: f32) -> Self {
        Self::new(
            unit_index,
            EventKind::Tuning,
            tick,
            multiplier.to_bits() as i32,
        )
    }
}
