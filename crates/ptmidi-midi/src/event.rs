//! Tick-stamped MIDI events for a song under construction.

use ptmidi_core::Tick;

/// A MIDI event with an absolute tick timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedMidiEvent {
    /// Absolute time in ticks from start of song
    pub tick: Tick,

    /// The actual MIDI event
    pub event: MidiEventType,
}

/// MIDI event types the converter emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MidiEventType {
    /// Track name meta event
    TrackName(String),

    /// Tempo meta event, microseconds per quarter note
    Tempo { micros_per_quarter: u32 },

    /// Time signature meta event: numerator, denominator as a power of two
    TimeSignature { numerator: u8, denominator_pow2: u8 },

    /// Note On: channel (0-15), note number (0-127), velocity (0-127)
    NoteOn { channel: u8, note: u8, velocity: u8 },

    /// Note Off: channel (0-15), note number (0-127), velocity (0-127)
    NoteOff { channel: u8, note: u8, velocity: u8 },

    /// Control Change: channel (0-15), controller (0-127), value (0-127)
    ControlChange {
        channel: u8,
        controller: u8,
        value: u8,
    },

    /// Program Change: channel (0-15), program (0-127)
    ProgramChange { channel: u8, program: u8 },

    /// Pitch Bend: channel (0-15), value (-8192 to 8191)
    PitchBend { channel: u8, value: i16 },
}

impl MidiEventType {
    /// Order of events sharing a tick: releases first, then meta events,
    /// controllers, bends, and finally new notes.
    pub fn priority(&self) -> u8 {
        match self {
            MidiEventType::NoteOff { .. } => 0,
            MidiEventType::TrackName(_)
            | MidiEventType::Tempo { .. }
            | MidiEventType::TimeSignature { .. } => 1,
            MidiEventType::ControlChange { .. } | MidiEventType::ProgramChange { .. } => 2,
            MidiEventType::PitchBend { .. } => 3,
            MidiEventType::NoteOn { .. } => 4,
        }
    }

    /// Channel of a channel message, `None` for meta events.
    pub fn channel(&self) -> Option<u8> {
        match *self {
            MidiEventType::NoteOn { channel, .. }
            | MidiEventType::NoteOff { channel, .. }
            | MidiEventType::ControlChange { channel, .. }
            | MidiEventType::ProgramChange { channel, .. }
            | MidiEventType::PitchBend { channel, .. } => Some(channel),
            _ => None,
        }
    }
}

impl TimedMidiEvent {
    pub fn new(tick: Tick, event: MidiEventType) -> Self {
        Self { tick, event }
    }
}

/// Stable sort by `(tick, priority)`.
pub fn sort_events(events: &mut [TimedMidiEvent]) {
    events.sort_by_key(|e| (e.tick, e.event.priority()));
}
