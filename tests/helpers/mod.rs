//! Test helpers and fixtures for ptmidi integration tests
//!
//! Projects are built with [`ProjectFixture`], which writes the same
//! record triples (key, velocity, note-on) a decoded pxtone file carries.
//! The extractors below pull one kind of event out of a track.

pub mod tolerances;

use ptmidi::prelude::*;
use ptmidi::{MidiEventType, MidiTrack, Tick};

/// Builder for small in-memory projects.
pub struct ProjectFixture {
    project: Project,
}

impl ProjectFixture {
    /// Project with `units` units named `unit0`, `unit1`, ...
    pub fn new(units: usize) -> Self {
        Self {
            project: Project {
                info: ProjectInfo {
                    title: "fixture".to_string(),
                    ..ProjectInfo::default()
                },
                unit_names: (0..units).map(|i| format!("unit{i}")).collect(),
                woice_names: Vec::new(),
                records: Vec::new(),
            },
        }
    }

    pub fn info(mut self, info: ProjectInfo) -> Self {
        self.project.info = info;
        self
    }

    pub fn woice(mut self, name: &str) -> Self {
        self.project.woice_names.push(Some(name.to_string()));
        self
    }

    pub fn record(mut self, record: EventRecord) -> Self {
        self.project.records.push(record);
        self
    }

    /// A press of `length` ticks at `key` with `velocity`.
    pub fn note(self, unit: usize, tick: Tick, length: Tick, key: i32, velocity: i32) -> Self {
        self.record(EventRecord::key(unit, tick, key))
            .record(EventRecord::new(unit, EventKind::Velocity, tick, velocity))
            .record(EventRecord::new(unit, EventKind::NoteOn, tick, length as i32))
    }

    pub fn key(self, unit: usize, tick: Tick, key: i32) -> Self {
        self.record(EventRecord::key(unit, tick, key))
    }

    pub fn portamento(self, unit: usize, tick: Tick, ticks: Tick) -> Self {
        self.record(EventRecord::new(
            unit,
            EventKind::Portamento,
            tick,
            ticks as i32,
        ))
    }

    /// Finish the project; records are stably ordered by tick.
    pub fn build(mut self) -> Project {
        self.project.records.sort_by_key(|r| r.tick);
        self.project
    }
}

/// Route `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Convert with default settings.
pub fn convert(project: &Project) -> MidiSong {
    init_tracing();
    Converter::builder()
        .build()
        .expect("Failed to create converter")
        .convert(project)
        .expect("Conversion failed")
}

/// `(tick, channel, note, velocity)` of every note-on.
pub fn note_ons(track: &MidiTrack) -> Vec<(Tick, u8, u8, u8)> {
    track
        .events
        .iter()
        .filter_map(|e| match e.event {
            MidiEventType::NoteOn {
                channel,
                note,
                velocity,
            } => Some((e.tick, channel, note, velocity)),
            _ => None,
        })
        .collect()
}

/// `(tick, note)` of every note-off.
pub fn note_offs(track: &MidiTrack) -> Vec<(Tick, u8)> {
    track
        .events
        .iter()
        .filter_map(|e| match e.event {
            MidiEventType::NoteOff { note, .. } => Some((e.tick, note)),
            _ => None,
        })
        .collect()
}

/// `(tick, value)` of every pitch bend.
pub fn bends(track: &MidiTrack) -> Vec<(Tick, i16)> {
    track
        .events
        .iter()
        .filter_map(|e| match e.event {
            MidiEventType::PitchBend { value, .. } => Some((e.tick, value)),
            _ => None,
        })
        .collect()
}

/// `(tick, value)` of every change to `controller`.
pub fn controller(track: &MidiTrack, number: u8) -> Vec<(Tick, u8)> {
    track
        .events
        .iter()
        .filter_map(|e| match e.event {
            MidiEventType::ControlChange {
                controller, value, ..
            } if controller == number => Some((e.tick, value)),
            _ => None,
        })
        .collect()
}

/// `(tick, program)` of every program change.
pub fn programs(track: &MidiTrack) -> Vec<(Tick, u8)> {
    track
        .events
        .iter()
        .filter_map(|e| match e.event {
            MidiEventType::ProgramChange { program, .. } => Some((e.tick, program)),
            _ => None,
        })
        .collect()
}
