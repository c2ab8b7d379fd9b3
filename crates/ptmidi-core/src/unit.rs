//! Per-unit timelines built from the decoded event stream.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::ConvertConfig;
use crate::error::{Error, Result};
use crate::project::Project;
use crate::record::{EventKind, EventRecord};
use crate::series::TimeSeries;
use crate::Tick;

/// Default key of a unit, in semitones.
pub const DEFAULT_KEY: i32 = 48;
pub const DEFAULT_VOLUME: i32 = 104;
/// Velocity of a press that has no velocity record.
pub const DEFAULT_VELOCITY: i32 = 104;
pub const DEFAULT_PAN: i32 = 64;

/// Semitone offset baked into raw key values.
const KEY_OFFSET: i32 = 27;
/// Raw key units per semitone.
const KEY_UNITS_PER_SEMITONE: i32 = 256;

/// One note occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Press {
    /// Velocity, 0-128.
    pub velocity: i32,
    /// Length in ticks.
    pub length: Tick,
}

impl Default for Press {
    fn default() -> Self {
        Self {
            velocity: DEFAULT_VELOCITY,
            length: 0,
        }
    }
}

impl Press {
    pub fn new(velocity: i32, length: Tick) -> Self {
        Self { velocity, length }
    }

    /// Tick at which the press ends, given its start.
    pub fn end(&self, start: Tick) -> Tick {
        start.saturating_add(self.length)
    }
}

/// Everything one unit (instrument track) does over the song.
///
/// Presses are discrete occurrences keyed by start tick; every other field
/// is a step function seeded with the unit's power-on default.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTimeline {
    pub presses: BTreeMap<Tick, Press>,
    /// Key in semitones.
    pub notes: TimeSeries<i32>,
    /// Glide time in ticks.
    pub portamento: TimeSeries<Tick>,
    /// Fine tuning in semitones.
    pub tuning: TimeSeries<f64>,
    pub volume: TimeSeries<i32>,
    pub pan_volume: TimeSeries<i32>,
    pub pan_time: TimeSeries<i32>,
    /// Woice index.
    pub voice: TimeSeries<i32>,
    pub group: TimeSeries<i32>,
}

impl Default for UnitTimeline {
    fn default() -> Self {
        Self {
            presses: BTreeMap::new(),
            notes: TimeSeries::seeded(DEFAULT_KEY),
            portamento: TimeSeries::seeded(0),
            tuning: TimeSeries::seeded(0.0),
            volume: TimeSeries::seeded(DEFAULT_VOLUME),
            pan_volume: TimeSeries::seeded(DEFAULT_PAN),
            pan_time: TimeSeries::seeded(DEFAULT_PAN),
            voice: TimeSeries::seeded(0),
            group: TimeSeries::seeded(0),
        }
    }
}

impl UnitTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one record into the matching series.
    ///
    /// Returns `false` when the record kind has no mapping and was skipped.
    pub fn apply(&mut self, record: &EventRecord) -> bool {
        let tick = record.tick;
        match record.kind {
            EventKind::NoteOn => {
                self.presses.entry(tick).or_default().length = record.value.max(0) as Tick;
            }
            EventKind::Velocity => {
                self.presses.entry(tick).or_default().velocity = record.value;
            }
            EventKind::Key => {
                self.notes.insert(tick, decode_key(record.value));
            }
            EventKind::Tuning => match decode_tuning(record.value) {
                Some(semitones) => {
                    self.tuning.insert(tick, semitones);
                }
                None => {
                    warn!(
                        "Skipping tuning at tick {} on unit {}: multiplier {} has no pitch",
                        tick,
                        record.unit_index,
                        f32::from_bits(record.value as u32)
                    );
                    return false;
                }
            },
            EventKind::Portamento => {
                self.portamento.insert(tick, record.value.max(0) as Tick);
            }
            EventKind::Volume => {
                self.volume.insert(tick, record.value);
            }
            EventKind::PanVolume => {
                self.pan_volume.insert(tick, record.value);
            }
            EventKind::PanTime => {
                self.pan_time.insert(tick, record.value);
            }
            EventKind::Voice => {
                self.voice.insert(tick, record.value);
            }
            EventKind::Group => {
                self.group.insert(tick, record.value);
            }
            EventKind::Other(code) => {
                warn!(
                    "Unhandled event kind {} on unit {} at tick {} (value {})",
                    code, record.unit_index, tick, record.value
                );
                return false;
            }
        }
        true
    }

    /// Presses in start order that actually sound (non-zero length).
    pub fn sounding_presses(&self) -> impl Iterator<Item = (Tick, &Press)> {
        self.presses
            .iter()
            .filter(|(_, p)| p.length > 0)
            .map(|(&t, p)| (t, p))
    }
}

/// Raw key value to semitones.
pub fn decode_key(raw: i32) -> i32 {
    raw / KEY_UNITS_PER_SEMITONE - KEY_OFFSET
}

/// Raw tuning bits to a semitone offset, `None` if the multiplier is not a
/// positive finite number.
pub fn decode_tuning(raw: i32) -> Option<f64> {
    let multiplier = f32::from_bits(raw as u32);
    let semitones = f64::from(multiplier).log2() * 12.0;
    semitones.is_finite().then_some(semitones)
}

/// Build one timeline per unit from the project's record stream.
///
/// Records must be in non-decreasing tick order; the stream is rejected
/// otherwise. Records at or past a declared end tick are dropped when the
/// config asks for it.
pub fn build_timelines(project: &Project, config: &ConvertConfig) -> Result<Vec<UnitTimeline>> {
    let count = project.unit_count();
    let mut units = vec![UnitTimeline::default(); count];
    let end_tick = project.info.end_tick;
    let clip_end = config.respect_end_tick && end_tick > 0;

    let mut previous: Tick = 0;
    let mut skipped = 0usize;
    let mut dropped = 0usize;

    for record in &project.records {
        if record.tick < previous {
            return Err(Error::UnorderedRecords {
                previous,
                tick: record.tick,
            });
        }
        previous = record.tick;

        if clip_end && record.tick >= end_tick {
            dropped += 1;
            continue;
        }

        let unit = units.get_mut(record.unit_index).ok_or(Error::UnknownUnit {
            index: record.unit_index,
            count,
        })?;
        if !unit.apply(record) {
            skipped += 1;
        }
    }

    debug!(
        "Ingested {} records into {} units ({} skipped, {} past end tick)",
        project.records.len(),
        count,
        skipped,
        dropped
    );

    Ok(units)
}
