//! Decoded project: metadata, names and the event stream.

use serde::{Deserialize, Serialize};

use crate::record::EventRecord;
use crate::Tick;

/// Project-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub title: String,
    /// Tempo in beats per minute.
    pub tempo_bpm: f32,
    /// Beats per measure (time signature numerator).
    pub beats_per_measure: u8,
    /// Declared end of the song; 0 means "no end declared".
    pub end_tick: Tick,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            title: String::new(),
            tempo_bpm: 120.0,
            beats_per_measure: 4,
            end_tick: 0,
        }
    }
}

/// A project as handed over by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub info: ProjectInfo,
    /// Display name per unit; its length is the unit count.
    pub unit_names: Vec<String>,
    /// Display name per woice, `None` when the woice has no name.
    pub woice_names: Vec<Option<String>>,
    /// Events in non-decreasing tick order.
    pub records: Vec<EventRecord>,
}

impl Project {
    pub fn unit_count(&self) -> usize {
        self.unit_names.len()
    }
}
