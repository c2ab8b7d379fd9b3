//! The conversion pipeline.
//!
//! Timelines are built from the record stream, each unit gets a pitch-offset
//! curve (glides plus tuning) which is encoded as bend messages, and every
//! unit becomes one track after the metadata track.

use std::collections::BTreeMap;
use std::path::Path;

use ptmidi_core::{build_timelines, resolve_woices, ConvertConfig, Project, UnitTimeline, Woice};
use ptmidi_midi::{
    metadata_track, ChannelAllocator, MidiSong, TrackEmitter, DEFAULT_TICKS_PER_QUARTER,
};
use ptmidi_pitch::{overlay_tuning, PitchBendEncoder, PitchOffsetCurve, PortamentoEngine};
use tracing::debug;

use crate::{ConverterBuilder, Result};

/// Converts decoded pxtone projects into MIDI songs.
///
/// A converter holds only configuration; it can be reused for any number of
/// projects.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConvertConfig,
    woice_overrides: BTreeMap<usize, Woice>,
}

impl Converter {
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::default()
    }

    pub(crate) fn new(config: ConvertConfig, woice_overrides: BTreeMap<usize, Woice>) -> Self {
        Self {
            config,
            woice_overrides,
        }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Woice table for `project`, with overrides applied.
    pub fn woices(&self, project: &Project) -> Vec<Woice> {
        let mut woices = resolve_woices(&project.woice_names);
        for (&index, &woice) in &self.woice_overrides {
            if index >= woices.len() {
                woices.resize(index + 1, Woice::default());
            }
            woices[index] = woice;
        }
        woices
    }

    /// Pitch-offset curve of one unit: glides, then tuning on top.
    pub fn pitch_curve(&self, unit: &UnitTimeline) -> Result<PitchOffsetCurve> {
        let engine = PortamentoEngine::new(self.config.glide_step);
        let mut curve = engine.pitch_offsets(&unit.presses, &unit.notes, &unit.portamento)?;
        overlay_tuning(&mut curve, &unit.tuning)?;
        Ok(curve)
    }

    /// Run the full pipeline. Nothing is produced if any stage fails.
    pub fn convert(&self, project: &Project) -> Result<MidiSong> {
        let units = build_timelines(project, &self.config)?;
        let woices = self.woices(project);
        let channels = ChannelAllocator::new(units.len());
        let encoder = PitchBendEncoder::new(self.config.max_bend_range);

        // Project ticks are pxtone clocks, 480 per quarter note.
        let mut song = MidiSong::new(DEFAULT_TICKS_PER_QUARTER);
        song.tracks.push(metadata_track(&project.info));

        for (index, unit) in units.iter().enumerate() {
            let curve = self.pitch_curve(unit)?;
            let bends = encoder.encode(&curve);
            let name = project
                .unit_names
                .get(index)
                .map(String::as_str)
                .unwrap_or_default();
            let track =
                TrackEmitter::new(name, channels.channel(index), &woices).emit_unit(unit, &bends)?;
            song.tracks.push(track);
        }
        song.rescale(self.config.ticks_per_quarter);

        debug!(
            "Converted '{}': {} units, {} tracks, {} events",
            project.info.title,
            units.len(),
            song.tracks.len(),
            song.events().count()
        );
        Ok(song)
    }

    /// Convert and write the result to `path` as a Standard MIDI File.
    pub fn convert_to_file(&self, project: &Project, path: impl AsRef<Path>) -> Result<MidiSong> {
        let song = self.convert(project)?;
        song.save(path)?;
        Ok(song)
    }
}
