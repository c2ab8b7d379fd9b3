//! Builder for configuring and constructing a `Converter`.

use std::collections::BTreeMap;

use ptmidi_core::{ConvertConfig, Woice};

use crate::{Converter, Result};

/// Woice names are resolved with the `D<n>` / `M<n>` convention unless an
/// explicit descriptor is given for that woice index.
///
/// # Example
///
/// ```ignore
/// use ptmidi::prelude::*;
///
/// let converter = Converter::builder()
///     .glide_step(5)
///     .woice_override(2, Woice::drum(38))
///     .build()?;
///
/// let song = converter.convert(&project)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConverterBuilder {
    config: ConvertConfig,
    woice_overrides: BTreeMap<usize, Woice>,
}

impl ConverterBuilder {
    /// Replace the whole configuration.
    pub fn config(mut self, config: ConvertConfig) -> Self {
        self.config = config;
        self
    }

    /// Default: 480
    pub fn ticks_per_quarter(mut self, ticks: u16) -> Self {
        self.config.ticks_per_quarter = ticks;
        self
    }

    /// Default: 10
    pub fn glide_step(mut self, step: u32) -> Self {
        self.config.glide_step = step;
        self
    }

    /// Default: 124
    pub fn max_bend_range(mut self, semitones: u8) -> Self {
        self.config.max_bend_range = semitones;
        self
    }

    /// Default: true
    pub fn respect_end_tick(mut self, respect: bool) -> Self {
        self.config.respect_end_tick = respect;
        self
    }

    /// Use `woice` for woice `index` instead of inferring it from the name.
    pub fn woice_override(mut self, index: usize, woice: Woice) -> Self {
        self.woice_overrides.insert(index, woice);
        self
    }

    pub fn build(self) -> Result<Converter> {
        self.config.validate()?;
        Ok(Converter::new(self.config, self.woice_overrides))
    }
}
