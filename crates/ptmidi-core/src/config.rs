//! Conversion configuration.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, Tick};

/// Largest bend range expressible in a data-entry byte that is a multiple of 4.
pub const MAX_BEND_RANGE: u8 = 124;

/// Configuration for a conversion run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Output resolution. pxtone clocks are 480 per quarter note and are
    /// rescaled when this differs.
    pub ticks_per_quarter: u16,
    /// Sampling interval for glide ramps.
    pub glide_step: Tick,
    /// Upper limit for the per-event pitch-bend range, in semitones.
    pub max_bend_range: u8,
    /// Drop records at or past the project's declared end tick.
    pub respect_end_tick: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            ticks_per_quarter: 480,
            glide_step: 10,
            max_bend_range: MAX_BEND_RANGE,
            respect_end_tick: true,
        }
    }
}

impl ConvertConfig {
    /// Parse a TOML document. Missing keys take their default.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ticks_per_quarter == 0 || self.ticks_per_quarter > 0x7FFF {
            return Err(Error::InvalidConfig(format!(
                "ticks_per_quarter {} out of range (1-32767)",
                self.ticks_per_quarter
            )));
        }
        if self.glide_step == 0 {
            return Err(Error::InvalidConfig(
                "glide_step must be at least 1 tick".to_string(),
            ));
        }
        if self.max_bend_range < 4
            || self.max_bend_range > MAX_BEND_RANGE
            || self.max_bend_range % 4 != 0
        {
            return Err(Error::InvalidConfig(format!(
                "max_bend_range {} must be a multiple of 4 in 4-{}",
                self.max_bend_range, MAX_BEND_RANGE
            )));
        }
        Ok(())
    }
}
