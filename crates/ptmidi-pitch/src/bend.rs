//! Pitch-bend encoding of semitone offset curves.
//!
//! Each breakpoint is sent as a bend-range change (RPN 0 data entry) followed
//! by a pitch-bend value. The range is chosen per breakpoint as the smallest
//! multiple of 4 semitones strictly greater than the offset's magnitude, so
//! the normalized bend always stays inside (-1, 1).

use ptmidi_core::{Tick, MAX_BEND_RANGE};
use tracing::warn;

use crate::portamento::PitchOffsetCurve;

/// Bend range granularity, in semitones.
pub const BEND_RANGE_STEP: u32 = 4;

/// Signed 14-bit pitch-bend extent (center = 0).
pub const BEND_MIN: i16 = -8192;
pub const BEND_MAX: i16 = 8191;

/// One encoded breakpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendPoint {
    pub tick: Tick,
    /// Bend range in semitones (data entry MSB for RPN 0).
    pub range: u8,
    /// Offset divided by range, in (-1, 1).
    pub normalized: f64,
}

impl BendPoint {
    /// Signed 14-bit pitch-bend value.
    pub fn bend_value(&self) -> i16 {
        let scaled = (self.normalized * 8192.0).round();
        scaled.clamp(f64::from(BEND_MIN), f64::from(BEND_MAX)) as i16
    }
}

/// Range needed for `offset` semitones: `4 * (floor(|offset| / 4) + 1)`.
pub fn bend_range(offset: f64) -> u32 {
    let steps = (offset.abs() / f64::from(BEND_RANGE_STEP)).floor() as u32;
    BEND_RANGE_STEP * (steps + 1)
}

/// Converts offset curves into bend messages.
#[derive(Debug, Clone, Copy)]
pub struct PitchBendEncoder {
    max_range: u8,
}

impl Default for PitchBendEncoder {
    fn default() -> Self {
        Self::new(MAX_BEND_RANGE)
    }
}

impl PitchBendEncoder {
    pub fn new(max_range: u8) -> Self {
        Self {
            max_range: max_range.clamp(BEND_RANGE_STEP as u8, MAX_BEND_RANGE),
        }
    }

    /// Encode a single offset as `(range, normalized)`.
    ///
    /// Offsets beyond the maximum range are clamped to full deflection.
    pub fn encode_offset(&self, offset: f64) -> (u8, f64) {
        let range = bend_range(offset);
        if range > u32::from(self.max_range) {
            warn!(
                "Pitch offset {:.2} exceeds the {} semitone bend range, clamping",
                offset, self.max_range
            );
            let max = f64::from(self.max_range);
            return (self.max_range, (offset / max).clamp(-1.0, 1.0));
        }
        (range as u8, offset / f64::from(range))
    }

    /// Encode every breakpoint of `curve`, in tick order.
    pub fn encode(&self, curve: &PitchOffsetCurve) -> Vec<BendPoint> {
        curve
            .iter()
            .map(|(tick, &offset)| {
                let (range, normalized) = self.encode_offset(offset);
                BendPoint {
                    tick,
                    range,
                    normalized,
                }
            })
            .collect()
    }
}
