//! Fine-tuning overlay.
//!
//! pxtone tuning is a frequency multiplier per unit, already converted to
//! semitones during ingestion. It shifts whatever the glide curve is doing,
//! so the two curves are summed breakpoint-wise.

use std::ops::Bound::{Excluded, Included, Unbounded};

use ptmidi_core::TimeSeries;

use crate::error::Result;
use crate::portamento::PitchOffsetCurve;

/// Add `tuning` onto `base` in place.
///
/// Afterwards `base.at(t)` equals the old `base.at(t)` plus `tuning.at(t)`
/// for every `t` covered by both curves. A breakpoint is added to `base` at
/// every tuning change that doesn't already have one; no other resampling
/// happens.
pub fn overlay_tuning(base: &mut PitchOffsetCurve, tuning: &TimeSeries<f64>) -> Result<()> {
    let changes: Vec<_> = tuning.iter().map(|(t, &v)| (t, v)).collect();
    // Inserted breakpoints take the untuned value.
    let untuned = base.clone();

    for (i, &(tick, semitones)) in changes.iter().enumerate() {
        let current = untuned.at(tick)?;
        base.entry(tick).or_insert(current);

        let end = match changes.get(i + 1) {
            Some(&(next, _)) => Excluded(next),
            None => Unbounded,
        };
        for (_, value) in base.range_mut((Included(tick), end)) {
            *value += semitones;
        }
    }
    Ok(())
}
