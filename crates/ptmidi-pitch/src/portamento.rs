//! Portamento (pitch glide) reconstruction.
//!
//! pxtone glides continuously from one key to the next over the unit's
//! current portamento time. MIDI has no such thing, so the glide is sampled
//! into a semitone offset curve relative to the key each note started on,
//! which [`crate::bend`] later turns into pitch-bend messages.
//!
//! # Mid-note portamento changes
//!
//! When the portamento time changes while a glide is still running, pxtone
//! does not simply continue at the new rate:
//!
//! 1. Once any glide segment has reached its target, later portamento
//!    changes do nothing for that key change.
//! 2. Otherwise the note continues as if the new portamento time had been in
//!    effect since the key change. This can make the pitch jump: with a
//!    4-beat glide down 4 semitones shortened to 2 beats one beat in, the
//!    pitch slides 1 semitone, jumps to 2, then slides on to 4.
//!
//! Both rules are reproduced, without pxtone's extra distinction between a
//! zero and a non-zero previous portamento time. If no segment completes
//! before the window closes, the last portamento time is applied over the
//! whole remaining window to compute the end value.
//!
//! Writing (possibly empty) key events at every portamento change avoids
//! all of this.
//!
//! # Example
//!
//! ```ignore
//! use ptmidi_pitch::PortamentoEngine;
//!
//! let engine = PortamentoEngine::new(10);
//! let curve = engine.pitch_offsets(&unit.presses, &unit.notes, &unit.portamento)?;
//! ```

use std::collections::BTreeMap;
use std::ops::Bound::Excluded;

use ptmidi_core::{Press, Tick, TimeSeries};
use tracing::trace;

use crate::error::Result;

/// Semitone offset from each note's starting key, over the lifetime of a unit.
pub type PitchOffsetCurve = TimeSeries<f64>;

/// Default sampling interval of glide ramps, in ticks.
pub const DEFAULT_GLIDE_STEP: Tick = 10;

/// Linear interpolation from `a` (at `num == 0`) to `b` (at `num == denom`).
#[inline]
pub fn lerp(a: f64, b: f64, num: Tick, denom: Tick) -> f64 {
    let (num, denom) = (f64::from(num), f64::from(denom));
    (a * (denom - num) + b * num) / denom
}

/// Builds pitch offset curves from a unit's presses, keys and glide times.
#[derive(Debug, Clone, Copy)]
pub struct PortamentoEngine {
    glide_step: Tick,
}

impl Default for PortamentoEngine {
    fn default() -> Self {
        Self::new(DEFAULT_GLIDE_STEP)
    }
}

impl PortamentoEngine {
    /// `glide_step` must be non-zero; a zero step is raised to 1.
    pub fn new(glide_step: Tick) -> Self {
        Self {
            glide_step: glide_step.max(1),
        }
    }

    pub fn glide_step(&self) -> Tick {
        self.glide_step
    }

    /// Compute the offset curve for one unit.
    ///
    /// Each sounding press owns the window from its start to its end or the
    /// next press, whichever comes first. Key changes inside the window glide
    /// relative to the key in effect at the press start.
    pub fn pitch_offsets(
        &self,
        presses: &BTreeMap<Tick, Press>,
        notes: &TimeSeries<i32>,
        portamento: &TimeSeries<Tick>,
    ) -> Result<PitchOffsetCurve> {
        let mut offsets = PitchOffsetCurve::seeded(0.0);

        let starts: Vec<(Tick, Tick)> = presses
            .iter()
            .filter(|(_, p)| p.length > 0)
            .map(|(&start, p)| (start, p.end(start)))
            .collect();

        for (i, &(press_time, press_end)) in starts.iter().enumerate() {
            let window_end = match starts.get(i + 1) {
                Some(&(next_start, _)) => press_end.min(next_start),
                None => press_end,
            };

            // A new note starts in tune.
            if offsets.at(press_time)? != 0.0 {
                offsets.insert(press_time, 0.0);
            }

            let base_key = notes.at(press_time)?;
            let key_changes: Vec<(Tick, i32)> = notes
                .range((Excluded(press_time), Excluded(window_end)))
                .map(|(t, &k)| (t, k))
                .collect();

            for (k, &(key_time, key)) in key_changes.iter().enumerate() {
                let next_key = key_changes.get(k + 1).map(|&(t, _)| t);
                self.glide(
                    &mut offsets,
                    portamento,
                    key_time,
                    f64::from(key - base_key),
                    window_end.min(next_key.unwrap_or(window_end)) - key_time,
                )?;
            }
        }

        trace!("Portamento curve: {} breakpoints", offsets.len());
        Ok(offsets)
    }

    /// Glide from the current offset to `dest` starting at `key_time`, with
    /// `available` ticks before the note window or the next key change ends.
    fn glide(
        &self,
        offsets: &mut PitchOffsetCurve,
        portamento: &TimeSeries<Tick>,
        key_time: Tick,
        dest: f64,
        available: Tick,
    ) -> Result<()> {
        let curr = offsets.at(key_time)?;
        if dest == curr {
            return Ok(());
        }

        let horizon = key_time + available;
        let (first_time, &first_porta) = portamento
            .breakpoint_at(key_time)
            .ok_or(ptmidi_core::Error::NoValueDefined { tick: key_time })?;
        let mut segments = vec![(first_time, first_porta)];
        segments.extend(
            portamento
                .range((Excluded(key_time), Excluded(horizon)))
                .map(|(t, &p)| (t, p)),
        );

        for (s, &(segment_time, porta)) in segments.iter().enumerate() {
            let segment_available = match segments.get(s + 1) {
                Some(&(next_time, _)) => available.min(next_time - key_time),
                None => available,
            };

            let limit = segment_available.min(porta);
            let mut i = segment_time.max(key_time) - key_time;
            while i < limit {
                offsets.insert(key_time + i, lerp(curr, dest, i, porta));
                i = match i.checked_add(self.glide_step) {
                    Some(next) => next,
                    None => break,
                };
            }

            if porta <= segment_available {
                offsets.insert(key_time + porta, dest);
                return Ok(());
            }
        }

        // No segment finished: the last portamento time stands for the whole
        // window. It is non-zero, or it would have finished.
        if let Some(&(_, porta)) = segments.last() {
            offsets.insert(horizon, lerp(curr, dest, available, porta));
        }
        Ok(())
    }
}
