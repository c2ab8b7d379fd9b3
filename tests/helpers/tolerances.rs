//! Tolerance constants for conversion tests.

/// Offsets that come out of exact arithmetic (lerp on small integers).
pub const SEMITONE_EPSILON: f64 = 1e-9;

/// One step of a signed 14-bit pitch bend.
pub const BEND_STEP: i16 = 1;
