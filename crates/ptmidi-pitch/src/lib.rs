//! Pitch curves for ptmidi.
//!
//! - **[`PortamentoEngine`]** - Samples pxtone glides into a semitone offset curve
//! - **[`overlay_tuning`]** - Adds a unit's fine tuning onto that curve
//! - **[`PitchBendEncoder`]** - Turns the curve into (bend range, bend value) pairs
//!
//! # Example
//!
//! ```ignore
//! use ptmidi_pitch::{overlay_tuning, PitchBendEncoder, PortamentoEngine};
//!
//! let mut curve = PortamentoEngine::new(10)
//!     .pitch_offsets(&unit.presses, &unit.notes, &unit.portamento)?;
//! overlay_tuning(&mut curve, &unit.tuning)?;
//! let bends = PitchBendEncoder::default().encode(&curve);
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod portamento;
pub use portamento::{lerp, PitchOffsetCurve, PortamentoEngine, DEFAULT_GLIDE_STEP};

mod tuning;
pub use tuning::overlay_tuning;

pub mod bend;
pub use bend::{bend_range, BendPoint, PitchBendEncoder};
