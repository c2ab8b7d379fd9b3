//! Timeline model for ptmidi.
//!
//! Turns the flat, tick-ordered event stream of a decoded pxtone project
//! into per-unit step functions:
//!
//! - [`TimeSeries`]: "value in effect at tick t" container
//! - [`UnitTimeline`] / [`build_timelines`]: per-unit ingestion
//! - [`Woice`] / [`resolve_woices`]: GM program and drum inference from names
//! - [`ConvertConfig`]: conversion settings
//!
//! # Example
//!
//! ```ignore
//! use ptmidi_core::{build_timelines, ConvertConfig, Project};
//!
//! let units = build_timelines(&project, &ConvertConfig::default())?;
//! let key = units[0].notes.at(480)?;
//! ```

pub mod error;
pub use error::{Error, Result};

mod series;
pub use series::TimeSeries;

pub mod record;
pub use record::{EventKind, EventRecord};

mod project;
pub use project::{Project, ProjectInfo};

pub mod unit;
pub use unit::{build_timelines, Press, UnitTimeline};

mod woice;
pub use woice::{resolve_woices, Woice};

mod config;
pub use config::{ConvertConfig, MAX_BEND_RANGE};

/// Time in ticks (pxtone clocks, 480 per quarter note).
pub type Tick = u32;
