//! Unit-to-channel allocation.
//!
//! Melodic units cycle through the 15 non-percussion channels. Drum presses
//! always go to the GM percussion channel.

use tracing::warn;

/// GM percussion channel (0-based).
pub const DRUM_CHANNEL: u8 = 9;

/// Channels available to melodic units.
pub const MELODIC_CHANNELS: usize = 15;

/// Melodic channel of unit `index`, skipping the percussion channel.
pub fn melodic_channel(index: usize) -> u8 {
    let c = (index % MELODIC_CHANNELS) as u8;
    if c >= DRUM_CHANNEL {
        c + 1
    } else {
        c
    }
}

/// Per-conversion channel assignment.
#[derive(Debug, Clone)]
pub struct ChannelAllocator {
    channels: Vec<u8>,
}

impl ChannelAllocator {
    /// Assign channels to `unit_count` units.
    pub fn new(unit_count: usize) -> Self {
        if unit_count > MELODIC_CHANNELS {
            warn!(
                "{} units share {} melodic channels, channels will be reused",
                unit_count, MELODIC_CHANNELS
            );
        }
        Self {
            channels: (0..unit_count).map(melodic_channel).collect(),
        }
    }

    pub fn channel(&self, unit_index: usize) -> u8 {
        self.channels
            .get(unit_index)
            .copied()
            .unwrap_or_else(|| melodic_channel(unit_index))
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
