//! Instrument descriptors inferred from woice names.
//!
//! Woices named `D<n>...` are General MIDI drum notes and woices named
//! `M<n>...` are General MIDI programs, for `n` in 0-127. Anything else
//! plays as program 0 on a melodic channel.

use serde::{Deserialize, Serialize};

/// Resolved MIDI identity of a woice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Woice {
    /// Played on the percussion channel with `program` as note number.
    pub is_drum: bool,
    /// GM program (melodic) or drum note (percussion), 0-127.
    pub program: u8,
}

impl Woice {
    pub const fn melodic(program: u8) -> Self {
        Self {
            is_drum: false,
            program,
        }
    }

    pub const fn drum(note: u8) -> Self {
        Self {
            is_drum: true,
            program: note,
        }
    }

    /// Parse the `D<digits>` / `M<digits>` naming convention.
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let is_drum = match chars.next()? {
            'D' => true,
            'M' => false,
            _ => return None,
        };
        let digits: &str = {
            let rest = chars.as_str();
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            &rest[..end]
        };
        if digits.is_empty() {
            return None;
        }
        // Overlong digit runs fail to parse and fall back like any other miss.
        let number: u32 = digits.parse().ok()?;
        let program = u8::try_from(number).ok().filter(|&n| n < 128)?;
        Some(Self { is_drum, program })
    }
}

/// Resolve every woice of a project, indexed by woice number.
pub fn resolve_woices(names: &[Option<String>]) -> Vec<Woice> {
    names
        .iter()
        .map(|name| {
            name.as_deref()
                .and_then(Woice::from_name)
                .unwrap_or_default()
        })
        .collect()
}
