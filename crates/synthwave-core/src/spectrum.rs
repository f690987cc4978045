//! Band extraction from analyser byte spectra.
//!
//! The analyser hands us one byte per frequency bin (0..=255). Seven named
//! bands are read from fixed, contiguous bin ranges in ascending order and
//! normalized to \[0, 1\]. Everything here is a pure function of its input.

use crate::constants::{BAND_COUNT, BYTE_MAX};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BandKind {
    SubBass,
    Bass,
    LowMid,
    Mid,
    UpperMid,
    Treble,
    HighTreble,
}

impl BandKind {
    pub const ALL: [BandKind; BAND_COUNT] = [
        BandKind::SubBass,
        BandKind::Bass,
        BandKind::LowMid,
        BandKind::Mid,
        BandKind::UpperMid,
        BandKind::Treble,
        BandKind::HighTreble,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BandKind::SubBass => "Sub-Bass",
            BandKind::Bass => "Bass",
            BandKind::LowMid => "Low Mid",
            BandKind::Mid => "Mid",
            BandKind::UpperMid => "Upper Mid",
            BandKind::Treble => "Treble",
            BandKind::HighTreble => "High Treble",
        }
    }

    /// Inclusive analyser bin range for this band.
    pub fn range(self) -> (usize, usize) {
        match self {
            BandKind::SubBass => (0, 1),
            BandKind::Bass => (2, 4),
            BandKind::LowMid => (5, 8),
            BandKind::Mid => (9, 14),
            BandKind::UpperMid => (15, 19),
            BandKind::Treble => (20, 24),
            BandKind::HighTreble => (25, 31),
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrequencyBand {
    pub kind: BandKind,
    /// Mean bin energy over the band, in \[0, 1\].
    pub value: f32,
}

impl FrequencyBand {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.kind.label(), self.value)
    }
}

/// The seven band intensities of one frame, in ascending frequency order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bands([FrequencyBand; BAND_COUNT]);

impl Default for Bands {
    fn default() -> Self {
        Self(BandKind::ALL.map(|kind| FrequencyBand { kind, value: 0.0 }))
    }
}

impl Bands {
    #[inline]
    pub fn value(&self, kind: BandKind) -> f32 {
        self.0[kind.index()].value
    }

    pub fn mid(&self) -> f32 {
        self.value(BandKind::Mid)
    }

    pub fn high_treble(&self) -> f32 {
        self.value(BandKind::HighTreble)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrequencyBand> {
        self.0.iter()
    }
}

/// Raw byte value of one bin; bins past the end read as 0.
#[inline]
pub fn bin_at(energies: &[u8], index: usize) -> f32 {
    energies.get(index).copied().unwrap_or(0) as f32
}

/// Mean of `energies[lo..=hi]` divided by the byte max.
///
/// Missing bins contribute 0 but still count toward the mean, so a short
/// buffer dims a band rather than inflating it.
pub fn average_energy(energies: &[u8], lo: usize, hi: usize) -> f32 {
    if hi < lo {
        return 0.0;
    }
    let count = hi - lo + 1;
    let sum: u32 = (lo..=hi)
        .map(|i| energies.get(i).copied().unwrap_or(0) as u32)
        .sum();
    sum as f32 / count as f32 / BYTE_MAX
}

pub fn extract_bands(energies: &[u8]) -> Bands {
    Bands(BandKind::ALL.map(|kind| {
        let (lo, hi) = kind.range();
        FrequencyBand {
            kind,
            value: average_energy(energies, lo, hi),
        }
    }))
}
