//! Shared types used across the signal engine
//!
//! Domain-specific types that enforce invariants at compile time and keep
//! raw integers from leaking through the codebase.

use core::fmt;

/// Frequency in Hertz with validation
///
/// Covers both infrared carriers (tens of kHz) and sub-GHz channel
/// frequencies (hundreds of MHz). Stored in Hz for precision.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

impl Frequency {
    /// Minimum supported frequency (10 kHz, below any usable IR carrier)
    pub const MIN_HZ: u32 = 10_000;

    /// Maximum supported frequency (1 GHz, above the 928 MHz ISM edge)
    pub const MAX_HZ: u32 = 1_000_000_000;

    /// Lowest representable frequency, used as a safe constructor fallback
    pub const MIN: Self = Self(Self::MIN_HZ);

    /// Create a new Frequency from Hz, returns None if out of range
    #[must_use]
    pub const fn from_hz(hz: u32) -> Option<Self> {
        if hz >= Self::MIN_HZ && hz <= Self::MAX_HZ {
            Some(Self(hz))
        } else {
            None
        }
    }

    /// Create a new Frequency from kHz
    #[must_use]
    pub const fn from_khz(khz: u32) -> Option<Self> {
        Self::from_hz(khz * 1000)
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        self.0
    }

    /// Get the frequency in kHz (truncated)
    #[must_use]
    pub const fn as_khz(self) -> u32 {
        self.0 / 1000
    }

    /// Get the frequency in MHz as floating point
    #[must_use]
    pub fn as_mhz_f32(self) -> f32 {
        self.0 as f32 / 1_000_000.0
    }

    /// Half period of one carrier cycle in microseconds, never zero
    ///
    /// Used for carrier synthesis by pin toggling. Clamped to 1 µs so a
    /// sub-µs period (anything above 500 kHz) degrades to the fastest
    /// toggle the bit-bang loop can produce rather than a zero delay.
    #[must_use]
    pub const fn half_period_us(self) -> u32 {
        let half = 1_000_000 / self.0 / 2;
        if half == 0 {
            1
        } else {
            half
        }
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} Hz)", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.0);
    }
}
