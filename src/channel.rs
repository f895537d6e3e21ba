//! Sub-GHz frequency and scan control
//!
//! Tracks the current channel frequency and an optional sweep. The sweep
//! advances one step per engine tick and wraps back to its lower bound
//! after passing the upper bound; each step re-tunes the transceiver
//! through the [`Tuner`] capability.

use crate::config::{DEFAULT_SUBGHZ_HZ, SCAN_STEP_HZ};
use crate::hal::Tuner;
use crate::types::Frequency;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ScanRange {
    low: Frequency,
    high: Frequency,
}

/// Channel frequency state for the sub-GHz path
#[derive(Clone, Copy, Debug)]
pub struct ChannelState {
    current: Frequency,
    scan: Option<ScanRange>,
}

impl ChannelState {
    /// Start at the 433.92 MHz default, not scanning
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Frequency::from_hz(DEFAULT_SUBGHZ_HZ).unwrap_or(Frequency::MIN),
            scan: None,
        }
    }

    /// Current channel frequency
    #[must_use]
    pub const fn current(&self) -> Frequency {
        self.current
    }

    /// Check whether a sweep is running
    #[must_use]
    pub const fn is_scanning(&self) -> bool {
        self.scan.is_some()
    }

    /// Tune directly to `frequency`, cancelling any sweep
    pub fn set_frequency(&mut self, frequency: Frequency, tuner: &mut impl Tuner) {
        self.scan = None;
        self.retune(frequency, tuner);
    }

    /// Tune to `frequency` without disturbing a running sweep
    ///
    /// Used for transient retunes such as transmission; the next `step`
    /// continues the sweep from here, wrapping if the frequency sits past
    /// the upper bound.
    pub fn retune(&mut self, frequency: Frequency, tuner: &mut impl Tuner) {
        self.current = frequency;
        tuner.set_frequency(frequency);
    }

    /// Begin sweeping `low..=high`, tuning to `low` immediately
    ///
    /// Bounds are normalized so a reversed pair still sweeps upward.
    pub fn start_scan(&mut self, low: Frequency, high: Frequency, tuner: &mut impl Tuner) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        self.scan = Some(ScanRange { low, high });
        self.current = low;
        tuner.set_frequency(low);
    }

    /// Stop sweeping, holding the frequency the sweep reached
    pub fn stop_scan(&mut self) {
        self.scan = None;
    }

    /// Advance a running sweep by one step, wrapping past the upper bound
    ///
    /// No effect when not scanning.
    pub fn step(&mut self, tuner: &mut impl Tuner) {
        let Some(range) = self.scan else {
            return;
        };
        let next_hz = self.current.as_hz().saturating_add(SCAN_STEP_HZ);
        self.current = if next_hz > range.high.as_hz() {
            range.low
        } else {
            Frequency::from_hz(next_hz).unwrap_or(range.low)
        };
        tuner.set_frequency(self.current);
    }
}

impl Default for ChannelState {
    fn default() -> Self {
        Self::new()
    }
}
