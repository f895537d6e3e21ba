//! Hardware capability traits
//!
//! The engine never touches peripherals directly: everything it needs from
//! the board is expressed as a small capability trait (a monotonic clock,
//! a busy-wait delay, a transmit pin, an edge-interrupt gate, and for
//! sub-GHz a transceiver tuner). Boards implement these over their HAL;
//! host tests implement them over plain values.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::types::Frequency;

#[cfg(feature = "embedded")]
pub mod embassy;

/// Monotonic microsecond clock
pub trait Clock {
    /// Microseconds since an arbitrary fixed origin (never goes backwards)
    fn now_us(&self) -> u64;

    /// Milliseconds since the same origin
    fn now_ms(&self) -> u32 {
        (self.now_us() / 1_000) as u32
    }
}

/// Blocking microsecond delay used by the bit-bang transmitters
pub trait Delay {
    /// Busy-wait for `us` microseconds
    fn delay_us(&mut self, us: u32);
}

/// Push-pull transmit pin (infrared LED drive or sub-GHz key line)
pub trait TxPin {
    /// Drive the pin high
    fn set_high(&mut self);

    /// Drive the pin low (idle level)
    fn set_low(&mut self);
}

/// Gate over the edge-interrupt source feeding a sampler
///
/// The capture session disables the gate before reading or resetting the
/// shared edge buffer, so the sampler never writes concurrently with a
/// consumer. On real boards this masks the EXTI line; on hosts (and in the
/// embassy edge task) [`AtomicEdgeGate`] provides the same contract with an
/// atomic flag.
pub trait EdgeIrq {
    /// Unmask the edge source
    fn enable(&mut self);

    /// Mask the edge source
    fn disable(&mut self);
}

/// Transceiver tuning capability (sub-GHz channel only)
pub trait Tuner {
    /// Re-tune the transmit/receive center frequency
    fn set_frequency(&mut self, frequency: Frequency);
}

/// Atomic edge gate usable from a `static`
///
/// The edge task checks [`AtomicEdgeGate::is_enabled`] before forwarding a
/// transition to the sampler, giving the session controller a lock-free way
/// to stop the producer.
#[derive(Debug, Default)]
pub struct AtomicEdgeGate {
    enabled: AtomicBool,
}

impl AtomicEdgeGate {
    /// Create a gate, initially masked
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
        }
    }

    /// Check whether edges should be forwarded to the sampler
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }
}

impl EdgeIrq for AtomicEdgeGate {
    fn enable(&mut self) {
        self.enabled.store(true, Ordering::Release);
    }

    fn disable(&mut self) {
        self.enabled.store(false, Ordering::Release);
    }
}

// Shared references work too, so one static gate can serve both the edge
// task and the engine that owns it as a capability.
impl EdgeIrq for &AtomicEdgeGate {
    fn enable(&mut self) {
        self.enabled.store(true, Ordering::Release);
    }

    fn disable(&mut self) {
        self.enabled.store(false, Ordering::Release);
    }
}

/// Tuner that only records the requested frequency
///
/// Stands in for a real transceiver driver on boards where tuning is done
/// elsewhere, and doubles as the host-test tuner.
#[derive(Debug, Default)]
pub struct SoftTuner {
    tuned: Option<Frequency>,
}

impl SoftTuner {
    /// Create an untuned soft tuner
    #[must_use]
    pub const fn new() -> Self {
        Self { tuned: None }
    }

    /// Last frequency requested through [`Tuner::set_frequency`]
    #[must_use]
    pub const fn tuned(&self) -> Option<Frequency> {
        self.tuned
    }
}

impl Tuner for SoftTuner {
    fn set_frequency(&mut self, frequency: Frequency) {
        self.tuned = Some(frequency);
    }
}
