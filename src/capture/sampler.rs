//! Interrupt-fed edge interval sampler
//!
//! One `EdgeSampler` static per channel. The edge interrupt calls
//! [`EdgeSampler::on_edge`] with the current monotonic time; the sampler
//! stores the interval since the previous edge, quantized per channel by
//! the [`Sample`] type. All state lives behind a single critical-section
//! mutex, so the buffer, the write index, and the last-edge stamp always
//! change together and a half-written sample can never be observed.
//!
//! Consumers are expected to mask the edge source (via
//! [`crate::hal::EdgeIrq`]) before calling [`EdgeSampler::take`] so no
//! interrupt fires while the buffer is being drained.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Vec;

/// Stored interval representation for one channel
///
/// Infrared keeps full microsecond resolution in a `u16`; sub-GHz packs
/// longer captures by quantizing to 10 µs units in a `u8`. Both saturate
/// instead of wrapping so an overlong interval reads as "very long" rather
/// than aliasing to a short one.
pub trait Sample: Copy {
    /// Quantize a microsecond interval for storage
    fn from_micros(us: u32) -> Self;

    /// Recover the approximate interval in microseconds
    fn as_micros(self) -> u32;
}

impl Sample for u16 {
    fn from_micros(us: u32) -> Self {
        us.min(u32::from(u16::MAX)) as u16
    }

    fn as_micros(self) -> u32 {
        u32::from(self)
    }
}

impl Sample for u8 {
    fn from_micros(us: u32) -> Self {
        (us / crate::config::SUBGHZ_QUANT_US).min(u32::from(u8::MAX)) as u8
    }

    fn as_micros(self) -> u32 {
        u32::from(self) * crate::config::SUBGHZ_QUANT_US
    }
}

struct SamplerState<S: Sample, const N: usize> {
    buf: Vec<S, N>,
    last_edge_us: u64,
    armed: bool,
}

/// Fixed-capacity interval recorder shared between an interrupt and a poller
pub struct EdgeSampler<S: Sample, const N: usize> {
    state: Mutex<RefCell<SamplerState<S, N>>>,
}

impl<S: Sample, const N: usize> EdgeSampler<S, N> {
    /// Create an empty, disarmed sampler (usable in a `static`)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(SamplerState {
                buf: Vec::new(),
                last_edge_us: 0,
                armed: false,
            })),
        }
    }

    /// Begin a recording run at `now_us`
    ///
    /// Clears any previous contents and seeds the last-edge stamp so the
    /// first recorded interval measures from arm time, not from the
    /// previous run.
    pub fn arm(&self, now_us: u64) {
        critical_section::with(|cs| {
            let mut st = self.state.borrow_ref_mut(cs);
            st.buf.clear();
            st.last_edge_us = now_us;
            st.armed = true;
        });
    }

    /// Stop recording without draining the buffer
    pub fn disarm(&self) {
        critical_section::with(|cs| {
            self.state.borrow_ref_mut(cs).armed = false;
        });
    }

    /// Record an edge at `now_us` (interrupt context)
    ///
    /// Ignored while disarmed. Once the buffer is full further edges are
    /// dropped; the session ends the run on line quiet.
    pub fn on_edge(&self, now_us: u64) {
        critical_section::with(|cs| {
            let mut st = self.state.borrow_ref_mut(cs);
            if !st.armed {
                return;
            }
            let interval = now_us.saturating_sub(st.last_edge_us);
            st.last_edge_us = now_us;
            let interval = u32::try_from(interval).unwrap_or(u32::MAX);
            let _ = st.buf.push(S::from_micros(interval));
        });
    }

    /// Number of intervals recorded so far
    #[must_use]
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.state.borrow_ref(cs).buf.len())
    }

    /// Check whether nothing has been recorded yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Monotonic time of the most recent edge (or the arm time)
    #[must_use]
    pub fn last_edge_us(&self) -> u64 {
        critical_section::with(|cs| self.state.borrow_ref(cs).last_edge_us)
    }

    /// Recorded count and last-edge stamp, read in one critical section
    #[must_use]
    pub fn snapshot(&self) -> (usize, u64) {
        critical_section::with(|cs| {
            let st = self.state.borrow_ref(cs);
            (st.buf.len(), st.last_edge_us)
        })
    }

    /// Drain the recorded buffer and disarm
    ///
    /// Callers mask the edge source first; see the module docs.
    #[must_use]
    pub fn take(&self) -> Vec<S, N> {
        critical_section::with(|cs| {
            let mut st = self.state.borrow_ref_mut(cs);
            st.armed = false;
            core::mem::take(&mut st.buf)
        })
    }
}

impl<S: Sample, const N: usize> Default for EdgeSampler<S, N> {
    fn default() -> Self {
        Self::new()
    }
}
