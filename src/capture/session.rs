//! Capture session state machine
//!
//! Polled controller over an [`EdgeSampler`]: `start` arms the sampler and
//! unmasks the edge source, `tick` watches for line quiet and drains the
//! buffer when the signal has ended, `stop` abandons a run. The edge source
//! is always masked before the sampler is drained or reset.

use heapless::Vec;

use crate::capture::sampler::{EdgeSampler, Sample};
use crate::config::MIN_DECODE_SAMPLES;
use crate::hal::EdgeIrq;

/// Capture session failures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureError {
    /// `start` was called while a session was already running
    AlreadyActive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Capturing,
}

/// Per-channel capture controller
///
/// Holds no sample data itself; the buffer lives in the shared sampler.
#[derive(Debug)]
pub struct CaptureSession {
    state: State,
    quiet_us: u64,
    started_at_us: u64,
}

impl CaptureSession {
    /// Create an idle session that ends a capture after `quiet_ms` of
    /// line silence
    #[must_use]
    pub const fn new(quiet_ms: u32) -> Self {
        Self {
            state: State::Idle,
            quiet_us: quiet_ms as u64 * 1_000,
            started_at_us: 0,
        }
    }

    /// Check whether a capture is in progress
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, State::Capturing)
    }

    /// Arm the sampler and unmask the edge source
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::AlreadyActive`] if a session is running;
    /// the run in progress is unaffected.
    pub fn start<S: Sample, const N: usize>(
        &mut self,
        now_us: u64,
        sampler: &EdgeSampler<S, N>,
        irq: &mut impl EdgeIrq,
    ) -> Result<(), CaptureError> {
        if self.is_active() {
            return Err(CaptureError::AlreadyActive);
        }
        sampler.arm(now_us);
        irq.enable();
        self.state = State::Capturing;
        self.started_at_us = now_us;
        Ok(())
    }

    /// Abandon the current capture, discarding anything recorded
    ///
    /// Idempotent: stopping an idle session does nothing.
    pub fn stop<S: Sample, const N: usize>(
        &mut self,
        sampler: &EdgeSampler<S, N>,
        irq: &mut impl EdgeIrq,
    ) {
        if !self.is_active() {
            return;
        }
        irq.disable();
        let _ = sampler.take();
        self.state = State::Idle;
    }

    /// Poll for session completion
    ///
    /// Returns the drained buffer once the line has been quiet for the
    /// configured timeout and at least [`MIN_DECODE_SAMPLES`] intervals
    /// were recorded. Runs that end shorter than that are discarded
    /// (noise blips), returning `None` with the session back at idle.
    pub fn tick<S: Sample, const N: usize>(
        &mut self,
        now_us: u64,
        sampler: &EdgeSampler<S, N>,
        irq: &mut impl EdgeIrq,
    ) -> Option<Vec<S, N>> {
        if !self.is_active() {
            return None;
        }
        // last_edge holds the arm time until the first edge, so a silent
        // line times the session out the same way a finished frame does.
        let (_, last_edge_us) = sampler.snapshot();
        if now_us.saturating_sub(last_edge_us) < self.quiet_us {
            return None;
        }
        // Mask before draining so no edge lands mid-read.
        irq.disable();
        let buf = sampler.take();
        self.state = State::Idle;
        if buf.len() >= MIN_DECODE_SAMPLES {
            Some(buf)
        } else {
            None
        }
    }
}
