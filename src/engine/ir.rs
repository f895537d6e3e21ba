//! Infrared channel engine

use crate::capture::{CaptureSession, EdgeSampler};
use crate::config::{HISTORY_CAPACITY, IR_QUIET_TIMEOUT_MS, IR_RAW_CAPACITY};
use crate::decode::decode_ir;
use crate::engine::EngineError;
use crate::hal::{Clock, Delay, EdgeIrq, TxPin};
use crate::history::History;
use crate::signal::IrSignal;
use crate::transmit::{transmit_ir, TransmitError};

/// Infrared capture/replay engine
///
/// Generic over the board capabilities; the sampler is shared with the
/// edge interrupt and lives in a `static`.
pub struct IrEngine<'s, C, P, G>
where
    C: Clock + Delay,
    P: TxPin,
    G: EdgeIrq,
{
    clock: C,
    pin: P,
    gate: G,
    sampler: &'s EdgeSampler<u16, IR_RAW_CAPACITY>,
    session: CaptureSession,
    history: History<IrSignal, HISTORY_CAPACITY>,
    ready: bool,
    transmitting: bool,
}

impl<'s, C, P, G> IrEngine<'s, C, P, G>
where
    C: Clock + Delay,
    P: TxPin,
    G: EdgeIrq,
{
    /// Wire up an engine; call [`IrEngine::init`] before use
    pub fn new(clock: C, pin: P, gate: G, sampler: &'s EdgeSampler<u16, IR_RAW_CAPACITY>) -> Self {
        Self {
            clock,
            pin,
            gate,
            sampler,
            session: CaptureSession::new(IR_QUIET_TIMEOUT_MS),
            history: History::new(),
            ready: false,
            transmitting: false,
        }
    }

    /// Bring the channel to a known state: LED off, edge source masked
    pub fn init(&mut self) {
        self.pin.set_low();
        self.gate.disable();
        self.sampler.disarm();
        self.ready = true;
    }

    /// Begin listening for an infrared frame
    ///
    /// # Errors
    ///
    /// [`EngineError::NotReady`] before `init`,
    /// [`EngineError::AlreadyActive`] while a capture runs.
    pub fn start_capture(&mut self) -> Result<(), EngineError> {
        if !self.ready {
            return Err(EngineError::NotReady);
        }
        let now_us = self.clock.now_us();
        self.session
            .start(now_us, self.sampler, &mut self.gate)
            .map_err(EngineError::from)
    }

    /// Abandon the current capture (idempotent)
    pub fn stop_capture(&mut self) {
        if !self.ready {
            return;
        }
        self.session.stop(self.sampler, &mut self.gate);
    }

    /// Check whether a capture session is running
    #[must_use]
    pub const fn is_capturing(&self) -> bool {
        self.session.is_active()
    }

    /// Poll the channel, called at the engine tick rate
    ///
    /// When a capture completes, decodes it, records it in history, and
    /// returns it so the caller can offer it to persistence.
    pub fn tick(&mut self) -> Option<IrSignal> {
        if !self.ready {
            return None;
        }
        let now_us = self.clock.now_us();
        let buf = self.session.tick(now_us, self.sampler, &mut self.gate)?;
        let signal = decode_ir(&buf, self.clock.now_ms())?;
        self.history.push(signal.clone());
        Some(signal)
    }

    /// Transmit a signal, blocking until the frame completes
    ///
    /// # Errors
    ///
    /// [`TransmitError::NotReady`] before `init`, plus the encoder's own
    /// failures. The LED pin is left low on every path.
    pub fn transmit(&mut self, signal: &IrSignal) -> Result<(), TransmitError> {
        if !self.ready {
            return Err(TransmitError::NotReady);
        }
        self.transmitting = true;
        let result = transmit_ir(&mut self.pin, &mut self.clock, signal);
        self.transmitting = false;
        result
    }

    /// Check whether a transmission is in progress
    #[must_use]
    pub const fn is_transmitting(&self) -> bool {
        self.transmitting
    }

    /// Number of signals retained in history
    #[must_use]
    pub const fn history_count(&self) -> usize {
        self.history.len()
    }

    /// Clone out a history entry (0 = oldest retained)
    #[must_use]
    pub fn history_item(&self, index: usize) -> Option<IrSignal> {
        self.history.get(index)
    }

    /// Forget all history entries
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
