//! Sub-GHz channel engine

use crate::capture::{CaptureSession, EdgeSampler};
use crate::channel::ChannelState;
use crate::config::{HISTORY_CAPACITY, SUBGHZ_QUIET_TIMEOUT_MS, SUBGHZ_RAW_CAPACITY};
use crate::decode::decode_subghz;
use crate::engine::EngineError;
use crate::hal::{Clock, Delay, EdgeIrq, Tuner, TxPin};
use crate::history::History;
use crate::signal::SubGhzSignal;
use crate::transmit::{transmit_subghz, TransmitError};
use crate::types::Frequency;

/// Sub-GHz capture/replay engine
///
/// Same shape as the infrared engine plus a transceiver tuner and the
/// channel/scan controller.
pub struct SubGhzEngine<'s, C, P, G, T>
where
    C: Clock + Delay,
    P: TxPin,
    G: EdgeIrq,
    T: Tuner,
{
    clock: C,
    pin: P,
    gate: G,
    tuner: T,
    sampler: &'s EdgeSampler<u8, SUBGHZ_RAW_CAPACITY>,
    session: CaptureSession,
    channel: ChannelState,
    history: History<SubGhzSignal, HISTORY_CAPACITY>,
    ready: bool,
    transmitting: bool,
}

impl<'s, C, P, G, T> SubGhzEngine<'s, C, P, G, T>
where
    C: Clock + Delay,
    P: TxPin,
    G: EdgeIrq,
    T: Tuner,
{
    /// Wire up an engine; call [`SubGhzEngine::init`] before use
    pub fn new(
        clock: C,
        pin: P,
        gate: G,
        tuner: T,
        sampler: &'s EdgeSampler<u8, SUBGHZ_RAW_CAPACITY>,
    ) -> Self {
        Self {
            clock,
            pin,
            gate,
            tuner,
            sampler,
            session: CaptureSession::new(SUBGHZ_QUIET_TIMEOUT_MS),
            channel: ChannelState::new(),
            history: History::new(),
            ready: false,
            transmitting: false,
        }
    }

    /// Bring the channel to a known state: key line off, edge source
    /// masked, transceiver tuned to the default 433.92 MHz channel
    pub fn init(&mut self) {
        self.pin.set_low();
        self.gate.disable();
        self.sampler.disarm();
        self.tuner.set_frequency(self.channel.current());
        self.ready = true;
    }

    /// Begin listening on the current channel
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

    /// Tune directly to `frequency`, cancelling any sweep
    ///
    /// # Errors
    ///
    /// [`EngineError::NotReady`] before `init`.
    pub fn set_frequency(&mut self, frequency: Frequency) -> Result<(), EngineError> {
        if !self.ready {
            return Err(EngineError::NotReady);
        }
        self.channel.set_frequency(frequency, &mut self.tuner);
        Ok(())
    }

    /// Current channel frequency
    #[must_use]
    pub const fn current_frequency(&self) -> Frequency {
        self.channel.current()
    }

    /// Begin a frequency sweep; capture may keep running alongside it
    ///
    /// # Errors
    ///
    /// [`EngineError::NotReady`] before `init`.
    pub fn start_scan(&mut self, low: Frequency, high: Frequency) -> Result<(), EngineError> {
        if !self.ready {
            return Err(EngineError::NotReady);
        }
        self.channel.start_scan(low, high, &mut self.tuner);
        Ok(())
    }

    /// Stop the sweep, holding the frequency it reached
    pub fn stop_scan(&mut self) {
        self.channel.stop_scan();
    }

    /// Check whether a sweep is running
    #[must_use]
    pub const fn is_scanning(&self) -> bool {
        self.channel.is_scanning()
    }

    /// Poll the channel, called at the engine tick rate
    ///
    /// Advances a running sweep by one step, then polls the capture
    /// session; a completed capture is decoded at the frequency the
    /// channel sits on now, recorded in history, and returned.
    pub fn tick(&mut self) -> Option<SubGhzSignal> {
        if !self.ready {
            return None;
        }
        self.channel.step(&mut self.tuner);
        let now_us = self.clock.now_us();
        let buf = self.session.tick(now_us, self.sampler, &mut self.gate)?;
        let signal = decode_subghz(&buf, self.channel.current(), self.clock.now_ms())?;
        self.history.push(signal.clone());
        Some(signal)
    }

    /// Transmit a signal, blocking until the frame completes
    ///
    /// Re-tunes to the signal's stored frequency first, then keys the
    /// frame out. A running sweep is not cancelled; it resumes from the
    /// transmit frequency on the next tick.
    ///
    /// # Errors
    ///
    /// [`TransmitError::NotReady`] before `init`, plus the encoder's own
    /// failures. The key pin is left low on every path.
    pub fn transmit(&mut self, signal: &SubGhzSignal) -> Result<(), TransmitError> {
        if !self.ready {
            return Err(TransmitError::NotReady);
        }
        self.channel.retune(signal.frequency, &mut self.tuner);
        self.transmitting = true;
        let result = transmit_subghz(&mut self.pin, &mut self.clock, signal);
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
    pub fn history_item(&self, index: usize) -> Option<SubGhzSignal> {
        self.history.get(index)
    }

    /// Forget all history entries
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
