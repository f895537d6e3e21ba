//! Embassy and embedded-hal adapters for the capability traits

use embassy_time::{Duration, Instant};
use embedded_hal::digital::OutputPin;

use super::{Clock, Delay, TxPin};

/// Clock and delay backed by the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}

impl Delay for EmbassyClock {
    fn delay_us(&mut self, us: u32) {
        // Blocking on purpose: the bit-bang encoders need tight timing and
        // run with the scheduler held off for the frame duration.
        embassy_time::block_for(Duration::from_micros(u64::from(us)));
    }
}

impl TxPin for embassy_stm32::gpio::Output<'_> {
    fn set_high(&mut self) {
        Self::set_high(self);
    }

    fn set_low(&mut self) {
        Self::set_low(self);
    }
}

/// Adapter lifting any embedded-hal output pin into a [`TxPin`]
///
/// Drive errors are swallowed; a push-pull GPIO write cannot fail on this
/// family and the encoders have no error path mid-frame.
#[derive(Debug)]
pub struct HalPin<P: OutputPin>(
    /// The wrapped output pin
    pub P,
);

impl<P: OutputPin> TxPin for HalPin<P> {
    fn set_high(&mut self) {
        let _ = self.0.set_high();
    }

    fn set_low(&mut self) {
        let _ = self.0.set_low();
    }
}
