//! Sub-GHz encoders
//!
//! The key pin gates an external transceiver that supplies the carrier,
//! so "high" here means carrier on. The transceiver must be tuned before
//! any of these run.

use crate::capture::Sample;
use crate::config::DEFAULT_BITRATE_BPS;
use crate::hal::{Delay, TxPin};
use crate::types::Frequency;

/// Preamble cycles before an ASK frame, for receiver AGC settling
const ASK_PREAMBLE_CYCLES: u32 = 32;

/// FSK deviation from the channel center (Hz)
const FSK_DEVIATION_HZ: u32 = 10_000;

fn bit_period_us(bitrate: u32) -> u32 {
    let bitrate = if bitrate == 0 {
        DEFAULT_BITRATE_BPS
    } else {
        bitrate
    };
    (1_000_000 / bitrate).max(1)
}

/// Send 32 bits ASK/OOK, MSB-first
///
/// Ones are keyed high for three quarters of the bit period, zeros for
/// one quarter, after a square preamble.
pub fn send_ask(pin: &mut impl TxPin, delay: &mut impl Delay, data: u32, bitrate: u32) {
    let period = bit_period_us(bitrate);
    let half = (period / 2).max(1);
    let quarter = (period / 4).max(1);

    for _ in 0..ASK_PREAMBLE_CYCLES {
        pin.set_high();
        delay.delay_us(half);
        pin.set_low();
        delay.delay_us(half);
    }

    for bit in (0..32).rev() {
        if (data >> bit) & 1 == 1 {
            pin.set_high();
            delay.delay_us(3 * quarter);
            pin.set_low();
            delay.delay_us(quarter);
        } else {
            pin.set_high();
            delay.delay_us(quarter);
            pin.set_low();
            delay.delay_us(3 * quarter);
        }
    }
    pin.set_low();
}

/// Send 32 bits of two-tone FSK, MSB-first
///
/// Approximate by construction: each bit is a square wave on the key pin
/// at carrier ± 10 kHz for one bit period. At sub-GHz center frequencies
/// both tones clamp to the 1 µs minimum half-period, so this is only
/// meaningful with a transceiver that accepts a baseband tone input.
pub fn send_fsk(
    pin: &mut impl TxPin,
    delay: &mut impl Delay,
    data: u32,
    center: Frequency,
    bitrate: u32,
) {
    let period = bit_period_us(bitrate);
    let mark = Frequency::from_hz(center.as_hz().saturating_add(FSK_DEVIATION_HZ))
        .unwrap_or(Frequency::MIN);
    let space = Frequency::from_hz(center.as_hz().saturating_sub(FSK_DEVIATION_HZ))
        .unwrap_or(Frequency::MIN);

    for bit in (0..32).rev() {
        let half = if (data >> bit) & 1 == 1 {
            mark.half_period_us()
        } else {
            space.half_period_us()
        };
        let mut elapsed = 0;
        while elapsed < period {
            pin.set_high();
            delay.delay_us(half);
            pin.set_low();
            delay.delay_us(half);
            elapsed += 2 * half;
        }
    }
    pin.set_low();
}

/// Replay a raw quantized capture
///
/// Each sample dequantizes back to microseconds; even indices key the
/// carrier on, odd indices off, mirroring how the capture alternates.
pub fn send_raw(pin: &mut impl TxPin, delay: &mut impl Delay, samples: &[u8]) {
    for (i, &unit) in samples.iter().enumerate() {
        if i % 2 == 0 {
            pin.set_high();
        } else {
            pin.set_low();
        }
        delay.delay_us(unit.as_micros());
    }
    pin.set_low();
}
