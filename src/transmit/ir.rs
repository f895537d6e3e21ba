//! Infrared encoders
//!
//! Marks are carrier bursts synthesized by toggling the LED pin at the
//! protocol carrier's half-period; spaces are plain delays with the pin
//! low. Timing tables follow the consumer-IR conventions each family
//! publishes.

use crate::config::{IR_CARRIER_HZ, SONY_CARRIER_HZ};
use crate::hal::{Delay, TxPin};
use crate::types::Frequency;

const NEC_LEAD_MARK_US: u32 = 9_000;
const NEC_LEAD_SPACE_US: u32 = 4_500;
const NEC_BIT_MARK_US: u32 = 560;
const NEC_ZERO_SPACE_US: u32 = 560;
const NEC_ONE_SPACE_US: u32 = 1_690;

const SONY_START_MARK_US: u32 = 2_400;
const SONY_SPACE_US: u32 = 600;
const SONY_ONE_MARK_US: u32 = 1_200;
const SONY_ZERO_MARK_US: u32 = 600;

/// Emit a carrier burst of `duration_us` by half-period toggling
///
/// Ends with the pin low regardless of where the last half-cycle fell.
pub fn carrier_mark(
    pin: &mut impl TxPin,
    delay: &mut impl Delay,
    duration_us: u32,
    carrier: Frequency,
) {
    let half_us = carrier.half_period_us();
    let mut elapsed = 0;
    while elapsed < duration_us {
        pin.set_high();
        delay.delay_us(half_us);
        pin.set_low();
        delay.delay_us(half_us);
        elapsed += 2 * half_us;
    }
    pin.set_low();
}

/// Send a NEC extended frame: lead pair, 16 address + 16 command bits
/// LSB-first, trailing mark
pub fn send_nec(pin: &mut impl TxPin, delay: &mut impl Delay, address: u16, command: u16) {
    let carrier = Frequency::from_hz(IR_CARRIER_HZ).unwrap_or(Frequency::MIN);

    carrier_mark(pin, delay, NEC_LEAD_MARK_US, carrier);
    delay.delay_us(NEC_LEAD_SPACE_US);

    for word in [address, command] {
        for bit in 0..16 {
            carrier_mark(pin, delay, NEC_BIT_MARK_US, carrier);
            if (word >> bit) & 1 == 1 {
                delay.delay_us(NEC_ONE_SPACE_US);
            } else {
                delay.delay_us(NEC_ZERO_SPACE_US);
            }
        }
    }

    carrier_mark(pin, delay, NEC_BIT_MARK_US, carrier);
    pin.set_low();
}

/// Send a Sony SIRC frame of `bits` data bits LSB-first at 40 kHz
pub fn send_sony(pin: &mut impl TxPin, delay: &mut impl Delay, data: u32, bits: u8) {
    let carrier = Frequency::from_hz(SONY_CARRIER_HZ).unwrap_or(Frequency::MIN);

    carrier_mark(pin, delay, SONY_START_MARK_US, carrier);
    delay.delay_us(SONY_SPACE_US);

    for bit in 0..bits {
        let mark = if (data >> bit) & 1 == 1 {
            SONY_ONE_MARK_US
        } else {
            SONY_ZERO_MARK_US
        };
        carrier_mark(pin, delay, mark, carrier);
        delay.delay_us(SONY_SPACE_US);
    }
    pin.set_low();
}

/// Replay a raw interval capture verbatim
///
/// Even indices are carrier-modulated marks, odd indices are spaces, the
/// same convention the sampler records (first interval is a mark).
pub fn send_raw(pin: &mut impl TxPin, delay: &mut impl Delay, samples: &[u16], carrier: Frequency) {
    for (i, &interval) in samples.iter().enumerate() {
        if i % 2 == 0 {
            carrier_mark(pin, delay, u32::from(interval), carrier);
        } else {
            delay.delay_us(u32::from(interval));
        }
    }
    pin.set_low();
}
