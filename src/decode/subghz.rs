//! Sub-GHz demodulation decoders
//!
//! Buffers are quantized interval sequences (10 µs units, saturated to
//! 255). ASK/OOK and Manchester are implemented; FSK and PWM hold their
//! dispatch slots as deterministic non-matches.

use heapless::Vec;

use crate::config::{DEFAULT_BITRATE_BPS, MANCHESTER_BITRATE_BPS, SUBGHZ_RAW_CAPACITY};
use crate::signal::{SubGhzProtocol, SubGhzSignal};
use crate::types::Frequency;

/// Output of a successful keyed sub-GHz decode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubGhzDecode {
    /// Matched modulation scheme
    pub protocol: SubGhzProtocol,
    /// Decoded bits, MSB received first
    pub data: u32,
    /// Detected bit rate (bits per second)
    pub bitrate: u32,
    /// Modulation index persisted with the signal
    pub modulation: u8,
}

/// Decoder contract shared by every sub-GHz scheme
pub type SubGhzDecodeFn = fn(&[u8]) -> Option<SubGhzDecode>;

/// Dispatch order for sub-GHz decoding
pub const SUBGHZ_DECODERS: [SubGhzDecodeFn; 4] =
    [decode_ask, decode_fsk, decode_manchester, decode_pwm];

/// Run the decoder chain over a finished capture
///
/// Falls back to a raw signal carrying a copy of the buffer when no
/// scheme matches. Returns `None` only if the buffer exceeds the raw
/// capacity, which a correctly sized sampler cannot produce.
#[must_use]
pub fn decode_subghz(samples: &[u8], frequency: Frequency, now_ms: u32) -> Option<SubGhzSignal> {
    for decoder in SUBGHZ_DECODERS {
        if let Some(hit) = decoder(samples) {
            return Some(SubGhzSignal::keyed(
                hit.protocol,
                hit.data,
                hit.bitrate,
                hit.modulation,
                frequency,
                now_ms,
            ));
        }
    }
    let raw = Vec::<u8, SUBGHZ_RAW_CAPACITY>::from_slice(samples).ok()?;
    Some(SubGhzSignal::raw(raw, DEFAULT_BITRATE_BPS, frequency, now_ms))
}

/// ASK/OOK by interval width: long intervals (>500 µs) are ones, medium
/// (>100 µs) are zeros, anything shorter is glitch and skipped
fn decode_ask(samples: &[u8]) -> Option<SubGhzDecode> {
    if samples.len() < 32 {
        return None;
    }
    let mut data = 0u32;
    let mut bits = 0u8;
    for &unit in samples {
        if bits >= 32 {
            break;
        }
        if unit > 50 {
            data = (data << 1) | 1;
            bits += 1;
        } else if unit > 10 {
            data <<= 1;
            bits += 1;
        }
    }
    if bits < 8 {
        return None;
    }
    Some(SubGhzDecode {
        protocol: SubGhzProtocol::AskOok,
        data,
        bitrate: DEFAULT_BITRATE_BPS,
        modulation: 0,
    })
}

/// Manchester by interval pairs: a short-then-long pair is 0, a
/// long-then-short pair is 1, equal widths carry no bit
fn decode_manchester(samples: &[u8]) -> Option<SubGhzDecode> {
    if samples.len() < 16 {
        return None;
    }
    let mut data = 0u32;
    let mut bits = 0u8;
    let mut i = 0;
    while i + 1 < samples.len() && bits < 32 {
        let first = samples[i];
        let second = samples[i + 1];
        if first < second {
            data <<= 1;
            bits += 1;
        } else if first > second {
            data = (data << 1) | 1;
            bits += 1;
        }
        i += 2;
    }
    if bits < 8 {
        return None;
    }
    Some(SubGhzDecode {
        protocol: SubGhzProtocol::Manchester,
        data,
        bitrate: MANCHESTER_BITRATE_BPS,
        modulation: 1,
    })
}

// Frequency discrimination needs more front-end than an edge sampler
// provides; these slots stay deterministic non-matches.

fn decode_fsk(_samples: &[u8]) -> Option<SubGhzDecode> {
    None
}

fn decode_pwm(_samples: &[u8]) -> Option<SubGhzDecode> {
    None
}
