//! Infrared protocol decoders
//!
//! Buffers are interval sequences in microseconds, alternating mark/space
//! starting with the first mark. NEC is fully implemented; the other
//! families hold their dispatch slots as deterministic non-matches until
//! their timing analyzers are written.

use heapless::Vec;

use crate::config::IR_RAW_CAPACITY;
use crate::signal::{IrProtocol, IrSignal};

/// Output of a successful keyed infrared decode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IrDecode {
    /// Matched protocol family
    pub protocol: IrProtocol,
    /// Address field
    pub address: u32,
    /// Command field
    pub command: u32,
}

/// Decoder contract shared by every infrared protocol
pub type IrDecodeFn = fn(&[u16]) -> Option<IrDecode>;

/// Dispatch order for infrared decoding
pub const IR_DECODERS: [IrDecodeFn; 6] = [
    decode_nec,
    decode_sony,
    decode_rc5,
    decode_rc6,
    decode_samsung,
    decode_lg,
];

/// Run the decoder chain over a finished capture
///
/// Falls back to a raw signal carrying a copy of the buffer when no
/// protocol matches. Returns `None` only if the buffer exceeds the raw
/// capacity, which a correctly sized sampler cannot produce.
#[must_use]
pub fn decode_ir(samples: &[u16], now_ms: u32) -> Option<IrSignal> {
    for decoder in IR_DECODERS {
        if let Some(hit) = decoder(samples) {
            return Some(IrSignal::keyed(hit.protocol, hit.address, hit.command, now_ms));
        }
    }
    let raw = Vec::<u16, IR_RAW_CAPACITY>::from_slice(samples).ok()?;
    Some(IrSignal::raw(raw, now_ms))
}

/// NEC extended frames: 9 ms lead mark, 4.5 ms lead space, 16 address +
/// 16 command bits LSB-first, distinguished by space width
fn decode_nec(samples: &[u16]) -> Option<IrDecode> {
    // Lead pair + 32 bit pairs + final mark, plus the trailing gap
    if samples.len() < 68 {
        return None;
    }
    if !(8_000..=10_000).contains(&samples[0]) || !(4_000..=5_000).contains(&samples[1]) {
        return None;
    }

    let address = read_nec_bits(samples, 2)?;
    let command = read_nec_bits(samples, 34)?;
    Some(IrDecode {
        protocol: IrProtocol::Nec,
        address,
        command,
    })
}

/// Read 16 NEC bits starting at `base`: each bit is a 400-700 µs mark
/// followed by a space, long (>1.2 ms) for 1, short for 0
fn read_nec_bits(samples: &[u16], base: usize) -> Option<u32> {
    let mut value = 0u32;
    for bit in 0..16 {
        let mark = samples[base + 2 * bit];
        let space = samples[base + 2 * bit + 1];
        if !(400..=700).contains(&mark) {
            return None;
        }
        if space > 1_200 {
            value |= 1 << bit;
        }
    }
    Some(value)
}

// Timing analyzers for these families are not written yet; each slot is a
// deterministic non-match so dispatch order stays stable when they land.

fn decode_sony(_samples: &[u16]) -> Option<IrDecode> {
    None
}

fn decode_rc5(_samples: &[u16]) -> Option<IrDecode> {
    None
}

fn decode_rc6(_samples: &[u16]) -> Option<IrDecode> {
    None
}

fn decode_samsung(_samples: &[u16]) -> Option<IrDecode> {
    None
}

fn decode_lg(_samples: &[u16]) -> Option<IrDecode> {
    None
}
