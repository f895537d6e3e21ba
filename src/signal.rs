//! Decoded signal model
//!
//! Signal records produced by the decode dispatcher and consumed by the
//! transmitter, history ring, and persistence layer. The payload sum types
//! guarantee by construction that only the `Raw` variant carries an owned
//! sample buffer: keyed protocol records are fixed-size and payload-free.
//!
//! Cloning a signal deep-copies any raw buffer (the buffers are inline
//! fixed-capacity vectors), so a history or persistence copy never aliases
//! the capture buffer that produced it.

use core::fmt::Write;

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

use crate::config::{IR_CARRIER_HZ, IR_RAW_CAPACITY, SONY_CARRIER_HZ, SUBGHZ_RAW_CAPACITY};
use crate::types::Frequency;

/// Maximum generated signal name length
pub const MAX_NAME_LEN: usize = 32;

/// Generated signal name (also used as the filename stem when saving)
pub type SignalName = String<MAX_NAME_LEN>;

/// Persistence tag for raw infrared signals
pub const IR_RAW_TAG: u8 = 7;

/// Persistence tag for raw sub-GHz signals
pub const SUBGHZ_RAW_TAG: u8 = 5;

/// Keyed infrared protocol family
///
/// `Raw` is deliberately not a member; raw captures are represented by
/// [`IrPayload::Raw`] so that a keyed record can never carry a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrProtocol {
    /// NEC (extended, 16-bit address + 16-bit command)
    Nec,
    /// Sony SIRC
    Sony,
    /// Philips RC5
    Rc5,
    /// Philips RC6
    Rc6,
    /// Samsung
    Samsung,
    /// LG
    Lg,
}

impl IrProtocol {
    /// Integer tag used in persisted records (matches the on-disk table)
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Nec => 1,
            Self::Sony => 2,
            Self::Rc5 => 3,
            Self::Rc6 => 4,
            Self::Samsung => 5,
            Self::Lg => 6,
        }
    }

    /// Look up a protocol by persisted tag
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Nec),
            2 => Some(Self::Sony),
            3 => Some(Self::Rc5),
            4 => Some(Self::Rc6),
            5 => Some(Self::Samsung),
            6 => Some(Self::Lg),
            _ => None,
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Nec => "NEC",
            Self::Sony => "Sony",
            Self::Rc5 => "RC5",
            Self::Rc6 => "RC6",
            Self::Samsung => "Samsung",
            Self::Lg => "LG",
        }
    }

    /// Carrier frequency this family is transmitted at
    #[must_use]
    pub const fn carrier_hz(self) -> u32 {
        match self {
            Self::Sony => SONY_CARRIER_HZ,
            _ => IR_CARRIER_HZ,
        }
    }
}

/// Infrared signal payload
#[derive(Clone, Debug, PartialEq)]
pub enum IrPayload {
    /// A recognized protocol frame
    Keyed {
        /// Protocol family
        protocol: IrProtocol,
        /// Decoded address field
        address: u32,
        /// Decoded command field
        command: u32,
    },
    /// Unrecognized capture kept as literal edge timing (microseconds)
    Raw {
        /// Owned copy of the captured interval sequence
        samples: Vec<u16, IR_RAW_CAPACITY>,
    },
}

impl IrPayload {
    /// Persistence tag (keyed families 1-6, raw 7)
    #[must_use]
    pub fn tag(&self) -> u8 {
        match self {
            Self::Keyed { protocol, .. } => protocol.tag(),
            Self::Raw { .. } => IR_RAW_TAG,
        }
    }

    /// Display label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Keyed { protocol, .. } => protocol.label(),
            Self::Raw { .. } => "RAW",
        }
    }
}

/// A decoded (or loaded) infrared signal
#[derive(Clone, Debug, PartialEq)]
pub struct IrSignal {
    /// Protocol payload; only `Raw` owns sample data
    pub payload: IrPayload,
    /// Generated name, unique across rapid captures
    pub name: SignalName,
    /// Carrier frequency for replay
    pub carrier: Frequency,
    /// Capture timestamp (milliseconds since boot)
    pub captured_at_ms: u32,
}

impl IrSignal {
    /// Build a keyed signal from decoder output
    #[must_use]
    pub fn keyed(protocol: IrProtocol, address: u32, command: u32, now_ms: u32) -> Self {
        let mut name = SignalName::new();
        let _ = write!(name, "{}_0x{:x}", protocol.label(), command);
        Self {
            payload: IrPayload::Keyed {
                protocol,
                address,
                command,
            },
            name,
            // Carrier is implied by the protocol family
            carrier: Frequency::from_hz(protocol.carrier_hz()).unwrap_or(Frequency::MIN),
            captured_at_ms: now_ms,
        }
    }

    /// Build a raw-fallback signal owning a copy of the capture buffer
    #[must_use]
    pub fn raw(samples: Vec<u16, IR_RAW_CAPACITY>, now_ms: u32) -> Self {
        let mut name = SignalName::new();
        let _ = write!(name, "RAW_{}", now_ms % 10_000);
        Self {
            payload: IrPayload::Raw { samples },
            name,
            carrier: Frequency::from_hz(IR_CARRIER_HZ).unwrap_or(Frequency::MIN),
            captured_at_ms: now_ms,
        }
    }

    /// Check whether this is a raw capture
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self.payload, IrPayload::Raw { .. })
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for IrSignal {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}({=str})", self.payload.label(), self.name.as_str());
    }
}

/// Keyed sub-GHz modulation scheme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubGhzProtocol {
    /// Amplitude-shift keying / on-off keying
    AskOok,
    /// Frequency-shift keying
    Fsk,
    /// Manchester coded
    Manchester,
    /// Pulse-width modulated
    Pwm,
}

impl SubGhzProtocol {
    /// Integer tag used in persisted records
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::AskOok => 1,
            Self::Fsk => 2,
            Self::Manchester => 3,
            Self::Pwm => 4,
        }
    }

    /// Look up a protocol by persisted tag
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::AskOok),
            2 => Some(Self::Fsk),
            3 => Some(Self::Manchester),
            4 => Some(Self::Pwm),
            _ => None,
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AskOok => "ASK/OOK",
            Self::Fsk => "FSK",
            Self::Manchester => "Manchester",
            Self::Pwm => "PWM",
        }
    }

    /// Filename-safe label (`/` cannot appear in a path component)
    #[must_use]
    pub const fn file_label(self) -> &'static str {
        match self {
            Self::AskOok => "ASK-OOK",
            _ => self.label(),
        }
    }
}

/// Sub-GHz signal payload
#[derive(Clone, Debug, PartialEq)]
pub enum SubGhzPayload {
    /// A demodulated bit sequence
    Keyed {
        /// Modulation scheme
        protocol: SubGhzProtocol,
        /// Decoded bits, most recent in the least significant position
        data: u32,
    },
    /// Unrecognized capture kept as quantized edge timing (10 µs units)
    Raw {
        /// Owned copy of the captured interval sequence
        samples: Vec<u8, SUBGHZ_RAW_CAPACITY>,
    },
}

impl SubGhzPayload {
    /// Persistence tag (keyed schemes 1-4, raw 5)
    #[must_use]
    pub fn tag(&self) -> u8 {
        match self {
            Self::Keyed { protocol, .. } => protocol.tag(),
            Self::Raw { .. } => SUBGHZ_RAW_TAG,
        }
    }

    /// Display label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Keyed { protocol, .. } => protocol.label(),
            Self::Raw { .. } => "RAW",
        }
    }
}

/// A decoded (or loaded) sub-GHz signal
#[derive(Clone, Debug, PartialEq)]
pub struct SubGhzSignal {
    /// Modulation payload; only `Raw` owns sample data
    pub payload: SubGhzPayload,
    /// Generated name, unique across rapid captures
    pub name: SignalName,
    /// Channel frequency the signal was captured on / replays at
    pub frequency: Frequency,
    /// Bit rate in bits per second
    pub bitrate: u32,
    /// Modulation index reported by the decoder
    pub modulation: u8,
    /// Capture timestamp (milliseconds since boot)
    pub captured_at_ms: u32,
}

impl SubGhzSignal {
    /// Build a keyed signal from decoder output
    #[must_use]
    pub fn keyed(
        protocol: SubGhzProtocol,
        data: u32,
        bitrate: u32,
        modulation: u8,
        frequency: Frequency,
        now_ms: u32,
    ) -> Self {
        Self {
            payload: SubGhzPayload::Keyed { protocol, data },
            name: subghz_name(protocol.file_label(), frequency, now_ms),
            frequency,
            bitrate,
            modulation,
            captured_at_ms: now_ms,
        }
    }

    /// Build a raw-fallback signal owning a copy of the capture buffer
    #[must_use]
    pub fn raw(
        samples: Vec<u8, SUBGHZ_RAW_CAPACITY>,
        bitrate: u32,
        frequency: Frequency,
        now_ms: u32,
    ) -> Self {
        Self {
            payload: SubGhzPayload::Raw { samples },
            name: subghz_name("RAW", frequency, now_ms),
            frequency,
            bitrate,
            modulation: 0,
            captured_at_ms: now_ms,
        }
    }

    /// Check whether this is a raw capture
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self.payload, SubGhzPayload::Raw { .. })
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SubGhzSignal {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{=str}({=str} @ {})",
            self.payload.label(),
            self.name.as_str(),
            self.frequency
        );
    }
}

/// Generate `<Label>_<MHz>_<rolling ms tag>`, e.g. `ASK-OOK_433.92MHz_1234`
fn subghz_name(label: &str, frequency: Frequency, now_ms: u32) -> SignalName {
    let mut name = SignalName::new();
    let _ = write!(
        name,
        "{}_{:.2}MHz_{}",
        label,
        frequency.as_mhz_f32(),
        now_ms % 10_000
    );
    name
}
