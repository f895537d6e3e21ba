//! Protocol encoders and transmitters
//!
//! Blocking bit-bang transmission over the [`TxPin`](crate::hal::TxPin)
//! and [`Delay`](crate::hal::Delay) capabilities. Infrared encoders
//! synthesize the carrier themselves by half-period pin toggling; sub-GHz
//! encoders key an external transceiver that supplies the carrier. Every
//! path, success or error, leaves the pin idle-low.
//!
//! Transmission is CPU-owning: a frame runs to completion and cannot be
//! cancelled mid-air.

pub mod ir;
pub mod subghz;

use crate::config::SONY_DEFAULT_BITS;
use crate::hal::{Delay, TxPin};
use crate::signal::{IrPayload, IrProtocol, IrSignal, SubGhzPayload, SubGhzProtocol, SubGhzSignal};

/// Transmission failures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransmitError {
    /// Engine has not been initialized
    NotReady,
    /// Raw payload holds no intervals
    EmptyPayload,
    /// No transmit routine exists for this protocol
    Unsupported,
}

#[cfg(feature = "embedded")]
impl defmt::Format for TransmitError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::NotReady => defmt::write!(f, "not ready"),
            Self::EmptyPayload => defmt::write!(f, "empty payload"),
            Self::Unsupported => defmt::write!(f, "unsupported protocol"),
        }
    }
}

/// Transmit an infrared signal
///
/// # Errors
///
/// [`TransmitError::EmptyPayload`] for a raw signal with no intervals,
/// [`TransmitError::Unsupported`] for keyed families without an encoder.
pub fn transmit_ir(
    pin: &mut impl TxPin,
    delay: &mut impl Delay,
    signal: &IrSignal,
) -> Result<(), TransmitError> {
    match &signal.payload {
        IrPayload::Keyed {
            protocol: IrProtocol::Nec,
            address,
            command,
        } => {
            ir::send_nec(pin, delay, *address as u16, *command as u16);
            Ok(())
        }
        IrPayload::Keyed {
            protocol: IrProtocol::Sony,
            command,
            ..
        } => {
            ir::send_sony(pin, delay, *command, SONY_DEFAULT_BITS);
            Ok(())
        }
        IrPayload::Keyed { .. } => Err(TransmitError::Unsupported),
        IrPayload::Raw { samples } => {
            if samples.is_empty() {
                return Err(TransmitError::EmptyPayload);
            }
            ir::send_raw(pin, delay, samples, signal.carrier);
            Ok(())
        }
    }
}

/// Transmit a sub-GHz signal (the transceiver is assumed tuned already)
///
/// # Errors
///
/// [`TransmitError::EmptyPayload`] for a raw signal with no intervals,
/// [`TransmitError::Unsupported`] for keyed schemes without an encoder.
pub fn transmit_subghz(
    pin: &mut impl TxPin,
    delay: &mut impl Delay,
    signal: &SubGhzSignal,
) -> Result<(), TransmitError> {
    match &signal.payload {
        SubGhzPayload::Keyed {
            protocol: SubGhzProtocol::AskOok,
            data,
        } => {
            subghz::send_ask(pin, delay, *data, signal.bitrate);
            Ok(())
        }
        SubGhzPayload::Keyed {
            protocol: SubGhzProtocol::Fsk,
            data,
        } => {
            subghz::send_fsk(pin, delay, *data, signal.frequency, signal.bitrate);
            Ok(())
        }
        SubGhzPayload::Keyed { .. } => Err(TransmitError::Unsupported),
        SubGhzPayload::Raw { samples } => {
            if samples.is_empty() {
                return Err(TransmitError::EmptyPayload);
            }
            subghz::send_raw(pin, delay, samples);
            Ok(())
        }
    }
}
