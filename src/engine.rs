//! Channel engines
//!
//! One context object per physical channel wiring a sampler, session
//! controller, decode dispatcher, history ring, and transmitter behind a
//! single surface. Engines own their hardware capabilities and must be
//! initialized before any operation takes effect; everything else fails
//! fast without mutating state.

pub mod ir;
pub mod subghz;

pub use ir::IrEngine;
pub use subghz::SubGhzEngine;

use crate::capture::CaptureError;

/// Engine operation failures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// `init` has not been called
    NotReady,
    /// A capture session is already running
    AlreadyActive,
}

impl From<CaptureError> for EngineError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::AlreadyActive => Self::AlreadyActive,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for EngineError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::NotReady => defmt::write!(f, "engine not initialized"),
            Self::AlreadyActive => defmt::write!(f, "capture already active"),
        }
    }
}
