//! Signal Acquisition and Protocol Codec Engine
//!
//! Core firmware library for a handheld infrared + sub-GHz capture and
//! replay tool. Each physical channel (IR demodulator, sub-GHz
//! transceiver) gets an engine that records edge timing from an
//! interrupt, detects end-of-signal by line quiet, runs an ordered chain
//! of protocol decoders with a raw fallback, keeps a bounded history of
//! decoded signals, and replays them by blocking bit-bang transmission.
//!
//! # Architecture
//!
//! The library is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ENGINE LAYER                              │
//! │  IrEngine  │  SubGhzEngine  │  SignalLibrary (persistence)   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    CODEC LAYER                               │
//! │  Decode dispatch  │  Protocol encoders  │  Channel control   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    CAPTURE LAYER                             │
//! │  EdgeSampler (ISR-fed)  │  CaptureSession  │  History        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                 CAPABILITY / HAL LAYER                       │
//! │  Clock  │  Delay  │  TxPin  │  EdgeIrq  │  Tuner             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Type-driven design**: Custom types enforce invariants at compile time
//! - **Capability seams**: Engines are generic over small hardware traits,
//!   so the whole codec stack runs unchanged under host tests
//! - **Single critical region**: Interrupt-shared capture state changes
//!   atomically; the edge source is masked before any consumption
//! - **Explicit error handling**: All fallible operations return `Result`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware capability traits and adapters
pub mod hal;

/// Edge sampling and capture sessions
pub mod capture;

/// Sub-GHz frequency and scan control
pub mod channel;

/// Protocol decode dispatch
pub mod decode;

/// Per-channel engines tying capture, codec, and history together
pub mod engine;

/// Bounded decoded-signal history
pub mod history;

/// Decoded signal model
pub mod signal;

/// Signal persistence records and library
pub mod storage;

/// Protocol encoders and transmitters
pub mod transmit;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::engine::{IrEngine, SubGhzEngine};
    pub use crate::hal::{AtomicEdgeGate, Clock, Delay, EdgeIrq, Tuner, TxPin};

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
