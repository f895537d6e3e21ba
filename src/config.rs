//! System configuration and hardware constants
//!
//! Compile-time constants for the signal tool hardware: capture buffer
//! capacities, session timing, carrier defaults, storage layout, and pin
//! assignments are all centralized here.

/// Capture buffer capacity for the infrared channel (edge intervals)
pub const IR_RAW_CAPACITY: usize = 300;

/// Capture buffer capacity for the sub-GHz channel (quantized intervals)
pub const SUBGHZ_RAW_CAPACITY: usize = 1000;

/// Sub-GHz interval quantization unit in microseconds
///
/// Raw sub-GHz samples are stored as `duration_us / SUBGHZ_QUANT_US`,
/// saturated to fit a `u8`.
pub const SUBGHZ_QUANT_US: u32 = 10;

/// Decoded-signal history depth per channel
pub const HISTORY_CAPACITY: usize = 50;

/// Inactivity timeout ending an infrared capture session (milliseconds)
pub const IR_QUIET_TIMEOUT_MS: u32 = 100;

/// Inactivity timeout ending a sub-GHz capture session (milliseconds)
pub const SUBGHZ_QUIET_TIMEOUT_MS: u32 = 200;

/// Minimum number of captured intervals worth handing to the decoders
pub const MIN_DECODE_SAMPLES: usize = 10;

/// Engine tick rate driven by the main loop (Hz)
pub const ENGINE_TICK_HZ: u32 = 20;

/// Infrared carrier frequency for NEC-family transmission (Hz)
pub const IR_CARRIER_HZ: u32 = 38_000;

/// Infrared carrier frequency for Sony transmission (Hz)
pub const SONY_CARRIER_HZ: u32 = 40_000;

/// Frame width assumed when transmitting a Sony code
pub const SONY_DEFAULT_BITS: u8 = 12;

/// Default sub-GHz channel frequency (433.92 MHz ISM)
pub const DEFAULT_SUBGHZ_HZ: u32 = 433_920_000;

/// Default lower bound of a frequency sweep (Hz)
pub const SCAN_LOW_HZ: u32 = 300_000_000;

/// Default upper bound of a frequency sweep (Hz)
pub const SCAN_HIGH_HZ: u32 = 928_000_000;

/// Frequency sweep step size (Hz)
pub const SCAN_STEP_HZ: u32 = 100_000;

/// Default sub-GHz bit rate (bits per second)
pub const DEFAULT_BITRATE_BPS: u32 = 4_800;

/// Bit rate assigned to Manchester-decoded signals (bits per second)
pub const MANCHESTER_BITRATE_BPS: u32 = 2_400;

/// Storage directory for infrared signals
pub const IR_DIR: &str = "/ir";

/// File extension for infrared signals
pub const IR_EXT: &str = ".ir";

/// Storage directory for sub-GHz signals
pub const SUBGHZ_DIR: &str = "/rf";

/// File extension for sub-GHz signals
pub const SUBGHZ_EXT: &str = ".rf";

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Status LED (directly on MCU)
    pub const LED_STATUS: &str = "PA5";

    /// Infrared demodulator input (EXTI edge source)
    pub const IR_RX: &str = "PA0";

    /// Infrared LED drive output
    pub const IR_TX: &str = "PA1";

    /// Sub-GHz receiver data input (EXTI edge source, line 4)
    pub const SUBGHZ_RX: &str = "PB4";

    /// Sub-GHz transmitter key output
    pub const SUBGHZ_TX: &str = "PB1";
}
