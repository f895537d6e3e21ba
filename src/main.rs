//! Signal Tool Main Application
//!
//! Entry point for the STM32G474-based capture/replay firmware.
//! Initializes hardware and spawns the per-channel engine tasks.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_time::Instant;
use {defmt_rtt as _, panic_probe as _};

use sigtool_firmware::capture::EdgeSampler;
use sigtool_firmware::hal::embassy::EmbassyClock;
use sigtool_firmware::hal::SoftTuner;
use sigtool_firmware::prelude::*;

// Edge samplers and their gates are shared between the EXTI tasks and the
// engine tasks, so they live in statics.
static IR_SAMPLER: EdgeSampler<u16, IR_RAW_CAPACITY> = EdgeSampler::new();
static IR_GATE: AtomicEdgeGate = AtomicEdgeGate::new();
static SUBGHZ_SAMPLER: EdgeSampler<u8, SUBGHZ_RAW_CAPACITY> = EdgeSampler::new();
static SUBGHZ_GATE: AtomicEdgeGate = AtomicEdgeGate::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Signal tool firmware v{}", env!("CARGO_PKG_VERSION"));

    // Initialize STM32G474 peripherals with default clock configuration
    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // Status LED on PA5 (Nucleo convention)
    let led = Output::new(p.PA5, Level::Low, Speed::Low);

    // IR demodulator in on PA0, IR LED drive on PA1
    let ir_rx = ExtiInput::new(p.PA0, p.EXTI0, Pull::Up);
    let ir_tx = Output::new(p.PA1, Level::Low, Speed::High);

    // Sub-GHz receiver data on PB4 (its own EXTI line), key out on PB1
    let subghz_rx = ExtiInput::new(p.PB4, p.EXTI4, Pull::None);
    let subghz_tx = Output::new(p.PB1, Level::Low, Speed::High);

    spawner.spawn(heartbeat_task(led)).unwrap();
    spawner.spawn(ir_edge_task(ir_rx)).unwrap();
    spawner.spawn(ir_engine_task(ir_tx)).unwrap();
    spawner.spawn(subghz_edge_task(subghz_rx)).unwrap();
    spawner.spawn(subghz_engine_task(subghz_tx)).unwrap();

    info!("Tasks spawned, entering main loop");

    loop {
        Timer::after(Duration::from_secs(10)).await;
        info!("Main loop tick");
    }
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}

/// Forward IR demodulator edges to the shared sampler while its gate is open
#[embassy_executor::task]
async fn ir_edge_task(mut rx: ExtiInput<'static>) {
    loop {
        rx.wait_for_any_edge().await;
        if IR_GATE.is_enabled() {
            IR_SAMPLER.on_edge(Instant::now().as_micros());
        }
    }
}

/// Drive the IR engine at the tick rate, re-arming whenever the channel
/// goes idle
#[embassy_executor::task]
async fn ir_engine_task(tx: Output<'static>) {
    let mut engine = IrEngine::new(EmbassyClock, tx, &IR_GATE, &IR_SAMPLER);
    engine.init();

    let tick = Duration::from_millis(u64::from(1_000 / ENGINE_TICK_HZ));
    loop {
        Timer::after(tick).await;
        if let Some(signal) = engine.tick() {
            info!("ir decoded: {}", signal);
        }
        // Sessions also end on silent timeouts and discarded noise blips,
        // so re-arm on idle rather than only after a decode.
        if !engine.is_capturing() && !engine.is_transmitting() {
            if let Err(err) = engine.start_capture() {
                error!("ir capture restart failed: {}", err);
            }
        }
    }
}

/// Forward receiver data edges to the shared sampler while its gate is open
#[embassy_executor::task]
async fn subghz_edge_task(mut rx: ExtiInput<'static>) {
    loop {
        rx.wait_for_any_edge().await;
        if SUBGHZ_GATE.is_enabled() {
            SUBGHZ_SAMPLER.on_edge(Instant::now().as_micros());
        }
    }
}

/// Drive the sub-GHz engine at the tick rate, re-arming whenever the
/// channel goes idle
#[embassy_executor::task]
async fn subghz_engine_task(tx: Output<'static>) {
    // TODO: swap SoftTuner for the transceiver SPI driver once the RF
    // daughterboard is bring-up complete.
    let tuner = SoftTuner::new();
    let mut engine = SubGhzEngine::new(EmbassyClock, tx, &SUBGHZ_GATE, tuner, &SUBGHZ_SAMPLER);
    engine.init();

    let tick = Duration::from_millis(u64::from(1_000 / ENGINE_TICK_HZ));
    loop {
        Timer::after(tick).await;
        if let Some(signal) = engine.tick() {
            info!("subghz decoded: {}", signal);
        }
        // Sessions also end on silent timeouts and discarded noise blips,
        // so re-arm on idle rather than only after a decode.
        if !engine.is_capturing() && !engine.is_transmitting() {
            if let Err(err) = engine.start_capture() {
                error!("subghz capture restart failed: {}", err);
            }
        }
    }
}
