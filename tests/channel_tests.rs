//! Tests for the sub-GHz channel and scan controller

use sigtool_firmware::channel::ChannelState;
use sigtool_firmware::hal::SoftTuner;
use sigtool_firmware::types::Frequency;

fn mhz(mhz: u32) -> Frequency {
    Frequency::from_hz(mhz * 1_000_000).unwrap()
}

// ============================================================================
// Tuning Tests
// ============================================================================

#[test]
fn default_channel_is_433_92_mhz() {
    let channel = ChannelState::new();
    assert_eq!(channel.current().as_hz(), 433_920_000);
    assert!(!channel.is_scanning());
}

#[test]
fn set_frequency_retunes_immediately() {
    let mut channel = ChannelState::new();
    let mut tuner = SoftTuner::new();

    channel.set_frequency(mhz(868), &mut tuner);
    assert_eq!(channel.current(), mhz(868));
    assert_eq!(tuner.tuned(), Some(mhz(868)));
}

#[test]
fn set_frequency_cancels_a_running_scan() {
    let mut channel = ChannelState::new();
    let mut tuner = SoftTuner::new();

    channel.start_scan(mhz(300), mhz(928), &mut tuner);
    assert!(channel.is_scanning());

    channel.set_frequency(mhz(433), &mut tuner);
    assert!(!channel.is_scanning());
    assert_eq!(channel.current(), mhz(433));
}

// ============================================================================
// Scan Tests
// ============================================================================

#[test]
fn start_scan_tunes_to_lower_bound() {
    let mut channel = ChannelState::new();
    let mut tuner = SoftTuner::new();

    channel.start_scan(mhz(300), mhz(928), &mut tuner);
    assert_eq!(channel.current(), mhz(300));
    assert_eq!(tuner.tuned(), Some(mhz(300)));
}

#[test]
fn scan_bounds_are_normalized() {
    let mut channel = ChannelState::new();
    let mut tuner = SoftTuner::new();

    channel.start_scan(mhz(928), mhz(300), &mut tuner);
    assert_eq!(channel.current(), mhz(300));
}

#[test]
fn step_advances_by_100_khz() {
    let mut channel = ChannelState::new();
    let mut tuner = SoftTuner::new();

    channel.start_scan(mhz(300), mhz(928), &mut tuner);
    channel.step(&mut tuner);
    assert_eq!(channel.current().as_hz(), 300_100_000);
    channel.step(&mut tuner);
    assert_eq!(channel.current().as_hz(), 300_200_000);
    assert_eq!(tuner.tuned(), Some(channel.current()));
}

#[test]
fn step_without_scan_is_a_no_op() {
    let mut channel = ChannelState::new();
    let mut tuner = SoftTuner::new();

    channel.step(&mut tuner);
    assert_eq!(channel.current().as_hz(), 433_920_000);
    assert_eq!(tuner.tuned(), None);
}

#[test]
fn stop_scan_holds_the_reached_frequency() {
    let mut channel = ChannelState::new();
    let mut tuner = SoftTuner::new();

    channel.start_scan(mhz(300), mhz(928), &mut tuner);
    for _ in 0..5 {
        channel.step(&mut tuner);
    }
    channel.stop_scan();

    assert!(!channel.is_scanning());
    assert_eq!(channel.current().as_hz(), 300_500_000);

    channel.step(&mut tuner);
    assert_eq!(channel.current().as_hz(), 300_500_000);
}

#[test]
fn retune_preserves_a_running_scan() {
    let mut channel = ChannelState::new();
    let mut tuner = SoftTuner::new();

    channel.start_scan(mhz(300), mhz(928), &mut tuner);
    channel.step(&mut tuner);

    channel.retune(mhz(868), &mut tuner);
    assert!(channel.is_scanning());
    assert_eq!(channel.current(), mhz(868));
    assert_eq!(tuner.tuned(), Some(mhz(868)));

    // The sweep continues from the retuned frequency
    channel.step(&mut tuner);
    assert_eq!(channel.current().as_hz(), 868_100_000);
}

#[test]
fn retune_past_the_upper_bound_wraps_on_next_step() {
    let mut channel = ChannelState::new();
    let mut tuner = SoftTuner::new();

    channel.start_scan(mhz(300), mhz(928), &mut tuner);
    channel.retune(mhz(930), &mut tuner);

    channel.step(&mut tuner);
    assert_eq!(channel.current(), mhz(300));
}

#[test]
fn scan_wraps_past_the_upper_bound() {
    let mut channel = ChannelState::new();
    let mut tuner = SoftTuner::new();

    channel.start_scan(mhz(300), mhz(928), &mut tuner);

    // (928 - 300) MHz at 100 kHz per step reaches the top exactly
    let steps_to_top = (928 - 300) * 10;
    for _ in 0..steps_to_top {
        channel.step(&mut tuner);
    }
    assert_eq!(channel.current(), mhz(928));
    assert!(channel.is_scanning());

    // One more step exceeds the bound and wraps to the start
    channel.step(&mut tuner);
    assert_eq!(channel.current(), mhz(300));
    assert_eq!(tuner.tuned(), Some(mhz(300)));
}
