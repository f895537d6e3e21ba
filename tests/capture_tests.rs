//! Tests for edge sampling and capture sessions

use sigtool_firmware::capture::{CaptureError, CaptureSession, EdgeSampler, Sample};
use sigtool_firmware::config::{IR_RAW_CAPACITY, SUBGHZ_RAW_CAPACITY};
use sigtool_firmware::hal::AtomicEdgeGate;

// ============================================================================
// Sample Quantization Tests
// ============================================================================

#[test]
fn u16_sample_keeps_microseconds() {
    assert_eq!(<u16 as Sample>::from_micros(560), 560);
    assert_eq!(560u16.as_micros(), 560);
}

#[test]
fn u16_sample_saturates() {
    assert_eq!(<u16 as Sample>::from_micros(100_000), u16::MAX);
}

#[test]
fn u8_sample_quantizes_to_ten_microsecond_units() {
    assert_eq!(<u8 as Sample>::from_micros(250), 25);
    assert_eq!(25u8.as_micros(), 250);
}

#[test]
fn u8_sample_saturates() {
    assert_eq!(<u8 as Sample>::from_micros(10_000), u8::MAX);
}

// ============================================================================
// Edge Sampler Tests
// ============================================================================

#[test]
fn sampler_records_intervals_between_edges() {
    let sampler: EdgeSampler<u16, IR_RAW_CAPACITY> = EdgeSampler::new();
    sampler.arm(1_000);
    sampler.on_edge(2_000);
    sampler.on_edge(2_560);
    sampler.on_edge(4_250);

    let buf = sampler.take();
    assert_eq!(buf.as_slice(), &[1_000, 560, 1_690]);
}

#[test]
fn sampler_ignores_edges_while_disarmed() {
    let sampler: EdgeSampler<u16, IR_RAW_CAPACITY> = EdgeSampler::new();
    sampler.on_edge(500);
    assert!(sampler.is_empty());

    sampler.arm(0);
    sampler.on_edge(100);
    sampler.disarm();
    sampler.on_edge(200);
    assert_eq!(sampler.len(), 1);
}

#[test]
fn sampler_arm_clears_previous_run() {
    let sampler: EdgeSampler<u16, IR_RAW_CAPACITY> = EdgeSampler::new();
    sampler.arm(0);
    sampler.on_edge(100);
    sampler.on_edge(200);

    sampler.arm(10_000);
    sampler.on_edge(10_400);
    let buf = sampler.take();
    assert_eq!(buf.as_slice(), &[400]);
}

#[test]
fn sampler_drops_edges_past_capacity() {
    let sampler: EdgeSampler<u8, SUBGHZ_RAW_CAPACITY> = EdgeSampler::new();
    sampler.arm(0);
    for i in 1..=(SUBGHZ_RAW_CAPACITY as u64 + 20) {
        sampler.on_edge(i * 100);
    }
    assert_eq!(sampler.len(), SUBGHZ_RAW_CAPACITY);
}

#[test]
fn sampler_take_resets_and_disarms() {
    let sampler: EdgeSampler<u16, IR_RAW_CAPACITY> = EdgeSampler::new();
    sampler.arm(0);
    sampler.on_edge(100);
    let _ = sampler.take();

    assert!(sampler.is_empty());
    sampler.on_edge(200);
    assert!(sampler.is_empty());
}

#[test]
fn sampler_snapshot_tracks_count_and_last_edge() {
    let sampler: EdgeSampler<u16, IR_RAW_CAPACITY> = EdgeSampler::new();
    sampler.arm(5_000);
    assert_eq!(sampler.snapshot(), (0, 5_000));

    sampler.on_edge(7_500);
    assert_eq!(sampler.snapshot(), (1, 7_500));
}

// ============================================================================
// Capture Session Tests
// ============================================================================

fn feed_edges(sampler: &EdgeSampler<u16, IR_RAW_CAPACITY>, start: u64, count: usize) -> u64 {
    let mut t = start;
    for _ in 0..count {
        t += 1_000;
        sampler.on_edge(t);
    }
    t
}

#[test]
fn session_start_while_active_is_rejected() {
    let sampler: EdgeSampler<u16, IR_RAW_CAPACITY> = EdgeSampler::new();
    let mut gate = AtomicEdgeGate::new();
    let mut session = CaptureSession::new(100);

    assert_eq!(session.start(0, &sampler, &mut gate), Ok(()));
    assert!(session.is_active());
    assert_eq!(
        session.start(10, &sampler, &mut gate),
        Err(CaptureError::AlreadyActive)
    );
    // The running session is unaffected
    assert!(session.is_active());
}

#[test]
fn session_start_unmasks_edge_source() {
    let sampler: EdgeSampler<u16, IR_RAW_CAPACITY> = EdgeSampler::new();
    let mut gate = AtomicEdgeGate::new();
    let mut session = CaptureSession::new(100);

    assert!(!gate.is_enabled());
    session.start(0, &sampler, &mut gate).unwrap();
    assert!(gate.is_enabled());
}

#[test]
fn session_completes_after_quiet_timeout() {
    let sampler: EdgeSampler<u16, IR_RAW_CAPACITY> = EdgeSampler::new();
    let mut gate = AtomicEdgeGate::new();
    let mut session = CaptureSession::new(100);

    session.start(0, &sampler, &mut gate).unwrap();
    let last = feed_edges(&sampler, 0, 12);

    // Still inside the quiet window
    assert!(session.tick(last + 50_000, &sampler, &mut gate).is_none());
    assert!(session.is_active());

    let buf = session
        .tick(last + 101_000, &sampler, &mut gate)
        .expect("capture should complete");
    assert_eq!(buf.len(), 12);
    assert!(!session.is_active());
    assert!(!gate.is_enabled());
}

#[test]
fn session_discards_short_captures() {
    let sampler: EdgeSampler<u16, IR_RAW_CAPACITY> = EdgeSampler::new();
    let mut gate = AtomicEdgeGate::new();
    let mut session = CaptureSession::new(100);

    session.start(0, &sampler, &mut gate).unwrap();
    let last = feed_edges(&sampler, 0, 5);

    assert!(session.tick(last + 101_000, &sampler, &mut gate).is_none());
    // The session still ended; the noise blip was dropped
    assert!(!session.is_active());
    assert!(sampler.is_empty());
}

#[test]
fn session_times_out_on_silent_line() {
    let sampler: EdgeSampler<u16, IR_RAW_CAPACITY> = EdgeSampler::new();
    let mut gate = AtomicEdgeGate::new();
    let mut session = CaptureSession::new(100);

    session.start(1_000, &sampler, &mut gate).unwrap();
    assert!(session.tick(102_000, &sampler, &mut gate).is_none());
    assert!(!session.is_active());
}

#[test]
fn session_stop_is_idempotent_and_discards() {
    let sampler: EdgeSampler<u16, IR_RAW_CAPACITY> = EdgeSampler::new();
    let mut gate = AtomicEdgeGate::new();
    let mut session = CaptureSession::new(100);

    session.start(0, &sampler, &mut gate).unwrap();
    feed_edges(&sampler, 0, 20);

    session.stop(&sampler, &mut gate);
    assert!(!session.is_active());
    assert!(!gate.is_enabled());
    assert!(sampler.is_empty());

    // Second stop is a no-op
    session.stop(&sampler, &mut gate);
    assert!(!session.is_active());
}

#[test]
fn session_tick_while_idle_is_a_no_op() {
    let sampler: EdgeSampler<u16, IR_RAW_CAPACITY> = EdgeSampler::new();
    let mut gate = AtomicEdgeGate::new();
    let mut session = CaptureSession::new(100);

    assert!(session.tick(1_000_000, &sampler, &mut gate).is_none());
}
