//! Tests for signal persistence

mod common;

use common::MemStore;
use heapless::Vec as HVec;
use sigtool_firmware::config::{IR_RAW_CAPACITY, SUBGHZ_RAW_CAPACITY};
use sigtool_firmware::signal::{
    IrProtocol, IrSignal, SignalName, SubGhzProtocol, SubGhzSignal,
};
use sigtool_firmware::storage::{
    IrSignalRecord, SignalLibrary, StoreError, SubGhzSignalRecord,
};
use sigtool_firmware::types::Frequency;

fn library() -> SignalLibrary<MemStore> {
    SignalLibrary::new(MemStore::new())
}

fn name(s: &str) -> SignalName {
    let mut n = SignalName::new();
    n.push_str(s).unwrap();
    n
}

// ============================================================================
// Round-Trip Tests
// ============================================================================

#[test]
fn keyed_ir_signal_round_trips() {
    let mut lib = library();
    let signal = IrSignal::keyed(IrProtocol::Nec, 0x00FF, 0x10EF, 500);

    lib.save_ir(&signal).unwrap();
    assert!(lib.store_mut().contains("/ir/NEC_0x10ef.ir"));

    let loaded = lib.load_ir("NEC_0x10ef").unwrap();
    assert_eq!(loaded, signal);
}

#[test]
fn raw_ir_signal_round_trips() {
    let mut lib = library();
    let mut samples: HVec<u16, IR_RAW_CAPACITY> = HVec::new();
    for interval in [9_000u16, 4_500, 560, 1_690] {
        samples.push(interval).unwrap();
    }
    let signal = IrSignal::raw(samples, 1_234);

    lib.save_ir(&signal).unwrap();
    let loaded = lib.load_ir("RAW_1234").unwrap();
    assert_eq!(loaded, signal);
}

#[test]
fn keyed_subghz_signal_round_trips() {
    let mut lib = library();
    let freq = Frequency::from_hz(433_920_000).unwrap();
    let signal = SubGhzSignal::keyed(SubGhzProtocol::AskOok, 0xDEAD_BEEF, 4_800, 0, freq, 777);

    lib.save_subghz(&signal).unwrap();
    assert!(lib.store_mut().contains("/rf/ASK-OOK_433.92MHz_777.rf"));

    let loaded = lib.load_subghz("ASK-OOK_433.92MHz_777").unwrap();
    assert_eq!(loaded, signal);
}

#[test]
fn raw_subghz_signal_round_trips() {
    let mut lib = library();
    let mut samples: HVec<u8, SUBGHZ_RAW_CAPACITY> = HVec::new();
    for unit in [10u8, 20, 30, 40, 250] {
        samples.push(unit).unwrap();
    }
    let freq = Frequency::from_hz(868_000_000).unwrap();
    let signal = SubGhzSignal::raw(samples, 4_800, freq, 42);

    lib.save_subghz(&signal).unwrap();
    let loaded = lib.load_subghz(signal.name.as_str()).unwrap();
    assert_eq!(loaded, signal);
}

// ============================================================================
// Enumeration and Deletion Tests
// ============================================================================

#[test]
fn count_and_entry_enumerate_per_channel() {
    let mut lib = library();
    lib.save_ir(&IrSignal::keyed(IrProtocol::Nec, 1, 0xA0, 0)).unwrap();
    lib.save_ir(&IrSignal::keyed(IrProtocol::Nec, 1, 0xB1, 0)).unwrap();

    let freq = Frequency::from_hz(433_920_000).unwrap();
    lib.save_subghz(&SubGhzSignal::keyed(SubGhzProtocol::AskOok, 5, 4_800, 0, freq, 9))
        .unwrap();

    assert_eq!(lib.count_ir(), Ok(2));
    assert_eq!(lib.count_subghz(), Ok(1));

    // BTreeMap-backed store enumerates lexicographically
    assert_eq!(lib.entry_ir(0), Ok(name("NEC_0xa0")));
    assert_eq!(lib.entry_ir(1), Ok(name("NEC_0xb1")));
    assert_eq!(lib.entry_ir(2), Err(StoreError::NotFound));
}

#[test]
fn delete_removes_only_the_named_signal() {
    let mut lib = library();
    lib.save_ir(&IrSignal::keyed(IrProtocol::Nec, 1, 0xA0, 0)).unwrap();
    lib.save_ir(&IrSignal::keyed(IrProtocol::Nec, 1, 0xB1, 0)).unwrap();

    lib.delete_ir("NEC_0xa0").unwrap();
    assert_eq!(lib.count_ir(), Ok(1));
    assert_eq!(lib.load_ir("NEC_0xa0"), Err(StoreError::NotFound));
    assert!(lib.load_ir("NEC_0xb1").is_ok());
}

#[test]
fn delete_missing_signal_reports_not_found() {
    let mut lib = library();
    assert_eq!(lib.delete_ir("NEC_0x99"), Err(StoreError::NotFound));
}

// ============================================================================
// Invariant Enforcement Tests
// ============================================================================

#[test]
fn raw_tagged_record_without_samples_is_rejected() {
    let record = IrSignalRecord {
        protocol: 7,
        name: name("RAW_1"),
        address: 0,
        command: 0,
        frequency: 38_000,
        timestamp: 0,
        raw_len: 0,
        raw_data: HVec::new(),
    };
    assert_eq!(IrSignal::try_from(record), Err(StoreError::InvalidRecord));
}

#[test]
fn keyed_record_with_samples_is_rejected() {
    let mut raw_data: HVec<u16, IR_RAW_CAPACITY> = HVec::new();
    raw_data.push(100).unwrap();
    let record = IrSignalRecord {
        protocol: 1,
        name: name("NEC_0x1"),
        address: 1,
        command: 1,
        frequency: 38_000,
        timestamp: 0,
        raw_len: 1,
        raw_data,
    };
    assert_eq!(IrSignal::try_from(record), Err(StoreError::InvalidRecord));
}

#[test]
fn mismatched_raw_length_is_rejected() {
    let mut raw_data: HVec<u8, SUBGHZ_RAW_CAPACITY> = HVec::new();
    raw_data.push(10).unwrap();
    raw_data.push(20).unwrap();
    let record = SubGhzSignalRecord {
        protocol: 5,
        name: name("RAW_2"),
        data: 0,
        frequency: 433_920_000,
        bitrate: 4_800,
        modulation: 0,
        timestamp: 0,
        raw_len: 5,
        raw_data,
    };
    assert_eq!(
        SubGhzSignal::try_from(record),
        Err(StoreError::InvalidRecord)
    );
}

#[test]
fn unknown_protocol_tag_is_rejected() {
    let record = IrSignalRecord {
        protocol: 9,
        name: name("BOGUS"),
        address: 0,
        command: 0,
        frequency: 38_000,
        timestamp: 0,
        raw_len: 0,
        raw_data: HVec::new(),
    };
    assert_eq!(IrSignal::try_from(record), Err(StoreError::InvalidRecord));
}

#[test]
fn corrupt_document_fails_to_load() {
    let mut lib = library();
    let signal = IrSignal::keyed(IrProtocol::Nec, 1, 0xA0, 0);
    lib.save_ir(&signal).unwrap();

    lib.store_mut().tamper("/ir/NEC_0xa0.ir", vec![0xFF; 3]);
    assert!(lib.load_ir("NEC_0xa0").is_err());
}

// ============================================================================
// Last Error Tests
// ============================================================================

#[test]
fn failures_retain_a_description() {
    let mut lib = library();
    assert_eq!(lib.last_error(), "");

    assert_eq!(lib.load_ir("MISSING"), Err(StoreError::NotFound));
    assert!(lib.last_error().contains("load ir"));
    assert!(lib.last_error().contains("NotFound"));

    // A subsequent success leaves the description for diagnostics
    lib.save_ir(&IrSignal::keyed(IrProtocol::Nec, 1, 2, 0)).unwrap();
    assert!(lib.last_error().contains("load ir"));
}
