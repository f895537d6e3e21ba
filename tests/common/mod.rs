//! Shared mock hardware for host tests
//!
//! A manually advanced clock (whose `Delay` impl advances it, so blocking
//! transmitters run instantly), a level-recording pin with an envelope
//! demodulator, and an in-memory storage backend.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use sigtool_firmware::hal::{Clock, Delay, TxPin};
use sigtool_firmware::signal::SignalName;
use sigtool_firmware::storage::{SignalStore, StoreError};

/// Manually advanced time source shared between mocks
#[derive(Clone, Default)]
pub struct MockClock(Rc<Cell<u64>>);

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_us(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1_000);
    }

    pub fn now(&self) -> u64 {
        self.0.get()
    }
}

impl Clock for MockClock {
    fn now_us(&self) -> u64 {
        self.0.get()
    }
}

impl Delay for MockClock {
    fn delay_us(&mut self, us: u32) {
        self.advance_us(u64::from(us));
    }
}

/// Pin that records level transitions with timestamps
pub struct RecordingPin {
    clock: MockClock,
    level: bool,
    /// `(time_us, level)` for every transition, redundant writes dropped
    pub events: Vec<(u64, bool)>,
}

impl RecordingPin {
    pub fn new(clock: MockClock) -> Self {
        Self {
            clock,
            level: false,
            events: Vec::new(),
        }
    }

    pub fn is_low(&self) -> bool {
        !self.level
    }

    fn transition(&mut self, level: bool) {
        if self.level != level {
            self.level = level;
            self.events.push((self.clock.now(), level));
        }
    }
}

impl TxPin for RecordingPin {
    fn set_high(&mut self) {
        self.transition(true);
    }

    fn set_low(&mut self) {
        self.transition(false);
    }
}

/// Carrier gaps shorter than this are part of the same mark (a 38 kHz
/// half-period is ~13 µs; the shortest real space is 560 µs)
const ENVELOPE_GAP_US: u64 = 250;

/// Demodulate a recorded carrier waveform into mark/space intervals
///
/// Merges high pulses separated by sub-gap lows into marks, measures the
/// spaces between them, and appends a trailing idle space the way a real
/// receiver line goes quiet after the final mark.
pub fn envelope(events: &[(u64, bool)]) -> Vec<u16> {
    // Pair rises with falls into high intervals
    let mut highs: Vec<(u64, u64)> = Vec::new();
    let mut rise: Option<u64> = None;
    for &(t, level) in events {
        if level {
            rise = Some(t);
        } else if let Some(r) = rise.take() {
            highs.push((r, t));
        }
    }

    // Merge carrier cycles into marks
    let mut marks: Vec<(u64, u64)> = Vec::new();
    for (start, end) in highs {
        match marks.last_mut() {
            Some((_, last_end)) if start - *last_end < ENVELOPE_GAP_US => *last_end = end,
            _ => marks.push((start, end)),
        }
    }

    let mut intervals = Vec::new();
    for (i, &(start, end)) in marks.iter().enumerate() {
        if i > 0 {
            let prev_end = marks[i - 1].1;
            intervals.push((start - prev_end) as u16);
        }
        intervals.push((end - start) as u16);
    }
    // Trailing quiet after the last mark
    if !intervals.is_empty() {
        intervals.push(u16::MAX);
    }
    intervals
}

/// In-memory byte-document store
#[derive(Default)]
pub struct MemStore {
    docs: BTreeMap<String, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.docs.contains_key(path)
    }

    /// Corrupt a stored document in place (for decode-failure tests)
    pub fn tamper(&mut self, path: &str, bytes: Vec<u8>) {
        self.docs.insert(path.to_owned(), bytes);
    }

    fn dir_keys<'a>(&'a self, dir: &'a str) -> impl Iterator<Item = &'a String> {
        self.docs
            .keys()
            .filter(move |k| k.starts_with(dir) && k[dir.len()..].starts_with('/'))
    }
}

impl SignalStore for MemStore {
    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.docs.insert(path.to_owned(), bytes.to_vec());
        Ok(())
    }

    fn read(&mut self, path: &str, buf: &mut [u8]) -> Result<usize, StoreError> {
        let doc = self.docs.get(path).ok_or(StoreError::NotFound)?;
        if doc.len() > buf.len() {
            return Err(StoreError::Io);
        }
        buf[..doc.len()].copy_from_slice(doc);
        Ok(doc.len())
    }

    fn remove(&mut self, path: &str) -> Result<(), StoreError> {
        self.docs
            .remove(path)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    fn count(&mut self, dir: &str) -> Result<usize, StoreError> {
        Ok(self.dir_keys(dir).count())
    }

    fn entry(&mut self, dir: &str, index: usize) -> Result<SignalName, StoreError> {
        let key = self.dir_keys(dir).nth(index).ok_or(StoreError::NotFound)?;
        let stem = key[dir.len() + 1..]
            .rsplit_once('.')
            .map_or(&key[dir.len() + 1..], |(stem, _)| stem);
        let mut name = SignalName::new();
        name.push_str(stem).map_err(|()| StoreError::Io)?;
        Ok(name)
    }
}
