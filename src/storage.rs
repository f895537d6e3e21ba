//! Signal persistence
//!
//! Signals are stored as postcard-encoded records, one byte document per
//! signal, under per-channel directories (`/ir` with `.ir` extensions,
//! `/rf` with `.rf`). The backing medium is abstracted behind the
//! [`SignalStore`] capability so the engine core stays filesystem-free;
//! a board wires in its flash filesystem, host tests wire in a map.
//!
//! Record decoding re-checks the payload invariant: a record whose tag
//! says raw must carry samples, and a keyed record must not. Corrupt or
//! hand-edited documents fail to load instead of producing a signal that
//! violates what the rest of the engine assumes.

use core::fmt::Write;

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

use crate::config::{IR_DIR, IR_EXT, IR_RAW_CAPACITY, SUBGHZ_DIR, SUBGHZ_EXT, SUBGHZ_RAW_CAPACITY};
use crate::signal::{
    IrPayload, IrProtocol, IrSignal, SignalName, SubGhzPayload, SubGhzProtocol, SubGhzSignal,
    IR_RAW_TAG, SUBGHZ_RAW_TAG,
};
use crate::types::Frequency;

/// Maximum storage path length (`/rf/` + name + extension fits easily)
pub const MAX_PATH_LEN: usize = 64;

/// Storage path buffer
pub type PathBuf = String<MAX_PATH_LEN>;

/// Encoded-record scratch size; the largest record (raw sub-GHz) is well
/// under half of this
pub const MAX_RECORD_LEN: usize = 2048;

/// Persistence failures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// No document at the given path
    NotFound,
    /// Medium out of space
    Full,
    /// Medium-level read/write failure
    Io,
    /// Record failed to encode or decode
    Codec,
    /// Record decoded but violates the payload invariant
    InvalidRecord,
}

/// Byte-document storage capability
///
/// Paths are flat strings; `count`/`entry` enumerate the documents under
/// a directory prefix in a stable order.
pub trait SignalStore {
    /// Create or replace the document at `path`
    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Read the document at `path` into `buf`, returning the byte count
    fn read(&mut self, path: &str, buf: &mut [u8]) -> Result<usize, StoreError>;

    /// Delete the document at `path`
    fn remove(&mut self, path: &str) -> Result<(), StoreError>;

    /// Number of documents under `dir`
    fn count(&mut self, dir: &str) -> Result<usize, StoreError>;

    /// Name (without directory or extension) of the `index`-th document
    /// under `dir`
    fn entry(&mut self, dir: &str, index: usize) -> Result<SignalName, StoreError>;
}

/// On-medium infrared record
///
/// Field set matches the historical document layout so existing saved
/// signals keep loading: protocol tag, numeric fields, and a raw array
/// whose declared length must agree with the payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IrSignalRecord {
    /// Protocol tag (keyed 1-6, raw 7)
    pub protocol: u8,
    /// Signal name, also the filename stem
    pub name: SignalName,
    /// Address field (0 for raw)
    pub address: u32,
    /// Command field (0 for raw)
    pub command: u32,
    /// Carrier frequency in Hz
    pub frequency: u32,
    /// Capture timestamp (ms since boot)
    pub timestamp: u32,
    /// Declared raw sample count
    pub raw_len: u16,
    /// Raw samples, present only for raw records
    pub raw_data: Vec<u16, IR_RAW_CAPACITY>,
}

impl From<&IrSignal> for IrSignalRecord {
    fn from(signal: &IrSignal) -> Self {
        let (address, command, raw_data) = match &signal.payload {
            IrPayload::Keyed {
                address, command, ..
            } => (*address, *command, Vec::new()),
            IrPayload::Raw { samples } => (0, 0, samples.clone()),
        };
        Self {
            protocol: signal.payload.tag(),
            name: signal.name.clone(),
            address,
            command,
            frequency: signal.carrier.as_hz(),
            timestamp: signal.captured_at_ms,
            raw_len: raw_data.len() as u16,
            raw_data,
        }
    }
}

impl TryFrom<IrSignalRecord> for IrSignal {
    type Error = StoreError;

    fn try_from(record: IrSignalRecord) -> Result<Self, StoreError> {
        if usize::from(record.raw_len) != record.raw_data.len() {
            return Err(StoreError::InvalidRecord);
        }
        let payload = if record.protocol == IR_RAW_TAG {
            if record.raw_data.is_empty() {
                return Err(StoreError::InvalidRecord);
            }
            IrPayload::Raw {
                samples: record.raw_data,
            }
        } else {
            let protocol =
                IrProtocol::from_tag(record.protocol).ok_or(StoreError::InvalidRecord)?;
            if !record.raw_data.is_empty() {
                return Err(StoreError::InvalidRecord);
            }
            IrPayload::Keyed {
                protocol,
                address: record.address,
                command: record.command,
            }
        };
        let carrier = Frequency::from_hz(record.frequency).ok_or(StoreError::InvalidRecord)?;
        Ok(Self {
            payload,
            name: record.name,
            carrier,
            captured_at_ms: record.timestamp,
        })
    }
}

/// On-medium sub-GHz record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubGhzSignalRecord {
    /// Protocol tag (keyed 1-4, raw 5)
    pub protocol: u8,
    /// Signal name, also the filename stem
    pub name: SignalName,
    /// Decoded bits (0 for raw)
    pub data: u32,
    /// Channel frequency in Hz
    pub frequency: u32,
    /// Bit rate in bits per second
    pub bitrate: u32,
    /// Modulation index
    pub modulation: u8,
    /// Capture timestamp (ms since boot)
    pub timestamp: u32,
    /// Declared raw sample count
    pub raw_len: u16,
    /// Raw samples, present only for raw records
    pub raw_data: Vec<u8, SUBGHZ_RAW_CAPACITY>,
}

impl From<&SubGhzSignal> for SubGhzSignalRecord {
    fn from(signal: &SubGhzSignal) -> Self {
        let (data, raw_data) = match &signal.payload {
            SubGhzPayload::Keyed { data, .. } => (*data, Vec::new()),
            SubGhzPayload::Raw { samples } => (0, samples.clone()),
        };
        Self {
            protocol: signal.payload.tag(),
            name: signal.name.clone(),
            data,
            frequency: signal.frequency.as_hz(),
            bitrate: signal.bitrate,
            modulation: signal.modulation,
            timestamp: signal.captured_at_ms,
            raw_len: raw_data.len() as u16,
            raw_data,
        }
    }
}

impl TryFrom<SubGhzSignalRecord> for SubGhzSignal {
    type Error = StoreError;

    fn try_from(record: SubGhzSignalRecord) -> Result<Self, StoreError> {
        if usize::from(record.raw_len) != record.raw_data.len() {
            return Err(StoreError::InvalidRecord);
        }
        let payload = if record.protocol == SUBGHZ_RAW_TAG {
            if record.raw_data.is_empty() {
                return Err(StoreError::InvalidRecord);
            }
            SubGhzPayload::Raw {
                samples: record.raw_data,
            }
        } else {
            let protocol =
                SubGhzProtocol::from_tag(record.protocol).ok_or(StoreError::InvalidRecord)?;
            if !record.raw_data.is_empty() {
                return Err(StoreError::InvalidRecord);
            }
            SubGhzPayload::Keyed {
                protocol,
                data: record.data,
            }
        };
        let frequency = Frequency::from_hz(record.frequency).ok_or(StoreError::InvalidRecord)?;
        Ok(Self {
            payload,
            name: record.name,
            frequency,
            bitrate: record.bitrate,
            modulation: record.modulation,
            captured_at_ms: record.timestamp,
        })
    }
}

/// Signal library over a storage backend
///
/// Wraps a [`SignalStore`] with record encoding, path derivation, and a
/// retained human-readable description of the most recent failure.
pub struct SignalLibrary<S: SignalStore> {
    store: S,
    last_error: String<64>,
}

impl<S: SignalStore> SignalLibrary<S> {
    /// Wrap a storage backend
    pub fn new(store: S) -> Self {
        Self {
            store,
            last_error: String::new(),
        }
    }

    /// Description of the most recent failure (empty if none)
    #[must_use]
    pub fn last_error(&self) -> &str {
        self.last_error.as_str()
    }

    /// Save an infrared signal under its name
    ///
    /// # Errors
    ///
    /// Encoding and medium failures; the failure is also retained for
    /// [`SignalLibrary::last_error`].
    pub fn save_ir(&mut self, signal: &IrSignal) -> Result<(), StoreError> {
        let record = IrSignalRecord::from(signal);
        let path = signal_path(IR_DIR, &record.name, IR_EXT);
        let result = write_record(&mut self.store, &path, &record);
        self.note("save ir", result)
    }

    /// Load an infrared signal by name
    ///
    /// # Errors
    ///
    /// Medium failures, codec failures, and invariant-violating records.
    pub fn load_ir(&mut self, name: &str) -> Result<IrSignal, StoreError> {
        let path = signal_path(IR_DIR, name, IR_EXT);
        let result = read_record::<_, IrSignalRecord>(&mut self.store, &path)
            .and_then(IrSignal::try_from);
        self.note("load ir", result)
    }

    /// Delete an infrared signal by name
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if no such signal, plus medium failures.
    pub fn delete_ir(&mut self, name: &str) -> Result<(), StoreError> {
        let path = signal_path(IR_DIR, name, IR_EXT);
        let result = self.store.remove(&path);
        self.note("delete ir", result)
    }

    /// Number of saved infrared signals
    ///
    /// # Errors
    ///
    /// Medium enumeration failures.
    pub fn count_ir(&mut self) -> Result<usize, StoreError> {
        let result = self.store.count(IR_DIR);
        self.note("count ir", result)
    }

    /// Name of the `index`-th saved infrared signal
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] past the end, plus medium failures.
    pub fn entry_ir(&mut self, index: usize) -> Result<SignalName, StoreError> {
        let result = self.store.entry(IR_DIR, index);
        self.note("entry ir", result)
    }

    /// Save a sub-GHz signal under its name
    ///
    /// # Errors
    ///
    /// Encoding and medium failures.
    pub fn save_subghz(&mut self, signal: &SubGhzSignal) -> Result<(), StoreError> {
        let record = SubGhzSignalRecord::from(signal);
        let path = signal_path(SUBGHZ_DIR, &record.name, SUBGHZ_EXT);
        let result = write_record(&mut self.store, &path, &record);
        self.note("save subghz", result)
    }

    /// Load a sub-GHz signal by name
    ///
    /// # Errors
    ///
    /// Medium failures, codec failures, and invariant-violating records.
    pub fn load_subghz(&mut self, name: &str) -> Result<SubGhzSignal, StoreError> {
        let path = signal_path(SUBGHZ_DIR, name, SUBGHZ_EXT);
        let result = read_record::<_, SubGhzSignalRecord>(&mut self.store, &path)
            .and_then(SubGhzSignal::try_from);
        self.note("load subghz", result)
    }

    /// Delete a sub-GHz signal by name
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if no such signal, plus medium failures.
    pub fn delete_subghz(&mut self, name: &str) -> Result<(), StoreError> {
        let path = signal_path(SUBGHZ_DIR, name, SUBGHZ_EXT);
        let result = self.store.remove(&path);
        self.note("delete subghz", result)
    }

    /// Number of saved sub-GHz signals
    ///
    /// # Errors
    ///
    /// Medium enumeration failures.
    pub fn count_subghz(&mut self) -> Result<usize, StoreError> {
        let result = self.store.count(SUBGHZ_DIR);
        self.note("count subghz", result)
    }

    /// Name of the `index`-th saved sub-GHz signal
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] past the end, plus medium failures.
    pub fn entry_subghz(&mut self, index: usize) -> Result<SignalName, StoreError> {
        let result = self.store.entry(SUBGHZ_DIR, index);
        self.note("entry subghz", result)
    }

    /// Access the backend directly
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn note<T>(&mut self, op: &str, result: Result<T, StoreError>) -> Result<T, StoreError> {
        if let Err(err) = &result {
            self.last_error.clear();
            let _ = write!(self.last_error, "{op}: {err:?}");
        }
        result
    }
}

fn signal_path(dir: &str, name: &str, ext: &str) -> PathBuf {
    let mut path = PathBuf::new();
    let _ = write!(path, "{dir}/{name}{ext}");
    path
}

fn write_record<S: SignalStore, R: Serialize>(
    store: &mut S,
    path: &str,
    record: &R,
) -> Result<(), StoreError> {
    let mut scratch = [0u8; MAX_RECORD_LEN];
    let used = postcard::to_slice(record, &mut scratch).map_err(|_| StoreError::Codec)?;
    store.write(path, used)
}

fn read_record<S: SignalStore, R: for<'de> Deserialize<'de>>(
    store: &mut S,
    path: &str,
) -> Result<R, StoreError> {
    let mut scratch = [0u8; MAX_RECORD_LEN];
    let len = store.read(path, &mut scratch)?;
    postcard::from_bytes(&scratch[..len]).map_err(|_| StoreError::Codec)
}
