//! Environment store: scan, show, append.
//!
//! The log is recovered by one forward pass. The last value record for
//! a key wins; records are never rewritten in place. A store whose
//! magic does not match degrades to "defaults only" — corrupted
//! configuration must never stop the board from booting.

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::{format, vec};

use log::warn;

use ember_core::{Descriptor, DriverRegistry, Environment, Error, RegionSpec, Result, Whence};

use crate::catalog::{Catalog, UNKNOWN_INDEX};
use crate::record::{
    read_cstr, valid_string, encode_record, END_MARKER, ENV_MAGIC, FLAG_HAS_VALUE, INDEX_MASK,
};

/// One log slot seen during a scan: the key (stored on its first
/// record), its catalog match, and the current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSlot {
    /// Key index from the flag byte (0..=126, or 0x7F for unknown).
    pub id: u8,
    pub key: String,
    /// Catalog position matched case-insensitively by key, if any.
    pub catalog_index: Option<usize>,
    /// Last value written for this key, if the latest value record set
    /// one.
    pub value: Option<String>,
}

/// Result of one forward scan. A pure function of the log bytes:
/// scanning the same bytes twice yields identical results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanResult {
    slots: Vec<LogSlot>,
    /// Append point: offset of the byte where the terminator was (or
    /// would be) read.
    pub end_offset: usize,
    /// Whether the magic signature is present on the device.
    pub initialized: bool,
}

impl ScanResult {
    pub fn slots(&self) -> &[LogSlot] {
        &self.slots
    }

    pub fn slot_for_key(&self, key: &str) -> Option<&LogSlot> {
        self.slots.iter().find(|s| s.key.eq_ignore_ascii_case(key))
    }

    /// Current value for a catalog index, if one is stored.
    pub fn current(&self, catalog_index: usize) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.catalog_index == Some(catalog_index))
            .and_then(|s| s.value.as_deref())
    }

    /// `(catalog_index, current_value)` for every matched key.
    pub fn matched(&self) -> Vec<(usize, &str)> {
        self.slots
            .iter()
            .filter_map(|s| Some((s.catalog_index?, s.value.as_deref()?)))
            .collect()
    }

    /// `(key, value)` for every entry not in the catalog.
    pub fn unknown(&self) -> Vec<(&str, &str)> {
        self.slots
            .iter()
            .filter(|s| s.catalog_index.is_none())
            .filter_map(|s| Some((s.key.as_str(), s.value.as_deref()?)))
            .collect()
    }
}

/// Walk the log from offset 0.
///
/// # Errors
///
/// `Unrecognized` when the first two bytes are neither the magic nor
/// the all-`0xFF` empty marker. Callers treat that as "defaults only",
/// never as fatal.
pub fn scan(bytes: &[u8], catalog: &Catalog) -> Result<ScanResult> {
    if bytes.len() < 2 || bytes[..2] == [END_MARKER, END_MARKER] {
        return Ok(ScanResult {
            slots: Vec::new(),
            end_offset: 2.min(bytes.len()),
            initialized: false,
        });
    }
    if bytes[..2] != ENV_MAGIC {
        return Err(Error::Unrecognized);
    }

    let mut slots: Vec<LogSlot> = Vec::new();
    let mut pos = 2;

    loop {
        let record_start = pos;
        let flags = match bytes.get(pos) {
            Some(&f) if f != END_MARKER => f,
            _ => break,
        };
        pos += 1;
        let id = flags & INDEX_MASK;

        let slot_at = match slots.iter().position(|s| s.id == id) {
            Some(at) => at,
            None => {
                // First occurrence of this index: the key string
                // follows inline.
                let (key, next) = match read_cstr(bytes, pos) {
                    Some(ok) => ok,
                    None => {
                        pos = record_start;
                        break;
                    }
                };
                pos = next;
                slots.push(LogSlot {
                    id,
                    key: key.to_string(),
                    catalog_index: catalog.find(key),
                    value: None,
                });
                slots.len() - 1
            }
        };

        let (value, next) = match read_cstr(bytes, pos) {
            Some(ok) => ok,
            None => {
                // Torn record, likely an interrupted write. Everything
                // before it is good; the next append lands here.
                pos = record_start;
                break;
            }
        };
        pos = next;

        if flags & FLAG_HAS_VALUE != 0 {
            slots[slot_at].value = Some(value.to_string());
        }
    }

    Ok(ScanResult {
        slots,
        end_offset: pos,
        initialized: true,
    })
}

/// The environment store bound to its nonvolatile region.
///
/// Descriptors are created per operation and closed when the operation
/// completes; the store holds only the region spec and the recovered
/// state.
pub struct EnvStore {
    drivers: Arc<DriverRegistry>,
    region: RegionSpec,
    catalog: Catalog,
    state: Option<ScanResult>,
}

impl EnvStore {
    /// Read and scan the log region.
    ///
    /// An unrecognized store is logged and degrades to defaults-only;
    /// driver-level failures propagate.
    pub fn open(
        drivers: Arc<DriverRegistry>,
        region: RegionSpec,
        catalog: Catalog,
    ) -> Result<Self> {
        let mut store = Self {
            drivers,
            region,
            catalog,
            state: None,
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-read the region and rebuild the recovered state.
    pub fn reload(&mut self) -> Result<()> {
        let bytes = self.read_region()?;
        match scan(&bytes, &self.catalog) {
            Ok(result) => self.state = Some(result),
            Err(Error::Unrecognized) => {
                warn!(
                    "environment at {} unrecognized, using defaults",
                    self.region
                );
                self.state = None;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether the on-device log was recognized.
    pub fn is_recognized(&self) -> bool {
        self.state.is_some()
    }

    fn open_region(&self) -> Result<Descriptor> {
        let mut d = Descriptor::resolve(&self.drivers, &self.region)?;
        d.open()?;
        Ok(d)
    }

    fn read_region(&self) -> Result<Vec<u8>> {
        let mut d = self.open_region()?;
        let mut bytes = vec![0u8; d.length() as usize];
        let mut filled = 0;
        while filled < bytes.len() {
            let n = d.read(&mut bytes[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        bytes.truncate(filled);
        d.close();
        Ok(bytes)
    }

    /// Current value for a key, stored override only.
    pub fn get(&self, key: &str) -> Option<String> {
        self.state
            .as_ref()?
            .slot_for_key(key)
            .and_then(|s| s.value.clone())
    }

    /// Current value, falling back to the catalog default.
    pub fn get_or_default(&self, key: &str) -> Option<String> {
        if let Some(value) = self.get(key) {
            return Some(value);
        }
        let index = self.catalog.find(key)?;
        Some(self.catalog.get(index)?.default_value.to_string())
    }

    /// Append a value record for `key`.
    ///
    /// The key cell (index + literal name) is written on the first use
    /// of an index; later records reuse the index alone. At most one
    /// unrecognized key fits the reserved overflow index.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if !valid_string(key) || !valid_string(value) || key.is_empty() {
            return Err(Error::InvalidParameter);
        }
        let state = self.state.as_ref().ok_or(Error::Unrecognized)?;

        let (id, key_cell) = match state.slot_for_key(key) {
            Some(slot) => (slot.id, None),
            None => match self.catalog.find(key) {
                Some(index) => (index as u8, Some(key)),
                None => {
                    if state.slots().iter().any(|s| s.id == UNKNOWN_INDEX) {
                        // The single overflow cell is taken.
                        return Err(Error::InvalidParameter);
                    }
                    (UNKNOWN_INDEX, Some(key))
                }
            },
        };

        let mut bytes = Vec::new();
        if !state.initialized {
            bytes.extend_from_slice(&ENV_MAGIC);
        }
        encode_record(&mut bytes, id, key_cell, value);

        let write_at = if state.initialized {
            state.end_offset
        } else {
            0
        };

        let mut d = self.open_region()?;
        if (write_at + bytes.len()) as u64 > d.length() {
            return Err(Error::InvalidParameter);
        }
        d.seek(write_at as i64, Whence::Set)?;
        d.write(&bytes)?;
        d.close();

        // Mirror the append in the recovered state.
        let state = self.state.as_mut().ok_or(Error::Unrecognized)?;
        state.end_offset = write_at + bytes.len();
        state.initialized = true;
        match state.slots.iter_mut().find(|s| s.id == id) {
            Some(slot) => slot.value = Some(value.to_string()),
            None => state.slots.push(LogSlot {
                id,
                key: key.to_string(),
                catalog_index: self.catalog.find(key),
                value: Some(value.to_string()),
            }),
        }
        Ok(())
    }

    /// Display lines with the three-way precedence applied: current
    /// override (`=`), compiled default (`*=`), unrecognized extra
    /// (`#=`).
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (index, var) in self.catalog.iter().enumerate() {
            let current = self
                .state
                .as_ref()
                .and_then(|s| s.current(index));
            match current {
                Some(value) => out.push(format!("{} = {}", var.key, value)),
                None => out.push(format!("{} *= {}", var.key, var.default_value)),
            }
        }
        if let Some(state) = &self.state {
            for (key, value) in state.unknown() {
                out.push(format!("{} #= {}", key, value));
            }
        }
        out
    }
}

impl Environment for EnvStore {
    fn get(&self, key: &str) -> Option<String> {
        EnvStore::get(self, key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        EnvStore::set(self, key, value)
    }

    fn lines(&self) -> Vec<String> {
        EnvStore::lines(self)
    }
}
