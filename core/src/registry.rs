//! Generic registry mechanism.
//!
//! One pattern, three instances: commands, services, and drivers are all
//! statically declared records collected into one contiguous, iterable
//! table at process start. Independently authored modules contribute
//! entries through an explicit, deterministic builder invoked once at
//! start-of-day; there is no hand-maintained master list anywhere else.
//!
//! Entry order is exactly builder-submission order. That order is the
//! tie-break for every consumer that does not define its own, and tests
//! pin it rather than leave it implementation-defined.

use alloc::vec::Vec;

/// A registrable record: anything with a lookup key.
pub trait Record {
    fn key(&self) -> &str;
}

/// Accumulates records in submission order.
pub struct RegistryBuilder<T: Record> {
    entries: Vec<T>,
}

impl<T: Record> RegistryBuilder<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append one record. Submission order is preserved in the built
    /// table.
    pub fn add(mut self, record: T) -> Self {
        self.entries.push(record);
        self
    }

    /// Append every record from an enumerable list, in list order.
    pub fn extend(mut self, records: impl IntoIterator<Item = T>) -> Self {
        self.entries.extend(records);
        self
    }

    /// Freeze into an immutable table.
    pub fn build(self) -> Registry<T> {
        Registry {
            entries: self.entries,
        }
    }
}

/// Immutable, ordered table of records. Lookup is a linear scan; tables
/// hold tens of entries.
pub struct Registry<T: Record> {
    entries: Vec<T>,
}

impl<T: Record> Registry<T> {
    /// Exact-match lookup by key.
    pub fn find(&self, key: &str) -> Option<&T> {
        self.entries.iter().find(|e| e.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
