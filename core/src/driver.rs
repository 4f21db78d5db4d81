//! I/O driver trait definitions.
//!
//! A driver exposes a fixed set of optional operations over one address
//! space. Capability presence is declared up front; invoking an absent
//! capability is a reportable `Unsupported` condition, never a crash or
//! a silent no-op. Several callers (compare, the environment store)
//! depend on receiving that signal to choose a fallback.

use alloc::sync::Arc;

use bitflags::bitflags;

use crate::error::{Error, Result};
use crate::registry::{Record, Registry};

bitflags! {
    /// Operations a driver implements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capabilities: u8 {
        const OPEN  = 1 << 0;
        const CLOSE = 1 << 1;
        const READ  = 1 << 2;
        const WRITE = 1 << 3;
        const SEEK  = 1 << 4;
        const ERASE = 1 << 5;
        const FLUSH = 1 << 6;
    }
}

/// Core driver interface.
///
/// Implementations use interior mutability for device state; there is
/// exactly one logical thread of control, so the locks only serialize
/// callback reentrancy.
///
/// The default method bodies return `Err(Error::Unsupported)` so that a
/// driver advertising a capability it forgot to implement still fails
/// deterministically.
pub trait Driver: Send + Sync {
    /// Registry name, matched exactly by the region grammar.
    fn name(&self) -> &str;

    /// One-line description for the `drivers` listing.
    fn description(&self) -> &str {
        ""
    }

    /// Which operations this driver implements.
    fn capabilities(&self) -> Capabilities;

    /// Total addressable length in bytes.
    fn total_length(&self) -> u64;

    /// Validate and prepare a window before I/O.
    fn open(&self, _start: u64, _length: u64) -> Result<()> {
        Err(Error::Unsupported)
    }

    /// Release whatever `open` acquired.
    fn close(&self) {}

    /// Read up to `buf.len()` bytes at `offset`. Returns the byte count;
    /// 0 means no data available (end of window, or nothing pending on a
    /// stream-like device).
    fn read(&self, _offset: u64, _buf: &mut [u8]) -> Result<usize> {
        Err(Error::Unsupported)
    }

    /// Write `buf` at `offset`. Returns the byte count written.
    fn write(&self, _offset: u64, _buf: &[u8]) -> Result<usize> {
        Err(Error::Unsupported)
    }

    /// Erase `length` bytes at `offset` to the device's erased state.
    fn erase(&self, _offset: u64, _length: u64) -> Result<()> {
        Err(Error::Unsupported)
    }

    /// Push any buffered writes to the device.
    fn flush(&self) -> Result<()> {
        Err(Error::Unsupported)
    }
}

impl Record for Arc<dyn Driver> {
    fn key(&self) -> &str {
        self.name()
    }
}

/// Process-wide, read-only table of named drivers, populated before the
/// shell starts.
pub type DriverRegistry = Registry<Arc<dyn Driver>>;
