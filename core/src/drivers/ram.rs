//! RAM-backed reference driver.
//!
//! Full capability set over an in-memory byte array. The erased state
//! is `0xFF`, matching NOR flash, so the environment store behaves the
//! same over RAM during bring-up as it does over the real part.

use alloc::vec;
use alloc::vec::Vec;

use spin::Mutex;

use crate::driver::{Capabilities, Driver};
use crate::error::{Error, Result};

pub struct RamDriver {
    name: &'static str,
    description: &'static str,
    capabilities: Capabilities,
    data: Mutex<Vec<u8>>,
}

impl RamDriver {
    /// Create a driver over `size` bytes, all erased (`0xFF`).
    pub fn new(name: &'static str, size: usize) -> Self {
        Self {
            name,
            description: "RAM-backed memory window",
            capabilities: Capabilities::all(),
            data: Mutex::new(vec![0xFF; size]),
        }
    }

    /// Restrict the advertised capability set. Used to model parts that
    /// implement only a subset of the driver operations.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Snapshot of the backing bytes.
    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().clone()
    }
}

impl Driver for RamDriver {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn total_length(&self) -> u64 {
        self.data.lock().len() as u64
    }

    fn open(&self, start: u64, length: u64) -> Result<()> {
        let total = self.data.lock().len() as u64;
        if start > total || length > total - start {
            return Err(Error::InvalidParameter);
        }
        Ok(())
    }

    fn read(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let data = self.data.lock();
        let offset = offset as usize;
        if offset >= data.len() {
            return Ok(0);
        }
        let n = buf.len().min(data.len() - offset);
        buf[..n].copy_from_slice(&data[offset..offset + n]);
        Ok(n)
    }

    fn write(&self, offset: u64, buf: &[u8]) -> Result<usize> {
        let mut data = self.data.lock();
        let offset = offset as usize;
        if offset > data.len() {
            return Err(Error::Io);
        }
        let n = buf.len().min(data.len() - offset);
        data[offset..offset + n].copy_from_slice(&buf[..n]);
        Ok(n)
    }

    fn erase(&self, offset: u64, length: u64) -> Result<()> {
        let mut data = self.data.lock();
        let offset = offset as usize;
        let end = offset
            .checked_add(length as usize)
            .filter(|&e| e <= data.len())
            .ok_or(Error::Io)?;
        data[offset..end].fill(0xFF);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
