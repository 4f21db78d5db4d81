//! Opened descriptor: a window into one driver's address space.
//!
//! A descriptor is exclusively owned by the caller between open and
//! close. Every open is paired with exactly one close on every exit
//! path; `close` is idempotent and also runs on drop, so early returns
//! in cleanup-on-every-exit-path code stay correct.

use alloc::sync::Arc;

use crate::driver::{Capabilities, Driver, DriverRegistry};
use crate::error::{Error, Result};
use crate::region::RegionSpec;

/// Seek origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// From the start of the window.
    Set,
    /// Relative to the cursor.
    Cur,
    /// From the end of the window (negative offsets move backwards).
    End,
}

/// A resolved, optionally opened window into a driver.
pub struct Descriptor {
    driver: Arc<dyn Driver>,
    start: u64,
    length: u64,
    cursor: u64,
    open: bool,
}

impl Descriptor {
    /// Resolve a parsed region against the driver registry.
    ///
    /// `length == 0` in the region extends the window to the end of the
    /// device; an explicit length is clamped there. A start beyond the
    /// end of the device is malformed.
    ///
    /// # Errors
    ///
    /// `UnknownDriver` if the registry has no driver of that name,
    /// `InvalidParameter` for an out-of-range start.
    pub fn resolve(registry: &DriverRegistry, region: &RegionSpec) -> Result<Self> {
        let driver = registry
            .find(&region.driver_name)
            .ok_or(Error::UnknownDriver)?
            .clone();

        let total = driver.total_length();
        if region.start > total {
            return Err(Error::InvalidParameter);
        }
        let available = total - region.start;
        let length = if region.length == 0 {
            available
        } else {
            region.length.min(available)
        };

        Ok(Descriptor {
            driver,
            start: region.start,
            length,
            cursor: 0,
            open: false,
        })
    }

    /// Invoke the driver's open capability, if present, and mark the
    /// descriptor open. A driver without `OPEN` needs no preparation;
    /// the descriptor opens trivially and each I/O call checks its own
    /// capability.
    pub fn open(&mut self) -> Result<()> {
        if self.open {
            return Ok(());
        }
        if self.driver.capabilities().contains(Capabilities::OPEN) {
            self.driver.open(self.start, self.length)?;
        }
        self.open = true;
        self.cursor = 0;
        Ok(())
    }

    /// Close the descriptor. Safe to call on an already-closed
    /// descriptor; the repeat call is a no-op.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        if self.driver.capabilities().contains(Capabilities::CLOSE) {
            self.driver.close();
        }
        self.open = false;
    }

    /// Window length in bytes. Available without opening; registry
    /// metadata does not require the open capability.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Current cursor position within the window.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn driver_name(&self) -> &str {
        self.driver.name()
    }

    fn require(&self, cap: Capabilities) -> Result<()> {
        if !self.open {
            return Err(Error::InvalidParameter);
        }
        if !self.driver.capabilities().contains(cap) {
            return Err(Error::Unsupported);
        }
        Ok(())
    }

    /// Read at the cursor, clamped to the window. Returns the byte
    /// count; 0 means end of window or nothing pending.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.require(Capabilities::READ)?;
        let remaining = self.length - self.cursor;
        let take = remaining.min(buf.len() as u64) as usize;
        if take == 0 {
            return Ok(0);
        }
        let n = self
            .driver
            .read(self.start + self.cursor, &mut buf[..take])?;
        self.cursor += n as u64;
        Ok(n)
    }

    /// Write at the cursor, clamped to the window.
    pub fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.require(Capabilities::WRITE)?;
        let remaining = self.length - self.cursor;
        let take = remaining.min(buf.len() as u64) as usize;
        if take == 0 && !buf.is_empty() {
            return Err(Error::InvalidParameter);
        }
        let n = self.driver.write(self.start + self.cursor, &buf[..take])?;
        self.cursor += n as u64;
        Ok(n)
    }

    /// Move the cursor. Clamped to the window bounds.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<u64> {
        self.require(Capabilities::SEEK)?;
        let base = match whence {
            Whence::Set => 0,
            Whence::Cur => self.cursor,
            Whence::End => self.length,
        };
        let target = if offset.is_negative() {
            base.saturating_sub(offset.unsigned_abs())
        } else {
            base.saturating_add(offset as u64)
        };
        self.cursor = target.min(self.length);
        Ok(self.cursor)
    }

    /// Erase `length` bytes at the cursor, clamped to the window, and
    /// advance past them.
    pub fn erase(&mut self, length: u64) -> Result<()> {
        self.require(Capabilities::ERASE)?;
        let take = length.min(self.length - self.cursor);
        self.driver.erase(self.start + self.cursor, take)?;
        self.cursor += take;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.require(Capabilities::FLUSH)?;
        self.driver.flush()
    }
}

impl Drop for Descriptor {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::ram::RamDriver;
    use crate::registry::RegistryBuilder;
    use alloc::sync::Arc;

    fn registry_with(driver: RamDriver) -> DriverRegistry {
        let arc: Arc<dyn Driver> = Arc::new(driver);
        RegistryBuilder::new().add(arc).build()
    }

    fn resolve(registry: &DriverRegistry, spec: &str) -> Descriptor {
        let region = RegionSpec::parse(spec, "ram").unwrap();
        Descriptor::resolve(registry, &region).unwrap()
    }

    #[test]
    fn test_resolve_unknown_driver() {
        let reg = registry_with(RamDriver::new("ram", 4096));
        let region = RegionSpec::parse("nand:0", "ram").unwrap();
        assert!(matches!(
            Descriptor::resolve(&reg, &region),
            Err(Error::UnknownDriver)
        ));
    }

    #[test]
    fn test_zero_length_extends_to_device_end() {
        let reg = registry_with(RamDriver::new("ram", 4096));
        let d = resolve(&reg, "ram:1k");
        assert_eq!(d.length(), 3072);
    }

    #[test]
    fn test_explicit_length_clamped_to_device() {
        let reg = registry_with(RamDriver::new("ram", 4096));
        let d = resolve(&reg, "ram:1k+64k");
        assert_eq!(d.length(), 3072);
    }

    #[test]
    fn test_start_beyond_end_rejected() {
        let reg = registry_with(RamDriver::new("ram", 4096));
        let region = RegionSpec::parse("ram:8k", "ram").unwrap();
        assert!(matches!(
            Descriptor::resolve(&reg, &region),
            Err(Error::InvalidParameter)
        ));
    }

    #[test]
    fn test_read_without_capability_is_unsupported() {
        let driver = RamDriver::new("ram", 4096)
            .with_capabilities(Capabilities::OPEN | Capabilities::WRITE);
        let reg = registry_with(driver);
        let mut d = resolve(&reg, "ram:0");
        d.open().unwrap();
        let mut buf = [0u8; 16];
        // Never partially succeeds: same answer every time.
        assert_eq!(d.read(&mut buf), Err(Error::Unsupported));
        assert_eq!(d.read(&mut buf), Err(Error::Unsupported));
        assert_eq!(d.cursor(), 0);
    }

    #[test]
    fn test_io_before_open_rejected() {
        let reg = registry_with(RamDriver::new("ram", 4096));
        let mut d = resolve(&reg, "ram:0");
        let mut buf = [0u8; 4];
        assert!(d.read(&mut buf).is_err());
    }

    #[test]
    fn test_close_is_idempotent() {
        let reg = registry_with(RamDriver::new("ram", 4096));
        let mut d = resolve(&reg, "ram:0");
        d.open().unwrap();
        d.close();
        d.close();
        assert!(!d.is_open());
    }

    #[test]
    fn test_read_clamped_to_window() {
        let driver = RamDriver::new("ram", 4096);
        driver.write(0, &[0xAA; 64]).unwrap();
        let reg = registry_with(driver);
        let mut d = resolve(&reg, "ram:0+16");
        d.open().unwrap();
        let mut buf = [0u8; 64];
        assert_eq!(d.read(&mut buf).unwrap(), 16);
        assert_eq!(d.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_write_then_read_back_through_window() {
        let reg = registry_with(RamDriver::new("ram", 4096));
        let mut d = resolve(&reg, "ram:1k+8");
        d.open().unwrap();
        assert_eq!(d.write(b"emberboo").unwrap(), 8);
        d.seek(0, Whence::Set).unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(d.read(&mut buf).unwrap(), 8);
        assert_eq!(&buf, b"emberboo");
        d.close();
    }

    #[test]
    fn test_seek_whence_forms() {
        let reg = registry_with(RamDriver::new("ram", 4096));
        let mut d = resolve(&reg, "ram:0+100");
        d.open().unwrap();
        assert_eq!(d.seek(10, Whence::Set).unwrap(), 10);
        assert_eq!(d.seek(5, Whence::Cur).unwrap(), 15);
        assert_eq!(d.seek(-5, Whence::End).unwrap(), 95);
        // Clamped, not wrapped.
        assert_eq!(d.seek(-500, Whence::Cur).unwrap(), 0);
        assert_eq!(d.seek(500, Whence::Set).unwrap(), 100);
    }

    #[test]
    fn test_erase_advances_cursor() {
        let driver = RamDriver::new("ram", 4096);
        driver.write(0, &[0x55; 32]).unwrap();
        let reg = registry_with(driver);
        let mut d = resolve(&reg, "ram:0+32");
        d.open().unwrap();
        d.erase(16).unwrap();
        assert_eq!(d.cursor(), 16);
        d.seek(0, Whence::Set).unwrap();
        let mut buf = [0u8; 32];
        d.read(&mut buf).unwrap();
        assert!(buf[..16].iter().all(|&b| b == 0xFF));
        assert!(buf[16..].iter().all(|&b| b == 0x55));
    }
}
