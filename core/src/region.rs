//! Region address parser.
//!
//! Parses region strings in the format: `[driver:]start[k|K][+length[k|K]]`
//!
//! # Examples
//!
//! ```ignore
//! use ember_core::RegionSpec;
//!
//! let r = RegionSpec::parse("nor:16k+32k", "ram").unwrap();
//! assert_eq!(r.driver_name, "nor");
//! assert_eq!(r.start, 16384);
//! assert_eq!(r.length, 32768);
//! ```

use alloc::string::{String, ToString};

use crate::error::{Error, Result};

/// Parsed region address: a driver name plus a window into its
/// address space. `length == 0` means "to end of device".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSpec {
    /// Name of the driver that owns the address space.
    pub driver_name: String,
    /// Byte offset of the window.
    pub start: u64,
    /// Byte length of the window, 0 for "to end of device".
    pub length: u64,
}

impl RegionSpec {
    /// Parse a region string.
    ///
    /// Grammar: `["driver" ":"] start ["k"|"K"] ["+" length ["k"|"K"]]`.
    /// Numbers are decimal only; a `k`/`K` suffix multiplies by 1024.
    /// A missing driver prefix falls back to `default_driver`.
    ///
    /// Unknown driver names are accepted here; they surface later as
    /// `UnknownDriver` when the region is resolved against the registry.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` for malformed numerics or
    /// trailing garbage.
    pub fn parse(spec: &str, default_driver: &str) -> Result<Self> {
        let (driver, rest) = match spec.find(':') {
            Some(idx) => (&spec[..idx], &spec[idx + 1..]),
            None => (default_driver, spec),
        };
        if driver.is_empty() {
            return Err(Error::InvalidParameter);
        }

        let (start, rest) = parse_number(rest)?;

        let length = match rest.strip_prefix('+') {
            Some(len_part) => {
                let (length, rest) = parse_number(len_part)?;
                if !rest.is_empty() {
                    return Err(Error::InvalidParameter);
                }
                length
            }
            None => {
                if !rest.is_empty() {
                    return Err(Error::InvalidParameter);
                }
                0
            }
        };

        Ok(RegionSpec {
            driver_name: driver.to_string(),
            start,
            length,
        })
    }
}

impl core::fmt::Display for RegionSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}+{}", self.driver_name, self.start, self.length)
    }
}

/// Parse a decimal integer with an optional `k`/`K` multiplier.
/// Returns the value and the unconsumed remainder of the string.
fn parse_number(s: &str) -> Result<(u64, &str)> {
    let digits_end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if digits_end == 0 {
        return Err(Error::InvalidParameter);
    }

    let value: u64 = s[..digits_end]
        .parse()
        .map_err(|_| Error::InvalidParameter)?;

    let rest = &s[digits_end..];
    if rest.starts_with('k') || rest.starts_with('K') {
        let value = value.checked_mul(1024).ok_or(Error::InvalidParameter)?;
        Ok((value, &rest[1..]))
    } else {
        Ok((value, rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Basic Parsing ====================

    #[test]
    fn test_parse_driver_start_length() {
        let r = RegionSpec::parse("nor:16k+32k", "ram").unwrap();
        assert_eq!(r.driver_name, "nor");
        assert_eq!(r.start, 16384);
        assert_eq!(r.length, 32768);
    }

    #[test]
    fn test_parse_default_driver() {
        let r = RegionSpec::parse("4096", "nor").unwrap();
        assert_eq!(r.driver_name, "nor");
        assert_eq!(r.start, 4096);
        assert_eq!(r.length, 0);
    }

    #[test]
    fn test_parse_start_only() {
        let r = RegionSpec::parse("ram:0", "nor").unwrap();
        assert_eq!(r.driver_name, "ram");
        assert_eq!(r.start, 0);
        assert_eq!(r.length, 0);
    }

    #[test]
    fn test_parse_plain_length() {
        let r = RegionSpec::parse("nor:64+128", "ram").unwrap();
        assert_eq!(r.start, 64);
        assert_eq!(r.length, 128);
    }

    // ==================== Multipliers ====================

    #[test]
    fn test_parse_uppercase_multiplier() {
        let r = RegionSpec::parse("nor:1K+2K", "ram").unwrap();
        assert_eq!(r.start, 1024);
        assert_eq!(r.length, 2048);
    }

    #[test]
    fn test_parse_mixed_multiplier() {
        let r = RegionSpec::parse("nor:16k+512", "ram").unwrap();
        assert_eq!(r.start, 16384);
        assert_eq!(r.length, 512);
    }

    // ==================== Unknown Drivers ====================

    #[test]
    fn test_parse_accepts_unknown_driver_name() {
        // Registry misses surface at resolve time, not here.
        let r = RegionSpec::parse("bogus:0+1k", "ram").unwrap();
        assert_eq!(r.driver_name, "bogus");
    }

    // ==================== Error Cases ====================

    #[test]
    fn test_parse_empty_string() {
        assert_eq!(
            RegionSpec::parse("", "ram"),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn test_parse_missing_start() {
        assert_eq!(
            RegionSpec::parse("nor:", "ram"),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn test_parse_missing_length_after_plus() {
        assert_eq!(
            RegionSpec::parse("nor:16k+", "ram"),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn test_parse_rejects_hex() {
        // Explicit limitation: decimal only.
        assert_eq!(
            RegionSpec::parse("nor:0x100", "ram"),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn test_parse_trailing_garbage() {
        assert_eq!(
            RegionSpec::parse("nor:16kk", "ram"),
            Err(Error::InvalidParameter)
        );
        assert_eq!(
            RegionSpec::parse("nor:16k+32k junk", "ram"),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn test_parse_empty_driver_prefix() {
        assert_eq!(
            RegionSpec::parse(":16k", "ram"),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn test_parse_overflow() {
        assert_eq!(
            RegionSpec::parse("nor:99999999999999999999", "ram"),
            Err(Error::InvalidParameter)
        );
        // 2^60 * 1024 overflows u64
        assert_eq!(
            RegionSpec::parse("nor:1152921504606846976k", "ram"),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn test_display_round_trip() {
        let r = RegionSpec::parse("nor:16k+32k", "ram").unwrap();
        let again = RegionSpec::parse(&alloc::format!("{}", r), "ram").unwrap();
        assert_eq!(r, again);
    }
}
