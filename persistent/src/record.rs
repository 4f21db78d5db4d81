//! Environment log wire format.
//!
//! The log region starts with a two-byte magic. `0xFF 0xFF` is an
//! empty, never-written store; any other mismatch is an unrecognized
//! store. Records follow back to back:
//!
//! ```text
//! flags:u8                 bit7 = record carries a value
//!                          bits6..0 = key index, 0x7F = unknown key
//! key:NUL-string           only on the first occurrence of that index
//! value:NUL-string         retained as current only when bit7 is set
//! ```
//!
//! The stream terminates at a `0xFF` byte read where flags were
//! expected; erased flash provides the terminator for free.

use alloc::vec::Vec;

/// Store signature at offset 0.
pub const ENV_MAGIC: [u8; 2] = [0x45, 0x62];

/// Erased-flash byte; doubles as the stream terminator.
pub const END_MARKER: u8 = 0xFF;

/// Flag bit: this record's value becomes current.
pub const FLAG_HAS_VALUE: u8 = 0x80;

/// Mask extracting the key index from the flag byte.
pub const INDEX_MASK: u8 = 0x7F;

/// Read a NUL-terminated UTF-8 string at `pos`. Returns the string and
/// the position just past its terminator, or `None` when the bytes are
/// truncated or not valid UTF-8.
pub fn read_cstr(bytes: &[u8], pos: usize) -> Option<(&str, usize)> {
    let rest = bytes.get(pos..)?;
    let nul = rest.iter().position(|&b| b == 0)?;
    let s = core::str::from_utf8(&rest[..nul]).ok()?;
    Some((s, pos + nul + 1))
}

/// Append one record's bytes to `out`.
///
/// `key` is written only when this is the first record for the index.
pub fn encode_record(out: &mut Vec<u8>, index: u8, key: Option<&str>, value: &str) {
    out.push((index & INDEX_MASK) | FLAG_HAS_VALUE);
    if let Some(key) = key {
        out.extend_from_slice(key.as_bytes());
        out.push(0);
    }
    out.extend_from_slice(value.as_bytes());
    out.push(0);
}

/// A key or value may not contain the NUL the format uses as a string
/// terminator.
pub fn valid_string(s: &str) -> bool {
    !s.bytes().any(|b| b == 0)
}

/// Convenience for building log images in tests and tools.
pub fn encode_store(records: &[(u8, Option<&str>, &str)]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&ENV_MAGIC);
    for (index, key, value) in records {
        encode_record(&mut out, *index, *key, value);
    }
    out.push(END_MARKER);
    out
}
