//! Shared boot loader error taxonomy.
//!
//! One error kind per reportable condition. Commands and the frame
//! service surface these as negative integer codes; the codes are part
//! of the external contract and must stay stable.

/// Boot loader error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Malformed argument (bad numeric, non-positive count, ...).
    InvalidParameter,
    /// Region names a driver the registry does not know.
    UnknownDriver,
    /// Command name did not match any registered command.
    UnknownCommand,
    /// Capability not implemented by the resolved driver.
    Unsupported,
    /// Content comparison found a difference. A reported outcome,
    /// not a crash.
    Mismatch,
    /// Persistent store magic mismatch. Degrades to defaults,
    /// never aborts the boot flow.
    Unrecognized,
    /// Unregister of an entry that is not registered.
    NotFound,
    /// A bounded wait or service-loop timeout expired.
    Timeout,
    /// A peripheral failed to respond within its handshake bound.
    HardwareFault,
    /// Driver-level I/O failure.
    Io,
}

impl Error {
    /// Stable negative code for the command/service integer surfaces.
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidParameter => -1,
            Self::UnknownDriver => -2,
            Self::UnknownCommand => -3,
            Self::Unsupported => -4,
            Self::Mismatch => -5,
            Self::Unrecognized => -6,
            Self::NotFound => -7,
            Self::Timeout => -8,
            Self::HardwareFault => -9,
            Self::Io => -10,
        }
    }

    /// Map a negative code back to its error kind.
    ///
    /// Unknown codes collapse to [`Error::Io`] so that foreign negative
    /// results still travel through the taxonomy.
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => Self::InvalidParameter,
            -2 => Self::UnknownDriver,
            -3 => Self::UnknownCommand,
            -4 => Self::Unsupported,
            -5 => Self::Mismatch,
            -6 => Self::Unrecognized,
            -7 => Self::NotFound,
            -8 => Self::Timeout,
            -9 => Self::HardwareFault,
            _ => Self::Io,
        }
    }

    /// Get a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidParameter => "Invalid parameter",
            Self::UnknownDriver => "Unknown driver",
            Self::UnknownCommand => "Unknown command",
            Self::Unsupported => "Operation not supported by driver",
            Self::Mismatch => "Regions differ",
            Self::Unrecognized => "Unrecognized persistent store",
            Self::NotFound => "Entry not registered",
            Self::Timeout => "Operation timed out",
            Self::HardwareFault => "Peripheral handshake failed",
            Self::Io => "I/O error",
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Result type shared across the boot loader crates.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        let all = [
            Error::InvalidParameter,
            Error::UnknownDriver,
            Error::UnknownCommand,
            Error::Unsupported,
            Error::Mismatch,
            Error::Unrecognized,
            Error::NotFound,
            Error::Timeout,
            Error::HardwareFault,
            Error::Io,
        ];
        for e in all {
            assert!(e.code() < 0);
            assert_eq!(Error::from_code(e.code()), e);
        }
    }

    #[test]
    fn test_unknown_code_collapses_to_io() {
        assert_eq!(Error::from_code(-99), Error::Io);
    }
}
