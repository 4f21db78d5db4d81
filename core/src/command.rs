//! Command records.
//!
//! Each command declares one static record at its definition site; the
//! start-of-day builder collects them into the command table. The
//! record carries the identity, the entry point, and the help text the
//! shell shows for it.

use crate::error::Result;
use crate::registry::Record;
use crate::shell::ShellContext;

/// Command entry point. `argv[0]` is the command name.
///
/// Result polarity: success or a taxonomy error whose negative code is
/// displayed. Distinct from the frame-service termination convention
/// (0 = keep looping); the two must never be unified.
pub type CommandFn = fn(&mut ShellContext, &[&str]) -> Result<()>;

/// Statically declared command.
pub struct CommandRecord {
    /// Exact name matched against `argv[0]`.
    pub name: &'static str,
    /// One-line description for the command listing.
    pub description: &'static str,
    /// Free-text usage help.
    pub help: &'static str,
    pub func: CommandFn,
}

impl Record for CommandRecord {
    fn key(&self) -> &str {
        self.name
    }
}
