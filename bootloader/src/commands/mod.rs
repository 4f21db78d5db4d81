//! Built-in shell commands.
//!
//! Each module declares one `RECORD` at its definition site; `sets`
//! collects them into the command table.

pub mod compare;
pub mod drivers;
pub mod help;
pub mod info;
pub mod printenv;
pub mod setenv;
pub mod version;
