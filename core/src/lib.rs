//! Emberboot Core Library
//!
//! Second-stage boot loader core: the descriptor/driver I/O abstraction
//! with its region-addressing grammar, the generic registry mechanism,
//! and the command shell built on top of them.
//! Designed to be no_std compatible.

#![no_std]
#![allow(clippy::new_without_default)]

extern crate alloc;

pub mod command;
pub mod console;
pub mod descriptor;
pub mod driver;
pub mod drivers;
pub mod error;
pub mod region;
pub mod registry;
pub mod service;
pub mod shell;
pub mod time;

pub use descriptor::{Descriptor, Whence};
pub use driver::{Capabilities, Driver, DriverRegistry};
pub use error::{Error, Result};
pub use region::RegionSpec;
pub use registry::{Record, Registry, RegistryBuilder};
pub use service::ServiceRecord;
pub use shell::{Environment, Shell, ShellContext};
