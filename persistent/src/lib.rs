//! Emberboot Persistent Environment
//!
//! Append-only, crash-tolerant environment-variable log store in a
//! reserved nonvolatile region, recovered by linear scan and merged
//! with the compiled-in default-value catalog.

#![no_std]

extern crate alloc;

pub mod catalog;
pub mod record;
pub mod store;

pub use catalog::{Catalog, EnvVar, UNKNOWN_INDEX};
pub use store::{scan, EnvStore, ScanResult};
