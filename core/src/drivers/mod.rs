//! Built-in driver implementations.

pub mod ram;

pub use ram::RamDriver;
