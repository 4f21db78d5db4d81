//! Emberboot Loader
//!
//! The boot loader proper: board configuration, the built-in commands,
//! the startup services, and the table assembly that wires them to the
//! core shell.

#![no_std]

extern crate alloc;

pub mod commands;
pub mod config;
pub mod services;
pub mod sets;

pub use sets::{boot, command_registry, service_registry};
