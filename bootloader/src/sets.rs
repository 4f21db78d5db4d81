//! Table assembly.
//!
//! Every command and service record is submitted here, once, in a
//! pinned order. The order is the tie-break for table walks (`help`
//! listings, service init) and tests assert it rather than leave it
//! implementation-defined.

use alloc::sync::Arc;

use ember_core::command::CommandRecord;
use ember_core::driver::Driver;
use ember_core::drivers::ram::RamDriver;
use ember_core::registry::{Registry, RegistryBuilder};
use ember_core::service::{self, ServiceRecord};
use ember_core::shell::{Shell, ShellContext};
use ember_network::loopback::LoopbackDriver;

use crate::commands;
use crate::config;
use crate::services;

pub fn command_registry() -> Registry<CommandRecord> {
    RegistryBuilder::new()
        .add(commands::version::RECORD)
        .add(commands::help::RECORD)
        .add(commands::info::RECORD)
        .add(commands::drivers::RECORD)
        .add(commands::compare::RECORD)
        .add(commands::printenv::RECORD)
        .add(commands::setenv::RECORD)
        .build()
}

pub fn service_registry() -> Registry<ServiceRecord> {
    RegistryBuilder::new()
        .add(services::ENV_SERVICE)
        .add(services::NET_SERVICE)
        .build()
}

/// The hosted board's driver table: a RAM-backed flash stand-in and a
/// loopback frame device.
pub fn driver_registry() -> ember_core::DriverRegistry {
    let nor: Arc<dyn Driver> = Arc::new(
        RamDriver::new("nor", config::NOR_LENGTH).with_description("simulated NOR flash"),
    );
    let eth: Arc<dyn Driver> = Arc::new(LoopbackDriver::new(config::NET_DRIVER));
    RegistryBuilder::new().add(nor).add(eth).build()
}

/// Assemble the hosted board and bring it up: drivers, tables, context,
/// and one pass over the service init hooks.
pub fn boot() -> (Shell, ShellContext) {
    let drivers = Arc::new(driver_registry());
    let commands = Arc::new(command_registry());
    let services = Arc::new(service_registry());

    let mut ctx = ShellContext::new(
        drivers,
        services.clone(),
        commands.clone(),
        config::DEFAULT_DRIVER,
    );
    service::run_init(&services, &mut ctx);

    (Shell::new(commands), ctx)
}
