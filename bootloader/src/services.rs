//! Startup services.
//!
//! Each subsystem that needs start-of-day setup contributes a service
//! record; `info` walks the same table for the report hooks.

use alloc::boxed::Box;
use alloc::sync::Arc;

use log::info;
use spin::Lazy;

use ember_core::cprintln;
use ember_core::error::Result;
use ember_core::region::RegionSpec;
use ember_core::service::ServiceRecord;
use ember_core::shell::ShellContext;
use ember_network::arp::ArpReceiver;
use ember_network::{ArpCache, ReceiverRegistry};
use ember_persistent::{Catalog, EnvStore};

use crate::config;

/// Receivers consulted by the frame service loop.
pub static RECEIVERS: ReceiverRegistry = ReceiverRegistry::new();

/// Address-resolution cache shared by the receiver and diagnostics.
pub static ARP_CACHE: Lazy<Arc<ArpCache>> = Lazy::new(|| Arc::new(ArpCache::new()));

pub const ENV_SERVICE: ServiceRecord = ServiceRecord {
    name: "env",
    init: env_init,
    report: Some(env_report),
};

pub const NET_SERVICE: ServiceRecord = ServiceRecord {
    name: "net",
    init: net_init,
    report: Some(net_report),
};

/// Recover the environment log from flash and attach it to the shell.
/// An unrecognized store still attaches; the catalog defaults carry it.
fn env_init(ctx: &mut ShellContext) -> Result<()> {
    let region = RegionSpec::parse(config::ENV_REGION, config::DEFAULT_DRIVER)?;
    let store = EnvStore::open(ctx.drivers.clone(), region, Catalog::new(config::CATALOG))?;
    info!("environment log at {}", config::ENV_REGION);
    ctx.env = Some(Box::new(store));
    Ok(())
}

fn env_report(ctx: &mut ShellContext) {
    match &ctx.env {
        Some(_) => cprintln!(
            "env: {} ({} recognized keys)",
            config::ENV_REGION,
            config::CATALOG.len()
        ),
        None => cprintln!("env: unavailable"),
    }
}

/// Put the address-resolution receiver on the wire.
fn net_init(_ctx: &mut ShellContext) -> Result<()> {
    RECEIVERS.register(
        config::ARP_PRIORITY,
        Arc::new(ArpReceiver::new(ARP_CACHE.clone())),
    );
    Ok(())
}

fn net_report(_ctx: &mut ShellContext) {
    cprintln!(
        "net: {}, {} receiver(s), {} arp entries",
        config::NET_DRIVER,
        RECEIVERS.len(),
        ARP_CACHE.len()
    );
}
