//! Startup service hooks.
//!
//! Services are the second instance of the registry pattern: each
//! subsystem contributes an init hook (run once, in table order, during
//! boot) and an optional report hook behind the `info` command.

use log::{info, warn};

use crate::error::Result;
use crate::registry::{Record, Registry};
use crate::shell::ShellContext;

pub type ServiceInitFn = fn(&mut ShellContext) -> Result<()>;
pub type ServiceReportFn = fn(&mut ShellContext);

/// Statically declared startup hook.
pub struct ServiceRecord {
    pub name: &'static str,
    pub init: ServiceInitFn,
    pub report: Option<ServiceReportFn>,
}

impl Record for ServiceRecord {
    fn key(&self) -> &str {
        self.name
    }
}

/// Run every init hook in table order. A failing service is logged and
/// skipped; one broken subsystem never stops the boot sequence.
pub fn run_init(services: &Registry<ServiceRecord>, ctx: &mut ShellContext) {
    for service in services.iter() {
        match (service.init)(ctx) {
            Ok(()) => info!("service {} up", service.name),
            Err(e) => warn!("service {} failed: {}", service.name, e),
        }
    }
}
