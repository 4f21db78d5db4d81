//! Board configuration.
//!
//! On real hardware these constants come from the board port. The
//! hosted build stands in a RAM-backed flash image and a loopback
//! frame device so the whole shell is exercisable off-target.

use ember_persistent::EnvVar;

/// Driver used when a region string carries no explicit driver name.
pub const DEFAULT_DRIVER: &str = "nor";

/// Backing size of the simulated NOR part.
pub const NOR_LENGTH: usize = 64 * 1024;

/// Region holding the environment log.
pub const ENV_REGION: &str = "nor:16k+8k";

/// Frame device the service loop polls.
pub const NET_DRIVER: &str = "eth0";

/// Priority band for the address-resolution receiver. It runs ahead of
/// generic consumers so the cache is current before they look at a
/// frame.
pub const ARP_PRIORITY: i32 = 0;

/// Recognized environment variables. Table position is the on-flash
/// key index, so this table is append-only.
pub static CATALOG: &[EnvVar] = &[
    EnvVar {
        key: "bootaddr",
        default_value: "32768",
        description: "kernel load address",
    },
    EnvVar {
        key: "cmdline",
        default_value: "console=ttyAM0",
        description: "kernel command line",
    },
    EnvVar {
        key: "autoboot",
        default_value: "5",
        description: "autoboot delay in seconds",
    },
    EnvVar {
        key: "ethaddr",
        default_value: "02:00:00:00:00:01",
        description: "MAC address of the frame device",
    },
    EnvVar {
        key: "ipaddr",
        default_value: "10.0.0.2",
        description: "local IP address",
    },
    EnvVar {
        key: "serverip",
        default_value: "10.0.0.1",
        description: "boot server IP address",
    },
];
