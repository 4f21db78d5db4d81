//! Emberboot Network Stack
//!
//! Raw link-layer frame service for the boot loader: polls a network
//! descriptor and dispatches received frames to a priority-ordered set
//! of receivers, with cooperative termination and timeout semantics.
//! No TCP/IP stack lives here; boot-time protocols (ARP, TFTP-style
//! loaders) register receivers instead.

#![no_std]

extern crate alloc;

pub mod arp;
pub mod frame;
pub mod loopback;
pub mod receiver;
pub mod service;
pub mod timeout;
pub mod types;

pub use arp::ArpCache;
pub use frame::{Frame, FramePool, FrameState, FRAME_LENGTH_MAX};
pub use receiver::{FrameReceiver, ReceiverRegistry, Verdict};
pub use service::service;
pub use timeout::TimeoutContext;
pub use types::{EthernetHeader, MacAddress};
