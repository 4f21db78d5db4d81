//! Address-resolution cache and receiver.
//!
//! Successful receipt of a frame from a new hardware address feeds the
//! cache, so later transmits can resolve a protocol address without a
//! round trip. A just-learned entry is only overwritten when the caller
//! forces it (reconfiguration paths do).

use alloc::sync::Arc;

use log::debug;
use spin::Mutex;

use ember_core::time;
use ember_core::Descriptor;

use crate::frame::Frame;
use crate::receiver::{FrameReceiver, Verdict};
use crate::types::{ArpPacket, EthernetHeader, Ipv4Address, MacAddress, ETH_HLEN, ETH_P_ARP};

const CACHE_SLOTS: usize = 8;

/// Entries younger than this are "fresh" and only replaced by force.
const FRESH_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    hw: MacAddress,
    proto: Ipv4Address,
    learned_ms: u64,
}

/// Fixed-slot protocol-to-hardware address cache.
pub struct ArpCache {
    entries: Mutex<[Option<CacheEntry>; CACHE_SLOTS]>,
}

impl ArpCache {
    pub const fn new() -> Self {
        Self {
            entries: Mutex::new([None; CACHE_SLOTS]),
        }
    }

    /// Upsert a mapping at tick `now_ms`.
    ///
    /// An existing mapping for the same protocol address is overwritten
    /// when it has gone stale, or unconditionally with `force`. A new
    /// mapping takes a free slot, else evicts the oldest entry.
    pub fn update(&self, hw: MacAddress, proto: Ipv4Address, force: bool, now_ms: u64) {
        let mut entries = self.entries.lock();

        if let Some(entry) = entries
            .iter_mut()
            .flatten()
            .find(|e| e.proto == proto)
        {
            let fresh = now_ms.wrapping_sub(entry.learned_ms) < FRESH_MS;
            if fresh && !force && entry.hw != hw {
                return;
            }
            entry.hw = hw;
            entry.learned_ms = now_ms;
            return;
        }

        let slot = match entries.iter().position(Option::is_none) {
            Some(free) => free,
            None => {
                // Evict the oldest mapping.
                let mut oldest = 0;
                for (i, e) in entries.iter().enumerate() {
                    if let (Some(e), Some(o)) = (e, &entries[oldest]) {
                        if e.learned_ms < o.learned_ms {
                            oldest = i;
                        }
                    }
                }
                oldest
            }
        };
        entries[slot] = Some(CacheEntry {
            hw,
            proto,
            learned_ms: now_ms,
        });
        debug!("arp cache: {} -> {}", proto, hw);
    }

    pub fn lookup(&self, proto: Ipv4Address) -> Option<MacAddress> {
        self.entries
            .lock()
            .iter()
            .flatten()
            .find(|e| e.proto == proto)
            .map(|e| e.hw)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Receiver that learns sender mappings from ARP traffic. Registered
/// ahead of the generic consumers so resolution state is current before
/// anything else looks at a frame.
pub struct ArpReceiver {
    cache: Arc<ArpCache>,
}

impl ArpReceiver {
    pub fn new(cache: Arc<ArpCache>) -> Self {
        Self { cache }
    }
}

impl FrameReceiver for ArpReceiver {
    fn receive(&self, _dev: &mut Descriptor, frame: &Frame) -> Verdict {
        let bytes = frame.bytes();
        let header = match EthernetHeader::parse(bytes) {
            Some(h) => h,
            None => return Verdict::Pass,
        };
        if header.ethertype != ETH_P_ARP {
            return Verdict::Pass;
        }
        if let Some(arp) = ArpPacket::parse(&bytes[ETH_HLEN..]) {
            self.cache
                .update(arp.sender_hw, arp.sender_proto, false, time::now_ms());
        }
        Verdict::Consumed
    }
}
