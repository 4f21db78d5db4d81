//! Ethernet frame types and helpers.
//!
//! # Reference
//! IEEE 802.3

use core::fmt;

pub const ETH_ALEN: usize = 6;
pub const ETH_HLEN: usize = 14;

// Common EtherTypes
pub const ETH_P_IP: u16 = 0x0800;
pub const ETH_P_ARP: u16 = 0x0806;
pub const ETH_P_IPV6: u16 = 0x86DD;

/// MAC address type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddress(pub [u8; ETH_ALEN]);

impl MacAddress {
    pub const BROADCAST: MacAddress = MacAddress([0xFF; ETH_ALEN]);

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

/// IPv4 protocol address, kept as raw octets at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Address(pub [u8; 4]);

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(f, "{}.{}.{}.{}", b[0], b[1], b[2], b[3])
    }
}

/// Parsed Ethernet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader {
    pub dest: MacAddress,
    pub src: MacAddress,
    pub ethertype: u16,
}

impl EthernetHeader {
    /// Parse the 14-byte header off the front of a frame.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < ETH_HLEN {
            return None;
        }
        let mut dest = [0u8; ETH_ALEN];
        let mut src = [0u8; ETH_ALEN];
        dest.copy_from_slice(&bytes[0..6]);
        src.copy_from_slice(&bytes[6..12]);
        Some(Self {
            dest: MacAddress(dest),
            src: MacAddress(src),
            ethertype: u16::from_be_bytes([bytes[12], bytes[13]]),
        })
    }
}

/// ARP packet body (Ethernet/IPv4 flavor only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpPacket {
    pub operation: u16,
    pub sender_hw: MacAddress,
    pub sender_proto: Ipv4Address,
    pub target_hw: MacAddress,
    pub target_proto: Ipv4Address,
}

pub const ARP_OP_REQUEST: u16 = 1;
pub const ARP_OP_REPLY: u16 = 2;

impl ArpPacket {
    /// Parse an ARP body (the bytes after the Ethernet header).
    /// Non-Ethernet/IPv4 flavors are ignored, not errors.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 28 {
            return None;
        }
        let htype = u16::from_be_bytes([bytes[0], bytes[1]]);
        let ptype = u16::from_be_bytes([bytes[2], bytes[3]]);
        let hlen = bytes[4];
        let plen = bytes[5];
        if htype != 1 || ptype != ETH_P_IP || hlen as usize != ETH_ALEN || plen != 4 {
            return None;
        }
        let mut sender_hw = [0u8; ETH_ALEN];
        let mut target_hw = [0u8; ETH_ALEN];
        let mut sender_proto = [0u8; 4];
        let mut target_proto = [0u8; 4];
        sender_hw.copy_from_slice(&bytes[8..14]);
        sender_proto.copy_from_slice(&bytes[14..18]);
        target_hw.copy_from_slice(&bytes[18..24]);
        target_proto.copy_from_slice(&bytes[24..28]);
        Some(Self {
            operation: u16::from_be_bytes([bytes[6], bytes[7]]),
            sender_hw: MacAddress(sender_hw),
            sender_proto: Ipv4Address(sender_proto),
            target_hw: MacAddress(target_hw),
            target_proto: Ipv4Address(target_proto),
        })
    }
}
