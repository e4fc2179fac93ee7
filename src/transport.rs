//! Transport selection.
//!
//! The UDP, RSSI and SRP stacks live outside this crate. What is fixed here is
//! which of them the firmware expects on which port, and the [`MemoryBus`]
//! seam through which every register access leaves the crate.

use core::fmt::Debug;
use core::net::Ipv4Addr;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Raw UDP port served by the firmware's SRPv0 backdoor
pub const BACKDOOR_UDP_PORT: u16 = 8192;

/// UDP port of the RSSI-packetized register channel
pub const RSSI_UDP_PORT: u16 = 8193;

/// Packetizer version spoken on the RSSI channel
pub const RSSI_PACKETIZER_VERSION: u8 = 1;

/// AXI stream destination carrying SRPv3 register traffic
pub const REGISTER_TDEST: u8 = 0x0;

#[derive(Debug, Clone, Copy, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SrpVersion {
    V0 = 0,
    V3 = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Link {
    /// Raw UDP straight into the SRPv0 engine
    Backdoor { port: u16, jumbo: bool },
    /// RSSI reliability layer and packetizer, SRPv3 on stream `tdest`
    Rssi {
        port: u16,
        packetizer_version: u8,
        jumbo: bool,
        tdest: u8,
    },
}

impl Link {
    pub const BACKDOOR: Link = Link::Backdoor {
        port: BACKDOOR_UDP_PORT,
        jumbo: false,
    };

    pub const RSSI: Link = Link::Rssi {
        port: RSSI_UDP_PORT,
        packetizer_version: RSSI_PACKETIZER_VERSION,
        jumbo: false,
        tdest: REGISTER_TDEST,
    };

    pub fn port(&self) -> u16 {
        match self {
            Link::Backdoor { port, .. } | Link::Rssi { port, .. } => *port,
        }
    }

    pub fn srp_version(&self) -> SrpVersion {
        match self {
            Link::Backdoor { .. } => SrpVersion::V0,
            Link::Rssi { .. } => SrpVersion::V3,
        }
    }

    /// Stream destination, only meaningful on the packetized link
    pub fn tdest(&self) -> Option<u8> {
        match self {
            Link::Backdoor { .. } => None,
            Link::Rssi { tdest, .. } => Some(*tdest),
        }
    }
}

/// Pub/sub control interface for external introspection tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlServer {
    pub address: Ipv4Addr,
    /// 0 lets the server pick a free port
    pub port: u16,
}

impl ControlServer {
    pub const WILDCARD: ControlServer = ControlServer {
        address: Ipv4Addr::UNSPECIFIED,
        port: 0,
    };
}

impl Default for ControlServer {
    fn default() -> Self {
        Self::WILDCARD
    }
}

/// Block access to the FPGA address space.
///
/// Addresses are absolute. Callers in this crate only ever issue accesses that
/// start on a 32-bit boundary and span a whole number of words.
#[cfg_attr(not(feature = "async"), maybe_async::maybe_async)]
pub trait MemoryBus {
    type Error: Debug;

    async fn read(&mut self, address: u64, data: &mut [u8]) -> Result<(), Self::Error>;

    async fn write(&mut self, address: u64, data: &[u8]) -> Result<(), Self::Error>;
}

/// A bus that knows how to open itself over a [`Link`]
#[cfg_attr(not(feature = "async"), maybe_async::maybe_async)]
pub trait Connect: MemoryBus + Sized {
    async fn connect(host: Ipv4Addr, link: Link) -> Result<Self, Self::Error>;
}
