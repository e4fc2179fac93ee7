use core::net::Ipv4Addr;

use crate::transport::{ControlServer, Link};

/// Address the board answers on out of the box
pub const DEFAULT_HOST: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 107);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootConfig {
    pub host: Ipv4Addr,
    /// Talk raw UDP/SRPv0 instead of RSSI/SRPv3
    pub backdoor: bool,
    pub control_server: Option<ControlServer>,
    pub poll_enabled: bool,
    /// Read every readable field once on start
    pub init_read: bool,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            backdoor: true,
            control_server: Some(ControlServer::WILDCARD),
            poll_enabled: true,
            init_read: true,
        }
    }
}

impl RootConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: Ipv4Addr) -> Self {
        self.host = host;
        self
    }

    pub fn with_backdoor(mut self, backdoor: bool) -> Self {
        self.backdoor = backdoor;
        self
    }

    pub fn with_control_server(mut self, control_server: Option<ControlServer>) -> Self {
        self.control_server = control_server;
        self
    }

    pub fn with_polling(mut self, poll_enabled: bool) -> Self {
        self.poll_enabled = poll_enabled;
        self
    }

    pub fn with_init_read(mut self, init_read: bool) -> Self {
        self.init_read = init_read;
        self
    }

    pub fn link(&self) -> Link {
        if self.backdoor {
            Link::BACKDOOR
        } else {
            Link::RSSI
        }
    }
}
