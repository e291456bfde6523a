//! Open Pixel Control addressing
//!
//! OPC frames carry an 8-bit channel and a 16-bit length, so a single message
//! can hold up to 65535 data bytes. OPC is the only protocol that may run over
//! TCP, and its port can be overridden.

use serde::{Deserialize, Serialize};

use super::{AddressFields, Transport};

/// Default OPC server port
pub const DEFAULT_PORT: u16 = 7890;
/// Data bytes per message (16-bit length field)
pub const MAX_PAYLOAD_BYTES: usize = 65535;

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// OPC output fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpcConfig {
    pub channel: u8,
    /// Point offset inside the channel
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub transport: Transport,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for OpcConfig {
    fn default() -> Self {
        Self {
            channel: 0,
            offset: 0,
            transport: Transport::Udp,
            port: DEFAULT_PORT,
        }
    }
}

impl OpcConfig {
    pub(crate) fn fields(&self) -> AddressFields {
        AddressFields::Opc {
            channel: self.channel,
            offset: self.offset,
        }
    }
}
