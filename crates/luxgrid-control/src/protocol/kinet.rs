//! KiNET addressing
//!
//! KiNET power supplies expose numbered output ports (1-255), each taking one
//! DMX frame. Version 1 addresses the supply as a whole, version 2 addresses
//! the individual port.

use serde::{Deserialize, Serialize};

use super::{dmx_channel, AddressFields};
use crate::{ControlError, Result};

/// KiNET UDP port
pub const DEFAULT_PORT: u16 = 6038;
/// DMX data bytes per packet
pub const MAX_PAYLOAD_BYTES: usize = 512;
pub const MIN_PORT: u8 = 1;

/// KiNET packet version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KinetVersion {
    #[default]
    V1,
    V2,
}

/// KiNET output fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KinetConfig {
    /// Power supply output port
    pub port: u8,
    #[serde(default)]
    pub channel: u16,
    #[serde(default)]
    pub version: KinetVersion,
}

impl Default for KinetConfig {
    fn default() -> Self {
        Self {
            port: MIN_PORT,
            channel: 0,
            version: KinetVersion::V1,
        }
    }
}

impl KinetConfig {
    pub fn set_port(&mut self, port: u8) -> Result<()> {
        if port < MIN_PORT {
            return Err(ControlError::InvalidParameter(format!(
                "KiNET port {} (must be {}-255)",
                port, MIN_PORT
            )));
        }
        self.port = port;
        Ok(())
    }

    pub fn set_channel(&mut self, channel: u16) -> Result<()> {
        self.channel = dmx_channel(channel)?;
        Ok(())
    }

    pub(crate) fn fields(&self) -> AddressFields {
        AddressFields::Kinet {
            port: self.port,
            dmx_channel: self.channel,
            version: self.version,
        }
    }
}
