//! sACN (E1.31) addressing
//!
//! Streaming ACN sends DMX512 universes over UDP, usually multicast.
//! - Universes 1-63999
//! - Per-source priority 0-200

use serde::{Deserialize, Serialize};

use super::{dmx_channel, AddressFields};
use crate::{ControlError, Result};

/// E1.31 UDP port
pub const DEFAULT_PORT: u16 = 5568;
/// DMX data bytes per packet
pub const MAX_PAYLOAD_BYTES: usize = 512;
pub const MIN_UNIVERSE: u16 = 1;
pub const MAX_UNIVERSE: u16 = 63999;
pub const DEFAULT_PRIORITY: u8 = 100;
pub const MAX_PRIORITY: u8 = 200;

fn default_priority() -> u8 {
    DEFAULT_PRIORITY
}

/// sACN output fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SacnConfig {
    pub universe: u16,
    #[serde(default)]
    pub channel: u16,
    #[serde(default = "default_priority")]
    pub priority: u8,
}

impl Default for SacnConfig {
    fn default() -> Self {
        Self {
            universe: MIN_UNIVERSE,
            channel: 0,
            priority: DEFAULT_PRIORITY,
        }
    }
}

impl SacnConfig {
    pub fn set_universe(&mut self, universe: u16) -> Result<()> {
        if !(MIN_UNIVERSE..=MAX_UNIVERSE).contains(&universe) {
            return Err(ControlError::InvalidParameter(format!(
                "sACN universe {} (must be {}-{})",
                universe, MIN_UNIVERSE, MAX_UNIVERSE
            )));
        }
        self.universe = universe;
        Ok(())
    }

    pub fn set_channel(&mut self, channel: u16) -> Result<()> {
        self.channel = dmx_channel(channel)?;
        Ok(())
    }

    pub fn set_priority(&mut self, priority: u8) -> Result<()> {
        if priority > MAX_PRIORITY {
            return Err(ControlError::InvalidParameter(format!(
                "sACN priority {} (must be 0-{})",
                priority, MAX_PRIORITY
            )));
        }
        self.priority = priority;
        Ok(())
    }

    pub(crate) fn fields(&self) -> AddressFields {
        AddressFields::Sacn {
            universe: self.universe,
            dmx_channel: self.channel,
            priority: self.priority,
        }
    }
}
