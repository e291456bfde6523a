//! Art-Net addressing
//!
//! Art-Net carries DMX512 frames over UDP.
//! - One universe per packet (0-32767)
//! - 512 data bytes per universe
//! - Optional sequence numbering

use serde::{Deserialize, Serialize};

use super::{dmx_channel, AddressFields};
use crate::{ControlError, Result};

/// Art-Net UDP port
pub const DEFAULT_PORT: u16 = 6454;
/// DMX data bytes per packet
pub const MAX_PAYLOAD_BYTES: usize = 512;
/// Highest Art-Net universe (15-bit port address)
pub const MAX_UNIVERSE: u16 = 32767;

/// Art-Net output fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtNetConfig {
    pub universe: u16,
    /// Offset of the first point inside the DMX frame
    #[serde(default)]
    pub channel: u16,
    #[serde(default)]
    pub sequence: bool,
}

impl Default for ArtNetConfig {
    fn default() -> Self {
        Self {
            universe: 0,
            channel: 0,
            sequence: false,
        }
    }
}

impl ArtNetConfig {
    pub fn set_universe(&mut self, universe: u16) -> Result<()> {
        if universe > MAX_UNIVERSE {
            return Err(ControlError::InvalidParameter(format!(
                "Art-Net universe {} (must be 0-{})",
                universe, MAX_UNIVERSE
            )));
        }
        self.universe = universe;
        Ok(())
    }

    pub fn set_channel(&mut self, channel: u16) -> Result<()> {
        self.channel = dmx_channel(channel)?;
        Ok(())
    }

    pub(crate) fn fields(&self) -> AddressFields {
        AddressFields::ArtNet {
            universe: self.universe,
            dmx_channel: self.channel,
            sequence: self.sequence,
        }
    }
}
