//! Distributed Display Protocol addressing
//!
//! DDP packets are self-addressed by a byte offset into the receiver's frame
//! buffer; there is no channel or universe.

use serde::{Deserialize, Serialize};

use super::AddressFields;

/// DDP UDP port
pub const DEFAULT_PORT: u16 = 4048;
/// Data bytes per packet (480 RGB pixels)
pub const MAX_PAYLOAD_BYTES: usize = 1440;

/// DDP output fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DdpConfig {
    /// Byte offset of the first point
    #[serde(default)]
    pub offset: u32,
}

impl DdpConfig {
    pub(crate) fn fields(&self) -> AddressFields {
        AddressFields::Ddp {
            data_offset: self.offset,
        }
    }
}
