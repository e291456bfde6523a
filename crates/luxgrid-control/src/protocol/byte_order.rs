//! Per-point byte ordering on the wire

use serde::{Deserialize, Serialize};

/// Order in which color components of a point are sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ByteOrder {
    #[default]
    Rgb,
    Rbg,
    Grb,
    Gbr,
    Brg,
    Bgr,
    Rgbw,
    Grbw,
    Wrgb,
}

impl ByteOrder {
    /// Bytes each point occupies in the payload
    pub fn bytes_per_point(&self) -> usize {
        match self {
            ByteOrder::Rgb
            | ByteOrder::Rbg
            | ByteOrder::Grb
            | ByteOrder::Gbr
            | ByteOrder::Brg
            | ByteOrder::Bgr => 3,
            ByteOrder::Rgbw | ByteOrder::Grbw | ByteOrder::Wrgb => 4,
        }
    }

    /// Label as shown to users
    pub fn label(&self) -> &'static str {
        match self {
            ByteOrder::Rgb => "RGB",
            ByteOrder::Rbg => "RBG",
            ByteOrder::Grb => "GRB",
            ByteOrder::Gbr => "GBR",
            ByteOrder::Brg => "BRG",
            ByteOrder::Bgr => "BGR",
            ByteOrder::Rgbw => "RGBW",
            ByteOrder::Grbw => "GRBW",
            ByteOrder::Wrgb => "WRGB",
        }
    }
}
