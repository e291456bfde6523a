//! Protocol addressing
//!
//! The protocol selection of a fixture is a tagged union: every variant carries
//! only the fields its wire protocol understands, so a universe on a DDP output
//! or a priority on Art-Net cannot be expressed.
//!
//! | Protocol | Port | Channel concept | Payload |
//! |----------|------|-----------------|---------|
//! | Art-Net  | 6454 | universe        | 512     |
//! | sACN     | 5568 | universe        | 512     |
//! | OPC      | 7890 | OPC channel     | 65535   |
//! | DDP      | 4048 | none (offset)   | 1440    |
//! | KiNET    | 6038 | KiNET port      | 512     |
//!
//! [`resolve_address`] turns a selection into the normalized
//! [`ResolvedAddress`] the splitter and assembler work with.

pub mod artnet;
pub mod byte_order;
pub mod ddp;
pub mod kinet;
pub mod opc;
pub mod sacn;

use serde::{Deserialize, Serialize};

use luxgrid_core::{Tier, Tiered};

use crate::{ControlError, Result};

pub use artnet::ArtNetConfig;
pub use byte_order::ByteOrder;
pub use ddp::DdpConfig;
pub use kinet::{KinetConfig, KinetVersion};
pub use opc::OpcConfig;
pub use sacn::SacnConfig;

/// Highest DMX channel offset inside a 512-slot frame
pub const MAX_DMX_CHANNEL: u16 = 511;
/// Default points per packet when splitting (one full RGB universe)
pub const DEFAULT_POINTS_PER_PACKET: u32 = 170;
/// Upper bound for points per packet (one full RGB OPC message)
pub const MAX_POINTS_PER_PACKET: u32 = 21845;
/// Host used until the user picks one
pub const DEFAULT_HOST: &str = "127.0.0.1";

pub(crate) fn dmx_channel(channel: u16) -> Result<u16> {
    if channel > MAX_DMX_CHANNEL {
        return Err(ControlError::InvalidParameter(format!(
            "DMX channel {} (must be 0-{})",
            channel, MAX_DMX_CHANNEL
        )));
    }
    Ok(channel)
}

/// Network transport of an output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Udp,
    Tcp,
}

/// Protocol identity without its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolKind {
    None,
    ArtNet,
    Sacn,
    Opc,
    Ddp,
    Kinet,
}

impl ProtocolKind {
    /// Selection of this protocol with its default fields
    pub fn default_selection(&self) -> ProtocolSelection {
        match self {
            ProtocolKind::None => ProtocolSelection::None,
            ProtocolKind::ArtNet => ProtocolSelection::ArtNet(ArtNetConfig::default()),
            ProtocolKind::Sacn => ProtocolSelection::Sacn(SacnConfig::default()),
            ProtocolKind::Opc => ProtocolSelection::Opc(OpcConfig::default()),
            ProtocolKind::Ddp => ProtocolSelection::Ddp(DdpConfig::default()),
            ProtocolKind::Kinet => ProtocolSelection::Kinet(KinetConfig::default()),
        }
    }

    /// Well-known port of the protocol
    pub fn default_port(&self) -> Option<u16> {
        match self {
            ProtocolKind::None => None,
            ProtocolKind::ArtNet => Some(artnet::DEFAULT_PORT),
            ProtocolKind::Sacn => Some(sacn::DEFAULT_PORT),
            ProtocolKind::Opc => Some(opc::DEFAULT_PORT),
            ProtocolKind::Ddp => Some(ddp::DEFAULT_PORT),
            ProtocolKind::Kinet => Some(kinet::DEFAULT_PORT),
        }
    }

    /// Data bytes a single packet can carry
    pub fn max_payload_bytes(&self) -> usize {
        match self {
            ProtocolKind::None => 0,
            ProtocolKind::ArtNet => artnet::MAX_PAYLOAD_BYTES,
            ProtocolKind::Sacn => sacn::MAX_PAYLOAD_BYTES,
            ProtocolKind::Opc => opc::MAX_PAYLOAD_BYTES,
            ProtocolKind::Ddp => ddp::MAX_PAYLOAD_BYTES,
            ProtocolKind::Kinet => kinet::MAX_PAYLOAD_BYTES,
        }
    }

    /// Points a single packet can carry with the given byte order
    pub fn capacity(&self, byte_order: ByteOrder) -> usize {
        self.max_payload_bytes() / byte_order.bytes_per_point()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProtocolKind::None => "none",
            ProtocolKind::ArtNet => "artnet",
            ProtocolKind::Sacn => "sacn",
            ProtocolKind::Opc => "opc",
            ProtocolKind::Ddp => "ddp",
            ProtocolKind::Kinet => "kinet",
        }
    }
}

/// Active protocol and its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolSelection {
    #[default]
    None,
    ArtNet(ArtNetConfig),
    Sacn(SacnConfig),
    Opc(OpcConfig),
    Ddp(DdpConfig),
    Kinet(KinetConfig),
}

impl ProtocolSelection {
    pub fn kind(&self) -> ProtocolKind {
        match self {
            ProtocolSelection::None => ProtocolKind::None,
            ProtocolSelection::ArtNet(_) => ProtocolKind::ArtNet,
            ProtocolSelection::Sacn(_) => ProtocolKind::Sacn,
            ProtocolSelection::Opc(_) => ProtocolKind::Opc,
            ProtocolSelection::Ddp(_) => ProtocolKind::Ddp,
            ProtocolSelection::Kinet(_) => ProtocolKind::Kinet,
        }
    }

    /// Apply a protocol field; fails if the active protocol has no such field
    fn apply(&mut self, param: &OutputParam) -> Result<()> {
        match (self, param) {
            (ProtocolSelection::ArtNet(c), OutputParam::Universe(u)) => c.set_universe(*u)?,
            (ProtocolSelection::ArtNet(c), OutputParam::DmxChannel(ch)) => c.set_channel(*ch)?,
            (ProtocolSelection::ArtNet(c), OutputParam::Sequence(on)) => c.sequence = *on,
            (ProtocolSelection::Sacn(c), OutputParam::Universe(u)) => c.set_universe(*u)?,
            (ProtocolSelection::Sacn(c), OutputParam::DmxChannel(ch)) => c.set_channel(*ch)?,
            (ProtocolSelection::Sacn(c), OutputParam::Priority(p)) => c.set_priority(*p)?,
            (ProtocolSelection::Opc(c), OutputParam::OpcChannel(ch)) => c.channel = *ch,
            (ProtocolSelection::Opc(c), OutputParam::OpcOffset(offset)) => c.offset = *offset,
            (ProtocolSelection::Opc(c), OutputParam::Transport(t)) => c.transport = *t,
            (ProtocolSelection::Opc(c), OutputParam::Port(port)) => c.port = *port,
            (ProtocolSelection::Ddp(c), OutputParam::DdpOffset(offset)) => c.offset = *offset,
            (ProtocolSelection::Kinet(c), OutputParam::KinetPort(port)) => c.set_port(*port)?,
            (ProtocolSelection::Kinet(c), OutputParam::DmxChannel(ch)) => c.set_channel(*ch)?,
            (ProtocolSelection::Kinet(c), OutputParam::KinetVersion(v)) => c.version = *v,
            (selection, param) => {
                return Err(ControlError::InvalidParameter(format!(
                    "{} outputs have no {} field",
                    selection.kind().name(),
                    param.name()
                )))
            }
        }
        Ok(())
    }

    fn params(&self) -> Vec<OutputParam> {
        match self {
            ProtocolSelection::None => Vec::new(),
            ProtocolSelection::ArtNet(c) => vec![
                OutputParam::Universe(c.universe),
                OutputParam::DmxChannel(c.channel),
                OutputParam::Sequence(c.sequence),
            ],
            ProtocolSelection::Sacn(c) => vec![
                OutputParam::Universe(c.universe),
                OutputParam::DmxChannel(c.channel),
                OutputParam::Priority(c.priority),
            ],
            ProtocolSelection::Opc(c) => vec![
                OutputParam::OpcChannel(c.channel),
                OutputParam::OpcOffset(c.offset),
                OutputParam::Transport(c.transport),
                OutputParam::Port(c.port),
            ],
            ProtocolSelection::Ddp(c) => vec![OutputParam::DdpOffset(c.offset)],
            ProtocolSelection::Kinet(c) => vec![
                OutputParam::KinetPort(c.port),
                OutputParam::DmxChannel(c.channel),
                OutputParam::KinetVersion(c.version),
            ],
        }
    }
}

/// Protocol-specific address of one packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFields {
    ArtNet {
        universe: u16,
        dmx_channel: u16,
        sequence: bool,
    },
    Sacn {
        universe: u16,
        dmx_channel: u16,
        priority: u8,
    },
    Opc {
        channel: u8,
        offset: u32,
    },
    Ddp {
        data_offset: u32,
    },
    Kinet {
        port: u8,
        dmx_channel: u16,
        version: KinetVersion,
    },
}

/// Normalized address derived from a protocol selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAddress {
    pub protocol: ProtocolKind,
    pub transport: Transport,
    pub port: u16,
    /// Universe, OPC channel or KiNET port; always 0 for DDP
    pub channel: u32,
    /// Only ever set for Art-Net
    pub sequencing: bool,
    /// Only ever set for sACN
    pub priority: Option<u8>,
    pub fields: AddressFields,
}

impl ResolvedAddress {
    /// Address of chunk `index`, whose first point sits `chunk_start` points
    /// into the fixture's wire order.
    ///
    /// The channel advances by one per chunk, except on DDP where the data
    /// offset advances instead. Everything else is inherited unchanged.
    /// Returns `None` when the chunk would land past the protocol's highest
    /// universe, OPC channel, KiNET port or DDP offset.
    pub fn chunk(&self, index: usize, chunk_start: usize, bytes_per_point: usize) -> Option<Self> {
        let fields = match self.fields {
            AddressFields::ArtNet {
                universe,
                dmx_channel,
                sequence,
            } => AddressFields::ArtNet {
                universe: advance_u16(universe, index, artnet::MAX_UNIVERSE)?,
                dmx_channel,
                sequence,
            },
            AddressFields::Sacn {
                universe,
                dmx_channel,
                priority,
            } => AddressFields::Sacn {
                universe: advance_u16(universe, index, sacn::MAX_UNIVERSE)?,
                dmx_channel,
                priority,
            },
            AddressFields::Opc { channel, offset } => AddressFields::Opc {
                channel: advance_u8(channel, index)?,
                offset,
            },
            AddressFields::Ddp { data_offset } => {
                let advance = chunk_start
                    .checked_mul(bytes_per_point)
                    .and_then(|bytes| u32::try_from(bytes).ok())?;
                AddressFields::Ddp {
                    data_offset: data_offset.checked_add(advance)?,
                }
            }
            AddressFields::Kinet {
                port,
                dmx_channel,
                version,
            } => AddressFields::Kinet {
                port: advance_u8(port, index)?,
                dmx_channel,
                version,
            },
        };
        let channel = match fields {
            AddressFields::ArtNet { universe, .. } | AddressFields::Sacn { universe, .. } => {
                u32::from(universe)
            }
            AddressFields::Opc { channel, .. } => u32::from(channel),
            AddressFields::Kinet { port, .. } => u32::from(port),
            AddressFields::Ddp { .. } => 0,
        };
        Some(Self {
            channel,
            fields,
            ..*self
        })
    }
}

fn advance_u16(base: u16, step: usize, max: u16) -> Option<u16> {
    let step = u16::try_from(step).ok()?;
    base.checked_add(step).filter(|value| *value <= max)
}

fn advance_u8(base: u8, step: usize) -> Option<u8> {
    base.checked_add(u8::try_from(step).ok()?)
}

/// Normalize a protocol selection into an address.
///
/// Returns `None` when no protocol is selected. Pure: no host lookup happens
/// here.
pub fn resolve_address(selection: &ProtocolSelection) -> Option<ResolvedAddress> {
    let kind = selection.kind();
    let default_port = kind.default_port()?;
    let address = match selection {
        ProtocolSelection::None => return None,
        ProtocolSelection::ArtNet(c) => ResolvedAddress {
            protocol: kind,
            transport: Transport::Udp,
            port: default_port,
            channel: u32::from(c.universe),
            sequencing: c.sequence,
            priority: None,
            fields: c.fields(),
        },
        ProtocolSelection::Sacn(c) => ResolvedAddress {
            protocol: kind,
            transport: Transport::Udp,
            port: default_port,
            channel: u32::from(c.universe),
            sequencing: false,
            priority: Some(c.priority),
            fields: c.fields(),
        },
        ProtocolSelection::Opc(c) => ResolvedAddress {
            protocol: kind,
            transport: c.transport,
            port: c.port,
            channel: u32::from(c.channel),
            sequencing: false,
            priority: None,
            fields: c.fields(),
        },
        ProtocolSelection::Ddp(c) => ResolvedAddress {
            protocol: kind,
            transport: Transport::Udp,
            port: default_port,
            channel: 0,
            sequencing: false,
            priority: None,
            fields: c.fields(),
        },
        ProtocolSelection::Kinet(c) => ResolvedAddress {
            protocol: kind,
            transport: Transport::Udp,
            port: default_port,
            channel: u32::from(c.port),
            sequencing: false,
            priority: None,
            fields: c.fields(),
        },
    };
    Some(address)
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_points_per_packet() -> u32 {
    DEFAULT_POINTS_PER_PACKET
}

/// Addressing provider of a fixture: protocol plus the shared output fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub byte_order: ByteOrder,
    #[serde(default)]
    pub split_packets: bool,
    #[serde(default = "default_points_per_packet")]
    pub points_per_packet: u32,
    pub protocol: ProtocolSelection,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            byte_order: ByteOrder::default(),
            split_packets: false,
            points_per_packet: DEFAULT_POINTS_PER_PACKET,
            protocol: ProtocolSelection::None,
        }
    }
}

impl OutputSettings {
    /// Apply an output parameter change.
    ///
    /// Switching protocol resets the protocol fields to that protocol's
    /// defaults; shared fields are kept.
    pub fn apply(&mut self, param: &OutputParam) -> Result<()> {
        match param {
            OutputParam::Protocol(kind) => {
                if *kind != self.protocol.kind() {
                    self.protocol = kind.default_selection();
                }
            }
            OutputParam::Host(host) => self.host = host.trim().to_string(),
            OutputParam::ByteOrder(order) => self.byte_order = *order,
            OutputParam::SplitPackets(split) => self.split_packets = *split,
            OutputParam::PointsPerPacket(n) => {
                if *n == 0 || *n > MAX_POINTS_PER_PACKET {
                    return Err(ControlError::InvalidParameter(format!(
                        "points per packet {} (must be 1-{})",
                        n, MAX_POINTS_PER_PACKET
                    )));
                }
                self.points_per_packet = *n;
            }
            other => self.protocol.apply(other)?,
        }
        Ok(())
    }

    /// The settings expressed as parameter changes, protocol first
    pub fn params(&self) -> Vec<OutputParam> {
        let mut params = vec![
            OutputParam::Protocol(self.protocol.kind()),
            OutputParam::Host(self.host.clone()),
            OutputParam::ByteOrder(self.byte_order),
            OutputParam::SplitPackets(self.split_packets),
            OutputParam::PointsPerPacket(self.points_per_packet),
        ];
        params.extend(self.protocol.params());
        params
    }

    /// Points per packet actually used, or `None` when packets are not split
    pub fn packet_limit(&self) -> Option<usize> {
        if !self.split_packets {
            return None;
        }
        let capacity = self.protocol.kind().capacity(self.byte_order).max(1);
        let requested = self.points_per_packet as usize;
        if requested > capacity {
            tracing::warn!(
                "{} points per packet exceeds {} capacity of {} with {}, clamping",
                requested,
                self.protocol.kind().name(),
                capacity,
                self.byte_order.label()
            );
        }
        Some(requested.min(capacity))
    }
}

/// Output parameter change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputParam {
    Protocol(ProtocolKind),
    Host(String),
    ByteOrder(ByteOrder),
    SplitPackets(bool),
    PointsPerPacket(u32),
    /// Art-Net or sACN universe
    Universe(u16),
    /// Art-Net, sACN or KiNET DMX channel offset
    DmxChannel(u16),
    /// Art-Net sequence numbering
    Sequence(bool),
    /// sACN priority
    Priority(u8),
    OpcChannel(u8),
    OpcOffset(u32),
    /// OPC transport
    Transport(Transport),
    /// OPC port
    Port(u16),
    DdpOffset(u32),
    KinetPort(u8),
    KinetVersion(KinetVersion),
}

impl OutputParam {
    pub fn name(&self) -> &'static str {
        match self {
            OutputParam::Protocol(_) => "protocol",
            OutputParam::Host(_) => "host",
            OutputParam::ByteOrder(_) => "byte_order",
            OutputParam::SplitPackets(_) => "split_packets",
            OutputParam::PointsPerPacket(_) => "points_per_packet",
            OutputParam::Universe(_) => "universe",
            OutputParam::DmxChannel(_) => "dmx_channel",
            OutputParam::Sequence(_) => "sequence",
            OutputParam::Priority(_) => "priority",
            OutputParam::OpcChannel(_) => "opc_channel",
            OutputParam::OpcOffset(_) => "opc_offset",
            OutputParam::Transport(_) => "transport",
            OutputParam::Port(_) => "port",
            OutputParam::DdpOffset(_) => "ddp_offset",
            OutputParam::KinetPort(_) => "kinet_port",
            OutputParam::KinetVersion(_) => "kinet_version",
        }
    }
}

impl Tiered for OutputParam {
    fn tier(&self) -> Tier {
        match self {
            OutputParam::Protocol(_)
            | OutputParam::Host(_)
            | OutputParam::ByteOrder(_)
            | OutputParam::SplitPackets(_)
            | OutputParam::PointsPerPacket(_)
            | OutputParam::Universe(_)
            | OutputParam::DmxChannel(_)
            | OutputParam::Sequence(_)
            | OutputParam::Priority(_)
            | OutputParam::OpcChannel(_)
            | OutputParam::OpcOffset(_)
            | OutputParam::Transport(_)
            | OutputParam::Port(_)
            | OutputParam::DdpOffset(_)
            | OutputParam::KinetPort(_)
            | OutputParam::KinetVersion(_) => Tier::Output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_none() {
        assert!(resolve_address(&ProtocolSelection::None).is_none());
    }

    #[test]
    fn test_resolve_default_ports() {
        let cases = [
            (ProtocolKind::ArtNet, 6454),
            (ProtocolKind::Sacn, 5568),
            (ProtocolKind::Opc, 7890),
            (ProtocolKind::Ddp, 4048),
            (ProtocolKind::Kinet, 6038),
        ];
        for (kind, port) in cases {
            let address = resolve_address(&kind.default_selection()).unwrap();
            assert_eq!(address.port, port, "{}", kind.name());
            assert_eq!(address.transport, Transport::Udp);
        }
    }

    #[test]
    fn test_opc_overrides_port_and_transport() {
        let selection = ProtocolSelection::Opc(OpcConfig {
            channel: 3,
            offset: 0,
            transport: Transport::Tcp,
            port: 9000,
        });
        let address = resolve_address(&selection).unwrap();
        assert_eq!(address.transport, Transport::Tcp);
        assert_eq!(address.port, 9000);
        assert_eq!(address.channel, 3);
    }

    #[test]
    fn test_sequencing_and_priority_are_protocol_specific() {
        let artnet = resolve_address(&ProtocolSelection::ArtNet(ArtNetConfig {
            universe: 4,
            channel: 0,
            sequence: true,
        }))
        .unwrap();
        assert!(artnet.sequencing);
        assert_eq!(artnet.priority, None);
        assert_eq!(artnet.channel, 4);

        let sacn = resolve_address(&ProtocolKind::Sacn.default_selection()).unwrap();
        assert!(!sacn.sequencing);
        assert_eq!(sacn.priority, Some(100));
    }

    #[test]
    fn test_ddp_channel_is_zero() {
        let address = resolve_address(&ProtocolSelection::Ddp(DdpConfig { offset: 30 })).unwrap();
        assert_eq!(address.channel, 0);
        let chunk = address.chunk(2, 340, 3).unwrap();
        assert_eq!(chunk.channel, 0);
        assert_eq!(chunk.fields, AddressFields::Ddp { data_offset: 1050 });
    }

    #[test]
    fn test_chunk_advances_universe_and_keeps_fields() {
        let address = resolve_address(&ProtocolSelection::Sacn(SacnConfig {
            universe: 10,
            channel: 3,
            priority: 150,
        }))
        .unwrap();
        let chunk = address.chunk(2, 340, 3).unwrap();
        assert_eq!(chunk.channel, 12);
        assert_eq!(chunk.priority, Some(150));
        assert_eq!(
            chunk.fields,
            AddressFields::Sacn {
                universe: 12,
                dmx_channel: 3,
                priority: 150
            }
        );
    }

    #[test]
    fn test_chunk_stops_at_highest_channel() {
        let artnet = resolve_address(&ProtocolSelection::ArtNet(ArtNetConfig {
            universe: artnet::MAX_UNIVERSE,
            ..ArtNetConfig::default()
        }))
        .unwrap();
        assert_eq!(artnet.chunk(0, 0, 3).unwrap().channel, 32767);
        assert_eq!(artnet.chunk(1, 170, 3), None);

        let sacn = resolve_address(&ProtocolSelection::Sacn(SacnConfig {
            universe: sacn::MAX_UNIVERSE - 1,
            ..SacnConfig::default()
        }))
        .unwrap();
        assert_eq!(sacn.chunk(1, 170, 3).unwrap().channel, 63999);
        assert_eq!(sacn.chunk(2, 340, 3), None);

        let opc = resolve_address(&ProtocolSelection::Opc(OpcConfig {
            channel: u8::MAX,
            ..OpcConfig::default()
        }))
        .unwrap();
        assert_eq!(opc.chunk(0, 0, 3).unwrap().channel, 255);
        assert_eq!(opc.chunk(1, 170, 3), None);

        let kinet = resolve_address(&ProtocolSelection::Kinet(KinetConfig {
            port: u8::MAX,
            ..KinetConfig::default()
        }))
        .unwrap();
        assert_eq!(kinet.chunk(0, 0, 3).unwrap().channel, 255);
        assert_eq!(kinet.chunk(1, 170, 3), None);

        let ddp = resolve_address(&ProtocolSelection::Ddp(DdpConfig { offset: u32::MAX })).unwrap();
        assert!(ddp.chunk(0, 0, 3).is_some());
        assert_eq!(ddp.chunk(1, 480, 3), None);
    }

    #[test]
    fn test_field_not_on_active_protocol() {
        let mut settings = OutputSettings {
            protocol: ProtocolKind::Ddp.default_selection(),
            ..OutputSettings::default()
        };
        let err = settings.apply(&OutputParam::Universe(3)).unwrap_err();
        assert!(matches!(err, ControlError::InvalidParameter(_)));
        assert!(settings.apply(&OutputParam::DdpOffset(9)).is_ok());
    }

    #[test]
    fn test_switching_protocol_resets_fields() {
        let mut settings = OutputSettings::default();
        settings
            .apply(&OutputParam::Protocol(ProtocolKind::ArtNet))
            .unwrap();
        settings.apply(&OutputParam::Universe(9)).unwrap();
        settings
            .apply(&OutputParam::Protocol(ProtocolKind::ArtNet))
            .unwrap();
        assert_eq!(
            settings.protocol,
            ProtocolSelection::ArtNet(ArtNetConfig {
                universe: 9,
                ..ArtNetConfig::default()
            })
        );
        settings
            .apply(&OutputParam::Protocol(ProtocolKind::Sacn))
            .unwrap();
        assert_eq!(settings.protocol, ProtocolKind::Sacn.default_selection());
    }

    #[test]
    fn test_packet_limit_clamps_to_capacity() {
        let mut settings = OutputSettings {
            protocol: ProtocolKind::ArtNet.default_selection(),
            split_packets: true,
            points_per_packet: 500,
            ..OutputSettings::default()
        };
        assert_eq!(settings.packet_limit(), Some(170));
        settings.byte_order = ByteOrder::Rgbw;
        assert_eq!(settings.packet_limit(), Some(128));
        settings.split_packets = false;
        assert_eq!(settings.packet_limit(), None);
    }

    #[test]
    fn test_points_per_packet_range() {
        let mut settings = OutputSettings::default();
        assert!(settings.apply(&OutputParam::PointsPerPacket(0)).is_err());
        assert!(settings
            .apply(&OutputParam::PointsPerPacket(MAX_POINTS_PER_PACKET + 1))
            .is_err());
        assert!(settings.apply(&OutputParam::PointsPerPacket(64)).is_ok());
    }

    #[test]
    fn test_params_restore_settings() {
        let original = OutputSettings {
            host: "10.0.0.7".into(),
            byte_order: ByteOrder::Grb,
            split_packets: true,
            points_per_packet: 100,
            protocol: ProtocolSelection::Kinet(KinetConfig {
                port: 4,
                channel: 12,
                version: KinetVersion::V2,
            }),
        };
        let mut restored = OutputSettings::default();
        for param in original.params() {
            restored.apply(&param).unwrap();
        }
        assert_eq!(restored, original);
    }

    #[test]
    fn test_every_output_param_is_output_tier() {
        assert_eq!(OutputParam::Host("a".into()).tier(), Tier::Output);
        assert_eq!(OutputParam::Protocol(ProtocolKind::Ddp).tier(), Tier::Output);
        assert_eq!(OutputParam::SplitPackets(true).tier(), Tier::Output);
    }
}
