//! Output descriptors and their assembly
//!
//! An [`OutputDescriptor`] is the unit handed to a wire encoder: protocol,
//! address and the ordered global point indices of one packet. A fixture keeps
//! its descriptors in an [`OutputSet`], which is only ever refilled wholesale
//! through [`OutputSet::rebuild`]; the previous descriptors are released first
//! and none of them is ever patched in place, apart from the runtime
//! enabled/brightness state.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::protocol::{
    resolve_address, AddressFields, ByteOrder, OutputSettings, ProtocolKind, Transport,
};
use crate::splitter;

/// Runtime state of a fixture mirrored onto its outputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuntimeState {
    pub enabled: bool,
    /// 0.0 - 1.0
    pub brightness: f32,
}

impl Default for RuntimeState {
    fn default() -> Self {
        Self {
            enabled: true,
            brightness: 1.0,
        }
    }
}

/// One addressed packet of point data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDescriptor {
    pub fixture_id: u64,
    pub protocol: ProtocolKind,
    pub transport: Transport,
    /// `None` while the host is unknown
    pub host: Option<IpAddr>,
    pub port: u16,
    pub channel: u32,
    pub byte_order: ByteOrder,
    pub sequencing: bool,
    pub priority: Option<u8>,
    pub fields: AddressFields,
    /// Global point indices in wire order
    pub indices: Vec<usize>,
    pub enabled: bool,
    pub brightness: f32,
}

impl OutputDescriptor {
    /// Payload size in bytes
    pub fn payload_len(&self) -> usize {
        self.indices.len() * self.byte_order.bytes_per_point()
    }
}

/// Handle that exists only while an [`OutputSet`] is being rebuilt.
///
/// Descriptors can only be added through it.
#[derive(Debug)]
pub struct RebuildPass {
    descriptors: Vec<OutputDescriptor>,
}

impl RebuildPass {
    pub fn add(&mut self, descriptor: OutputDescriptor) {
        self.descriptors.push(descriptor);
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// The output descriptors owned by one fixture
#[derive(Debug, Default)]
pub struct OutputSet {
    descriptors: Vec<OutputDescriptor>,
    generation: u64,
}

impl OutputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release every descriptor, then refill the set through `fill`
    pub fn rebuild<F>(&mut self, fill: F)
    where
        F: FnOnce(&mut RebuildPass),
    {
        self.descriptors.clear();
        let mut pass = RebuildPass {
            descriptors: Vec::new(),
        };
        fill(&mut pass);
        self.descriptors = pass.descriptors;
        self.generation += 1;
    }

    /// Push runtime state onto the existing descriptors
    pub fn apply_runtime(&mut self, runtime: RuntimeState) {
        for descriptor in &mut self.descriptors {
            descriptor.enabled = runtime.enabled && descriptor.host.is_some();
            descriptor.brightness = runtime.brightness;
        }
    }

    pub fn descriptors(&self) -> &[OutputDescriptor] {
        &self.descriptors
    }

    /// Bumped on every rebuild
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Build one descriptor per packet of `indices` into `pass`.
///
/// `indices` are global point indices in wire order. Nothing is added when no
/// protocol is selected. Outputs start disabled when `host` is `None`.
/// Packets that would be addressed past the protocol's highest channel are
/// dropped with a warning.
pub fn assemble(
    pass: &mut RebuildPass,
    fixture_id: u64,
    settings: &OutputSettings,
    indices: &[usize],
    host: Option<IpAddr>,
    runtime: RuntimeState,
) {
    let Some(address) = resolve_address(&settings.protocol) else {
        return;
    };
    let bytes_per_point = settings.byte_order.bytes_per_point();
    let chunks = splitter::split(indices, settings.packet_limit());
    let total = chunks.len();
    for chunk in chunks {
        let Some(chunk_address) = address.chunk(chunk.ordinal, chunk.start, bytes_per_point)
        else {
            tracing::warn!(
                "Fixture {} {}: packets {}..{} run past the highest channel, {} points not sent",
                fixture_id,
                address.protocol.name(),
                chunk.ordinal,
                total,
                indices.len() - chunk.start
            );
            break;
        };
        tracing::trace!(
            "Fixture {} {} packet {} on channel {}: {} points",
            fixture_id,
            address.protocol.name(),
            chunk.ordinal,
            chunk_address.channel,
            chunk.indices.len()
        );
        pass.add(OutputDescriptor {
            fixture_id,
            protocol: chunk_address.protocol,
            transport: chunk_address.transport,
            host,
            port: chunk_address.port,
            channel: chunk_address.channel,
            byte_order: settings.byte_order,
            sequencing: chunk_address.sequencing,
            priority: chunk_address.priority,
            fields: chunk_address.fields,
            indices: chunk.indices,
            enabled: runtime.enabled && host.is_some(),
            brightness: runtime.brightness,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ArtNetConfig, ProtocolSelection};
    use std::net::Ipv4Addr;

    fn artnet_settings(split: bool) -> OutputSettings {
        OutputSettings {
            split_packets: split,
            protocol: ProtocolSelection::ArtNet(ArtNetConfig {
                universe: 5,
                channel: 0,
                sequence: true,
            }),
            ..OutputSettings::default()
        }
    }

    #[test]
    fn test_assemble_split() {
        let indices: Vec<usize> = (100..500).collect();
        let host = Some(IpAddr::V4(Ipv4Addr::LOCALHOST));
        let mut set = OutputSet::new();
        set.rebuild(|pass| {
            assemble(
                pass,
                1,
                &artnet_settings(true),
                &indices,
                host,
                RuntimeState::default(),
            )
        });
        let channels: Vec<u32> = set.descriptors().iter().map(|d| d.channel).collect();
        assert_eq!(channels, vec![5, 6, 7]);
        assert!(set.descriptors().iter().all(|d| d.sequencing && d.enabled));
        assert_eq!(set.descriptors()[2].indices.len(), 60);
        assert_eq!(set.descriptors()[0].payload_len(), 510);
    }

    #[test]
    fn test_assemble_drops_packets_past_highest_universe() {
        let settings = OutputSettings {
            split_packets: true,
            protocol: ProtocolSelection::ArtNet(ArtNetConfig {
                universe: crate::protocol::artnet::MAX_UNIVERSE - 1,
                channel: 0,
                sequence: false,
            }),
            ..OutputSettings::default()
        };
        let indices: Vec<usize> = (0..400).collect();
        let host = Some(IpAddr::V4(Ipv4Addr::LOCALHOST));
        let mut set = OutputSet::new();
        set.rebuild(|pass| assemble(pass, 1, &settings, &indices, host, RuntimeState::default()));
        let channels: Vec<u32> = set.descriptors().iter().map(|d| d.channel).collect();
        assert_eq!(channels, vec![32766, 32767]);
        assert_eq!(set.descriptors()[1].indices.len(), 170);
    }

    #[test]
    fn test_assemble_without_host_is_disabled() {
        let mut set = OutputSet::new();
        set.rebuild(|pass| {
            assemble(
                pass,
                1,
                &artnet_settings(false),
                &[0, 1, 2],
                None,
                RuntimeState::default(),
            )
        });
        assert_eq!(set.len(), 1);
        assert!(!set.descriptors()[0].enabled);
        assert_eq!(set.descriptors()[0].host, None);
    }

    #[test]
    fn test_no_protocol_no_outputs() {
        let mut set = OutputSet::new();
        set.rebuild(|pass| {
            assemble(
                pass,
                1,
                &OutputSettings::default(),
                &[0, 1],
                None,
                RuntimeState::default(),
            );
            assert!(pass.is_empty());
        });
        assert!(set.is_empty());
        assert_eq!(set.generation(), 1);
    }

    #[test]
    fn test_rebuild_replaces_everything() {
        let host = Some(IpAddr::V4(Ipv4Addr::LOCALHOST));
        let mut set = OutputSet::new();
        set.rebuild(|pass| {
            assemble(pass, 1, &artnet_settings(true), &(0..400).collect::<Vec<_>>(), host, RuntimeState::default())
        });
        assert_eq!(set.len(), 3);
        set.rebuild(|pass| {
            assemble(pass, 1, &artnet_settings(true), &[0, 1], host, RuntimeState::default())
        });
        assert_eq!(set.len(), 1);
        assert_eq!(set.generation(), 2);
    }

    #[test]
    fn test_apply_runtime() {
        let host = Some(IpAddr::V4(Ipv4Addr::LOCALHOST));
        let mut set = OutputSet::new();
        set.rebuild(|pass| {
            assemble(pass, 1, &artnet_settings(false), &[0], host, RuntimeState::default())
        });
        set.apply_runtime(RuntimeState {
            enabled: false,
            brightness: 0.25,
        });
        assert!(!set.descriptors()[0].enabled);
        assert_eq!(set.descriptors()[0].brightness, 0.25);
        assert_eq!(set.generation(), 1);
    }
}
