//! Luxgrid Control - Fixtures and network output addressing
//!
//! This crate turns fixture geometry into addressed output packets:
//! - **Protocols**: Art-Net, sACN, OPC, DDP and KiNET addressing
//! - **Splitting**: wire-ordered index buffers chunked to packet limits
//! - **Outputs**: descriptors handed to wire encoders
//! - **Fixtures**: geometry and addressing composed, with tiered invalidation
//! - **Structure**: global point indexing and model publishing
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use luxgrid_control::{OutputParam, ProtocolKind, StaticResolver, Structure};
//! use luxgrid_core::ShapeKind;
//!
//! # fn main() -> luxgrid_control::Result<()> {
//! let mut structure = Structure::new(Arc::new(StaticResolver::new()));
//! let id = structure.add_fixture(ShapeKind::Grid.default_shape(), "Wall")?;
//! structure.set(id, OutputParam::Protocol(ProtocolKind::ArtNet))?;
//! structure.set(id, OutputParam::SplitPackets(true))?;
//! assert_eq!(structure.outputs().count(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`protocol`] - Protocol selection and address resolution
//! - [`resolver`] - Host name resolution
//! - [`splitter`] - Packet splitting
//! - [`output`] - Output descriptors and assembly
//! - [`fixture`] - Fixtures and parameter dispatch
//! - [`structure`] - Fixture indexing and model publishing
//! - [`config`] - Persisted fixture configuration
//! - [`error`] - Error types

#![allow(missing_docs)]

/// Persisted fixture configuration
pub mod config;
/// Error types
pub mod error;
/// Fixtures
pub mod fixture;
/// Output descriptors
pub mod output;
/// Protocol addressing
pub mod protocol;
/// Host resolution
pub mod resolver;
/// Packet splitting
pub mod splitter;
/// Fixture structure
pub mod structure;

// Re-exports
pub use config::FixtureConfig;
pub use error::{ControlError, Result};
pub use fixture::{Fixture, ParamChange, SharedResolver};
pub use output::{OutputDescriptor, OutputSet, RebuildPass, RuntimeState};
pub use protocol::{
    resolve_address, AddressFields, ArtNetConfig, ByteOrder, DdpConfig, KinetConfig,
    KinetVersion, OpcConfig, OutputParam, OutputSettings, ProtocolKind, ProtocolSelection,
    ResolvedAddress, SacnConfig, Transport,
};
pub use resolver::{HostResolver, StaticResolver, SystemResolver};
pub use splitter::Chunk;
pub use structure::Structure;
