//! Luxgrid Core - Fixture geometry and model snapshots
//!
//! This crate contains the geometry side of Luxgrid:
//! - Points and the accumulated placement transform
//! - Fixture shapes (point, strip, arc, grid) as geometry providers
//! - Grid wiring topologies
//! - Immutable model/submodel snapshots
//! - Invalidation tiers for configuration parameters
//! - Log configuration

#![allow(missing_docs)]

pub use glam::{Mat4, Vec3};
use thiserror::Error;

pub mod geometry;
pub mod logging;
pub mod model;
pub mod point;
pub mod tier;
pub mod transform;
pub mod wiring;

// --- Re-exports grouped by category ---

// Geometry
pub use geometry::{
    ArcMode, ArcShape, GridShape, Shape, ShapeKind, ShapeParam, StripShape, MAX_POINTS_PER_AXIS,
};
pub use point::Point;
pub use transform::{Placement, PlacementParam, TransformStack};
pub use wiring::{Axis, Corner, Wiring};

// Snapshots
pub use model::{FixtureModel, FixtureSpan, Model, ModelBuilder, Slice, Submodel};

// Invalidation
pub use tier::{Invalidation, Tier, Tiered};

// Logging
pub use logging::LogConfig;

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    /// Parameter value out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Parameter does not exist on this fixture shape
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Submodel slice outside of its snapshot
    #[error("Invalid slice: {0}")]
    InvalidSlice(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
