//! Invalidation tiers
//!
//! Every configuration parameter of a fixture belongs to exactly one tier. The
//! tier decides how much work a change to that parameter costs:
//!
//! - [`Tier::Metrics`]: the point count changes. Points are reallocated and the
//!   owning structure has to renumber every fixture behind this one.
//! - [`Tier::Geometry`]: positions change. Points are rewritten in place.
//! - [`Tier::Output`]: addressing changes. Only output descriptors are rebuilt.

use serde::{Deserialize, Serialize};

/// Recompute level attached to a configuration parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Point count changed
    Metrics,
    /// Point positions changed
    Geometry,
    /// Output addressing changed
    Output,
}

impl Tier {
    /// All tiers, cheapest last
    pub fn all() -> &'static [Tier] {
        &[Tier::Metrics, Tier::Geometry, Tier::Output]
    }
}

/// Implemented by every parameter identity.
///
/// The tier of a parameter is a function of its variant alone, never of its
/// value or of fixture state.
pub trait Tiered {
    /// The tier this parameter belongs to
    fn tier(&self) -> Tier;
}

/// What a parameter change caused, reported back to the owner of the fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalidation {
    /// Point buffer was reallocated; global indices behind this fixture moved
    PointsChanged,
    /// Positions were rewritten in place
    GeometryChanged,
    /// Output descriptors were rebuilt
    OutputsChanged,
    /// A restore is in progress; the reaction was deferred to the final resync
    Deferred,
}

impl Invalidation {
    /// The invalidation a non-deferred change of the given tier produces
    pub fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::Metrics => Invalidation::PointsChanged,
            Tier::Geometry => Invalidation::GeometryChanged,
            Tier::Output => Invalidation::OutputsChanged,
        }
    }

    /// Whether the published model must be rebuilt
    pub fn requires_publish(&self) -> bool {
        matches!(
            self,
            Invalidation::PointsChanged | Invalidation::GeometryChanged
        )
    }

    /// Whether point indices must be reassigned
    pub fn requires_reindex(&self) -> bool {
        matches!(self, Invalidation::PointsChanged)
    }
}
