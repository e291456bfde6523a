//! Fixtures
//!
//! A [`Fixture`] composes a geometry provider (its [`Shape`] and
//! [`Placement`]) with an addressing provider ([`OutputSettings`]). Every
//! parameter change goes through [`Fixture::set`], which dispatches on the
//! parameter's tier:
//!
//! - Metrics: reallocate points, recompute geometry, rebuild outputs
//! - Geometry: rewrite positions in place
//! - Output: rebuild output descriptors
//!
//! The returned [`Invalidation`] tells the owning structure what else has to
//! happen (reindexing the fixtures behind this one, republishing the model).

use std::net::IpAddr;
use std::sync::Arc;

use glam::Mat4;
use serde::{Deserialize, Serialize};

use luxgrid_core::point::{self, Point};
use luxgrid_core::{Invalidation, Placement, PlacementParam, Shape, ShapeKind, ShapeParam};
use luxgrid_core::{Slice, Tier, Tiered};

use crate::config::FixtureConfig;
use crate::output::{self, OutputDescriptor, OutputSet, RuntimeState};
use crate::protocol::{OutputParam, OutputSettings, ProtocolKind};
use crate::resolver::HostResolver;
use crate::{ControlError, Result};

/// Shared host resolver handle
pub type SharedResolver = Arc<dyn HostResolver + Send + Sync>;

/// A parameter change addressed to one fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamChange {
    Shape(ShapeParam),
    Placement(PlacementParam),
    Output(OutputParam),
}

impl ParamChange {
    pub fn name(&self) -> &'static str {
        match self {
            ParamChange::Shape(p) => p.name(),
            ParamChange::Placement(p) => p.name(),
            ParamChange::Output(p) => p.name(),
        }
    }
}

impl Tiered for ParamChange {
    fn tier(&self) -> Tier {
        match self {
            ParamChange::Shape(p) => p.tier(),
            ParamChange::Placement(p) => p.tier(),
            ParamChange::Output(p) => p.tier(),
        }
    }
}

impl From<ShapeParam> for ParamChange {
    fn from(param: ShapeParam) -> Self {
        ParamChange::Shape(param)
    }
}

impl From<PlacementParam> for ParamChange {
    fn from(param: PlacementParam) -> Self {
        ParamChange::Placement(param)
    }
}

impl From<OutputParam> for ParamChange {
    fn from(param: OutputParam) -> Self {
        ParamChange::Output(param)
    }
}

/// A configurable source of addressable points
pub struct Fixture {
    id: u64,
    label: String,
    shape: Shape,
    placement: Placement,
    parent: Mat4,
    points: Vec<Point>,
    index_base: usize,
    settings: OutputSettings,
    outputs: OutputSet,
    runtime: RuntimeState,
    unknown_host: bool,
    loading: bool,
    resolver: SharedResolver,
}

impl std::fmt::Debug for Fixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fixture")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("shape", &self.shape)
            .field("index_base", &self.index_base)
            .field("size", &self.points.len())
            .field("protocol", &self.settings.protocol.kind())
            .field("outputs", &self.outputs.len())
            .field("unknown_host", &self.unknown_host)
            .finish()
    }
}

impl Fixture {
    /// Create a fixture with its points at indices starting from 0
    /// Create a fixture with default placement and no protocol.
    ///
    /// Fails when a shape parameter is out of range.
    pub fn new(
        id: u64,
        label: impl Into<String>,
        shape: Shape,
        resolver: SharedResolver,
    ) -> Result<Self> {
        shape.validate()?;
        let mut fixture = Self {
            id,
            label: label.into(),
            points: point::allocate(0, shape.size()),
            shape,
            placement: Placement::origin(),
            parent: Mat4::IDENTITY,
            index_base: 0,
            settings: OutputSettings::default(),
            outputs: OutputSet::new(),
            runtime: RuntimeState::default(),
            unknown_host: false,
            loading: false,
            resolver,
        };
        fixture.recompute_geometry();
        fixture.rebuild_outputs();
        Ok(fixture)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn settings(&self) -> &OutputSettings {
        &self.settings
    }

    /// Number of points
    pub fn size(&self) -> usize {
        self.shape.size()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Global index of the first point
    pub fn index_base(&self) -> usize {
        self.index_base
    }

    /// Named slices of this fixture, in global indices
    pub fn slices(&self) -> Vec<Slice> {
        self.shape.slices(self.index_base)
    }

    pub fn outputs(&self) -> &[OutputDescriptor] {
        self.outputs.descriptors()
    }

    /// Bumped every time the output descriptors are rebuilt
    pub fn output_generation(&self) -> u64 {
        self.outputs.generation()
    }

    pub fn is_enabled(&self) -> bool {
        self.runtime.enabled
    }

    pub fn brightness(&self) -> f32 {
        self.runtime.brightness
    }

    /// Set when the output host could not be resolved on the last rebuild
    pub fn unknown_host(&self) -> bool {
        self.unknown_host
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Apply a parameter change and perform the recompute its tier requires.
    ///
    /// Invalid values leave the fixture untouched. While loading, the change
    /// is stored and [`Invalidation::Deferred`] is returned.
    pub fn set(&mut self, change: impl Into<ParamChange>) -> Result<Invalidation> {
        let change = change.into();
        let tier = change.tier();
        match &change {
            ParamChange::Shape(param) => self.shape.apply(*param)?,
            ParamChange::Placement(param) => self.placement.apply(*param)?,
            ParamChange::Output(param) => self.settings.apply(param)?,
        }
        if self.loading {
            return Ok(Invalidation::Deferred);
        }
        tracing::debug!(
            "Fixture {} {} changed ({:?} tier)",
            self.id,
            change.name(),
            tier
        );
        match tier {
            Tier::Metrics => {
                self.regenerate_points(false);
                self.rebuild_outputs();
            }
            Tier::Geometry => self.recompute_geometry(),
            Tier::Output => self.rebuild_outputs(),
        }
        Ok(Invalidation::for_tier(tier))
    }

    /// Move the parent transform; positions are rewritten in place
    pub fn set_parent(&mut self, parent: Mat4) -> Invalidation {
        self.parent = parent;
        if self.loading {
            return Invalidation::Deferred;
        }
        self.recompute_geometry();
        Invalidation::GeometryChanged
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.runtime.enabled = enabled;
        self.outputs.apply_runtime(self.runtime);
    }

    /// Set brightness, 0.0 - 1.0
    pub fn set_brightness(&mut self, brightness: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&brightness) {
            return Err(ControlError::InvalidParameter(format!(
                "brightness {} (must be 0.0-1.0)",
                brightness
            )));
        }
        self.runtime.brightness = brightness;
        self.outputs.apply_runtime(self.runtime);
        Ok(())
    }

    /// Move the fixture's first point to `base`.
    ///
    /// Returns whether anything moved. Outputs are rebuilt when indices moved,
    /// unless a load is in progress.
    pub fn set_index_base(&mut self, base: usize) -> bool {
        if base == self.index_base {
            return false;
        }
        self.index_base = base;
        point::renumber(&mut self.points, base);
        if !self.loading {
            self.rebuild_outputs();
        }
        true
    }

    /// Suppress every reaction until [`Fixture::end_load`]
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Finish a load with exactly one full resync: points, then outputs
    pub fn end_load(&mut self) -> Invalidation {
        self.loading = false;
        self.regenerate_points(true);
        self.rebuild_outputs();
        tracing::debug!(
            "Fixture {} resynced after load: {} points, {} outputs",
            self.id,
            self.points.len(),
            self.outputs.len()
        );
        Invalidation::PointsChanged
    }

    /// Re-apply a stored configuration through [`Fixture::set`].
    ///
    /// Must be called between [`Fixture::begin_load`] and
    /// [`Fixture::end_load`].
    pub fn apply_config(&mut self, config: &FixtureConfig) -> Result<()> {
        assert!(self.loading, "apply_config outside of a load");
        if config.shape.kind() != self.kind() {
            return Err(ControlError::ShapeMismatch {
                expected: self.kind().name().to_string(),
                found: config.shape.kind().name().to_string(),
            });
        }
        self.label = config.label.clone();
        self.set_enabled(config.enabled);
        self.set_brightness(config.brightness)?;
        for param in config.placement.params() {
            self.set(param)?;
        }
        for param in config.shape.params() {
            self.set(param)?;
        }
        let output = config.output.clone().unwrap_or_default();
        for param in output.params() {
            self.set(param)?;
        }
        Ok(())
    }

    /// Restore a stored configuration on its own, with one resync
    pub fn load(&mut self, config: &FixtureConfig) -> Result<Invalidation> {
        self.begin_load();
        let applied = self.apply_config(config);
        let invalidation = self.end_load();
        applied.map(|_| invalidation)
    }

    /// The persisted configuration of this fixture
    pub fn config(&self) -> FixtureConfig {
        FixtureConfig {
            label: self.label.clone(),
            enabled: self.runtime.enabled,
            brightness: self.runtime.brightness,
            placement: self.placement,
            shape: self.shape.clone(),
            output: match self.settings.protocol.kind() {
                ProtocolKind::None => None,
                _ => Some(self.settings.clone()),
            },
        }
    }

    fn regenerate_points(&mut self, force: bool) {
        let size = self.shape.size();
        if force || self.points.len() != size {
            self.points = point::allocate(self.index_base, size);
        }
        self.recompute_geometry();
    }

    fn recompute_geometry(&mut self) {
        self.shape
            .place(self.parent, &self.placement, &mut self.points);
    }

    fn resolve_host(&mut self) -> Option<IpAddr> {
        let resolved = self.resolver.resolve(&self.settings.host);
        match (resolved, self.unknown_host) {
            (None, false) => tracing::warn!(
                "Fixture {}: unknown host '{}', output disabled",
                self.id,
                self.settings.host
            ),
            (Some(ip), true) => tracing::info!(
                "Fixture {}: host '{}' resolved to {}, output enabled",
                self.id,
                self.settings.host,
                ip
            ),
            _ => {}
        }
        self.unknown_host = resolved.is_none();
        resolved
    }

    fn rebuild_outputs(&mut self) {
        let host = match self.settings.protocol.kind() {
            ProtocolKind::None => {
                self.unknown_host = false;
                None
            }
            _ => self.resolve_host(),
        };
        let indices: Vec<usize> = self
            .shape
            .wire_order()
            .into_iter()
            .map(|offset| self.points[offset].index)
            .collect();
        let (id, settings, runtime) = (self.id, &self.settings, self.runtime);
        self.outputs
            .rebuild(|pass| output::assemble(pass, id, settings, &indices, host, runtime));
        tracing::debug!(
            "Fixture {} rebuilt {} outputs (generation {})",
            self.id,
            self.outputs.len(),
            self.outputs.generation()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StaticResolver;
    use luxgrid_core::{GridShape, Wiring};

    fn fixture(shape: Shape) -> Fixture {
        Fixture::new(1, "Test", shape, Arc::new(StaticResolver::new())).unwrap()
    }

    #[test]
    fn test_metrics_change_reallocates() {
        let mut fixture = fixture(ShapeKind::Strip.default_shape());
        assert_eq!(fixture.points().len(), 30);
        let result = fixture.set(ShapeParam::NumPoints(12)).unwrap();
        assert_eq!(result, Invalidation::PointsChanged);
        assert_eq!(fixture.points().len(), 12);
        assert_eq!(fixture.points().len(), fixture.size());
    }

    #[test]
    fn test_geometry_change_keeps_points() {
        let mut fixture = fixture(ShapeKind::Strip.default_shape());
        let before: Vec<usize> = fixture.points().iter().map(|p| p.index).collect();
        let result = fixture.set(ShapeParam::Spacing(2.0)).unwrap();
        assert_eq!(result, Invalidation::GeometryChanged);
        let after: Vec<usize> = fixture.points().iter().map(|p| p.index).collect();
        assert_eq!(before, after);
        assert_eq!(fixture.points()[3].x(), 6.0);
    }

    #[test]
    fn test_output_change_only_rebuilds_outputs() {
        let mut fixture = fixture(ShapeKind::Grid.default_shape());
        let generation = fixture.output_generation();
        let result = fixture
            .set(ShapeParam::Wiring(Wiring::ZigzagVertTopRight))
            .unwrap();
        assert_eq!(result, Invalidation::OutputsChanged);
        assert_eq!(fixture.output_generation(), generation + 1);
    }

    #[test]
    fn test_invalid_value_changes_nothing() {
        let mut fixture = fixture(Shape::Grid(GridShape::default()));
        let generation = fixture.output_generation();
        assert!(fixture.set(ShapeParam::Rows(0)).is_err());
        assert!(fixture.set(ShapeParam::Radius(2.0)).is_err());
        assert_eq!(fixture.size(), 100);
        assert_eq!(fixture.output_generation(), generation);
    }

    #[test]
    fn test_param_change_tier() {
        assert_eq!(ParamChange::from(ShapeParam::Rows(2)).tier(), Tier::Metrics);
        assert_eq!(
            ParamChange::from(PlacementParam::Yaw(2.0)).tier(),
            Tier::Geometry
        );
        assert_eq!(
            ParamChange::from(OutputParam::SplitPackets(true)).tier(),
            Tier::Output
        );
    }

    #[test]
    fn test_brightness_range() {
        let mut fixture = fixture(Shape::Point);
        assert!(fixture.set_brightness(1.5).is_err());
        assert!(fixture.set_brightness(0.5).is_ok());
        assert_eq!(fixture.brightness(), 0.5);
    }

    #[test]
    fn test_index_base_renumbers() {
        let mut fixture = fixture(ShapeKind::Strip.default_shape());
        assert!(fixture.set_index_base(40));
        assert!(!fixture.set_index_base(40));
        assert_eq!(fixture.points()[0].index, 40);
        assert_eq!(fixture.points()[29].index, 69);
    }

    #[test]
    fn test_config_without_protocol_has_no_output() {
        let fixture = fixture(Shape::Point);
        assert!(fixture.config().output.is_none());
    }
}
