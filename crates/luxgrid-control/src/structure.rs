//! The fixture structure
//!
//! [`Structure`] owns the ordered fixture list and assigns global point
//! indices: fixture `n` starts where fixture `n - 1` ends. Whenever indices
//! are final after a change it publishes a fresh immutable [`Model`] and hands
//! it to every subscriber through a channel.

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use glam::Mat4;

use luxgrid_core::{FixtureSpan, Invalidation, Model, ModelBuilder, Point, Shape};

use crate::config::FixtureConfig;
use crate::fixture::{Fixture, ParamChange, SharedResolver};
use crate::output::OutputDescriptor;
use crate::{ControlError, Result};

/// Ordered collection of fixtures sharing one index space
pub struct Structure {
    fixtures: Vec<Fixture>,
    resolver: SharedResolver,
    next_id: u64,
    generation: u64,
    model: Arc<Model>,
    subscribers: Vec<Sender<Arc<Model>>>,
}

impl Structure {
    pub fn new(resolver: SharedResolver) -> Self {
        Self {
            fixtures: Vec::new(),
            resolver,
            next_id: 1,
            generation: 0,
            model: Arc::new(Model::empty()),
            subscribers: Vec::new(),
        }
    }

    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    pub fn fixture(&self, id: u64) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.id() == id)
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// Total number of points
    pub fn size(&self) -> usize {
        self.fixtures.iter().map(Fixture::size).sum()
    }

    /// Latest published snapshot
    pub fn model(&self) -> Arc<Model> {
        Arc::clone(&self.model)
    }

    /// Receive every snapshot published from now on
    pub fn subscribe(&mut self) -> Receiver<Arc<Model>> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// All output descriptors, in fixture order
    pub fn outputs(&self) -> impl Iterator<Item = &OutputDescriptor> + '_ {
        self.fixtures.iter().flat_map(|f| f.outputs().iter())
    }

    /// Append a fixture with default placement and no protocol.
    ///
    /// Fails, leaving the structure untouched, when a shape parameter is out
    /// of range.
    pub fn add_fixture(&mut self, shape: Shape, label: impl Into<String>) -> Result<u64> {
        shape.validate()?;
        let id = self.allocate_id();
        let mut fixture = Fixture::new(id, label, shape, Arc::clone(&self.resolver))?;
        fixture.set_index_base(self.size());
        tracing::info!(
            "Added {} fixture {} '{}' at index {} ({} points)",
            fixture.kind().name(),
            id,
            fixture.label(),
            fixture.index_base(),
            fixture.size()
        );
        self.fixtures.push(fixture);
        self.publish()?;
        Ok(id)
    }

    pub fn remove_fixture(&mut self, id: u64) -> Result<()> {
        let position = self.position(id)?;
        let fixture = self.fixtures.remove(position);
        tracing::info!("Removed fixture {} '{}'", id, fixture.label());
        self.reindex_from(position);
        self.publish()
    }

    /// Apply a parameter change to one fixture and propagate it
    pub fn set(&mut self, id: u64, change: impl Into<ParamChange>) -> Result<Invalidation> {
        let position = self.position(id)?;
        let invalidation = self.fixtures[position].set(change)?;
        self.propagate(position, invalidation)?;
        Ok(invalidation)
    }

    /// Move a fixture's parent transform
    pub fn set_parent(&mut self, id: u64, parent: Mat4) -> Result<Invalidation> {
        let position = self.position(id)?;
        let invalidation = self.fixtures[position].set_parent(parent);
        self.propagate(position, invalidation)?;
        Ok(invalidation)
    }

    pub fn set_enabled(&mut self, id: u64, enabled: bool) -> Result<()> {
        let position = self.position(id)?;
        self.fixtures[position].set_enabled(enabled);
        Ok(())
    }

    pub fn set_brightness(&mut self, id: u64, brightness: f32) -> Result<()> {
        let position = self.position(id)?;
        self.fixtures[position].set_brightness(brightness)
    }

    /// Restore one fixture from a stored configuration.
    ///
    /// The fixture resyncs once; the fixtures behind it are reindexed and the
    /// model is published even when part of the configuration was rejected.
    pub fn load_fixture(&mut self, id: u64, config: &FixtureConfig) -> Result<()> {
        let position = self.position(id)?;
        let loaded = self.fixtures[position].load(config);
        self.propagate(position, Invalidation::PointsChanged)?;
        loaded.map(|_| ())
    }

    /// Replace every fixture with the given configurations.
    ///
    /// Each fixture is restored with reactions suppressed, indices are
    /// assigned, then each fixture resyncs once and the model is published
    /// once. On error the structure is left unchanged.
    pub fn load(&mut self, configs: &[FixtureConfig]) -> Result<()> {
        let mut fixtures = Vec::with_capacity(configs.len());
        for config in configs {
            let id = self.allocate_id();
            let mut fixture = Fixture::new(
                id,
                config.label.clone(),
                config.shape.kind().default_shape(),
                Arc::clone(&self.resolver),
            )?;
            fixture.begin_load();
            fixture.apply_config(config)?;
            fixtures.push(fixture);
        }

        let mut base = 0;
        for fixture in &mut fixtures {
            fixture.set_index_base(base);
            base += fixture.size();
        }
        for fixture in &mut fixtures {
            fixture.end_load();
        }

        self.fixtures = fixtures;
        tracing::info!(
            "Loaded {} fixtures with {} points",
            self.fixtures.len(),
            self.size()
        );
        self.publish()
    }

    /// Stored configuration of every fixture, in order
    pub fn save(&self) -> Vec<FixtureConfig> {
        self.fixtures.iter().map(Fixture::config).collect()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn position(&self, id: u64) -> Result<usize> {
        self.fixtures
            .iter()
            .position(|f| f.id() == id)
            .ok_or(ControlError::FixtureNotFound(id))
    }

    fn propagate(&mut self, position: usize, invalidation: Invalidation) -> Result<()> {
        if invalidation.requires_reindex() {
            self.reindex_from(position + 1);
        }
        if invalidation.requires_publish() {
            self.publish()?;
        }
        Ok(())
    }

    /// Reassign indices of every fixture from `position` on
    fn reindex_from(&mut self, position: usize) {
        let mut base: usize = self.fixtures[..position].iter().map(Fixture::size).sum();
        let mut moved = 0;
        for fixture in &mut self.fixtures[position..] {
            if fixture.set_index_base(base) {
                moved += 1;
            }
            base += fixture.size();
        }
        tracing::debug!("Reindexed from fixture #{}: {} moved", position, moved);
    }

    fn publish(&mut self) -> Result<()> {
        self.generation += 1;
        let points: Vec<Point> = self
            .fixtures
            .iter()
            .flat_map(|f| f.points().iter().copied())
            .collect();
        let mut builder = ModelBuilder::new(self.generation, points)?;
        for fixture in &self.fixtures {
            builder = builder.fixture(FixtureSpan {
                fixture_id: fixture.id(),
                label: fixture.label().to_string(),
                start: fixture.index_base(),
                size: fixture.size(),
                slices: fixture.slices(),
            })?;
        }
        let model = Arc::new(builder.build());
        self.subscribers
            .retain(|tx| tx.send(Arc::clone(&model)).is_ok());
        tracing::debug!(
            "Published model generation {} ({} points, {} subscribers)",
            model.generation(),
            model.size(),
            self.subscribers.len()
        );
        self.model = model;
        Ok(())
    }
}
