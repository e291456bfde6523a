//! Published model snapshots
//!
//! A [`Model`] is an immutable deep copy of every point in the structure,
//! taken after indices are final. Consumers on other threads hold it behind an
//! `Arc` and never see it change; the next topology or geometry change
//! produces a brand new model.
//!
//! Submodels are slices of the snapshot. They are only ever cut from the
//! point list the model itself owns, so their points are always identical to
//! the snapshot's.

use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::{CoreError, Result};

/// `(start, count, stride)` descriptor of a named group of points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    pub name: String,
    pub start: usize,
    pub count: usize,
    pub stride: usize,
}

impl Slice {
    pub fn new(name: impl Into<String>, start: usize, count: usize, stride: usize) -> Self {
        Self {
            name: name.into(),
            start,
            count,
            stride,
        }
    }

    /// Global indices covered by the slice
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.count).map(move |i| self.start + i * self.stride)
    }

    fn last(&self) -> Option<usize> {
        self.count
            .checked_sub(1)
            .map(|n| self.start + n * self.stride)
    }
}

/// Named group of points cut from a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submodel {
    name: String,
    points: Vec<Point>,
}

impl Submodel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn size(&self) -> usize {
        self.points.len()
    }
}

/// Span of one fixture inside a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureModel {
    pub fixture_id: u64,
    pub label: String,
    /// Index of the fixture's first point
    pub start: usize,
    pub size: usize,
    pub submodels: Vec<Submodel>,
}

/// Description of a fixture handed to [`ModelBuilder`]
#[derive(Debug, Clone)]
pub struct FixtureSpan {
    pub fixture_id: u64,
    pub label: String,
    pub start: usize,
    pub size: usize,
    pub slices: Vec<Slice>,
}

/// Immutable snapshot of the whole structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    generation: u64,
    points: Vec<Point>,
    fixtures: Vec<FixtureModel>,
}

impl Model {
    /// A model with no points
    pub fn empty() -> Self {
        Self {
            generation: 0,
            points: Vec::new(),
            fixtures: Vec::new(),
        }
    }

    /// Publish counter, increases with every snapshot
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn size(&self) -> usize {
        self.points.len()
    }

    pub fn fixtures(&self) -> &[FixtureModel] {
        &self.fixtures
    }

    /// Snapshot span of one fixture
    pub fn fixture(&self, fixture_id: u64) -> Option<&FixtureModel> {
        self.fixtures.iter().find(|f| f.fixture_id == fixture_id)
    }

    /// All submodels with the given name, across fixtures
    pub fn submodels<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Submodel> + 'a {
        self.fixtures
            .iter()
            .flat_map(|f| f.submodels.iter())
            .filter(move |s| s.name == name)
    }
}

/// Builds a [`Model`] from a point snapshot.
///
/// The builder takes ownership of the copied points, so submodels can only be
/// cut from that snapshot.
#[derive(Debug)]
pub struct ModelBuilder {
    generation: u64,
    points: Vec<Point>,
    fixtures: Vec<FixtureModel>,
}

impl ModelBuilder {
    /// Start from a finished snapshot; indices must be dense and ordered
    pub fn new(generation: u64, points: Vec<Point>) -> Result<Self> {
        if let Some((position, point)) = points
            .iter()
            .enumerate()
            .find(|(position, point)| point.index != *position)
        {
            return Err(CoreError::InvalidSlice(format!(
                "snapshot point at position {} carries index {}",
                position, point.index
            )));
        }
        Ok(Self {
            generation,
            points,
            fixtures: Vec::new(),
        })
    }

    /// Record a fixture span and cut its submodels from the snapshot
    pub fn fixture(mut self, span: FixtureSpan) -> Result<Self> {
        if span.start + span.size > self.points.len() {
            return Err(CoreError::InvalidSlice(format!(
                "fixture {} spans {}..{} but the snapshot has {} points",
                span.fixture_id,
                span.start,
                span.start + span.size,
                self.points.len()
            )));
        }
        let submodels = span
            .slices
            .iter()
            .map(|slice| self.cut(slice))
            .collect::<Result<Vec<_>>>()?;
        self.fixtures.push(FixtureModel {
            fixture_id: span.fixture_id,
            label: span.label,
            start: span.start,
            size: span.size,
            submodels,
        });
        Ok(self)
    }

    fn cut(&self, slice: &Slice) -> Result<Submodel> {
        if slice.count > 1 && slice.stride == 0 {
            return Err(CoreError::InvalidSlice(format!(
                "slice '{}' has zero stride",
                slice.name
            )));
        }
        if let Some(last) = slice.last() {
            if last >= self.points.len() {
                return Err(CoreError::InvalidSlice(format!(
                    "slice '{}' reaches index {} but the snapshot has {} points",
                    slice.name,
                    last,
                    self.points.len()
                )));
            }
        }
        Ok(Submodel {
            name: slice.name.clone(),
            points: slice.indices().map(|i| self.points[i]).collect(),
        })
    }

    pub fn build(self) -> Model {
        Model {
            generation: self.generation,
            points: self.points,
            fixtures: self.fixtures,
        }
    }
}
