//! Geometry engine
//!
//! A [`Shape`] is the geometry provider of a fixture. It decides how many
//! points the fixture has, where each one sits, the wire order of the points
//! and which named slices are published as submodels.
//!
//! Positioning always starts from the parent transform with the fixture
//! placement concatenated onto it; shapes only ever add nested operations on
//! top of that.

pub mod arc;
pub mod grid;
pub mod strip;

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::model::Slice;
use crate::point::Point;
use crate::tier::{Tier, Tiered};
use crate::transform::{Placement, TransformStack};
use crate::wiring::Wiring;
use crate::{CoreError, Result};

pub use arc::{ArcMode, ArcShape};
pub use grid::GridShape;
pub use strip::StripShape;

/// Upper bound for any point count parameter (points, rows, columns)
pub const MAX_POINTS_PER_AXIS: u32 = 4096;

/// Kind of fixture shape, fixed when the fixture is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Point,
    Strip,
    Arc,
    Grid,
}

impl ShapeKind {
    /// A shape of this kind with default parameters
    pub fn default_shape(&self) -> Shape {
        match self {
            ShapeKind::Point => Shape::Point,
            ShapeKind::Strip => Shape::Strip(StripShape::default()),
            ShapeKind::Arc => Shape::Arc(ArcShape::default()),
            ShapeKind::Grid => Shape::Grid(GridShape::default()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Point => "point",
            ShapeKind::Strip => "strip",
            ShapeKind::Arc => "arc",
            ShapeKind::Grid => "grid",
        }
    }
}

/// Shape parameters of a fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// A single point at the fixture origin
    Point,
    Strip(StripShape),
    Arc(ArcShape),
    Grid(GridShape),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Point => ShapeKind::Point,
            Shape::Strip(_) => ShapeKind::Strip,
            Shape::Arc(_) => ShapeKind::Arc,
            Shape::Grid(_) => ShapeKind::Grid,
        }
    }

    /// Number of points this shape produces
    pub fn size(&self) -> usize {
        match self {
            Shape::Point => 1,
            Shape::Strip(strip) => strip.size(),
            Shape::Arc(arc) => arc.size(),
            Shape::Grid(grid) => grid.size(),
        }
    }

    /// Write world positions into `points`.
    ///
    /// `points.len()` must equal [`Shape::size`]; nothing is allocated.
    pub fn place(&self, parent: Mat4, placement: &Placement, points: &mut [Point]) {
        assert_eq!(
            points.len(),
            self.size(),
            "point buffer does not match shape size"
        );
        let mut transform = TransformStack::new(parent);
        transform.multiply(placement.to_matrix());
        match self {
            Shape::Point => points[0].position = transform.position(),
            Shape::Strip(strip) => strip.place(&mut transform, points),
            Shape::Arc(arc) => arc.place(&mut transform, points),
            Shape::Grid(grid) => grid.place(&mut transform, points),
        }
    }

    /// Local offsets (0-based) of the points in wire order
    pub fn wire_order(&self) -> Vec<usize> {
        match self {
            Shape::Grid(grid) => grid.wire_order(),
            other => (0..other.size()).collect(),
        }
    }

    /// Named slices published as submodels, relative to `start`
    pub fn slices(&self, start: usize) -> Vec<Slice> {
        match self {
            Shape::Point => Vec::new(),
            Shape::Strip(strip) => vec![Slice::new("strip", start, strip.size(), 1)],
            Shape::Arc(arc) => vec![Slice::new("arc", start, arc.size(), 1)],
            Shape::Grid(grid) => grid.slices(start),
        }
    }

    /// Apply a shape parameter change.
    ///
    /// Fails when the parameter does not exist on this shape or is out of range.
    pub fn apply(&mut self, param: ShapeParam) -> Result<()> {
        param.validate()?;
        match (self, param) {
            (Shape::Strip(strip), ShapeParam::NumPoints(n)) => strip.num_points = n,
            (Shape::Strip(strip), ShapeParam::Spacing(v)) => strip.spacing = v,
            (Shape::Arc(arc), ShapeParam::NumPoints(n)) => arc.num_points = n,
            (Shape::Arc(arc), ShapeParam::Radius(v)) => arc.radius = v,
            (Shape::Arc(arc), ShapeParam::Degrees(v)) => arc.degrees = v,
            (Shape::Arc(arc), ShapeParam::ArcMode(mode)) => arc.mode = mode,
            (Shape::Grid(grid), ShapeParam::Rows(n)) => grid.rows = n,
            (Shape::Grid(grid), ShapeParam::Columns(n)) => grid.columns = n,
            (Shape::Grid(grid), ShapeParam::RowSpacing(v)) => grid.row_spacing = v,
            (Shape::Grid(grid), ShapeParam::ColumnSpacing(v)) => grid.column_spacing = v,
            (Shape::Grid(grid), ShapeParam::Wiring(wiring)) => grid.wiring = wiring,
            (shape, param) => {
                return Err(CoreError::ShapeMismatch(format!(
                    "{} fixtures have no {} parameter",
                    shape.kind().name(),
                    param.name()
                )))
            }
        }
        Ok(())
    }

    /// Check every parameter against its allowed range
    pub fn validate(&self) -> Result<()> {
        self.params().iter().try_for_each(ShapeParam::validate)
    }

    /// The shape expressed as parameter changes, for restore
    pub fn params(&self) -> Vec<ShapeParam> {
        match self {
            Shape::Point => Vec::new(),
            Shape::Strip(strip) => vec![
                ShapeParam::NumPoints(strip.num_points),
                ShapeParam::Spacing(strip.spacing),
            ],
            Shape::Arc(arc) => vec![
                ShapeParam::NumPoints(arc.num_points),
                ShapeParam::Radius(arc.radius),
                ShapeParam::Degrees(arc.degrees),
                ShapeParam::ArcMode(arc.mode),
            ],
            Shape::Grid(grid) => vec![
                ShapeParam::Rows(grid.rows),
                ShapeParam::Columns(grid.columns),
                ShapeParam::RowSpacing(grid.row_spacing),
                ShapeParam::ColumnSpacing(grid.column_spacing),
                ShapeParam::Wiring(grid.wiring),
            ],
        }
    }
}

/// Shape parameter change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShapeParam {
    /// Strip and arc point count
    NumPoints(u32),
    /// Strip point spacing
    Spacing(f32),
    Radius(f32),
    /// Total arc sweep, in degrees
    Degrees(f32),
    ArcMode(ArcMode),
    Rows(u32),
    Columns(u32),
    RowSpacing(f32),
    ColumnSpacing(f32),
    Wiring(Wiring),
}

impl ShapeParam {
    /// Parameter name
    pub fn name(&self) -> &'static str {
        match self {
            ShapeParam::NumPoints(_) => "num_points",
            ShapeParam::Spacing(_) => "spacing",
            ShapeParam::Radius(_) => "radius",
            ShapeParam::Degrees(_) => "degrees",
            ShapeParam::ArcMode(_) => "arc_mode",
            ShapeParam::Rows(_) => "rows",
            ShapeParam::Columns(_) => "columns",
            ShapeParam::RowSpacing(_) => "row_spacing",
            ShapeParam::ColumnSpacing(_) => "column_spacing",
            ShapeParam::Wiring(_) => "wiring",
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            ShapeParam::NumPoints(n) | ShapeParam::Rows(n) | ShapeParam::Columns(n) => {
                if n == 0 || n > MAX_POINTS_PER_AXIS {
                    return Err(CoreError::InvalidParameter(format!(
                        "{} must be within 1..={}, got {}",
                        self.name(),
                        MAX_POINTS_PER_AXIS,
                        n
                    )));
                }
            }
            ShapeParam::Spacing(v)
            | ShapeParam::Radius(v)
            | ShapeParam::Degrees(v)
            | ShapeParam::RowSpacing(v)
            | ShapeParam::ColumnSpacing(v) => {
                if !v.is_finite() {
                    return Err(CoreError::InvalidParameter(format!(
                        "{} must be finite, got {}",
                        self.name(),
                        v
                    )));
                }
            }
            ShapeParam::ArcMode(_) | ShapeParam::Wiring(_) => {}
        }
        Ok(())
    }
}

impl Tiered for ShapeParam {
    fn tier(&self) -> Tier {
        match self {
            ShapeParam::NumPoints(_) | ShapeParam::Rows(_) | ShapeParam::Columns(_) => {
                Tier::Metrics
            }
            ShapeParam::Spacing(_)
            | ShapeParam::Radius(_)
            | ShapeParam::Degrees(_)
            | ShapeParam::ArcMode(_)
            | ShapeParam::RowSpacing(_)
            | ShapeParam::ColumnSpacing(_) => Tier::Geometry,
            ShapeParam::Wiring(_) => Tier::Output,
        }
    }
}
