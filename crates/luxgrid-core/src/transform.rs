//! Fixture placement and the accumulated transform used to position points
//!
//! A fixture is positioned by concatenating its own placement onto the parent
//! transform, in this fixed order:
//!
//! 1. Translate(x, y, z)
//! 2. Rotate Y (yaw)
//! 3. Rotate X (pitch)
//! 4. Rotate Z (roll)
//!
//! Shape-specific operations are applied after that on the same stack.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::tier::{Tier, Tiered};
use crate::{CoreError, Result};

/// Position and orientation of a fixture relative to its parent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Rotation about Y, in degrees
    pub yaw: f32,
    /// Rotation about X, in degrees
    pub pitch: f32,
    /// Rotation about Z, in degrees
    pub roll: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self::origin()
    }
}

impl Placement {
    /// Placement at the origin with no rotation
    pub fn origin() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
        }
    }

    /// Placement with a position and no rotation
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            ..Self::origin()
        }
    }

    /// Local matrix: translate, then yaw, pitch, roll
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.x, self.y, self.z))
            * Mat4::from_rotation_y(self.yaw.to_radians())
            * Mat4::from_rotation_x(self.pitch.to_radians())
            * Mat4::from_rotation_z(self.roll.to_radians())
    }

    /// Apply a placement parameter change
    pub fn apply(&mut self, param: PlacementParam) -> Result<()> {
        let value = param.value();
        if !value.is_finite() {
            return Err(CoreError::InvalidParameter(format!(
                "{} must be finite, got {}",
                param.name(),
                value
            )));
        }
        match param {
            PlacementParam::X(v) => self.x = v,
            PlacementParam::Y(v) => self.y = v,
            PlacementParam::Z(v) => self.z = v,
            PlacementParam::Yaw(v) => self.yaw = v,
            PlacementParam::Pitch(v) => self.pitch = v,
            PlacementParam::Roll(v) => self.roll = v,
        }
        Ok(())
    }

    /// The placement expressed as parameter changes, for restore
    pub fn params(&self) -> [PlacementParam; 6] {
        [
            PlacementParam::X(self.x),
            PlacementParam::Y(self.y),
            PlacementParam::Z(self.z),
            PlacementParam::Yaw(self.yaw),
            PlacementParam::Pitch(self.pitch),
            PlacementParam::Roll(self.roll),
        ]
    }
}

/// Placement parameter change, all Geometry tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlacementParam {
    X(f32),
    Y(f32),
    Z(f32),
    Yaw(f32),
    Pitch(f32),
    Roll(f32),
}

impl PlacementParam {
    fn value(&self) -> f32 {
        match *self {
            PlacementParam::X(v)
            | PlacementParam::Y(v)
            | PlacementParam::Z(v)
            | PlacementParam::Yaw(v)
            | PlacementParam::Pitch(v)
            | PlacementParam::Roll(v) => v,
        }
    }

    /// Parameter name
    pub fn name(&self) -> &'static str {
        match self {
            PlacementParam::X(_) => "x",
            PlacementParam::Y(_) => "y",
            PlacementParam::Z(_) => "z",
            PlacementParam::Yaw(_) => "yaw",
            PlacementParam::Pitch(_) => "pitch",
            PlacementParam::Roll(_) => "roll",
        }
    }
}

impl Tiered for PlacementParam {
    fn tier(&self) -> Tier {
        Tier::Geometry
    }
}

/// Push/pop matrix stack used while positioning points
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl TransformStack {
    /// Start from a parent transform
    pub fn new(parent: Mat4) -> Self {
        Self {
            current: parent,
            saved: Vec::new(),
        }
    }

    /// Concatenate an arbitrary matrix onto the current transform
    pub fn multiply(&mut self, matrix: Mat4) {
        self.current *= matrix;
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.multiply(Mat4::from_translation(Vec3::new(x, y, z)));
    }

    /// Rotate about X, radians
    pub fn rotate_x(&mut self, radians: f32) {
        self.multiply(Mat4::from_rotation_x(radians));
    }

    /// Rotate about Y, radians
    pub fn rotate_y(&mut self, radians: f32) {
        self.multiply(Mat4::from_rotation_y(radians));
    }

    /// Rotate about Z, radians
    pub fn rotate_z(&mut self, radians: f32) {
        self.multiply(Mat4::from_rotation_z(radians));
    }

    /// Save the current transform
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the last saved transform.
    ///
    /// Popping an empty stack is a programming error.
    pub fn pop(&mut self) {
        self.current = self
            .saved
            .pop()
            .unwrap_or_else(|| panic!("TransformStack::pop called without a matching push"));
    }

    /// The current local origin in world space
    pub fn position(&self) -> Vec3 {
        self.current.transform_point3(Vec3::ZERO)
    }

    /// The current matrix
    pub fn matrix(&self) -> Mat4 {
        self.current
    }
}
