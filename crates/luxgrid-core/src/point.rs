//! Addressable points

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A single light-emitting position.
///
/// The index is global across the whole structure and is assigned by whoever
/// composes fixtures together, never by the fixture itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Dense global index
    pub index: usize,
    /// World-space position
    pub position: Vec3,
}

impl Point {
    /// Create a point at the origin
    pub fn new(index: usize) -> Self {
        Self {
            index,
            position: Vec3::ZERO,
        }
    }

    /// X coordinate
    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Y coordinate
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Z coordinate
    pub fn z(&self) -> f32 {
        self.position.z
    }
}

/// Allocate `count` points numbered from `base`
pub fn allocate(base: usize, count: usize) -> Vec<Point> {
    (0..count).map(|i| Point::new(base + i)).collect()
}

/// Renumber points in place so the first one carries `base`
pub fn renumber(points: &mut [Point], base: usize) {
    for (i, point) in points.iter_mut().enumerate() {
        point.index = base + i;
    }
}
