//! Circular arc of points

use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::transform::TransformStack;

/// Where the fixture origin sits relative to the arc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ArcMode {
    /// The first point sits at the fixture origin
    #[default]
    Origin,
    /// The circle center sits at the fixture origin
    Center,
}

/// Points spread over `degrees` of a circle of `radius`, in the local XY plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcShape {
    pub num_points: u32,
    pub radius: f32,
    /// Total sweep from first to last point
    pub degrees: f32,
    pub mode: ArcMode,
}

impl Default for ArcShape {
    fn default() -> Self {
        Self {
            num_points: 10,
            radius: 100.0,
            degrees: 90.0,
            mode: ArcMode::Origin,
        }
    }
}

impl ArcShape {
    pub fn size(&self) -> usize {
        self.num_points as usize
    }

    /// Angle between neighbouring points, radians. `None` for a single point.
    pub fn step(&self) -> Option<f32> {
        if self.num_points < 2 {
            return None;
        }
        Some(self.degrees.to_radians() / (self.num_points - 1) as f32)
    }

    pub(crate) fn place(&self, transform: &mut TransformStack, points: &mut [Point]) {
        let Some(step) = self.step() else {
            // Single point: no sweep to divide, stays on the untranslated origin
            if let Some(point) = points.first_mut() {
                point.position = transform.position();
            }
            return;
        };
        if self.mode == ArcMode::Origin {
            transform.translate(-self.radius, 0.0, 0.0);
        }
        for point in points.iter_mut() {
            transform.push();
            transform.translate(self.radius, 0.0, 0.0);
            point.position = transform.position();
            transform.pop();
            transform.rotate_z(step);
        }
    }
}
