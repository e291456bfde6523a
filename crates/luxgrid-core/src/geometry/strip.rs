//! Linear strip of evenly spaced points

use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::transform::TransformStack;

/// Points laid out along local +X
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StripShape {
    pub num_points: u32,
    pub spacing: f32,
}

impl Default for StripShape {
    fn default() -> Self {
        Self {
            num_points: 30,
            spacing: 10.0,
        }
    }
}

impl StripShape {
    pub fn size(&self) -> usize {
        self.num_points as usize
    }

    pub(crate) fn place(&self, transform: &mut TransformStack, points: &mut [Point]) {
        for point in points.iter_mut() {
            point.position = transform.position();
            transform.translate(self.spacing, 0.0, 0.0);
        }
    }
}
