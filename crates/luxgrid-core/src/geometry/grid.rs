//! Rectangular grid of points

use serde::{Deserialize, Serialize};

use crate::model::Slice;
use crate::point::Point;
use crate::transform::TransformStack;
use crate::wiring::Wiring;

/// `rows × columns` points, generated row-major from the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: u32,
    pub columns: u32,
    pub row_spacing: f32,
    pub column_spacing: f32,
    #[serde(default)]
    pub wiring: Wiring,
}

impl Default for GridShape {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 10,
            row_spacing: 10.0,
            column_spacing: 10.0,
            wiring: Wiring::default(),
        }
    }
}

impl GridShape {
    pub fn size(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    pub(crate) fn place(&self, transform: &mut TransformStack, points: &mut [Point]) {
        let columns = self.columns as usize;
        for (i, point) in points.iter_mut().enumerate() {
            let row = i / columns;
            let column = i % columns;
            transform.push();
            transform.translate(
                column as f32 * self.column_spacing,
                row as f32 * self.row_spacing,
                0.0,
            );
            point.position = transform.position();
            transform.pop();
        }
    }

    /// Local point offsets in wire order
    pub fn wire_order(&self) -> Vec<usize> {
        self.wiring
            .order(self.rows as usize, self.columns as usize)
    }

    /// One slice per row, then one per column
    pub(crate) fn slices(&self, start: usize) -> Vec<Slice> {
        let rows = self.rows as usize;
        let columns = self.columns as usize;
        let row_slices = (0..rows).map(|r| Slice::new("row", start + r * columns, columns, 1));
        let column_slices = (0..columns).map(|c| Slice::new("column", start + c, rows, columns));
        row_slices.chain(column_slices).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point;
    use glam::{Mat4, Vec3};

    #[test]
    fn test_grid_positions_row_major() {
        let grid = GridShape {
            rows: 2,
            columns: 3,
            row_spacing: 5.0,
            column_spacing: 1.0,
            wiring: Wiring::default(),
        };
        let mut points = point::allocate(0, grid.size());
        let mut transform = TransformStack::new(Mat4::IDENTITY);
        grid.place(&mut transform, &mut points);
        assert_eq!(points[0].position, Vec3::ZERO);
        assert_eq!(points[2].position, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(points[3].position, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(points[5].position, Vec3::new(2.0, 5.0, 0.0));
    }

    #[test]
    fn test_grid_slices() {
        let grid = GridShape {
            rows: 2,
            columns: 3,
            ..GridShape::default()
        };
        let slices = grid.slices(100);
        assert_eq!(slices.len(), 5);
        assert_eq!(slices[1], Slice::new("row", 103, 3, 1));
        assert_eq!(slices[4], Slice::new("column", 102, 2, 3));
    }
}
