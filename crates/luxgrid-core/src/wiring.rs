//! Wiring topologies for rectangular grids
//!
//! Grid points are always generated row-major with row 0 at the bottom and
//! column 0 on the left. The physical cable rarely runs that way, so before
//! addressing the point indices are permuted into wire order.
//!
//! A topology is a major axis, a starting corner and whether the inner run
//! reverses direction on every other line (serpentine).

use serde::{Deserialize, Serialize};

/// Line that the cable runs along first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Each run covers one row
    Rows,
    /// Each run covers one column
    Columns,
}

/// Corner where the first point of the cable sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

impl Corner {
    fn is_bottom(self) -> bool {
        matches!(self, Corner::BottomLeft | Corner::BottomRight)
    }

    fn is_left(self) -> bool {
        matches!(self, Corner::BottomLeft | Corner::TopLeft)
    }
}

/// Physical cable order of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Wiring {
    /// Rows bottom to top, each left to right
    #[default]
    RowsL2RB2T,
    /// Rows top to bottom, each left to right
    RowsL2RT2B,
    /// Rows bottom to top, each right to left
    RowsR2LB2T,
    /// Rows top to bottom, each right to left
    RowsR2LT2B,
    /// Columns left to right, each bottom to top
    ColumnsB2TL2R,
    /// Columns left to right, each top to bottom
    ColumnsT2BL2R,
    /// Columns right to left, each bottom to top
    ColumnsB2TR2L,
    /// Columns right to left, each top to bottom
    ColumnsT2BR2L,
    ZigzagHorizBottomLeft,
    ZigzagHorizBottomRight,
    ZigzagHorizTopLeft,
    ZigzagHorizTopRight,
    ZigzagVertBottomLeft,
    ZigzagVertBottomRight,
    ZigzagVertTopLeft,
    ZigzagVertTopRight,
}

impl Wiring {
    /// Every topology, in selector order
    pub const ALL: [Wiring; 16] = [
        Wiring::RowsL2RB2T,
        Wiring::RowsL2RT2B,
        Wiring::RowsR2LB2T,
        Wiring::RowsR2LT2B,
        Wiring::ColumnsB2TL2R,
        Wiring::ColumnsT2BL2R,
        Wiring::ColumnsB2TR2L,
        Wiring::ColumnsT2BR2L,
        Wiring::ZigzagHorizBottomLeft,
        Wiring::ZigzagHorizBottomRight,
        Wiring::ZigzagHorizTopLeft,
        Wiring::ZigzagHorizTopRight,
        Wiring::ZigzagVertBottomLeft,
        Wiring::ZigzagVertBottomRight,
        Wiring::ZigzagVertTopLeft,
        Wiring::ZigzagVertTopRight,
    ];

    /// Look up a topology by its selector position
    pub fn from_ordinal(ordinal: usize) -> Option<Wiring> {
        Self::ALL.get(ordinal).copied()
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Wiring::RowsL2RB2T => "Rows, Left→Right, Bottom→Top",
            Wiring::RowsL2RT2B => "Rows, Left→Right, Top→Bottom",
            Wiring::RowsR2LB2T => "Rows, Right→Left, Bottom→Top",
            Wiring::RowsR2LT2B => "Rows, Right→Left, Top→Bottom",
            Wiring::ColumnsB2TL2R => "Columns, Bottom→Top, Left→Right",
            Wiring::ColumnsT2BL2R => "Columns, Top→Bottom, Left→Right",
            Wiring::ColumnsB2TR2L => "Columns, Bottom→Top, Right→Left",
            Wiring::ColumnsT2BR2L => "Columns, Top→Bottom, Right→Left",
            Wiring::ZigzagHorizBottomLeft => "Zigzag Horizontal, Bottom Left",
            Wiring::ZigzagHorizBottomRight => "Zigzag Horizontal, Bottom Right",
            Wiring::ZigzagHorizTopLeft => "Zigzag Horizontal, Top Left",
            Wiring::ZigzagHorizTopRight => "Zigzag Horizontal, Top Right",
            Wiring::ZigzagVertBottomLeft => "Zigzag Vertical, Bottom Left",
            Wiring::ZigzagVertBottomRight => "Zigzag Vertical, Bottom Right",
            Wiring::ZigzagVertTopLeft => "Zigzag Vertical, Top Left",
            Wiring::ZigzagVertTopRight => "Zigzag Vertical, Top Right",
        }
    }

    /// Decompose into (major axis, start corner, serpentine)
    pub fn traversal(&self) -> (Axis, Corner, bool) {
        use Axis::*;
        use Corner::*;
        match self {
            Wiring::RowsL2RB2T => (Rows, BottomLeft, false),
            Wiring::RowsL2RT2B => (Rows, TopLeft, false),
            Wiring::RowsR2LB2T => (Rows, BottomRight, false),
            Wiring::RowsR2LT2B => (Rows, TopRight, false),
            Wiring::ColumnsB2TL2R => (Columns, BottomLeft, false),
            Wiring::ColumnsT2BL2R => (Columns, TopLeft, false),
            Wiring::ColumnsB2TR2L => (Columns, BottomRight, false),
            Wiring::ColumnsT2BR2L => (Columns, TopRight, false),
            Wiring::ZigzagHorizBottomLeft => (Rows, BottomLeft, true),
            Wiring::ZigzagHorizBottomRight => (Rows, BottomRight, true),
            Wiring::ZigzagHorizTopLeft => (Rows, TopLeft, true),
            Wiring::ZigzagHorizTopRight => (Rows, TopRight, true),
            Wiring::ZigzagVertBottomLeft => (Columns, BottomLeft, true),
            Wiring::ZigzagVertBottomRight => (Columns, BottomRight, true),
            Wiring::ZigzagVertTopLeft => (Columns, TopLeft, true),
            Wiring::ZigzagVertTopRight => (Columns, TopRight, true),
        }
    }

    /// Row-major point offsets (`row * columns + column`) in wire order
    pub fn order(&self, rows: usize, columns: usize) -> Vec<usize> {
        let (axis, corner, serpentine) = self.traversal();
        let (outer_len, inner_len) = match axis {
            Axis::Rows => (rows, columns),
            Axis::Columns => (columns, rows),
        };
        // Outer lines run bottom→top / left→right unless the corner says otherwise
        let (outer_reversed, inner_forward) = match axis {
            Axis::Rows => (!corner.is_bottom(), corner.is_left()),
            Axis::Columns => (!corner.is_left(), corner.is_bottom()),
        };
        // Parity of the first outer line visited; lines of the other parity run backwards
        let start_parity = if outer_reversed {
            outer_len.saturating_sub(1) % 2
        } else {
            0
        };

        let mut order = Vec::with_capacity(rows * columns);
        for step in 0..outer_len {
            let outer = if outer_reversed {
                outer_len - 1 - step
            } else {
                step
            };
            let flip = serpentine && outer % 2 != start_parity;
            let forward = inner_forward != flip;
            for i in 0..inner_len {
                let inner = if forward { i } else { inner_len - 1 - i };
                let (row, column) = match axis {
                    Axis::Rows => (outer, inner),
                    Axis::Columns => (inner, outer),
                };
                order.push(row * columns + column);
            }
        }
        order
    }
}

/// Inverse of a permutation: `inverse[order[i]] == i`
pub fn invert(order: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; order.len()];
    for (position, &offset) in order.iter().enumerate() {
        inverse[offset] = position;
    }
    inverse
}
