use std::ops::Range;

use itertools::Itertools;

use crate::geometry::primitives::Rect;

/// Coordinates within this distance (in cells) of a grid line snap onto it,
/// so `3.9999999 / 0.5` still maps to the boundary at cell 8.
const SNAP_TOLERANCE: f64 = 1e-6;

/// Half-open ranges of columns and rows covered by a rectangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellRange {
    pub cols: Range<usize>,
    pub rows: Range<usize>,
}

/// Dense boolean occupancy map over the stand footprint.
/// Cell `(col, row)` covers `[col * res, (col + 1) * res) x [row * res, (row + 1) * res)`.
///
/// A rectangle claims every cell it touches with a positive area, so two rectangles whose
/// claimed cells are disjoint can never overlap. Rectangles sharing an edge on a grid line stay compatible.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    cells: Vec<bool>,
    pub resolution: f64,
    pub n_cols: usize,
    pub n_rows: usize,
}

impl OccupancyGrid {
    /// Creates an empty grid of `⌈width/res⌉+1` columns by `⌈depth/res⌉+1` rows.
    pub fn new(width: f64, depth: f64, resolution: f64) -> Self {
        assert!(
            resolution.is_finite() && resolution > 0.0,
            "grid resolution must be strictly positive, got {resolution}"
        );
        let n_cols = (width.max(0.0) / resolution).ceil() as usize + 1;
        let n_rows = (depth.max(0.0) / resolution).ceil() as usize + 1;

        Self {
            cells: vec![false; n_cols * n_rows],
            resolution,
            n_cols,
            n_rows,
        }
    }

    /// Translates a rectangle into the ranges of grid cells it covers, clipped to the grid.
    pub fn cell_range(&self, rect: &Rect) -> CellRange {
        let start = |v: f64| -> usize { (v / self.resolution + SNAP_TOLERANCE).floor().max(0.0) as usize };
        let end = |v: f64| -> usize { (v / self.resolution - SNAP_TOLERANCE).ceil().max(0.0) as usize };

        let cols = usize::min(start(rect.x_min), self.n_cols)..usize::min(end(rect.x_max), self.n_cols);
        let rows = usize::min(start(rect.y_min), self.n_rows)..usize::min(end(rect.y_max), self.n_rows);

        CellRange { cols, rows }
    }

    /// True if none of the cells covered by `rect` are occupied.
    pub fn is_free(&self, rect: &Rect) -> bool {
        let range = self.cell_range(rect);
        range
            .rows
            .clone()
            .cartesian_product(range.cols.clone())
            .all(|(row, col)| !self.cells[row * self.n_cols + col])
    }

    /// Marks all cells covered by `rect` as occupied.
    /// Returns the number of cells that were free before.
    pub fn occupy(&mut self, rect: &Rect) -> usize {
        let range = self.cell_range(rect);
        let mut newly_occupied = 0;
        for (row, col) in range.rows.cartesian_product(range.cols) {
            let cell = &mut self.cells[row * self.n_cols + col];
            if !*cell {
                *cell = true;
                newly_occupied += 1;
            }
        }
        newly_occupied
    }

    pub fn n_occupied(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Area (m²) covered by the occupied cells
    pub fn occupied_area(&self) -> f64 {
        self.n_occupied() as f64 * self.resolution.powi(2)
    }
}
