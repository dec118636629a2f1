//! Rectangle validation for painted areas.
//!
//! `grid-template-areas` only accepts areas that form a single solid
//! rectangle. An area passes when its cell count equals the area of its
//! bounding box, which rejects holes, L-shapes and disjoint islands alike.

use crate::grid::Grid;

/// Bounding box of the cells carrying one area label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaBounds {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
    /// Number of cells carrying the label.
    pub cells: usize,
}

impl AreaBounds {
    /// Number of cells inside the bounding box.
    pub fn box_area(&self) -> usize {
        (self.max_row - self.min_row + 1) * (self.max_col - self.min_col + 1)
    }

    /// Whether the labelled cells exactly fill the box.
    pub fn is_solid(&self) -> bool {
        self.cells == self.box_area()
    }
}

/// Bounding box of `name`, or `None` when no cell carries it.
pub fn area_bounds(grid: &Grid, name: &str) -> Option<AreaBounds> {
    let mut bounds: Option<AreaBounds> = None;
    for (r, c) in grid.cells_of(name) {
        bounds = Some(match bounds {
            None => AreaBounds {
                min_row: r,
                max_row: r,
                min_col: c,
                max_col: c,
                cells: 1,
            },
            Some(b) => AreaBounds {
                min_row: b.min_row.min(r),
                max_row: b.max_row.max(r),
                min_col: b.min_col.min(c),
                max_col: b.max_col.max(c),
                cells: b.cells + 1,
            },
        });
    }
    bounds
}

/// Whether `name` forms a solid rectangle. Unused names pass vacuously.
pub fn is_rectangular(grid: &Grid, name: &str) -> bool {
    area_bounds(grid, name).is_none_or(|b| b.is_solid())
}

/// Used areas that do not form a solid rectangle, in discovery order.
pub fn invalid_areas(grid: &Grid) -> Vec<String> {
    grid.used_areas()
        .into_iter()
        .filter(|name| !is_rectangular(grid, name))
        .collect()
}

/// Whether every used area forms a solid rectangle.
pub fn is_valid(grid: &Grid) -> bool {
    grid.used_areas()
        .iter()
        .all(|name| is_rectangular(grid, name))
}
