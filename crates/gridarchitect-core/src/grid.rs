//! The cell grid and per-axis track sizes.

use serde::{Deserialize, Serialize};

/// Label of a cell that belongs to no area.
pub const EMPTY_CELL: &str = ".";

/// Smallest allowed row/column count.
pub const MIN_TRACKS: usize = 1;

/// Largest allowed row/column count.
pub const MAX_TRACKS: usize = 48;

/// Size token used for newly created tracks.
pub const DEFAULT_TRACK_SIZE: &str = "1fr";

/// Clamp a requested track count into `[MIN_TRACKS, MAX_TRACKS]`.
pub fn clamp_tracks(count: usize) -> usize {
    count.clamp(MIN_TRACKS, MAX_TRACKS)
}

/// A rectangular grid of cell labels.
///
/// Every row holds exactly `cols` labels. A label is either [`EMPTY_CELL`]
/// or the name of an area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    cells: Vec<Vec<String>>,
}

impl Grid {
    /// Create an all-empty grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![EMPTY_CELL.to_string(); cols]; rows],
        }
    }

    /// Build a grid from explicit rows. Short rows are padded with
    /// [`EMPTY_CELL`] and long rows truncated to the width of the first row.
    pub fn from_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let cols = cells.first().map(Vec::len).unwrap_or(0);
        for row in &mut cells {
            row.resize(cols, EMPTY_CELL.to_string());
        }
        Self { cells }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cells.first().map(Vec::len).unwrap_or(0)
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Label at `(row, col)`, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row)?.get(col).map(String::as_str)
    }

    /// Overwrite the label at `(row, col)`. Returns false when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, label: &str) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                label.clone_into(cell);
                true
            }
            None => false,
        }
    }

    /// Iterate over the rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[String]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Iterate over `(row, col, label)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, label)| (r, c, label.as_str()))
        })
    }

    /// A new grid of the given size that keeps every label inside the overlap
    /// with this one and fills the rest with [`EMPTY_CELL`].
    pub fn resized(&self, rows: usize, cols: usize) -> Self {
        let cells = (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| self.get(r, c).unwrap_or(EMPTY_CELL).to_string())
                    .collect()
            })
            .collect();
        Self { cells }
    }

    /// Reset every cell to [`EMPTY_CELL`], keeping the dimensions.
    pub fn clear(&mut self) {
        *self = Self::new(self.rows(), self.cols());
    }

    /// Replace every cell labelled `name` with [`EMPTY_CELL`].
    /// Returns the number of cells cleared.
    pub fn erase(&mut self, name: &str) -> usize {
        let mut erased = 0;
        for cell in self.cells.iter_mut().flatten() {
            if cell == name {
                *cell = EMPTY_CELL.to_string();
                erased += 1;
            }
        }
        erased
    }

    /// Distinct area labels in row-major discovery order.
    pub fn used_areas(&self) -> Vec<String> {
        let mut used: Vec<String> = Vec::new();
        for (_, _, label) in self.iter_cells() {
            if label != EMPTY_CELL && !used.iter().any(|u| u == label) {
                used.push(label.to_string());
            }
        }
        used
    }

    /// Coordinates of every cell labelled `name`, row-major.
    pub fn cells_of(&self, name: &str) -> Vec<(usize, usize)> {
        self.iter_cells()
            .filter(|&(_, _, label)| label == name)
            .map(|(r, c, _)| (r, c))
            .collect()
    }

    /// Whether every cell is empty.
    pub fn is_empty(&self) -> bool {
        self.iter_cells().all(|(_, _, label)| label == EMPTY_CELL)
    }
}

/// Size tokens for one axis, one per track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackSizes(Vec<String>);

impl TrackSizes {
    /// `count` tracks of [`DEFAULT_TRACK_SIZE`].
    pub fn new(count: usize) -> Self {
        Self(vec![DEFAULT_TRACK_SIZE.to_string(); count])
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Token for track `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Replace the token for track `index`. Returns false when out of range.
    pub fn set(&mut self, index: usize, token: &str) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                token.clone_into(slot);
                true
            }
            None => false,
        }
    }

    /// Keep existing tokens by index, pad with the default, drop extras.
    pub fn resize(&mut self, count: usize) {
        self.0.resize(count, DEFAULT_TRACK_SIZE.to_string());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Space-joined template value, e.g. `1fr 2fr 120px`.
    pub fn template(&self) -> String {
        self.0.join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for TrackSizes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
