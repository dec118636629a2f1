//! The grid state engine.
//!
//! [`GridState`] is the plain, serializable editor state. [`Editor`] owns it
//! together with everything derived from it, and recomputes the derived values
//! after every mutation so readers never observe stale output.
//!
//! Invalid input is declined silently: mutations return `false` (or an
//! [`AreaError`](crate::area::AreaError)) and leave the state untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::area::{self, AreaResult, DEFAULT_AREAS};
use crate::clipboard::CopyFeedback;
use crate::color::ColorMap;
use crate::css::GridCss;
use crate::grid::{clamp_tracks, Grid, TrackSizes, EMPTY_CELL};
use crate::preview::PreviewLayout;
use crate::validate;

/// Rows and columns of a fresh editor.
pub const DEFAULT_ROWS: usize = 3;
pub const DEFAULT_COLS: usize = 3;

/// Gap of a fresh editor, in pixels.
pub const DEFAULT_GAP: u32 = 12;

/// Upper bound offered by the gap input. Not enforced by the editor.
pub const GAP_INPUT_MAX: u32 = 64;

/// Errors decoding a serialized state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Invalid state JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the user edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridState {
    pub grid: Grid,
    /// Declared area names, in ordinal order.
    pub areas: Vec<String>,
    /// Area used as the paint value; empty when no areas are declared.
    pub selected: String,
    pub gap: u32,
    pub row_sizes: TrackSizes,
    pub col_sizes: TrackSizes,
    /// Contents of the "new area" text field.
    #[serde(default)]
    pub new_area_input: String,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            grid: Grid::new(DEFAULT_ROWS, DEFAULT_COLS),
            areas: DEFAULT_AREAS.iter().map(|a| a.to_string()).collect(),
            selected: DEFAULT_AREAS[0].to_string(),
            gap: DEFAULT_GAP,
            row_sizes: TrackSizes::new(DEFAULT_ROWS),
            col_sizes: TrackSizes::new(DEFAULT_COLS),
            new_area_input: String::new(),
        }
    }
}

impl GridState {
    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON and repair any broken invariant.
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        let mut state: Self = serde_json::from_str(json)?;
        state.normalize();
        Ok(state)
    }

    /// Repair the state so every invariant holds. Returns whether anything
    /// had to change.
    pub fn normalize(&mut self) -> bool {
        let before = self.clone();

        let rows = clamp_tracks(self.grid.rows());
        let cols = clamp_tracks(self.grid.cols());
        self.grid = self.grid.resized(rows, cols);
        self.row_sizes.resize(rows);
        self.col_sizes.resize(cols);

        let mut areas: Vec<String> = Vec::with_capacity(self.areas.len());
        for name in self.areas.drain(..) {
            if area::is_valid_identifier(&name) && !areas.contains(&name) {
                areas.push(name);
            }
        }
        self.areas = areas;

        for name in self.grid.used_areas() {
            if !self.areas.contains(&name) {
                self.grid.erase(&name);
            }
        }

        if !self.areas.contains(&self.selected) {
            self.selected = self.areas.first().cloned().unwrap_or_default();
        }

        let changed = *self != before;
        if changed {
            log::warn!("Repaired inconsistent grid state");
        }
        changed
    }
}

/// Values computed from a [`GridState`].
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    /// Distinct labels present in the grid, row-major discovery order.
    pub used_areas: Vec<String>,
    /// Used areas that are not solid rectangles.
    pub invalid_areas: Vec<String>,
    pub colors: ColorMap,
    pub css: String,
    pub preview: PreviewLayout,
}

impl Derived {
    /// Compute every derived value from scratch.
    pub fn compute(state: &GridState) -> Self {
        let used_areas = state.grid.used_areas();
        let invalid_areas = validate::invalid_areas(&state.grid);
        let colors = ColorMap::for_areas(&state.areas);
        let css = GridCss {
            grid: &state.grid,
            row_sizes: &state.row_sizes,
            col_sizes: &state.col_sizes,
            gap: state.gap,
            used_areas: &used_areas,
        }
        .render();
        let preview = PreviewLayout::build(
            &state.grid,
            &state.row_sizes,
            &state.col_sizes,
            state.gap,
            &used_areas,
            &colors,
        );
        Self {
            used_areas,
            invalid_areas,
            colors,
            css,
            preview,
        }
    }

    /// Whether every used area is a solid rectangle.
    pub fn is_valid(&self) -> bool {
        self.invalid_areas.is_empty()
    }
}

/// The editor session: state, derived values and transient UI flags.
#[derive(Debug, Clone)]
pub struct Editor {
    state: GridState,
    derived: Derived,
    /// Last cell handled by the active paint session.
    painting: Option<(usize, usize)>,
    feedback: CopyFeedback,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// A 3×3 empty grid with the four default areas.
    pub fn new() -> Self {
        Self::from_state(GridState::default())
    }

    /// Start from an existing state, repairing it first.
    pub fn from_state(mut state: GridState) -> Self {
        state.normalize();
        let derived = Derived::compute(&state);
        Self {
            state,
            derived,
            painting: None,
            feedback: CopyFeedback::default(),
        }
    }

    fn recompute(&mut self) {
        self.derived = Derived::compute(&self.state);
    }

    // --- Reads ---

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn derived(&self) -> &Derived {
        &self.derived
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    pub fn rows(&self) -> usize {
        self.state.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.state.grid.cols()
    }

    pub fn areas(&self) -> &[String] {
        &self.state.areas
    }

    pub fn selected(&self) -> &str {
        &self.state.selected
    }

    pub fn gap(&self) -> u32 {
        self.state.gap
    }

    pub fn row_sizes(&self) -> &TrackSizes {
        &self.state.row_sizes
    }

    pub fn col_sizes(&self) -> &TrackSizes {
        &self.state.col_sizes
    }

    pub fn new_area_input(&self) -> &str {
        &self.state.new_area_input
    }

    /// Maximum number of declared areas: one per cell.
    pub fn max_areas(&self) -> usize {
        self.state.grid.cell_count()
    }

    /// Whether no further area can be declared.
    pub fn at_capacity(&self) -> bool {
        self.state.areas.len() >= self.max_areas()
    }

    pub fn is_valid(&self) -> bool {
        self.derived.is_valid()
    }

    /// The exported stylesheet.
    pub fn css(&self) -> &str {
        &self.derived.css
    }

    pub fn colors(&self) -> &ColorMap {
        &self.derived.colors
    }

    /// Whether a drag-paint session is active.
    pub fn is_painting(&self) -> bool {
        self.painting.is_some()
    }

    /// Whether the "copied" confirmation is showing.
    pub fn is_copied(&self) -> bool {
        self.feedback.is_copied()
    }

    // --- Dimensions and tracks ---

    /// Resize to `rows × cols` (each clamped to `[1, 48]`), keeping cells and
    /// track sizes inside the overlap.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let rows = clamp_tracks(rows);
        let cols = clamp_tracks(cols);
        self.state.grid = self.state.grid.resized(rows, cols);
        self.state.row_sizes.resize(rows);
        self.state.col_sizes.resize(cols);
        self.recompute();
    }

    pub fn set_rows(&mut self, rows: usize) {
        self.resize(rows, self.cols());
    }

    pub fn set_cols(&mut self, cols: usize) {
        self.resize(self.rows(), cols);
    }

    /// Set the gap, flooring negative input at zero.
    pub fn set_gap(&mut self, gap: i64) {
        self.state.gap = u32::try_from(gap.max(0)).unwrap_or(u32::MAX);
        self.recompute();
    }

    /// Replace the size token of row `index`. Returns false when out of range.
    pub fn set_row_size(&mut self, index: usize, token: &str) -> bool {
        let changed = self.state.row_sizes.set(index, token);
        if changed {
            self.recompute();
        }
        changed
    }

    /// Replace the size token of column `index`. Returns false when out of range.
    pub fn set_col_size(&mut self, index: usize, token: &str) -> bool {
        let changed = self.state.col_sizes.set(index, token);
        if changed {
            self.recompute();
        }
        changed
    }

    // --- Areas ---

    /// Select a declared area as the paint value.
    pub fn select_area(&mut self, name: &str) -> bool {
        if self.state.areas.iter().any(|a| a == name) {
            name.clone_into(&mut self.state.selected);
            true
        } else {
            false
        }
    }

    pub fn set_new_area_input(&mut self, text: &str) {
        text.clone_into(&mut self.state.new_area_input);
    }

    /// Declare the area typed into the input buffer.
    pub fn add_area(&mut self) -> AreaResult<String> {
        let raw = self.state.new_area_input.clone();
        self.add_area_named(&raw)
    }

    /// Declare a new area from a raw name. On success the area is selected
    /// and the input buffer cleared.
    pub fn add_area_named(&mut self, raw: &str) -> AreaResult<String> {
        let name = area::check_new_area(raw, &self.state.areas, self.max_areas())
            .inspect_err(|e| log::debug!("Rejected area {:?}: {}", raw, e))?;
        self.state.areas.push(name.clone());
        self.state.selected = name.clone();
        self.state.new_area_input.clear();
        self.recompute();
        Ok(name)
    }

    /// Remove a declared area and clear its cells.
    ///
    /// When the removed area was selected, the new selection is picked from
    /// the list as it was before removal: the second entry if the first was
    /// removed, otherwise the first.
    // FIXME: reading the pre-removal list looks unintended, but existing
    // layouts depend on which area ends up selected.
    pub fn remove_area(&mut self, name: &str) -> bool {
        if !self.state.areas.iter().any(|a| a == name) {
            return false;
        }
        let previous = std::mem::take(&mut self.state.areas);
        self.state.areas = previous.iter().filter(|a| *a != name).cloned().collect();
        self.state.grid.erase(name);

        if self.state.selected == name {
            self.state.selected = if previous[0] == name {
                previous.get(1).cloned().unwrap_or_default()
            } else {
                previous[0].clone()
            };
        }
        self.recompute();
        true
    }

    /// Reset every cell to empty. Areas, sizes and gap are kept.
    pub fn clear_grid(&mut self) {
        self.state.grid.clear();
        self.recompute();
    }

    // --- Painting ---

    /// Toggle `(row, col)` between `area` and empty.
    /// Returns false for out-of-bounds cells or an undeclared area.
    pub fn paint_cell(&mut self, row: usize, col: usize, area: &str) -> bool {
        if !self.state.areas.iter().any(|a| a == area) {
            return false;
        }
        let next = match self.state.grid.get(row, col) {
            Some(current) if current == area => EMPTY_CELL,
            Some(_) => area,
            None => return false,
        };
        self.state.grid.set(row, col, next);
        self.recompute();
        true
    }

    /// Pointer-down: start a paint session and toggle the first cell.
    pub fn begin_paint(&mut self, row: usize, col: usize) {
        self.painting = Some((row, col));
        let selected = self.state.selected.clone();
        self.paint_cell(row, col, &selected);
    }

    /// Pointer-enter: while painting, assign the selected area to the cell.
    /// Entering the cell the session last handled again is ignored, so a
    /// re-rendered cell under a still pointer keeps its toggled value.
    pub fn paint_enter(&mut self, row: usize, col: usize) -> bool {
        match self.painting {
            Some(last) if last != (row, col) => self.painting = Some((row, col)),
            _ => return false,
        }
        if self.state.selected.is_empty() {
            return false;
        }
        match self.state.grid.get(row, col) {
            Some(current) if current != self.state.selected => {}
            _ => return false,
        }
        let selected = self.state.selected.clone();
        self.state.grid.set(row, col, &selected);
        self.recompute();
        true
    }

    /// Pointer-up or pointer-leave: end the paint session.
    pub fn end_paint(&mut self) {
        self.painting = None;
    }

    // --- Copy feedback ---

    /// Show the "copied" confirmation; returns the token for the reset.
    pub fn mark_copied(&mut self) -> u64 {
        self.feedback.mark_copied()
    }

    /// Hide the "copied" confirmation if `token` is still current.
    pub fn reset_copied(&mut self, token: u64) -> bool {
        self.feedback.reset(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::AreaError;

    fn editor_with_areas(areas: &[&str]) -> Editor {
        Editor::from_state(GridState {
            areas: areas.iter().map(|a| a.to_string()).collect(),
            selected: areas.first().map(|a| a.to_string()).unwrap_or_default(),
            ..GridState::default()
        })
    }

    #[test]
    fn test_initial_state() {
        let editor = Editor::new();
        assert_eq!((editor.rows(), editor.cols()), (3, 3));
        assert_eq!(editor.areas(), ["header", "sidebar", "main", "footer"]);
        assert_eq!(editor.selected(), "header");
        assert_eq!(editor.gap(), 12);
        assert_eq!(editor.row_sizes().template(), "1fr 1fr 1fr");
        assert!(editor.grid().is_empty());
        assert!(editor.is_valid());
        assert!(!editor.is_painting());
        assert!(!editor.is_copied());
    }

    #[test]
    fn test_resize_clamps_and_tracks_follow() {
        let mut editor = Editor::new();
        editor.paint_cell(2, 2, "main");
        editor.set_row_size(0, "80px");

        editor.resize(0, 60);
        assert_eq!((editor.rows(), editor.cols()), (1, 48));
        assert_eq!(editor.row_sizes().len(), 1);
        assert_eq!(editor.col_sizes().len(), 48);
        assert_eq!(editor.row_sizes().get(0), Some("80px"));

        editor.resize(4, 4);
        assert_eq!(editor.grid().get(2, 2), Some(EMPTY_CELL));
        assert_eq!(editor.row_sizes().template(), "80px 1fr 1fr 1fr");
    }

    #[test]
    fn test_resize_keeps_overlap_cells() {
        let mut editor = Editor::new();
        editor.paint_cell(1, 1, "main");
        editor.set_cols(5);
        assert_eq!(editor.grid().get(1, 1), Some("main"));
        editor.set_rows(2);
        assert_eq!(editor.grid().get(1, 1), Some("main"));
        assert_eq!(editor.grid().rows(), 2);
    }

    #[test]
    fn test_paint_toggles() {
        let mut editor = Editor::new();
        assert!(editor.paint_cell(0, 0, "header"));
        assert_eq!(editor.grid().get(0, 0), Some("header"));
        assert!(editor.paint_cell(0, 0, "header"));
        assert_eq!(editor.grid().get(0, 0), Some(EMPTY_CELL));
        assert!(editor.paint_cell(0, 0, "main"));
        assert_eq!(editor.grid().get(0, 0), Some("main"));
    }

    #[test]
    fn test_paint_rejects_unknown_area_and_bounds() {
        let mut editor = Editor::new();
        assert!(!editor.paint_cell(0, 0, "nope"));
        assert!(!editor.paint_cell(3, 0, "header"));
        assert!(editor.grid().is_empty());
    }

    #[test]
    fn test_drag_paint_assigns() {
        let mut editor = Editor::new();
        editor.paint_cell(0, 1, "header");

        editor.begin_paint(0, 0);
        assert!(editor.is_painting());
        editor.paint_enter(0, 1);
        editor.paint_enter(0, 2);
        editor.end_paint();

        assert_eq!(editor.grid().get(0, 1), Some("header"));
        assert_eq!(editor.grid().get(0, 2), Some("header"));
        assert!(!editor.paint_enter(1, 0));
        assert_eq!(editor.grid().get(1, 0), Some(EMPTY_CELL));
    }

    #[test]
    fn test_begin_paint_toggles_start_cell() {
        let mut editor = Editor::new();
        editor.paint_cell(0, 0, "header");
        editor.begin_paint(0, 0);
        assert_eq!(editor.grid().get(0, 0), Some(EMPTY_CELL));
    }

    #[test]
    fn test_reentering_start_cell_keeps_erase() {
        let mut editor = Editor::new();
        editor.paint_cell(0, 0, "header");
        editor.begin_paint(0, 0);
        assert!(!editor.paint_enter(0, 0));
        assert_eq!(editor.grid().get(0, 0), Some(EMPTY_CELL));

        // Coming back after visiting another cell assigns as usual.
        assert!(editor.paint_enter(0, 1));
        assert!(!editor.paint_enter(0, 1));
        assert!(editor.paint_enter(0, 0));
        assert_eq!(editor.grid().get(0, 0), Some("header"));
    }

    #[test]
    fn test_derived_values_follow_mutations() {
        let mut editor = Editor::new();
        editor.paint_cell(0, 0, "main");
        editor.paint_cell(1, 1, "main");
        assert!(!editor.is_valid());
        assert_eq!(editor.derived().invalid_areas, vec!["main"]);
        assert!(editor.css().contains(".main {"));

        editor.paint_cell(0, 1, "main");
        editor.paint_cell(1, 0, "main");
        assert!(editor.is_valid());

        editor.clear_grid();
        assert!(!editor.css().contains(".main {"));
        assert!(editor.derived().used_areas.is_empty());
    }

    #[test]
    fn test_clear_keeps_everything_else() {
        let mut editor = Editor::new();
        editor.paint_cell(0, 0, "header");
        editor.set_gap(20);
        editor.set_col_size(1, "2fr");
        editor.clear_grid();
        assert!(editor.grid().is_empty());
        assert_eq!(editor.gap(), 20);
        assert_eq!(editor.col_sizes().template(), "1fr 2fr 1fr");
        assert_eq!(editor.areas().len(), 4);
    }

    #[test]
    fn test_set_gap_floors_at_zero() {
        let mut editor = Editor::new();
        editor.set_gap(-5);
        assert_eq!(editor.gap(), 0);
        editor.set_gap(100);
        assert_eq!(editor.gap(), 100);
    }

    #[test]
    fn test_add_area_from_input() {
        let mut editor = Editor::new();
        editor.set_new_area_input("  top  nav ");
        assert_eq!(editor.add_area(), Ok("top-nav".to_string()));
        assert_eq!(editor.selected(), "top-nav");
        assert_eq!(editor.new_area_input(), "");
        assert_eq!(editor.areas().last().map(String::as_str), Some("top-nav"));
    }

    #[test]
    fn test_add_area_rejections_keep_input() {
        let mut editor = Editor::new();
        editor.set_new_area_input("1abc");
        assert!(editor.add_area().is_err());
        assert_eq!(editor.new_area_input(), "1abc");
        assert_eq!(editor.areas().len(), 4);
        assert_eq!(editor.add_area_named(""), Err(AreaError::Empty));
        assert_eq!(
            editor.add_area_named("main"),
            Err(AreaError::Duplicate("main".into()))
        );
    }

    #[test]
    fn test_add_area_capacity() {
        let mut editor = Editor::new();
        editor.resize(1, 5);
        assert!(editor.add_area_named("extra").is_ok());
        assert!(editor.at_capacity());
        assert_eq!(
            editor.add_area_named("more"),
            Err(AreaError::CapacityReached(5))
        );
    }

    #[test]
    fn test_remove_first_selected_area() {
        let mut editor = editor_with_areas(&["header", "sidebar"]);
        editor.paint_cell(0, 0, "header");
        assert!(editor.remove_area("header"));
        assert_eq!(editor.selected(), "sidebar");
        assert_eq!(editor.areas(), ["sidebar"]);
        assert!(editor.grid().is_empty());
    }

    #[test]
    fn test_remove_last_area() {
        let mut editor = editor_with_areas(&["only"]);
        assert!(editor.remove_area("only"));
        assert_eq!(editor.selected(), "");
        assert!(editor.areas().is_empty());
        editor.begin_paint(0, 0);
        assert!(editor.grid().is_empty());
    }

    #[test]
    fn test_remove_other_selected_area() {
        let mut editor = editor_with_areas(&["a", "b", "c"]);
        editor.select_area("c");
        editor.remove_area("c");
        assert_eq!(editor.selected(), "a");
    }

    #[test]
    fn test_remove_unselected_keeps_selection() {
        let mut editor = editor_with_areas(&["a", "b", "c"]);
        editor.select_area("b");
        editor.remove_area("a");
        assert_eq!(editor.selected(), "b");
        assert!(!editor.remove_area("missing"));
    }

    #[test]
    fn test_colors_follow_ordinal() {
        let mut editor = editor_with_areas(&["a", "b"]);
        let b_before = editor.colors().get("b").cloned();
        editor.remove_area("a");
        assert_ne!(editor.colors().get("b").cloned(), b_before);
        assert_eq!(editor.colors().get("b"), Some(&crate::color::area_color(0)));
    }

    #[test]
    fn test_select_area() {
        let mut editor = Editor::new();
        assert!(editor.select_area("main"));
        assert_eq!(editor.selected(), "main");
        assert!(!editor.select_area("nope"));
        assert_eq!(editor.selected(), "main");
    }

    #[test]
    fn test_state_json_round_trip_repairs() {
        let json = r#"{
            "grid": [["a", "ghost"], ["a"]],
            "areas": ["a", "a", "9bad"],
            "selected": "gone",
            "gap": 4,
            "row_sizes": [],
            "col_sizes": ["1fr", "2fr", "3fr"]
        }"#;
        let state = GridState::from_json(json).unwrap();
        assert_eq!(state.areas, vec!["a"]);
        assert_eq!(state.selected, "a");
        assert_eq!(state.grid.get(0, 1), Some(EMPTY_CELL));
        assert_eq!(state.grid.get(1, 1), Some(EMPTY_CELL));
        assert_eq!(state.row_sizes.template(), "1fr 1fr");
        assert_eq!(state.col_sizes.template(), "1fr 2fr");
        assert_eq!(state.new_area_input, "");
    }

    #[test]
    fn test_default_state_needs_no_repair() {
        let mut state = GridState::default();
        assert!(!state.normalize());
        let json = state.to_json().unwrap();
        assert_eq!(GridState::from_json(&json).unwrap(), state);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(GridState::from_json("{"), Err(StateError::Json(_))));
    }

    #[test]
    fn test_copy_feedback() {
        let mut editor = Editor::new();
        let token = editor.mark_copied();
        assert!(editor.is_copied());
        let newer = editor.mark_copied();
        assert!(!editor.reset_copied(token));
        assert!(editor.reset_copied(newer));
        assert!(!editor.is_copied());
    }
}
