//! User actions and the sections each one invalidates.
//!
//! The browser glue translates DOM events into [`UiAction`]s; [`apply`] runs
//! the matching editor mutation and reports which parts of the widget must be
//! re-rendered. Sections holding the input the user is typing into are left
//! alone so focus and caret position survive.

use gridarchitect_core::html::Section;
use gridarchitect_core::Editor;

/// Everything except the dimension controls.
const AFTER_RESIZE: &[Section] = &[
    Section::Status,
    Section::Tracks,
    Section::Palette,
    Section::Grid,
    Section::Code,
    Section::Preview,
];
/// Outputs that depend on cell contents.
const AFTER_PAINT: &[Section] = &[Section::Status, Section::Grid, Section::Code, Section::Preview];
/// Outputs that depend on the declared areas.
const AFTER_AREAS: &[Section] = &[
    Section::Status,
    Section::Palette,
    Section::Grid,
    Section::Code,
    Section::Preview,
];
const AFTER_TRACKS: &[Section] = &[Section::Code, Section::Preview];

/// A user interaction, decoded from the DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Raw text of the rows input.
    SetRows(String),
    /// Raw text of the columns input.
    SetCols(String),
    /// Raw text of the gap input.
    SetGap(String),
    /// A number input lost focus or was confirmed.
    CommitControls,
    SetRowSize { index: usize, token: String },
    SetColSize { index: usize, token: String },
    SelectArea(String),
    RemoveArea(String),
    SetNewAreaInput(String),
    AddArea,
    ClearGrid,
    PointerDown { row: usize, col: usize },
    PointerEnter { row: usize, col: usize },
    PointerUp,
}

/// Parse a number input the way a browser coerces it: blank is zero,
/// fractions truncate, anything else is rejected.
pub fn parse_number(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    let value: f64 = raw.parse().ok()?;
    value.is_finite().then(|| value.trunc() as i64)
}

fn track_count(raw: &str) -> Option<usize> {
    parse_number(raw).map(|n| usize::try_from(n.max(0)).unwrap_or(usize::MAX))
}

/// Apply `action` and return the sections to re-render.
pub fn apply(editor: &mut Editor, action: UiAction) -> &'static [Section] {
    match action {
        UiAction::SetRows(raw) => match track_count(&raw) {
            Some(rows) => {
                editor.set_rows(rows);
                AFTER_RESIZE
            }
            None => &[],
        },
        UiAction::SetCols(raw) => match track_count(&raw) {
            Some(cols) => {
                editor.set_cols(cols);
                AFTER_RESIZE
            }
            None => &[],
        },
        UiAction::SetGap(raw) => match parse_number(&raw) {
            Some(gap) => {
                editor.set_gap(gap);
                AFTER_TRACKS
            }
            None => &[],
        },
        UiAction::CommitControls => &[Section::Controls],
        UiAction::SetRowSize { index, token } => {
            if editor.set_row_size(index, &token) {
                AFTER_TRACKS
            } else {
                &[]
            }
        }
        UiAction::SetColSize { index, token } => {
            if editor.set_col_size(index, &token) {
                AFTER_TRACKS
            } else {
                &[]
            }
        }
        UiAction::SelectArea(name) => {
            if editor.select_area(&name) {
                &[Section::Palette]
            } else {
                &[]
            }
        }
        UiAction::RemoveArea(name) => {
            if editor.remove_area(&name) {
                AFTER_AREAS
            } else {
                &[]
            }
        }
        UiAction::SetNewAreaInput(text) => {
            editor.set_new_area_input(&text);
            &[]
        }
        UiAction::AddArea => match editor.add_area() {
            Ok(name) => {
                log::info!("Added area {}", name);
                AFTER_AREAS
            }
            Err(_) => &[],
        },
        UiAction::ClearGrid => {
            editor.clear_grid();
            AFTER_PAINT
        }
        UiAction::PointerDown { row, col } => {
            let before = editor.grid().get(row, col).map(str::to_string);
            editor.begin_paint(row, col);
            if editor.grid().get(row, col).map(str::to_string) != before {
                AFTER_PAINT
            } else {
                &[]
            }
        }
        UiAction::PointerEnter { row, col } => {
            if editor.paint_enter(row, col) {
                AFTER_PAINT
            } else {
                &[]
            }
        }
        UiAction::PointerUp => {
            editor.end_paint();
            &[]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(""), Some(0));
        assert_eq!(parse_number(" 7 "), Some(7));
        assert_eq!(parse_number("3.9"), Some(3));
        assert_eq!(parse_number("-2"), Some(-2));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn test_dimension_inputs_clamp() {
        let mut editor = Editor::new();
        assert_eq!(apply(&mut editor, UiAction::SetRows("99".into())), AFTER_RESIZE);
        assert_eq!(editor.rows(), 48);
        apply(&mut editor, UiAction::SetCols("".into()));
        assert_eq!(editor.cols(), 1);
        apply(&mut editor, UiAction::SetCols("-4".into()));
        assert_eq!(editor.cols(), 1);
        assert!(apply(&mut editor, UiAction::SetRows("x".into())).is_empty());
        assert_eq!(editor.rows(), 48);
    }

    #[test]
    fn test_resize_keeps_controls_untouched() {
        let mut editor = Editor::new();
        let sections = apply(&mut editor, UiAction::SetRows("4".into()));
        assert!(!sections.contains(&Section::Controls));
        assert_eq!(apply(&mut editor, UiAction::CommitControls), &[Section::Controls]);
    }

    #[test]
    fn test_track_size_input_skips_tracks_section() {
        let mut editor = Editor::new();
        let sections = apply(
            &mut editor,
            UiAction::SetColSize { index: 2, token: "200px".into() },
        );
        assert_eq!(sections, AFTER_TRACKS);
        assert_eq!(editor.col_sizes().get(2), Some("200px"));
        assert!(apply(&mut editor, UiAction::SetRowSize { index: 9, token: "1fr".into() }).is_empty());
    }

    #[test]
    fn test_drag_sequence() {
        let mut editor = Editor::new();
        assert_eq!(apply(&mut editor, UiAction::PointerDown { row: 0, col: 0 }), AFTER_PAINT);
        assert_eq!(apply(&mut editor, UiAction::PointerEnter { row: 0, col: 1 }), AFTER_PAINT);
        assert!(apply(&mut editor, UiAction::PointerEnter { row: 0, col: 1 }).is_empty());
        apply(&mut editor, UiAction::PointerUp);
        assert!(apply(&mut editor, UiAction::PointerEnter { row: 0, col: 2 }).is_empty());
        assert_eq!(editor.grid().used_areas(), vec!["header"]);
        assert_eq!(editor.grid().cells_of("header"), vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn test_erase_click_survives_rerendered_cell() {
        let mut editor = Editor::new();
        editor.paint_cell(1, 1, "header");
        assert_eq!(apply(&mut editor, UiAction::PointerDown { row: 1, col: 1 }), AFTER_PAINT);
        // The replaced cell element reports the pointer entering it again.
        assert!(apply(&mut editor, UiAction::PointerEnter { row: 1, col: 1 }).is_empty());
        apply(&mut editor, UiAction::PointerUp);
        assert!(editor.grid().is_empty());
    }

    #[test]
    fn test_add_area_via_input() {
        let mut editor = Editor::new();
        assert!(apply(&mut editor, UiAction::SetNewAreaInput("aside".into())).is_empty());
        assert_eq!(apply(&mut editor, UiAction::AddArea), AFTER_AREAS);
        assert_eq!(editor.selected(), "aside");
        assert!(apply(&mut editor, UiAction::AddArea).is_empty());
    }

    #[test]
    fn test_area_buttons() {
        let mut editor = Editor::new();
        assert_eq!(apply(&mut editor, UiAction::SelectArea("main".into())), &[Section::Palette]);
        assert!(apply(&mut editor, UiAction::SelectArea("ghost".into())).is_empty());
        assert_eq!(apply(&mut editor, UiAction::RemoveArea("main".into())), AFTER_AREAS);
        assert_eq!(editor.selected(), "header");
    }

    #[test]
    fn test_gap_and_clear() {
        let mut editor = Editor::new();
        apply(&mut editor, UiAction::SetGap("-3".into()));
        assert_eq!(editor.gap(), 0);
        apply(&mut editor, UiAction::PointerDown { row: 1, col: 1 });
        assert_eq!(apply(&mut editor, UiAction::ClearGrid), AFTER_PAINT);
        assert!(editor.grid().is_empty());
    }
}
