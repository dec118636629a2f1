//! HTML markup for the editor widget.
//!
//! The server renders the whole widget with [`render_widget`]; the hydrated
//! client re-renders individual [`Section`]s in place after each mutation.
//! Both go through the same functions, so the markup is identical on either
//! side.
//!
//! Interactive elements carry `data-action` attributes (and `data-area`,
//! `data-index`, `data-row`/`data-col` where needed) that the client uses for
//! event delegation.

use std::fmt::Write as _;

use crate::color::AreaColor;
use crate::editor::{Editor, GAP_INPUT_MAX};
use crate::grid::{EMPTY_CELL, MAX_TRACKS, MIN_TRACKS};
use crate::highlight::{highlight_css, Token};

/// Id of the widget's root element.
pub const ROOT_ID: &str = "grid-architect";

/// Id of the `<script type="application/json">` element holding the state.
pub const STATE_ELEMENT_ID: &str = "grid-architect-state";

/// Selector of the paintable grid; leaving it ends a paint session.
pub const PAINT_GRID_SELECTOR: &str = "[data-role=\"paint-grid\"]";

const FONT_STACK: &str = "'IBM Plex Mono', 'Menlo', monospace";

const BASE_CSS: &str = "\
@import url('https://fonts.googleapis.com/css2?family=IBM+Plex+Mono:wght@400;500;600&family=Fraunces:wght@600;700&display=swap');
* { box-sizing: border-box; margin: 0; padding: 0; }
::-webkit-scrollbar { width: 6px; height: 6px; }
::-webkit-scrollbar-track { background: #292524; }
::-webkit-scrollbar-thumb { background: #57534E; border-radius: 3px; }
input:focus, button:focus-visible { outline: 2px solid #D97706; outline-offset: 1px; }";

const LABEL_STYLE: &str = "display:flex;flex-direction:column;gap:4px";
const LABEL_TEXT_STYLE: &str =
    "font-size:10px;color:#A8A29E;letter-spacing:0.06em;text-transform:uppercase";
const INPUT_STYLE: &str = "width:52px;padding:5px 8px;border-radius:4px;border:1px solid #44403C;\
background:#292524;color:#E7E5E4;font-size:13px;font-family:inherit";
const BUTTON_STYLE: &str = "padding:5px 14px;border-radius:4px;border:1px solid #44403C;\
background:#292524;color:#A8A29E;font-size:12px;font-family:inherit;cursor:pointer;font-weight:500";

/// Independently re-renderable parts of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Validity warning in the header.
    Status,
    /// Rows, columns, gap and the clear button.
    Controls,
    /// Row and column size inputs.
    Tracks,
    /// Area buttons and the new-area input.
    Palette,
    /// The paintable grid.
    Grid,
    /// Generated CSS and the copy button.
    Code,
    /// Live preview.
    Preview,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Status,
        Section::Controls,
        Section::Tracks,
        Section::Palette,
        Section::Grid,
        Section::Code,
        Section::Preview,
    ];

    /// Id of the element whose contents this section fills.
    pub fn element_id(self) -> &'static str {
        match self {
            Section::Status => "ga-status",
            Section::Controls => "ga-controls",
            Section::Tracks => "ga-tracks",
            Section::Palette => "ga-palette",
            Section::Grid => "ga-grid",
            Section::Code => "ga-code",
            Section::Preview => "ga-preview",
        }
    }

    /// Inner HTML of this section.
    pub fn render(self, editor: &Editor) -> String {
        let mut out = String::new();
        match self {
            Section::Status => render_status(editor, &mut out),
            Section::Controls => render_controls(editor, &mut out),
            Section::Tracks => render_tracks(editor, &mut out),
            Section::Palette => render_palette(editor, &mut out),
            Section::Grid => render_grid(editor, &mut out),
            Section::Code => render_code(editor, &mut out),
            Section::Preview => render_preview(editor, &mut out),
        }
        out
    }
}

/// Escape text for HTML content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the complete widget.
pub fn render_widget(editor: &Editor) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<div id=\"{ROOT_ID}\" style=\"min-height:100vh;background:#1C1917;color:#E7E5E4;\
font-family:{FONT_STACK};user-select:none\"><style>{BASE_CSS}</style>"
    );

    out.push_str(
        "<header style=\"padding:20px 28px;border-bottom:1px solid #292524;display:flex;\
align-items:center;justify-content:space-between\">\
<div style=\"display:flex;align-items:baseline;gap:12px\">\
<h1 style=\"font-family:'Fraunces', serif;font-size:22px;font-weight:700;color:#FBBF24;\
letter-spacing:-0.02em\">\u{229e} Grid Architect</h1>\
<span style=\"font-size:11px;color:#78716C;letter-spacing:0.05em\">CSS GRID GENERATOR</span></div>",
    );
    push_section(editor, Section::Status, "", &mut out);
    out.push_str("</header>");

    out.push_str(
        "<div style=\"display:flex;flex-direction:column;height:calc(100vh - 65px)\">\
<div style=\"flex:1 1 55%;padding:20px 28px;overflow:auto;border-bottom:2px solid #292524\">",
    );
    push_section(
        editor,
        Section::Controls,
        "display:flex;gap:16px;align-items:flex-end;flex-wrap:wrap;margin-bottom:16px",
        &mut out,
    );
    push_section(
        editor,
        Section::Tracks,
        "display:flex;gap:24px;margin-bottom:16px;flex-wrap:wrap",
        &mut out,
    );
    push_section(
        editor,
        Section::Palette,
        "display:flex;gap:8px;align-items:center;flex-wrap:wrap;margin-bottom:16px",
        &mut out,
    );
    push_section(editor, Section::Grid, "", &mut out);
    out.push_str("</div>");

    out.push_str(
        "<div style=\"flex:1 1 45%;display:flex;flex-direction:column;overflow:hidden\">\
<div style=\"display:flex;border-bottom:1px solid #292524;padding:0 28px\">",
    );
    let tab = "padding:10px 0;font-size:11px;font-weight:600;color:#A8A29E;letter-spacing:0.08em;flex:1";
    let _ = write!(
        out,
        "<span style=\"{tab}\">GENERATED CSS</span>\
<span style=\"{tab};text-align:center\">LIVE PREVIEW</span></div>"
    );
    out.push_str("<div style=\"display:flex;flex:1;overflow:hidden\">");
    push_section(
        editor,
        Section::Code,
        "flex:1;padding:16px 28px;overflow:auto;border-right:1px solid #292524;position:relative",
        &mut out,
    );
    push_section(
        editor,
        Section::Preview,
        "flex:1;padding:16px;overflow:auto;display:flex;align-items:stretch",
        &mut out,
    );
    out.push_str("</div></div></div></div>");
    out
}

fn push_section(editor: &Editor, section: Section, style: &str, out: &mut String) {
    let _ = write!(
        out,
        "<div id=\"{}\" style=\"{}\">{}</div>",
        section.element_id(),
        style,
        section.render(editor)
    );
}

fn render_status(editor: &Editor, out: &mut String) {
    if editor.is_valid() {
        return;
    }
    let names = editor.derived().invalid_areas.join(", ");
    let _ = write!(
        out,
        "<span title=\"{}\" style=\"font-size:11px;color:#EF4444;background:#451A1A;\
padding:4px 10px;border-radius:4px\">\u{26a0} Areas must be rectangular</span>",
        escape_html(&names)
    );
}

fn number_input(
    out: &mut String,
    label: &str,
    action: &str,
    min: u32,
    max: usize,
    value: impl std::fmt::Display,
    width: &str,
) {
    let _ = write!(
        out,
        "<label style=\"{LABEL_STYLE}\"><span style=\"{LABEL_TEXT_STYLE}\">{label}</span>\
<input type=\"number\" data-action=\"{action}\" min=\"{min}\" max=\"{max}\" value=\"{value}\" \
style=\"{INPUT_STYLE}{width}\"></label>"
    );
}

fn render_controls(editor: &Editor, out: &mut String) {
    number_input(out, "Rows", "rows", MIN_TRACKS as u32, MAX_TRACKS, editor.rows(), "");
    number_input(out, "Columns", "cols", MIN_TRACKS as u32, MAX_TRACKS, editor.cols(), "");
    number_input(out, "Gap", "gap", 0, GAP_INPUT_MAX as usize, editor.gap(), ";width:64px");
    let _ = write!(
        out,
        "<button type=\"button\" data-action=\"clear\" style=\"{BUTTON_STYLE}\">Clear</button>"
    );
}

fn render_tracks(editor: &Editor, out: &mut String) {
    let axes = [
        ("Row sizes:", "row-size", editor.row_sizes()),
        ("Column sizes:", "col-size", editor.col_sizes()),
    ];
    for (label, action, sizes) in axes {
        let _ = write!(
            out,
            "<div style=\"display:flex;gap:6px;align-items:center;flex-wrap:wrap\">\
<span style=\"{LABEL_TEXT_STYLE};margin-right:4px\">{label}</span>"
        );
        for (i, token) in sizes.iter().enumerate() {
            let _ = write!(
                out,
                "<input data-action=\"{action}\" data-index=\"{i}\" value=\"{}\" placeholder=\"1fr\" \
style=\"{INPUT_STYLE};width:56px;font-size:11px\">",
                escape_html(token)
            );
        }
        out.push_str("</div>");
    }
}

fn render_palette(editor: &Editor, out: &mut String) {
    let _ = write!(
        out,
        "<span style=\"{LABEL_TEXT_STYLE};margin-right:2px\">Areas ({}/{}):</span>",
        editor.areas().len(),
        editor.max_areas()
    );
    for name in editor.areas() {
        let color = editor.colors().get(name).cloned().unwrap_or_else(AreaColor::fallback);
        let active = editor.selected() == name;
        let border = if active { "#FBBF24" } else { color.border.as_str() };
        let (bg, fg) = if active {
            (color.bg.as_str(), color.text.as_str())
        } else {
            ("transparent", color.bg.as_str())
        };
        let name = escape_html(name);
        let _ = write!(
            out,
            "<div style=\"display:flex;align-items:center;gap:0\">\
<button type=\"button\" data-action=\"select-area\" data-area=\"{name}\" style=\"padding:5px 12px;\
border-radius:4px 0 0 4px;border:2px solid {border};background:{bg};color:{fg};font-size:12px;\
font-weight:600;font-family:inherit;cursor:pointer;transition:all 0.15s\">{name}</button>\
<button type=\"button\" data-action=\"remove-area\" data-area=\"{name}\" style=\"padding:5px 6px;\
border-radius:0 4px 4px 0;border:2px solid {border};border-left:none;background:transparent;\
color:#78716C;font-size:11px;font-family:inherit;cursor:pointer\">\u{d7}</button></div>"
        );
    }

    let full = editor.at_capacity();
    let (opacity, placeholder, disabled) = if full {
        ("0.4", "Limit reached", " disabled")
    } else {
        ("1", "New area name", "")
    };
    let _ = write!(
        out,
        "<div style=\"display:flex;gap:0;opacity:{opacity}\">\
<input data-action=\"new-area-input\" value=\"{}\" placeholder=\"{placeholder}\"{disabled} \
style=\"{INPUT_STYLE};width:120px;border-radius:4px 0 0 4px;font-size:11px\">\
<button type=\"button\" data-action=\"add-area\"{disabled} style=\"{BUTTON_STYLE};\
border-radius:0 4px 4px 0;border-left:none;padding:5px 10px\">+</button></div>",
        escape_html(editor.new_area_input())
    );
}

fn render_grid(editor: &Editor, out: &mut String) {
    let cols = editor.cols();
    let _ = write!(
        out,
        "<div data-role=\"paint-grid\" style=\"display:inline-grid;\
grid-template-columns:repeat({cols}, minmax(60px, 1fr));\
grid-template-rows:repeat({}, minmax(48px, 1fr));gap:3px;background:#292524;padding:3px;\
border-radius:8px;border:1px solid #3F3A36;width:100%;max-width:{}px\">",
        editor.rows(),
        (cols * 90).max(400)
    );
    for (r, c, label) in editor.grid().iter_cells() {
        let color = if label == EMPTY_CELL {
            None
        } else {
            editor.colors().get(label)
        };
        let (border, bg, fg) = match color {
            Some(color) => (
                format!("2px solid {}", color.border),
                color.bg.as_str(),
                color.text.as_str(),
            ),
            None => ("2px dashed #44403C".to_string(), "#1C1917", "#57534E"),
        };
        let text = if label == EMPTY_CELL {
            "\u{b7}".to_string()
        } else {
            escape_html(label)
        };
        let _ = write!(
            out,
            "<div data-row=\"{r}\" data-col=\"{c}\" style=\"display:flex;align-items:center;\
justify-content:center;border-radius:4px;border:{border};background:{bg};color:{fg};\
font-size:11px;font-weight:600;font-family:inherit;cursor:pointer;transition:all 0.1s;\
min-height:48px\">{text}</div>"
        );
    }
    out.push_str("</div>");
}

fn render_code(editor: &Editor, out: &mut String) {
    let (label, extra) = if editor.is_copied() {
        (
            "\u{2713} Copied",
            ";background:#166534;border-color:#22C55E;color:#BBF7D0",
        )
    } else {
        ("Copy", "")
    };
    let _ = write!(
        out,
        "<button type=\"button\" data-action=\"copy\" style=\"position:sticky;top:0;float:right;\
{BUTTON_STYLE};font-size:11px;padding:4px 10px{extra}\">{label}</button>\
<pre style=\"font-size:12px;line-height:1.7;color:#D6D3D1;white-space:pre-wrap;\
word-break:break-word\"><code>"
    );
    for line in highlight_css(editor.css(), editor.colors()) {
        out.push_str("<span>");
        for token in &line {
            push_token(token, out);
        }
        out.push_str("</span>\n");
    }
    out.push_str("</code></pre>");
}

fn push_token(token: &Token, out: &mut String) {
    let text = escape_html(&token.text);
    let _ = match &token.color {
        Some(color) => write!(out, "<span style=\"color:{color}\">{text}</span>"),
        None => write!(out, "<span>{text}</span>"),
    };
}

fn render_preview(editor: &Editor, out: &mut String) {
    let preview = &editor.derived().preview;
    let _ = write!(
        out,
        "<div style=\"flex:1;display:grid;grid-template-areas:{};grid-template-rows:{};\
grid-template-columns:{};gap:{}px;min-height:200px\">",
        escape_html(&preview.template_areas),
        escape_html(&preview.template_rows),
        escape_html(&preview.template_columns),
        preview.gap
    );
    for item in &preview.items {
        let name = escape_html(&item.name);
        let _ = write!(
            out,
            "<div style=\"grid-area:{name};background:{};border:2px solid {};border-radius:6px;\
display:flex;align-items:center;justify-content:center;color:{};font-size:13px;\
font-weight:600;font-family:inherit;padding:8px\">.{name}</div>",
            item.color.bg, item.color.border, item.color.text
        );
    }
    out.push_str("</div>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_contains_every_section() {
        let html = render_widget(&Editor::new());
        for section in Section::ALL {
            assert!(html.contains(&format!("id=\"{}\"", section.element_id())));
        }
        assert!(html.starts_with(&format!("<div id=\"{ROOT_ID}\"")));
    }

    #[test]
    fn test_paint_grid_wraps_only_cells() {
        let editor = Editor::new();
        let grid = Section::Grid.render(&editor);
        assert!(grid.starts_with("<div data-role=\"paint-grid\""));
        assert!(PAINT_GRID_SELECTOR.contains("data-role=\"paint-grid\""));
        assert!(grid.ends_with("</div></div>"));
        assert_eq!(grid.matches("data-role=").count(), 1);
    }

    #[test]
    fn test_grid_cells_have_coordinates() {
        let mut editor = Editor::new();
        editor.resize(2, 3);
        let grid = Section::Grid.render(&editor);
        assert_eq!(grid.matches("data-row=").count(), 6);
        assert!(grid.contains("data-row=\"1\" data-col=\"2\""));
        assert!(grid.contains("repeat(3, minmax(60px, 1fr))"));
    }

    #[test]
    fn test_painted_cell_uses_area_color() {
        let mut editor = Editor::new();
        editor.paint_cell(0, 0, "main");
        let grid = Section::Grid.render(&editor);
        let color = editor.colors().get("main").unwrap();
        assert!(grid.contains(&format!("background:{}", color.bg)));
        assert!(grid.contains(">main</div>"));
    }

    #[test]
    fn test_status_only_when_invalid() {
        let mut editor = Editor::new();
        assert!(Section::Status.render(&editor).is_empty());
        editor.paint_cell(0, 0, "main");
        editor.paint_cell(2, 2, "main");
        assert!(Section::Status.render(&editor).contains("rectangular"));
    }

    #[test]
    fn test_track_tokens_are_escaped() {
        let mut editor = Editor::new();
        editor.set_row_size(0, "\"><script>");
        let tracks = Section::Tracks.render(&editor);
        assert!(!tracks.contains("<script>"));
        assert!(tracks.contains("&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_palette_disables_input_at_capacity() {
        let mut editor = Editor::new();
        assert!(!Section::Palette.render(&editor).contains(" disabled"));
        editor.resize(1, 4);
        let palette = Section::Palette.render(&editor);
        assert!(palette.contains("Areas (4/4):"));
        assert!(palette.contains(" disabled"));
    }

    #[test]
    fn test_copy_label_follows_flag() {
        let mut editor = Editor::new();
        assert!(Section::Code.render(&editor).contains(">Copy</button>"));
        editor.mark_copied();
        assert!(Section::Code.render(&editor).contains("Copied"));
    }

    #[test]
    fn test_preview_lists_used_areas() {
        let mut editor = Editor::new();
        editor.paint_cell(0, 0, "header");
        editor.paint_cell(0, 1, "header");
        let preview = Section::Preview.render(&editor);
        assert!(preview.contains("grid-area:header"));
        assert!(preview.contains(".header</div>"));
        assert!(!preview.contains("grid-area:main"));
    }
}
