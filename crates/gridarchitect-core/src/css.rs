//! CSS text generation.

use std::fmt::{self, Write as _};

use crate::grid::{Grid, TrackSizes};

/// Selector of the generated container rule.
pub const CONTAINER_SELECTOR: &str = ".grid-container";

/// Indentation used for the rows of `grid-template-areas`.
const AREA_ROW_INDENT: &str = "    ";

/// Quote each grid row as a `grid-template-areas` string and join them with
/// `separator`.
pub fn template_areas(grid: &Grid, separator: &str) -> String {
    grid.iter_rows()
        .map(|row| format!("\"{}\"", row.join(" ")))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Everything needed to write the exported stylesheet.
#[derive(Debug, Clone, Copy)]
pub struct GridCss<'a> {
    pub grid: &'a Grid,
    pub row_sizes: &'a TrackSizes,
    pub col_sizes: &'a TrackSizes,
    pub gap: u32,
    /// Areas that get their own `grid-area` rule, in output order.
    pub used_areas: &'a [String],
}

impl GridCss<'_> {
    /// Render the stylesheet to a string.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GridCss<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let areas = template_areas(self.grid, &format!("\n{AREA_ROW_INDENT}"));
        writeln!(f, "{CONTAINER_SELECTOR} {{")?;
        writeln!(f, "  display: grid;")?;
        writeln!(f, "  grid-template-areas:")?;
        writeln!(f, "{AREA_ROW_INDENT}{areas};")?;
        writeln!(f, "  grid-template-rows: {};", self.row_sizes.template())?;
        writeln!(f, "  grid-template-columns: {};", self.col_sizes.template())?;
        writeln!(f, "  gap: {}px;", self.gap)?;
        writeln!(f, "}}")?;

        let mut rules = String::new();
        for (i, name) in self.used_areas.iter().enumerate() {
            if i > 0 {
                rules.push('\n');
            }
            write!(rules, "\n.{name} {{\n  grid-area: {name};\n}}")?;
        }
        f.write_str(&rules)
    }
}

/// Generate the stylesheet for a grid, using its own used areas.
pub fn generate_css(grid: &Grid, row_sizes: &TrackSizes, col_sizes: &TrackSizes, gap: u32) -> String {
    let used = grid.used_areas();
    GridCss {
        grid,
        row_sizes,
        col_sizes,
        gap,
        used_areas: &used,
    }
    .render()
}
