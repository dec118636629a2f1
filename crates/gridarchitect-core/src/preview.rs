//! Live preview layout derived from the grid state.

use crate::color::{AreaColor, ColorMap};
use crate::css::template_areas;
use crate::grid::{Grid, TrackSizes};

/// One rendered block of the preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewItem {
    pub name: String,
    pub color: AreaColor,
}

/// A CSS grid container and its children, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLayout {
    /// `grid-template-areas` with rows separated by a single space.
    pub template_areas: String,
    pub template_rows: String,
    pub template_columns: String,
    pub gap: u32,
    pub items: Vec<PreviewItem>,
}

impl PreviewLayout {
    /// Build the preview for `used_areas`, coloring each from `colors`.
    pub fn build(
        grid: &Grid,
        row_sizes: &TrackSizes,
        col_sizes: &TrackSizes,
        gap: u32,
        used_areas: &[String],
        colors: &ColorMap,
    ) -> Self {
        let items = used_areas
            .iter()
            .map(|name| PreviewItem {
                name: name.clone(),
                color: colors.get(name).cloned().unwrap_or_else(AreaColor::fallback),
            })
            .collect();
        Self {
            template_areas: template_areas(grid, " "),
            template_rows: row_sizes.template(),
            template_columns: col_sizes.template(),
            gap,
            items,
        }
    }
}
