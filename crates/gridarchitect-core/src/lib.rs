//! Grid Architect Core Library
//!
//! Platform-agnostic state engine, derivations and markup for the CSS Grid
//! layout editor.

pub mod area;
pub mod clipboard;
pub mod color;
pub mod css;
pub mod editor;
pub mod grid;
pub mod highlight;
pub mod html;
pub mod preview;
pub mod validate;

pub use area::{AreaError, AreaResult};
pub use clipboard::{Clipboard, ClipboardError, CopyFeedback, CopyMethod, copy_text, COPIED_RESET_MS};
pub use color::{AreaColor, ColorMap, area_color, hsl_to_hex};
pub use css::{GridCss, generate_css};
pub use editor::{Derived, Editor, GridState, StateError};
pub use grid::{Grid, TrackSizes, EMPTY_CELL, MAX_TRACKS, MIN_TRACKS};
pub use html::{Section, render_widget};
pub use preview::PreviewLayout;
