//! Grid Architect browser client
//!
//! Takes over the server-rendered widget: reads the embedded state, binds
//! pointer, keyboard and input events, and re-renders the affected parts of
//! the widget after every edit.

pub mod actions;

pub use actions::{apply, UiAction};

#[cfg(target_arch = "wasm32")]
mod clipboard;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
