//! Full HTML document around the server-rendered widget.

use gridarchitect_core::html::{render_widget, STATE_ELEMENT_ID};
use gridarchitect_core::{Editor, StateError};

use crate::config::AssetMode;

/// Base name of the wasm-bindgen output files.
const CLIENT_BUNDLE: &str = "gridarchitect_web";

/// Render the page: widget markup, embedded state and client bootstrap.
pub fn render_document(editor: &Editor, mode: AssetMode) -> Result<String, StateError> {
    let state = editor.state().to_json()?.replace('<', "\\u003c");
    let prefix = mode.url_prefix();

    let preload = match mode {
        AssetMode::Production => format!(
            "<link rel=\"modulepreload\" href=\"{prefix}/{CLIENT_BUNDLE}.js\">\
<link rel=\"preload\" href=\"{prefix}/{CLIENT_BUNDLE}_bg.wasm\" as=\"fetch\" type=\"application/wasm\" crossorigin>"
        ),
        AssetMode::Development => String::new(),
    };

    Ok(format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>Grid Architect</title>{preload}</head><body>{widget}\
<script type=\"application/json\" id=\"{STATE_ELEMENT_ID}\">{state}</script>\
<script type=\"module\">import init from '{prefix}/{CLIENT_BUNDLE}.js'; init();</script>\
</body></html>",
        widget = render_widget(editor),
    ))
}
