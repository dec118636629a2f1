//! Browser clipboard backend.

use gridarchitect_core::clipboard::{BoxFuture, Clipboard, ClipboardError, ClipboardResult};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, HtmlTextAreaElement};

fn js_error(context: &str, value: JsValue) -> ClipboardError {
    ClipboardError::Unavailable(format!("{}: {:?}", context, value))
}

/// Writes through `document.execCommand("copy")`, or the async Clipboard API.
pub struct WebClipboard;

impl Clipboard for WebClipboard {
    fn write_legacy(&self, text: &str) -> ClipboardResult<()> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ClipboardError::Unavailable("No document".into()))?;
        let body = document
            .body()
            .ok_or_else(|| ClipboardError::Unavailable("No body".into()))?;

        let textarea: HtmlTextAreaElement = document
            .create_element("textarea")
            .map_err(|e| js_error("create textarea", e))?
            .dyn_into()
            .map_err(|e| js_error("cast textarea", e.into()))?;
        textarea.set_value(text);
        let style = textarea.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("left", "-9999px");

        body.append_child(&textarea)
            .map_err(|e| js_error("append textarea", e))?;
        textarea.select();
        let result = match document.dyn_ref::<HtmlDocument>() {
            Some(html) => html.exec_command("copy"),
            None => Err(JsValue::from_str("Not an HTML document")),
        };
        let _ = body.remove_child(&textarea);

        match result {
            Ok(true) => Ok(()),
            Ok(false) => Err(ClipboardError::Unavailable("execCommand(\"copy\") refused".into())),
            Err(e) => Err(js_error("execCommand", e)),
        }
    }

    fn write_async(&self, text: String) -> BoxFuture<'_, ClipboardResult<()>> {
        Box::pin(async move {
            let window = web_sys::window()
                .ok_or_else(|| ClipboardError::Unavailable("No window".into()))?;
            let promise = window.navigator().clipboard().write_text(&text);
            wasm_bindgen_futures::JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| js_error("clipboard.writeText", e))
        })
    }
}
