//! WebAssembly entry point: hydrates the server-rendered widget.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use gridarchitect_core::clipboard::{copy_text, COPIED_RESET_MS};
use gridarchitect_core::html::{Section, PAINT_GRID_SELECTOR, ROOT_ID, STATE_ELEMENT_ID};
use gridarchitect_core::{Editor, GridState};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement, KeyboardEvent, MouseEvent};

use crate::actions::{apply, UiAction};
use crate::clipboard::WebClipboard;

thread_local! {
    static CLIENT: RefCell<Option<Rc<Client>>> = const { RefCell::new(None) };
}

/// The hydrated widget.
struct Client {
    document: Document,
    root: Element,
    editor: RefCell<Editor>,
    listeners: RefCell<Vec<EventListener>>,
    copied_reset: RefCell<Option<Timeout>>,
}

impl Client {
    /// Run `action` and refresh whatever it invalidated.
    fn dispatch(&self, action: UiAction) {
        let focus_input = action == UiAction::AddArea;
        let sections = apply(&mut self.editor.borrow_mut(), action);
        self.render(sections);
        if focus_input && !sections.is_empty() {
            self.focus_new_area_input();
        }
    }

    fn render(&self, sections: &[Section]) {
        let editor = self.editor.borrow();
        for &section in sections {
            match self.document.get_element_by_id(section.element_id()) {
                Some(element) => element.set_inner_html(&section.render(&editor)),
                None => log::warn!("Missing section element #{}", section.element_id()),
            }
        }
    }

    fn focus_new_area_input(&self) {
        let input = self
            .root
            .query_selector("[data-action=\"new-area-input\"]")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        if let Some(input) = input {
            let _ = input.focus();
        }
    }

    fn copy_css(self: &Rc<Self>) {
        let css = self.editor.borrow().css().to_string();
        let client = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            match copy_text(&WebClipboard, &css).await {
                Ok(method) => {
                    log::debug!("Copied CSS via {:?}", method);
                    client.show_copied();
                }
                // Failure only shows as a missing confirmation.
                Err(e) => log::debug!("Copy failed: {}", e),
            }
        });
    }

    fn show_copied(self: &Rc<Self>) {
        let token = self.editor.borrow_mut().mark_copied();
        self.render(&[Section::Code]);

        let client = Rc::clone(self);
        let timeout = Timeout::new(COPIED_RESET_MS, move || {
            if client.editor.borrow_mut().reset_copied(token) {
                client.render(&[Section::Code]);
            }
        });
        // Replacing the previous timeout cancels it.
        *self.copied_reset.borrow_mut() = Some(timeout);
    }

    fn bind(self: &Rc<Self>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let grid_section = self
            .document
            .get_element_by_id(Section::Grid.element_id())
            .ok_or("Missing grid section")?;
        let mut listeners = Vec::new();

        let client = Rc::clone(self);
        listeners.push(EventListener::new(&self.root, "mousedown", move |event| {
            if let Some((row, col)) = cell_of(event) {
                event.prevent_default();
                client.dispatch(UiAction::PointerDown { row, col });
            }
        }));

        let client = Rc::clone(self);
        listeners.push(EventListener::new(&self.root, "mouseover", move |event| {
            if !client.editor.borrow().is_painting() {
                return;
            }
            if let Some((row, col)) = cell_of(event) {
                client.dispatch(UiAction::PointerEnter { row, col });
            }
        }));

        let client = Rc::clone(self);
        listeners.push(EventListener::new(&window, "mouseup", move |_| {
            client.dispatch(UiAction::PointerUp);
        }));

        // The paint grid is re-rendered on every stroke, so its leave is
        // detected from the section that holds it.
        let client = Rc::clone(self);
        listeners.push(EventListener::new(&grid_section, "mouseout", move |event| {
            if client.editor.borrow().is_painting() && left_paint_grid(event) {
                client.dispatch(UiAction::PointerUp);
            }
        }));

        let client = Rc::clone(self);
        listeners.push(EventListener::new(&self.root, "click", move |event| {
            let Some(target) = action_target(event) else {
                return;
            };
            let area = || target.get_attribute("data-area").unwrap_or_default();
            match target.get_attribute("data-action").as_deref() {
                Some("clear") => client.dispatch(UiAction::ClearGrid),
                Some("select-area") => client.dispatch(UiAction::SelectArea(area())),
                Some("remove-area") => client.dispatch(UiAction::RemoveArea(area())),
                Some("add-area") => client.dispatch(UiAction::AddArea),
                Some("copy") => client.copy_css(),
                _ => {}
            }
        }));

        let client = Rc::clone(self);
        listeners.push(EventListener::new(&self.root, "input", move |event| {
            if let Some(action) = input_action(event) {
                client.dispatch(action);
            }
        }));

        let client = Rc::clone(self);
        listeners.push(EventListener::new(&self.root, "change", move |event| {
            let Some(input) = input_target(event) else {
                return;
            };
            if matches!(
                input.get_attribute("data-action").as_deref(),
                Some("rows" | "cols" | "gap")
            ) {
                client.dispatch(UiAction::CommitControls);
            }
        }));

        let client = Rc::clone(self);
        listeners.push(EventListener::new(&self.root, "keydown", move |event| {
            let is_enter = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|e| e.key() == "Enter");
            let on_new_area = input_target(event)
                .and_then(|input| input.get_attribute("data-action"))
                .is_some_and(|action| action == "new-area-input");
            if is_enter && on_new_area {
                client.dispatch(UiAction::AddArea);
            }
        }));

        *self.listeners.borrow_mut() = listeners;
        Ok(())
    }
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Whether a `mouseout` moved the pointer from the paint grid to somewhere
/// outside it.
fn left_paint_grid(event: &Event) -> bool {
    let in_grid = |el: Option<Element>| {
        el.and_then(|el| el.closest(PAINT_GRID_SELECTOR).ok().flatten())
            .is_some()
    };
    let related = event
        .dyn_ref::<MouseEvent>()
        .and_then(|e| e.related_target())
        .and_then(|t| t.dyn_into::<Element>().ok());
    in_grid(event_element(event)) && !in_grid(related)
}

fn input_target(event: &Event) -> Option<HtmlInputElement> {
    event.target()?.dyn_into::<HtmlInputElement>().ok()
}

fn action_target(event: &Event) -> Option<Element> {
    event_element(event)?.closest("[data-action]").ok().flatten()
}

/// Grid coordinates of the cell under the event target.
fn cell_of(event: &Event) -> Option<(usize, usize)> {
    let cell = event_element(event)?.closest("[data-row]").ok().flatten()?;
    let row = cell.get_attribute("data-row")?.parse().ok()?;
    let col = cell.get_attribute("data-col")?.parse().ok()?;
    Some((row, col))
}

fn input_action(event: &Event) -> Option<UiAction> {
    let input = input_target(event)?;
    let value = input.value();
    let index = || input.get_attribute("data-index")?.parse::<usize>().ok();
    let action = match input.get_attribute("data-action")?.as_str() {
        "rows" => UiAction::SetRows(value),
        "cols" => UiAction::SetCols(value),
        "gap" => UiAction::SetGap(value),
        "row-size" => UiAction::SetRowSize { index: index()?, token: value },
        "col-size" => UiAction::SetColSize { index: index()?, token: value },
        "new-area-input" => UiAction::SetNewAreaInput(value),
        _ => return None,
    };
    Some(action)
}

/// Read the state embedded by the server, falling back to the defaults.
fn embedded_state(document: &Document) -> GridState {
    let json = document
        .get_element_by_id(STATE_ELEMENT_ID)
        .and_then(|el| el.text_content());
    match json.map(|json| GridState::from_json(&json)) {
        Some(Ok(state)) => state,
        Some(Err(e)) => {
            log::warn!("Ignoring embedded state: {}", e);
            GridState::default()
        }
        None => {
            log::warn!("No embedded state found, starting fresh");
            GridState::default()
        }
    }
}

fn hydrate() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;
    let root = document
        .get_element_by_id(ROOT_ID)
        .ok_or("Widget root not found")?;
    let editor = Editor::from_state(embedded_state(&document));

    let client = Rc::new(Client {
        document,
        root,
        editor: RefCell::new(editor),
        listeners: RefCell::new(Vec::new()),
        copied_reset: RefCell::new(None),
    });
    client.bind()?;
    // Re-render once so the markup matches the repaired state.
    client.render(&Section::ALL);
    CLIENT.with(|cell| *cell.borrow_mut() = Some(client));
    Ok(())
}

/// Initialize and hydrate the widget.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Hydrating Grid Architect");
    if let Err(e) = hydrate() {
        log::error!("Hydration failed: {:?}", e);
    }
}
