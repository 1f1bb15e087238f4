//! Browser bindings for the letter tracer.
//!
//! JS calls `tracer_init` once, forwards pointer events and button presses,
//! calls `tracer_tick` every animation frame, then reads the vertex and event
//! buffers straight out of wasm memory.

pub mod runner;

pub use runner::TracerRunner;

use std::cell::RefCell;

use trace_engine::bridge::protocol::PROTOCOL_VERSION;
use trace_engine::{InputEvent, NavCommand};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<TracerRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Before `tracer_init` this logs and returns the
/// default value instead of trapping.
fn with_runner<R: Default>(f: impl FnOnce(&mut TracerRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("tracer not initialized, call tracer_init() first");
            R::default()
        }
    })
}

/// Create the tracer. Empty strings select the default config and the
/// builtin letters. Throws on invalid JSON or an invalid catalog.
#[wasm_bindgen]
pub fn tracer_init(config_json: &str, catalog_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = TracerRunner::new(config_json, catalog_json)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let letters = runner.session().catalog().len();
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
    log::info!("tracer: initialized with {} letters", letters);
    Ok(())
}

#[wasm_bindgen]
pub fn tracer_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Pointer input ----

#[wasm_bindgen]
pub fn tracer_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn tracer_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn tracer_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn tracer_pointer_cancel() {
    with_runner(|r| r.push_input(InputEvent::PointerCancel));
}

// ---- Letter navigation ----

#[wasm_bindgen]
pub fn tracer_next() {
    with_runner(|r| r.push_input(InputEvent::Command(NavCommand::Next)));
}

#[wasm_bindgen]
pub fn tracer_previous() {
    with_runner(|r| r.push_input(InputEvent::Command(NavCommand::Previous)));
}

#[wasm_bindgen]
pub fn tracer_reset() {
    with_runner(|r| r.push_input(InputEvent::Command(NavCommand::Reset)));
}

/// Select a letter by its character. Only the first character of `letter` is used.
#[wasm_bindgen]
pub fn tracer_select(letter: &str) {
    match letter.chars().next() {
        Some(c) => with_runner(|r| r.push_input(InputEvent::Command(NavCommand::Select(c)))),
        None => log::warn!("tracer_select: empty letter"),
    }
}

#[wasm_bindgen]
pub fn tracer_dismiss_toast(id: u32) -> bool {
    with_runner(|r| r.dismiss_toast(id as u64))
}

// ---- Data accessors ----

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn get_vertices_ptr() -> *const f32 {
    with_runner(|r| Some(r.vertices_ptr())).unwrap_or(std::ptr::null())
}

#[cfg(feature = "vectors")]
#[wasm_bindgen]
pub fn get_vertex_count() -> u32 {
    with_runner(|r| r.vertex_count())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| Some(r.events_ptr())).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

#[wasm_bindgen]
pub fn get_progress_percent() -> f32 {
    with_runner(|r| r.progress_percent())
}

#[wasm_bindgen]
pub fn get_current_letter() -> String {
    with_runner(|r| r.session().current_letter().to_string())
}

#[wasm_bindgen]
pub fn get_current_index() -> u32 {
    with_runner(|r| r.session().current_index() as u32)
}

#[wasm_bindgen]
pub fn get_stroke_index() -> u32 {
    with_runner(|r| r.session().tracker().current_stroke() as u32)
}

#[wasm_bindgen]
pub fn is_celebrating() -> bool {
    with_runner(|r| r.session().is_celebrating())
}

#[wasm_bindgen]
pub fn is_letter_complete() -> bool {
    with_runner(|r| r.session().is_letter_complete())
}

/// Letters in catalog order, for the selection buttons.
#[wasm_bindgen]
pub fn get_letters() -> js_sys::Array {
    let letters = js_sys::Array::new();
    with_runner(|r| {
        for id in r.session().catalog().ids() {
            letters.push(&JsValue::from_str(&id.to_string()));
        }
    });
    letters
}

#[wasm_bindgen]
pub fn get_toasts_json() -> String {
    with_runner(|r| r.toasts_json())
}

#[wasm_bindgen]
pub fn get_labels_json() -> String {
    with_runner(|r| r.labels_json())
}

#[wasm_bindgen]
pub fn get_status_json() -> String {
    with_runner(|r| r.status_json())
}

/// Version of the wire event layout; JS checks it before reading events.
#[wasm_bindgen]
pub fn get_protocol_version() -> f32 {
    PROTOCOL_VERSION
}

#[wasm_bindgen]
pub fn get_canvas_width() -> f32 {
    with_runner(|r| r.canvas_width())
}

#[wasm_bindgen]
pub fn get_canvas_height() -> f32 {
    with_runner(|r| r.canvas_height())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_version_is_exported() {
        assert_eq!(get_protocol_version(), 1.0);
    }

    #[test]
    fn accessors_before_init_return_defaults() {
        assert_eq!(get_events_len(), 0);
        assert!(get_events_ptr().is_null());
        assert_eq!(get_current_letter(), "");
        assert!(!is_celebrating());
    }
}
