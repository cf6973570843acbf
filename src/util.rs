// Console logging helpers

use std::cell::Cell;

use wasm_bindgen::JsValue;

thread_local! {
    static DEBUG: Cell<bool> = const { Cell::new(false) };
}

pub fn set_debug(on: bool) {
    DEBUG.with(|d| d.set(on));
}

/// Debug log; silent unless `debug` is on in the config.
pub fn clog(msg: &str) {
    if DEBUG.with(Cell::get) {
        web_sys::console::log_1(&JsValue::from_str(&format!("tiny-zoom: {msg}")));
    }
}

pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(&format!("tiny-zoom: {msg}")));
}
