//! Error conversion for the JavaScript boundary.

use std::fmt::Display;

use wasm_bindgen::JsValue;

/// Report `err` on the browser console and turn it into a `JsValue` string
/// for the rejected call.
pub(crate) fn to_js_error(err: impl Display) -> JsValue {
    let message = JsValue::from_str(&err.to_string());
    web_sys::console::error_1(&message);
    message
}
