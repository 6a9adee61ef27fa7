//! Calls into enhancement modules.
//!
//! Decorative scripts register a global object (`window.Cursor`, ...) with
//! `attach(root)` and `detach(root)`. Missing modules or methods are skipped.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use darlingx_core::config::MAIN_SELECTOR;

use crate::utils::dom;

/// Call `window[module][method](main)`.
pub fn call(module: &str, method: &str) {
    let Some(window) = dom::window() else {
        return;
    };
    let object = match Reflect::get(&window, &JsValue::from_str(module)) {
        Ok(object) if !object.is_undefined() && !object.is_null() => object,
        _ => {
            log::debug!("enhancement module {module} not registered");
            return;
        }
    };
    let Ok(function) = Reflect::get(&object, &JsValue::from_str(method))
        .and_then(|value| value.dyn_into::<Function>())
    else {
        log::debug!("{module} has no {method}()");
        return;
    };

    let root = dom::query(MAIN_SELECTOR)
        .map(JsValue::from)
        .unwrap_or(JsValue::UNDEFINED);
    if let Err(e) = function.call1(&object, &root) {
        log::warn!("{module}.{method}() threw: {e:?}");
    }
}
