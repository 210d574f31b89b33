//! JavaScript-callable toast API.
//!
//! Mirrors the call shape of the `toast` JavaScript module: option and message objects use its
//! field names, `undefined`/`null` mean defaults, a field of the wrong type is dropped on its own,
//! and `toastPromise` resolves even when the awaited promise rejects.

use js_sys::Promise;
use toast_core::{
    PromiseMessages, Salvage, SceneError, ToastId, ToastOptions, ToastType, ToasterConfig,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

use crate::interop::{salvage_or_default, settle};

fn js_error(err: SceneError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn js_error_to_string(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = js_sys::Reflect::get(err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}

fn decode<T: Salvage>(what: &str, value: JsValue) -> T {
    salvage_or_default(what, serde_wasm_bindgen::Deserializer::from(value))
}

fn show(message: &str, toast_type: ToastType, options: JsValue) -> Result<String, JsValue> {
    let options: ToastOptions = decode("options", options);
    crate::create(message, toast_type, &options)
        .map(|toast| toast.id.into_string())
        .map_err(js_error)
}

/// `toast(message, options)`: shows a blank toast and returns its id.
#[wasm_bindgen(js_name = toast)]
pub fn js_toast(message: &str, options: JsValue) -> Result<String, JsValue> {
    show(message, ToastType::Blank, options)
}

/// `toastLoading(message, options)`.
#[wasm_bindgen(js_name = toastLoading)]
pub fn js_toast_loading(message: &str, options: JsValue) -> Result<String, JsValue> {
    show(message, ToastType::Loading, options)
}

/// `toastSuccess(message, options)`.
#[wasm_bindgen(js_name = toastSuccess)]
pub fn js_toast_success(message: &str, options: JsValue) -> Result<String, JsValue> {
    show(message, ToastType::Success, options)
}

/// `toastError(message, options)`.
#[wasm_bindgen(js_name = toastError)]
pub fn js_toast_error(message: &str, options: JsValue) -> Result<String, JsValue> {
    show(message, ToastType::Error, options)
}

/// `toastCustom(message, options)`.
#[wasm_bindgen(js_name = toastCustom)]
pub fn js_toast_custom(message: &str, options: JsValue) -> Result<String, JsValue> {
    show(message, ToastType::Custom, options)
}

/// `toastDismiss(id)`: no-op for unknown ids.
#[wasm_bindgen(js_name = toastDismiss)]
pub fn js_toast_dismiss(id: &str) -> Result<(), JsValue> {
    crate::dismiss(&ToastId::from(id)).map_err(js_error)
}

/// `toastPromise(promise, messages, options)`.
///
/// The returned promise resolves with the awaited value, or with the rejection reason when the
/// awaited promise rejects. It rejects only when a toast cannot be rendered.
#[wasm_bindgen(js_name = toastPromise)]
pub fn js_toast_promise(promise: Promise, messages: JsValue, options: JsValue) -> Promise {
    let messages: PromiseMessages = decode("promise messages", messages);
    let options: ToastOptions = decode("options", options);
    future_to_promise(async move {
        let operation = JsFuture::from(promise);
        let outcome = crate::promise(operation, &messages, &options).await;
        settle(outcome, js_error_to_string).map_err(js_error)
    })
}

/// `configureToaster(config)`: applies `{ svgIcons, defaultTheme }` to the page toaster.
#[wasm_bindgen(js_name = configureToaster)]
pub fn js_configure_toaster(config: JsValue) -> Result<(), JsValue> {
    let config: ToasterConfig = decode("config", config);
    crate::install(config).map_err(js_error)
}
