//! Process-wide toaster bound to `window.document`.
//!
//! One [`ToastManager`] per thread is created lazily on first use, so identifiers stay unique for
//! the lifetime of the page.

use std::{cell::RefCell, future::Future, rc::Rc};

use leptos::logging;
use toast_core::{
    PromiseMessages, SceneError, Settled, Toast, ToastId, ToastManager, ToastOptions, ToastType,
    ToasterConfig,
};

use crate::DomScene;

thread_local! {
    static TOASTER: RefCell<Option<Rc<ToastManager<DomScene>>>> = const { RefCell::new(None) };
}

fn toaster() -> Result<Rc<ToastManager<DomScene>>, SceneError> {
    TOASTER.with(|slot| {
        if let Some(manager) = slot.borrow().as_ref() {
            return Ok(Rc::clone(manager));
        }
        let manager = Rc::new(ToastManager::new(DomScene::from_window()?));
        *slot.borrow_mut() = Some(Rc::clone(&manager));
        logging::log!("toaster attached to document");
        Ok(manager)
    })
}

/// Applies `config` to the page toaster, creating it if needed.
///
/// # Errors
///
/// Returns [`SceneError::Unavailable`] when no browser document is present.
pub fn install(config: ToasterConfig) -> Result<(), SceneError> {
    toaster()?.set_config(config);
    Ok(())
}

/// Returns the page toaster's configuration.
///
/// # Errors
///
/// Returns [`SceneError::Unavailable`] when no browser document is present.
pub fn config() -> Result<ToasterConfig, SceneError> {
    Ok(toaster()?.config())
}

/// Shows a toast of `toast_type` and returns the full record.
///
/// # Errors
///
/// Returns [`SceneError`] when the document has no single `wc-toast` container.
pub fn create(
    message: &str,
    toast_type: ToastType,
    options: &ToastOptions,
) -> Result<Toast, SceneError> {
    toaster()?.create(message, toast_type, options)
}

/// Shows a blank toast.
///
/// # Errors
///
/// See [`create`].
pub fn toast(message: &str, options: &ToastOptions) -> Result<ToastId, SceneError> {
    toaster()?.blank(message, options)
}

/// Shows a loading toast.
///
/// # Errors
///
/// See [`create`].
pub fn loading(message: &str, options: &ToastOptions) -> Result<ToastId, SceneError> {
    toaster()?.loading(message, options)
}

/// Shows a success toast.
///
/// # Errors
///
/// See [`create`].
pub fn success(message: &str, options: &ToastOptions) -> Result<ToastId, SceneError> {
    toaster()?.success(message, options)
}

/// Shows an error toast.
///
/// # Errors
///
/// See [`create`].
pub fn error(message: &str, options: &ToastOptions) -> Result<ToastId, SceneError> {
    toaster()?.error(message, options)
}

/// Shows a custom toast.
///
/// # Errors
///
/// See [`create`].
pub fn custom(message: &str, options: &ToastOptions) -> Result<ToastId, SceneError> {
    toaster()?.custom(message, options)
}

/// Signals dismissal of the toast with `id`. Unknown ids are ignored.
///
/// # Errors
///
/// Returns [`SceneError`] when no browser document is present.
pub fn dismiss(id: &ToastId) -> Result<(), SceneError> {
    toaster()?.dismiss(id)
}

/// Runs the loading → success/error sequence around `operation` on the page toaster.
///
/// # Errors
///
/// Returns [`SceneError`] only when a toast cannot be rendered.
pub async fn promise<F, T, E>(
    operation: F,
    messages: &PromiseMessages,
    options: &ToastOptions,
) -> Result<Settled<T, E>, SceneError>
where
    F: Future<Output = Result<T, E>>,
{
    let manager = toaster()?;
    manager.promise(operation, messages, options).await
}
