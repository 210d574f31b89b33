//! Browser adapter for `toast_core`.
//!
//! [`DomScene`] renders toasts into `window.document`, the free functions in this crate drive one
//! page-wide [`toast_core::ToastManager`], and [`Toaster`] mounts the container from Leptos. On
//! `wasm32` the same operations are exported to JavaScript (`toast`, `toastLoading`,
//! `toastSuccess`, `toastError`, `toastCustom`, `toastDismiss`, `toastPromise`,
//! `configureToaster`).

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

#[cfg(target_arch = "wasm32")]
mod bindings;
mod component;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod interop;
mod scene;
pub mod toaster;

pub use component::Toaster;
pub use scene::DomScene;
pub use toaster::{
    config, create, custom, dismiss, error, install, loading, promise, success, toast,
};
