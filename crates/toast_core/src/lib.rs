//! Host-agnostic toast contracts and the toast lifecycle manager.
//!
//! This crate is the API-first boundary for toast rendering. It exposes the option model, the
//! identifier generator, the [`Scene`] rendering seam with an in-memory test double, and the
//! [`ToastManager`] that builds, inserts and dismisses toasts. Concrete browser wiring lives in
//! `toast_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod id;
pub mod manager;
pub mod markup;
pub mod options;
pub mod promise;
pub mod salvage;
pub mod scene;

pub use config::ToasterConfig;
pub use id::{IdGenerator, ToastId};
pub use manager::{
    Toast, ToastManager, DISMISS_CLASS, DISMISS_WITH_CLOSE_BUTTON_CLASS, ITEM_ID_ATTRIBUTE,
    STYLE_BACKGROUND_VARIABLE, STYLE_COLOR_VARIABLE, STYLE_STROKE_VARIABLE,
};
pub use markup::{escape_markup, MarkupPolicy};
pub use options::{
    IconOptions, IconType, OptionsError, ResolvedOptions, ThemeOptions, ThemeStyle, ThemeType,
    ToastOptions, ToastType,
};
pub use promise::{PromiseMessages, Settled};
pub use salvage::Salvage;
pub use scene::memory::{MemoryNode, MemoryNodeId, MemoryScene};
pub use scene::{
    EventHandler, NodeKind, Scene, SceneError, SceneEvent, CLOSE_BUTTON_TAG, CONTAINER_TAG,
    CONTENT_TAG, ICON_TAG, ITEM_TAG,
};
