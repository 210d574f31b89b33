//! Rendering seam between the toast lifecycle manager and a concrete node tree.
//!
//! The manager only talks to [`Scene`]; browsers plug in a DOM-backed implementation and tests
//! use [`memory::MemoryScene`].

pub mod memory;

use thiserror::Error;

/// Custom-element tag of the root container.
pub const CONTAINER_TAG: &str = "wc-toast";
/// Custom-element tag of a toast item.
pub const ITEM_TAG: &str = "wc-toast-item";
/// Custom-element tag of a toast icon.
pub const ICON_TAG: &str = "wc-toast-icon";
/// Custom-element tag of a toast message.
pub const CONTENT_TAG: &str = "wc-toast-content";
/// Custom-element tag of a toast close button.
pub const CLOSE_BUTTON_TAG: &str = "wc-toast-close-button";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Node kinds the toast renderer creates or looks up.
pub enum NodeKind {
    /// The single root container all items are appended to.
    Container,
    /// One toast.
    Item,
    /// Icon slot of a toast.
    Icon,
    /// Message slot of a toast.
    Content,
    /// Optional close control of a toast.
    CloseButton,
}

impl NodeKind {
    /// Returns the custom-element tag for this kind.
    pub const fn tag_name(self) -> &'static str {
        match self {
            Self::Container => CONTAINER_TAG,
            Self::Item => ITEM_TAG,
            Self::Icon => ICON_TAG,
            Self::Content => CONTENT_TAG,
            Self::CloseButton => CLOSE_BUTTON_TAG,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Events the toast renderer listens for.
pub enum SceneEvent {
    /// Pointer activation.
    Click,
}

impl SceneEvent {
    /// Returns the DOM event type name.
    pub const fn event_type(self) -> &'static str {
        match self {
            Self::Click => "click",
        }
    }
}

/// Listener registered through [`Scene::on_event`].
pub type EventHandler = Box<dyn Fn() -> Result<(), SceneError>>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures reported by a [`Scene`] implementation.
pub enum SceneError {
    /// No root container is present in the document.
    #[error("no `wc-toast` root container found in the document")]
    MissingRoot,
    /// More than one root container is present in the document.
    #[error("expected exactly one `wc-toast` root container, found {count}")]
    AmbiguousRoot {
        /// Number of containers found.
        count: usize,
    },
    /// The host environment (window, document) is not available.
    #[error("{0} unavailable")]
    Unavailable(String),
    /// A node handle does not belong to this scene.
    #[error("node does not belong to this scene")]
    UnknownNode,
    /// The host rejected an operation.
    #[error("{0}")]
    Host(String),
}

/// Node tree the toast renderer writes into.
///
/// Implementations are cheap to clone; clones share the same underlying tree so listeners can
/// capture a handle to the scene.
pub trait Scene: Clone + 'static {
    /// Handle to a node in this scene.
    type Node: Clone + 'static;

    /// Returns the single root container.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::MissingRoot`] or [`SceneError::AmbiguousRoot`] unless exactly one
    /// container is present.
    fn root(&self) -> Result<Self::Node, SceneError>;

    /// Creates a detached node of `kind`.
    fn create_node(&self, kind: NodeKind) -> Result<Self::Node, SceneError>;

    /// Appends `child` as the last child of `parent`.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), SceneError>;

    /// Sets an attribute on `node`.
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str)
        -> Result<(), SceneError>;

    /// Reads an attribute from `node`.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Adds a class to `node`.
    fn add_class(&self, node: &Self::Node, class: &str) -> Result<(), SceneError>;

    /// Sets a scoped style variable (for example `--wc-toast-color`) on `node`.
    fn set_style_variable(
        &self,
        node: &Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), SceneError>;

    /// Replaces the children of `node` with parsed markup.
    fn set_inner_markup(&self, node: &Self::Node, markup: &str) -> Result<(), SceneError>;

    /// Registers `handler` for `event` on `node`.
    fn on_event(
        &self,
        node: &Self::Node,
        event: SceneEvent,
        handler: EventHandler,
    ) -> Result<(), SceneError>;

    /// Returns every node of `kind` currently attached to the document, in document order.
    fn nodes_of_kind(&self, kind: NodeKind) -> Vec<Self::Node>;
}
