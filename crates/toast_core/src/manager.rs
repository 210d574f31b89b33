//! Toast lifecycle manager: builds item trees, inserts them, and signals dismissal.

use std::cell::Cell;

use serde::Serialize;

use crate::{
    scene::{NodeKind, Scene, SceneError, SceneEvent},
    IconType, IdGenerator, ResolvedOptions, ThemeType, ToastId, ToastOptions, ToastType,
    ToasterConfig,
};

/// Item attribute carrying the toast identifier.
pub const ITEM_ID_ATTRIBUTE: &str = "data-toast-item-id";
/// Class requesting removal after [`ToastManager::dismiss`].
pub const DISMISS_CLASS: &str = "dismiss";
/// Class requesting removal after the close button was clicked.
pub const DISMISS_WITH_CLOSE_BUTTON_CLASS: &str = "dismiss-with-close-button";
/// Style variable for the custom theme background.
pub const STYLE_BACKGROUND_VARIABLE: &str = "--wc-toast-background";
/// Style variable for the custom theme stroke.
pub const STYLE_STROKE_VARIABLE: &str = "--wc-toast-stroke";
/// Style variable for the custom theme text color.
pub const STYLE_COLOR_VARIABLE: &str = "--wc-toast-color";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Record returned from [`ToastManager::create`].
///
/// The manager does not retain it; the item node's [`ITEM_ID_ATTRIBUTE`] is the only durable
/// reference to a live toast. `options` echoes the caller's input as given, not the resolved
/// defaults.
pub struct Toast {
    /// Identifier for [`ToastManager::dismiss`].
    pub id: ToastId,
    /// Semantic category.
    #[serde(rename = "type")]
    pub toast_type: ToastType,
    /// Message text, rendered verbatim.
    pub message: String,
    /// Options as supplied by the caller.
    #[serde(flatten)]
    pub options: ToastOptions,
}

#[derive(Debug)]
/// Creates and dismisses toasts inside a [`Scene`].
pub struct ToastManager<S: Scene> {
    scene: S,
    ids: IdGenerator,
    config: Cell<ToasterConfig>,
}

impl<S: Scene> ToastManager<S> {
    /// Creates a manager with the default configuration.
    pub fn new(scene: S) -> Self {
        Self::with_config(scene, ToasterConfig::default())
    }

    /// Creates a manager with an explicit configuration.
    pub fn with_config(scene: S, config: ToasterConfig) -> Self {
        Self {
            scene,
            ids: IdGenerator::new(),
            config: Cell::new(config),
        }
    }

    /// Returns the scene this manager renders into.
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Returns the active configuration.
    pub fn config(&self) -> ToasterConfig {
        self.config.get()
    }

    /// Replaces the configuration for toasts created from now on. Issued ids are unaffected.
    pub fn set_config(&self, config: ToasterConfig) {
        self.config.set(config);
    }

    /// Builds a toast of `toast_type` and appends it to the root container.
    ///
    /// The message is not validated; any string, including an empty one, is rendered verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] when the document has no single root container or the scene rejects
    /// an operation. No partial toast is attached in that case.
    pub fn create(
        &self,
        message: &str,
        toast_type: ToastType,
        options: &ToastOptions,
    ) -> Result<Toast, SceneError> {
        let id = self.ids.next_id();
        let resolved = options.resolve(self.config().default_theme);
        let root = self.scene.root()?;

        let item = self.build_item(&id, toast_type, &resolved)?;
        let icon = self.build_icon(toast_type, &resolved)?;
        let content = self.scene.create_node(NodeKind::Content)?;
        self.scene.set_attribute(&content, "message", message)?;

        self.scene.append_child(&item, &icon)?;
        self.scene.append_child(&item, &content)?;
        if resolved.closeable {
            self.attach_close_button(&item)?;
        }
        self.scene.append_child(&root, &item)?;

        Ok(Toast {
            id,
            toast_type,
            message: message.to_string(),
            options: options.clone(),
        })
    }

    /// Shows a [`ToastType::Blank`] toast and returns its id.
    ///
    /// # Errors
    ///
    /// See [`ToastManager::create`].
    pub fn blank(&self, message: &str, options: &ToastOptions) -> Result<ToastId, SceneError> {
        self.create(message, ToastType::Blank, options)
            .map(|toast| toast.id)
    }

    /// Shows a [`ToastType::Loading`] toast and returns its id.
    ///
    /// # Errors
    ///
    /// See [`ToastManager::create`].
    pub fn loading(&self, message: &str, options: &ToastOptions) -> Result<ToastId, SceneError> {
        self.create(message, ToastType::Loading, options)
            .map(|toast| toast.id)
    }

    /// Shows a [`ToastType::Success`] toast and returns its id.
    ///
    /// # Errors
    ///
    /// See [`ToastManager::create`].
    pub fn success(&self, message: &str, options: &ToastOptions) -> Result<ToastId, SceneError> {
        self.create(message, ToastType::Success, options)
            .map(|toast| toast.id)
    }

    /// Shows a [`ToastType::Error`] toast and returns its id.
    ///
    /// # Errors
    ///
    /// See [`ToastManager::create`].
    pub fn error(&self, message: &str, options: &ToastOptions) -> Result<ToastId, SceneError> {
        self.create(message, ToastType::Error, options)
            .map(|toast| toast.id)
    }

    /// Shows a [`ToastType::Custom`] toast and returns its id.
    ///
    /// # Errors
    ///
    /// See [`ToastManager::create`].
    pub fn custom(&self, message: &str, options: &ToastOptions) -> Result<ToastId, SceneError> {
        self.create(message, ToastType::Custom, options)
            .map(|toast| toast.id)
    }

    /// Adds [`DISMISS_CLASS`] to every attached item whose id matches.
    ///
    /// Unknown, stale, or already removed ids match nothing and are not an error. Node removal is
    /// left to whoever reacts to the class.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] only when the scene rejects the class change.
    pub fn dismiss(&self, id: &ToastId) -> Result<(), SceneError> {
        for item in self.scene.nodes_of_kind(NodeKind::Item) {
            if self.scene.attribute(&item, ITEM_ID_ATTRIBUTE).as_deref() == Some(id.as_str()) {
                self.scene.add_class(&item, DISMISS_CLASS)?;
            }
        }
        Ok(())
    }

    fn build_item(
        &self,
        id: &ToastId,
        toast_type: ToastType,
        resolved: &ResolvedOptions,
    ) -> Result<S::Node, SceneError> {
        let item = self.scene.create_node(NodeKind::Item)?;
        self.scene.set_attribute(&item, "type", toast_type.as_str())?;
        self.scene
            .set_attribute(&item, "duration", &resolved.duration_attribute())?;
        self.scene.set_attribute(&item, ITEM_ID_ATTRIBUTE, id.as_str())?;
        self.scene
            .set_attribute(&item, "theme", resolved.theme.as_str())?;

        if let (ThemeType::Custom, Some(style)) = (resolved.theme, resolved.style.as_ref()) {
            let variables = [
                (STYLE_BACKGROUND_VARIABLE, style.background.as_deref()),
                (STYLE_STROKE_VARIABLE, style.stroke.as_deref()),
                (STYLE_COLOR_VARIABLE, style.color.as_deref()),
            ];
            for (name, value) in variables {
                // Empty values would clear the variable, so they count as unset.
                if let Some(value) = value.filter(|value| !value.is_empty()) {
                    self.scene.set_style_variable(&item, name, value)?;
                }
            }
        }
        Ok(item)
    }

    fn build_icon(
        &self,
        toast_type: ToastType,
        resolved: &ResolvedOptions,
    ) -> Result<S::Node, SceneError> {
        let icon = self.scene.create_node(NodeKind::Icon)?;
        let icon_type = resolved.icon_type_for(toast_type);
        self.scene.set_attribute(&icon, "type", icon_type.as_str())?;
        self.scene
            .set_attribute(&icon, "icon", resolved.icon_attribute())?;
        if icon_type == IconType::Svg {
            let markup = self.config().svg_icons.apply(&resolved.icon_content);
            self.scene.set_inner_markup(&icon, &markup)?;
        }
        Ok(icon)
    }

    fn attach_close_button(&self, item: &S::Node) -> Result<(), SceneError> {
        let button = self.scene.create_node(NodeKind::CloseButton)?;
        let scene = self.scene.clone();
        let target = item.clone();
        self.scene.on_event(
            &button,
            SceneEvent::Click,
            Box::new(move || scene.add_class(&target, DISMISS_WITH_CLOSE_BUTTON_CLASS)),
        )?;
        self.scene.append_child(item, &button)
    }
}
