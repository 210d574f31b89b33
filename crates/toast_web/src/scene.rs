//! DOM-backed [`Scene`] over `web_sys::Document`.

use leptos::logging;
use toast_core::{EventHandler, NodeKind, Scene, SceneError, SceneEvent, CONTAINER_TAG};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

#[derive(Debug, Clone)]
/// Browser scene that renders toasts as custom elements in a document.
pub struct DomScene {
    document: web_sys::Document,
}

impl DomScene {
    /// Wraps an existing document.
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    /// Binds to `window.document`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Unavailable`] outside a browser or when the window has no document.
    pub fn from_window() -> Result<Self, SceneError> {
        #[cfg(target_arch = "wasm32")]
        {
            let window =
                web_sys::window().ok_or_else(|| SceneError::Unavailable("window".to_string()))?;
            let document = window
                .document()
                .ok_or_else(|| SceneError::Unavailable("document".to_string()))?;
            Ok(Self::new(document))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Err(SceneError::Unavailable("browser document".to_string()))
        }
    }

    /// Returns the underlying document.
    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    fn query_all(&self, selector: &str) -> Vec<web_sys::Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .collect()
    }
}

fn host_error(action: &str, err: JsValue) -> SceneError {
    SceneError::Host(format!("{action} failed: {err:?}"))
}

impl Scene for DomScene {
    type Node = web_sys::Element;

    fn root(&self) -> Result<Self::Node, SceneError> {
        let mut containers = self.query_all(CONTAINER_TAG);
        match containers.len() {
            0 => Err(SceneError::MissingRoot),
            1 => Ok(containers.remove(0)),
            count => Err(SceneError::AmbiguousRoot { count }),
        }
    }

    fn create_node(&self, kind: NodeKind) -> Result<Self::Node, SceneError> {
        self.document
            .create_element(kind.tag_name())
            .map_err(|err| host_error("create_element", err))
    }

    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), SceneError> {
        parent
            .append_child(child)
            .map(|_| ())
            .map_err(|err| host_error("append_child", err))
    }

    fn set_attribute(
        &self,
        node: &Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), SceneError> {
        node.set_attribute(name, value)
            .map_err(|err| host_error("set_attribute", err))
    }

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn add_class(&self, node: &Self::Node, class: &str) -> Result<(), SceneError> {
        node.class_list()
            .add_1(class)
            .map_err(|err| host_error("classList.add", err))
    }

    fn set_style_variable(
        &self,
        node: &Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), SceneError> {
        let element = node
            .dyn_ref::<web_sys::HtmlElement>()
            .ok_or_else(|| SceneError::Host(format!("<{}> has no style", node.tag_name())))?;
        element
            .style()
            .set_property(name, value)
            .map_err(|err| host_error("style.setProperty", err))
    }

    fn set_inner_markup(&self, node: &Self::Node, markup: &str) -> Result<(), SceneError> {
        node.set_inner_html(markup);
        Ok(())
    }

    fn on_event(
        &self,
        node: &Self::Node,
        event: SceneEvent,
        handler: EventHandler,
    ) -> Result<(), SceneError> {
        let event_type = event.event_type();
        let listener = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| {
            if let Err(err) = handler() {
                logging::warn!("toast {event_type} listener failed: {err}");
            }
        }));
        node.add_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref())
            .map_err(|err| host_error("addEventListener", err))?;
        // Lives as long as the node; the document owns it from here.
        listener.forget();
        Ok(())
    }

    fn nodes_of_kind(&self, kind: NodeKind) -> Vec<Self::Node> {
        self.query_all(kind.tag_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn from_window_is_unavailable_off_wasm() {
        assert_eq!(
            DomScene::from_window().expect_err("no browser"),
            SceneError::Unavailable("browser document".to_string())
        );
    }
}
