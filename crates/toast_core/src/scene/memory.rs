//! In-memory [`Scene`] used by tests and headless callers.

use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

use super::{EventHandler, NodeKind, Scene, SceneError, SceneEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Handle to a node in a [`MemoryScene`].
pub struct MemoryNodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
/// Inspectable snapshot of one node.
pub struct MemoryNode {
    /// Kind the node was created as.
    pub kind: NodeKind,
    /// Attributes by name.
    pub attributes: BTreeMap<String, String>,
    /// Class list in insertion order, without duplicates.
    pub classes: Vec<String>,
    /// Scoped style variables by name.
    pub style_variables: BTreeMap<String, String>,
    /// Markup set through [`Scene::set_inner_markup`].
    pub inner_markup: Option<String>,
    /// Child nodes in order.
    pub children: Vec<MemoryNodeId>,
    /// Parent node, if attached to one.
    pub parent: Option<MemoryNodeId>,
    /// Events with at least one registered listener, in registration order.
    pub listeners: Vec<SceneEvent>,
}

impl MemoryNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            style_variables: BTreeMap::new(),
            inner_markup: None,
            children: Vec::new(),
            parent: None,
            listeners: Vec::new(),
        }
    }

    /// Reads an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns whether the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }
}

struct MemorySlot {
    node: MemoryNode,
    in_document: bool,
    handlers: Vec<(SceneEvent, Rc<dyn Fn() -> Result<(), SceneError>>)>,
}

#[derive(Default)]
struct MemoryTree {
    slots: Vec<MemorySlot>,
}

impl MemoryTree {
    fn slot(&self, id: MemoryNodeId) -> Result<&MemorySlot, SceneError> {
        self.slots.get(id.0).ok_or(SceneError::UnknownNode)
    }

    fn slot_mut(&mut self, id: MemoryNodeId) -> Result<&mut MemorySlot, SceneError> {
        self.slots.get_mut(id.0).ok_or(SceneError::UnknownNode)
    }

    fn push(&mut self, kind: NodeKind, in_document: bool) -> MemoryNodeId {
        self.slots.push(MemorySlot {
            node: MemoryNode::new(kind),
            in_document,
            handlers: Vec::new(),
        });
        MemoryNodeId(self.slots.len() - 1)
    }

    fn is_attached(&self, id: MemoryNodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(slot) = self.slots.get(current.0) else {
                return false;
            };
            if slot.in_document {
                return true;
            }
            cursor = slot.node.parent;
        }
        false
    }

    fn is_ancestor_or_self(&self, candidate: MemoryNodeId, of: MemoryNodeId) -> bool {
        let mut cursor = Some(of);
        while let Some(current) = cursor {
            if current == candidate {
                return true;
            }
            cursor = self.slots.get(current.0).and_then(|slot| slot.node.parent);
        }
        false
    }

    fn unlink(&mut self, id: MemoryNodeId) {
        let Some(parent) = self.slots.get(id.0).and_then(|slot| slot.node.parent) else {
            return;
        };
        if let Some(parent_slot) = self.slots.get_mut(parent.0) {
            parent_slot.node.children.retain(|child| *child != id);
        }
        if let Some(slot) = self.slots.get_mut(id.0) {
            slot.node.parent = None;
        }
    }

    fn collect(&self, id: MemoryNodeId, kind: NodeKind, out: &mut Vec<MemoryNodeId>) {
        let Some(slot) = self.slots.get(id.0) else {
            return;
        };
        if slot.node.kind == kind {
            out.push(id);
        }
        for child in &slot.node.children {
            self.collect(*child, kind, out);
        }
    }
}

#[derive(Clone, Default)]
/// In-memory node tree implementing [`Scene`].
///
/// Clones share the same tree. A fresh scene has an empty document; call
/// [`MemoryScene::with_root`] or [`MemoryScene::mount_container`] to provide the root container.
pub struct MemoryScene {
    inner: Rc<RefCell<MemoryTree>>,
}

impl fmt::Debug for MemoryScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryScene")
            .field("nodes", &self.inner.borrow().slots.len())
            .finish()
    }
}

impl MemoryScene {
    /// Creates a scene with an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scene whose document already holds one root container.
    pub fn with_root() -> Self {
        let scene = Self::new();
        scene.mount_container();
        scene
    }

    /// Adds a root container directly to the document and returns it.
    pub fn mount_container(&self) -> MemoryNodeId {
        self.inner.borrow_mut().push(NodeKind::Container, true)
    }

    /// Returns a snapshot of `id`.
    pub fn node(&self, id: MemoryNodeId) -> Option<MemoryNode> {
        self.inner
            .borrow()
            .slots
            .get(id.0)
            .map(|slot| slot.node.clone())
    }

    /// Returns the children of `id` in order.
    pub fn children(&self, id: MemoryNodeId) -> Vec<MemoryNodeId> {
        self.node(id).map(|node| node.children).unwrap_or_default()
    }

    /// Returns whether `id` is reachable from the document.
    pub fn is_attached(&self, id: MemoryNodeId) -> bool {
        self.inner.borrow().is_attached(id)
    }

    /// Removes `id` from its parent (or from the document), as an animation-end listener would.
    pub fn detach(&self, id: MemoryNodeId) {
        let mut tree = self.inner.borrow_mut();
        tree.unlink(id);
        if let Some(slot) = tree.slots.get_mut(id.0) {
            slot.in_document = false;
        }
    }

    /// Invokes every `event` listener on `id` and returns how many ran.
    ///
    /// # Errors
    ///
    /// Returns the first listener failure, or [`SceneError::UnknownNode`] for a foreign handle.
    pub fn dispatch(&self, id: MemoryNodeId, event: SceneEvent) -> Result<usize, SceneError> {
        let handlers: Vec<_> = self
            .inner
            .borrow()
            .slot(id)?
            .handlers
            .iter()
            .filter(|(registered, _)| *registered == event)
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in &handlers {
            handler()?;
        }
        Ok(handlers.len())
    }
}

impl Scene for MemoryScene {
    type Node = MemoryNodeId;

    fn root(&self) -> Result<Self::Node, SceneError> {
        let containers = self.nodes_of_kind(NodeKind::Container);
        match containers.as_slice() {
            [] => Err(SceneError::MissingRoot),
            [root] => Ok(*root),
            many => Err(SceneError::AmbiguousRoot { count: many.len() }),
        }
    }

    fn create_node(&self, kind: NodeKind) -> Result<Self::Node, SceneError> {
        Ok(self.inner.borrow_mut().push(kind, false))
    }

    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), SceneError> {
        let mut tree = self.inner.borrow_mut();
        tree.slot(*parent)?;
        tree.slot(*child)?;
        if tree.is_ancestor_or_self(*child, *parent) {
            return Err(SceneError::Host(
                "cannot append a node to itself or its descendant".to_string(),
            ));
        }
        tree.unlink(*child);
        tree.slot_mut(*parent)?.node.children.push(*child);
        let child_slot = tree.slot_mut(*child)?;
        child_slot.node.parent = Some(*parent);
        child_slot.in_document = false;
        Ok(())
    }

    fn set_attribute(
        &self,
        node: &Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), SceneError> {
        self.inner
            .borrow_mut()
            .slot_mut(*node)?
            .node
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .slot(*node)
            .ok()
            .and_then(|slot| slot.node.attributes.get(name).cloned())
    }

    fn add_class(&self, node: &Self::Node, class: &str) -> Result<(), SceneError> {
        let mut tree = self.inner.borrow_mut();
        let classes = &mut tree.slot_mut(*node)?.node.classes;
        if !classes.iter().any(|existing| existing == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    fn set_style_variable(
        &self,
        node: &Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), SceneError> {
        self.inner
            .borrow_mut()
            .slot_mut(*node)?
            .node
            .style_variables
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_inner_markup(&self, node: &Self::Node, markup: &str) -> Result<(), SceneError> {
        let mut tree = self.inner.borrow_mut();
        let children = std::mem::take(&mut tree.slot_mut(*node)?.node.children);
        for child in children {
            if let Some(slot) = tree.slots.get_mut(child.0) {
                slot.node.parent = None;
            }
        }
        tree.slot_mut(*node)?.node.inner_markup = Some(markup.to_string());
        Ok(())
    }

    fn on_event(
        &self,
        node: &Self::Node,
        event: SceneEvent,
        handler: EventHandler,
    ) -> Result<(), SceneError> {
        let mut tree = self.inner.borrow_mut();
        let slot = tree.slot_mut(*node)?;
        slot.handlers.push((event, Rc::from(handler)));
        slot.node.listeners.push(event);
        Ok(())
    }

    fn nodes_of_kind(&self, kind: NodeKind) -> Vec<Self::Node> {
        let tree = self.inner.borrow();
        let mut found = Vec::new();
        for (index, slot) in tree.slots.iter().enumerate() {
            if slot.in_document {
                tree.collect(MemoryNodeId(index), kind, &mut found);
            }
        }
        found
    }
}
