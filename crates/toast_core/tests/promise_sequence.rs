use std::{cell::RefCell, rc::Rc};

use futures::executor::block_on;
use pretty_assertions::assert_eq;
use toast_core::{
    EventHandler, MemoryNodeId, MemoryScene, NodeKind, PromiseMessages, Scene, SceneError,
    SceneEvent, Settled, ToastManager, ToastOptions, DISMISS_CLASS, ITEM_ID_ATTRIBUTE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Shown { toast_type: String, message: String },
    Dismissed { id: String },
}

/// Wraps a [`MemoryScene`] and records item insertions and dismiss signals in order.
#[derive(Clone)]
struct RecordingScene {
    inner: MemoryScene,
    steps: Rc<RefCell<Vec<Step>>>,
}

impl RecordingScene {
    fn new() -> Self {
        Self {
            inner: MemoryScene::with_root(),
            steps: Rc::default(),
        }
    }

    fn steps(&self) -> Vec<Step> {
        self.steps.borrow().clone()
    }

    fn message_of(&self, item: MemoryNodeId) -> String {
        let content = self.inner.children(item)[1];
        self.inner
            .attribute(&content, "message")
            .unwrap_or_default()
    }
}

impl Scene for RecordingScene {
    type Node = MemoryNodeId;

    fn root(&self) -> Result<Self::Node, SceneError> {
        self.inner.root()
    }

    fn create_node(&self, kind: NodeKind) -> Result<Self::Node, SceneError> {
        self.inner.create_node(kind)
    }

    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), SceneError> {
        self.inner.append_child(parent, child)?;
        if self.inner.node(*child).map(|node| node.kind) == Some(NodeKind::Item) {
            self.steps.borrow_mut().push(Step::Shown {
                toast_type: self.inner.attribute(child, "type").unwrap_or_default(),
                message: self.message_of(*child),
            });
        }
        Ok(())
    }

    fn set_attribute(
        &self,
        node: &Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), SceneError> {
        self.inner.set_attribute(node, name, value)
    }

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String> {
        self.inner.attribute(node, name)
    }

    fn add_class(&self, node: &Self::Node, class: &str) -> Result<(), SceneError> {
        self.inner.add_class(node, class)?;
        if class == DISMISS_CLASS {
            self.steps.borrow_mut().push(Step::Dismissed {
                id: self
                    .inner
                    .attribute(node, ITEM_ID_ATTRIBUTE)
                    .unwrap_or_default(),
            });
        }
        Ok(())
    }

    fn set_style_variable(
        &self,
        node: &Self::Node,
        name: &str,
        value: &str,
    ) -> Result<(), SceneError> {
        self.inner.set_style_variable(node, name, value)
    }

    fn set_inner_markup(&self, node: &Self::Node, markup: &str) -> Result<(), SceneError> {
        self.inner.set_inner_markup(node, markup)
    }

    fn on_event(
        &self,
        node: &Self::Node,
        event: SceneEvent,
        handler: EventHandler,
    ) -> Result<(), SceneError> {
        self.inner.on_event(node, event, handler)
    }

    fn nodes_of_kind(&self, kind: NodeKind) -> Vec<Self::Node> {
        self.inner.nodes_of_kind(kind)
    }
}

fn shown(toast_type: &str, message: &str) -> Step {
    Step::Shown {
        toast_type: toast_type.to_string(),
        message: message.to_string(),
    }
}

fn dismissed(id: &str) -> Step {
    Step::Dismissed { id: id.to_string() }
}

#[test]
fn resolved_operation_swaps_loading_for_success() {
    let manager = ToastManager::new(RecordingScene::new());
    let messages = PromiseMessages::new("L", "S", "E");

    let settled = block_on(manager.promise(
        async { Ok::<i32, String>(42) },
        &messages,
        &ToastOptions::default(),
    ))
    .expect("promise");

    assert_eq!(settled, Settled::Resolved(42));
    assert_eq!(
        manager.scene().steps(),
        vec![shown("loading", "L"), dismissed("1"), shown("success", "S")]
    );
}

#[test]
fn rejected_operation_swaps_loading_for_error_and_still_resolves() {
    let manager = ToastManager::new(RecordingScene::new());
    let messages = PromiseMessages::new("L", "S", "E");

    let settled = block_on(manager.promise(
        async { Err::<String, String>("boom".to_string()) },
        &messages,
        &ToastOptions::default(),
    ))
    .expect("promise");

    assert_eq!(settled.clone(), Settled::Rejected("boom".to_string()));
    assert_eq!(settled.into_inner(), "boom");
    assert_eq!(
        manager.scene().steps(),
        vec![shown("loading", "L"), dismissed("1"), shown("error", "E")]
    );
}

#[test]
fn sequences_only_dismiss_their_own_loading_toast() {
    let manager = ToastManager::new(RecordingScene::new());
    let unrelated = manager
        .loading("still working", &ToastOptions::default())
        .expect("unrelated");

    block_on(manager.promise(
        async { Ok::<(), ()>(()) },
        &PromiseMessages::new("L", "S", "E"),
        &ToastOptions::default(),
    ))
    .expect("promise");

    let scene = manager.scene();
    let classes: Vec<Vec<String>> = scene
        .nodes_of_kind(NodeKind::Item)
        .into_iter()
        .map(|item| scene.inner.node(item).expect("item").classes)
        .collect();
    assert_eq!(
        classes,
        vec![vec![], vec![DISMISS_CLASS.to_string()], vec![]]
    );
    assert_eq!(unrelated.as_str(), "1");
}

#[test]
fn empty_messages_are_rendered_verbatim() {
    let manager = ToastManager::new(RecordingScene::new());

    block_on(manager.promise(
        async { Ok::<(), ()>(()) },
        &PromiseMessages::default(),
        &ToastOptions::default(),
    ))
    .expect("promise");

    assert_eq!(
        manager.scene().steps(),
        vec![shown("loading", ""), dismissed("1"), shown("success", "")]
    );
}

#[test]
fn missing_root_surfaces_before_the_operation_runs() {
    let manager = ToastManager::new(MemoryScene::new());
    let ran = RefCell::new(false);

    let result = block_on(manager.promise(
        async {
            *ran.borrow_mut() = true;
            Ok::<(), ()>(())
        },
        &PromiseMessages::new("L", "S", "E"),
        &ToastOptions::default(),
    ));

    assert_eq!(result, Err(SceneError::MissingRoot));
    assert!(!*ran.borrow());
}
