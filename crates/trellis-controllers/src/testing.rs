//! In-memory toolkit used by the unit tests.

use std::cell::Cell;
use std::rc::Rc;

use crate::controller::{Controller, ReadyContext};
use crate::error::BoxError;
use crate::toolkit::{Toolkit, ViewRequest, ViewTarget};

/// A view node identified by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node(Rc<str>);

impl Node {
    pub fn new(name: &str) -> Self {
        Node(Rc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub struct Scene {
    pub root: Node,
}

/// Loads every view path as a node of the same name.
///
/// `missing.view` fails to load and `empty.view` loads without a root.
#[derive(Debug, Default)]
pub struct TestToolkit {
    pub seen_resources: Rc<Cell<usize>>,
}

impl Toolkit for TestToolkit {
    type Root = Node;
    type Scene = Rc<Scene>;
    type Stage = String;

    fn load_view(
        &self,
        request: &ViewRequest<'_>,
        target: &mut dyn ViewTarget,
    ) -> Result<Option<Node>, BoxError> {
        if request.view_path == "missing.view" {
            return Err(format!("{} not found", request.view_path).into());
        }
        if request.resources.is_some() {
            self.seen_resources.set(self.seen_resources.get() + 1);
        }
        target.view_loaded();
        if request.view_path == "empty.view" {
            return Ok(None);
        }
        Ok(Some(Node::new(request.view_path)))
    }

    fn create_scene(&self, root: &Node) -> Rc<Scene> {
        Rc::new(Scene { root: root.clone() })
    }
}

/// A controller with no dependencies.
pub struct Blank;

impl Controller for Blank {
    type Toolkit = TestToolkit;

    fn create() -> Result<Self, BoxError> {
        Ok(Blank)
    }

    fn view_path(&self) -> &str {
        "blank.view"
    }

    fn is_cacheable(&self) -> bool {
        true
    }

    fn on_ready(&mut self, _ctx: &ReadyContext<'_, TestToolkit>) {}
}
