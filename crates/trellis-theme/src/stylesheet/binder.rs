use std::fmt;
use std::rc::Rc;

use crate::node::{same_node, StyledRoot};

/// Keeps a set of roots in sync with one generated stylesheet.
///
/// Each root carries at most the current stylesheet. [`update`](Self::update)
/// swaps it on every bound root; binding attaches the current stylesheet,
/// unbinding detaches it.
#[derive(Default)]
pub struct StylesheetBinder {
    roots: Vec<Rc<dyn StyledRoot>>,
    current: Option<String>,
    previous: Option<String>,
}

impl StylesheetBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root and attaches the current stylesheet, if any.
    ///
    /// Returns false if the root is already bound.
    pub fn bind(&mut self, root: Rc<dyn StyledRoot>) -> bool {
        if self.contains(&root) {
            return false;
        }
        if let Some(current) = &self.current {
            root.attach_stylesheet(current);
        }
        self.roots.push(root);
        true
    }

    /// Removes a root and detaches the current stylesheet from it.
    ///
    /// Returns false if the root was not bound.
    pub fn unbind(&mut self, root: &Rc<dyn StyledRoot>) -> bool {
        let Some(index) = self.roots.iter().position(|r| same_node(r, root)) else {
            return false;
        };
        let removed = self.roots.remove(index);
        if let Some(current) = &self.current {
            removed.detach_stylesheet(current);
        }
        true
    }

    /// Replaces the stylesheet on every bound root.
    pub fn update(&mut self, stylesheet: impl Into<String>) {
        let stylesheet = stylesheet.into();
        self.previous = self.current.take();

        for root in &self.roots {
            if let Some(previous) = &self.previous {
                root.detach_stylesheet(previous);
            }
            root.attach_stylesheet(&stylesheet);
        }

        self.current = Some(stylesheet);
    }

    pub fn contains(&self, root: &Rc<dyn StyledRoot>) -> bool {
        self.roots.iter().any(|r| same_node(r, root))
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn roots(&self) -> &[Rc<dyn StyledRoot>] {
        &self.roots
    }
}

impl fmt::Debug for StylesheetBinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StylesheetBinder")
            .field("root_count", &self.roots.len())
            .field("current", &self.current)
            .field("previous", &self.previous)
            .finish()
    }
}
