//! Inline style management for a single node.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::node::InlineStyleTarget;

/// Owns the inline style of one node as a map of CSS properties.
///
/// Every change re-renders the whole style string and pushes it to the node.
/// Properties render in name order as `name: value;`, separated by single
/// spaces. Semicolons are stripped from names and values so one property
/// cannot inject another.
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use trellis_theme::{InlineStyleTarget, InlineStyler};
///
/// #[derive(Default)]
/// struct Label(RefCell<String>);
///
/// impl InlineStyleTarget for Label {
///     fn set_style(&self, style: &str) {
///         *self.0.borrow_mut() = style.to_string();
///     }
/// }
///
/// let label = Rc::new(Label::default());
/// let mut styler = InlineStyler::new(label.clone());
/// styler.set_property("-fx-text-fill", "#FF0000FF");
/// styler.set_property("-fx-font-size", "14px");
///
/// assert_eq!(*label.0.borrow(), "-fx-font-size: 14px; -fx-text-fill: #FF0000FF;");
/// ```
pub struct InlineStyler {
    node: Rc<dyn InlineStyleTarget>,
    properties: BTreeMap<String, String>,
}

impl InlineStyler {
    pub fn new(node: Rc<dyn InlineStyleTarget>) -> Self {
        Self {
            node,
            properties: BTreeMap::new(),
        }
    }

    /// Sets a property and re-renders the node's style.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
        self.apply();
    }

    /// Removes a property and re-renders the node's style.
    ///
    /// Returns the previous value, if any.
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let removed = self.properties.remove(name);
        self.apply();
        removed
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn node(&self) -> &Rc<dyn InlineStyleTarget> {
        &self.node
    }

    /// Renders the current properties as an inline style string.
    pub fn style(&self) -> String {
        self.properties
            .iter()
            .map(|(name, value)| format!("{}: {};", name.replace(';', ""), value.replace(';', "")))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn apply(&self) {
        self.node.set_style(&self.style());
    }
}

impl fmt::Debug for InlineStyler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineStyler")
            .field("properties", &self.properties)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Node {
        style: RefCell<String>,
        updates: RefCell<usize>,
    }

    impl InlineStyleTarget for Node {
        fn set_style(&self, style: &str) {
            *self.style.borrow_mut() = style.to_string();
            *self.updates.borrow_mut() += 1;
        }
    }

    #[test]
    fn test_single_property() {
        let node = Rc::new(Node::default());
        let mut styler = InlineStyler::new(node.clone());
        styler.set_property("-fx-fill", "#000000FF");
        assert_eq!(*node.style.borrow(), "-fx-fill: #000000FF;");
    }

    #[test]
    fn test_overwrite_property() {
        let node = Rc::new(Node::default());
        let mut styler = InlineStyler::new(node.clone());
        styler.set_property("-fx-fill", "red");
        styler.set_property("-fx-fill", "blue");
        assert_eq!(*node.style.borrow(), "-fx-fill: blue;");
        assert_eq!(styler.property("-fx-fill"), Some("blue"));
    }

    #[test]
    fn test_semicolons_stripped() {
        let node = Rc::new(Node::default());
        let mut styler = InlineStyler::new(node.clone());
        styler.set_property("-fx-fill;", "red; -fx-opacity: 0");
        assert_eq!(*node.style.borrow(), "-fx-fill: red -fx-opacity: 0;");
    }

    #[test]
    fn test_remove_property_rerenders() {
        let node = Rc::new(Node::default());
        let mut styler = InlineStyler::new(node.clone());
        styler.set_property("a", "1");
        styler.set_property("b", "2");

        assert_eq!(styler.remove_property("a"), Some("1".to_string()));
        assert_eq!(*node.style.borrow(), "b: 2;");

        assert_eq!(styler.remove_property("missing"), None);
        assert_eq!(*node.updates.borrow(), 4);
    }

    #[test]
    fn test_empty_style() {
        let node = Rc::new(Node::default());
        let mut styler = InlineStyler::new(node.clone());
        styler.set_property("a", "1");
        styler.remove_property("a");
        assert_eq!(*node.style.borrow(), "");
    }
}
