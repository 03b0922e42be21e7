//! Observer registries.
//!
//! Listeners are stored in registration order and invoked in that order.
//! Registering returns a [`ListenerId`]; the same closure registered twice is
//! two listeners.

use std::fmt;
use std::rc::Rc;

/// Handle returned when registering a listener, used to unregister it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Whether a node was added to or removed from a theme manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change {
    Added,
    Removed,
}

impl Change {
    pub fn is_added(self) -> bool {
        self == Change::Added
    }
}

/// An ordered registry of callbacks of type `F` (usually `dyn Fn(..)`).
pub struct Listeners<F: ?Sized> {
    next_id: u64,
    entries: Vec<(ListenerId, Rc<F>)>,
}

impl<F: ?Sized> Listeners<F> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Adds a listener and returns its handle.
    pub fn register(&mut self, listener: Rc<F>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Removes a listener. Returns false if the handle is unknown.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn get(&self, id: ListenerId) -> Option<&Rc<F>> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, listener)| listener)
    }

    /// Snapshot of the listeners in registration order.
    ///
    /// Callers iterate the snapshot so a listener may be dropped from the
    /// registry while notifications are running.
    pub fn snapshot(&self) -> Vec<Rc<F>> {
        self.entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F: ?Sized> Default for Listeners<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for Listeners<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
