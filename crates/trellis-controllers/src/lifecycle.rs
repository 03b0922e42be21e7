//! Per-controller readiness state machine.
//!
//! A controller becomes ready once three signals have arrived, in any order:
//!
//! - its view markup finished loading ([`Lifecycle::notify_view_loaded`])
//! - its dependencies were injected ([`Lifecycle::notify_dependencies_resolved`])
//! - its view root was bound ([`Lifecycle::set_root`])
//!
//! The signals come from different places (the markup loader, the manager's
//! injection pass, hand-written construction code), so readiness is
//! re-evaluated after every one of them. The transition to
//! [`LifecycleState::Ready`] happens exactly once and is terminal.
//!
//! ```text
//! Created ──first signal──▶ AwaitingReadiness ──all three──▶ Ready
//! ```
//!
//! [`Lifecycle`] only tracks state. [`Managed`](crate::Managed) wraps it with
//! the controller and runs `on_ready` when the transition happens.

use std::fmt;

use crate::error::LifecycleError;
use crate::manager::ManagerRef;
use crate::toolkit::Toolkit;

/// Lifecycle states of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// No signal has arrived yet.
    Created,
    /// At least one signal arrived, readiness not reached.
    AwaitingReadiness,
    /// Ready. Terminal.
    Ready,
}

/// Outcome of an idempotent notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    /// First delivery: the flag was set and readiness re-evaluated.
    Accepted,
    /// The notification was already delivered; nothing changed.
    AlreadyNotified,
}

impl Notification {
    pub fn is_accepted(self) -> bool {
        self == Notification::Accepted
    }
}

/// Readiness tracking for one controller.
pub struct Lifecycle<T: Toolkit> {
    ready: bool,
    pending_ready: bool,
    signaled: bool,
    view_loaded: bool,
    dependencies_resolved: bool,
    manager: Option<ManagerRef<T>>,
    root: Option<T::Root>,
}

impl<T: Toolkit> Lifecycle<T> {
    pub fn new() -> Self {
        Self {
            ready: false,
            pending_ready: false,
            signaled: false,
            view_loaded: false,
            dependencies_resolved: false,
            manager: None,
            root: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        if self.ready {
            LifecycleState::Ready
        } else if self.signaled {
            LifecycleState::AwaitingReadiness
        } else {
            LifecycleState::Created
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_view_loaded(&self) -> bool {
        self.view_loaded
    }

    pub fn are_dependencies_resolved(&self) -> bool {
        self.dependencies_resolved
    }

    pub fn manager(&self) -> Option<&ManagerRef<T>> {
        self.manager.as_ref()
    }

    pub fn root(&self) -> Option<&T::Root> {
        self.root.as_ref()
    }

    /// Binds the owning manager. The first assignment is kept.
    pub fn set_manager(&mut self, manager: ManagerRef<T>) -> Result<(), LifecycleError> {
        if self.manager.is_some() {
            return Err(LifecycleError::ManagerAlreadyAssigned);
        }
        self.signaled = true;
        self.manager = Some(manager);
        Ok(())
    }

    /// Binds the view root and re-evaluates readiness.
    pub fn set_root(&mut self, root: Option<T::Root>) -> Result<(), LifecycleError> {
        let root = root.ok_or(LifecycleError::MissingRootView)?;
        if self.root.is_some() {
            return Err(LifecycleError::RootAlreadyAssigned);
        }
        self.signaled = true;
        self.root = Some(root);
        self.evaluate();
        Ok(())
    }

    pub fn notify_view_loaded(&mut self) -> Notification {
        if self.view_loaded {
            return Notification::AlreadyNotified;
        }
        self.signaled = true;
        self.view_loaded = true;
        self.evaluate();
        Notification::Accepted
    }

    pub fn notify_dependencies_resolved(&mut self) -> Notification {
        if self.dependencies_resolved {
            return Notification::AlreadyNotified;
        }
        self.signaled = true;
        self.dependencies_resolved = true;
        self.evaluate();
        Notification::Accepted
    }

    /// Returns true once, right after the transition to ready.
    ///
    /// The owner of the lifecycle calls this after each signal and runs its
    /// ready hook when it returns true.
    pub fn take_ready_transition(&mut self) -> bool {
        std::mem::take(&mut self.pending_ready)
    }

    fn evaluate(&mut self) {
        if !self.ready && self.view_loaded && self.dependencies_resolved && self.root.is_some() {
            self.ready = true;
            self.pending_ready = true;
        }
    }
}

impl<T: Toolkit> Default for Lifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Toolkit> fmt::Debug for Lifecycle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("state", &self.state())
            .field("view_loaded", &self.view_loaded)
            .field("dependencies_resolved", &self.dependencies_resolved)
            .field("has_manager", &self.manager.is_some())
            .field("has_root", &self.root.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Node, TestToolkit};

    fn lifecycle() -> Lifecycle<TestToolkit> {
        Lifecycle::new()
    }

    #[test]
    fn test_starts_created() {
        let lc = lifecycle();
        assert_eq!(lc.state(), LifecycleState::Created);
        assert!(!lc.is_ready());
    }

    #[test]
    fn test_first_signal_moves_to_awaiting() {
        let mut lc = lifecycle();
        lc.notify_view_loaded();
        assert_eq!(lc.state(), LifecycleState::AwaitingReadiness);
    }

    #[test]
    fn test_ready_after_all_three_signals() {
        let mut lc = lifecycle();
        assert_eq!(lc.notify_dependencies_resolved(), Notification::Accepted);
        assert!(!lc.take_ready_transition());

        lc.set_root(Some(Node::new("root"))).unwrap();
        assert!(!lc.take_ready_transition());

        assert_eq!(lc.notify_view_loaded(), Notification::Accepted);
        assert_eq!(lc.state(), LifecycleState::Ready);
        assert!(lc.take_ready_transition());
        assert!(!lc.take_ready_transition());
    }

    #[test]
    fn test_notifications_are_idempotent() {
        let mut lc = lifecycle();
        assert!(lc.notify_view_loaded().is_accepted());
        assert_eq!(lc.notify_view_loaded(), Notification::AlreadyNotified);
        assert!(lc.notify_dependencies_resolved().is_accepted());
        assert_eq!(
            lc.notify_dependencies_resolved(),
            Notification::AlreadyNotified
        );
    }

    #[test]
    fn test_missing_root_rejected() {
        let mut lc = lifecycle();
        assert_eq!(lc.set_root(None), Err(LifecycleError::MissingRootView));
        assert!(lc.root().is_none());
        assert_eq!(lc.state(), LifecycleState::Created);
    }

    #[test]
    fn test_second_root_rejected() {
        let mut lc = lifecycle();
        lc.set_root(Some(Node::new("first"))).unwrap();
        assert_eq!(
            lc.set_root(Some(Node::new("second"))),
            Err(LifecycleError::RootAlreadyAssigned)
        );
        assert_eq!(lc.root().unwrap().name(), "first");
    }

    #[test]
    fn test_manager_alone_never_makes_ready() {
        let mut lc = lifecycle();
        lc.set_manager(ManagerRef::detached()).unwrap();
        lc.notify_view_loaded();
        lc.notify_dependencies_resolved();
        assert!(!lc.is_ready());
    }

    #[test]
    fn test_second_manager_rejected() {
        let mut lc = lifecycle();
        assert!(lc.set_manager(ManagerRef::detached()).is_ok());
        assert_eq!(
            lc.set_manager(ManagerRef::detached()),
            Err(LifecycleError::ManagerAlreadyAssigned)
        );
        assert!(lc.manager().is_some());
    }
}
