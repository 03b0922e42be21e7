//! Controllers and their managed wrapper.
//!
//! A controller pairs a view with behavior. Implementations declare their
//! view, cacheability and dependencies; the framework wraps each instance in
//! a [`Managed`] that owns its [`Lifecycle`] and runs
//! [`Controller::on_ready`] exactly once.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use trellis_controllers::{BoxError, Controller, DependencySlots, ReadyContext, Toolkit};
//! # use trellis_controllers::{ViewRequest, ViewTarget};
//! # struct Gui;
//! # impl Toolkit for Gui {
//! #     type Root = ();
//! #     type Scene = ();
//! #     type Stage = ();
//! #     fn load_view(&self, _: &ViewRequest<'_>, t: &mut dyn ViewTarget) -> Result<Option<()>, BoxError> {
//! #         t.view_loaded();
//! #         Ok(Some(()))
//! #     }
//! #     fn create_scene(&self, _: &()) {}
//! # }
//!
//! struct Settings {
//!     dark: bool,
//! }
//!
//! #[derive(Default)]
//! struct SettingsController {
//!     settings: Option<Rc<Settings>>,
//! }
//!
//! impl Controller for SettingsController {
//!     type Toolkit = Gui;
//!
//!     fn create() -> Result<Self, BoxError> {
//!         Ok(Self::default())
//!     }
//!
//!     fn view_path(&self) -> &str {
//!         "views/settings.xml"
//!     }
//!
//!     fn is_cacheable(&self) -> bool {
//!         true
//!     }
//!
//!     fn declare_dependencies<'a>(&'a mut self, slots: &mut DependencySlots<'a>) {
//!         slots.slot("settings", &mut self.settings);
//!     }
//!
//!     fn on_ready(&mut self, _ctx: &ReadyContext<'_, Gui>) {
//!         let dark = self.settings.as_ref().map(|s| s.dark).unwrap_or(false);
//!         println!("settings ready (dark: {dark})");
//!     }
//! }
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::dependencies::DependencySlots;
use crate::error::{BoxError, LifecycleError};
use crate::lifecycle::{Lifecycle, LifecycleState, Notification};
use crate::manager::{ControllerManager, ManagerRef};
use crate::toolkit::{Toolkit, ViewTarget};

/// A controller managed by a [`ControllerManager`].
pub trait Controller: Sized + 'static {
    /// The toolkit the controller's view is written for.
    type Toolkit: Toolkit;

    /// Creates a bare instance, before view loading and injection.
    fn create() -> Result<Self, BoxError>;

    /// Resource path of the controller's view markup.
    fn view_path(&self) -> &str;

    /// Whether the manager keeps the instance built at startup.
    fn is_cacheable(&self) -> bool;

    /// Declares the dependency slots the manager fills.
    ///
    /// Controllers that embed a shared base part delegate to it here so the
    /// base's slots are filled too.
    fn declare_dependencies<'a>(&'a mut self, slots: &mut DependencySlots<'a>) {
        let _ = slots;
    }

    /// Runs once, when the view is loaded, the root bound and the
    /// dependencies injected.
    fn on_ready(&mut self, ctx: &ReadyContext<'_, Self::Toolkit>);
}

/// What a controller sees when it becomes ready.
pub struct ReadyContext<'a, T: Toolkit> {
    root: &'a T::Root,
    manager: Option<&'a ManagerRef<T>>,
}

impl<'a, T: Toolkit> ReadyContext<'a, T> {
    /// The controller's view root.
    pub fn root(&self) -> &'a T::Root {
        self.root
    }

    /// The owning manager, if it is bound and still alive.
    pub fn manager(&self) -> Option<ControllerManager<T>> {
        self.manager.and_then(ManagerRef::upgrade)
    }
}

/// Shared handle to a managed controller.
pub type ControllerRef<C> = Rc<RefCell<Managed<C>>>;

/// A controller together with its lifecycle.
///
/// This is also the entry point for building a controller by hand: create it
/// with [`Managed::new`] and deliver the readiness signals yourself.
pub struct Managed<C: Controller> {
    controller: C,
    lifecycle: Lifecycle<C::Toolkit>,
}

impl<C: Controller> Managed<C> {
    pub fn new(controller: C) -> Self {
        Self {
            controller,
            lifecycle: Lifecycle::new(),
        }
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    pub fn lifecycle(&self) -> &Lifecycle<C::Toolkit> {
        &self.lifecycle
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    pub fn root(&self) -> Option<&<C::Toolkit as Toolkit>::Root> {
        self.lifecycle.root()
    }

    /// The owning manager, if it is bound and still alive.
    pub fn manager(&self) -> Option<ControllerManager<C::Toolkit>> {
        self.lifecycle.manager().and_then(ManagerRef::upgrade)
    }

    pub fn set_manager(&mut self, manager: ManagerRef<C::Toolkit>) -> Result<(), LifecycleError> {
        self.lifecycle.set_manager(manager)
    }

    pub fn set_root(
        &mut self,
        root: Option<<C::Toolkit as Toolkit>::Root>,
    ) -> Result<(), LifecycleError> {
        self.lifecycle.set_root(root)?;
        self.fire_if_ready();
        Ok(())
    }

    pub fn notify_view_loaded(&mut self) -> Notification {
        let notification = self.lifecycle.notify_view_loaded();
        self.fire_if_ready();
        notification
    }

    pub fn notify_dependencies_resolved(&mut self) -> Notification {
        let notification = self.lifecycle.notify_dependencies_resolved();
        self.fire_if_ready();
        notification
    }

    pub fn into_inner(self) -> C {
        self.controller
    }

    fn fire_if_ready(&mut self) {
        if !self.lifecycle.take_ready_transition() {
            return;
        }
        let Some(root) = self.lifecycle.root() else {
            return;
        };
        log::debug!("Controller {} is ready", std::any::type_name::<C>());
        let ctx = ReadyContext {
            root,
            manager: self.lifecycle.manager(),
        };
        self.controller.on_ready(&ctx);
    }
}

impl<C: Controller> ViewTarget for Managed<C> {
    fn view_loaded(&mut self) -> Notification {
        self.notify_view_loaded()
    }

    fn controller(&mut self) -> &mut dyn Any {
        &mut self.controller
    }
}

impl<C: Controller + fmt::Debug> fmt::Debug for Managed<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Managed")
            .field("controller", &self.controller)
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}
