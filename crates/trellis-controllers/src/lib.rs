//! Controller lifecycle, dependency injection and caching for desktop GUIs.
//!
//! `trellis-controllers` manages the controllers of a view-based GUI
//! application. It is toolkit-agnostic: the GUI toolkit is plugged in through
//! the [`Toolkit`] trait, which loads views and wraps roots into scenes.
//!
//! # Features
//!
//! - **Lifecycle**: each controller becomes ready once its view is loaded, its
//!   root is bound and its dependencies are injected, in any order, and
//!   [`Controller::on_ready`] runs exactly once
//! - **Dependency injection**: providers registered in a [`Manifest`] are
//!   invoked once at startup into a type-keyed [`DependencyMap`]; controllers
//!   declare typed slots that are filled from it
//! - **Caching**: cacheable controllers are built once and handed out by
//!   reference, together with a memoized scene
//! - **Scoping**: a [`ScanScope`] restricts registration to one module tree
//!
//! # Wiring
//!
//! ```rust,ignore
//! use trellis_controllers::{ControllerManager, Manifest, ManagerConfig, Provider};
//!
//! let manifest = Manifest::new()
//!     .provider(Provider::new(load_settings))
//!     .controller::<MainController>()
//!     .controller::<SettingsController>();
//!
//! let config = ManagerConfig::new(stage).with_scan_path("my_app::views");
//! let manager = ControllerManager::new(toolkit, config, manifest)?;
//!
//! let scene = manager.get_cached_scene::<MainController>()?;
//! ```
//!
//! Everything is single-threaded. Controllers are shared as
//! [`ControllerRef`] (`Rc<RefCell<Managed<C>>>`); borrowing one that is
//! already borrowed reports [`ControllerError::Busy`] instead of panicking.

mod config;
mod controller;
mod dependencies;
mod error;
mod lifecycle;
mod manager;
mod manifest;
mod toolkit;

#[cfg(test)]
mod testing;

pub use config::{ManagerConfig, ResourceBundle, ScanScope};

pub use controller::{Controller, ControllerRef, Managed, ReadyContext};

pub use dependencies::{
    DependencyEntry, DependencyMap, DependencySlots, Provider, ProviderSignature, Receiver, Slot,
    Visibility,
};

pub use error::{
    BoxError, ConfigError, ControllerError, ControllerResult, DependencyError, LifecycleError,
};

pub use lifecycle::{Lifecycle, LifecycleState, Notification};

pub use manager::{ControllerManager, ManagerRef};

pub use manifest::Manifest;

pub use toolkit::{Toolkit, ViewRequest, ViewTarget};
