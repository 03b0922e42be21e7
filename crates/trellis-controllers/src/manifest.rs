//! Explicit registration of controllers and providers.
//!
//! A manifest lists everything a [`ControllerManager`](crate::ControllerManager)
//! manages. It is written by hand or generated at build time:
//!
//! ```rust,ignore
//! let manifest = Manifest::new()
//!     .provider(Provider::new(app::services::database))
//!     .provider(Provider::new(app::services::theme))
//!     .controller::<app::views::MainController>()
//!     .controller::<app::views::SettingsController>();
//! ```
//!
//! Every entry is scoped by its Rust path (from [`std::any::type_name`]),
//! which the manager matches against the configured scan scope.

use std::any::{type_name, TypeId};
use std::fmt;

use crate::config::ScanScope;
use crate::controller::Controller;
use crate::dependencies::Provider;
use crate::error::ControllerResult;
use crate::manager::ControllerManager;
use crate::toolkit::Toolkit;

type ScanFn<T> = fn(&ControllerManager<T>) -> ControllerResult<()>;

pub(crate) struct Registration<T: Toolkit> {
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) scan: ScanFn<T>,
}

/// The controllers and providers of an application.
pub struct Manifest<T: Toolkit> {
    providers: Vec<Provider>,
    controllers: Vec<Registration<T>>,
}

impl<T: Toolkit> Manifest<T> {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            controllers: Vec::new(),
        }
    }

    pub fn provider(mut self, provider: Provider) -> Self {
        self.providers.push(provider);
        self
    }

    /// Registers a controller type. Registering the same type twice has no
    /// further effect.
    pub fn controller<C>(mut self) -> Self
    where
        C: Controller<Toolkit = T>,
    {
        let type_id = TypeId::of::<C>();
        if !self.controllers.iter().any(|r| r.type_id == type_id) {
            self.controllers.push(Registration {
                type_id,
                type_name: type_name::<C>(),
                scan: ControllerManager::<T>::scan_controller::<C>,
            });
        }
        self
    }

    /// Appends the entries of another manifest.
    pub fn merge(mut self, other: Manifest<T>) -> Self {
        self.providers.extend(other.providers);
        for registration in other.controllers {
            if !self
                .controllers
                .iter()
                .any(|r| r.type_id == registration.type_id)
            {
                self.controllers.push(registration);
            }
        }
        self
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Names of the registered controller types, in registration order.
    pub fn controller_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.controllers.iter().map(|r| r.type_name)
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty() && self.controllers.is_empty()
    }

    /// Keeps only the entries inside `scope`.
    pub(crate) fn scoped(self, scope: &ScanScope) -> (Vec<Provider>, Vec<Registration<T>>) {
        let providers = self
            .providers
            .into_iter()
            .filter(|p| scope.contains(p.name()))
            .collect();
        let controllers = self
            .controllers
            .into_iter()
            .filter(|r| scope.contains(r.type_name))
            .collect();
        (providers, controllers)
    }
}

impl<T: Toolkit> Default for Manifest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Toolkit> fmt::Debug for Manifest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manifest")
            .field("providers", &self.providers)
            .field("controllers", &self.controller_names().collect::<Vec<_>>())
            .finish()
    }
}
