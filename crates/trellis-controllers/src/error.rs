//! Error types for controller management.
//!
//! Three layers, each a `thiserror` enum:
//!
//! - [`LifecycleError`]: misuse of a single controller's lifecycle signals
//! - [`DependencyError`]: invalid or failing dependency providers
//! - [`ControllerError`]: everything the manager reports, wrapping the other two
//!
//! All of them are configuration faults. They are raised synchronously where
//! the violation happens and carry the offending type, field or provider name.

use thiserror::Error;

/// Boxed cause attached to construction, view-load and provider failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Misuse of a controller's lifecycle signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("a manager is already assigned")]
    ManagerAlreadyAssigned,

    #[error("the view did not produce a root")]
    MissingRootView,

    #[error("a root is already assigned")]
    RootAlreadyAssigned,
}

/// Failure while building the dependency map.
#[derive(Debug, Error)]
pub enum DependencyError {
    #[error("provider '{provider}' is not public")]
    NotPublic { provider: String },

    #[error("provider '{provider}' is bound to an instance; providers must be static")]
    NotStatic { provider: String },

    #[error("provider '{provider}' takes {arity} parameter(s); providers must take none")]
    HasParameters { provider: String, arity: usize },

    #[error("provider '{provider}' failed")]
    Invocation {
        provider: String,
        #[source]
        source: BoxError,
    },

    #[error("'{type_name}' is provided by both '{first}' and '{second}'")]
    DuplicateProvider {
        type_name: &'static str,
        first: String,
        second: String,
    },
}

/// Error type for controller construction, wiring and lookup.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The controller's constructor failed.
    #[error("failed to construct controller '{controller}'")]
    Construction {
        controller: &'static str,
        #[source]
        source: BoxError,
    },

    /// The toolkit could not load the controller's view.
    #[error("failed to load view '{view_path}' for controller '{controller}'")]
    ViewLoad {
        controller: &'static str,
        view_path: String,
        #[source]
        source: BoxError,
    },

    /// A lifecycle signal was rejected.
    #[error("lifecycle error in controller '{controller}'")]
    Lifecycle {
        controller: &'static str,
        #[source]
        source: LifecycleError,
    },

    /// A declared dependency has no provider.
    #[error("no provider for field '{field}' ({type_name}) of controller '{controller}'")]
    MissingDependency {
        field: &'static str,
        type_name: &'static str,
        controller: &'static str,
    },

    /// A provided value could not be assigned to its slot.
    #[error("cannot assign dependency to field '{field}' of controller '{controller}': expected {expected}")]
    DependencyAssignment {
        field: &'static str,
        expected: &'static str,
        controller: &'static str,
    },

    /// The dependency notification was already delivered to a controller
    /// that is still not ready.
    #[error("failed to resolve dependencies of controller '{controller}': already notified")]
    DependencyNotification { controller: &'static str },

    /// The controller is borrowed elsewhere, typically because it is
    /// requested from inside its own `on_ready`.
    #[error("controller '{controller}' is already in use")]
    Busy { controller: &'static str },

    #[error(transparent)]
    Dependency(#[from] DependencyError),
}

impl ControllerError {
    pub(crate) fn lifecycle(controller: &'static str, source: LifecycleError) -> Self {
        Self::Lifecycle { controller, source }
    }
}

/// Result type for controller management.
pub type ControllerResult<T> = std::result::Result<T, ControllerError>;

/// Error loading a manager configuration fragment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Load {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
