//! The seam between controllers and the GUI toolkit.
//!
//! Everything toolkit-specific (markup parsing, node types, windows) sits
//! behind [`Toolkit`]. A binding for a concrete toolkit implements it once;
//! controllers name the binding through [`Controller::Toolkit`](crate::Controller::Toolkit).

use std::any::Any;

use crate::config::ResourceBundle;
use crate::error::BoxError;
use crate::lifecycle::Notification;

/// What the manager asks the toolkit to load for a controller.
#[derive(Debug, Clone, Copy)]
pub struct ViewRequest<'a> {
    /// The controller's view markup resource.
    pub view_path: &'a str,
    /// Localization bundle for the markup, if configured.
    pub resources: Option<&'a ResourceBundle>,
}

/// The object a view is bound to while it loads.
///
/// Loaders call [`view_loaded`](ViewTarget::view_loaded) once the markup is
/// parsed and bound, the way markup loaders call a controller's initialize
/// hook. [`controller`](ViewTarget::controller) exposes the controller so the
/// loader can bind named nodes into it.
pub trait ViewTarget {
    fn view_loaded(&mut self) -> Notification;

    fn controller(&mut self) -> &mut dyn Any;
}

/// A GUI toolkit binding.
pub trait Toolkit: 'static {
    /// Root node of a loaded view.
    type Root: Clone + 'static;

    /// A presentable scene wrapping a root.
    type Scene: Clone + 'static;

    /// A top-level window.
    type Stage: 'static;

    /// Parses the requested view synchronously with `target` as the binding
    /// target and returns its root.
    ///
    /// `Ok(None)` means the markup loaded but produced no root.
    fn load_view(
        &self,
        request: &ViewRequest<'_>,
        target: &mut dyn ViewTarget,
    ) -> Result<Option<Self::Root>, BoxError>;

    /// Wraps a root into a scene.
    fn create_scene(&self, root: &Self::Root) -> Self::Scene;
}
