//! # Trellis - Controllers and Live Theming for Desktop GUIs
//!
//! Trellis manages the controller side of a view-based desktop application
//! and keeps its look in sync with a palette of named colors. It is made of
//! two crates, re-exported here:
//!
//! - [`controllers`] (`trellis-controllers`): controller lifecycle,
//!   type-keyed dependency injection, caching of controllers and scenes
//! - [`theme`] (`trellis-theme`): color providers and sources, generated
//!   stylesheets, icon and shape recoloring, color-scheme detection
//!
//! Both are toolkit-agnostic. A GUI binding implements
//! [`Toolkit`](controllers::Toolkit) to load views and the node capability
//! traits of [`theme::node`] to receive stylesheets and colors.
//!
//! ## Putting it together
//!
//! The theme manager is shared with controllers as a regular dependency:
//!
//! ```rust,ignore
//! use trellis::prelude::*;
//!
//! fn main() -> Result<(), SetupError> {
//!     let mut theme = ThemeManager::with_stylesheet(TEMPLATE, DefaultThemeColorsProvider);
//!     follow_system_scheme(&mut theme);
//!
//!     let manifest = Manifest::new()
//!         .provider(theme_provider(theme))
//!         .controller::<MainController>();
//!
//!     let config = ManagerConfig::from_file(stage, "app.yaml")?;
//!     let manager = ControllerManager::new(toolkit, config, manifest)?;
//!     let scene = manager.get_cached_scene::<MainController>()?;
//!     Ok(())
//! }
//! ```
//!
//! Controllers declare a `SharedTheme<P>` slot and register their roots in
//! `on_ready`; from then on every palette change restyles them.

mod setup;
mod theming;

pub mod prelude;

pub use trellis_controllers as controllers;
pub use trellis_theme as theme;

pub use setup::SetupError;
pub use theming::{follow_system_scheme, theme_provider, SharedTheme};
