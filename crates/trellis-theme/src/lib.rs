//! # Trellis Theme - Live Theming for Desktop GUIs
//!
//! `trellis-theme` turns a palette of named colors into live recoloring of a
//! GUI: generated stylesheets on view roots, tinted icons and filled shapes,
//! all updated together whenever the palette changes.
//!
//! The scene graph stays with the toolkit. Node handles implement the small
//! capability traits in [`node`] and the theme engine drives them.
//!
//! ## Core Concepts
//!
//! - [`Rgba`]: color value with the canonical `#RRGGBBAA` hex form
//! - [`ThemeColor`]: a named palette entry with its default color
//! - [`ThemeColorsProvider`]: a fixed palette of defaults (light or dark)
//! - [`ThemeColorSource`]: an override palette layered on a provider
//! - [`ThemeManager`]: the live recoloring engine
//! - [`StylesheetBinder`]: keeps roots in sync with one generated stylesheet
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use trellis_theme::{
//!     css_from_data_uri, DefaultThemeColorsProvider, StyledRoot, ThemeColorSource, ThemeManager,
//! };
//!
//! #[derive(Default)]
//! struct Window {
//!     stylesheets: RefCell<Vec<String>>,
//! }
//!
//! impl StyledRoot for Window {
//!     fn attach_stylesheet(&self, uri: &str) {
//!         self.stylesheets.borrow_mut().push(uri.to_string());
//!     }
//!
//!     fn detach_stylesheet(&self, uri: &str) {
//!         self.stylesheets.borrow_mut().retain(|s| s != uri);
//!     }
//! }
//!
//! let window = Rc::new(Window::default());
//! let mut theme = ThemeManager::with_stylesheet(
//!     ".root { -fx-background-color: {{backgroundColor}}; }",
//!     DefaultThemeColorsProvider,
//! );
//! theme.add_root(window.clone());
//!
//! theme.set_color_source(ThemeColorSource::default_dark());
//!
//! let sheets = window.stylesheets.borrow();
//! assert_eq!(sheets.len(), 1);
//! assert_eq!(
//!     css_from_data_uri(&sheets[0]).unwrap(),
//!     ".root { -fx-background-color: #1F1F1FFF; }"
//! );
//! ```
//!
//! ## Color Sources
//!
//! Override palettes can come from code, properties files or YAML. See
//! [`ThemeColorSource`] for the accepted formats.

mod color;
pub mod colors;
mod error;
pub mod listeners;
mod manager;
pub mod node;
pub mod prelude;
mod scheme;
mod styler;
pub mod stylesheet;

// Error type
pub use error::{ThemeError, ThemeResult};

// Colors
pub use color::Rgba;
pub use colors::{
    base_theme_colors, names, DefaultDarkThemeColorsProvider, DefaultThemeColorsProvider,
    ThemeColor, ThemeColorSource, ThemeColorsProvider,
};

// Nodes and listeners
pub use listeners::{Change, ListenerId, Listeners};
pub use node::{Colorizable, ColorizeEffect, Fillable, InlineStyleTarget, StyledRoot};

// Theme manager
pub use manager::{
    IconChangeListener, RootChangeListener, ShapeChangeListener, ThemeChangeListener, ThemeManager,
};

// Stylesheets and inline styles
pub use styler::InlineStyler;
pub use stylesheet::{css_from_data_uri, substitute_colors, to_data_uri, StylesheetBinder};

// Color scheme detection
pub use scheme::{
    detect_color_scheme, reset_color_scheme_detector, set_color_scheme_detector, ColorScheme,
};
