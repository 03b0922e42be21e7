//! Everything a typical application needs.
//!
//! ```rust
//! use trellis::prelude::*;
//!
//! let theme: SharedTheme<DefaultThemeColorsProvider> =
//!     Rc::new(RefCell::new(ThemeManager::new(DefaultThemeColorsProvider)));
//! assert!(!theme.borrow().is_dark_theme_active());
//! ```

pub use std::cell::RefCell;
pub use std::rc::Rc;

pub use trellis_controllers::{
    BoxError, Controller, ControllerError, ControllerManager, ControllerRef, DependencySlots,
    ManagerConfig, Manifest, Provider, ReadyContext, Toolkit, ViewRequest, ViewTarget,
};
pub use trellis_theme::prelude::*;

pub use crate::{follow_system_scheme, theme_provider, SetupError, SharedTheme};
