//! Theming prelude for convenient imports.
//!
//! ```rust
//! use trellis_theme::prelude::*;
//!
//! let manager = ThemeManager::new(DefaultThemeColorsProvider);
//! assert_eq!(manager.hex_color(|p| p.text_color()), "#111111FF");
//! ```

pub use crate::{
    Change, Colorizable, DefaultDarkThemeColorsProvider, DefaultThemeColorsProvider, Fillable,
    InlineStyleTarget, Rgba, StyledRoot, ThemeColor, ThemeColorSource, ThemeColorsProvider,
    ThemeError, ThemeManager,
};
