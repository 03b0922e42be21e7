//! Palettes: named colors, providers of defaults and override sources.

mod provider;
mod source;
mod theme_color;

pub use provider::{
    base_theme_colors, names, DefaultDarkThemeColorsProvider, DefaultThemeColorsProvider,
    ThemeColorsProvider,
};
pub use source::ThemeColorSource;
pub use theme_color::ThemeColor;
