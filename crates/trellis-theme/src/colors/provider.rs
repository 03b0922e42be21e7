//! Colors providers: fixed palettes of named default colors.

use super::theme_color::ThemeColor;

/// Palette titles shared by the built-in providers and color sources.
///
/// Stylesheet templates reference these as `{{backgroundColor}}` and so on.
pub mod names {
    pub const BACKGROUND: &str = "backgroundColor";
    pub const BACKGROUND_DARK_ACCENT: &str = "backgroundDarkAccentColor";
    pub const BACKGROUND_BRIGHT_ACCENT: &str = "backgroundLightAccentColor";
    pub const TEXT: &str = "textColor";
    pub const COLORIZATION: &str = "colorizationColor";
    pub const INFO: &str = "infoColor";
    pub const SUCCESS: &str = "successColor";
    pub const DANGER: &str = "dangerColor";
    pub const WARNING: &str = "warningColor";
}

/// A fixed palette of named colors.
///
/// Every provider supplies the nine base colors below. Applications that need
/// more colors implement their own provider and extend
/// [`theme_colors`](ThemeColorsProvider::theme_colors):
///
/// ```rust
/// use trellis_theme::{base_theme_colors, DefaultThemeColorsProvider, ThemeColor, ThemeColorsProvider};
///
/// struct BrandColors(DefaultThemeColorsProvider);
///
/// impl BrandColors {
///     fn brand_color(&self) -> ThemeColor {
///         ThemeColor::hex("brandColor", "#ff6b35")
///     }
/// }
///
/// impl ThemeColorsProvider for BrandColors {
///     fn background_color(&self) -> ThemeColor { self.0.background_color() }
///     fn background_dark_accent_color(&self) -> ThemeColor { self.0.background_dark_accent_color() }
///     fn background_bright_accent_color(&self) -> ThemeColor { self.0.background_bright_accent_color() }
///     fn text_color(&self) -> ThemeColor { self.0.text_color() }
///     fn colorization_color(&self) -> ThemeColor { self.0.colorization_color() }
///     fn info_color(&self) -> ThemeColor { self.0.info_color() }
///     fn success_color(&self) -> ThemeColor { self.0.success_color() }
///     fn danger_color(&self) -> ThemeColor { self.0.danger_color() }
///     fn warning_color(&self) -> ThemeColor { self.0.warning_color() }
///     fn contains_dark_default_colors(&self) -> bool { false }
///
///     fn theme_colors(&self) -> Vec<ThemeColor> {
///         let mut colors = base_theme_colors(self);
///         colors.push(self.brand_color());
///         colors
///     }
/// }
///
/// assert_eq!(BrandColors(DefaultThemeColorsProvider).theme_colors().len(), 10);
/// ```
pub trait ThemeColorsProvider {
    /// The default background color.
    fn background_color(&self) -> ThemeColor;

    /// An accent slightly darker than the background.
    fn background_dark_accent_color(&self) -> ThemeColor;

    /// An accent slightly brighter than the background.
    fn background_bright_accent_color(&self) -> ThemeColor;

    /// The default text color.
    fn text_color(&self) -> ThemeColor;

    /// The color used to colorize arbitrary elements such as icons.
    fn colorization_color(&self) -> ThemeColor;

    fn info_color(&self) -> ThemeColor;

    fn success_color(&self) -> ThemeColor;

    fn danger_color(&self) -> ThemeColor;

    fn warning_color(&self) -> ThemeColor;

    /// Returns true if the defaults of this provider belong to a dark theme.
    fn contains_dark_default_colors(&self) -> bool;

    /// Returns every color of the palette, in a fixed order.
    fn theme_colors(&self) -> Vec<ThemeColor> {
        base_theme_colors(self)
    }
}

/// Returns the nine base colors of a provider in palette order.
pub fn base_theme_colors<P: ThemeColorsProvider + ?Sized>(provider: &P) -> Vec<ThemeColor> {
    vec![
        provider.background_color(),
        provider.background_dark_accent_color(),
        provider.background_bright_accent_color(),
        provider.text_color(),
        provider.colorization_color(),
        provider.info_color(),
        provider.success_color(),
        provider.danger_color(),
        provider.warning_color(),
    ]
}

/// The built-in bright palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultThemeColorsProvider;

impl ThemeColorsProvider for DefaultThemeColorsProvider {
    fn background_color(&self) -> ThemeColor {
        ThemeColor::hex(names::BACKGROUND, "#f3f3f3")
    }

    fn background_dark_accent_color(&self) -> ThemeColor {
        ThemeColor::hex(names::BACKGROUND_DARK_ACCENT, "#e0e0e0")
    }

    fn background_bright_accent_color(&self) -> ThemeColor {
        ThemeColor::hex(names::BACKGROUND_BRIGHT_ACCENT, "#ffffff")
    }

    fn text_color(&self) -> ThemeColor {
        ThemeColor::hex(names::TEXT, "#111111")
    }

    fn colorization_color(&self) -> ThemeColor {
        ThemeColor::hex(names::COLORIZATION, "#3ca7ff")
    }

    fn info_color(&self) -> ThemeColor {
        ThemeColor::hex(names::INFO, "#17a2b8")
    }

    fn success_color(&self) -> ThemeColor {
        ThemeColor::hex(names::SUCCESS, "#28a745")
    }

    fn danger_color(&self) -> ThemeColor {
        ThemeColor::hex(names::DANGER, "#dc3545")
    }

    fn warning_color(&self) -> ThemeColor {
        ThemeColor::hex(names::WARNING, "#ffc107")
    }

    fn contains_dark_default_colors(&self) -> bool {
        false
    }
}

/// The built-in dark palette.
///
/// Uses the same titles as [`DefaultThemeColorsProvider`], so stylesheets and
/// color sources work unchanged with either provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultDarkThemeColorsProvider;

impl ThemeColorsProvider for DefaultDarkThemeColorsProvider {
    fn background_color(&self) -> ThemeColor {
        ThemeColor::hex(names::BACKGROUND, "#1f1f1f")
    }

    fn background_dark_accent_color(&self) -> ThemeColor {
        ThemeColor::hex(names::BACKGROUND_DARK_ACCENT, "#181818")
    }

    fn background_bright_accent_color(&self) -> ThemeColor {
        ThemeColor::hex(names::BACKGROUND_BRIGHT_ACCENT, "#2c2c2c")
    }

    fn text_color(&self) -> ThemeColor {
        ThemeColor::hex(names::TEXT, "#ffffff")
    }

    fn colorization_color(&self) -> ThemeColor {
        ThemeColor::hex(names::COLORIZATION, "#3ca7ff")
    }

    fn info_color(&self) -> ThemeColor {
        ThemeColor::hex(names::INFO, "#17a2b8")
    }

    fn success_color(&self) -> ThemeColor {
        ThemeColor::hex(names::SUCCESS, "#28a745")
    }

    fn danger_color(&self) -> ThemeColor {
        ThemeColor::hex(names::DANGER, "#dc3545")
    }

    fn warning_color(&self) -> ThemeColor {
        ThemeColor::hex(names::WARNING, "#ffc107")
    }

    fn contains_dark_default_colors(&self) -> bool {
        true
    }
}
