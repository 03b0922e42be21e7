use std::fmt;

use crate::color::Rgba;

/// A named palette entry with its default color.
///
/// The title is the key used everywhere else: color sources override colors
/// by title, and stylesheet templates reference them as `{{title}}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemeColor {
    title: String,
    default_color: Rgba,
}

impl ThemeColor {
    pub fn new(title: impl Into<String>, default_color: Rgba) -> Self {
        Self {
            title: title.into(),
            default_color,
        }
    }

    /// Creates a theme color from a hex default.
    ///
    /// Intended for palettes written in code; an invalid literal falls back
    /// to opaque black and is logged.
    pub fn hex(title: impl Into<String>, default_hex: &str) -> Self {
        let title = title.into();
        let default_color = Rgba::parse(default_hex).unwrap_or_else(|err| {
            log::warn!("Theme color \"{}\" has an invalid default: {}", title, err);
            Rgba::BLACK
        });
        Self {
            title,
            default_color,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn default_color(&self) -> Rgba {
        self.default_color
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_uses_title_and_default() {
        let a = ThemeColor::hex("textColor", "#111111");
        let b = ThemeColor::new("textColor", Rgba::from_rgba8(0x11, 0x11, 0x11, 0xff));
        let c = ThemeColor::hex("textColor", "#222222");
        let d = ThemeColor::hex("infoColor", "#111111");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_hex_invalid_default_falls_back_to_black() {
        let color = ThemeColor::hex("broken", "#nothex");
        assert_eq!(color.default_color(), Rgba::BLACK);
    }

    #[test]
    fn test_display() {
        let color = ThemeColor::hex("dangerColor", "#dc3545");
        assert_eq!(color.to_string(), "dangerColor (#DC3545FF)");
    }
}
