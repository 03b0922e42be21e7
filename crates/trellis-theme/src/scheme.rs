//! Operating-system color scheme detection.
//!
//! Applications typically pick the initial color source from the OS
//! preference:
//!
//! ```rust,no_run
//! use trellis_theme::{detect_color_scheme, DefaultThemeColorsProvider, ThemeColorSource, ThemeManager};
//!
//! let mut manager = ThemeManager::new(DefaultThemeColorsProvider);
//! if let Some(source) = ThemeColorSource::for_scheme(detect_color_scheme()) {
//!     manager.set_color_source(source);
//! }
//! ```
//!
//! The detector can be overridden with [`set_color_scheme_detector`], which
//! is how tests force a scheme.

use std::sync::{Mutex, PoisonError};

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;

/// The user's preferred color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }
}

type SchemeDetector = fn() -> ColorScheme;

static SCHEME_DETECTOR: Lazy<Mutex<SchemeDetector>> = Lazy::new(|| Mutex::new(os_scheme_detector));

/// Overrides the function used by [`detect_color_scheme`].
pub fn set_color_scheme_detector(detector: SchemeDetector) {
    let mut guard = SCHEME_DETECTOR.lock().unwrap_or_else(PoisonError::into_inner);
    *guard = detector;
}

/// Restores OS detection after [`set_color_scheme_detector`].
pub fn reset_color_scheme_detector() {
    set_color_scheme_detector(os_scheme_detector);
}

/// Detects the preferred color scheme.
///
/// Falls back to [`ColorScheme::Light`] when the OS reports no preference or
/// cannot be queried.
pub fn detect_color_scheme() -> ColorScheme {
    let detector = *SCHEME_DETECTOR.lock().unwrap_or_else(PoisonError::into_inner);
    detector()
}

fn os_scheme_detector() -> ColorScheme {
    match detect_os_theme() {
        Ok(OsThemeMode::Dark) => ColorScheme::Dark,
        Ok(OsThemeMode::Light) | Ok(OsThemeMode::Unspecified) => ColorScheme::Light,
        Err(err) => {
            log::debug!("Color scheme detection failed, assuming light: {:?}", err);
            ColorScheme::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::ThemeColorSource;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_detector_override_dark() {
        set_color_scheme_detector(|| ColorScheme::Dark);
        assert_eq!(detect_color_scheme(), ColorScheme::Dark);
        reset_color_scheme_detector();
    }

    #[test]
    #[serial]
    fn test_detector_override_light() {
        set_color_scheme_detector(|| ColorScheme::Light);
        assert_eq!(detect_color_scheme(), ColorScheme::Light);
        reset_color_scheme_detector();
    }

    #[test]
    #[serial]
    fn test_source_for_detected_scheme() {
        set_color_scheme_detector(|| ColorScheme::Dark);
        let source = ThemeColorSource::for_scheme(detect_color_scheme());
        assert!(source.map(|s| s.is_dark()).unwrap_or(false));

        set_color_scheme_detector(|| ColorScheme::Light);
        assert!(ThemeColorSource::for_scheme(detect_color_scheme()).is_none());
        reset_color_scheme_detector();
    }

    #[test]
    fn test_default_is_light() {
        assert_eq!(ColorScheme::default(), ColorScheme::Light);
        assert!(!ColorScheme::Light.is_dark());
        assert!(ColorScheme::Dark.is_dark());
    }
}
