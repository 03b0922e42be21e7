//! Color sources: override palettes layered on top of a colors provider.
//!
//! A [`ThemeColorSource`] maps palette titles to colors and carries a
//! dark/light flag. It can be built from any of the shapes applications keep
//! palettes in:
//!
//! | Constructor | Input |
//! |-------------|-------|
//! | [`from_provider`](ThemeColorSource::from_provider) | the defaults of a provider |
//! | [`from_name_color_map`](ThemeColorSource::from_name_color_map) | title → [`Rgba`] |
//! | [`from_theme_color_map`](ThemeColorSource::from_theme_color_map) | [`ThemeColor`] → [`Rgba`] |
//! | [`from_name_hex_map`](ThemeColorSource::from_name_hex_map) | title → hex string |
//! | [`from_properties`](ThemeColorSource::from_properties) | `title = #hex` lines |
//! | [`from_yaml`](ThemeColorSource::from_yaml) | YAML mapping of title → hex |
//! | [`from_file`](ThemeColorSource::from_file) | `.properties`, `.yaml` or `.yml` file |
//!
//! # Example
//!
//! ```rust
//! use trellis_theme::ThemeColorSource;
//!
//! let source = ThemeColorSource::from_properties(
//!     "# midnight\nbackgroundColor = #101020\ntextColor: #e0e0ff\n",
//!     true,
//! ).unwrap();
//!
//! assert!(source.is_dark());
//! assert_eq!(source.color("textColor").unwrap().to_hex_string(), "#E0E0FFFF");
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::color::Rgba;
use crate::error::{ThemeError, ThemeResult};

use super::provider::{DefaultDarkThemeColorsProvider, ThemeColorsProvider};
use super::theme_color::ThemeColor;

/// An override palette: palette title → color, tagged light or dark.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColorSource {
    colors: HashMap<String, Rgba>,
    dark: bool,
}

impl ThemeColorSource {
    /// Creates a source from the default colors of a provider.
    pub fn from_provider<P: ThemeColorsProvider + ?Sized>(provider: &P, dark: bool) -> Self {
        let colors = provider
            .theme_colors()
            .into_iter()
            .map(|color| (color.title().to_string(), color.default_color()))
            .collect();
        Self { colors, dark }
    }

    /// Creates a source from a title → color map.
    pub fn from_name_color_map(colors: HashMap<String, Rgba>, dark: bool) -> Self {
        Self { colors, dark }
    }

    /// Creates a source from a [`ThemeColor`] → color map, keyed by title.
    pub fn from_theme_color_map(colors: HashMap<ThemeColor, Rgba>, dark: bool) -> Self {
        let colors = colors
            .into_iter()
            .map(|(theme_color, color)| (theme_color.title().to_string(), color))
            .collect();
        Self { colors, dark }
    }

    /// Creates a source from a title → hex string map.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::ColorParse`] for the first value that is not a hex color.
    pub fn from_name_hex_map<K, V, I>(colors: I, dark: bool) -> ThemeResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let colors = colors
            .into_iter()
            .map(|(name, hex)| Ok((name.into(), Rgba::parse(hex.as_ref())?)))
            .collect::<ThemeResult<HashMap<_, _>>>()?;
        Ok(Self { colors, dark })
    }

    /// Creates a source from properties text.
    ///
    /// Each non-blank line is `title = value` or `title: value`. Lines starting
    /// with `#` or `!` are comments. Keys and values are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InvalidEntry`] for a line without separator or key,
    /// and [`ThemeError::ColorParse`] for a value that is not a hex color.
    pub fn from_properties(content: &str, dark: bool) -> ThemeResult<Self> {
        let mut colors = HashMap::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let separator = line.find(['=', ':']).ok_or_else(|| ThemeError::InvalidEntry {
                line: index + 1,
                message: format!("expected 'name = color', got '{}'", line),
            })?;

            let name = line[..separator].trim();
            let value = line[separator + 1..].trim();

            if name.is_empty() {
                return Err(ThemeError::InvalidEntry {
                    line: index + 1,
                    message: "missing color name".to_string(),
                });
            }

            colors.insert(name.to_string(), Rgba::parse(value)?);
        }

        Ok(Self { colors, dark })
    }

    /// Creates a source from a YAML mapping of title → hex string.
    ///
    /// ```rust
    /// use trellis_theme::ThemeColorSource;
    ///
    /// let source = ThemeColorSource::from_yaml(r##"
    /// backgroundColor: "#1f1f1f"
    /// textColor: "#ffffff"
    /// "##, true).unwrap();
    ///
    /// assert_eq!(source.len(), 2);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Yaml`] when the content is not a mapping of strings
    /// to hex colors.
    pub fn from_yaml(content: &str, dark: bool) -> ThemeResult<Self> {
        let colors: BTreeMap<String, Rgba> = serde_yaml::from_str(content)?;
        Ok(Self {
            colors: colors.into_iter().collect(),
            dark,
        })
    }

    /// Loads a source from a `.properties`, `.yaml` or `.yml` file.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Load`] if the file cannot be read,
    /// [`ThemeError::UnsupportedFormat`] for other extensions, and the parse
    /// errors of the matching format otherwise.
    pub fn from_file<P: AsRef<Path>>(path: P, dark: bool) -> ThemeResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let parse: fn(&str, bool) -> ThemeResult<Self> = match extension.as_deref() {
            Some("properties") => Self::from_properties,
            Some("yaml") | Some("yml") => Self::from_yaml,
            _ => {
                return Err(ThemeError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        parse(&content, dark)
    }

    /// The built-in dark override palette for the default providers.
    ///
    /// Each call builds a fresh value.
    pub fn default_dark() -> Self {
        Self::from_provider(&DefaultDarkThemeColorsProvider, true)
    }

    /// Picks the built-in source for a color scheme: [`default_dark`](Self::default_dark)
    /// for dark, `None` for light (the provider defaults apply).
    pub fn for_scheme(scheme: crate::scheme::ColorScheme) -> Option<Self> {
        match scheme {
            crate::scheme::ColorScheme::Dark => Some(Self::default_dark()),
            crate::scheme::ColorScheme::Light => None,
        }
    }

    /// Returns true if the colors belong to a dark theme.
    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Returns the color for a palette title, if this source defines it.
    pub fn color(&self, title: &str) -> Option<Rgba> {
        self.colors.get(title).copied()
    }

    /// Returns true if this source defines a color for the title.
    pub fn contains(&self, title: &str) -> bool {
        self.colors.contains_key(title)
    }

    /// Returns the full title → color map.
    pub fn colors(&self) -> &HashMap<String, Rgba> {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
