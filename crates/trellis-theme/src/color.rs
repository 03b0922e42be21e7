//! RGBA color values and hex conversion.
//!
//! [`Rgba`] stores each channel as a floating point value in `[0, 1]`, the
//! representation GUI toolkits use for paints. Conversion to the CSS form is
//! always the 8-digit `#RRGGBBAA` string: every channel is scaled to
//! `[0, 255]`, rounded to the nearest integer and written as two uppercase hex
//! digits.
//!
//! Parsing accepts the hex notations stylesheets use:
//!
//! - `#rgb` and `#rgba` (each digit doubled)
//! - `#rrggbb` and `#rrggbbaa`
//! - the same without `#`, or with a `0x` prefix
//!
//! # Example
//!
//! ```rust
//! use trellis_theme::Rgba;
//!
//! let accent: Rgba = "#3ca7ff".parse().unwrap();
//! assert_eq!(accent.to_hex_string(), "#3CA7FFFF");
//!
//! let half = Rgba::new(0.0, 1.0, 0.0, 0.5);
//! assert_eq!(half.to_hex_string(), "#00FF0080");
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ThemeError, ThemeResult};

/// A color with red, green, blue and alpha channels in `[0, 1]`.
///
/// Channels are clamped on construction, so two colors compare equal exactly
/// when all four stored channels are equal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    red: f64,
    green: f64,
    blue: f64,
    alpha: f64,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 1.0,
    };

    /// Opaque white.
    pub const WHITE: Rgba = Rgba {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
        alpha: 1.0,
    };

    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 0.0,
    };

    /// Creates a color from channel values in `[0, 1]`.
    ///
    /// Values outside the range are clamped; `NaN` becomes `0`.
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red: clamp_channel(red),
            green: clamp_channel(green),
            blue: clamp_channel(blue),
            alpha: clamp_channel(alpha),
        }
    }

    /// Creates an opaque color.
    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    /// Creates a color from 8-bit channels.
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::new(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            f64::from(alpha) / 255.0,
        )
    }

    pub fn red(&self) -> f64 {
        self.red
    }

    pub fn green(&self) -> f64 {
        self.green
    }

    pub fn blue(&self) -> f64 {
        self.blue
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns a copy with the given alpha channel.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self::new(self.red, self.green, self.blue, alpha)
    }

    /// Returns the channels as 8-bit values, in `[r, g, b, a]` order.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
            channel_to_u8(self.alpha),
        ]
    }

    /// Converts the color to its `#RRGGBBAA` representation.
    pub fn to_hex_string(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }

    /// Parses a hex color string.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::ColorParse`] when the input is not a 3, 4, 6 or
    /// 8 digit hex color.
    pub fn parse(input: &str) -> ThemeResult<Self> {
        let trimmed = input.trim();
        let hex = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ThemeError::color_parse(input, "not a hex color"));
        }

        // All characters are ASCII at this point, so byte slicing is safe.
        let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|d| d * 17);
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        let invalid = |_| ThemeError::color_parse(input, "not a hex color");

        let [r, g, b, a] = match hex.len() {
            3 | 4 => {
                let alpha = if hex.len() == 4 {
                    digit(3).map_err(invalid)?
                } else {
                    255
                };
                [
                    digit(0).map_err(invalid)?,
                    digit(1).map_err(invalid)?,
                    digit(2).map_err(invalid)?,
                    alpha,
                ]
            }
            6 | 8 => {
                let alpha = if hex.len() == 8 {
                    pair(6).map_err(invalid)?
                } else {
                    255
                };
                [
                    pair(0).map_err(invalid)?,
                    pair(2).map_err(invalid)?,
                    pair(4).map_err(invalid)?,
                    alpha,
                ]
            }
            _ => {
                return Err(ThemeError::color_parse(
                    input,
                    "expected 3, 4, 6 or 8 hex digits",
                ))
            }
        };

        Ok(Self::from_rgba8(r, g, b, a))
    }
}

fn clamp_channel(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        // `+ 0.0` folds -0.0 into 0.0 so equal colors hash equally.
        value.clamp(0.0, 1.0) + 0.0
    }
}

fn channel_to_u8(value: f64) -> u8 {
    (value * 255.0).round() as u8
}

impl PartialEq for Rgba {
    fn eq(&self, other: &Self) -> bool {
        self.red == other.red
            && self.green == other.green
            && self.blue == other.blue
            && self.alpha == other.alpha
    }
}

// Channels are clamped and never NaN, so float equality is an equivalence.
impl Eq for Rgba {}

impl Hash for Rgba {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.red.to_bits().hash(state);
        self.green.to_bits().hash(state);
        self.blue.to_bits().hash(state);
        self.alpha.to_bits().hash(state);
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl FromStr for Rgba {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = ThemeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex_string()
    }
}
