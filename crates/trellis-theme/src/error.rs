//! Error types for theming.
//!
//! [`ThemeError`] covers everything that can go wrong while building colors
//! and color sources: malformed color strings, unreadable source files and
//! unsupported file formats. Recoloring itself never fails.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for theme construction and color-source loading.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// A color string could not be parsed.
    #[error("invalid color '{input}': {reason}")]
    ColorParse {
        /// The offending input.
        input: String,
        /// Why the input was rejected.
        reason: String,
    },

    /// A color source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML content could not be deserialized.
    #[error("invalid YAML color source: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A color source entry is malformed (e.g. a properties line without a separator).
    #[error("invalid color source entry at line {line}: {message}")]
    InvalidEntry { line: usize, message: String },

    /// The file extension does not map to a known color source format.
    #[error("unsupported color source format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}

impl ThemeError {
    pub(crate) fn color_parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ColorParse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for theme operations.
pub type ThemeResult<T> = std::result::Result<T, ThemeError>;
