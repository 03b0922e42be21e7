//! Color placeholder substitution and data-URI encoding.
//!
//! Stylesheet templates are plain CSS with `{{colorName}}` placeholders.
//! There is no expression syntax: the text between `{{` and `}}` is looked up
//! verbatim in the palette map. Unknown names and unclosed placeholders are
//! kept as written, so a template typo is visible in the generated CSS.
//!
//! ```rust
//! use std::collections::HashMap;
//! use trellis_theme::stylesheet::{css_from_data_uri, substitute_colors, to_data_uri};
//!
//! let mut palette = HashMap::new();
//! palette.insert("bg".to_string(), "#00FF00FF".to_string());
//!
//! let css = substitute_colors("body{background:{{bg}}}", &palette);
//! assert_eq!(css, "body{background:#00FF00FF}");
//!
//! let uri = to_data_uri(&css);
//! assert!(uri.starts_with("data:text/css;base64,"));
//! assert_eq!(css_from_data_uri(&uri).as_deref(), Some(css.as_str()));
//! ```

use std::collections::HashMap;

use base64::{engine::general_purpose, Engine as _};

/// Prefix of every generated stylesheet URI.
pub const DATA_URI_PREFIX: &str = "data:text/css;base64,";

/// Replaces every `{{name}}` whose name is in `palette` with its value.
///
/// A `{{` that does not start a known placeholder is copied one brace at a
/// time, so stray braces (`{{{bg}}}`, a `{{` in a comment) never hide the
/// placeholders that follow.
pub fn substitute_colors(template: &str, palette: &HashMap<String, String>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        result.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        let Some(close) = after_open.find("}}") else {
            // Unclosed placeholder: keep the remainder as is.
            result.push_str(&rest[open..]);
            return result;
        };

        match palette.get(&after_open[..close]) {
            Some(value) => {
                result.push_str(value);
                rest = &after_open[close + 2..];
            }
            None => {
                result.push('{');
                rest = &rest[open + 1..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// Encodes CSS text as a self-contained `data:text/css;base64,` URI.
pub fn to_data_uri(css: &str) -> String {
    let mut uri = String::from(DATA_URI_PREFIX);
    general_purpose::STANDARD.encode_string(css.as_bytes(), &mut uri);
    uri
}

/// Decodes a URI produced by [`to_data_uri`] back to its CSS text.
///
/// Returns `None` for URIs with another prefix or invalid payloads.
pub fn css_from_data_uri(uri: &str) -> Option<String> {
    let payload = uri.strip_prefix(DATA_URI_PREFIX)?;
    let bytes = general_purpose::STANDARD.decode(payload).ok()?;
    String::from_utf8(bytes).ok()
}
