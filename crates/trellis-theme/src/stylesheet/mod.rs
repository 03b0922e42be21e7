//! Generated stylesheets: template substitution and root binding.

mod binder;
mod template;

pub use binder::StylesheetBinder;
pub use template::{css_from_data_uri, substitute_colors, to_data_uri, DATA_URI_PREFIX};
