//! Node capabilities the theme engine drives.
//!
//! The scene graph belongs to the GUI toolkit. The theme engine only needs a
//! handful of operations on it, expressed as traits that toolkit bindings
//! implement on their node handles. Node handles are shared (`Rc`) and mutate
//! through `&self`, the way toolkit handles use interior mutability.
//!
//! Nodes are identified by pointer: registering the same `Rc` twice is a
//! duplicate, two distinct nodes with equal contents are not.

use std::rc::Rc;

use crate::color::Rgba;

/// A view root that can carry stylesheets.
pub trait StyledRoot {
    /// Appends a stylesheet (a `data:` URI) to the root.
    fn attach_stylesheet(&self, uri: &str);

    /// Removes a previously attached stylesheet.
    fn detach_stylesheet(&self, uri: &str);
}

/// A node (typically an icon) recolored through a visual effect.
pub trait Colorizable {
    /// Sets or clears the node's effect.
    fn set_effect(&self, effect: Option<ColorizeEffect>);
}

/// A shape recolored through its fill.
pub trait Fillable {
    fn set_fill(&self, color: Rgba);
}

/// A node that accepts an inline style string.
pub trait InlineStyleTarget {
    fn set_style(&self, style: &str);
}

/// Lighting effect that tints an image with a single color.
///
/// The image is first desaturated and brightened to white
/// (hue 0, saturation 1, brightness 1, contrast 1), then lit by a distant
/// light of the target color on a flat surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorizeEffect {
    pub color: Rgba,
    pub light_azimuth: f64,
    pub light_elevation: f64,
    pub surface_scale: f64,
    pub hue: f64,
    pub saturation: f64,
    pub brightness: f64,
    pub contrast: f64,
}

impl ColorizeEffect {
    pub fn new(color: Rgba) -> Self {
        Self {
            color,
            light_azimuth: 45.0,
            light_elevation: 90.0,
            surface_scale: 0.0,
            hue: 0.0,
            saturation: 1.0,
            brightness: 1.0,
            contrast: 1.0,
        }
    }
}

/// Returns true if both handles point at the same node.
///
/// Compares data addresses only, so handles obtained through different
/// trait-object vtables still match.
pub(crate) fn same_node<T: ?Sized>(a: &Rc<T>, b: &Rc<T>) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}
