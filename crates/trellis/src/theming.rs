//! Sharing a theme manager with controllers.
//!
//! The theme manager is an ordinary dependency: it is registered once through
//! [`theme_provider`] and controllers declare a [`SharedTheme`] slot. Views
//! then add their roots, icons and shapes from `on_ready`.
//!
//! ```rust,ignore
//! let manifest = Manifest::new()
//!     .provider(theme_provider(ThemeManager::new(DefaultThemeColorsProvider)))
//!     .controller::<MainController>();
//!
//! // in MainController
//! fn declare_dependencies<'a>(&'a mut self, slots: &mut DependencySlots<'a>) {
//!     slots.slot("theme", &mut self.theme);
//! }
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use trellis_controllers::Provider;
use trellis_theme::{
    detect_color_scheme, ColorScheme, ThemeColorSource, ThemeColorsProvider, ThemeManager,
};

/// A theme manager shared between controllers.
pub type SharedTheme<P> = Rc<RefCell<ThemeManager<P>>>;

/// Registers an existing theme manager as the `RefCell<ThemeManager<P>>`
/// dependency.
///
/// Providers run once, when the controller manager is built. The provider is
/// named after this function; when the manager is limited to a scan scope,
/// rename it with [`Provider::named`] so the scope keeps it.
pub fn theme_provider<P>(theme: ThemeManager<P>) -> Provider
where
    P: ThemeColorsProvider + 'static,
{
    let pending = RefCell::new(Some(theme));
    Provider::optional(move || {
        let theme = pending.borrow_mut().take();
        if theme.is_none() {
            log::warn!("Theme provider invoked more than once");
        }
        theme.map(RefCell::new)
    })
}

/// Applies the operating system's color scheme to `theme`.
///
/// A dark preference installs the default dark color source; a light one
/// removes any color source so the provider's own colors apply.
pub fn follow_system_scheme<P: ThemeColorsProvider>(theme: &mut ThemeManager<P>) -> ColorScheme {
    let scheme = detect_color_scheme();
    match ThemeColorSource::for_scheme(scheme) {
        Some(source) => {
            theme.set_color_source(source);
        }
        None => {
            theme.remove_color_source();
        }
    }
    log::debug!("Following system color scheme: {:?}", scheme);
    scheme
}
