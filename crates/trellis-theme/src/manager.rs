//! Live theming: one palette driving stylesheets, icons and shapes.
//!
//! A [`ThemeManager`] owns a colors provider and an optional
//! [`ThemeColorSource`]. Whenever either changes (or the stylesheet template
//! does) it runs the recoloring cascade:
//!
//! 1. every registered icon gets a fresh [`ColorizeEffect`]
//! 2. every registered shape is re-filled
//! 3. the palette map is rebuilt (provider defaults overlaid by source colors)
//! 4. `{{name}}` placeholders in the template are substituted
//! 5. the resulting `data:text/css;base64,` URI replaces the previous
//!    stylesheet on every registered root
//!
//! Theme-change listeners run after the cascade, so they observe the new
//! colors everywhere.
//!
//! # Example
//!
//! ```rust
//! use trellis_theme::{css_from_data_uri, DefaultThemeColorsProvider, ThemeColorSource, ThemeManager};
//!
//! let mut manager = ThemeManager::with_stylesheet(
//!     ".root{-fx-background-color:{{backgroundColor}};}",
//!     DefaultThemeColorsProvider,
//! );
//! assert_eq!(manager.stylesheet(), ".root{-fx-background-color:#F3F3F3FF;}");
//!
//! manager.set_color_source(ThemeColorSource::default_dark());
//! assert!(manager.is_dark_theme_active());
//! assert_eq!(manager.stylesheet(), ".root{-fx-background-color:#1F1F1FFF;}");
//!
//! let uri = manager.stylesheet_uri().unwrap();
//! assert_eq!(css_from_data_uri(uri).as_deref(), Some(manager.stylesheet()));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::color::Rgba;
use crate::colors::{ThemeColor, ThemeColorSource, ThemeColorsProvider};
use crate::listeners::{Change, ListenerId, Listeners};
use crate::node::{same_node, Colorizable, ColorizeEffect, Fillable, StyledRoot};
use crate::stylesheet::{substitute_colors, to_data_uri, StylesheetBinder};

/// Called with the active provider after every cascade.
pub type ThemeChangeListener<P> = dyn Fn(&P);

/// Called when a root is added (before the stylesheet is attached) or removed
/// (after it is detached).
pub type RootChangeListener = dyn Fn(Change, &Rc<dyn StyledRoot>);

/// Called when an icon is registered for or removed from colorization.
pub type IconChangeListener = dyn Fn(Change, &Rc<dyn Colorizable>);

/// Called when a shape is registered for or removed from colorization.
pub type ShapeChangeListener = dyn Fn(Change, &Rc<dyn Fillable>);

/// Orchestrates a colors provider, an optional color source and a stylesheet
/// template into live recoloring of roots, icons and shapes.
pub struct ThemeManager<P: ThemeColorsProvider> {
    provider: P,
    source: Option<ThemeColorSource>,
    source_hex: HashMap<String, String>,
    template: String,
    stylesheet: String,
    binder: StylesheetBinder,
    icons: Vec<(Rc<dyn Colorizable>, ThemeColor)>,
    shapes: Vec<(Rc<dyn Fillable>, ThemeColor)>,
    theme_listeners: Listeners<ThemeChangeListener<P>>,
    root_listeners: Listeners<RootChangeListener>,
    icon_listeners: Listeners<IconChangeListener>,
    shape_listeners: Listeners<ShapeChangeListener>,
}

impl<P: ThemeColorsProvider> ThemeManager<P> {
    /// Creates a manager with an empty stylesheet template.
    pub fn new(provider: P) -> Self {
        Self::with_stylesheet("", provider)
    }

    /// Creates a manager with a stylesheet template.
    pub fn with_stylesheet(template: impl Into<String>, provider: P) -> Self {
        let mut manager = Self {
            provider,
            source: None,
            source_hex: HashMap::new(),
            template: template.into(),
            stylesheet: String::new(),
            binder: StylesheetBinder::new(),
            icons: Vec::new(),
            shapes: Vec::new(),
            theme_listeners: Listeners::new(),
            root_listeners: Listeners::new(),
            icon_listeners: Listeners::new(),
            shape_listeners: Listeners::new(),
        };
        manager.refresh();
        manager
    }

    // ---- palette ----

    /// Replaces the colors provider and recolors everything.
    ///
    /// Returns the previous provider.
    pub fn set_colors_provider(&mut self, provider: P) -> P {
        let previous = std::mem::replace(&mut self.provider, provider);
        if let Some(source) = &self.source {
            warn_missing_source_colors(&self.provider, source);
        }
        self.refresh();
        previous
    }

    /// Sets the color source layered over the provider defaults and recolors
    /// everything.
    ///
    /// Returns the previous source, if any.
    pub fn set_color_source(&mut self, source: ThemeColorSource) -> Option<ThemeColorSource> {
        warn_missing_source_colors(&self.provider, &source);
        self.source_hex = source
            .colors()
            .iter()
            .map(|(name, color)| (name.clone(), color.to_hex_string()))
            .collect();
        let previous = self.source.replace(source);
        self.refresh();
        previous
    }

    /// Removes the color source, reverting to the provider defaults.
    ///
    /// Does nothing and returns `None` if no source is set.
    pub fn remove_color_source(&mut self) -> Option<ThemeColorSource> {
        let removed = self.source.take()?;
        self.source_hex.clear();
        self.refresh();
        Some(removed)
    }

    pub fn colors_provider(&self) -> &P {
        &self.provider
    }

    pub fn color_source(&self) -> Option<&ThemeColorSource> {
        self.source.as_ref()
    }

    /// Returns true if the active colors belong to a dark theme.
    ///
    /// The source's flag wins over the provider's.
    pub fn is_dark_theme_active(&self) -> bool {
        match &self.source {
            Some(source) => source.is_dark(),
            None => self.provider.contains_dark_default_colors(),
        }
    }

    /// Resolves a provider color: the source's color for its title if
    /// defined, otherwise its default.
    ///
    /// ```rust
    /// # use trellis_theme::{DefaultThemeColorsProvider, ThemeColorsProvider, ThemeManager};
    /// let manager = ThemeManager::new(DefaultThemeColorsProvider);
    /// let hex = manager.hex_color(|p| p.danger_color());
    /// assert_eq!(hex, "#DC3545FF");
    /// ```
    pub fn color<F>(&self, select: F) -> Rgba
    where
        F: FnOnce(&P) -> ThemeColor,
    {
        self.color_of(&select(&self.provider))
    }

    /// Like [`color`](Self::color), as a `#RRGGBBAA` string.
    pub fn hex_color<F>(&self, select: F) -> String
    where
        F: FnOnce(&P) -> ThemeColor,
    {
        self.hex_color_of(&select(&self.provider))
    }

    /// Resolves an arbitrary theme color against the active source.
    pub fn color_of(&self, theme_color: &ThemeColor) -> Rgba {
        self.source
            .as_ref()
            .and_then(|source| source.color(theme_color.title()))
            .unwrap_or_else(|| theme_color.default_color())
    }

    pub fn hex_color_of(&self, theme_color: &ThemeColor) -> String {
        match self.source_hex.get(theme_color.title()) {
            Some(hex) => hex.clone(),
            None => theme_color.default_color().to_hex_string(),
        }
    }

    /// The full palette map: provider defaults overlaid by the source's colors.
    pub fn palette(&self) -> HashMap<String, String> {
        let mut palette: HashMap<String, String> = self
            .provider
            .theme_colors()
            .into_iter()
            .map(|color| {
                let hex = color.default_color().to_hex_string();
                (color.title().to_string(), hex)
            })
            .collect();
        palette.extend(self.source_hex.iter().map(|(k, v)| (k.clone(), v.clone())));
        palette
    }

    // ---- stylesheet ----

    /// Replaces the stylesheet template and regenerates the stylesheet.
    pub fn set_stylesheet_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
        self.refresh();
    }

    pub fn stylesheet_template(&self) -> &str {
        &self.template
    }

    /// The last generated stylesheet, as CSS text.
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// The last generated stylesheet, as the data URI pushed to roots.
    pub fn stylesheet_uri(&self) -> Option<&str> {
        self.binder.current()
    }

    // ---- listeners ----

    /// Registers a theme-change listener and invokes it once with the
    /// current provider.
    pub fn add_theme_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&P) + 'static,
    {
        listener(&self.provider);
        self.theme_listeners.register(Rc::new(listener))
    }

    pub fn remove_theme_listener(&mut self, id: ListenerId) -> bool {
        self.theme_listeners.unregister(id)
    }

    pub fn add_root_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(Change, &Rc<dyn StyledRoot>) + 'static,
    {
        self.root_listeners.register(Rc::new(listener))
    }

    pub fn remove_root_listener(&mut self, id: ListenerId) -> bool {
        self.root_listeners.unregister(id)
    }

    pub fn add_icon_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(Change, &Rc<dyn Colorizable>) + 'static,
    {
        self.icon_listeners.register(Rc::new(listener))
    }

    pub fn remove_icon_listener(&mut self, id: ListenerId) -> bool {
        self.icon_listeners.unregister(id)
    }

    pub fn add_shape_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(Change, &Rc<dyn Fillable>) + 'static,
    {
        self.shape_listeners.register(Rc::new(listener))
    }

    pub fn remove_shape_listener(&mut self, id: ListenerId) -> bool {
        self.shape_listeners.unregister(id)
    }

    // ---- roots ----

    /// Registers a root to carry the generated stylesheet.
    ///
    /// Root listeners run before the stylesheet is attached, so they can
    /// decorate the root first. Returns false (and notifies nobody) if the
    /// root is already registered.
    pub fn add_root(&mut self, root: Rc<dyn StyledRoot>) -> bool {
        if self.binder.contains(&root) {
            return false;
        }
        for listener in self.root_listeners.snapshot() {
            listener(Change::Added, &root);
        }
        self.binder.bind(root)
    }

    /// Unregisters a root, detaching the stylesheet before listeners run.
    ///
    /// Returns false if the root was not registered.
    pub fn remove_root(&mut self, root: &Rc<dyn StyledRoot>) -> bool {
        if !self.binder.unbind(root) {
            return false;
        }
        for listener in self.root_listeners.snapshot() {
            listener(Change::Removed, root);
        }
        true
    }

    pub fn contains_root(&self, root: &Rc<dyn StyledRoot>) -> bool {
        self.binder.contains(root)
    }

    // ---- icons ----

    /// Colorizes an icon with the provider's colorization color.
    pub fn add_icon(&mut self, icon: Rc<dyn Colorizable>) -> bool {
        self.add_icon_with(icon, |provider| provider.colorization_color())
    }

    /// Colorizes an icon with a chosen palette color.
    ///
    /// Registering an icon again updates its color without notifying icon
    /// listeners; the call then returns false.
    pub fn add_icon_with<F>(&mut self, icon: Rc<dyn Colorizable>, select: F) -> bool
    where
        F: FnOnce(&P) -> ThemeColor,
    {
        let theme_color = select(&self.provider);
        icon.set_effect(Some(ColorizeEffect::new(self.color_of(&theme_color))));

        if let Some(entry) = self.icons.iter_mut().find(|(i, _)| same_node(i, &icon)) {
            entry.1 = theme_color;
            return false;
        }

        self.icons.push((Rc::clone(&icon), theme_color));
        for listener in self.icon_listeners.snapshot() {
            listener(Change::Added, &icon);
        }
        true
    }

    /// Stops colorizing an icon and clears its effect.
    pub fn remove_icon(&mut self, icon: &Rc<dyn Colorizable>) -> bool {
        let Some(index) = self.icons.iter().position(|(i, _)| same_node(i, icon)) else {
            return false;
        };
        self.icons.remove(index);
        icon.set_effect(None);
        for listener in self.icon_listeners.snapshot() {
            listener(Change::Removed, icon);
        }
        true
    }

    /// The palette color assigned to an icon.
    pub fn icon_color(&self, icon: &Rc<dyn Colorizable>) -> Option<&ThemeColor> {
        self.icons
            .iter()
            .find(|(i, _)| same_node(i, icon))
            .map(|(_, color)| color)
    }

    // ---- shapes ----

    /// Fills a shape with the provider's colorization color.
    pub fn add_shape(&mut self, shape: Rc<dyn Fillable>) -> bool {
        self.add_shape_with(shape, |provider| provider.colorization_color())
    }

    /// Fills a shape with a chosen palette color.
    ///
    /// Registering a shape again updates its color without notifying shape
    /// listeners; the call then returns false.
    pub fn add_shape_with<F>(&mut self, shape: Rc<dyn Fillable>, select: F) -> bool
    where
        F: FnOnce(&P) -> ThemeColor,
    {
        let theme_color = select(&self.provider);
        shape.set_fill(self.color_of(&theme_color));

        if let Some(entry) = self.shapes.iter_mut().find(|(s, _)| same_node(s, &shape)) {
            entry.1 = theme_color;
            return false;
        }

        self.shapes.push((Rc::clone(&shape), theme_color));
        for listener in self.shape_listeners.snapshot() {
            listener(Change::Added, &shape);
        }
        true
    }

    /// Stops recoloring a shape. Its current fill is left in place.
    pub fn remove_shape(&mut self, shape: &Rc<dyn Fillable>) -> bool {
        let Some(index) = self.shapes.iter().position(|(s, _)| same_node(s, shape)) else {
            return false;
        };
        self.shapes.remove(index);
        for listener in self.shape_listeners.snapshot() {
            listener(Change::Removed, shape);
        }
        true
    }

    pub fn shape_color(&self, shape: &Rc<dyn Fillable>) -> Option<&ThemeColor> {
        self.shapes
            .iter()
            .find(|(s, _)| same_node(s, shape))
            .map(|(_, color)| color)
    }

    // ---- cascade ----

    fn refresh(&mut self) {
        log::debug!(
            "Recoloring {} icon(s), {} shape(s), {} root(s)",
            self.icons.len(),
            self.shapes.len(),
            self.binder.roots().len()
        );

        for (icon, theme_color) in &self.icons {
            icon.set_effect(Some(ColorizeEffect::new(self.color_of(theme_color))));
        }

        for (shape, theme_color) in &self.shapes {
            shape.set_fill(self.color_of(theme_color));
        }

        self.stylesheet = substitute_colors(&self.template, &self.palette());
        self.binder.update(to_data_uri(&self.stylesheet));

        for listener in self.theme_listeners.snapshot() {
            listener(&self.provider);
        }
    }
}

fn warn_missing_source_colors<P: ThemeColorsProvider + ?Sized>(
    provider: &P,
    source: &ThemeColorSource,
) {
    for theme_color in provider.theme_colors() {
        if !source.contains(theme_color.title()) {
            log::warn!(
                "Color source has no color for \"{}\"; using the default {}",
                theme_color.title(),
                theme_color.default_color()
            );
        }
    }
}

impl<P: ThemeColorsProvider + fmt::Debug> fmt::Debug for ThemeManager<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeManager")
            .field("provider", &self.provider)
            .field("source", &self.source)
            .field("root_count", &self.binder.roots().len())
            .field("icon_count", &self.icons.len())
            .field("shape_count", &self.shapes.len())
            .field("theme_listeners", &self.theme_listeners)
            .finish()
    }
}
