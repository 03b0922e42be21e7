//! Manager configuration.
//!
//! [`ManagerConfig`] carries what the manager needs besides the manifest:
//! the primary stage, an optional localization [`ResourceBundle`] handed to
//! the view loader, and the scan scope that limits which manifest entries are
//! used.
//!
//! The toolkit-independent parts can be loaded from YAML:
//!
//! ```rust
//! use trellis_controllers::{ManagerConfig, ScanScope};
//! # use trellis_controllers::{BoxError, Toolkit, ViewRequest, ViewTarget};
//! # struct Gui;
//! # impl Toolkit for Gui {
//! #     type Root = ();
//! #     type Scene = ();
//! #     type Stage = ();
//! #     fn load_view(&self, _: &ViewRequest<'_>, _: &mut dyn ViewTarget) -> Result<Option<()>, BoxError> { Ok(None) }
//! #     fn create_scene(&self, _: &()) {}
//! # }
//!
//! let config = ManagerConfig::<Gui>::from_yaml((), r#"
//! scan_path: my_app::views
//! resources:
//!   window.title: My App
//!   button.ok: OK
//! "#).unwrap();
//!
//! assert_eq!(config.scan_scope(), &ScanScope::Path("my_app::views".into()));
//! assert_eq!(config.resources().unwrap().get("button.ok"), Some("OK"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::toolkit::Toolkit;

/// Which manifest entries a manager uses, by Rust path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanScope {
    /// Everything registered.
    #[default]
    All,
    /// Entries whose path equals this module path or lies below it.
    Path(String),
}

impl ScanScope {
    /// Parses a scan path; empty and `*` mean everything.
    pub fn parse(path: &str) -> Self {
        let path = path.trim().trim_end_matches("::");
        if path.is_empty() || path == "*" {
            ScanScope::All
        } else {
            ScanScope::Path(path.to_string())
        }
    }

    /// Returns true if the item at `path` is inside the scope.
    pub fn contains(&self, path: &str) -> bool {
        match self {
            ScanScope::All => true,
            ScanScope::Path(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with("::"))
            }
        }
    }
}

/// Localized strings for views, keyed by message id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ResourceBundle {
    entries: BTreeMap<String, String>,
}

impl ResourceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a flat YAML mapping of message id to text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    scan_path: Option<String>,
    resources: Option<ResourceBundle>,
}

/// Configuration of a [`ControllerManager`](crate::ControllerManager).
pub struct ManagerConfig<T: Toolkit> {
    primary_stage: T::Stage,
    resources: Option<ResourceBundle>,
    scan_scope: ScanScope,
}

impl<T: Toolkit> ManagerConfig<T> {
    pub fn new(primary_stage: T::Stage) -> Self {
        Self {
            primary_stage,
            resources: None,
            scan_scope: ScanScope::All,
        }
    }

    /// Builds a configuration from a YAML fragment with optional
    /// `scan_path` and `resources` keys.
    pub fn from_yaml(primary_stage: T::Stage, content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        let mut config = Self::new(primary_stage);
        if let Some(path) = file.scan_path {
            config = config.with_scan_path(&path);
        }
        config.resources = file.resources;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(primary_stage: T::Stage, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(primary_stage, &content)
    }

    pub fn with_resources(mut self, resources: ResourceBundle) -> Self {
        self.resources = Some(resources);
        self
    }

    /// Limits the manager to manifest entries under a module path.
    pub fn with_scan_path(mut self, path: &str) -> Self {
        self.scan_scope = ScanScope::parse(path);
        self
    }

    pub fn primary_stage(&self) -> &T::Stage {
        &self.primary_stage
    }

    pub fn resources(&self) -> Option<&ResourceBundle> {
        self.resources.as_ref()
    }

    pub fn scan_scope(&self) -> &ScanScope {
        &self.scan_scope
    }
}

impl<T: Toolkit> fmt::Debug for ManagerConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerConfig")
            .field("resources", &self.resources)
            .field("scan_scope", &self.scan_scope)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestToolkit;

    #[test]
    fn test_scope_all() {
        assert_eq!(ScanScope::parse("*"), ScanScope::All);
        assert_eq!(ScanScope::parse(""), ScanScope::All);
        assert!(ScanScope::All.contains("anything::at::all"));
    }

    #[test]
    fn test_scope_prefix_respects_segments() {
        let scope = ScanScope::parse("app::views");
        assert!(scope.contains("app::views"));
        assert!(scope.contains("app::views::MainController"));
        assert!(!scope.contains("app::views_extra::Other"));
        assert!(!scope.contains("app::model::Store"));
    }

    #[test]
    fn test_scope_trailing_separator() {
        assert_eq!(
            ScanScope::parse("app::views::"),
            ScanScope::Path("app::views".into())
        );
    }

    #[test]
    fn test_resource_bundle_yaml() {
        let bundle = ResourceBundle::from_yaml("greeting: Hello\nfarewell: Bye\n").unwrap();
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.get("greeting"), Some("Hello"));
        assert_eq!(bundle.get("missing"), None);
    }

    #[test]
    fn test_resource_bundle_rejects_nested() {
        assert!(ResourceBundle::from_yaml("menu:\n  file: File\n").is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = ManagerConfig::<TestToolkit>::new("main".to_string());
        assert_eq!(config.primary_stage(), "main");
        assert_eq!(config.scan_scope(), &ScanScope::All);
        assert!(config.resources().is_none());
    }

    #[test]
    fn test_config_from_yaml() {
        let config = ManagerConfig::<TestToolkit>::from_yaml(
            "main".to_string(),
            "scan_path: \"*\"\nresources:\n  title: Trellis\n",
        )
        .unwrap();
        assert_eq!(config.scan_scope(), &ScanScope::All);
        assert_eq!(config.resources().unwrap().get("title"), Some("Trellis"));
    }

    #[test]
    fn test_config_rejects_unknown_keys() {
        let result = ManagerConfig::<TestToolkit>::from_yaml("main".to_string(), "scan: x\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_config_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scan_path: app::views").unwrap();

        let config = ManagerConfig::<TestToolkit>::from_file("main".to_string(), file.path()).unwrap();
        assert!(config.scan_scope().contains("app::views::Main"));
    }
}
