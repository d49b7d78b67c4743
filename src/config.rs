//! # Configuration Module
//!
//! One immutable [`AppConfig`] is built at startup and passed explicitly to the router, the
//! controller lifecycle and the front controller. Nothing reads ambient globals.
//!
//! ## Sources
//!
//! Configuration is read from a YAML file and then overridden from environment variables:
//!
//! ```yaml
//! app_name: skel
//! default_controller: main
//! debug: false
//! use_app_namespace_for_not_found: false
//! template_base: ./templates
//! timezone: America/Chicago
//! locale: en_US
//! autoload:
//!   enabled: true
//!   root: .
//!   extension: rs
//!   namespaces:
//!     - { prefix: "Skel\\", path: apps }
//!   namespace_manifest: vendor/namespaces.json
//! ```
//!
//! ## Environment Variables
//!
//! | variable                       | field                              |
//! |--------------------------------|------------------------------------|
//! | `FRONTMVC_DEBUG`               | `debug`                            |
//! | `FRONTMVC_DEFAULT_CONTROLLER`  | `default_controller`               |
//! | `FRONTMVC_TEMPLATE_BASE`       | `template_base`                    |
//! | `FRONTMVC_CUSTOM_404`          | `use_app_namespace_for_not_found`  |
//!
//! Booleans accept `1`, `true`, `yes`, `on` (case-insensitive); anything else is `false`.

use crate::resolver::NamespaceBinding;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Application configuration, immutable once the application is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application name; also the root namespace of its controllers and models
    pub app_name: String,
    /// Controller used when the first path segment is empty
    pub default_controller: String,
    /// Show routing failure details on the not-found page
    pub debug: bool,
    /// Resolve `PageNotFound` in the application namespace instead of the framework's
    pub use_app_namespace_for_not_found: bool,
    /// Namespace of the framework's built-in controllers
    pub framework_namespace: String,
    /// Directory containing `<app>/view/...` and `<app>/layout/...`
    pub template_base: PathBuf,
    pub timezone: String,
    pub locale: String,
    pub autoload: AutoloadConfig,
}

/// Module resolution settings, see [`crate::resolver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoloadConfig {
    /// Require controller modules to resolve to a file before routing to them
    pub enabled: bool,
    /// Root all root-relative candidates are joined to (default `../..`)
    pub root: Option<PathBuf>,
    /// Module file extension, without the dot
    pub extension: String,
    /// Directories relative candidates are searched in, in order
    pub search_paths: Vec<PathBuf>,
    /// Ordered namespace → base path bindings
    pub namespaces: Vec<NamespaceBinding>,
    /// JSON namespace map imported after `namespaces`
    pub namespace_manifest: Option<PathBuf>,
}

impl Default for AutoloadConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            root: None,
            extension: crate::resolver::DEFAULT_EXTENSION.to_string(),
            search_paths: vec![PathBuf::from(".")],
            namespaces: Vec::new(),
            namespace_manifest: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "App".to_string(),
            default_controller: "main".to_string(),
            debug: false,
            use_app_namespace_for_not_found: false,
            framework_namespace: "Frontmvc".to_string(),
            template_base: PathBuf::from("."),
            timezone: "America/Chicago".to_string(),
            locale: "en_US".to_string(),
            autoload: AutoloadConfig::default(),
        }
    }
}

impl AppConfig {
    /// Configuration with defaults for the named application.
    #[must_use]
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid YAML for this struct.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML for this struct.
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply `FRONTMVC_*` environment overrides.
    #[must_use]
    pub fn apply_env(mut self) -> Self {
        if let Ok(val) = env::var("FRONTMVC_DEBUG") {
            self.debug = parse_flag(&val);
        }
        if let Ok(val) = env::var("FRONTMVC_DEFAULT_CONTROLLER") {
            if !val.is_empty() {
                self.default_controller = val;
            }
        }
        if let Ok(val) = env::var("FRONTMVC_TEMPLATE_BASE") {
            if !val.is_empty() {
                self.template_base = PathBuf::from(val);
            }
        }
        if let Ok(val) = env::var("FRONTMVC_CUSTOM_404") {
            self.use_app_namespace_for_not_found = parse_flag(&val);
        }
        self
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_default_controller(mut self, name: impl Into<String>) -> Self {
        self.default_controller = name.into();
        self
    }

    #[must_use]
    pub fn with_template_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.template_base = base.into();
        self
    }

    #[must_use]
    pub fn with_app_namespace_for_not_found(mut self, enabled: bool) -> Self {
        self.use_app_namespace_for_not_found = enabled;
        self
    }
}

pub(crate) fn parse_flag(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new("skel");
        assert_eq!(config.app_name, "skel");
        assert_eq!(config.default_controller, "main");
        assert!(!config.debug);
        assert!(!config.use_app_namespace_for_not_found);
        assert_eq!(config.autoload.extension, "rs");
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let yaml = r#"
app_name: skel
debug: true
autoload:
  enabled: true
  namespaces:
    - { prefix: "Skel\\", path: "apps/" }
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert!(config.debug);
        assert_eq!(config.default_controller, "main");
        assert!(config.autoload.enabled);
        assert_eq!(config.autoload.namespaces.len(), 1);
        assert_eq!(config.autoload.namespaces[0].prefix, "Skel\\");
        assert_eq!(config.autoload.search_paths, vec![PathBuf::from(".")]);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" on "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }
}
