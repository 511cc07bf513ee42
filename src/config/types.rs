//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::services::PathConfig;
use crate::domain::value_objects::RawUrlTemplate;
use crate::error::LayerwrightResult;

use super::loader::{self, ConfigWarning};

/// Where generated files go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Prefix for generated source; empty means the target root
    #[serde(default)]
    pub source_root: String,

    #[serde(default = "default_test_root")]
    pub test_root: String,

    /// File extension without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_root: String::new(),
            test_root: default_test_root(),
            extension: default_extension(),
        }
    }
}

fn default_test_root() -> String {
    "tests".to_string()
}

fn default_extension() -> String {
    "py".to_string()
}

/// Raw URL annotation
///
/// ```toml
/// [urls]
/// raw_template = "https://raw.githubusercontent.com/{repo}/main/{path}"
/// repo = "acme/shop"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlsConfig {
    #[serde(default)]
    pub raw_template: Option<String>,

    #[serde(default)]
    pub repo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutersConfig {
    /// Prepended to every router mount path
    #[serde(default)]
    pub api_prefix: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub urls: UrlsConfig,

    #[serde(default)]
    pub routers: RoutersConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> LayerwrightResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> LayerwrightResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (LAYERWRIGHT_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Path derivation settings for the engine
    pub fn path_config(&self) -> PathConfig {
        PathConfig {
            source_root: self.paths.source_root.trim_matches('/').to_string(),
            test_root: self.paths.test_root.trim_matches('/').to_string(),
            extension: self.paths.extension.trim_start_matches('.').to_string(),
            api_prefix: self.routers.api_prefix.clone(),
        }
    }

    /// Raw URL template, when one is configured
    pub fn raw_url_template(&self) -> Option<RawUrlTemplate> {
        self.urls
            .raw_template
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .map(|t| RawUrlTemplate::new(t, self.urls.repo.as_deref()))
    }
}
