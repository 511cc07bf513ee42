//! TOML-based configuration loading for the CLI.

use std::path::Path;

use crate::config::{find_config, Config, ConfigWarning};
use crate::error::LayerwrightResult;

/// Finds and loads `layerwright.toml`, then applies env overrides.
///
/// Unlike [`Config::load_or_default`], a malformed file is an error here:
/// the CLI should not silently fall back to defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlConfigRepository;

impl TomlConfigRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, project_root: &Path) -> LayerwrightResult<(Config, Vec<ConfigWarning>)> {
        let (config, warnings) = match find_config(Some(project_root)) {
            Some(path) => Config::load_with_warnings(&path)?,
            None => (Config::default(), Vec::new()),
        };
        Ok((config.with_env_overrides(), warnings))
    }
}
