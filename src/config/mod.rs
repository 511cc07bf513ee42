//! Configuration module for Layerwright
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (LAYERWRIGHT_*)
//! 3. Project config (`layerwright.toml` in the target root)
//! 4. User config (`<config dir>/layerwright/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    apply_overrides, find_config, parse_with_warnings, ConfigWarning, PROJECT_CONFIG_FILE,
};
pub use types::{Config, PathsConfig, RoutersConfig, UrlsConfig};
