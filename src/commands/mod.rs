//! Command handlers
//!
//! Each handler loads configuration, wires a use case through the factory
//! and renders the result as text or NDJSON.

mod check;
mod diff;
mod generate;
mod paths;

use anyhow::Result;

use layerwright::application::Selection;
use layerwright::config::Config;
use layerwright::infrastructure::TomlConfigRepository;
use layerwright::presentation::{BatchArgs, TargetArgs};

pub use check::cmd_check;
pub use diff::cmd_diff;
pub use generate::cmd_generate;
pub use paths::cmd_paths;

/// Config for `target.root`, with env then CLI overrides applied
pub(crate) fn load_config(target: &TargetArgs) -> Result<Config> {
    let (config, warnings) = TomlConfigRepository::new().resolve(&target.root)?;
    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }
    Ok(apply_target_overrides(config, target))
}

fn apply_target_overrides(mut config: Config, target: &TargetArgs) -> Config {
    if let Some(source_root) = &target.source_root {
        config.paths.source_root = source_root.clone();
    }
    if let Some(test_root) = &target.test_root {
        config.paths.test_root = test_root.clone();
    }
    if let Some(template) = &target.raw_template {
        config.urls.raw_template = Some(template.clone());
    }
    if let Some(repo) = &target.repo {
        config.urls.repo = Some(repo.clone());
    }
    config
}

pub(crate) fn selection(batch: &BatchArgs) -> Selection {
    Selection::all()
        .with_layers(batch.layers.clone())
        .with_only(batch.only.clone())
}

/// Unicode icons unless the terminal says it cannot draw them
pub(crate) fn supports_unicode() -> bool {
    std::env::var("TERM").map_or(true, |term| term != "dumb")
}
