//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LayerwrightError, LayerwrightResult};

use super::types::Config;

/// File name looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = "layerwright.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> LayerwrightResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse TOML text; `path` is only used in messages
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> LayerwrightResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| LayerwrightError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// First config file that exists: project, then user
pub fn find_config(project_root: Option<&Path>) -> Option<PathBuf> {
    let project = project_root.map(|root| root.join(PROJECT_CONFIG_FILE));
    let user = dirs::config_dir().map(|dir| dir.join("layerwright/config.toml"));
    project.into_iter().chain(user).find(|p| p.is_file())
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> Config {
    let config = find_config(project_root)
        .and_then(|path| Config::load(&path).ok())
        .unwrap_or_default();
    with_env_overrides(config)
}

/// Apply environment variable overrides (LAYERWRIGHT_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from any key lookup
pub fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(value) = var("LAYERWRIGHT_SOURCE_ROOT") {
        config.paths.source_root = value;
    }
    if let Some(value) = var("LAYERWRIGHT_TEST_ROOT") {
        config.paths.test_root = value;
    }
    if let Some(value) = var("LAYERWRIGHT_EXTENSION") {
        config.paths.extension = value;
    }
    if let Some(value) = var("LAYERWRIGHT_RAW_TEMPLATE") {
        config.urls.raw_template = Some(value).filter(|v| !v.is_empty());
    }
    if let Some(value) = var("LAYERWRIGHT_REPO") {
        config.urls.repo = Some(value).filter(|v| !v.is_empty());
    }
    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "paths",
        "source_root",
        "test_root",
        "extension",
        "urls",
        "raw_template",
        "repo",
        "routers",
        "api_prefix",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (levenshtein(unknown, candidate), *candidate))
        .filter(|(dist, _)| *dist <= 2)
        .min()
        .map(|(_, candidate)| candidate.to_string())
}

/// Edit distance over chars, one row at a time
fn levenshtein(a: &str, b: &str) -> usize {
    let target: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=target.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in target.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = (above + 1)
                .min(row[j] + 1)
                .min(diagonal + usize::from(ca != cb));
            diagonal = above;
        }
    }

    row[target.len()]
}
