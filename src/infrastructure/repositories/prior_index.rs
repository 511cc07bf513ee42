//! JSON Prior Index Repository
//!
//! Accepts two shapes:
//! - an earlier metadata document (array of spec items; extra keys ignored)
//! - a plain index, `{"entries": [{"layer", "class_name", "code_path"?, "schemas"?}]}`
//!
//! Schema model names (`schemas[].name`) are kept so request and response
//! models declared earlier still resolve.

use std::path::Path;

use serde::Deserialize;

use crate::domain::entities::{PriorEntry, PriorIndex};
use crate::domain::ports::{FileSystem, FsError, PriorIndexError, PriorIndexRepository};
use crate::domain::value_objects::LayerKind;
use crate::infrastructure::fs::LocalFs;

#[derive(Debug, Deserialize)]
struct JsonPriorEntry {
    layer: String,
    class_name: String,
    #[serde(default)]
    code_path: Option<String>,
    #[serde(default)]
    base_name: Option<String>,
    #[serde(default)]
    schemas: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonPriorFile {
    Document(Vec<serde_json::Value>),
    Index { entries: Vec<serde_json::Value> },
}

/// Reads prior indexes from JSON files
pub struct JsonPriorIndexRepository {
    fs: LocalFs,
}

impl JsonPriorIndexRepository {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for JsonPriorIndexRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorIndexRepository for JsonPriorIndexRepository {
    fn load(&self, path: &Path) -> Result<PriorIndex, PriorIndexError> {
        let content = self.fs.read(path).map_err(|e| match e {
            FsError::NotFound(_) => PriorIndexError::NotFound,
            FsError::Io { source, .. } => PriorIndexError::Io(source),
            other => PriorIndexError::Io(std::io::Error::other(other.to_string())),
        })?;
        parse_prior_index(&content)
    }
}

/// Parse either accepted shape
pub fn parse_prior_index(content: &str) -> Result<PriorIndex, PriorIndexError> {
    let file: JsonPriorFile = serde_json::from_str(content).map_err(|_| {
        PriorIndexError::InvalidFormat(
            "expected a metadata array or an object with \"entries\"".to_string(),
        )
    })?;
    let raw = match file {
        JsonPriorFile::Document(items) | JsonPriorFile::Index { entries: items } => items,
    };

    let mut index = PriorIndex::new();
    for (i, value) in raw.into_iter().enumerate() {
        let entry: JsonPriorEntry = serde_json::from_value(value)
            .map_err(|e| PriorIndexError::InvalidFormat(format!("entry #{}: {}", i, e)))?;
        let layer = LayerKind::parse(&entry.layer).ok_or_else(|| {
            PriorIndexError::InvalidFormat(format!("entry #{}: unknown layer '{}'", i, entry.layer))
        })?;
        let members = entry
            .schemas
            .iter()
            .filter_map(|schema| schema.get("name").and_then(serde_json::Value::as_str))
            .map(|name| name.trim().to_string())
            .collect();
        let prior = PriorEntry::new(layer, entry.class_name)
            .with_base_name(entry.base_name)
            .with_members(members);
        index.push(match entry.code_path {
            Some(path) => prior.with_code_path(path),
            None => prior,
        });
    }
    Ok(index)
}
