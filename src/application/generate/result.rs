//! Generate Result

use serde_json::Value;

use crate::domain::entities::Artifact;

/// Result of a successful generation run
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// One per batch item, in batch order
    pub artifacts: Vec<Artifact>,
    /// Relative paths written (or that would be, on a dry run)
    pub written: Vec<String>,
    /// Relative paths already up to date
    pub unchanged: Vec<String>,
    /// Document items left out by the selection (resolved against, not emitted)
    pub unselected: usize,
    /// The annotated metadata document
    pub document: Value,
    /// Whether the metadata document changed on disk
    pub metadata_written: bool,
    pub dry_run: bool,
}

impl GenerateResult {
    pub fn has_changes(&self) -> bool {
        !self.written.is_empty() || self.metadata_written
    }
}
