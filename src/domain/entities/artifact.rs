//! Artifact entities - what the emitter produces for each spec
//!
//! `Artifact` is the per-spec record written back into the metadata
//! document; `ArtifactFile` is one rendered file (code or test) staged for
//! writing.

use crate::domain::value_objects::ContentHash;

use super::SpecId;

/// Code or test output of a spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Code,
    Test,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Code => "code",
            ArtifactKind::Test => "test",
        }
    }
}

/// Locations produced for one spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub owner: SpecId,
    pub code_path: String,
    pub code_raw_url: Option<String>,
    pub test_path: Option<String>,
    pub test_raw_url: Option<String>,
    /// Mount path, routers only
    pub register_path: Option<String>,
}

impl Artifact {
    /// Relative paths this artifact owns
    pub fn paths(&self) -> Vec<&str> {
        let mut paths = vec![self.code_path.as_str()];
        if let Some(test) = &self.test_path {
            paths.push(test.as_str());
        }
        paths
    }
}

/// A rendered file ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFile {
    pub owner: SpecId,
    pub kind: ArtifactKind,
    /// Path relative to the target root, `/`-separated
    pub path: String,
    pub content: String,
    hash: ContentHash,
}

impl ArtifactFile {
    pub fn new(owner: SpecId, kind: ArtifactKind, path: impl Into<String>, content: String) -> Self {
        let hash = ContentHash::from_content(&content);
        Self {
            owner,
            kind,
            path: path.into(),
            content,
            hash,
        }
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }
}
