//! JSON Spec Document Repository
//!
//! Loads the spec list as a raw JSON array and writes it back with two-space
//! indentation and a trailing newline. Key order survives the round trip.

use std::path::Path;

use serde_json::Value;

use crate::domain::ports::{DocumentError, FileSystem, FsError, SpecDocumentRepository};
use crate::domain::services::to_pretty_json;
use crate::infrastructure::fs::LocalFs;

/// Spec documents stored as JSON files
pub struct JsonSpecDocumentRepository {
    fs: LocalFs,
}

impl JsonSpecDocumentRepository {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for JsonSpecDocumentRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn io_error(err: FsError) -> DocumentError {
    match err {
        FsError::Io { source, .. } => DocumentError::Io(source),
        FsError::NotFound(path) => DocumentError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )),
        other => DocumentError::Io(std::io::Error::other(other.to_string())),
    }
}

impl SpecDocumentRepository for JsonSpecDocumentRepository {
    fn load(&self, path: &Path) -> Result<Value, DocumentError> {
        let content = self.fs.read(path).map_err(io_error)?;
        let document: Value = serde_json::from_str(&content)
            .map_err(|e| DocumentError::InvalidFormat(e.to_string()))?;
        if !document.is_array() {
            return Err(DocumentError::InvalidFormat(
                "expected a JSON array of class specs".to_string(),
            ));
        }
        Ok(document)
    }

    fn save(&self, path: &Path, document: &Value) -> Result<(), DocumentError> {
        let content =
            to_pretty_json(document).map_err(|e| DocumentError::InvalidFormat(e.to_string()))?;
        self.fs.write(path, &content).map_err(io_error)
    }
}
