//! SpecDocumentRepository port - persistence of the JSON spec document
//!
//! The document is kept as a raw `serde_json::Value` so keys the engine does
//! not know about survive the round trip.

use std::path::Path;

use serde_json::Value;

/// Spec document errors
#[derive(Debug)]
pub enum DocumentError {
    /// Not valid JSON, or not an array
    InvalidFormat(String),
    /// I/O error
    Io(std::io::Error),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::InvalidFormat(msg) => write!(f, "Invalid spec document: {}", msg),
            DocumentError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for DocumentError {}

pub trait SpecDocumentRepository {
    /// Load the document; it must be a JSON array
    fn load(&self, path: &Path) -> Result<Value, DocumentError>;

    /// Save the document (two-space indent, trailing newline)
    fn save(&self, path: &Path, document: &Value) -> Result<(), DocumentError>;
}

impl<T: SpecDocumentRepository + ?Sized> SpecDocumentRepository for &T {
    fn load(&self, path: &Path) -> Result<Value, DocumentError> {
        (**self).load(path)
    }

    fn save(&self, path: &Path, document: &Value) -> Result<(), DocumentError> {
        (**self).save(path, document)
    }
}
