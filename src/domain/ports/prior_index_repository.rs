//! PriorIndexRepository port - loads identities produced by earlier runs

use std::path::Path;

use crate::domain::entities::PriorIndex;

/// Prior index loading errors
#[derive(Debug)]
pub enum PriorIndexError {
    /// The file does not exist
    NotFound,
    /// The file is not a usable index
    InvalidFormat(String),
    /// I/O error
    Io(std::io::Error),
}

impl std::fmt::Display for PriorIndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorIndexError::NotFound => write!(f, "Prior index not found"),
            PriorIndexError::InvalidFormat(msg) => write!(f, "Invalid prior index: {}", msg),
            PriorIndexError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for PriorIndexError {}

/// Source of a [`PriorIndex`]
pub trait PriorIndexRepository {
    fn load(&self, path: &Path) -> Result<PriorIndex, PriorIndexError>;
}
