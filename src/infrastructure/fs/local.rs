//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::ports::{FileSystem, FsError, FsResult};
use crate::domain::value_objects::ContentHash;

/// Local file system implementation
///
/// Writes go to a temporary file in the target directory which is then
/// renamed over the destination, so readers never see a partial file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::from_io(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.is_dir() {
            return Err(FsError::NotFound(dir.to_path_buf()));
        }

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| FsError::from_io(path, e))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| FsError::from_io(path, e))?;
        temp.persist(path)
            .map_err(|e| FsError::from_io(path, e.error))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        std::fs::remove_file(path).map_err(|e| FsError::from_io(path, e))
    }

    fn remove_dir(&self, path: &Path) -> FsResult<()> {
        std::fs::remove_dir(path).map_err(|e| FsError::from_io(path, e))
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::from_io(path, e))
    }

    fn hash(&self, path: &Path) -> FsResult<String> {
        let bytes = std::fs::read(path).map_err(|e| FsError::from_io(path, e))?;
        Ok(ContentHash::from_bytes(&bytes).to_string())
    }
}
