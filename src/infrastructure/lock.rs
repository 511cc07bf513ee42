//! Single-writer guard
//!
//! `generate` holds two exclusive advisory locks for the whole run:
//! `<root>/.layerwright.lock` for the target tree and `<spec>.lock` for the
//! document it annotates. Two invocations sharing either one never
//! interleave, even when they read different spec files.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{LayerwrightError, LayerwrightResult};

/// Lock file kept in the target root
pub const ROOT_LOCK_FILE: &str = ".layerwright.lock";

/// One held lock file; released on drop
#[derive(Debug)]
pub struct LockFile {
    file: File,
    path: PathBuf,
}

impl LockFile {
    /// Take the lock at `path`, failing immediately if another run holds it
    pub fn acquire(path: PathBuf) -> LayerwrightResult<Self> {
        let locked = |message: String| LayerwrightError::Locked {
            path: path.clone(),
            message,
        };

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| locked(e.to_string()))?;
        file.try_lock_exclusive()
            .map_err(|_| locked("another layerwright run holds this lock".to_string()))?;

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Both locks of a generate run
#[derive(Debug)]
pub struct RunLock {
    root: LockFile,
    spec: LockFile,
}

impl RunLock {
    /// Lock file used for `spec_path`
    pub fn spec_lock_path(spec_path: &Path) -> PathBuf {
        let mut name = spec_path.as_os_str().to_os_string();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Lock file used for the target tree at `root`
    pub fn root_lock_path(root: &Path) -> PathBuf {
        root.join(ROOT_LOCK_FILE)
    }

    /// Lock the target root, then the spec document
    pub fn acquire(spec_path: &Path, root: &Path) -> LayerwrightResult<Self> {
        let root_lock = Self::root_lock_path(root);
        fs::create_dir_all(root).map_err(|e| LayerwrightError::Locked {
            path: root_lock.clone(),
            message: e.to_string(),
        })?;

        let root = LockFile::acquire(root_lock)?;
        let spec = LockFile::acquire(Self::spec_lock_path(spec_path))?;
        Ok(Self { root, spec })
    }

    pub fn paths(&self) -> [&Path; 2] {
        [self.root.path(), self.spec.path()]
    }
}
