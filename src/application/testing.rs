//! In-memory collaborators for use case tests

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::domain::entities::{Payload, PriorIndex};
use crate::domain::ports::{
    DocumentError, FileSystem, FsError, FsResult, GenerateEvent, GenerateEventSink,
    PriorIndexError, PriorIndexRepository, RenderError, RenderInput, Renderer,
    SpecDocumentRepository,
};
use crate::domain::value_objects::ContentHash;

/// In-memory file system with failure injection
#[derive(Default)]
pub struct MockFileSystem {
    pub files: RefCell<BTreeMap<PathBuf, String>>,
    pub dirs: RefCell<BTreeSet<PathBuf>>,
    /// Writes to this path fail
    pub fail_write: RefCell<Option<PathBuf>>,
    /// Every successful write, in order
    pub write_log: RefCell<Vec<PathBuf>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        let path = path.into();
        self.add_parents(&path);
        self.files.borrow_mut().insert(path, content.to_string());
        self
    }

    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.add_parents(&path.join("x"));
        self
    }

    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        *self.fail_write.borrow_mut() = Some(path.into());
    }

    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Files and directories, for before/after comparisons
    pub fn snapshot(&self) -> (BTreeMap<PathBuf, String>, BTreeSet<PathBuf>) {
        (self.files.borrow().clone(), self.dirs.borrow().clone())
    }

    fn add_parents(&self, path: &Path) {
        let mut dirs = self.dirs.borrow_mut();
        for dir in path.ancestors().skip(1) {
            if !dir.as_os_str().is_empty() {
                dirs.insert(dir.to_path_buf());
            }
        }
    }
}

impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        if self.fail_write.borrow().as_deref() == Some(path) {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        let parent_exists = path
            .parent()
            .map(|p| p.as_os_str().is_empty() || self.dirs.borrow().contains(p))
            .unwrap_or(true);
        if !parent_exists {
            return Err(FsError::NotFound(path.to_path_buf()));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        self.write_log.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        self.files
            .borrow_mut()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn remove_dir(&self, path: &Path) -> FsResult<()> {
        let occupied = self.files.borrow().keys().any(|f| f.starts_with(path) && f != path)
            || self.dirs.borrow().iter().any(|d| d.starts_with(path) && d != path);
        if occupied {
            return Err(FsError::Other(format!("directory not empty: {}", path.display())));
        }
        self.dirs.borrow_mut().remove(path);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        self.add_parents(&path.join("x"));
        Ok(())
    }

    fn hash(&self, path: &Path) -> FsResult<String> {
        self.read(path)
            .map(|content| ContentHash::from_content(&content).as_str().to_string())
    }
}

/// Renders a short, deterministic summary of each input
pub struct StubRenderer {
    /// Rendering this class name fails
    pub fail_on: Option<String>,
}

impl StubRenderer {
    pub fn new() -> Self {
        Self { fail_on: None }
    }

    pub fn failing_on(name: &str) -> Self {
        Self {
            fail_on: Some(name.to_string()),
        }
    }

    fn check(&self, input: &RenderInput<'_>) -> Result<(), RenderError> {
        match &self.fail_on {
            Some(name) if name == input.item.spec.class_name.as_str() => {
                Err(RenderError::new(format!("template error in {}", name)))
            }
            _ => Ok(()),
        }
    }
}

impl Renderer for StubRenderer {
    fn render_code(&self, input: &RenderInput<'_>) -> Result<String, RenderError> {
        self.check(input)?;
        let mut out = format!("# {}\nclass {}:\n", input.code_path, input.identifier);
        for link in &input.item.links {
            out.push_str(&format!("    # uses {}\n", link.symbol.import_name()));
        }
        if let Payload::Router { .. } = input.item.spec.payload {
            out.push_str(&format!("    # mounted at {}\n", input.register_path.unwrap_or("")));
        }
        Ok(out)
    }

    fn render_test(&self, input: &RenderInput<'_>) -> Result<String, RenderError> {
        self.check(input)?;
        Ok(format!("# test for {}\n", input.identifier))
    }
}

/// Records every event it receives
#[derive(Default, Clone)]
pub struct RecordingSink {
    pub events: Arc<Mutex<Vec<GenerateEvent>>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<GenerateEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl GenerateEventSink for RecordingSink {
    fn on_event(&self, event: GenerateEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Spec documents held in memory, keyed by path
#[derive(Default)]
pub struct MockDocuments {
    pub documents: RefCell<BTreeMap<PathBuf, Value>>,
    pub saves: RefCell<usize>,
}

impl MockDocuments {
    pub fn with(path: impl Into<PathBuf>, document: Value) -> Self {
        let docs = Self::default();
        docs.documents.borrow_mut().insert(path.into(), document);
        docs
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<Value> {
        self.documents.borrow().get(path.as_ref()).cloned()
    }
}

impl SpecDocumentRepository for MockDocuments {
    fn load(&self, path: &Path) -> Result<Value, DocumentError> {
        match self.documents.borrow().get(path) {
            Some(doc) if doc.is_array() => Ok(doc.clone()),
            Some(_) => Err(DocumentError::InvalidFormat("expected a JSON array".to_string())),
            None => Err(DocumentError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such document",
            ))),
        }
    }

    fn save(&self, path: &Path, document: &Value) -> Result<(), DocumentError> {
        self.documents
            .borrow_mut()
            .insert(path.to_path_buf(), document.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

/// Prior indexes held in memory, keyed by path
#[derive(Default)]
pub struct MockPriors {
    pub indexes: BTreeMap<PathBuf, PriorIndex>,
}

impl MockPriors {
    pub fn with(path: impl Into<PathBuf>, index: PriorIndex) -> Self {
        let mut priors = Self::default();
        priors.indexes.insert(path.into(), index);
        priors
    }
}

impl PriorIndexRepository for MockPriors {
    fn load(&self, path: &Path) -> Result<PriorIndex, PriorIndexError> {
        self.indexes
            .get(path)
            .cloned()
            .ok_or(PriorIndexError::NotFound)
    }
}
