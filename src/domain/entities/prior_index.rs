//! PriorIndex entity - identities produced by earlier runs
//!
//! Supplied by the caller so references can resolve against classes that
//! are not part of the current batch. The engine never scans the target
//! tree to rebuild this.

use crate::domain::value_objects::LayerKind;

/// One previously generated class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorEntry {
    pub layer: LayerKind,
    pub class_name: String,
    pub code_path: Option<String>,
    /// File stem override, used when no `code_path` was recorded
    pub base_name: Option<String>,
    /// Names declared inside the class, such as the models of a schema module
    pub members: Vec<String>,
}

impl PriorEntry {
    pub fn new(layer: LayerKind, class_name: impl Into<String>) -> Self {
        Self {
            layer,
            class_name: class_name.into(),
            code_path: None,
            base_name: None,
            members: Vec::new(),
        }
    }

    pub fn with_code_path(mut self, path: impl Into<String>) -> Self {
        self.code_path = Some(path.into());
        self
    }

    pub fn with_base_name(mut self, base_name: Option<String>) -> Self {
        self.base_name = base_name;
        self
    }

    pub fn with_members(mut self, members: Vec<String>) -> Self {
        self.members = members;
        self
    }
}

/// Caller-supplied record of earlier generations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorIndex {
    entries: Vec<PriorEntry>,
}

impl PriorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<PriorEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: PriorEntry) {
        self.entries.push(entry);
    }

    /// Append every entry of `other`
    pub fn extend(&mut self, other: PriorIndex) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[PriorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
