//! Resolution results - symbols and the batch they were resolved for

use crate::domain::value_objects::LayerKind;

use super::{ClassSpec, Reference};

/// Where a symbol was declared
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolOrigin {
    /// Item of the current batch (document index)
    Batch(usize),
    /// Entry of the prior index (position in the index)
    Prior(usize),
}

/// A named, referenceable class in scope for a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub layer: LayerKind,
    pub class_name: String,
    /// Derived identifier (`I`-prefixed for interfaces)
    pub identifier: String,
    pub code_path: Option<String>,
    pub origin: SymbolOrigin,
    /// Nested declaration matched instead of the class itself (schema models)
    pub member: Option<String>,
}

impl Symbol {
    /// `layer:ClassName`, plus `#Member` for nested matches
    pub fn describe(&self) -> String {
        match &self.member {
            Some(member) => format!("{}:{}#{}", self.layer, self.class_name, member),
            None => format!("{}:{}", self.layer, self.class_name),
        }
    }

    /// Name to import when referring to this symbol from generated code
    pub fn import_name(&self) -> &str {
        self.member.as_deref().unwrap_or(&self.identifier)
    }
}

/// A reference together with the symbol it resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub reference: Reference,
    pub symbol: Symbol,
}

/// A spec whose references all resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpec {
    pub spec: ClassSpec,
    pub links: Vec<Link>,
}

/// A batch that passed validation, direction checking and resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedBatch {
    pub items: Vec<ResolvedSpec>,
}

impl ResolvedBatch {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn specs(&self) -> impl Iterator<Item = &ClassSpec> {
        self.items.iter().map(|item| &item.spec)
    }
}
