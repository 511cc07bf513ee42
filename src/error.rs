//! Error types for Layerwright
//!
//! Uses `thiserror` for library errors. The generation pipeline never fails
//! fast: validation, direction and resolution problems are collected into a
//! [`BatchRejection`] so an operator can fix a whole spec file in one pass.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::entities::{ReferenceField, SpecId};
use crate::domain::ports::FsError;
use crate::domain::value_objects::LayerKind;

/// Result type alias for Layerwright operations
pub type LayerwrightResult<T> = Result<T, LayerwrightError>;

/// Top-level error for a generation run
#[derive(Error, Debug)]
pub enum LayerwrightError {
    /// The batch failed validation, direction checking or resolution
    #[error(transparent)]
    Rejected(#[from] BatchRejection),

    /// Writing artifacts failed; the target tree was rolled back
    #[error(transparent)]
    Emit(#[from] EmitError),

    /// The metadata document could not be annotated
    #[error(transparent)]
    Annotate(#[from] AnnotateError),

    /// Spec document could not be read or parsed
    #[error("invalid spec document {path}: {message}")]
    Document { path: PathBuf, message: String },

    /// Prior index could not be loaded
    #[error("invalid prior index {path}: {message}")]
    PriorIndex { path: PathBuf, message: String },

    /// Configuration file is malformed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Another run holds the single-writer lock
    #[error("could not lock {path}: {message}")]
    Locked { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A class name that is empty or not `[A-Za-z0-9_]+`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidNameError {
    #[error("class name is empty")]
    Empty,

    #[error("class name '{name}' contains '{ch}' (only letters, digits and '_' are allowed)")]
    IllegalCharacter { name: String, ch: char },
}

/// One problem with one field of a spec item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    /// Item is not a JSON object
    NotAnObject,
    /// Required field is absent
    Missing { field: String },
    /// Field has the wrong JSON type
    WrongType {
        field: String,
        expected: &'static str,
    },
    /// Field has the right type but an unacceptable value
    Invalid { field: String, reason: String },
    /// `class_name` or `base_name` is not a valid identifier
    InvalidName {
        field: String,
        error: InvalidNameError,
    },
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::NotAnObject => write!(f, "item is not a JSON object"),
            FieldProblem::Missing { field } => write!(f, "missing required field '{}'", field),
            FieldProblem::WrongType { field, expected } => {
                write!(f, "field '{}' must be {}", field, expected)
            }
            FieldProblem::Invalid { field, reason } => {
                write!(f, "field '{}' is invalid: {}", field, reason)
            }
            FieldProblem::InvalidName { field, error } => write!(f, "{}: {}", field, error),
        }
    }
}

/// Validation failure, aggregated per item or per colliding group
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Every problem found on a single item
    #[error("item #{index}{}: {}", identity_suffix(.layer, .class_name), join_problems(.problems))]
    Item {
        index: usize,
        layer: Option<String>,
        class_name: Option<String>,
        problems: Vec<FieldProblem>,
    },

    /// Two or more items share `(layer, class_name)`
    #[error("duplicate {layer}:{class_name} at items {}", join_indices(.indices))]
    DuplicateIdentity {
        layer: LayerKind,
        class_name: String,
        indices: Vec<usize>,
    },

    /// Two or more items derive the same output path
    #[error("items {} all generate {path}", join_indices(.indices))]
    PathCollision { path: String, indices: Vec<usize> },
}

impl ValidationError {
    /// Indices of every item this error names
    pub fn indices(&self) -> Vec<usize> {
        match self {
            ValidationError::Item { index, .. } => vec![*index],
            ValidationError::DuplicateIdentity { indices, .. }
            | ValidationError::PathCollision { indices, .. } => indices.clone(),
        }
    }
}

/// A reference that crosses a forbidden layer boundary or closes a cycle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayerViolationError {
    #[error(
        "{item} may not reference {target} ({target_layer}) via '{field}'; allowed: {}",
        join_layers(.item)
    )]
    Direction {
        item: SpecId,
        field: ReferenceField,
        target: String,
        target_layer: LayerKind,
    },

    #[error("reference cycle: {}", join_ids(.members))]
    Cycle { members: Vec<SpecId> },
}

/// A reference with no unique target in the batch or prior index
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReferenceError {
    #[error("{item}: '{field}' reference \"{reference}\" does not match any declared class")]
    Missing {
        item: SpecId,
        field: ReferenceField,
        reference: String,
    },

    #[error("{item}: '{field}' reference \"{reference}\" is ambiguous ({})", join_candidates(.candidates))]
    Ambiguous {
        item: SpecId,
        field: ReferenceField,
        reference: String,
        candidates: Vec<String>,
    },
}

impl UnresolvedReferenceError {
    /// The literal reference string that failed to resolve
    pub fn reference(&self) -> &str {
        match self {
            UnresolvedReferenceError::Missing { reference, .. }
            | UnresolvedReferenceError::Ambiguous { reference, .. } => reference,
        }
    }
}

/// Every reason a batch was rejected before emission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchRejection {
    pub validation: Vec<ValidationError>,
    pub violations: Vec<LayerViolationError>,
    pub unresolved: Vec<UnresolvedReferenceError>,
}

impl BatchRejection {
    pub fn is_empty(&self) -> bool {
        self.validation.is_empty() && self.violations.is_empty() && self.unresolved.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.validation.len() + self.violations.len() + self.unresolved.len()
    }

    /// Multi-line report listing every problem
    pub fn report(&self) -> String {
        let mut lines = vec![format!(
            "batch rejected with {} error(s); nothing was written",
            self.error_count()
        )];
        lines.extend(self.validation.iter().map(|e| format!("  validation: {}", e)));
        lines.extend(self.violations.iter().map(|e| format!("  layer: {}", e)));
        lines.extend(self.unresolved.iter().map(|e| format!("  unresolved: {}", e)));
        lines.join("\n")
    }

    /// Returns `Ok(())` when nothing was collected
    pub fn into_result(self) -> Result<(), BatchRejection> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for BatchRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report())
    }
}

impl std::error::Error for BatchRejection {}

/// Rendering or writing an artifact failed
#[derive(Error, Debug)]
#[error("failed to emit {path} for {owner}: {cause}{}", rollback_suffix(.rollback_failures))]
pub struct EmitError {
    pub owner: SpecId,
    pub path: String,
    pub cause: EmitCause,
    /// Undo steps that could not be applied (empty when rollback was clean)
    pub rollback_failures: Vec<String>,
}

/// Underlying cause of an [`EmitError`]
#[derive(Error, Debug)]
pub enum EmitCause {
    #[error("render failed: {0}")]
    Render(String),
    #[error(transparent)]
    Fs(#[from] FsError),
}

/// The metadata document does not line up with the emitted artifacts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotateError {
    #[error("metadata document must be a JSON array")]
    NotAnArray,
    #[error("artifact owner {owner} points past the end of the document")]
    IndexOutOfRange { owner: SpecId },
    #[error("item #{index} no longer matches {owner}")]
    IdentityMismatch { index: usize, owner: SpecId },
}

fn identity_suffix(layer: &Option<String>, class_name: &Option<String>) -> String {
    match (layer, class_name) {
        (Some(layer), Some(name)) => format!(" ({}:{})", layer, name),
        (None, Some(name)) => format!(" ({})", name),
        (Some(layer), None) => format!(" ({})", layer),
        (None, None) => String::new(),
    }
}

fn join_problems(problems: &[FieldProblem]) -> String {
    problems
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| format!("#{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_ids(ids: &[SpecId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn join_candidates(candidates: &[String]) -> String {
    candidates.join(", ")
}

fn join_layers(item: &SpecId) -> String {
    item.layer
        .allowed_targets()
        .iter()
        .map(|k| k.tag())
        .collect::<Vec<_>>()
        .join(", ")
}

fn rollback_suffix(failures: &[String]) -> String {
    if failures.is_empty() {
        String::new()
    } else {
        format!(" (rollback incomplete: {})", failures.join("; "))
    }
}
