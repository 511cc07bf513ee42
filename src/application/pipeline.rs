//! Batch pipeline
//!
//! Validation, direction checking and resolution, shared by `generate`,
//! `check` and `diff`. Every stage runs even when an earlier one failed, so
//! the rejection lists everything wrong with the batch.

use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;

use crate::domain::entities::{split_reference, PriorIndex, ResolvedBatch};
use crate::domain::ports::{PriorIndexRepository, SpecDocumentRepository};
use crate::domain::services::{
    check_batch, resolve, suppress_covered, PathDeriver, SpecValidator, SymbolTable,
};
use crate::error::{BatchRejection, LayerwrightError, UnresolvedReferenceError};

use super::selection::Selection;

/// Validated, checked and resolved batch plus the document it came from
#[derive(Debug, Clone)]
pub struct PreparedBatch {
    pub batch: ResolvedBatch,
    /// Number of document items not selected into the batch
    pub unselected: usize,
}

pub struct BatchPipeline<'a> {
    deriver: &'a PathDeriver,
}

impl<'a> BatchPipeline<'a> {
    pub fn new(deriver: &'a PathDeriver) -> Self {
        Self { deriver }
    }

    /// Run every pre-emission stage over the selected items of `items`
    pub fn prepare(
        &self,
        items: &[Value],
        selection: &Selection,
        prior: &PriorIndex,
    ) -> Result<PreparedBatch, BatchRejection> {
        let (selected, unselected_prior) = selection.split(items);
        let unselected = items.len() - selected.len();

        let (specs, validation) = SpecValidator::new(self.deriver).validate_batch(&selected);

        // Names of items that failed validation; references to them are not
        // reported a second time as unresolved.
        let valid: HashSet<usize> = specs.iter().map(|s| s.index).collect();
        let rejected_names: HashSet<&str> = selected
            .iter()
            .filter(|(index, _)| !valid.contains(index))
            .filter_map(|(_, item)| item.get("class_name").and_then(Value::as_str))
            .collect();

        let mut scope = prior.clone();
        scope.extend(unselected_prior);
        let table = SymbolTable::build(&specs, &scope, self.deriver);

        let violations = check_batch(&specs, &table);
        let resolved = resolve(specs, &table);

        let (batch, unresolved) = match resolved {
            Ok(batch) => (Some(batch), Vec::new()),
            Err(errors) => (None, errors),
        };
        let unresolved: Vec<UnresolvedReferenceError> = suppress_covered(unresolved, &violations)
            .into_iter()
            .filter(|err| {
                !matches!(err, UnresolvedReferenceError::Missing { .. })
                    || !rejected_names.contains(split_reference(err.reference()).1)
            })
            .collect();

        let rejection = BatchRejection {
            validation,
            violations,
            unresolved,
        };

        match batch {
            Some(batch) if rejection.is_empty() => Ok(PreparedBatch { batch, unselected }),
            _ => Err(rejection),
        }
    }
}

/// Load the spec document items and the caller-supplied prior index
pub fn load_inputs<DR, PR>(
    documents: &DR,
    priors: &PR,
    spec_path: &Path,
    prior_path: Option<&Path>,
) -> Result<(Value, PriorIndex), LayerwrightError>
where
    DR: SpecDocumentRepository,
    PR: PriorIndexRepository,
{
    let document = documents
        .load(spec_path)
        .map_err(|e| LayerwrightError::Document {
            path: spec_path.to_path_buf(),
            message: e.to_string(),
        })?;

    let prior = match prior_path {
        Some(path) => priors.load(path).map_err(|e| LayerwrightError::PriorIndex {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
        None => PriorIndex::new(),
    };

    Ok((document, prior))
}

/// Items of a loaded document (the repository guarantees an array)
pub fn document_items(document: &Value) -> &[Value] {
    document.as_array().map(Vec::as_slice).unwrap_or(&[])
}
