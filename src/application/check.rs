//! Check Use Case
//!
//! Runs validation, direction checking and resolution over a spec document
//! without rendering or writing anything.

use std::path::PathBuf;

use crate::application::pipeline::{document_items, load_inputs, BatchPipeline};
use crate::application::selection::Selection;
use crate::domain::entities::SpecId;
use crate::domain::ports::{PriorIndexRepository, SpecDocumentRepository};
use crate::domain::services::PathDeriver;
use crate::error::{BatchRejection, LayerwrightResult};

/// Options for the check operation
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub spec_path: PathBuf,
    pub prior: Option<PathBuf>,
    pub selection: Selection,
}

impl CheckOptions {
    pub fn new(spec_path: impl Into<PathBuf>) -> Self {
        Self {
            spec_path: spec_path.into(),
            prior: None,
            selection: Selection::all(),
        }
    }

    pub fn with_prior(mut self, prior: Option<PathBuf>) -> Self {
        self.prior = prior;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }
}

/// Result of the check operation
#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    /// Items in the document
    pub item_count: usize,
    /// Items that passed every stage (empty when rejected)
    pub accepted: Vec<SpecId>,
    /// Every problem found, if any
    pub rejection: Option<BatchRejection>,
}

impl CheckResult {
    pub fn is_success(&self) -> bool {
        self.rejection.is_none()
    }

    pub fn error_count(&self) -> usize {
        self.rejection.as_ref().map_or(0, BatchRejection::error_count)
    }
}

/// Check Use Case
///
/// A rejected batch is a successful check with findings, not an `Err`.
/// `Err` is reserved for documents that cannot be loaded at all.
pub struct CheckUseCase<DR, PR>
where
    DR: SpecDocumentRepository,
    PR: PriorIndexRepository,
{
    documents: DR,
    priors: PR,
    deriver: PathDeriver,
}

impl<DR, PR> CheckUseCase<DR, PR>
where
    DR: SpecDocumentRepository,
    PR: PriorIndexRepository,
{
    pub fn new(documents: DR, priors: PR, deriver: PathDeriver) -> Self {
        Self {
            documents,
            priors,
            deriver,
        }
    }

    pub fn execute(&self, options: &CheckOptions) -> LayerwrightResult<CheckResult> {
        let (document, prior) = load_inputs(
            &self.documents,
            &self.priors,
            &options.spec_path,
            options.prior.as_deref(),
        )?;
        let items = document_items(&document);

        let outcome = BatchPipeline::new(&self.deriver).prepare(items, &options.selection, &prior);
        Ok(match outcome {
            Ok(prepared) => CheckResult {
                item_count: items.len(),
                accepted: prepared.batch.specs().map(|spec| spec.id()).collect(),
                rejection: None,
            },
            Err(rejection) => CheckResult {
                item_count: items.len(),
                accepted: Vec::new(),
                rejection: Some(rejection),
            },
        })
    }
}
