//! Diff Use Case
//!
//! Orchestrates the diff flow:
//! 1. Load the spec document and prior index
//! 2. Validate, check and resolve the batch
//! 3. Render every artifact
//! 4. Compare each rendered file with the target tree
//!
//! This is a dry run of the generate use case that also shows content.

use std::path::PathBuf;

use crate::application::emitter::Emitter;
use crate::application::pipeline::{document_items, load_inputs, BatchPipeline};
use crate::application::selection::Selection;
use crate::domain::ports::{FileSystem, PriorIndexRepository, Renderer, SpecDocumentRepository};
use crate::domain::services::{ArtifactDiff, DiffStatus, Differ, PathDeriver};
use crate::error::LayerwrightResult;

/// Options for the diff operation
#[derive(Debug, Clone)]
pub struct DiffOptions {
    pub spec_path: PathBuf,
    pub prior: Option<PathBuf>,
    pub selection: Selection,
    /// Lines of context around each hunk
    pub context: usize,
}

impl DiffOptions {
    pub fn new(spec_path: impl Into<PathBuf>) -> Self {
        Self {
            spec_path: spec_path.into(),
            prior: None,
            selection: Selection::all(),
            context: 3,
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

    pub fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }
}

/// Result of the diff operation
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    /// One entry per rendered file, in batch order
    pub entries: Vec<ArtifactDiff>,
}

impl DiffResult {
    pub fn has_changes(&self) -> bool {
        self.entries.iter().any(ArtifactDiff::has_changes)
    }

    pub fn count(&self, status: DiffStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    /// Entries that would change the tree
    pub fn changed(&self) -> impl Iterator<Item = &ArtifactDiff> {
        self.entries.iter().filter(|e| e.has_changes())
    }
}

/// Diff Use Case
///
/// Uses the same dependency injection pattern as `GenerateUseCase`.
pub struct DiffUseCase<DR, PR, FS, R>
where
    DR: SpecDocumentRepository,
    PR: PriorIndexRepository,
    FS: FileSystem,
    R: Renderer,
{
    documents: DR,
    priors: PR,
    file_system: FS,
    renderer: R,
    deriver: PathDeriver,
    emitter: Emitter,
}

impl<DR, PR, FS, R> DiffUseCase<DR, PR, FS, R>
where
    DR: SpecDocumentRepository,
    PR: PriorIndexRepository,
    FS: FileSystem,
    R: Renderer,
{
    pub fn new(
        documents: DR,
        priors: PR,
        file_system: FS,
        renderer: R,
        deriver: PathDeriver,
        emitter: Emitter,
    ) -> Self {
        Self {
            documents,
            priors,
            file_system,
            renderer,
            deriver,
            emitter,
        }
    }

    /// Returns what would change without making any modifications.
    pub fn execute(&self, options: &DiffOptions) -> LayerwrightResult<DiffResult> {
        let (document, prior) = load_inputs(
            &self.documents,
            &self.priors,
            &options.spec_path,
            options.prior.as_deref(),
        )?;
        let prepared = BatchPipeline::new(&self.deriver).prepare(
            document_items(&document),
            &options.selection,
            &prior,
        )?;
        let staged = self.emitter.stage(&prepared.batch, &self.renderer)?;

        let differ = Differ::new().with_context(options.context);
        let entries = staged
            .files
            .iter()
            .map(|file| {
                let current = self
                    .file_system
                    .read(&self.emitter.target_path(&file.path))
                    .ok();
                differ.compare(&file.path, current.as_deref(), &file.content)
            })
            .collect();

        Ok(DiffResult { entries })
    }
}
