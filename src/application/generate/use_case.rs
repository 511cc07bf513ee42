//! Generate Use Case
//!
//! Orchestrates one generation run:
//! 1. Load the spec document and the prior index
//! 2. Validate, direction-check and resolve the selected batch
//! 3. Stage (render) every artifact and annotate the document in memory
//! 4. Commit the files all-or-nothing
//! 5. Save the document if it changed
//!
//! Rejections and emit failures leave the target tree and the document
//! exactly as they were.

use std::sync::Arc;

use crate::application::emitter::Emitter;
use crate::application::pipeline::{document_items, load_inputs, BatchPipeline};
use crate::domain::ports::{
    FileSystem, GenerateEvent, GenerateEventSink, NoopEventSink, PriorIndexRepository, Renderer,
    SpecDocumentRepository,
};
use crate::domain::services::{annotate, PathDeriver};
use crate::error::{LayerwrightError, LayerwrightResult};

use super::options::GenerateOptions;
use super::result::GenerateResult;

/// Generate use case, parameterized by its ports
pub struct GenerateUseCase<DR, PR, FS, R>
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

impl<DR, PR, FS, R> GenerateUseCase<DR, PR, FS, R>
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

    /// Execute without event reporting
    pub fn execute(&self, options: &GenerateOptions) -> LayerwrightResult<GenerateResult> {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute, reporting progress to `events`
    pub fn execute_with_events(
        &self,
        options: &GenerateOptions,
        events: Arc<dyn GenerateEventSink>,
    ) -> LayerwrightResult<GenerateResult> {
        let (document, prior) = load_inputs(
            &self.documents,
            &self.priors,
            &options.spec_path,
            options.prior.as_deref(),
        )?;
        let items = document_items(&document);

        events.on_event(GenerateEvent::Started {
            source: options.spec_path.display().to_string(),
            item_count: items.len(),
        });

        let prepared = match BatchPipeline::new(&self.deriver).prepare(
            items,
            &options.selection,
            &prior,
        ) {
            Ok(prepared) => prepared,
            Err(rejection) => {
                events.on_event(GenerateEvent::Rejected {
                    error_count: rejection.error_count(),
                    report: rejection.report(),
                });
                return Err(rejection.into());
            }
        };

        if events.wants_detailed_events() {
            for spec in prepared.batch.specs() {
                events.on_event(GenerateEvent::ItemValidated {
                    index: spec.index,
                    identity: spec.id().logical_name(),
                });
            }
        }

        let staged = self.emitter.stage(&prepared.batch, &self.renderer)?;
        // Annotation can still refuse the document; do it before any write
        let updated = annotate(&document, &staged.artifacts)?;

        let report = if options.dry_run {
            self.emitter.preview(&self.file_system, &staged)
        } else {
            self.emitter
                .commit(&self.file_system, &staged, events.as_ref())?
        };

        let metadata_written = !options.dry_run && self.save_if_changed(options, &document, &updated)?;

        events.on_event(GenerateEvent::Completed {
            written: report.written.len(),
            unchanged: report.unchanged.len(),
            dry_run: options.dry_run,
        });

        Ok(GenerateResult {
            artifacts: staged.artifacts,
            written: report.written,
            unchanged: report.unchanged,
            unselected: prepared.unselected,
            document: updated,
            metadata_written,
            dry_run: options.dry_run,
        })
    }

    fn save_if_changed(
        &self,
        options: &GenerateOptions,
        original: &serde_json::Value,
        updated: &serde_json::Value,
    ) -> LayerwrightResult<bool> {
        let output = options.output_path();
        let unchanged = if output == options.spec_path.as_path() {
            original == updated
        } else {
            self.documents
                .load(output)
                .is_ok_and(|existing| &existing == updated)
        };
        if unchanged {
            return Ok(false);
        }

        self.documents
            .save(output, updated)
            .map_err(|e| LayerwrightError::Document {
                path: output.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(true)
    }
}
