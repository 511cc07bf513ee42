//! Generate Options

use std::path::{Path, PathBuf};

use crate::application::selection::Selection;

/// Options for the generate use case
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Spec document to read
    pub spec_path: PathBuf,
    /// Where the annotated document goes (defaults to `spec_path`)
    pub output: Option<PathBuf>,
    /// Prior index from earlier runs
    pub prior: Option<PathBuf>,
    /// Which document items form the batch
    pub selection: Selection,
    /// Render and report, write nothing
    pub dry_run: bool,
}

impl GenerateOptions {
    pub fn new(spec_path: impl Into<PathBuf>) -> Self {
        Self {
            spec_path: spec_path.into(),
            output: None,
            prior: None,
            selection: Selection::all(),
            dry_run: false,
        }
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_prior(mut self, prior: Option<PathBuf>) -> Self {
        self.prior = prior;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Path the metadata document is written to
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.spec_path)
    }
}
