//! Artifact Emitter
//!
//! Two phases with a barrier between them:
//!
//! 1. **Stage** - derive paths and render every file of the batch in memory.
//!    A render failure aborts here, before the target tree is touched.
//! 2. **Commit** - write the staged files, skipping those whose on-disk hash
//!    already matches. Every change is journaled; if any write fails the
//!    journal is replayed backwards so the tree ends up as it was.
//!
//! Only paths owned by items of the batch are ever written. Nothing is
//! deleted except files and directories this commit created itself.

use std::path::{Path, PathBuf};

use crate::domain::entities::{Artifact, ArtifactFile, ArtifactKind, Payload, ResolvedBatch, SpecId};
use crate::domain::ports::{
    FileSystem, FsError, GenerateEvent, GenerateEventSink, RenderInput, Renderer,
};
use crate::domain::services::PathDeriver;
use crate::domain::value_objects::RawUrlTemplate;
use crate::error::{EmitCause, EmitError};

/// Rendered batch, ready to commit
#[derive(Debug, Clone, Default)]
pub struct StagedBatch {
    /// One per spec, in batch order
    pub artifacts: Vec<Artifact>,
    /// Code and test files, in batch order
    pub files: Vec<ArtifactFile>,
}

/// What a commit did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    pub written: Vec<String>,
    pub unchanged: Vec<String>,
}

/// One reversible change made during a commit
#[derive(Debug)]
enum UndoStep {
    Restore { path: PathBuf, content: String },
    RemoveFile(PathBuf),
    RemoveDir(PathBuf),
}

/// Transactional artifact writer rooted at a target directory
#[derive(Debug, Clone)]
pub struct Emitter {
    root: PathBuf,
    deriver: PathDeriver,
    raw_urls: Option<RawUrlTemplate>,
}

impl Emitter {
    pub fn new(root: impl Into<PathBuf>, deriver: PathDeriver) -> Self {
        Self {
            root: root.into(),
            deriver,
            raw_urls: None,
        }
    }

    pub fn with_raw_urls(mut self, template: Option<RawUrlTemplate>) -> Self {
        self.raw_urls = template;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a relative artifact path
    pub fn target_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Render every artifact of the batch without touching the filesystem
    pub fn stage(&self, batch: &ResolvedBatch, renderer: &dyn Renderer) -> Result<StagedBatch, EmitError> {
        let mut staged = StagedBatch::default();

        for item in &batch.items {
            let spec = &item.spec;
            let owner = spec.id();
            let derivation = self
                .deriver
                .derive_spec(spec)
                .map_err(|e| render_failure(&owner, spec.class_name.as_str(), e.to_string()))?;

            let register_path = match &spec.payload {
                Payload::Router { prefix, .. } => {
                    Some(self.deriver.register_path(spec.stem_name(), prefix.as_deref()))
                }
                _ => None,
            };

            let input = RenderInput {
                item,
                identifier: &derivation.identifier,
                code_path: &derivation.file_path,
                test_path: derivation.test_path.as_deref(),
                register_path: register_path.as_deref(),
            };

            let code = renderer
                .render_code(&input)
                .map_err(|e| render_failure(&owner, &derivation.file_path, e.message))?;
            staged.files.push(ArtifactFile::new(
                owner.clone(),
                ArtifactKind::Code,
                derivation.file_path.clone(),
                code,
            ));

            if let Some(test_path) = &derivation.test_path {
                let test = renderer
                    .render_test(&input)
                    .map_err(|e| render_failure(&owner, test_path, e.message))?;
                staged.files.push(ArtifactFile::new(
                    owner.clone(),
                    ArtifactKind::Test,
                    test_path.clone(),
                    test,
                ));
            }

            staged.artifacts.push(Artifact {
                code_raw_url: self.raw_urls.as_ref().map(|t| t.format(&derivation.file_path)),
                test_raw_url: match (&self.raw_urls, &derivation.test_path) {
                    (Some(t), Some(path)) => Some(t.format(path)),
                    _ => None,
                },
                owner,
                code_path: derivation.file_path,
                test_path: derivation.test_path,
                register_path,
            });
        }

        Ok(staged)
    }

    /// Write the staged files all-or-nothing
    pub fn commit<FS: FileSystem>(
        &self,
        fs: &FS,
        staged: &StagedBatch,
        events: &dyn GenerateEventSink,
    ) -> Result<CommitReport, EmitError> {
        let mut journal = Vec::new();
        let mut report = CommitReport::default();

        for file in &staged.files {
            match self.write_one(fs, file, &mut journal) {
                Ok(true) => {
                    if events.wants_detailed_events() {
                        events.on_event(GenerateEvent::ArtifactWritten {
                            owner: file.owner.logical_name(),
                            path: file.path.clone(),
                        });
                    }
                    report.written.push(file.path.clone());
                }
                Ok(false) => {
                    if events.wants_detailed_events() {
                        events.on_event(GenerateEvent::ArtifactUnchanged {
                            owner: file.owner.logical_name(),
                            path: file.path.clone(),
                        });
                    }
                    report.unchanged.push(file.path.clone());
                }
                Err(cause) => {
                    let rollback_failures = rollback(fs, journal);
                    events.on_event(GenerateEvent::RolledBack {
                        path: file.path.clone(),
                        error: cause.to_string(),
                    });
                    return Err(EmitError {
                        owner: file.owner.clone(),
                        path: file.path.clone(),
                        cause: EmitCause::Fs(cause),
                        rollback_failures,
                    });
                }
            }
        }

        Ok(report)
    }

    /// What `commit` would do, without writing
    pub fn preview<FS: FileSystem>(&self, fs: &FS, staged: &StagedBatch) -> CommitReport {
        let mut report = CommitReport::default();
        for file in &staged.files {
            let path = self.target_path(&file.path);
            let unchanged = fs.exists(&path)
                && fs
                    .hash(&path)
                    .is_ok_and(|hash| hash == file.hash().as_str());
            if unchanged {
                report.unchanged.push(file.path.clone());
            } else {
                report.written.push(file.path.clone());
            }
        }
        report
    }

    /// Returns whether the file was written
    fn write_one<FS: FileSystem>(
        &self,
        fs: &FS,
        file: &ArtifactFile,
        journal: &mut Vec<UndoStep>,
    ) -> Result<bool, FsError> {
        let path = self.target_path(&file.path);

        if fs.exists(&path) {
            if fs.hash(&path)? == file.hash().as_str() {
                return Ok(false);
            }
            let previous = fs.read(&path)?;
            fs.write(&path, &file.content)?;
            journal.push(UndoStep::Restore {
                path,
                content: previous,
            });
            return Ok(true);
        }

        if let Some(parent) = path.parent() {
            let mut missing: Vec<PathBuf> = parent
                .ancestors()
                .take_while(|dir| !dir.as_os_str().is_empty() && !fs.exists(dir))
                .map(Path::to_path_buf)
                .collect();
            if !missing.is_empty() {
                fs.create_dir_all(parent)?;
                // Outermost first, so the backwards replay removes the deepest first
                missing.reverse();
                journal.extend(missing.into_iter().map(UndoStep::RemoveDir));
            }
        }

        fs.write(&path, &file.content)?;
        journal.push(UndoStep::RemoveFile(path));
        Ok(true)
    }
}

/// Replay the journal backwards; returns the steps that could not be undone
fn rollback<FS: FileSystem>(fs: &FS, journal: Vec<UndoStep>) -> Vec<String> {
    let mut failures = Vec::new();
    for step in journal.into_iter().rev() {
        let result = match &step {
            UndoStep::Restore { path, content } => fs.write(path, content),
            UndoStep::RemoveFile(path) => fs.remove(path),
            UndoStep::RemoveDir(path) => fs.remove_dir(path),
        };
        if let Err(err) = result {
            failures.push(err.to_string());
        }
    }
    failures
}

fn render_failure(owner: &SpecId, path: &str, message: String) -> EmitError {
    EmitError {
        owner: owner.clone(),
        path: path.to_string(),
        cause: EmitCause::Render(message),
        rollback_failures: Vec::new(),
    }
}

#[cfg(test)]
mod tests;
