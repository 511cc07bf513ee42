//! Differ Domain Service
//!
//! Compares a rendered artifact with what is currently on disk, for the
//! `diff` preview. Nothing here touches the filesystem.

use similar::{ChangeTag, TextDiff};

/// How a rendered artifact relates to the file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffStatus {
    /// No file at the path yet
    New,
    /// File exists with different content
    Changed,
    /// File exists with identical content
    Unchanged,
}

impl DiffStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffStatus::New => "new",
            DiffStatus::Changed => "changed",
            DiffStatus::Unchanged => "unchanged",
        }
    }
}

/// Comparison of one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDiff {
    pub path: String,
    pub status: DiffStatus,
    pub additions: usize,
    pub deletions: usize,
    /// Unified diff text (empty when unchanged)
    pub unified: String,
}

impl ArtifactDiff {
    pub fn has_changes(&self) -> bool {
        self.status != DiffStatus::Unchanged
    }

    /// e.g. "+5, -3"
    pub fn summary(&self) -> String {
        format!("+{}, -{}", self.additions, self.deletions)
    }
}

/// Differ service for artifact previews
#[derive(Debug, Clone, Copy)]
pub struct Differ {
    context: usize,
}

impl Default for Differ {
    fn default() -> Self {
        Self { context: 3 }
    }
}

impl Differ {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines of context around each hunk
    pub fn with_context(mut self, context: usize) -> Self {
        self.context = context;
        self
    }

    /// Compare `rendered` against the `current` content of `path`
    pub fn compare(&self, path: &str, current: Option<&str>, rendered: &str) -> ArtifactDiff {
        let old = current.unwrap_or("");
        let status = match current {
            None => DiffStatus::New,
            Some(existing) if existing == rendered => DiffStatus::Unchanged,
            Some(_) => DiffStatus::Changed,
        };

        if status == DiffStatus::Unchanged {
            return ArtifactDiff {
                path: path.to_string(),
                status,
                additions: 0,
                deletions: 0,
                unified: String::new(),
            };
        }

        let text_diff = TextDiff::from_lines(old, rendered);
        let (mut additions, mut deletions) = (0, 0);
        for change in text_diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => additions += 1,
                ChangeTag::Delete => deletions += 1,
                ChangeTag::Equal => {}
            }
        }

        let old_header = match status {
            DiffStatus::New => "/dev/null".to_string(),
            _ => format!("a/{}", path),
        };
        let unified = text_diff
            .unified_diff()
            .context_radius(self.context)
            .header(&old_header, &format!("b/{}", path))
            .to_string();

        ArtifactDiff {
            path: path.to_string(),
            status,
            additions,
            deletions,
            unified,
        }
    }
}
