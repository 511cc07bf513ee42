//! Generate Event Port
//!
//! Observable interface for generation runs.
//! Enables progress reporting, JSON event streams, and debugging.

/// Event emitted during a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateEvent {
    /// Run started
    Started { source: String, item_count: usize },

    /// An item passed validation and resolution
    ItemValidated { index: usize, identity: String },

    /// The batch was rejected; nothing was written
    Rejected { error_count: usize, report: String },

    /// A file was written
    ArtifactWritten { owner: String, path: String },

    /// A file already had the rendered content
    ArtifactUnchanged { owner: String, path: String },

    /// Emission failed and the target tree was restored
    RolledBack { path: String, error: String },

    /// Run finished
    Completed {
        written: usize,
        unchanged: usize,
        dry_run: bool,
    },
}

/// Trait for receiving generate events
///
/// Implementations:
/// - ConsoleEventSink: human-readable lines on stderr
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait GenerateEventSink: Send + Sync {
    /// Handle an event
    fn on_event(&self, event: GenerateEvent);

    /// Whether this sink wants per-item and per-file events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl GenerateEventSink for NoopEventSink {
    fn on_event(&self, _event: GenerateEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
