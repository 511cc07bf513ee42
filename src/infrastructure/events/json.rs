//! JSON Event Sink
//!
//! Outputs generate events as NDJSON for CI/automation consumption.

use crate::domain::ports::{GenerateEvent, GenerateEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Serializes concurrent writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON form of an event
pub fn event_json(event: &GenerateEvent) -> serde_json::Value {
    match event {
        GenerateEvent::Started { source, item_count } => serde_json::json!({
            "event": "start",
            "command": "generate",
            "source": source,
            "item_count": item_count,
        }),

        GenerateEvent::ItemValidated { index, identity } => serde_json::json!({
            "event": "item_validated",
            "command": "generate",
            "index": index,
            "identity": identity,
        }),

        GenerateEvent::Rejected {
            error_count,
            report,
        } => serde_json::json!({
            "event": "error",
            "command": "generate",
            "kind": "rejected",
            "error_count": error_count,
            "message": report,
        }),

        GenerateEvent::ArtifactWritten { owner, path } => serde_json::json!({
            "event": "item_written",
            "command": "generate",
            "owner": owner,
            "path": path,
        }),

        GenerateEvent::ArtifactUnchanged { owner, path } => serde_json::json!({
            "event": "item_skipped",
            "command": "generate",
            "owner": owner,
            "path": path,
            "reason": "unchanged",
        }),

        GenerateEvent::RolledBack { path, error } => serde_json::json!({
            "event": "rolled_back",
            "command": "generate",
            "path": path,
            "error": error,
        }),

        GenerateEvent::Completed {
            written,
            unchanged,
            dry_run,
        } => serde_json::json!({
            "event": "complete",
            "command": "generate",
            "status": "success",
            "written": written,
            "unchanged": unchanged,
            "dry_run": dry_run,
        }),
    }
}

impl GenerateEventSink for JsonEventSink {
    fn on_event(&self, event: GenerateEvent) {
        self.write_event(event_json(&event));
    }
}
