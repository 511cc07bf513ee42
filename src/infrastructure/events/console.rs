//! Console Event Sink
//!
//! Human-readable progress lines on stderr. Verbosity decides how much is
//! shown: rollbacks always, files at `-v`, validated items at `-vv`.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{GenerateEvent, GenerateEventSink};

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    verbose: u8,
}

impl ConsoleEventSink {
    pub fn stderr(verbose: u8) -> Self {
        Self::with_writer(io::stderr(), verbose)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, verbose: u8) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            verbose,
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
        }
    }

    fn format(&self, event: GenerateEvent) -> Option<String> {
        match event {
            GenerateEvent::RolledBack { path, error } => {
                Some(format!("  ! rolled back {} ({})", path, error))
            }
            GenerateEvent::Started { source, item_count } if self.verbose >= 1 => {
                Some(format!("Generating from {} ({} items)", source, item_count))
            }
            GenerateEvent::ArtifactWritten { path, .. } if self.verbose >= 1 => {
                Some(format!("  -> {}", path))
            }
            GenerateEvent::ArtifactUnchanged { path, .. } if self.verbose >= 1 => {
                Some(format!("  =  {}", path))
            }
            GenerateEvent::ItemValidated { index, identity } if self.verbose >= 2 => {
                Some(format!("  ok #{} {}", index, identity))
            }
            _ => None,
        }
    }
}

impl GenerateEventSink for ConsoleEventSink {
    fn on_event(&self, event: GenerateEvent) {
        if let Some(text) = self.format(event) {
            self.line(text);
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose >= 1
    }
}
