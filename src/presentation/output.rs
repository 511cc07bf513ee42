//! Output Rendering
//!
//! Text views for each command plus the JSON envelopes used with `--json`.
//! Views return strings so commands decide where they go.

use std::io::{self, Write};
use std::path::Path;

use serde_json::{json, Value};

use crate::application::{CheckResult, DiffResult, GenerateResult};
use crate::domain::services::{Derivation, DiffStatus};
use crate::error::BatchRejection;

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    write: &'static str,
    skip: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            write: "→",
            skip: "○",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            write: "->",
            skip: "[ ]",
        }
    }
}

/// Human-readable renderer
#[derive(Debug, Clone, Copy)]
pub struct TextOutput {
    /// Whether to use unicode icons
    pub unicode: bool,
    /// Verbosity level
    pub verbose: u8,
}

impl Default for TextOutput {
    fn default() -> Self {
        Self {
            unicode: true,
            verbose: 0,
        }
    }
}

impl TextOutput {
    pub fn new(unicode: bool, verbose: u8) -> Self {
        Self { unicode, verbose }
    }

    fn icons(&self) -> Icons {
        if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        }
    }

    pub fn generate(&self, result: &GenerateResult, spec: &Path, metadata: &Path) -> String {
        let icons = self.icons();
        let mut out = String::new();

        let title = if result.dry_run {
            "Dry Run"
        } else if result.has_changes() {
            "Generate Complete"
        } else {
            "Already Up-to-date"
        };
        out.push_str(&format!("{} {}\n\n", icons.check, title));
        out.push_str(&format!("  Spec: {}\n", spec.display()));
        out.push_str(&format!(
            "  {} items → {} files\n",
            result.artifacts.len(),
            result.written.len() + result.unchanged.len()
        ));
        if result.unselected > 0 {
            out.push_str(&format!("  {} items not selected\n", result.unselected));
        }

        if !result.written.is_empty() {
            let label = if result.dry_run { "Would write" } else { "Written" };
            out.push_str(&format!("\n  {} ({}):\n", label, result.written.len()));
            for path in &result.written {
                out.push_str(&format!("    {} {}\n", icons.write, path));
            }
        }

        if !result.unchanged.is_empty() {
            if self.verbose > 0 {
                out.push_str(&format!("\n  Unchanged ({}):\n", result.unchanged.len()));
                for path in &result.unchanged {
                    out.push_str(&format!("    {} {}\n", icons.skip, path));
                }
            } else {
                out.push_str(&format!("\n  {} files already up-to-date\n", result.unchanged.len()));
            }
        }

        if result.metadata_written {
            let verb = if result.dry_run { "Would update" } else { "Updated" };
            out.push_str(&format!("\n  {} {}\n", verb, metadata.display()));
        }
        out
    }

    pub fn rejection(&self, rejection: &BatchRejection) -> String {
        format!("{} {}\n", self.icons().cross, rejection.report())
    }

    pub fn check(&self, result: &CheckResult, spec: &Path) -> String {
        let icons = self.icons();
        match &result.rejection {
            Some(rejection) => self.rejection(rejection),
            None => {
                let mut out = format!(
                    "{} {} items valid in {}\n",
                    icons.check,
                    result.accepted.len(),
                    spec.display()
                );
                if self.verbose > 0 {
                    for id in &result.accepted {
                        out.push_str(&format!("    {} {}\n", icons.check, id));
                    }
                }
                out
            }
        }
    }

    pub fn diff(&self, result: &DiffResult) -> String {
        let icons = self.icons();
        if !result.has_changes() {
            return format!(
                "{} No changes ({} files up-to-date)\n",
                icons.check,
                result.entries.len()
            );
        }

        let mut out = String::new();
        for entry in result.changed() {
            out.push_str(&format!(
                "{} {} [{}] ({})\n",
                icons.write,
                entry.path,
                entry.status.as_str(),
                entry.summary()
            ));
            out.push_str(&entry.unified);
            if !entry.unified.ends_with('\n') {
                out.push('\n');
            }
        }
        out.push_str(&format!(
            "\n{} new, {} changed, {} unchanged\n",
            result.count(DiffStatus::New),
            result.count(DiffStatus::Changed),
            result.count(DiffStatus::Unchanged)
        ));
        out
    }

    pub fn paths(&self, derivation: &Derivation, register_path: Option<&str>) -> String {
        let mut out = format!("identifier:    {}\n", derivation.identifier);
        out.push_str(&format!("code_path:     {}\n", derivation.file_path));
        out.push_str(&format!(
            "test_path:     {}\n",
            derivation.test_path.as_deref().unwrap_or("-")
        ));
        if let Some(register) = register_path {
            out.push_str(&format!("register_path: {}\n", register));
        }
        out
    }
}

/// `error` event for a rejected batch
pub fn rejection_json(command: &str, rejection: &BatchRejection) -> Value {
    json!({
        "event": "error",
        "command": command,
        "kind": "rejected",
        "error_count": rejection.error_count(),
        "message": rejection.report(),
    })
}

/// `error` event for any other failure
pub fn error_json(command: &str, message: &str) -> Value {
    json!({
        "event": "error",
        "command": command,
        "message": message,
    })
}

pub fn check_json(result: &CheckResult) -> Value {
    json!({
        "event": "complete",
        "command": "check",
        "status": if result.is_success() { "success" } else { "rejected" },
        "item_count": result.item_count,
        "accepted": result.accepted.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
        "error_count": result.error_count(),
    })
}

pub fn diff_json(result: &DiffResult) -> Value {
    let entries: Vec<Value> = result
        .entries
        .iter()
        .map(|entry| {
            json!({
                "path": entry.path,
                "status": entry.status.as_str(),
                "additions": entry.additions,
                "deletions": entry.deletions,
                "diff": entry.unified,
            })
        })
        .collect();
    json!({
        "event": "data",
        "command": "diff",
        "has_changes": result.has_changes(),
        "entries": entries,
    })
}

pub fn paths_json(derivation: &Derivation, register_path: Option<&str>) -> Value {
    json!({
        "event": "data",
        "command": "paths",
        "identifier": derivation.identifier,
        "code_path": derivation.file_path,
        "test_path": derivation.test_path,
        "register_path": register_path,
    })
}

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &Value) -> io::Result<()> {
    let line = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Convenience helper that writes to stdout.
pub fn emit(event: Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)
}
