//! Test environment for isolated layerwright runs.
//!
//! Every `TestEnv` owns a temp project directory and a temp config
//! directory, so neither the developer's user config nor `LAYERWRIGHT_*`
//! variables leak into a test.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::SystemTime;

use serde_json::Value;
use tempfile::TempDir;

/// Result of running a layerwright CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Check if command succeeded
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON
    pub fn events(&self) -> Vec<Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l)
                    .unwrap_or_else(|e| panic!("stdout line is not JSON ({e}): {l}"))
            })
            .collect()
    }
}

const OVERRIDE_VARS: [&str; 5] = [
    "LAYERWRIGHT_SOURCE_ROOT",
    "LAYERWRIGHT_TEST_ROOT",
    "LAYERWRIGHT_EXTENSION",
    "LAYERWRIGHT_RAW_TEMPLATE",
    "LAYERWRIGHT_REPO",
];

/// Isolated test environment
pub struct TestEnv {
    /// Temporary directory for the target project
    pub project_root: TempDir,
    /// Temporary directory standing in for HOME / XDG_CONFIG_HOME
    pub config_home: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("Failed to create project dir"),
            config_home: TempDir::new().expect("Failed to create config dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_layerwright")),
        }
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Run layerwright from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run layerwright from the project root with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("HOME", self.config_home.path())
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env("TERM", "dumb");
        for var in OVERRIDE_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute layerwright");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Write a spec document (pretty JSON) to the project directory
    pub fn write_spec(&self, relative_path: &str, document: &Value) {
        let mut text = serde_json::to_string_pretty(document).expect("spec serializes");
        text.push('\n');
        self.write_project_file(relative_path, &text);
    }

    pub fn read(&self, relative_path: &str) -> String {
        std::fs::read_to_string(self.project_path(relative_path))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
    }

    pub fn read_json(&self, relative_path: &str) -> Value {
        serde_json::from_str(&self.read(relative_path))
            .unwrap_or_else(|e| panic!("{} is not JSON: {}", relative_path, e))
    }

    /// Every file under the project root with its content and mtime,
    /// ignoring lock files
    pub fn tree(&self) -> Vec<(String, String, SystemTime)> {
        let mut files = Vec::new();
        collect(self.project_root.path(), self.project_root.path(), &mut files);
        files.retain(|(path, _, _)| !path.ends_with(".lock"));
        files.sort_by(|a, b| a.0.cmp(&b.0));
        files
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<(String, String, SystemTime)>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(root, &path, out);
        } else {
            let relative = path
                .strip_prefix(root)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/");
            let content = std::fs::read_to_string(&path).unwrap_or_default();
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            out.push((relative, content, modified));
        }
    }
}
