//! Common test utilities for layerwright CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory plus helpers to run the CLI
//! - Assertion macros: `assert_generated!`, `assert_output_contains!`, etc.
//! - Fixtures: Reusable spec documents

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
