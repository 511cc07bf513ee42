//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose) are inherited by all subcommands
//! - Batch selection (--layer, --only) and prior index flags are shared by
//!   `generate`, `check` and `diff`

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::value_objects::LayerKind;

/// Layerwright - declarative layered code generator
#[derive(Parser, Debug)]
#[command(name = "layerwright")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which spec document and which of its items form the batch
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Spec document (JSON array of class specs)
    #[arg(value_name = "SPEC")]
    pub spec: PathBuf,

    /// Prior index: an earlier metadata document or a plain index file
    #[arg(long, value_name = "FILE")]
    pub prior: Option<PathBuf>,

    /// Only items of this layer (can be specified multiple times)
    #[arg(long = "layer", value_name = "TAG")]
    pub layers: Vec<LayerKind>,

    /// Only items with this class name (can be specified multiple times)
    #[arg(long = "only", value_name = "NAME")]
    pub only: Vec<String>,
}

/// Where artifacts go and how their paths are derived
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Target project root
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Source root inside the target (overrides config)
    #[arg(long, value_name = "DIR")]
    pub source_root: Option<String>,

    /// Test root inside the target (overrides config)
    #[arg(long, value_name = "DIR")]
    pub test_root: Option<String>,

    /// Raw URL template with {path} and optional {repo} (overrides config)
    #[arg(long, value_name = "URL")]
    pub raw_template: Option<String>,

    /// Repository substituted into {repo} (overrides config)
    #[arg(long)]
    pub repo: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate, resolve and emit a spec batch, then annotate the document
    Generate {
        #[command(flatten)]
        batch: BatchArgs,

        #[command(flatten)]
        target: TargetArgs,

        /// Write the annotated document here instead of back to SPEC
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate, direction-check and resolve only (exits non-zero on findings)
    Check {
        #[command(flatten)]
        batch: BatchArgs,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Preview changes without writing
    Diff {
        #[command(flatten)]
        batch: BatchArgs,

        #[command(flatten)]
        target: TargetArgs,

        /// Lines of context around each change
        #[arg(long, default_value_t = 3)]
        context: usize,
    },

    /// Print the identifier and paths derived for a class
    Paths {
        /// Layer tag (e.g. domain.entity)
        layer: LayerKind,

        /// Class name
        class_name: String,

        /// File stem override
        #[arg(long, value_name = "NAME")]
        base_name: Option<String>,

        #[command(flatten)]
        target: TargetArgs,
    },
}

impl Commands {
    /// Subcommand name, as used in JSON events
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Generate { .. } => "generate",
            Commands::Check { .. } => "check",
            Commands::Diff { .. } => "diff",
            Commands::Paths { .. } => "paths",
        }
    }
}
