//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Text views and JSON envelopes
//!
//! ## Usage
//!
//! ```ignore
//! use layerwright::config::Config;
//! use layerwright::presentation::factory;
//!
//! let use_case = factory::create_generate_use_case(&Config::default(), Path::new("."));
//! let result = use_case.execute(&options);
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{BatchArgs, Cli, Commands, TargetArgs};
pub use factory::{create_check_use_case, create_diff_use_case, create_generate_use_case};
pub use output::TextOutput;
