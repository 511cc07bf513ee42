//! Layerwright - declarative layered code generator
//!
//! Reads a JSON list of class specs tagged with clean-architecture layers,
//! checks that every cross-reference points in an allowed direction and
//! resolves, emits code and test skeletons all-or-nothing, and writes the
//! derived paths back into the spec document.
//!
//! ## Layers
//!
//! - [`domain`] - value objects, entities, pure services and ports
//! - [`application`] - generate / check / diff use cases and the emitter
//! - [`infrastructure`] - filesystem, JSON repositories, renderer, event sinks
//! - [`presentation`] - CLI definitions, factory and output views

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{CheckUseCase, DiffUseCase, GenerateOptions, GenerateUseCase};
pub use config::Config;
pub use domain::services::{PathConfig, PathDeriver};
pub use domain::value_objects::LayerKind;
pub use error::{LayerwrightError, LayerwrightResult};
