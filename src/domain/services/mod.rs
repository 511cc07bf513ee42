//! Domain Services
//!
//! Pure pipeline stages that operate on domain entities.
//! None of them perform I/O.

pub mod annotator;
mod differ;
pub mod direction;
pub mod naming;
pub mod resolver;
mod symbols;
mod validator;

pub use annotator::{annotate, to_pretty_json};
pub use differ::{ArtifactDiff, DiffStatus, Differ};
pub use direction::{check_batch, suppress_covered};
pub use naming::{
    has_interface_prefix, identifier_for, infer_layer, interface_identifier, snake_case,
    Derivation, PathConfig, PathDeriver,
};
pub use resolver::resolve;
pub use symbols::{Lookup, SymbolTable};
pub use validator::{validate, SpecValidator, WRITER_KEYS};
