//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod class_name;
mod hash;
mod layer_kind;
mod raw_url;

pub use class_name::ClassName;
pub use hash::ContentHash;
pub use layer_kind::{LayerKind, TestCategory, Tier};
pub use raw_url::RawUrlTemplate;
