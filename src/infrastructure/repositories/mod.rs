//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod prior_index;
mod spec_document;

pub use prior_index::JsonPriorIndexRepository;
pub use spec_document::JsonSpecDocumentRepository;
