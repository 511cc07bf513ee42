//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod events;
pub mod file_system;
pub mod prior_index_repository;
pub mod renderer;
pub mod spec_document_repository;

pub use events::{GenerateEvent, GenerateEventSink, NoopEventSink};
pub use file_system::{FileSystem, FsError, FsResult};
pub use prior_index_repository::{PriorIndexError, PriorIndexRepository};
pub use renderer::{RenderError, RenderInput, Renderer};
pub use spec_document_repository::{DocumentError, SpecDocumentRepository};
