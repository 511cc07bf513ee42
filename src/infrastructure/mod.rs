//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system with atomic writes
//! - `repositories/` - Spec document and prior index stores (JSON)
//! - `render/` - Skeleton renderer
//! - `events/` - NDJSON and console event sinks
//! - `config/` - Layered TOML configuration
//! - `lock` - Single-writer guard for `generate`

pub mod config;
pub mod events;
pub mod fs;
pub mod lock;
pub mod render;
pub mod repositories;

// Re-export for convenience
pub use config::TomlConfigRepository;
pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::LocalFs;
pub use lock::{LockFile, RunLock};
pub use render::SkeletonRenderer;
pub use repositories::{JsonPriorIndexRepository, JsonSpecDocumentRepository};
