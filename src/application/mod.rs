//! Application Layer
//!
//! Use cases that orchestrate the generation flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `GenerateUseCase` - validate, resolve, emit and annotate a batch
//! - `CheckUseCase` - validate, direction-check and resolve only
//! - `DiffUseCase` - render and compare against the target tree
//!
//! ## Services
//!
//! - `BatchPipeline` - the pre-emission stages shared by every use case
//! - `Emitter` - staged, journaled, all-or-nothing artifact writes

pub mod check;
pub mod diff;
pub mod emitter;
pub mod generate;
pub mod pipeline;
pub mod selection;

#[cfg(test)]
pub(crate) mod testing;

pub use check::{CheckOptions, CheckResult, CheckUseCase};
pub use diff::{DiffOptions, DiffResult, DiffUseCase};
pub use emitter::{CommitReport, Emitter, StagedBatch};
pub use generate::{GenerateOptions, GenerateResult, GenerateUseCase};
pub use pipeline::{BatchPipeline, PreparedBatch};
pub use selection::Selection;
