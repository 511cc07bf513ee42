//! Domain Entities
//!
//! - `ClassSpec` - one validated spec item and its references
//! - `Artifact` / `ArtifactFile` - generated locations and rendered files
//! - `PriorIndex` - identities produced by earlier runs
//! - `ResolvedBatch` - a batch whose references all resolved

mod artifact;
mod class_spec;
mod prior_index;
mod resolved;

pub use artifact::{Artifact, ArtifactFile, ArtifactKind};
pub use class_spec::{
    split_reference, Attribute, ClassSpec, Endpoint, Factory, HttpMethod, Payload, Reference,
    ReferenceField, SchemaDef, SpecId,
};
pub use prior_index::{PriorEntry, PriorIndex};
pub use resolved::{Link, ResolvedBatch, ResolvedSpec, Symbol, SymbolOrigin};
