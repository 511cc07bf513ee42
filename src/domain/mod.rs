//! Domain Layer
//!
//! The core of Layerwright: pure generation logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `value_objects/` - LayerKind, ClassName, ContentHash, RawUrlTemplate
//! - `entities/` - ClassSpec, Artifact, PriorIndex, ResolvedBatch
//! - `services/` - naming, validator, direction checker, resolver, annotator, differ
//! - `ports/` - Interface definitions for infrastructure
//!
//! All I/O goes through the traits in `ports`.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
