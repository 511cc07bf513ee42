//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;

use crate::application::{CheckUseCase, DiffUseCase, Emitter, GenerateUseCase};
use crate::config::Config;
use crate::domain::services::PathDeriver;
use crate::infrastructure::{
    JsonPriorIndexRepository, JsonSpecDocumentRepository, LocalFs, SkeletonRenderer,
};

/// Type alias for the concrete GenerateUseCase with all dependencies
pub type ConcreteGenerateUseCase =
    GenerateUseCase<JsonSpecDocumentRepository, JsonPriorIndexRepository, LocalFs, SkeletonRenderer>;

/// Type alias for the concrete CheckUseCase with all dependencies
pub type ConcreteCheckUseCase = CheckUseCase<JsonSpecDocumentRepository, JsonPriorIndexRepository>;

/// Type alias for the concrete DiffUseCase with all dependencies
pub type ConcreteDiffUseCase =
    DiffUseCase<JsonSpecDocumentRepository, JsonPriorIndexRepository, LocalFs, SkeletonRenderer>;

/// Path deriver for a resolved configuration
pub fn create_deriver(config: &Config) -> PathDeriver {
    PathDeriver::new(config.path_config())
}

/// Emitter rooted at `root`, with raw URLs when the config has a template
pub fn create_emitter(config: &Config, root: &Path) -> Emitter {
    Emitter::new(root, create_deriver(config)).with_raw_urls(config.raw_url_template())
}

/// Create a generate use case with all dependencies wired up
pub fn create_generate_use_case(config: &Config, root: &Path) -> ConcreteGenerateUseCase {
    GenerateUseCase::new(
        JsonSpecDocumentRepository::new(),
        JsonPriorIndexRepository::new(),
        LocalFs::new(),
        SkeletonRenderer::new(),
        create_deriver(config),
        create_emitter(config, root),
    )
}

/// Create a check use case with all dependencies wired up
pub fn create_check_use_case(config: &Config) -> ConcreteCheckUseCase {
    CheckUseCase::new(
        JsonSpecDocumentRepository::new(),
        JsonPriorIndexRepository::new(),
        create_deriver(config),
    )
}

/// Create a diff use case with all dependencies wired up
pub fn create_diff_use_case(config: &Config, root: &Path) -> ConcreteDiffUseCase {
    DiffUseCase::new(
        JsonSpecDocumentRepository::new(),
        JsonPriorIndexRepository::new(),
        LocalFs::new(),
        SkeletonRenderer::new(),
        create_deriver(config),
        create_emitter(config, root),
    )
}
