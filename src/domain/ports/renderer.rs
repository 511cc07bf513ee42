//! Renderer port - turns a resolved spec into file content
//!
//! Template technology is not the engine's concern. A renderer must be pure:
//! the same input always yields the same text, which is what makes
//! regeneration byte-identical.

use crate::domain::entities::ResolvedSpec;

/// Everything a renderer may look at for one spec
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub item: &'a ResolvedSpec,
    /// Derived identifier (`I`-prefixed for interfaces)
    pub identifier: &'a str,
    pub code_path: &'a str,
    pub test_path: Option<&'a str>,
    /// Router mount path
    pub register_path: Option<&'a str>,
}

/// Rendering failed for one spec
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub trait Renderer {
    /// Source file content
    fn render_code(&self, input: &RenderInput<'_>) -> Result<String, RenderError>;

    /// Test file content; only called when the layer has a test category
    fn render_test(&self, input: &RenderInput<'_>) -> Result<String, RenderError>;
}
