//! Naming & Path Deriver
//!
//! Pure mapping from `(layer, class name)` to the identifier and the
//! relative file paths an item generates. No I/O.
//!
//! ```text
//! code:  [source_root/]<layer-root>/<snake(stem)>.<ext>
//! test:  <test_root>/<category>/<layer-root>/test_<snake(stem)>.<ext>
//! ```

use crate::domain::entities::ClassSpec;
use crate::domain::value_objects::{ClassName, LayerKind};
use crate::error::InvalidNameError;

/// Roots and extension used when deriving paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConfig {
    /// Prefix for generated source (empty = target root)
    pub source_root: String,
    /// Root of the parallel test tree
    pub test_root: String,
    /// File extension without the dot
    pub extension: String,
    /// Prefix prepended to router mount paths
    pub api_prefix: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            source_root: String::new(),
            test_root: "tests".to_string(),
            extension: "py".to_string(),
            api_prefix: String::new(),
        }
    }
}

/// Everything derived for one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub identifier: String,
    pub file_path: String,
    pub test_path: Option<String>,
}

/// Derives identifiers and paths from a [`PathConfig`]
#[derive(Debug, Clone, Default)]
pub struct PathDeriver {
    config: PathConfig,
}

impl PathDeriver {
    pub fn new(config: PathConfig) -> Self {
        Self { config }
    }

    /// Derive identifier and paths for a class name
    pub fn derive(&self, layer: LayerKind, class_name: &str) -> Result<Derivation, InvalidNameError> {
        self.derive_with_stem(layer, class_name, class_name)
    }

    /// Derive with a separate file stem (`base_name`)
    pub fn derive_with_stem(
        &self,
        layer: LayerKind,
        class_name: &str,
        stem: &str,
    ) -> Result<Derivation, InvalidNameError> {
        ClassName::parse(class_name)?;
        ClassName::parse(stem)?;

        let identifier = identifier_for(layer, class_name);
        let file_stem = if layer.is_interface_like() {
            snake_case(strip_interface_prefix(stem))
        } else {
            snake_case(stem)
        };

        let file_path = join_path(&[
            &self.config.source_root,
            layer.root(),
            &format!("{}.{}", file_stem, self.config.extension),
        ]);
        let test_path = layer.test_category().map(|category| {
            join_path(&[
                &self.config.test_root,
                category.as_str(),
                layer.root(),
                &format!("test_{}.{}", file_stem, self.config.extension),
            ])
        });

        Ok(Derivation {
            identifier,
            file_path,
            test_path,
        })
    }

    /// Derive for a validated spec (uses `base_name` when present)
    pub fn derive_spec(&self, spec: &ClassSpec) -> Result<Derivation, InvalidNameError> {
        self.derive_with_stem(spec.layer, spec.class_name.as_str(), spec.stem_name())
    }

    /// Mount path of a router: explicit prefix, or `/<snake(stem minus "Router")>`
    pub fn register_path(&self, stem: &str, prefix: Option<&str>) -> String {
        let mount = match prefix {
            Some(prefix) => {
                let prefix = prefix.trim();
                if prefix.starts_with('/') {
                    prefix.to_string()
                } else {
                    format!("/{}", prefix)
                }
            }
            None => {
                let base = stem.strip_suffix("Router").filter(|b| !b.is_empty()).unwrap_or(stem);
                format!("/{}", snake_case(base))
            }
        };
        format!("{}{}", self.config.api_prefix.trim_end_matches('/'), mount)
    }
}

/// Identifier of a class: interfaces get an `I` prefix, applied once
pub fn identifier_for(layer: LayerKind, class_name: &str) -> String {
    if layer.is_interface_like() {
        interface_identifier(class_name)
    } else {
        class_name.to_string()
    }
}

/// `ProductRepository` → `IProductRepository`; already-prefixed names are kept
pub fn interface_identifier(name: &str) -> String {
    if has_interface_prefix(name) {
        name.to_string()
    } else {
        format!("I{}", name)
    }
}

/// `I` followed by an uppercase letter
pub fn has_interface_prefix(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some('I') && chars.next().is_some_and(|c| c.is_ascii_uppercase())
}

fn strip_interface_prefix(name: &str) -> &str {
    if has_interface_prefix(name) {
        &name[1..]
    } else {
        name
    }
}

/// snake_case with the two-pass rule:
/// `HTTPServer` → `http_server`, `Product2Item` → `product2_item`.
///
/// The first pass splits before every capitalized word, the second between
/// a lowercase letter or digit and an uppercase letter. Existing underscores
/// are kept, so `Order_Item` becomes `order__item`.
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    split_after_lower(&split_before_words(&chars))
        .into_iter()
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// `(.)([A-Z][a-z]+)` → `\1_\2`, matches taken left to right without overlap
fn split_before_words(chars: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len() + 4);
    let mut i = 0;
    while i < chars.len() {
        let starts_word = chars.get(i + 1).is_some_and(char::is_ascii_uppercase)
            && chars.get(i + 2).is_some_and(char::is_ascii_lowercase);
        if !starts_word {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let end = (i + 2..chars.len())
            .find(|&j| !chars[j].is_ascii_lowercase())
            .unwrap_or(chars.len());
        out.push(chars[i]);
        out.push('_');
        out.extend_from_slice(&chars[i + 1..end]);
        i = end;
    }
    out
}

/// `([a-z0-9])([A-Z])` → `\1_\2`, matches taken left to right without overlap
fn split_after_lower(chars: &[char]) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len() + 4);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match chars.get(i + 1) {
            Some(&next)
                if (c.is_ascii_lowercase() || c.is_ascii_digit()) && next.is_ascii_uppercase() =>
            {
                out.extend([c, '_', next]);
                i += 2;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Guess the layer of an undeclared class from its naming convention.
///
/// Used by the direction checker so a forbidden reference is reported as a
/// layer violation even when the target has not been declared yet.
pub fn infer_layer(name: &str) -> Option<LayerKind> {
    const SUFFIXES: [(&str, LayerKind); 8] = [
        ("UseCase", LayerKind::ApplicationUseCase),
        ("Adapter", LayerKind::InfrastructureAdapter),
        ("Step", LayerKind::InfrastructurePipelineStep),
        ("Model", LayerKind::InfrastructureModel),
        ("Router", LayerKind::PresentationRouter),
        ("Schema", LayerKind::PresentationSchema),
        ("Request", LayerKind::PresentationSchema),
        ("Response", LayerKind::PresentationSchema),
    ];

    if has_interface_prefix(name) {
        return Some(LayerKind::ApplicationInterface);
    }
    if let Some((_, layer)) = SUFFIXES
        .iter()
        .find(|(suffix, _)| name.len() > suffix.len() && name.ends_with(suffix))
    {
        return Some(*layer);
    }
    if name.len() > "Repository".len() && name.ends_with("Repository") {
        return Some(LayerKind::InfrastructureRepository);
    }
    if name.len() > "Service".len() && name.ends_with("Service") {
        return Some(LayerKind::DomainService);
    }
    None
}

fn join_path(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim_matches('/'))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
