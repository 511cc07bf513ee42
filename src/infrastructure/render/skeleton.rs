//! Skeleton Renderer
//!
//! Default [`Renderer`]: deterministic Python skeletons in the FastAPI /
//! pydantic flavor of an onion-architecture backend. Imports come from the
//! code paths of resolved references, so a generated module only ever
//! imports what its spec actually declared.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::entities::{
    split_reference, Attribute, Endpoint, Payload, ReferenceField, ResolvedSpec,
};
use crate::domain::ports::{RenderError, RenderInput, Renderer};
use crate::domain::services::{has_interface_prefix, snake_case};

const INDENT: &str = "    ";

/// Python skeleton renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct SkeletonRenderer;

impl SkeletonRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for SkeletonRenderer {
    fn render_code(&self, input: &RenderInput<'_>) -> Result<String, RenderError> {
        let item = input.item;
        let spec = &item.spec;

        let mut framework = Vec::new();
        match &spec.payload {
            Payload::Entity { .. } | Payload::Schemas(_) => {
                framework.push("from pydantic import BaseModel".to_string())
            }
            Payload::Interface { .. } => framework.push("from typing import Protocol".to_string()),
            Payload::Router { .. } => framework.push("from fastapi import APIRouter".to_string()),
            _ => {}
        }

        let body = match &spec.payload {
            Payload::Entity {
                attributes,
                methods,
            } => class_block(
                input.identifier,
                &["BaseModel".to_string()],
                spec.description.as_deref(),
                attributes,
                &[],
                methods,
                MethodStyle::Raise,
            ),
            Payload::Service {
                attributes,
                methods,
            } => class_block(
                input.identifier,
                &[],
                spec.description.as_deref(),
                attributes,
                &constructor_params(item),
                methods,
                MethodStyle::Raise,
            ),
            Payload::Interface { methods } => class_block(
                input.identifier,
                &["Protocol".to_string()],
                spec.description.as_deref(),
                &[],
                &[],
                methods,
                MethodStyle::Ellipsis,
            ),
            Payload::UseCase {
                methods,
                implements,
            } => {
                let bases: Vec<String> = implements.iter().map(|t| linked_name(item, t)).collect();
                let methods = if methods.is_empty() {
                    vec!["execute".to_string()]
                } else {
                    methods.clone()
                };
                class_block(
                    input.identifier,
                    &bases,
                    spec.description.as_deref(),
                    &[],
                    &constructor_params(item),
                    &methods,
                    MethodStyle::Raise,
                )
            }
            Payload::Model {
                attributes,
                table_name,
            } => model_block(
                input.identifier,
                spec.description.as_deref(),
                attributes,
                table_name.as_deref(),
            ),
            Payload::Implementation {
                implements,
                methods,
            } => class_block(
                input.identifier,
                &[linked_name(item, implements)],
                spec.description.as_deref(),
                &[],
                &constructor_params(item),
                methods,
                MethodStyle::Raise,
            ),
            Payload::Schemas(schemas) => schemas
                .iter()
                .map(|schema| {
                    class_block(
                        &schema.name,
                        &["BaseModel".to_string()],
                        None,
                        &schema.fields,
                        &[],
                        &[],
                        MethodStyle::Raise,
                    )
                })
                .collect::<Vec<_>>()
                .join("\n\n"),
            Payload::Factories(factories) => factories
                .iter()
                .map(|factory| {
                    format!(
                        "def {}() -> {}:\n{}raise NotImplementedError\n",
                        factory.name,
                        linked_name(item, &factory.provides),
                        INDENT
                    )
                })
                .collect::<Vec<_>>()
                .join("\n\n"),
            Payload::Router { endpoints, .. } => router_block(item, input.register_path, endpoints),
        };

        let imports = import_lines(item, input.code_path);
        Ok(assemble(&[framework, imports], &body))
    }

    fn render_test(&self, input: &RenderInput<'_>) -> Result<String, RenderError> {
        let spec = &input.item.spec;
        let module = module_of(input.code_path);
        let (symbol, subject) = match spec.payload {
            Payload::Router { .. } => ("router".to_string(), "router".to_string()),
            _ => (input.identifier.to_string(), snake_case(spec.class_name.as_str())),
        };

        let imports = vec![format!("from {} import {}", module, symbol)];
        let body = format!(
            "def test_{}_is_importable() -> None:\n{}assert {} is not None\n",
            subject, INDENT, symbol
        );
        Ok(assemble(&[imports], &body))
    }
}

#[derive(Clone, Copy)]
enum MethodStyle {
    /// `raise NotImplementedError`
    Raise,
    /// `...` (protocol members)
    Ellipsis,
}

/// `from __future__` header, import sections, two blank lines, body
fn assemble(sections: &[Vec<String>], body: &str) -> String {
    let mut out = String::from("from __future__ import annotations\n");
    for section in sections.iter().filter(|s| !s.is_empty()) {
        out.push('\n');
        for line in section {
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str("\n\n");
    out.push_str(body);
    out
}

/// Dotted module of a relative code path (`domain/entities/product.py` → `domain.entities.product`)
fn module_of(code_path: &str) -> String {
    let without_ext = match code_path.rsplit_once('.') {
        Some((stem, ext)) if !ext.contains('/') && !stem.is_empty() && !stem.ends_with('/') => stem,
        _ => code_path,
    };
    without_ext.replace('/', ".")
}

/// `from <module> import A, B` for every resolved reference outside this module
fn import_lines(item: &ResolvedSpec, code_path: &str) -> Vec<String> {
    let own = module_of(code_path);
    let mut modules: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    for link in &item.links {
        if let Some(path) = &link.symbol.code_path {
            let module = module_of(path);
            if module != own {
                modules
                    .entry(module)
                    .or_default()
                    .insert(link.symbol.import_name());
            }
        }
    }
    modules
        .into_iter()
        .map(|(module, names)| {
            format!(
                "from {} import {}",
                module,
                names.into_iter().collect::<Vec<_>>().join(", ")
            )
        })
        .collect()
}

/// Name a reference resolved to, as it is imported
fn linked_name(item: &ResolvedSpec, target: &str) -> String {
    item.links
        .iter()
        .find(|link| link.reference.target == target)
        .map(|link| link.symbol.import_name().to_string())
        .unwrap_or_else(|| split_reference(target).1.to_string())
}

/// `(param, type)` for each declared dependency
fn constructor_params(item: &ResolvedSpec) -> Vec<(String, String)> {
    item.links
        .iter()
        .filter(|link| link.reference.field == ReferenceField::Dependency)
        .map(|link| {
            let name = link.symbol.import_name();
            let base = if has_interface_prefix(name) {
                &name[1..]
            } else {
                name
            };
            (snake_case(base), name.to_string())
        })
        .collect()
}

fn method_name(raw: &str) -> &str {
    raw.split('(').next().unwrap_or(raw).trim()
}

fn class_block(
    name: &str,
    bases: &[String],
    description: Option<&str>,
    attributes: &[Attribute],
    params: &[(String, String)],
    methods: &[String],
    style: MethodStyle,
) -> String {
    let header = if bases.is_empty() {
        format!("class {}:\n", name)
    } else {
        format!("class {}({}):\n", name, bases.join(", "))
    };

    let mut members: Vec<String> = Vec::new();
    if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
        members.push(format!("{}\"\"\"{}\"\"\"\n", INDENT, description.trim()));
    }
    if !attributes.is_empty() {
        members.push(
            attributes
                .iter()
                .map(|a| format!("{}{}: {}\n", INDENT, a.name, a.ty))
                .collect(),
        );
    }
    if !params.is_empty() {
        let signature = params
            .iter()
            .map(|(param, ty)| format!(", {}: {}", param, ty))
            .collect::<String>();
        let assignments = params
            .iter()
            .map(|(param, _)| format!("{0}{0}self._{1} = {1}\n", INDENT, param))
            .collect::<String>();
        members.push(format!(
            "{}def __init__(self{}) -> None:\n{}",
            INDENT, signature, assignments
        ));
    }
    for method in methods {
        let body = match style {
            MethodStyle::Raise => "raise NotImplementedError",
            MethodStyle::Ellipsis => "...",
        };
        members.push(format!(
            "{0}def {1}(self):\n{0}{0}{2}\n",
            INDENT,
            method_name(method),
            body
        ));
    }

    if members.is_empty() {
        members.push(format!("{}pass\n", INDENT));
    }
    format!("{}{}", header, members.join("\n"))
}

fn model_block(
    name: &str,
    description: Option<&str>,
    attributes: &[Attribute],
    table_name: Option<&str>,
) -> String {
    let mut out = class_block(name, &[], description, &[], &[], &[], MethodStyle::Raise);
    let mut members: Vec<String> = Vec::new();
    if let Some(table) = table_name {
        members.push(format!("{}__tablename__ = \"{}\"\n", INDENT, table));
    }
    if !attributes.is_empty() {
        members.push(
            attributes
                .iter()
                .map(|a| format!("{}{}: {}\n", INDENT, a.name, a.ty))
                .collect(),
        );
    }
    if !members.is_empty() {
        let pass = format!("{}pass\n", INDENT);
        if out.ends_with(&pass) {
            out.truncate(out.len() - pass.len());
        } else {
            out.push('\n');
        }
        out.push_str(&members.join("\n"));
    }
    out
}

/// Handler name: explicit, else `<verb>_<path words>`
fn endpoint_name(endpoint: &Endpoint) -> String {
    if let Some(name) = &endpoint.name {
        return name.clone();
    }
    let words: Vec<String> = endpoint
        .path
        .split('/')
        .map(|segment| segment.trim_matches(|c| c == '{' || c == '}'))
        .filter(|segment| !segment.is_empty())
        .map(|segment| snake_case(&segment.replace('-', "_")))
        .collect();
    if words.is_empty() {
        format!("{}_root", endpoint.method.as_lower())
    } else {
        format!("{}_{}", endpoint.method.as_lower(), words.join("_"))
    }
}

fn router_block(item: &ResolvedSpec, register_path: Option<&str>, endpoints: &[Endpoint]) -> String {
    let mut blocks = vec![format!(
        "router = APIRouter(prefix=\"{}\")\n",
        register_path.unwrap_or("")
    )];

    for endpoint in endpoints {
        let response = endpoint
            .response_model
            .as_deref()
            .map(|target| linked_name(item, target));
        let decorator = match &response {
            Some(model) => format!(
                "@router.{}(\"{}\", response_model={})\n",
                endpoint.method.as_lower(),
                endpoint.path,
                model
            ),
            None => format!("@router.{}(\"{}\")\n", endpoint.method.as_lower(), endpoint.path),
        };
        let params = endpoint
            .request_model
            .as_deref()
            .map(|target| format!("request: {}", linked_name(item, target)))
            .unwrap_or_default();
        let returns = response.as_deref().unwrap_or("None");

        let mut block = format!(
            "{}def {}({}) -> {}:\n",
            decorator,
            endpoint_name(endpoint),
            params,
            returns
        );
        if let Some(use_case) = &endpoint.use_case {
            block.push_str(&format!(
                "{}\"\"\"Delegates to {}.\"\"\"\n",
                INDENT,
                linked_name(item, use_case)
            ));
        }
        block.push_str(&format!("{}raise NotImplementedError\n", INDENT));
        blocks.push(block);
    }

    blocks.join("\n\n")
}
