//! Symbol table shared by the direction checker and the resolver
//!
//! Holds every name in scope for a batch: the batch's own items (plus the
//! schema models nested in `presentation.schema` items) and the prior index
//! entries not shadowed by a batch item of the same identity.

use std::collections::HashSet;

use crate::domain::entities::{split_reference, ClassSpec, PriorIndex, Symbol, SymbolOrigin};
use crate::domain::value_objects::LayerKind;

use super::naming::{identifier_for, interface_identifier, PathDeriver};

/// Outcome of looking a reference up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a Symbol),
    Ambiguous(Vec<&'a Symbol>),
    Missing,
}

/// Names in scope for one batch
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// Build the table for `specs`, falling back to `prior` for names the
    /// batch does not declare
    pub fn build(specs: &[ClassSpec], prior: &PriorIndex, deriver: &PathDeriver) -> Self {
        let mut symbols = Vec::new();
        let mut batch_ids = HashSet::new();

        for spec in specs {
            let identifier = identifier_for(spec.layer, spec.class_name.as_str());
            batch_ids.insert((spec.layer, identifier.clone()));
            let code_path = deriver.derive_spec(spec).ok().map(|d| d.file_path);
            let symbol = Symbol {
                layer: spec.layer,
                class_name: spec.class_name.to_string(),
                identifier,
                code_path,
                origin: SymbolOrigin::Batch(spec.index),
                member: None,
            };
            for member in spec.member_names() {
                symbols.push(Symbol {
                    member: Some(member.to_string()),
                    ..symbol.clone()
                });
            }
            symbols.push(symbol);
        }

        for (position, entry) in prior.entries().iter().enumerate() {
            let identifier = identifier_for(entry.layer, &entry.class_name);
            if batch_ids.contains(&(entry.layer, identifier.clone())) {
                continue;
            }
            let stem = entry.base_name.as_deref().unwrap_or(&entry.class_name);
            let code_path = entry.code_path.clone().or_else(|| {
                deriver
                    .derive_with_stem(entry.layer, &entry.class_name, stem)
                    .ok()
                    .map(|d| d.file_path)
            });
            let symbol = Symbol {
                layer: entry.layer,
                class_name: entry.class_name.clone(),
                identifier,
                code_path,
                origin: SymbolOrigin::Prior(position),
                member: None,
            };
            for member in &entry.members {
                symbols.push(Symbol {
                    member: Some(member.clone()),
                    ..symbol.clone()
                });
            }
            symbols.push(symbol);
        }

        Self { symbols }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Look `reference` up on behalf of an item in layer `from`.
    ///
    /// Batch symbols win over prior ones. When a bare name matches several
    /// symbols and exactly one of them sits in a layer `from` may reference,
    /// that one is picked.
    pub fn lookup(&self, reference: &str, from: LayerKind) -> Lookup<'_> {
        let (layer, name) = split_reference(reference);

        let matching: Vec<&Symbol> = self
            .symbols
            .iter()
            .filter(|s| layer.map_or(true, |l| s.layer == l))
            .filter(|s| matches_name(s, name))
            .collect();

        let in_batch: Vec<&Symbol> = matching
            .iter()
            .copied()
            .filter(|s| matches!(s.origin, SymbolOrigin::Batch(_)))
            .collect();
        let candidates = if in_batch.is_empty() { matching } else { in_batch };

        match candidates.len() {
            0 => Lookup::Missing,
            1 => Lookup::Found(candidates[0]),
            _ => {
                let allowed: Vec<&Symbol> = candidates
                    .iter()
                    .copied()
                    .filter(|s| from.allows_reference_to(s.layer))
                    .collect();
                match allowed.len() {
                    1 => Lookup::Found(allowed[0]),
                    0 => Lookup::Ambiguous(candidates),
                    _ => Lookup::Ambiguous(allowed),
                }
            }
        }
    }
}

fn matches_name(symbol: &Symbol, name: &str) -> bool {
    if let Some(member) = &symbol.member {
        return member == name;
    }
    if symbol.class_name == name || symbol.identifier == name {
        return true;
    }
    symbol.layer.is_interface_like() && interface_identifier(name) == symbol.identifier
}
