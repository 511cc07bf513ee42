//! Cross-Reference Resolver
//!
//! Binds every reference of every spec to exactly one symbol from the batch
//! or the prior index. Resolution is all-or-nothing: any failure yields the
//! full list of failures and no resolved batch.

use crate::domain::entities::{ClassSpec, Link, ResolvedBatch, ResolvedSpec};
use crate::error::UnresolvedReferenceError;

use super::symbols::{Lookup, SymbolTable};

pub fn resolve(
    specs: Vec<ClassSpec>,
    table: &SymbolTable,
) -> Result<ResolvedBatch, Vec<UnresolvedReferenceError>> {
    let mut errors = Vec::new();
    let mut items = Vec::with_capacity(specs.len());

    for spec in specs {
        let mut links = Vec::new();
        for reference in spec.references() {
            match table.lookup(&reference.target, spec.layer) {
                Lookup::Found(symbol) => links.push(Link {
                    symbol: symbol.clone(),
                    reference,
                }),
                Lookup::Ambiguous(candidates) => {
                    errors.push(UnresolvedReferenceError::Ambiguous {
                        item: spec.id(),
                        field: reference.field,
                        reference: reference.target,
                        candidates: candidates.iter().map(|c| c.describe()).collect(),
                    })
                }
                Lookup::Missing => errors.push(UnresolvedReferenceError::Missing {
                    item: spec.id(),
                    field: reference.field,
                    reference: reference.target,
                }),
            }
        }
        items.push(ResolvedSpec { spec, links });
    }

    if errors.is_empty() {
        Ok(ResolvedBatch { items })
    } else {
        Err(errors)
    }
}
