//! Batch selection
//!
//! A spec document may hold more items than one run should generate. The
//! selection picks the batch; every other identifiable item of the document
//! joins the prior index so batch items can still reference it.

use serde_json::Value;

use crate::domain::entities::{PriorEntry, PriorIndex};
use crate::domain::value_objects::LayerKind;

/// Which document items form the batch (empty filters select everything)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub layers: Vec<LayerKind>,
    pub only: Vec<String>,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_layers(mut self, layers: Vec<LayerKind>) -> Self {
        self.layers = layers;
        self
    }

    pub fn with_only(mut self, names: Vec<String>) -> Self {
        self.only = names;
        self
    }

    pub fn is_all(&self) -> bool {
        self.layers.is_empty() && self.only.is_empty()
    }

    /// Whether a raw item belongs to the batch
    pub fn selects(&self, item: &Value) -> bool {
        if self.is_all() {
            return true;
        }
        let layer_ok = self.layers.is_empty()
            || item
                .get("layer")
                .and_then(Value::as_str)
                .and_then(LayerKind::parse)
                .is_some_and(|layer| self.layers.contains(&layer));
        let name_ok = self.only.is_empty()
            || item
                .get("class_name")
                .and_then(Value::as_str)
                .is_some_and(|name| self.only.iter().any(|o| o == name));
        layer_ok && name_ok
    }

    /// Split document items into the batch (with document indices) and
    /// prior entries for the unselected ones
    pub fn split<'a>(&self, items: &'a [Value]) -> (Vec<(usize, &'a Value)>, PriorIndex) {
        let mut batch = Vec::new();
        let mut prior = PriorIndex::new();

        for (index, item) in items.iter().enumerate() {
            if self.selects(item) {
                batch.push((index, item));
            } else if let Some(entry) = prior_entry(item) {
                prior.push(entry);
            }
        }

        (batch, prior)
    }
}

/// Identity of a raw item, with its recorded `code_path`, `base_name` and
/// nested schema names when present
pub fn prior_entry(item: &Value) -> Option<PriorEntry> {
    let layer = item
        .get("layer")
        .and_then(Value::as_str)
        .and_then(LayerKind::parse)?;
    let name = item.get("class_name").and_then(Value::as_str)?;
    let base_name = item
        .get("base_name")
        .and_then(Value::as_str)
        .map(str::to_string);
    let entry = PriorEntry::new(layer, name)
        .with_base_name(base_name)
        .with_members(schema_names(item));
    Some(match item.get("code_path").and_then(Value::as_str) {
        Some(path) => entry.with_code_path(path),
        None => entry,
    })
}

fn schema_names(item: &Value) -> Vec<String> {
    item.get("schemas")
        .and_then(Value::as_array)
        .map(|schemas| {
            schemas
                .iter()
                .filter_map(|schema| schema.get("name").and_then(Value::as_str))
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
