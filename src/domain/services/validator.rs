//! Spec Model & Validator
//!
//! Turns raw JSON items into [`ClassSpec`]s. Every problem on an item is
//! collected before giving up on it, and batch-wide checks (duplicate
//! identities, colliding output paths) run over all items, so one pass
//! reports everything wrong with a spec file.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::domain::entities::{
    Attribute, ClassSpec, Endpoint, Factory, HttpMethod, Payload, SchemaDef,
};
use crate::domain::value_objects::{ClassName, LayerKind};
use crate::error::{FieldProblem, ValidationError};

use super::naming::PathDeriver;

/// Keys written by the metadata writer; ignored on input
pub const WRITER_KEYS: [&str; 5] = [
    "code_path",
    "code_raw_url",
    "test_path",
    "test_raw_url",
    "register_path",
];

/// Validates spec items against the per-layer field requirements
pub struct SpecValidator<'a> {
    deriver: &'a PathDeriver,
}

impl<'a> SpecValidator<'a> {
    pub fn new(deriver: &'a PathDeriver) -> Self {
        Self { deriver }
    }

    /// Validate a batch of `(document index, item)` pairs.
    ///
    /// Returns the specs that are individually valid (input order) and every
    /// error found. Callers must treat any error as a rejection of the whole
    /// batch.
    pub fn validate_batch(&self, items: &[(usize, &Value)]) -> (Vec<ClassSpec>, Vec<ValidationError>) {
        let mut specs = Vec::new();
        let mut errors = Vec::new();
        let mut identities: BTreeMap<(LayerKind, String), Vec<usize>> = BTreeMap::new();

        for (index, raw) in items {
            match validate(*index, raw) {
                Ok(spec) => {
                    identities
                        .entry((spec.layer, spec.class_name.to_string()))
                        .or_default()
                        .push(*index);
                    specs.push(spec);
                }
                Err(err) => {
                    // A broken item still claims the identity it spells out
                    if let Some(identity) = raw_identity(raw) {
                        identities.entry(identity).or_default().push(*index);
                    }
                    errors.push(err);
                }
            }
        }

        let mut duplicates: Vec<ValidationError> = identities
            .into_iter()
            .filter(|(_, indices)| indices.len() > 1)
            .map(|((layer, class_name), indices)| ValidationError::DuplicateIdentity {
                layer,
                class_name,
                indices,
            })
            .collect();
        duplicates.sort_by_key(|e| e.indices());
        errors.extend(duplicates);

        let mut paths: BTreeMap<String, Vec<(usize, LayerKind, String)>> = BTreeMap::new();
        for spec in &specs {
            if let Ok(derivation) = self.deriver.derive_spec(spec) {
                paths.entry(derivation.file_path).or_default().push((
                    spec.index,
                    spec.layer,
                    spec.class_name.to_string(),
                ));
            }
        }
        let mut collisions: Vec<ValidationError> = paths
            .into_iter()
            .filter(|(_, owners)| {
                // Same identity twice is already reported as a duplicate
                owners.len() > 1
                    && owners
                        .iter()
                        .any(|(_, layer, name)| (layer, name) != (&owners[0].1, &owners[0].2))
            })
            .map(|(path, owners)| ValidationError::PathCollision {
                path,
                indices: owners.into_iter().map(|(index, _, _)| index).collect(),
            })
            .collect();
        collisions.sort_by_key(|e| e.indices());
        errors.extend(collisions);

        (specs, errors)
    }
}

fn raw_identity(raw: &Value) -> Option<(LayerKind, String)> {
    let layer = raw.get("layer").and_then(Value::as_str).and_then(LayerKind::parse)?;
    let name = raw.get("class_name").and_then(Value::as_str)?;
    Some((layer, name.to_string()))
}

/// Validate one item, reporting every problem found on it
pub fn validate(index: usize, raw: &Value) -> Result<ClassSpec, ValidationError> {
    let Some(obj) = raw.as_object() else {
        return Err(ValidationError::Item {
            index,
            layer: None,
            class_name: None,
            problems: vec![FieldProblem::NotAnObject],
        });
    };

    let mut fields = Fields::new(obj);

    let class_name = fields.identifier("class_name", true);

    let layer_tag = fields.required_str("layer");
    let layer = layer_tag.as_deref().and_then(|tag| {
        let parsed = LayerKind::parse(tag);
        if parsed.is_none() {
            fields.problems.push(FieldProblem::Invalid {
                field: "layer".to_string(),
                reason: format!("unknown layer '{}'", tag),
            });
        }
        parsed
    });

    let description = fields.optional_str("description");
    let base_name = fields.identifier("base_name", false);
    let dependencies = fields.optional_str_array("dependencies");

    let payload = layer.map(|layer| payload_for(layer, &mut fields));

    match (class_name, layer, payload) {
        (Some(class_name), Some(layer), Some(payload)) if fields.problems.is_empty() => {
            Ok(ClassSpec {
                index,
                class_name,
                layer,
                description,
                base_name,
                dependencies,
                payload,
            })
        }
        _ => Err(ValidationError::Item {
            index,
            layer: layer.map(|l| l.tag().to_string()).or(layer_tag),
            class_name: obj
                .get("class_name")
                .and_then(Value::as_str)
                .map(str::to_string),
            problems: fields.problems,
        }),
    }
}

fn payload_for(layer: LayerKind, fields: &mut Fields<'_>) -> Payload {
    match layer {
        LayerKind::DomainEntity => Payload::Entity {
            attributes: fields.required_attributes("attributes"),
            methods: fields.optional_str_array("methods"),
        },
        LayerKind::DomainService => Payload::Service {
            methods: fields.required_str_array("methods"),
            attributes: fields.optional_attributes("attributes"),
        },
        LayerKind::ApplicationInterface => Payload::Interface {
            methods: fields.required_str_array("methods"),
        },
        LayerKind::ApplicationUseCase => Payload::UseCase {
            methods: fields.optional_str_array("methods"),
            implements: fields.optional_str("implements"),
        },
        LayerKind::InfrastructureModel => Payload::Model {
            attributes: fields.required_attributes("attributes"),
            table_name: fields.optional_str("table_name"),
        },
        LayerKind::InfrastructureRepository
        | LayerKind::InfrastructureAdapter
        | LayerKind::InfrastructurePipelineStep => Payload::Implementation {
            implements: fields.required_str("implements").unwrap_or_default(),
            methods: fields.optional_str_array("methods"),
        },
        LayerKind::PresentationSchema => Payload::Schemas(fields.schemas()),
        LayerKind::PresentationDependency => Payload::Factories(fields.factories()),
        LayerKind::PresentationRouter => Payload::Router {
            endpoints: fields.endpoints(),
            prefix: fields.optional_str("prefix"),
            use_case: fields.optional_str("use_case"),
        },
    }
}

/// Field accessor that records problems instead of returning early
struct Fields<'a> {
    obj: &'a Map<String, Value>,
    problems: Vec<FieldProblem>,
}

impl<'a> Fields<'a> {
    fn new(obj: &'a Map<String, Value>) -> Self {
        Self {
            obj,
            problems: Vec::new(),
        }
    }

    fn missing(&mut self, field: &str) {
        self.problems.push(FieldProblem::Missing {
            field: field.to_string(),
        });
    }

    fn wrong_type(&mut self, field: &str, expected: &'static str) {
        self.problems.push(FieldProblem::WrongType {
            field: field.to_string(),
            expected,
        });
    }

    fn invalid(&mut self, field: &str, reason: impl Into<String>) {
        self.problems.push(FieldProblem::Invalid {
            field: field.to_string(),
            reason: reason.into(),
        });
    }

    fn str_value(&mut self, field: &str, value: &Value) -> Option<String> {
        match value.as_str() {
            Some(s) if s.trim().is_empty() => {
                self.invalid(field, "must not be empty");
                None
            }
            Some(s) => Some(s.trim().to_string()),
            None => {
                self.wrong_type(field, "a string");
                None
            }
        }
    }

    /// Identifiers are taken verbatim; surrounding whitespace is an invalid name
    fn identifier(&mut self, field: &str, required: bool) -> Option<ClassName> {
        let obj = self.obj;
        let raw = match obj.get(field) {
            None | Some(Value::Null) => {
                if required {
                    self.missing(field);
                }
                return None;
            }
            Some(Value::String(raw)) => raw,
            Some(_) => {
                self.wrong_type(field, "a string");
                return None;
            }
        };
        ClassName::parse(raw)
            .map_err(|error| {
                self.problems.push(FieldProblem::InvalidName {
                    field: field.to_string(),
                    error,
                })
            })
            .ok()
    }

    fn required_str(&mut self, field: &str) -> Option<String> {
        match self.obj.get(field) {
            None | Some(Value::Null) => {
                self.missing(field);
                None
            }
            Some(value) => self.str_value(field, value),
        }
    }

    fn optional_str(&mut self, field: &str) -> Option<String> {
        match self.obj.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.str_value(field, value),
        }
    }

    fn str_array(&mut self, field: &str, value: &Value) -> Vec<String> {
        let Some(items) = value.as_array() else {
            self.wrong_type(field, "an array of strings");
            return Vec::new();
        };
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if let Some(s) = self.str_value(&format!("{}[{}]", field, i), item) {
                out.push(s);
            }
        }
        out
    }

    fn required_str_array(&mut self, field: &str) -> Vec<String> {
        match self.obj.get(field) {
            None | Some(Value::Null) => {
                self.missing(field);
                Vec::new()
            }
            Some(value) => self.str_array(field, value),
        }
    }

    fn optional_str_array(&mut self, field: &str) -> Vec<String> {
        match self.obj.get(field) {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => self.str_array(field, value),
        }
    }

    fn attributes(&mut self, field: &str, raw: Vec<String>) -> Vec<Attribute> {
        let mut out = Vec::with_capacity(raw.len());
        for (i, entry) in raw.into_iter().enumerate() {
            match parse_attribute(&entry) {
                Some(attr) => out.push(attr),
                None => self.invalid(
                    &format!("{}[{}]", field, i),
                    format!("expected \"name:type\", got \"{}\"", entry),
                ),
            }
        }
        out
    }

    fn required_attributes(&mut self, field: &str) -> Vec<Attribute> {
        let raw = self.required_str_array(field);
        self.attributes(field, raw)
    }

    fn optional_attributes(&mut self, field: &str) -> Vec<Attribute> {
        let raw = self.optional_str_array(field);
        self.attributes(field, raw)
    }

    fn required_objects(&mut self, field: &str) -> Vec<(String, &'a Map<String, Value>)> {
        let obj = self.obj;
        match obj.get(field) {
            None | Some(Value::Null) => {
                self.missing(field);
                Vec::new()
            }
            Some(Value::Array(items)) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let path = format!("{}[{}]", field, i);
                    match item.as_object() {
                        Some(entry) => out.push((path, entry)),
                        None => self.wrong_type(&path, "an object"),
                    }
                }
                out
            }
            Some(_) => {
                self.wrong_type(field, "an array of objects");
                Vec::new()
            }
        }
    }

    fn nested_str(&mut self, path: &str, entry: &Map<String, Value>, key: &str, required: bool) -> Option<String> {
        let field = format!("{}.{}", path, key);
        match entry.get(key) {
            None | Some(Value::Null) => {
                if required {
                    self.missing(&field);
                }
                None
            }
            Some(value) => self.str_value(&field, value),
        }
    }

    fn schemas(&mut self) -> Vec<SchemaDef> {
        let mut out = Vec::new();
        for (path, entry) in self.required_objects("schemas") {
            let name = self.nested_str(&path, entry, "name", true);
            let fields_path = format!("{}.fields", path);
            let raw_fields = match entry.get("fields") {
                None | Some(Value::Null) => Vec::new(),
                Some(value) => self.str_array(&fields_path, value),
            };
            let fields = self.attributes(&fields_path, raw_fields);
            if let Some(name) = name {
                self.check_identifier(&format!("{}.name", path), &name);
                out.push(SchemaDef { name, fields });
            }
        }
        out
    }

    fn factories(&mut self) -> Vec<Factory> {
        let mut out = Vec::new();
        for (path, entry) in self.required_objects("factories") {
            let name = self.nested_str(&path, entry, "name", true);
            let provides = self.nested_str(&path, entry, "provides", true);
            if let (Some(name), Some(provides)) = (name, provides) {
                self.check_identifier(&format!("{}.name", path), &name);
                out.push(Factory { name, provides });
            }
        }
        out
    }

    fn endpoints(&mut self) -> Vec<Endpoint> {
        let mut out = Vec::new();
        for (path, entry) in self.required_objects("endpoints") {
            let method = self
                .nested_str(&path, entry, "method", true)
                .and_then(|m| match HttpMethod::parse(&m) {
                    Some(method) => Some(method),
                    None => {
                        self.invalid(
                            &format!("{}.method", path),
                            format!("unsupported HTTP method '{}'", m),
                        );
                        None
                    }
                });
            let route = self
                .nested_str(&path, entry, "path", true)
                .and_then(|p| {
                    if p.starts_with('/') {
                        Some(p)
                    } else {
                        self.invalid(&format!("{}.path", path), "must start with '/'");
                        None
                    }
                });
            let name = self.nested_str(&path, entry, "name", false);
            let use_case = self.nested_str(&path, entry, "use_case", false);
            let request_model = self.nested_str(&path, entry, "request_model", false);
            let response_model = self.nested_str(&path, entry, "response_model", false);

            if let (Some(method), Some(route)) = (method, route) {
                out.push(Endpoint {
                    method,
                    path: route,
                    name,
                    use_case,
                    request_model,
                    response_model,
                });
            }
        }
        out
    }

    fn check_identifier(&mut self, field: &str, name: &str) {
        if let Err(error) = ClassName::parse(name) {
            self.problems.push(FieldProblem::InvalidName {
                field: field.to_string(),
                error,
            });
        }
    }
}

fn parse_attribute(entry: &str) -> Option<Attribute> {
    let (name, ty) = entry.split_once(':')?;
    let (name, ty) = (name.trim(), ty.trim());
    if name.is_empty() || ty.is_empty() {
        return None;
    }
    Some(Attribute::new(name, ty))
}
