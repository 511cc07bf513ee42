//! ClassSpec entity - one unit of generation
//!
//! A `ClassSpec` is the validated form of one item of the spec document.
//! It is identified by `(layer, class_name)` and remembers its position in
//! the document so round-trip metadata lands on the right item.

use std::fmt;

use crate::domain::value_objects::{ClassName, LayerKind};

/// Identity of a spec item: its document index plus `(layer, class_name)`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpecId {
    pub index: usize,
    pub layer: LayerKind,
    pub class_name: String,
}

impl SpecId {
    pub fn new(index: usize, layer: LayerKind, class_name: impl Into<String>) -> Self {
        Self {
            index,
            layer,
            class_name: class_name.into(),
        }
    }

    /// `layer:ClassName`, without the index
    pub fn logical_name(&self) -> String {
        format!("{}:{}", self.layer, self.class_name)
    }
}

impl fmt::Display for SpecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}:{}", self.index, self.layer, self.class_name)
    }
}

/// The spec key a reference was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReferenceField {
    Implements,
    Dependency,
    UseCase,
    RequestModel,
    ResponseModel,
    Provides,
}

impl ReferenceField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceField::Implements => "implements",
            ReferenceField::Dependency => "dependencies",
            ReferenceField::UseCase => "use_case",
            ReferenceField::RequestModel => "request_model",
            ReferenceField::ResponseModel => "response_model",
            ReferenceField::Provides => "provides",
        }
    }
}

impl fmt::Display for ReferenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A symbolic pointer from one spec to another
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub field: ReferenceField,
    /// Literal name as written (bare `IFoo` or qualified `application.interface.IFoo`)
    pub target: String,
}

impl Reference {
    pub fn new(field: ReferenceField, target: impl Into<String>) -> Self {
        Self {
            field,
            target: target.into(),
        }
    }

    /// Split a qualified reference into its layer and name.
    ///
    /// `application.interface.IFoo` → `(Some(ApplicationInterface), "IFoo")`;
    /// anything else is returned as a bare name.
    pub fn split(&self) -> (Option<LayerKind>, &str) {
        split_reference(&self.target)
    }
}

/// See [`Reference::split`]
pub fn split_reference(target: &str) -> (Option<LayerKind>, &str) {
    let target = target.trim();
    if let Some(pos) = target.rfind(['.', '/']) {
        if let Some(layer) = LayerKind::parse(&target[..pos]) {
            return (Some(layer), &target[pos + 1..]);
        }
    }
    (None, target)
}

/// A `name:type` pair (entity attribute, model column, schema field)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub ty: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// One request/response model declared by a `presentation.schema` item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDef {
    pub name: String,
    pub fields: Vec<Attribute>,
}

/// One provider function declared by a `presentation.dependency` item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factory {
    pub name: String,
    pub provides: String,
}

/// HTTP verb of a router endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "PATCH" => Some(HttpMethod::Patch),
            "DELETE" => Some(HttpMethod::Delete),
            _ => None,
        }
    }

    /// Lowercase verb (`get`, `post`, ...)
    pub fn as_lower(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }
}

/// One route of a `presentation.router` item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: String,
    pub name: Option<String>,
    pub use_case: Option<String>,
    pub request_model: Option<String>,
    pub response_model: Option<String>,
}

/// Layer-specific part of a spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Entity {
        attributes: Vec<Attribute>,
        methods: Vec<String>,
    },
    Service {
        attributes: Vec<Attribute>,
        methods: Vec<String>,
    },
    Interface {
        methods: Vec<String>,
    },
    UseCase {
        methods: Vec<String>,
        implements: Option<String>,
    },
    Model {
        attributes: Vec<Attribute>,
        table_name: Option<String>,
    },
    /// Repositories, adapters and pipeline steps
    Implementation {
        implements: String,
        methods: Vec<String>,
    },
    Schemas(Vec<SchemaDef>),
    Factories(Vec<Factory>),
    Router {
        endpoints: Vec<Endpoint>,
        prefix: Option<String>,
        use_case: Option<String>,
    },
}

/// A validated spec item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSpec {
    pub index: usize,
    pub class_name: ClassName,
    pub layer: LayerKind,
    pub description: Option<String>,
    /// File stem override (`ProductRouter` → `product`)
    pub base_name: Option<ClassName>,
    pub dependencies: Vec<String>,
    pub payload: Payload,
}

impl ClassSpec {
    pub fn id(&self) -> SpecId {
        SpecId::new(self.index, self.layer, self.class_name.as_str())
    }

    /// Name used to derive file paths
    pub fn stem_name(&self) -> &str {
        self.base_name
            .as_ref()
            .unwrap_or(&self.class_name)
            .as_str()
    }

    /// Every reference this spec makes, in declaration order
    pub fn references(&self) -> Vec<Reference> {
        let mut refs = Vec::new();

        match &self.payload {
            Payload::UseCase {
                implements: Some(target),
                ..
            }
            | Payload::Implementation {
                implements: target, ..
            } => refs.push(Reference::new(ReferenceField::Implements, target)),
            _ => {}
        }

        refs.extend(
            self.dependencies
                .iter()
                .map(|d| Reference::new(ReferenceField::Dependency, d)),
        );

        match &self.payload {
            Payload::Factories(factories) => refs.extend(
                factories
                    .iter()
                    .map(|f| Reference::new(ReferenceField::Provides, &f.provides)),
            ),
            Payload::Router {
                endpoints,
                use_case,
                ..
            } => {
                if let Some(use_case) = use_case {
                    refs.push(Reference::new(ReferenceField::UseCase, use_case));
                }
                for endpoint in endpoints {
                    let fields = [
                        (ReferenceField::UseCase, &endpoint.use_case),
                        (ReferenceField::RequestModel, &endpoint.request_model),
                        (ReferenceField::ResponseModel, &endpoint.response_model),
                    ];
                    for (field, target) in fields {
                        if let Some(target) = target {
                            refs.push(Reference::new(field, target));
                        }
                    }
                }
            }
            _ => {}
        }

        // A router naming the same use case on every endpoint is one edge.
        let mut seen = std::collections::HashSet::new();
        refs.retain(|r| seen.insert((r.field, r.target.clone())));
        refs
    }

    /// Nested names this spec declares besides its class name
    /// (schema models of a `presentation.schema` item)
    pub fn member_names(&self) -> Vec<&str> {
        match &self.payload {
            Payload::Schemas(schemas) => schemas.iter().map(|s| s.name.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}
