//! Test fixtures - reusable spec documents.

use serde_json::{json, Value};

pub const RAW_TEMPLATE: &str = "https://raw.githubusercontent.com/{repo}/main/{path}";
pub const REPO: &str = "acme/shop";

/// A single domain entity
pub fn product_entity() -> Value {
    json!([
        {"class_name": "Product", "layer": "domain.entity", "attributes": ["id:int", "name:str"]}
    ])
}

/// A use case depending on an interface nobody declares
pub fn dangling_use_case() -> Value {
    json!([
        {"class_name": "CreateProductUseCase", "layer": "application.use_case",
         "dependencies": ["IProductRepository"]}
    ])
}

/// A repository implementing an interface from an earlier run
pub fn product_repository() -> Value {
    json!([
        {"class_name": "ProductRepository", "layer": "infrastructure.repository",
         "implements": "IProductRepository", "methods": ["get", "save"]}
    ])
}

/// Prior index declaring the interface `product_repository` implements
pub fn interface_prior() -> Value {
    json!([
        {"class_name": "ProductRepository", "layer": "application.interface",
         "code_path": "application/interfaces/product_repository.py"}
    ])
}

/// Two items with the same identity
pub fn duplicate_products() -> Value {
    json!([
        {"class_name": "Product", "layer": "domain.entity", "attributes": ["id:int"]},
        {"class_name": "Product", "layer": "domain.entity", "attributes": ["sku:str"]}
    ])
}

/// A domain service reaching into infrastructure
pub fn domain_to_infrastructure() -> Value {
    json!([
        {"class_name": "Foo", "layer": "domain.service", "methods": ["run"],
         "dependencies": ["SomeInfraAdapter"]}
    ])
}

/// A small catalog across all four tiers
pub fn catalog() -> Value {
    json!([
        {"class_name": "Product", "layer": "domain.entity", "attributes": ["id:int", "name:str"],
         "owner": "catalog-team"},
        {"class_name": "ProductRepository", "layer": "application.interface", "methods": ["get", "save"]},
        {"class_name": "CreateProductUseCase", "layer": "application.use_case",
         "dependencies": ["IProductRepository", "Product"]},
        {"class_name": "SqlProductRepository", "layer": "infrastructure.repository",
         "implements": "IProductRepository", "dependencies": ["Product"]},
        {"class_name": "ProductSchemas", "layer": "presentation.schema", "base_name": "Product",
         "schemas": [{"name": "CreateProductRequest", "fields": ["name:str"]},
                     {"name": "ProductResponse", "fields": ["id:int", "name:str"]}]},
        {"class_name": "ProductRouter", "layer": "presentation.router", "base_name": "Product",
         "endpoints": [{"method": "POST", "path": "/", "use_case": "CreateProductUseCase",
                        "request_model": "CreateProductRequest",
                        "response_model": "ProductResponse"}]}
    ])
}
