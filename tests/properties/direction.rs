//! Property tests for layer-direction soundness.

use proptest::prelude::*;
use serde_json::{json, Value};

use layerwright::application::{BatchPipeline, Selection};
use layerwright::domain::entities::PriorIndex;
use layerwright::domain::services::PathDeriver;
use layerwright::LayerKind;

/// A minimal valid item for `layer`
fn item(layer: LayerKind, name: &str) -> Value {
    let tag = layer.tag();
    match layer {
        LayerKind::DomainEntity | LayerKind::InfrastructureModel => {
            json!({"class_name": name, "layer": tag, "attributes": ["id:int"]})
        }
        LayerKind::DomainService | LayerKind::ApplicationInterface => {
            json!({"class_name": name, "layer": tag, "methods": ["run"]})
        }
        LayerKind::ApplicationUseCase => json!({"class_name": name, "layer": tag}),
        LayerKind::InfrastructureRepository
        | LayerKind::InfrastructureAdapter
        | LayerKind::InfrastructurePipelineStep => {
            json!({"class_name": name, "layer": tag, "implements": "IAnchor"})
        }
        LayerKind::PresentationSchema => json!({"class_name": name, "layer": tag,
            "schemas": [{"name": format!("{}Body", name), "fields": ["id:int"]}]}),
        LayerKind::PresentationDependency => json!({"class_name": name, "layer": tag,
            "factories": [{"name": "get_anchor", "provides": "IAnchor"}]}),
        LayerKind::PresentationRouter => json!({"class_name": name, "layer": tag,
            "endpoints": [{"method": "GET", "path": "/"}]}),
    }
}

fn layer() -> impl Strategy<Value = LayerKind> {
    proptest::sample::select(LayerKind::ALL.to_vec())
}

fn domain_layer() -> impl Strategy<Value = LayerKind> {
    proptest::sample::select(vec![LayerKind::DomainEntity, LayerKind::DomainService])
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a domain item referencing any non-domain item is rejected
    /// with a layer violation.
    #[test]
    fn property_domain_never_reaches_outward(source in domain_layer(), target in layer()) {
        prop_assume!(!target.tag().starts_with("domain."));

        let anchor = json!({"class_name": "Anchor", "layer": "application.interface", "methods": ["run"]});
        let mut source_item = item(source, "Source");
        source_item["dependencies"] = json!(["Target"]);
        let items = vec![anchor, source_item, item(target, "Target")];

        let deriver = PathDeriver::default();
        let rejection = BatchPipeline::new(&deriver)
            .prepare(&items, &Selection::all(), &PriorIndex::new())
            .unwrap_err();

        prop_assert!(!rejection.violations.is_empty(), "{}", rejection.report());
    }

    /// PROPERTY: every edge the direction table allows resolves cleanly.
    #[test]
    fn property_allowed_edges_pass(source in layer(), target in layer()) {
        prop_assume!(source != target);
        prop_assume!(source.allows_reference_to(target));

        let anchor = json!({"class_name": "Anchor", "layer": "application.interface", "methods": ["run"]});
        let mut source_item = item(source, "Source");
        source_item["dependencies"] = json!(["Target"]);
        let items = vec![anchor, source_item, item(target, "Target")];

        let deriver = PathDeriver::default();
        let prepared = BatchPipeline::new(&deriver)
            .prepare(&items, &Selection::all(), &PriorIndex::new());

        prop_assert!(prepared.is_ok(), "{}", prepared.unwrap_err().report());
    }
}
