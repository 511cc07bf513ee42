//! Property tests for the round-trip metadata writer.

use proptest::prelude::*;
use serde_json::{json, Map, Value};

use layerwright::domain::entities::{Artifact, SpecId};
use layerwright::domain::services::annotate;
use layerwright::LayerKind;

fn extra_key() -> impl Strategy<Value = String> {
    proptest::string::string_regex("x_[a-z]{1,8}").unwrap()
}

fn extra_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        "[a-z ]{0,16}".prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        Just(json!({"nested": [1, 2, 3]})),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: annotate never touches keys it does not own.
    #[test]
    fn property_annotate_preserves_unrelated_keys(
        extras in proptest::collection::vec((extra_key(), extra_value()), 0..=6),
        with_test in any::<bool>(),
    ) {
        let mut item = Map::new();
        item.insert("class_name".to_string(), json!("Product"));
        item.insert("layer".to_string(), json!("domain.entity"));
        for (key, value) in &extras {
            item.insert(key.clone(), value.clone());
        }
        let document = Value::Array(vec![Value::Object(item.clone())]);

        let artifact = Artifact {
            owner: SpecId::new(0, LayerKind::DomainEntity, "Product"),
            code_path: "domain/entities/product.py".to_string(),
            code_raw_url: None,
            test_path: with_test.then(|| "tests/unit/domain/entities/test_product.py".to_string()),
            test_raw_url: None,
            register_path: None,
        };
        let updated = annotate(&document, &[artifact]).unwrap();

        for (key, value) in &item {
            prop_assert_eq!(&updated[0][key], value);
        }
        let keys: Vec<&String> = updated[0].as_object().unwrap().keys().collect();
        let original: Vec<&String> = item.keys().collect();
        prop_assert_eq!(&keys[..original.len()], &original[..]);
        prop_assert_eq!(updated[0]["code_path"].as_str(), Some("domain/entities/product.py"));
    }
}
