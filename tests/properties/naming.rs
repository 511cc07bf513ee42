//! Property tests for naming and path derivation.

use proptest::prelude::*;

use layerwright::domain::services::{identifier_for, snake_case, PathDeriver};
use layerwright::LayerKind;

fn class_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z][A-Za-z0-9]{0,24}").unwrap()
}

fn layer() -> impl Strategy<Value = LayerKind> {
    proptest::sample::select(LayerKind::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: derivation is a pure function of its inputs.
    #[test]
    fn property_derive_is_deterministic(name in class_name(), kind in layer()) {
        let deriver = PathDeriver::default();
        let first = deriver.derive(kind, &name).unwrap();
        let second = deriver.derive(kind, &name).unwrap();
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: the interface prefix is applied at most once.
    #[test]
    fn property_interface_prefix_is_idempotent(name in class_name()) {
        let once = identifier_for(LayerKind::ApplicationInterface, &name);
        let twice = identifier_for(LayerKind::ApplicationInterface, &once);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.starts_with('I'));
    }

    /// PROPERTY: snake_case output is lowercase, has no leading underscore,
    /// and is stable under a second application.
    #[test]
    fn property_snake_case_is_idempotent(name in class_name()) {
        let snake = snake_case(&name);
        prop_assert!(!snake.starts_with('_'));
        prop_assert!(!snake.chars().any(|c| c.is_ascii_uppercase()));
        prop_assert_eq!(snake_case(&snake), snake);
    }

    /// PROPERTY: paths sit under the layer root and use the extension.
    #[test]
    fn property_paths_follow_layout(name in class_name(), kind in layer()) {
        let derivation = PathDeriver::default().derive(kind, &name).unwrap();
        prop_assert!(derivation.file_path.starts_with(kind.root()));
        prop_assert!(derivation.file_path.ends_with(".py"));
        prop_assert_eq!(derivation.test_path.is_some(), kind.test_category().is_some());
    }

    /// PROPERTY: names with characters outside `[A-Za-z0-9_]` never derive.
    #[test]
    fn property_invalid_names_are_rejected(
        prefix in class_name(),
        bad in proptest::sample::select(vec!['-', ' ', '.', '/', '$']),
    ) {
        let name = format!("{}{}", prefix, bad);
        prop_assert!(PathDeriver::default().derive(LayerKind::DomainEntity, &name).is_err());
    }
}
