//! Scenario: Rejected batches leave no trace
//!
//! Journey: an operator submits batches with a dangling reference, a
//! duplicate identity and a forbidden layer edge.
//!
//! Success Criteria:
//! - Every problem is reported with exit status 1
//! - No artifact is written and the spec document is byte-identical

use serde_json::Value;

use crate::assert_exit_code;
use crate::common::*;

fn assert_rejected_without_trace(document: Value, expected: &str) {
    let env = TestEnv::new();
    env.write_spec("spec.json", &document);
    let before = env.tree();

    let result = env.run(&["generate", "spec.json"]);

    assert_exit_code!(result, 1);
    assert!(
        result.stderr.contains(expected),
        "expected '{}' in:\n{}",
        expected,
        result.stderr
    );
    assert!(result.stderr.contains("nothing was written"));
    assert_eq!(env.tree(), before);
}

#[test]
fn scenario_unresolved_reference() {
    assert_rejected_without_trace(dangling_use_case(), "\"IProductRepository\"");
}

#[test]
fn scenario_duplicate_identity() {
    assert_rejected_without_trace(duplicate_products(), "items #0, #1");
}

#[test]
fn scenario_domain_references_infrastructure() {
    assert_rejected_without_trace(domain_to_infrastructure(), "may not reference SomeInfraAdapter");
}

#[test]
fn scenario_one_bad_item_blocks_the_whole_batch() {
    let mut document = catalog();
    document
        .as_array_mut()
        .unwrap()
        .push(serde_json::json!({"class_name": "Broken", "layer": "domain.entity"}));
    assert_rejected_without_trace(document, "missing required field 'attributes'");
}
