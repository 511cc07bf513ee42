//! Dependency Direction Checker
//!
//! Every reference must point at a layer its source may depend on, and
//! references among batch items must not form a cycle. All violations are
//! collected in one pass.

use std::collections::HashMap;

use crate::domain::entities::{split_reference, ClassSpec, SpecId, SymbolOrigin};
use crate::domain::value_objects::LayerKind;
use crate::error::{LayerViolationError, UnresolvedReferenceError};

use super::naming::infer_layer;
use super::symbols::{Lookup, SymbolTable};

/// Check every reference of `specs` against the direction table.
///
/// The target layer comes from the symbol the reference resolves to. For a
/// target that is not declared anywhere it falls back to the layer the
/// reference is qualified with, then to the naming convention.
pub fn check_batch(specs: &[ClassSpec], table: &SymbolTable) -> Vec<LayerViolationError> {
    let mut violations = Vec::new();
    let mut edges: HashMap<usize, Vec<usize>> = HashMap::new();

    for spec in specs {
        for reference in spec.references() {
            let target_layer = match table.lookup(&reference.target, spec.layer) {
                Lookup::Found(symbol) => {
                    if let SymbolOrigin::Batch(target) = symbol.origin {
                        if spec.layer.allows_reference_to(symbol.layer) {
                            edges.entry(spec.index).or_default().push(target);
                        }
                    }
                    Some(symbol.layer)
                }
                Lookup::Ambiguous(candidates) => {
                    // Only a violation when no reading of the name is allowed
                    candidates
                        .iter()
                        .all(|c| !spec.layer.allows_reference_to(c.layer))
                        .then(|| candidates[0].layer)
                }
                Lookup::Missing => {
                    let (qualified, name) = split_reference(&reference.target);
                    qualified.or_else(|| infer_layer(name))
                }
            };

            if let Some(target_layer) = target_layer {
                if !spec.layer.allows_reference_to(target_layer) {
                    violations.push(LayerViolationError::Direction {
                        item: spec.id(),
                        field: reference.field,
                        target: reference.target.clone(),
                        target_layer,
                    });
                }
            }
        }
    }

    violations.extend(find_cycles(specs, &edges));
    violations
}

/// Drop unresolved-reference errors for references already reported as
/// direction violations, so one bad reference yields one error
pub fn suppress_covered(
    unresolved: Vec<UnresolvedReferenceError>,
    violations: &[LayerViolationError],
) -> Vec<UnresolvedReferenceError> {
    unresolved
        .into_iter()
        .filter(|err| {
            let (item, field, reference) = match err {
                UnresolvedReferenceError::Missing {
                    item,
                    field,
                    reference,
                }
                | UnresolvedReferenceError::Ambiguous {
                    item,
                    field,
                    reference,
                    ..
                } => (item, field, reference),
            };
            !violations.iter().any(|v| {
                matches!(
                    v,
                    LayerViolationError::Direction { item: i, field: f, target, .. }
                        if i == item && f == field && target == reference
                )
            })
        })
        .collect()
}

/// Strongly connected components of the batch reference graph with more
/// than one member, or a single member referencing itself
fn find_cycles(specs: &[ClassSpec], edges: &HashMap<usize, Vec<usize>>) -> Vec<LayerViolationError> {
    let ids: HashMap<usize, SpecId> = specs.iter().map(|s| (s.index, s.id())).collect();
    let mut nodes: Vec<usize> = ids.keys().copied().collect();
    nodes.sort_unstable();

    let mut tarjan = Tarjan {
        edges,
        next: 0,
        order: HashMap::new(),
        low: HashMap::new(),
        stack: Vec::new(),
        on_stack: HashMap::new(),
        components: Vec::new(),
    };
    for node in nodes {
        if !tarjan.order.contains_key(&node) {
            tarjan.visit(node);
        }
    }

    let mut cycles: Vec<LayerViolationError> = tarjan
        .components
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || edges
                    .get(&component[0])
                    .is_some_and(|targets| targets.contains(&component[0]))
        })
        .map(|mut component| {
            component.sort_unstable();
            LayerViolationError::Cycle {
                members: component
                    .iter()
                    .filter_map(|index| ids.get(index).cloned())
                    .collect(),
            }
        })
        .collect();
    cycles.sort_by_key(|c| match c {
        LayerViolationError::Cycle { members } => members.first().map(|m| m.index),
        LayerViolationError::Direction { item, .. } => Some(item.index),
    });
    cycles
}

struct Tarjan<'a> {
    edges: &'a HashMap<usize, Vec<usize>>,
    next: usize,
    order: HashMap<usize, usize>,
    low: HashMap<usize, usize>,
    stack: Vec<usize>,
    on_stack: HashMap<usize, bool>,
    components: Vec<Vec<usize>>,
}

impl Tarjan<'_> {
    fn visit(&mut self, node: usize) {
        self.order.insert(node, self.next);
        self.low.insert(node, self.next);
        self.next += 1;
        self.stack.push(node);
        self.on_stack.insert(node, true);

        let targets = self.edges.get(&node).cloned().unwrap_or_default();
        for target in targets {
            if !self.order.contains_key(&target) {
                self.visit(target);
                let low = self.low[&node].min(self.low[&target]);
                self.low.insert(node, low);
            } else if self.on_stack.get(&target).copied().unwrap_or(false) {
                let low = self.low[&node].min(self.order[&target]);
                self.low.insert(node, low);
            }
        }

        if self.low[&node] == self.order[&node] {
            let mut component = Vec::new();
            while let Some(member) = self.stack.pop() {
                self.on_stack.insert(member, false);
                component.push(member);
                if member == node {
                    break;
                }
            }
            self.components.push(component);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Payload, PriorEntry, PriorIndex, ReferenceField};
    use crate::domain::services::naming::PathDeriver;
    use crate::domain::value_objects::ClassName;

    fn spec(index: usize, layer: LayerKind, name: &str, deps: &[&str], payload: Payload) -> ClassSpec {
        ClassSpec {
            index,
            class_name: ClassName::parse(name).unwrap(),
            layer,
            description: None,
            base_name: None,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            payload,
        }
    }

    fn service(index: usize, name: &str, deps: &[&str]) -> ClassSpec {
        spec(
            index,
            LayerKind::DomainService,
            name,
            deps,
            Payload::Service {
                attributes: vec![],
                methods: vec!["run".to_string()],
            },
        )
    }

    fn check(specs: &[ClassSpec], prior: &PriorIndex) -> Vec<LayerViolationError> {
        let table = SymbolTable::build(specs, prior, &PathDeriver::default());
        check_batch(specs, &table)
    }

    #[test]
    fn domain_referencing_undeclared_adapter_is_a_violation() {
        let specs = [service(0, "Foo", &["SomeInfraAdapter"])];
        let violations = check(&specs, &PriorIndex::new());
        assert_eq!(
            violations,
            vec![LayerViolationError::Direction {
                item: SpecId::new(0, LayerKind::DomainService, "Foo"),
                field: ReferenceField::Dependency,
                target: "SomeInfraAdapter".to_string(),
                target_layer: LayerKind::InfrastructureAdapter,
            }]
        );
    }

    #[test]
    fn declared_target_layer_wins_over_convention() {
        // Named like an adapter but declared as an entity
        let specs = [
            spec(
                0,
                LayerKind::DomainEntity,
                "PriceAdapter",
                &[],
                Payload::Entity {
                    attributes: vec![],
                    methods: vec![],
                },
            ),
            service(1, "Pricing", &["PriceAdapter"]),
        ];
        assert!(check(&specs, &PriorIndex::new()).is_empty());
    }

    #[test]
    fn prior_entries_are_checked_too() {
        let prior = PriorIndex::from_entries(vec![PriorEntry::new(
            LayerKind::ApplicationUseCase,
            "Checkout",
        )]);
        let specs = [spec(
            0,
            LayerKind::InfrastructureAdapter,
            "StripeAdapter",
            &["Checkout"],
            Payload::Implementation {
                implements: "IPaymentGateway".to_string(),
                methods: vec![],
            },
        )];

        let violations = check(&specs, &prior);
        assert_eq!(violations.len(), 1);
        assert!(violations[0]
            .to_string()
            .contains("may not reference Checkout (application.use_case)"));
    }

    #[test]
    fn unknown_bare_names_are_left_to_the_resolver() {
        let specs = [service(0, "Foo", &["Mystery"])];
        assert!(check(&specs, &PriorIndex::new()).is_empty());
    }

    #[test]
    fn lateral_domain_cycle_is_reported_once() {
        let specs = [
            service(0, "A", &["B"]),
            service(1, "B", &["C"]),
            service(2, "C", &["A"]),
            service(3, "D", &["A"]),
        ];
        let violations = check(&specs, &PriorIndex::new());
        assert_eq!(
            violations,
            vec![LayerViolationError::Cycle {
                members: vec![
                    SpecId::new(0, LayerKind::DomainService, "A"),
                    SpecId::new(1, LayerKind::DomainService, "B"),
                    SpecId::new(2, LayerKind::DomainService, "C"),
                ],
            }]
        );
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let specs = [service(0, "Loop", &["Loop"])];
        let violations = check(&specs, &PriorIndex::new());
        assert!(matches!(&violations[..], [LayerViolationError::Cycle { members }] if members.len() == 1));
    }

    #[test]
    fn covered_unresolved_errors_are_suppressed() {
        let item = SpecId::new(0, LayerKind::DomainService, "Foo");
        let violations = vec![LayerViolationError::Direction {
            item: item.clone(),
            field: ReferenceField::Dependency,
            target: "SomeInfraAdapter".to_string(),
            target_layer: LayerKind::InfrastructureAdapter,
        }];
        let unresolved = vec![
            UnresolvedReferenceError::Missing {
                item: item.clone(),
                field: ReferenceField::Dependency,
                reference: "SomeInfraAdapter".to_string(),
            },
            UnresolvedReferenceError::Missing {
                item,
                field: ReferenceField::Dependency,
                reference: "Mystery".to_string(),
            },
        ];

        let kept = suppress_covered(unresolved, &violations);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].reference(), "Mystery");
    }
}
