//! End-to-end tests for the KeyCompiler pipeline

use std::collections::BTreeMap;

use kstree::application::KeyCompiler;
use kstree::domain::{Logic, NameDeriver, Node, RawClause, RawMarker};
use kstree::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn clause(seq: u32, logic: Option<RawMarker>, text: &str) -> RawClause {
    RawClause {
        code: None,
        sequence: seq,
        logic,
        text: text.to_string(),
    }
}

fn sample_criteria() -> BTreeMap<String, Vec<RawClause>> {
    let mut criteria = BTreeMap::new();
    criteria.insert(
        "A".to_string(),
        vec![clause(1, None, "A. Histosols.")],
    );
    criteria.insert(
        "AA".to_string(),
        vec![
            clause(1, Some(RawMarker::Or), "1. Soils that are saturated."),
            clause(2, Some(RawMarker::End), "2. Other Histosols."),
            clause(3, Some(RawMarker::Last), "Histels"),
        ],
    );
    criteria.insert(
        "AAB".to_string(),
        vec![
            clause(1, None, "AAB. Other Histels that have a glacic layer."),
            clause(2, Some(RawMarker::And), "1. a glacic layer within 100 cm."),
            clause(3, Some(RawMarker::End), "2. permafrost within 200 cm."),
            clause(4, Some(RawMarker::Last), "Glacistels"),
        ],
    );
    criteria
}

#[test]
fn given_single_leaf_clause_when_compiling_then_resolves_to_and() {
    // Act
    let compiled = KeyCompiler::new().compile(sample_criteria()).unwrap();

    // Assert
    let node = compiled
        .navigation
        .iter()
        .find(|n| n.id == "A")
        .expect("node A");
    assert_eq!(node.depth, 0);
    assert_eq!(node.parent, None);
    assert_eq!(node.logic, Logic::And);
}

#[test]
fn given_end_sibling_when_compiling_then_dominant_or_applies() {
    // Act
    let compiled = KeyCompiler::new().compile(sample_criteria()).unwrap();

    // Assert
    let aa: Vec<&Node> = compiled
        .navigation
        .iter()
        .filter(|n| n.code == "AA")
        .collect();
    assert_eq!(aa.len(), 2);
    assert_eq!(aa[0].id, "AA.1");
    assert_eq!(aa[1].id, "AA.2");
    assert!(aa.iter().all(|n| n.depth == 1));
    assert!(aa.iter().all(|n| n.logic == Logic::Or));
    // Two-letter codes are page references only, no outcome
    assert!(!compiled.outcomes.contains_key("AA"));
}

#[test]
fn given_three_letter_code_when_compiling_then_header_becomes_outcome() {
    // Act
    let compiled = KeyCompiler::new().compile(sample_criteria()).unwrap();

    // Assert
    let outcome = &compiled.outcomes["AAB"];
    assert_eq!(outcome.depth, -1);
    assert_eq!(outcome.name.as_deref(), Some("Glacistels"));
    // Its clauses still link to the header sequence
    let children: Vec<&Node> = compiled
        .navigation
        .iter()
        .filter(|n| n.code == "AAB")
        .collect();
    assert!(children.iter().all(|n| n.parent == Some(1)));
    // END resolved against the AND sibling
    assert!(children.iter().all(|n| n.logic == Logic::And));
}

#[test]
fn given_same_input_when_compiling_twice_then_output_identical() {
    // Arrange
    let compiler = KeyCompiler::new();

    // Act
    let first = compiler.compile(sample_criteria()).unwrap();
    let second = compiler.compile(sample_criteria()).unwrap();

    // Assert
    assert_eq!(first.navigation, second.navigation);
    assert_eq!(first.outcomes, second.outcomes);
    assert_eq!(first.indices, second.indices);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn given_compiled_tree_then_structural_invariants_hold() {
    // Act
    let compiled = KeyCompiler::new().compile(sample_criteria()).unwrap();

    // Assert: depth range, outcome marking, id uniqueness, concrete logic
    let all: Vec<&Node> = compiled
        .navigation
        .iter()
        .chain(compiled.outcomes.values())
        .collect();
    assert!(all.iter().all(|n| (-1..=4).contains(&n.depth)));
    assert!(compiled.navigation.iter().all(|n| n.depth >= 0));
    assert!(compiled.outcomes.values().all(|n| n.depth == -1));

    let mut ids: Vec<&str> = all.iter().map(|n| n.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), all.len());

    assert!(compiled.navigation.iter().all(|n| n.logic.is_concrete()));

    // Every parent link resolves within the code group, to the previous
    // level or to the group's header
    for node in compiled.navigation.iter().filter(|n| n.depth > 0) {
        let Some(parent_seq) = node.parent else {
            continue; // top-level synthetic
        };
        let parent = all
            .iter()
            .find(|p| p.code == node.code && p.sequence == parent_seq)
            .unwrap_or_else(|| panic!("dangling parent for {}", node.id));
        assert!(
            parent.depth == node.depth - 1 || parent.depth <= 0,
            "unexpected parent depth {} for {}",
            parent.depth,
            node.id
        );
    }
}

#[test]
fn given_colliding_fallback_ids_when_compiling_then_duplicates_rewritten() {
    // Arrange: two level-1 clauses with the same label and no header to
    // disambiguate them
    let mut criteria = BTreeMap::new();
    criteria.insert(
        "AB".to_string(),
        vec![
            clause(1, Some(RawMarker::Or), "1. a sulfuric horizon."),
            clause(2, Some(RawMarker::End), "1. sulfidic materials."),
        ],
    );

    // Act
    let compiled = KeyCompiler::new().compile(criteria).unwrap();

    // Assert
    assert_eq!(compiled.stats.duplicate_ids, 1);
    let ids: Vec<&str> = compiled.navigation.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["AB.1", "AB.1_2"]);
}

#[test]
fn given_compiled_outcomes_when_deriving_names_then_parent_named_from_child() {
    // Arrange
    let compiled = KeyCompiler::new().compile(sample_criteria()).unwrap();
    let mut code_names = BTreeMap::new();
    let order_names = BTreeMap::new();

    // Act
    let derived = NameDeriver::new().populate(
        &mut code_names,
        &order_names,
        &compiled.outcomes,
        &compiled.navigation,
    );

    // Assert: "AAB. Other Histels ..." names the parent code "AA"
    assert!(derived >= 1);
    assert_eq!(code_names.get("AA").map(String::as_str), Some("Histels"));
}
