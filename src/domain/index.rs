//! Navigation indices: four lookup structures over the finished
//! navigation node set for O(1) cross-code walking.
//!
//! The cross-code hierarchy is a string-prefix relation over codes
//! (`"AAB"` is a child of `"AA"`); it is distinct from the intra-code
//! `parent_clause` links and kept in separate indices.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::clause::{Node, MAX_DEPTH};

/// Synthetic key whose children are all depth-0 codes.
pub const ROOT_KEY: &str = "root";

/// Derived, read-only lookup structures. BTreeMaps keep serialization
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavIndices {
    /// Code → representative node (last clause of the code wins)
    pub by_code: BTreeMap<String, Node>,
    /// Code → ordered child codes one letter longer; `"root"` → all
    /// depth-0 codes
    pub children_by_parent: BTreeMap<String, Vec<String>>,
    /// Code → code with its last letter removed (codes longer than one
    /// letter only)
    pub parent_by_code: BTreeMap<String, String>,
    /// Code → that code's indexed depth
    pub depth_by_code: BTreeMap<String, i8>,
}

/// Build all four indices from the deduplicated navigation set
/// (outcomes excluded).
pub fn build_indices(navigation: &[Node]) -> NavIndices {
    let mut by_code = BTreeMap::new();
    let mut depth_by_code = BTreeMap::new();
    let mut parent_by_code = BTreeMap::new();

    for node in navigation {
        by_code.insert(node.code.clone(), node.clone());
        depth_by_code.insert(node.code.clone(), node.depth);
        if node.code.len() > 1 {
            parent_by_code.insert(
                node.code.clone(),
                node.code[..node.code.len() - 1].to_string(),
            );
        }
    }

    let mut children_by_parent = BTreeMap::new();
    children_by_parent.insert(
        ROOT_KEY.to_string(),
        navigation
            .iter()
            .filter(|n| n.depth == 0)
            .map(|n| n.code.clone())
            .unique()
            .collect::<Vec<_>>(),
    );

    for code in navigation.iter().map(|n| &n.code).unique() {
        if depth_by_code[code] >= MAX_DEPTH {
            continue;
        }
        let children: Vec<String> = navigation
            .iter()
            .filter(|n| n.code.len() == code.len() + 1 && n.code.starts_with(code.as_str()))
            .map(|n| n.code.clone())
            .unique()
            .collect();
        if !children.is_empty() {
            children_by_parent.insert(code.clone(), children);
        }
    }

    NavIndices {
        by_code,
        children_by_parent,
        parent_by_code,
        depth_by_code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clause::Logic;

    fn node(code: &str, seq: u32, depth: i8) -> Node {
        Node {
            id: format!("{}.{}", code, seq),
            code: code.to_string(),
            sequence: seq,
            parent: None,
            text: String::new(),
            logic: Logic::Or,
            depth,
            name: None,
        }
    }

    #[test]
    fn test_root_children_are_depth_zero_codes() {
        let nav = vec![node("A", 1, 0), node("B", 1, 0), node("AA", 1, 1)];
        let indices = build_indices(&nav);
        assert_eq!(indices.children_by_parent[ROOT_KEY], vec!["A", "B"]);
    }

    #[test]
    fn test_child_codes_are_one_letter_longer() {
        let nav = vec![
            node("A", 1, 0),
            node("AA", 1, 1),
            node("AA", 2, 1),
            node("AB", 1, 1),
            node("AAB", 1, 1),
        ];
        let indices = build_indices(&nav);
        assert_eq!(indices.children_by_parent["A"], vec!["AA", "AB"]);
        // De-duplicated despite AA having two clauses
        assert_eq!(indices.children_by_parent["AA"], vec!["AAB"]);
        assert!(!indices.children_by_parent.contains_key("AAB"));
    }

    #[test]
    fn test_parent_by_code_strips_last_letter() {
        let nav = vec![node("A", 1, 0), node("AAB", 1, 1)];
        let indices = build_indices(&nav);
        assert_eq!(indices.parent_by_code.get("AAB").map(String::as_str), Some("AA"));
        assert!(!indices.parent_by_code.contains_key("A"));
    }

    #[test]
    fn test_by_code_is_last_write_wins() {
        let nav = vec![node("AA", 1, 1), node("AA", 2, 1)];
        let indices = build_indices(&nav);
        assert_eq!(indices.by_code["AA"].sequence, 2);
        assert_eq!(indices.depth_by_code["AA"], 1);
    }
}
