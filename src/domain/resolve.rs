//! Positional logic resolution: replaces deferred `END` and `INFER`
//! markers with concrete OR/AND over the whole concatenated node set.
//!
//! Two passes that must not be fused: pass 1 rewrites every `END` from its
//! sibling group's dominant logic; pass 2 then resolves `INFER` from child
//! context, relying on the dataset being END-free by that point.

use std::collections::HashMap;

use tracing::info;

use crate::domain::clause::{Logic, Node};

/// How many deferred markers each pass rewrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionCounts {
    pub end_resolved: usize,
    pub infer_resolved: usize,
}

/// Sibling groups keyed by (code, parent sequence), as node indices in
/// emission order. The same map serves as the child lookup in pass 2: the
/// children of node N are the group keyed by (N.code, Some(N.sequence)).
fn sibling_groups(nodes: &[Node]) -> HashMap<(String, Option<u32>), Vec<usize>> {
    let mut groups: HashMap<(String, Option<u32>), Vec<usize>> = HashMap::new();
    for (idx, node) in nodes.iter().enumerate() {
        groups
            .entry((node.code.clone(), node.parent))
            .or_default()
            .push(idx);
    }
    groups
}

/// Resolve all `END` and `INFER` markers in place.
///
/// Pass 1: within each sibling group the dominant logic is the first
/// concrete marker (default OR when every sibling defers); every `END`
/// sibling takes the dominant value. Pass 2: each `INFER` node inherits
/// its first child's concrete logic, defaults to OR when children exist
/// but none is concrete yet, and to AND when it has no children (a leaf
/// with no explicit marker is a mandatory conjunct).
pub fn resolve_positional_logic(nodes: &mut [Node]) -> ResolutionCounts {
    let groups = sibling_groups(nodes);
    let mut counts = ResolutionCounts::default();

    // Pass 1: END takes the dominant sibling logic
    for indices in groups.values() {
        let dominant = indices
            .iter()
            .map(|&i| nodes[i].logic)
            .find(|l| l.is_concrete())
            .unwrap_or(Logic::Or);
        for &i in indices {
            if nodes[i].logic == Logic::End {
                nodes[i].logic = dominant;
                counts.end_resolved += 1;
            }
        }
    }

    // Pass 2: INFER inherits from children
    for i in 0..nodes.len() {
        if nodes[i].logic != Logic::Infer {
            continue;
        }
        let child_key = (nodes[i].code.clone(), Some(nodes[i].sequence));
        nodes[i].logic = match groups.get(&child_key) {
            Some(children) => children
                .iter()
                .map(|&j| nodes[j].logic)
                .find(|l| l.is_concrete())
                .unwrap_or(Logic::Or),
            None => Logic::And,
        };
        counts.infer_resolved += 1;
    }

    if counts.end_resolved > 0 {
        info!(count = counts.end_resolved, "resolved END markers from sibling logic");
    }
    if counts.infer_resolved > 0 {
        info!(count = counts.infer_resolved, "resolved INFER markers from child logic");
    }

    counts
}
