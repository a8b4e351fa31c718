//! Duplicate guard: last-resort global uniqueness for clause ids.
//!
//! The assembler's fallback paths (header-attach, synthetic `.x<seq>`
//! labels) can mint the same id twice. Scanning in emission order
//! (navigation nodes first, then outcomes), the first occurrence keeps
//! its id, later ones get `_<sequence>` appended.

use std::collections::HashSet;

use tracing::warn;

use crate::domain::clause::Node;

/// Rewrite colliding clause ids in place; returns how many were rewritten.
pub fn dedupe_clause_ids(navigation: &mut [Node], outcomes: &mut [Node]) -> usize {
    let mut seen = HashSet::new();
    let mut rewritten = 0;

    for node in navigation.iter_mut().chain(outcomes.iter_mut()) {
        if !seen.insert(node.id.clone()) {
            node.id = format!("{}_{}", node.id, node.sequence);
            rewritten += 1;
            seen.insert(node.id.clone());
        }
    }

    if rewritten > 0 {
        warn!(count = rewritten, "resolved duplicate clause ids");
    }
    rewritten
}
