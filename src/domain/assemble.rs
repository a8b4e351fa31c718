//! Per-code tree assembly: walks one code group's clause list in source
//! order and emits fully linked nodes via an explicit depth stack.

use tracing::{debug, instrument};

use crate::domain::clause::{Logic, Node, RawClause, OUTCOME_DEPTH};
use crate::domain::error::{DomainError, TreeResult};
use crate::domain::prefix::PrefixClassifier;
use crate::domain::reconcile::{FragmentReconciler, ReconcileStats};

/// Most recently seen (sequence, clause id) at each nesting level 0–4.
///
/// Writing a node at level L discards every deeper entry, which is what
/// closes finished subtrees. Depth is bounded, so a fixed array suffices.
#[derive(Debug, Default)]
struct DepthStack {
    slots: [Option<(u32, String)>; 5],
}

impl DepthStack {
    fn get(&self, level: i8) -> Option<&(u32, String)> {
        self.slots.get(level as usize).and_then(Option::as_ref)
    }

    /// Record a node at `level` and close all deeper subtrees.
    fn push(&mut self, level: i8, sequence: u32, id: String) {
        self.slots[level as usize] = Some((sequence, id));
        for slot in self.slots.iter_mut().skip(level as usize + 1) {
            *slot = None;
        }
    }

    /// Deepest occupied entry, scanning level 4 down to 0.
    fn deepest(&self) -> Option<&(u32, String)> {
        self.slots.iter().rev().flatten().next()
    }
}

/// Result of assembling one code group.
#[derive(Debug)]
pub struct CodeGroup {
    /// Navigable nodes in emission order
    pub nodes: Vec<Node>,
    /// Detached outcome record (codes of length ≥ 3 only)
    pub outcome: Option<Node>,
    pub stats: GroupStats,
}

/// Soft diagnostics collected while assembling one code group.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupStats {
    pub reconcile: ReconcileStats,
    /// Clauses with no recognizable prefix, attached via the
    /// deepest-ancestor fallback with a synthetic `.x<seq>` id
    pub synthetic_ids: usize,
}

/// Assembles per-code clause trees. Stateless across code groups; each
/// group owns its own depth stack.
pub struct TreeAssembler {
    classifier: PrefixClassifier,
    reconciler: FragmentReconciler,
}

impl Default for TreeAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeAssembler {
    pub fn new() -> Self {
        Self {
            classifier: PrefixClassifier::new(),
            reconciler: FragmentReconciler::new(),
        }
    }

    /// Assemble one code group into navigable nodes plus, for codes of
    /// length ≥ 3, a detached outcome record.
    ///
    /// The group's trailing `LAST`/`NEW` record supplies the outcome's
    /// taxon name and is never emitted as a node. Logic markers are mapped
    /// at emission time (`FIRST`→OR, absent→INFER); resolution to concrete
    /// AND/OR happens later over the whole dataset.
    #[instrument(level = "debug", skip(self, items), fields(code = code, clauses = items.len()))]
    pub fn assemble(&self, code: &str, items: Vec<RawClause>) -> TreeResult<CodeGroup> {
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidCode(code.to_string()));
        }
        if items.is_empty() {
            return Err(DomainError::EmptyCodeGroup(code.to_string()));
        }

        let (items, reconcile) = self.reconciler.reconcile(items);

        // The trailing terminal record names the outcome (or, for 1–2
        // letter codes, is a page reference only).
        let outcome_name = items
            .last()
            .filter(|i| i.is_terminal())
            .map(|i| i.text.trim().to_string());

        // For 3+ letter codes the header clause becomes the outcome; it
        // stays on the stack so deeper clauses can reference it as parent.
        let header_is_outcome = code.len() >= 3;

        let mut stack = DepthStack::default();
        let mut nodes = Vec::new();
        let mut outcome: Option<Node> = None;
        let mut synthetic_ids = 0;

        for item in &items {
            if item.is_terminal() {
                continue;
            }

            let (clean, display) = self.classifier.normalize(&item.text);
            let mut level = self.classifier.detect_level(&clean);
            let label = self.classifier.extract_label(&clean);
            let sequence = item.sequence;

            let (id, parent) = if level == 0 {
                (code.to_string(), None)
            } else if level > 0 && label.is_some() {
                let label = label.unwrap();
                if let Some((parent_seq, parent_id)) = stack.get(level - 1) {
                    (format!("{}.{}", parent_id, label), Some(*parent_seq))
                } else if let Some((header_seq, _)) = stack.get(0) {
                    // No parent at the expected level; attach to the header
                    (format!("{}.{}", code, label), Some(*header_seq))
                } else {
                    (format!("{}.{}", code, label), None)
                }
            } else {
                // Unknown prefix: attach to the deepest known ancestor
                // under a synthetic label
                synthetic_ids += 1;
                debug!(code, sequence, "no recognizable prefix, synthetic id");
                let entry = if let Some((parent_seq, parent_id)) = stack.deepest() {
                    (format!("{}.x{}", parent_id, sequence), Some(*parent_seq))
                } else {
                    (format!("{}.x{}", code, sequence), None)
                };
                level = level.max(0);
                entry
            };

            stack.push(level, sequence, id.clone());

            let mut node = Node {
                id,
                code: code.to_string(),
                sequence,
                parent,
                text: display,
                logic: Logic::from_marker(item.logic),
                depth: level,
                name: None,
            };

            if level == 0 && header_is_outcome {
                node.depth = OUTCOME_DEPTH;
                outcome = Some(node);
            } else {
                nodes.push(node);
            }
        }

        if let Some(outcome) = outcome.as_mut() {
            outcome.name = outcome_name;
        }

        Ok(CodeGroup {
            nodes,
            outcome,
            stats: GroupStats {
                reconcile,
                synthetic_ids,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clause::RawMarker;

    fn clause(seq: u32, logic: Option<RawMarker>, text: &str) -> RawClause {
        RawClause {
            code: None,
            sequence: seq,
            logic,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_depth_stack_closes_deeper_levels() {
        let mut stack = DepthStack::default();
        stack.push(0, 1, "A".to_string());
        stack.push(1, 2, "A.1".to_string());
        stack.push(2, 3, "A.1.a".to_string());
        stack.push(1, 4, "A.2".to_string());
        assert!(stack.get(2).is_none());
        assert_eq!(stack.deepest().unwrap().1, "A.2");
    }

    #[test]
    fn test_empty_code_group_is_fatal() {
        let assembler = TreeAssembler::new();
        assert!(matches!(
            assembler.assemble("AB", vec![]),
            Err(DomainError::EmptyCodeGroup(_))
        ));
    }

    #[test]
    fn test_non_letter_code_is_fatal() {
        let assembler = TreeAssembler::new();
        let items = vec![clause(1, None, "A. Histosols.")];
        assert!(matches!(
            assembler.assemble("A1", items),
            Err(DomainError::InvalidCode(_))
        ));
    }

    #[test]
    fn test_header_of_long_code_becomes_outcome() {
        let assembler = TreeAssembler::new();
        let items = vec![
            clause(1, None, "AAB. Other Histels that have glacic layers."),
            clause(2, Some(RawMarker::Or), "1. a glacic layer within 100 cm."),
            clause(3, Some(RawMarker::Last), "Glacistels"),
        ];
        let group = assembler.assemble("AAB", items).unwrap();
        let outcome = group.outcome.unwrap();
        assert_eq!(outcome.depth, -1);
        assert_eq!(outcome.id, "AAB");
        assert_eq!(outcome.name.as_deref(), Some("Glacistels"));
        // Child still links to the header through the stack
        assert_eq!(group.nodes.len(), 1);
        assert_eq!(group.nodes[0].id, "AAB.1");
        assert_eq!(group.nodes[0].parent, Some(1));
    }
}
