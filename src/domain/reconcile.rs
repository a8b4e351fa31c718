//! Fragment reconciliation: repairs two source parsing artifacts before
//! tree assembly.
//!
//! The source criteria occasionally split one clause across record
//! boundaries (continuation fragments with no prefix) or flatten two
//! nesting levels into a single record (`"(1) ..., (a) ..."`). Both
//! repairs run per code group, merge first, then split.

use regex::Regex;
use tracing::debug;

use crate::domain::clause::RawClause;

/// Counters for the repairs applied to one code group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Continuation fragments absorbed into their preceding clause
    pub merged: usize,
    /// Flattened records split into parent + fresh sibling
    pub split: usize,
}

/// Per-code-group cleanup of source artifacts. Regexes compiled once.
pub struct FragmentReconciler {
    connector: Regex,
    prefix: Regex,
    embedded: Regex,
    flattened: Regex,
}

impl Default for FragmentReconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentReconciler {
    pub fn new() -> Self {
        Self {
            connector: Regex::new(r"^(?i)(?:or|and)\s+").unwrap(),
            prefix: Regex::new(r"^(?:[A-Z][A-Za-z]*\.|[a-z]\.\s|\d+\.?\s|\(\d+\)|\([a-z]+\))")
                .unwrap(),
            embedded: Regex::new(r"^.+?\s+\d+\.\s").unwrap(),
            flattened: Regex::new(r"(?s)^(\(\d+\)\s*[^(]+?),?\s+(\([a-z]\)\s+.+)$").unwrap(),
        }
    }

    /// Run both cleanup passes in order.
    pub fn reconcile(&self, items: Vec<RawClause>) -> (Vec<RawClause>, ReconcileStats) {
        let mut stats = ReconcileStats::default();
        let items = self.merge_continuations(items, &mut stats);
        let items = self.split_flattened(items, &mut stats);
        (items, stats)
    }

    /// Merge clauses whose text has no recognizable prefix (and no embedded
    /// numbered sub-prefix) into the nearest preceding non-terminal clause.
    /// The absorbed record is dropped from the stream. Terminal
    /// (`LAST`/`NEW`) records are never merge targets or sources.
    fn merge_continuations(
        &self,
        items: Vec<RawClause>,
        stats: &mut ReconcileStats,
    ) -> Vec<RawClause> {
        let mut merged: Vec<RawClause> = Vec::new();
        for item in items {
            if item.is_terminal() {
                merged.push(item);
                continue;
            }
            let content = item.text.trim();
            let cleaned = self.connector.replace(content, "");
            let has_prefix = self.prefix.is_match(&cleaned);
            let has_embedded = self.embedded.is_match(content);
            if !has_prefix && !has_embedded && !merged.is_empty() {
                if let Some(target) = merged.iter_mut().rev().find(|c| !c.is_terminal()) {
                    target.text = format!("{} {}", target.text.trim_end(), content);
                    stats.merged += 1;
                }
                // Fragment is absorbed (or unplaceable) either way
                continue;
            }
            merged.push(item);
        }
        merged
    }

    /// Split records of the shape `"(1) <text>, (a) <text>"` into a parent
    /// (original sequence, describes its children) and a fresh sibling
    /// (newly minted sequence, original marker).
    fn split_flattened(&self, items: Vec<RawClause>, stats: &mut ReconcileStats) -> Vec<RawClause> {
        let mut result = Vec::with_capacity(items.len());
        let mut next_sequence = items.iter().map(|i| i.sequence).max().unwrap_or(0) + 1;

        for item in items {
            if item.is_terminal() {
                result.push(item);
                continue;
            }
            let content = item.text.trim().to_string();
            if let Some(caps) = self.flattened.captures(&content) {
                let parent_text = caps
                    .get(1)
                    .unwrap()
                    .as_str()
                    .trim_end_matches(',')
                    .trim_end();
                let child_text = caps.get(2).unwrap().as_str();

                debug!(
                    code = item.code.as_deref().unwrap_or("?"),
                    sequence = item.sequence,
                    "splitting flattened sub-clause"
                );

                let mut parent = item.clone();
                parent.text = parent_text.to_string();
                result.push(parent);

                let mut child = item;
                child.text = child_text.to_string();
                child.sequence = next_sequence;
                next_sequence += 1;
                result.push(child);

                stats.split += 1;
            } else {
                result.push(item);
            }
        }
        result
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
    fn test_continuation_merges_into_previous_clause() {
        let r = FragmentReconciler::new();
        let items = vec![
            clause(1, Some(RawMarker::Or), "1. Soils that have"),
            clause(2, None, "a surface layer 40 cm thick."),
        ];
        let (out, stats) = r.reconcile(items);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "1. Soils that have a surface layer 40 cm thick.");
        assert_eq!(stats.merged, 1);
    }

    #[test]
    fn test_terminal_records_pass_through() {
        let r = FragmentReconciler::new();
        let items = vec![
            clause(1, Some(RawMarker::Or), "1. Soils."),
            clause(2, Some(RawMarker::Last), "Histels"),
        ];
        let (out, stats) = r.reconcile(items);
        assert_eq!(out.len(), 2);
        assert_eq!(stats.merged, 0);
        assert_eq!(stats.split, 0);
    }

    #[test]
    fn test_flattened_record_splits_with_fresh_sequence() {
        let r = FragmentReconciler::new();
        let items = vec![
            clause(3, Some(RawMarker::And), "(1) a lithic contact, (a) within 50 cm."),
            clause(7, Some(RawMarker::End), "(2) other layers."),
        ];
        let (out, stats) = r.reconcile(items);
        assert_eq!(stats.split, 1);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].text, "(1) a lithic contact");
        assert_eq!(out[0].sequence, 3);
        assert_eq!(out[1].text, "(a) within 50 cm.");
        assert_eq!(out[1].sequence, 8); // max seen (7) + 1
        assert_eq!(out[1].logic, Some(RawMarker::And));
    }
}
