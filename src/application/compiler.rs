//! Pipeline orchestration: assembles every code group, then runs the
//! whole-dataset passes (logic resolution, duplicate guard, indexing).
//!
//! Code groups are independent during assembly; the resolver and the
//! duplicate guard need the complete concatenated node set, so they run
//! after all groups finish. The whole transform is sequential and
//! deterministic: same input, byte-identical output.

use std::collections::BTreeMap;

use tracing::{info, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::{
    build_indices, dedupe_clause_ids, resolve_positional_logic, NavIndices, Node, RawClause,
    TreeAssembler,
};

/// Soft diagnostics accumulated over one full compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileStats {
    pub navigation_count: usize,
    pub outcome_count: usize,
    /// Continuation fragments absorbed by the reconciler
    pub merged_fragments: usize,
    /// Flattened records split into parent + sibling
    pub split_subclauses: usize,
    /// Clauses placed via the unknown-prefix fallback
    pub synthetic_ids: usize,
    pub end_resolved: usize,
    pub infer_resolved: usize,
    pub duplicate_ids: usize,
    /// Node count per depth, outcomes (−1) included
    pub depth_distribution: BTreeMap<i8, usize>,
}

/// The frozen result of a compilation run.
#[derive(Debug)]
pub struct CompiledKeys {
    /// Navigable nodes (depth ≥ 0) in emission order
    pub navigation: Vec<Node>,
    /// Outcome records (depth −1) keyed by code
    pub outcomes: BTreeMap<String, Node>,
    pub indices: NavIndices,
    pub stats: CompileStats,
}

/// Compiles the per-code criteria map into the navigable clause tree.
pub struct KeyCompiler {
    assembler: TreeAssembler,
}

impl Default for KeyCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyCompiler {
    pub fn new() -> Self {
        Self {
            assembler: TreeAssembler::new(),
        }
    }

    /// Run the full batch transform. Fails outright on malformed input
    /// (empty dataset, empty code group, non-letter code); partial output
    /// is never produced.
    #[instrument(level = "debug", skip(self, criteria), fields(code_groups = criteria.len()))]
    pub fn compile(
        &self,
        criteria: BTreeMap<String, Vec<RawClause>>,
    ) -> ApplicationResult<CompiledKeys> {
        if criteria.is_empty() {
            return Err(ApplicationError::EmptyDataset);
        }

        let mut stats = CompileStats::default();
        let mut navigation = Vec::new();
        let mut outcome_list = Vec::new();

        for (code, items) in criteria {
            let group = self.assembler.assemble(&code, items)?;
            stats.merged_fragments += group.stats.reconcile.merged;
            stats.split_subclauses += group.stats.reconcile.split;
            stats.synthetic_ids += group.stats.synthetic_ids;
            navigation.extend(group.nodes);
            if let Some(outcome) = group.outcome {
                outcome_list.push(outcome);
            }
        }

        let counts = resolve_positional_logic(&mut navigation);
        stats.end_resolved = counts.end_resolved;
        stats.infer_resolved = counts.infer_resolved;

        stats.duplicate_ids = dedupe_clause_ids(&mut navigation, &mut outcome_list);

        for node in navigation.iter().chain(outcome_list.iter()) {
            *stats.depth_distribution.entry(node.depth).or_insert(0) += 1;
        }

        let indices = build_indices(&navigation);

        stats.navigation_count = navigation.len();
        stats.outcome_count = outcome_list.len();
        info!(
            navigation = stats.navigation_count,
            outcomes = stats.outcome_count,
            "compiled clause tree"
        );

        let outcomes = outcome_list
            .into_iter()
            .map(|o| (o.code.clone(), o))
            .collect();

        Ok(CompiledKeys {
            navigation,
            outcomes,
            indices,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset_is_fatal() {
        let compiler = KeyCompiler::new();
        assert!(matches!(
            compiler.compile(BTreeMap::new()),
            Err(ApplicationError::EmptyDataset)
        ));
    }
}
