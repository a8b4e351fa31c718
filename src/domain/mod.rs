//! Domain layer: the clause-tree compiler core
//!
//! This layer is pure and independent of external concerns (no I/O, no
//! CLI, no asset loading). Data flows left to right: raw per-code clause
//! lists → fragment reconciler → prefix classifier → per-code tree
//! assembler → (all codes concatenated) → logic resolver → duplicate
//! guard → index builder.

pub mod assemble;
pub mod clause;
pub mod dedupe;
pub mod error;
pub mod glossary;
pub mod index;
pub mod names;
pub mod prefix;
pub mod reconcile;
pub mod resolve;

pub use assemble::{CodeGroup, GroupStats, TreeAssembler};
pub use clause::{Logic, Node, RawClause, RawMarker, MAX_DEPTH, OUTCOME_DEPTH};
pub use dedupe::dedupe_clause_ids;
pub use error::{DomainError, TreeResult};
pub use glossary::{build_glossary, Feature, GlossaryEntry};
pub use index::{build_indices, NavIndices, ROOT_KEY};
pub use names::{build_names, CodeName, NameDeriver};
pub use prefix::PrefixClassifier;
pub use reconcile::{FragmentReconciler, ReconcileStats};
pub use resolve::{resolve_positional_logic, ResolutionCounts};
