//! kstree: compiles the USDA Keys to Soil Taxonomy criteria into a
//! navigable hierarchical clause tree.
//!
//! Each source clause becomes a node with a stable id, a parent link, a
//! nesting depth (0–4, or −1 for outcome descriptions) and a resolved
//! AND/OR combination rule. Four lookup indices over the finished node
//! set let consumers walk the tree in O(1) per step.
//!
//! Layering follows hexagonal lines: `domain` is the pure compiler core,
//! `application` orchestrates the whole-dataset passes, `infrastructure`
//! does asset and document I/O, `cli` is the binary surface.

pub mod application;
pub mod cli;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{CompileStats, CompiledKeys, KeyCompiler};
pub use domain::{Logic, NavIndices, Node, RawClause, RawMarker};
pub use infrastructure::KeysDocument;
