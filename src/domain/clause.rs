//! Domain entities: raw clauses, logic markers, and compiled tree nodes

use serde::{Deserialize, Serialize};

/// Outcome/description nodes sit below the navigable tree at this depth.
pub const OUTCOME_DEPTH: i8 = -1;

/// Deepest navigable nesting level (paren-lettered sub-clauses).
pub const MAX_DEPTH: i8 = 4;

/// Raw combination marker as annotated on a source clause.
///
/// `FIRST` opens an OR group, `END` defers to the sibling group's rule,
/// `LAST`/`NEW` mark the terminal outcome record of a code group, and
/// `NONE` (or an absent marker) leaves the rule to be inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RawMarker {
    First,
    Or,
    And,
    End,
    Last,
    New,
    None,
}

impl RawMarker {
    /// Terminal records name the code group's outcome and never become nodes.
    pub fn is_terminal(self) -> bool {
        matches!(self, RawMarker::Last | RawMarker::New)
    }
}

/// Working combination rule on a node. `End` and `Infer` are placeholders
/// that the logic resolver replaces; finished trees carry only `Or`/`And`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Logic {
    Or,
    And,
    End,
    Infer,
}

impl std::fmt::Display for Logic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Logic::Or => "OR",
            Logic::And => "AND",
            Logic::End => "END",
            Logic::Infer => "INFER",
        };
        write!(f, "{}", s)
    }
}

impl Logic {
    pub fn is_concrete(self) -> bool {
        matches!(self, Logic::Or | Logic::And)
    }

    /// Map a raw source marker to its working logic value.
    ///
    /// `FIRST` conveys "first of an OR group". Terminal markers are filtered
    /// out before emission and never reach this mapping.
    pub fn from_marker(marker: Option<RawMarker>) -> Self {
        match marker {
            Some(RawMarker::First) | Some(RawMarker::Or) => Logic::Or,
            Some(RawMarker::And) => Logic::And,
            Some(RawMarker::End) => Logic::End,
            Some(RawMarker::None) | None => Logic::Infer,
            // LAST/NEW are handled as outcome records upstream
            Some(RawMarker::Last) | Some(RawMarker::New) => Logic::Infer,
        }
    }
}

/// One decision-rule fragment of a taxonomic code, as loaded from the
/// source criteria. Field names follow the source JSON (`crit`, `clause`,
/// `logic`, `content`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawClause {
    /// Owning taxonomic code; may be implicit from the surrounding map key
    #[serde(rename = "crit", default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Order within the code group (not necessarily contiguous)
    #[serde(rename = "clause")]
    pub sequence: u32,
    /// Raw combination marker, absent when unspecified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<RawMarker>,
    /// Free-form clause text
    #[serde(rename = "content")]
    pub text: String,
}

impl RawClause {
    pub fn is_terminal(&self) -> bool {
        self.logic.is_some_and(RawMarker::is_terminal)
    }
}

/// A resolved clause in the compiled tree.
///
/// `depth` −1 marks an outcome/description node; 0–4 are the navigable
/// nesting levels (header, numbered, lettered, paren-numbered,
/// paren-lettered). After compilation `id` is globally unique and `logic`
/// is concrete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "clause_id")]
    pub id: String,
    #[serde(rename = "crit")]
    pub code: String,
    #[serde(rename = "clause")]
    pub sequence: u32,
    /// Sequence of the enclosing clause within the same code group
    #[serde(
        rename = "parent_clause",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub parent: Option<u32>,
    #[serde(rename = "content")]
    pub text: String,
    pub logic: Logic,
    pub depth: i8,
    /// Taxon name from the code group's terminal record (outcomes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Node {
    pub fn is_outcome(&self) -> bool {
        self.depth == OUTCOME_DEPTH
    }
}
