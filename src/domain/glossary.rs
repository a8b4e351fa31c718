//! Glossary construction from the source feature list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One entry of the source feature list (`{name, description}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A glossary term keyed by its derived id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub id: String,
    pub term: String,
    pub definition: String,
}

/// Derive the glossary id for a term: lowercased, spaces and hyphens to
/// underscores, commas dropped, truncated to 50 characters.
pub fn term_id(term: &str) -> String {
    term.to_lowercase()
        .replace(' ', "_")
        .replace(',', "")
        .replace('-', "_")
        .chars()
        .take(50)
        .collect()
}

/// Build the glossary map from the feature list; entries with empty names
/// are skipped.
pub fn build_glossary(features: &[Feature]) -> BTreeMap<String, GlossaryEntry> {
    let mut glossary = BTreeMap::new();
    for feature in features {
        let term = feature.name.trim();
        if term.is_empty() {
            continue;
        }
        let id = term_id(term);
        glossary.insert(
            id.clone(),
            GlossaryEntry {
                id,
                term: term.to_string(),
                definition: feature.description.clone(),
            },
        );
    }
    glossary
}
