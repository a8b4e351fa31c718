//! Taxonomic name tables and content-pattern name derivation.
//!
//! The codes file maps codes to taxon names directly; additional parent
//! names are derived from children's clause text: `"AAB. Glacistels
//! that..."` names the parent code `"AA"` as `"Glacistels"`. Derived
//! names never overwrite existing entries.

use std::collections::{BTreeMap, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::clause::Node;

/// One entry of the source codes file (`{code, name}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeName {
    pub code: String,
    pub name: String,
}

/// Split the codes file into order names (single-letter codes) and the
/// full code→name table.
pub fn build_names(
    codes: &[CodeName],
) -> (BTreeMap<String, String>, BTreeMap<String, String>) {
    let mut order_names = BTreeMap::new();
    let mut code_names = BTreeMap::new();
    for entry in codes {
        code_names.insert(entry.code.clone(), entry.name.clone());
        if entry.code.len() == 1 {
            order_names.insert(entry.code.clone(), entry.name.clone());
        }
    }
    (order_names, code_names)
}

/// Derives taxon names from clause content patterns.
pub struct NameDeriver {
    code_prefix: Regex,
    other_prefix: Regex,
}

impl Default for NameDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl NameDeriver {
    pub fn new() -> Self {
        Self {
            code_prefix: Regex::new(r"^[A-Z]+[.:]\s*").unwrap(),
            other_prefix: Regex::new(r"^Other\s+").unwrap(),
        }
    }

    /// Extract the taxon name a clause implies for its *parent* code.
    ///
    /// `"AAB. Other Glacistels that..."` → `"Glacistels"`. The first word
    /// after the code prefix (and an optional `"Other "`) qualifies when it
    /// is capitalized and longer than three letters.
    pub fn extract_taxon_name(&self, content: &str) -> Option<String> {
        let text = self.code_prefix.replace(content, "");
        let text = self.other_prefix.replace(text.trim(), "");
        let first_word = text
            .trim()
            .split_whitespace()
            .next()?
            .trim_end_matches(['.', ',', ';', ':']);
        if first_word.len() > 3
            && first_word.chars().next().is_some_and(char::is_uppercase)
        {
            Some(first_word.to_string())
        } else {
            None
        }
    }

    /// Fill missing parent names: order names first, then a pass over the
    /// outcomes, then the first navigation clause of each code. Returns
    /// how many names were derived from content.
    pub fn populate(
        &self,
        code_names: &mut BTreeMap<String, String>,
        order_names: &BTreeMap<String, String>,
        outcomes: &BTreeMap<String, Node>,
        navigation: &[Node],
    ) -> usize {
        for (code, name) in order_names {
            code_names.insert(code.clone(), name.clone());
        }

        let mut derived = 0;
        let mut insert = |code: &str, name: String, names: &mut BTreeMap<String, String>| {
            let parent = &code[..code.len() - 1];
            if !parent.is_empty() && !names.contains_key(parent) {
                names.insert(parent.to_string(), name);
                derived += 1;
            }
        };

        for (code, outcome) in outcomes {
            if let Some(name) = self.extract_taxon_name(&outcome.text) {
                insert(code, name, code_names);
            }
        }

        let mut seen = HashSet::new();
        for node in navigation {
            if !seen.insert(node.code.as_str()) {
                continue;
            }
            if let Some(name) = self.extract_taxon_name(&node.text) {
                insert(&node.code, name, code_names);
            }
        }

        derived
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_taxon_name() {
        let d = NameDeriver::new();
        assert_eq!(
            d.extract_taxon_name("AAA. Histels that are saturated."),
            Some("Histels".to_string())
        );
        assert_eq!(
            d.extract_taxon_name("AAB. Other Histels that have a glacic layer."),
            Some("Histels".to_string())
        );
        // Short or lowercase first words do not qualify
        assert_eq!(d.extract_taxon_name("AB. Wet soils."), None);
        assert_eq!(d.extract_taxon_name("AB. other things."), None);
    }

    #[test]
    fn test_order_names_from_single_letter_codes() {
        let codes = vec![
            CodeName {
                code: "A".to_string(),
                name: "Histosols".to_string(),
            },
            CodeName {
                code: "AA".to_string(),
                name: "Histels".to_string(),
            },
        ];
        let (order_names, code_names) = build_names(&codes);
        assert_eq!(order_names.len(), 1);
        assert_eq!(order_names["A"], "Histosols");
        assert_eq!(code_names.len(), 2);
    }
}
