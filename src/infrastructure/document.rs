//! Output document assembly and writing.
//!
//! The serialized shape is the versioned keys document consumed
//! downstream: metadata, navigation (criteria + indices), outcomes keyed
//! by code, glossary, and the taxon name tables.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::CompiledKeys;
use crate::domain::{GlossaryEntry, NavIndices, Node};
use crate::infrastructure::error::{InfraError, InfraResult};

pub const SCHEMA_VERSION: &str = "3.2.0";
pub const SOURCE: &str = "USDA Keys to Soil Taxonomy (2022)";
const DESCRIPTION: &str =
    "Optimized hierarchical criteria with separated navigation and outcomes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub schema_version: String,
    /// Human labels for nesting depths 0–4
    pub depth_labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Navigation {
    pub criteria: Vec<Node>,
    pub indices: NavIndices,
}

/// The complete output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeysDocument {
    pub version: String,
    pub generated: String,
    pub source: String,
    pub description: String,
    pub metadata: Metadata,
    pub navigation: Navigation,
    pub outcomes: BTreeMap<String, Node>,
    pub glossary: BTreeMap<String, GlossaryEntry>,
    pub order_names: BTreeMap<String, String>,
    pub code_names: BTreeMap<String, String>,
}

pub fn depth_labels() -> BTreeMap<String, String> {
    [
        ("0", "Key to Soil Orders"),
        ("1", "Key to Suborders"),
        ("2", "Key to Great Groups"),
        ("3", "Key to Subgroups"),
        ("4", "Key to Subgroups"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl KeysDocument {
    pub fn new(
        compiled: CompiledKeys,
        glossary: BTreeMap<String, GlossaryEntry>,
        order_names: BTreeMap<String, String>,
        code_names: BTreeMap<String, String>,
    ) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            generated: Local::now().format("%Y-%m-%d").to_string(),
            source: SOURCE.to_string(),
            description: DESCRIPTION.to_string(),
            metadata: Metadata {
                schema_version: SCHEMA_VERSION.to_string(),
                depth_labels: depth_labels(),
            },
            navigation: Navigation {
                criteria: compiled.navigation,
                indices: compiled.indices,
            },
            outcomes: compiled.outcomes,
            glossary,
            order_names,
            code_names,
        }
    }

    /// Serialize to `path`, creating parent directories as needed.
    pub fn write(&self, path: &Path) -> InfraResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| InfraError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string(self).map_err(|source| InfraError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, &json).map_err(|source| InfraError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = json.len(), "wrote keys document");
        Ok(())
    }
}
