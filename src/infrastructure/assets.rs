//! Asset loading: the three source JSON files with shape validation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::info;

use crate::domain::{CodeName, Feature, RawClause};
use crate::infrastructure::error::{InfraError, InfraResult};

/// Taxonomic code → name mapping
pub const CODES_FILE: &str = "2022_KST_codes.json";
/// Classification criteria, a map keyed by taxonomic code
pub const CRITERIA_FILE: &str = "2022_KST_criteria_EN.json";
/// Glossary terms
pub const FEATURES_FILE: &str = "2022_KST_EN_featurelist.json";

/// The three loaded and shape-checked source files.
#[derive(Debug)]
pub struct Assets {
    pub codes: Vec<CodeName>,
    pub criteria: BTreeMap<String, Vec<RawClause>>,
    pub features: Vec<Feature>,
}

fn load_json<T: DeserializeOwned>(path: &Path) -> InfraResult<T> {
    if !path.exists() {
        return Err(InfraError::FileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| InfraError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| InfraError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid(path: PathBuf, message: &str) -> InfraError {
    InfraError::InvalidFormat {
        path,
        message: message.to_string(),
    }
}

/// Load all three asset files from `dir`. Empty collections are rejected:
/// the transform is full-batch and an empty source means a broken
/// download, not a valid dataset.
pub fn load_assets(dir: &Path) -> InfraResult<Assets> {
    let codes_path = dir.join(CODES_FILE);
    let criteria_path = dir.join(CRITERIA_FILE);
    let features_path = dir.join(FEATURES_FILE);

    let codes: Vec<CodeName> = load_json(&codes_path)?;
    if codes.is_empty() {
        return Err(invalid(codes_path, "must be a non-empty array of {code, name}"));
    }

    let criteria: BTreeMap<String, Vec<RawClause>> = load_json(&criteria_path)?;
    if criteria.is_empty() {
        return Err(invalid(
            criteria_path,
            "must be a non-empty map keyed by taxonomic code",
        ));
    }

    let features: Vec<Feature> = load_json(&features_path)?;
    if features.is_empty() {
        return Err(invalid(
            features_path,
            "must be a non-empty array of {name, description}",
        ));
    }

    info!(
        codes = codes.len(),
        code_groups = criteria.len(),
        clauses = criteria.values().map(Vec::len).sum::<usize>(),
        features = features.len(),
        "loaded source assets"
    );

    Ok(Assets {
        codes,
        criteria,
        features,
    })
}
