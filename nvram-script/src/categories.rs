use std::fs;
use std::path::Path;

use nvram_core::{CategoryRule, RuleError, RuleSet, DEFAULT_IGNORE};
use serde::Deserialize;
use thiserror::Error;

/// One `[[category]]` table. Entries without a pattern are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct CategoryEntry {
    name: String,
    #[serde(default)]
    pattern: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    /// Replaces the default ignore patterns when present.
    #[serde(default)]
    ignore: Option<Vec<String>>,
    #[serde(default, rename = "category")]
    categories: Vec<CategoryEntry>,
}

/// Errors returned when loading category rule files.
#[derive(Debug, Error)]
pub enum RulesLoadError {
    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse rules file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid rules in {path}: {source}")]
    Rules { path: String, source: RuleError },
}

/// Load category rules from a TOML file.
pub fn load_rules(path: &Path) -> Result<RuleSet, RulesLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| RulesLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_rules(&raw, path.display().to_string())
}

/// Built-in category rules.
pub fn default_rules() -> Result<RuleSet, RulesLoadError> {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/rules/categories.toml"));
    parse_rules(embedded, "embedded rules".to_string())
}

/// Rules from `path` when given, the embedded defaults otherwise, along with
/// a label naming where they came from.
pub fn resolve_rules(path: Option<&Path>) -> Result<(RuleSet, String), RulesLoadError> {
    match path {
        Some(path) => Ok((load_rules(path)?, format!("file:{}", path.display()))),
        None => Ok((default_rules()?, "embedded".to_string())),
    }
}

fn parse_rules(raw: &str, path: String) -> Result<RuleSet, RulesLoadError> {
    let parsed: RulesFile = toml::from_str(raw).map_err(|source| RulesLoadError::Parse {
        path: path.clone(),
        source,
    })?;

    let categories = parsed
        .categories
        .into_iter()
        .filter_map(|entry| Some(CategoryRule::new(entry.name, entry.pattern?)))
        .collect();
    let rules = match &parsed.ignore {
        Some(ignore) => RuleSet::with_ignore(categories, ignore.as_slice()),
        None => RuleSet::with_ignore(categories, DEFAULT_IGNORE),
    };
    rules.map_err(|source| RulesLoadError::Rules { path, source })
}
