//! Ordered category rules used to classify setting names.

use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catch-all category; always sorts last.
pub const OTHER: &str = "Other";

/// Names never written to a script: housekeeping ids, caches, the HTTPS
/// archive blob, OS values, generated SSH keys and hardware addresses.
pub const DEFAULT_IGNORE: &[&str] = &[
    r"http_id",
    r"https_crt_file",
    r"os_\w+",
    r"sshd_\w+key",
    r"\w+_hwaddr",
    r"\w+_cache",
];

/// A named category and the pattern its setting names start with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub pattern: String,
}

impl CategoryRule {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// Errors returned when compiling category or ignore rules.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid pattern for category {name}: {source}")]
    Pattern {
        name: String,
        source: Box<regex::Error>,
    },
    #[error("invalid ignore pattern {pattern}: {source}")]
    Ignore {
        pattern: String,
        source: Box<regex::Error>,
    },
    #[error("failed to compile rule set: {0}")]
    Set(Box<regex::Error>),
}

/// Compiled category rules.
///
/// Every pattern is anchored at the start of the name and compiled into one
/// [`RegexSet`]. When several match, the rule declared first wins.
#[derive(Debug, Clone)]
pub struct RuleSet {
    categories: Vec<CategoryRule>,
    lookup: RegexSet,
    ignore: RegexSet,
}

impl RuleSet {
    /// Compile `categories` with the [`DEFAULT_IGNORE`] patterns.
    pub fn new(categories: Vec<CategoryRule>) -> Result<Self, RuleError> {
        Self::with_ignore(categories, DEFAULT_IGNORE)
    }

    /// Compile `categories` with a custom list of ignore patterns.
    pub fn with_ignore<S: AsRef<str>>(
        categories: Vec<CategoryRule>,
        ignore: &[S],
    ) -> Result<Self, RuleError> {
        let mut anchored = Vec::with_capacity(categories.len());
        for rule in &categories {
            let pattern = anchor(&rule.pattern);
            Regex::new(&pattern).map_err(|source| RuleError::Pattern {
                name: rule.name.clone(),
                source: Box::new(source),
            })?;
            anchored.push(pattern);
        }

        let mut ignored = Vec::with_capacity(ignore.len());
        for pattern in ignore {
            let anchored_ignore = anchor(pattern.as_ref());
            Regex::new(&anchored_ignore).map_err(|source| RuleError::Ignore {
                pattern: pattern.as_ref().to_string(),
                source: Box::new(source),
            })?;
            ignored.push(anchored_ignore);
        }

        Ok(Self {
            lookup: RegexSet::new(&anchored).map_err(|err| RuleError::Set(Box::new(err)))?,
            ignore: RegexSet::new(&ignored).map_err(|err| RuleError::Set(Box::new(err)))?,
            categories,
        })
    }

    pub fn categories(&self) -> &[CategoryRule] {
        &self.categories
    }

    /// Whether `name` must be dropped before classification.
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.is_match(name)
    }

    /// First declared category whose pattern matches `name`.
    pub fn category_of(&self, name: &str) -> Option<&CategoryRule> {
        let index = self.lookup.matches(name).iter().next()?;
        self.categories.get(index)
    }

    /// Sort rank of a category name.
    pub fn rank_of(&self, category: &str) -> usize {
        if category == OTHER {
            return self.other_rank();
        }
        self.categories
            .iter()
            .position(|rule| rule.name == category)
            .unwrap_or_else(|| self.fallback_rank())
    }

    /// Rank shared by categories named from the setting itself.
    pub fn fallback_rank(&self) -> usize {
        self.categories.len()
    }

    pub fn other_rank(&self) -> usize {
        self.categories.len() + 1
    }
}

fn anchor(pattern: &str) -> String {
    format!("^(?:{pattern})")
}
