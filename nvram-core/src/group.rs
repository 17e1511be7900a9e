use serde::Serialize;

use crate::options::LargeThresholds;
use crate::setting::Setting;

/// A named section of the output script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Section title, printed as `# <name>`.
    pub name: String,
    /// Sort rank inherited from the category rule list.
    pub rank: usize,
    pub settings: Vec<Setting>,
    /// Loop header for factored groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Loop footer for factored groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Concrete instance tokens a factored group iterates over.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tokens: Vec<String>,
}

impl Group {
    pub fn new(name: impl Into<String>, rank: usize) -> Self {
        Self {
            name: name.into(),
            rank,
            settings: Vec::new(),
            prefix: None,
            suffix: None,
            tokens: Vec::new(),
        }
    }

    /// Build a loop group over `tokens` bound to the shell variable `var`.
    pub fn factored(
        name: impl Into<String>,
        rank: usize,
        var: &str,
        tokens: Vec<String>,
        settings: Vec<Setting>,
    ) -> Self {
        Self {
            name: name.into(),
            rank,
            settings,
            prefix: Some(format!("for {var} in {}; do\n", tokens.join(" "))),
            suffix: Some("done\n".to_string()),
            tokens,
        }
    }

    pub fn is_factored(&self) -> bool {
        self.prefix.is_some()
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Concrete settings this group stands for once loops are expanded.
    pub fn values(&self) -> usize {
        self.settings.len() * self.tokens.len().max(1)
    }

    /// A group holding any large setting is itself large.
    pub fn is_large(&self, limits: &LargeThresholds) -> bool {
        self.settings.iter().any(|s| s.is_large(limits))
    }

    /// Script order: normal groups before large ones, then rank, then name.
    pub fn sort_key(&self, limits: &LargeThresholds) -> (bool, usize, String) {
        (self.is_large(limits), self.rank, self.name.clone())
    }

    /// Remove the setting called `name`, returning it if present.
    pub fn take(&mut self, name: &str) -> Option<Setting> {
        let index = self.settings.iter().position(|s| s.name == name)?;
        Some(self.settings.remove(index))
    }
}
