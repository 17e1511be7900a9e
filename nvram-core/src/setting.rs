use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::options::LargeThresholds;
use crate::quote;

/// A single NVRAM variable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Setting {
    /// Variable name, e.g. `wan_proto`.
    pub name: String,
    /// Raw value; may span lines and contain `>` list separators.
    pub value: String,
}

impl Setting {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The `nvram set` command reproducing this setting.
    pub fn command(&self) -> String {
        quote::command(&self.name, &self.value)
    }

    /// Number of line breaks in the rendered command.
    pub fn newlines(&self) -> usize {
        self.command().matches('\n').count()
    }

    pub fn is_multiline(&self) -> bool {
        self.newlines() > 0
    }

    /// Whether the rendered command is tall or wide enough to dominate a section.
    pub fn is_large(&self, limits: &LargeThresholds) -> bool {
        let command = self.command();
        let newlines = command.matches('\n').count();
        let width = if newlines == 0 { command.len() } else { 0 };
        newlines > limits.max_lines || width > limits.max_width
    }
}

impl Display for Setting {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
