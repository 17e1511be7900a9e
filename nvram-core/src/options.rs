/// Thresholds above which a rendered command counts as large.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LargeThresholds {
    /// More line breaks than this makes a command large.
    pub max_lines: usize,
    /// A single-line command wider than this is large.
    pub max_width: usize,
}

impl Default for LargeThresholds {
    fn default() -> Self {
        Self {
            max_lines: 24,
            max_width: 128,
        }
    }
}

/// Configures the factoring search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorOptions {
    /// Minimum number of `(suffix, value)` keys every instance must share.
    pub min_keys: usize,
    /// Lines charged to every loop for its header, footer and variable.
    pub overhead: usize,
    /// Largest set of sibling instances searched as one power set.
    pub max_bucket: usize,
}

impl Default for FactorOptions {
    fn default() -> Self {
        Self {
            min_keys: 3,
            overhead: 5,
            max_bucket: 16,
        }
    }
}

/// Configures grouping, factoring and rendering of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptOptions {
    /// Fallback-named groups smaller than this merge into `Other`.
    pub min_group_size: usize,
    /// Run the factoring engine.
    pub factoring: bool,
    pub factor: FactorOptions,
    pub large: LargeThresholds,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            min_group_size: 3,
            factoring: true,
            factor: FactorOptions::default(),
            large: LargeThresholds::default(),
        }
    }
}
