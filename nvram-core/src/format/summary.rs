use serde::Serialize;

use crate::factor::Factoring;
use crate::group::Group;
use crate::options::LargeThresholds;

/// Per-group row of a [`Summary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub name: String,
    pub rank: usize,
    pub settings: usize,
    pub large: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tokens: Vec<String>,
}

/// Serializable overview of an organized diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Concrete settings the script reproduces.
    pub values: usize,
    /// Commands written, counting each loop body once.
    pub settings: usize,
    pub groups: Vec<GroupSummary>,
    pub factorings: Vec<Factoring>,
    pub lines_saved: usize,
}

/// Summarize groups in script order.
pub fn summarize(groups: &[Group], factorings: &[Factoring], limits: &LargeThresholds) -> Summary {
    let mut ordered: Vec<&Group> = groups.iter().collect();
    ordered.sort_by_cached_key(|group| group.sort_key(limits));

    Summary {
        values: groups.iter().map(Group::values).sum(),
        settings: groups.iter().map(Group::len).sum(),
        groups: ordered
            .into_iter()
            .map(|group| GroupSummary {
                name: group.name.clone(),
                rank: group.rank,
                settings: group.len(),
                large: group.is_large(limits),
                tokens: group.tokens.clone(),
            })
            .collect(),
        factorings: factorings.to_vec(),
        lines_saved: factorings.iter().map(|f| f.savings).sum(),
    }
}
