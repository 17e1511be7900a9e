//! Set difference between an input dump and a baseline dump.

use std::collections::{BTreeMap, HashSet};

use crate::parser::parse;
use crate::setting::Setting;

/// Changed settings keyed by name.
pub type DiffSet = BTreeMap<String, String>;

/// Return the `(name, value)` pairs of `input` that are absent from `baseline`.
///
/// Without a baseline every input setting is returned. When `input` holds
/// the same name more than once, the last parsed value that survives the
/// subtraction wins.
pub fn diff(input: &[Setting], baseline: Option<&[Setting]>) -> DiffSet {
    let known: HashSet<(&str, &str)> = baseline
        .unwrap_or_default()
        .iter()
        .map(|s| (s.name.as_str(), s.value.as_str()))
        .collect();

    input
        .iter()
        .filter(|s| !known.contains(&(s.name.as_str(), s.value.as_str())))
        .map(|s| (s.name.clone(), s.value.clone()))
        .collect()
}

/// Parse both dumps and diff them.
pub fn diff_texts(input: &str, baseline: Option<&str>) -> DiffSet {
    let input = parse(input);
    let baseline = baseline.map(parse);
    diff(&input, baseline.as_deref())
}
