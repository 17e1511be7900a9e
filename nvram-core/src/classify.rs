//! Bucket changed settings into named groups.

use std::collections::BTreeMap;

use log::debug;

use crate::diff::DiffSet;
use crate::group::Group;
use crate::rules::{RuleSet, OTHER};
use crate::setting::Setting;

/// Longest leading token still rendered as an acronym.
const ACRONYM_MAX_LEN: usize = 4;

/// Group `diff` by the first matching category rule.
///
/// Ignored names are dropped. Names no rule matches are grouped under a
/// label made from their leading token (`wan_x` -> `WAN`,
/// `dnsmasq_x` -> `Dnsmasq`). Such groups with fewer than `min_group_size`
/// members are merged into [`OTHER`]; groups from an explicit rule are kept
/// at any size.
pub fn classify(diff: &DiffSet, rules: &RuleSet, min_group_size: usize) -> Vec<Group> {
    let mut buckets: BTreeMap<String, Vec<Setting>> = BTreeMap::new();
    for (name, value) in diff {
        if rules.is_ignored(name) {
            continue;
        }
        let category = match rules.category_of(name) {
            Some(rule) => rule.name.clone(),
            None => fallback_category(name),
        };
        buckets
            .entry(category)
            .or_default()
            .push(Setting::new(name.as_str(), value.as_str()));
    }

    let mut groups = Vec::with_capacity(buckets.len());
    let mut other = Vec::new();
    for (name, settings) in buckets {
        let rank = rules.rank_of(&name);
        if name == OTHER {
            other.extend(settings);
        } else if rank >= rules.fallback_rank() && settings.len() < min_group_size {
            debug!("collapsing {name} ({} settings) into {OTHER}", settings.len());
            other.extend(settings);
        } else {
            let mut group = Group::new(name, rank);
            group.settings = settings;
            groups.push(group);
        }
    }

    if !other.is_empty() {
        other.sort();
        let mut group = Group::new(OTHER, rules.other_rank());
        group.settings = other;
        groups.push(group);
    }

    groups
}

/// Category label derived from a setting's own leading token.
pub fn fallback_category(name: &str) -> String {
    match name.split_once('_') {
        Some((head, _)) if !head.is_empty() => capitalize(head),
        _ => OTHER.to_string(),
    }
}

fn capitalize(part: &str) -> String {
    if part.chars().count() <= ACRONYM_MAX_LEN {
        return part.to_uppercase();
    }
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
