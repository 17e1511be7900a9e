//! Fold settings repeated across sibling instances into loop groups.
//!
//! Names shaped `<stem><digits>_<rest>` (`wl0_ssid`, `wan2_proto`) belong to
//! the instance token `<stem><digits>`. Each token owns a set of
//! `(suffix, value)` keys. For tokens sharing a stem, every subset of two or
//! more is scored by the lines a loop would save, and the best subset is
//! rewritten as one group whose settings are named `${var}<suffix>`. The
//! search repeats on what is left until no subset saves anything.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use serde::Serialize;

use crate::group::Group;
use crate::options::FactorOptions;
use crate::setting::Setting;

/// `(suffix, value)` of an instance setting.
type Key = (String, String);

/// token -> key -> index of the group holding the setting.
type Instances = BTreeMap<String, BTreeMap<Key, usize>>;

/// One loop materialised by [`factor_groups`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Factoring {
    /// Shell variable bound by the loop.
    pub var: String,
    /// Instance tokens the loop iterates over.
    pub tokens: Vec<String>,
    /// Settings emitted once per iteration.
    pub keys: usize,
    /// Output lines saved.
    pub savings: usize,
}

#[derive(Debug)]
struct Candidate {
    stem: String,
    tokens: Vec<String>,
    keys: BTreeSet<Key>,
    savings: i64,
}

/// Lines saved by looping `keys` settings over `instances` tokens.
pub fn savings(instances: usize, keys: usize, overhead: usize) -> i64 {
    (instances as i64 - 1) * keys as i64 - overhead as i64
}

/// Factor `groups` in place until no candidate saves lines.
///
/// Absorbed settings leave their groups, groups left empty are dropped, and
/// one factored group per loop is appended. Returns the loops in the order
/// they were chosen.
pub fn factor_groups(groups: &mut Vec<Group>, opts: &FactorOptions) -> Vec<Factoring> {
    let mut factorings = Vec::new();
    loop {
        let index = index_instances(groups);
        let Some(candidate) = best_candidate(&index, opts) else {
            break;
        };
        let Some(instances) = index.get(&candidate.stem) else {
            break;
        };
        let factoring = materialize(groups, instances, candidate);
        debug!(
            "factored {} keys over {} as ${} (saves {} lines)",
            factoring.keys,
            factoring.tokens.join(" "),
            factoring.var,
            factoring.savings
        );
        groups.retain(|group| !group.is_empty());
        factorings.push(factoring);
    }
    factorings
}

/// Split `wl0_ssid` into stem `wl`, token `wl0` and suffix `_ssid`.
pub fn split_instance(name: &str) -> Option<(&str, &str, &str)> {
    let stem_len = name.bytes().take_while(u8::is_ascii_lowercase).count();
    if stem_len == 0 {
        return None;
    }
    let digits = name[stem_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    let (token, suffix) = name.split_at(stem_len + digits);
    suffix
        .starts_with('_')
        .then(|| (&name[..stem_len], token, suffix))
}

fn index_instances(groups: &[Group]) -> BTreeMap<String, Instances> {
    let mut index: BTreeMap<String, Instances> = BTreeMap::new();
    for (at, group) in groups.iter().enumerate() {
        if group.is_factored() {
            continue;
        }
        for setting in &group.settings {
            if let Some((stem, token, suffix)) = split_instance(&setting.name) {
                index
                    .entry(stem.to_string())
                    .or_default()
                    .entry(token.to_string())
                    .or_default()
                    .insert((suffix.to_string(), setting.value.clone()), at);
            }
        }
    }
    index
}

fn best_candidate(index: &BTreeMap<String, Instances>, opts: &FactorOptions) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for (stem, instances) in index {
        if instances.len() < 2 {
            continue;
        }
        let bucket: Vec<(&str, BTreeSet<&Key>)> = instances
            .iter()
            .map(|(token, keys)| (token.as_str(), keys.keys().collect()))
            .collect();
        for chunk in bucket.chunks(opts.max_bucket.max(2)) {
            let mut search = Search {
                stem,
                bucket: chunk,
                opts,
                chosen: Vec::new(),
                best: &mut best,
            };
            search.extend(0, None);
        }
    }
    best
}

/// Depth-first walk over the power set of one bucket.
///
/// Adding a token can only shrink the shared keys, so a branch stops once
/// fewer than `min_keys` remain.
struct Search<'a, 'b> {
    stem: &'a str,
    bucket: &'a [(&'a str, BTreeSet<&'a Key>)],
    opts: &'a FactorOptions,
    chosen: Vec<&'a str>,
    best: &'b mut Option<Candidate>,
}

impl<'a> Search<'a, '_> {
    fn extend(&mut self, start: usize, common: Option<&BTreeSet<&'a Key>>) {
        let bucket = self.bucket;
        for at in start..bucket.len() {
            let (token, keys) = &bucket[at];
            let shared: BTreeSet<&'a Key> = match common {
                Some(common) => common.intersection(keys).copied().collect(),
                None => keys.clone(),
            };
            if shared.len() < self.opts.min_keys {
                continue;
            }

            self.chosen.push(*token);
            if self.chosen.len() >= 2 {
                self.consider(&shared);
            }
            self.extend(at + 1, Some(&shared));
            self.chosen.pop();
        }
    }

    fn consider(&mut self, shared: &BTreeSet<&'a Key>) {
        let saved = savings(self.chosen.len(), shared.len(), self.opts.overhead);
        let improves = match self.best.as_ref() {
            Some(best) => saved > best.savings,
            None => true,
        };
        if saved > 0 && improves {
            *self.best = Some(Candidate {
                stem: self.stem.to_string(),
                tokens: self.chosen.iter().map(|t| t.to_string()).collect(),
                keys: shared.iter().map(|&key| key.clone()).collect(),
                savings: saved,
            });
        }
    }
}

fn materialize(groups: &mut Vec<Group>, instances: &Instances, candidate: Candidate) -> Factoring {
    let var = common_prefix(&candidate.tokens);

    let mut sources = BTreeSet::new();
    for token in &candidate.tokens {
        for key in &candidate.keys {
            if let Some(&at) = instances.get(token).and_then(|keys| keys.get(key)) {
                sources.insert(at);
            }
        }
    }
    let (rank, base) = sources
        .iter()
        .map(|&at| (groups[at].rank, groups[at].name.clone()))
        .min()
        .unwrap_or_default();

    for token in &candidate.tokens {
        for key in &candidate.keys {
            let (suffix, _) = key;
            if let Some(&at) = instances.get(token).and_then(|keys| keys.get(key)) {
                let removed = groups[at].take(&format!("{token}{suffix}"));
                debug_assert!(removed.is_some(), "indexed setting {token}{suffix} missing");
            }
        }
    }

    let settings = candidate
        .keys
        .iter()
        .map(|(suffix, value)| Setting::new(format!("${{{var}}}{suffix}"), value.as_str()))
        .collect();
    let name = format!("{base} ({})", candidate.tokens.join(" "));
    let factored = Group::factored(name, rank, &var, candidate.tokens.clone(), settings);

    let factoring = Factoring {
        var,
        tokens: candidate.tokens,
        keys: candidate.keys.len(),
        savings: usize::try_from(candidate.savings).unwrap_or_default(),
    };
    groups.push(factored);
    factoring
}

/// Longest shared leading text of `tokens`.
fn common_prefix(tokens: &[String]) -> String {
    let Some((first, rest)) = tokens.split_first() else {
        return String::new();
    };
    let len = rest.iter().fold(first.len(), |len, token| {
        first
            .bytes()
            .zip(token.bytes())
            .take(len)
            .take_while(|(a, b)| a == b)
            .count()
    });
    first[..len].to_string()
}

#[cfg(test)]
mod tests {
    use super::{common_prefix, savings, split_instance};

    #[test]
    fn splits_instance_tokens() {
        assert_eq!(split_instance("wl0_ssid"), Some(("wl", "wl0", "_ssid")));
        assert_eq!(split_instance("wan_proto"), Some(("wan", "wan", "_proto")));
        assert_eq!(split_instance("wan2_hwname"), Some(("wan", "wan2", "_hwname")));
        assert_eq!(split_instance("wl0.1_ssid"), None);
        assert_eq!(split_instance("rrule0"), None);
        assert_eq!(split_instance("0wan_x"), None);
        assert_eq!(split_instance("${wl}_ssid"), None);
    }

    #[test]
    fn common_prefix_of_tokens() {
        let tokens = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(common_prefix(&tokens(&["wl0", "wl1", "wl2"])), "wl");
        assert_eq!(common_prefix(&tokens(&["wan", "wan2"])), "wan");
        assert_eq!(common_prefix(&tokens(&["wl10", "wl11"])), "wl1");
    }

    #[test]
    fn savings_model() {
        assert_eq!(savings(3, 10, 5), 15);
        assert_eq!(savings(2, 5, 5), 0);
        assert_eq!(savings(3, 2, 5), -1);
    }
}
