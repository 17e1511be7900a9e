//! Parsing, diffing, grouping and factoring primitives for router NVRAM dumps.
//!
//! The pipeline runs leaf-first: [`parser`] turns a dump into [`Setting`]s,
//! [`diff`] subtracts a baseline, [`classify`] buckets what is left into
//! named [`Group`]s, [`factor`] folds settings repeated across instances
//! (`wl0_*`, `wl1_*`, ...) into loops, and [`script`] renders the result with
//! [`quote`] as a shell script of `nvram set` commands.

pub mod classify;
pub mod diff;
pub mod factor;
pub mod format;
pub mod group;
pub mod options;
pub mod parser;
pub mod quote;
pub mod rules;
pub mod script;
pub mod setting;

pub use classify::{classify, fallback_category};
pub use diff::{diff, diff_texts, DiffSet};
pub use factor::{factor_groups, Factoring};
pub use format::{format_diff, format_json, summarize, GroupSummary, Summary};
pub use group::Group;
pub use options::{FactorOptions, LargeThresholds, ScriptOptions};
pub use parser::{parse, parse_file, ParseError};
pub use quote::{command, quote};
pub use rules::{CategoryRule, RuleError, RuleSet, DEFAULT_IGNORE, OTHER};
pub use script::{assemble, render_group, COMMIT_MARKER};
pub use setting::Setting;

/// Classify `diff` and, unless disabled, factor repeated instance settings.
pub fn organize(
    diff: &DiffSet,
    rules: &RuleSet,
    opts: &ScriptOptions,
) -> (Vec<Group>, Vec<Factoring>) {
    let mut groups = classify(diff, rules, opts.min_group_size);
    let factorings = if opts.factoring {
        factor_groups(&mut groups, &opts.factor)
    } else {
        Vec::new()
    };
    (groups, factorings)
}
