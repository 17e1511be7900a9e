use anyhow::{Context, Result};
use log::info;
use nvram_core::{diff, parse_file, DiffSet, FactorOptions, RuleSet, ScriptOptions};

use crate::cli::{DumpArgs, RulesArgs};

/// Parse the input and optional base dumps and diff them.
pub fn load_diff(args: &DumpArgs) -> Result<DiffSet> {
    let input = parse_file(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let base = args
        .base
        .as_ref()
        .map(|path| parse_file(path).with_context(|| format!("failed to read {}", path.display())))
        .transpose()?;

    let changed = diff(&input, base.as_deref());
    info!(
        "{} settings parsed, {} differ from {}",
        input.len(),
        changed.len(),
        args.base
            .as_ref()
            .map_or_else(|| "an empty base".to_string(), |p| p.display().to_string())
    );
    Ok(changed)
}

/// Resolve category rules and pipeline options from the command line.
pub fn load_rules(args: &RulesArgs) -> Result<(RuleSet, ScriptOptions)> {
    let (rules, source) = nvram_script::categories::resolve_rules(args.rules.as_deref())
        .context("failed to load category rules")?;
    info!("using category rules from {source}");

    let opts = ScriptOptions {
        min_group_size: args.min_group_size,
        factoring: !args.no_factor,
        factor: FactorOptions {
            min_keys: args.min_keys,
            ..FactorOptions::default()
        },
        ..ScriptOptions::default()
    };
    Ok((rules, opts))
}
