use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::warn;
use nvram_core::{assemble, format_diff, format_json, organize, summarize};
use nvram_script::credentials::credential_block;
use nvram_script::report::{render_no_differences, render_warning, render_written};

use crate::cli::{GenerateArgs, OutputFormat};
use crate::dump::{load_diff, load_rules};
use crate::path_guard;

pub fn run_generate(args: GenerateArgs) -> Result<()> {
    let changed = load_diff(&args.dump)?;
    if changed.is_empty() {
        println!("{}", render_no_differences(&args.dump.input));
        return Ok(());
    }

    let mut sources: Vec<&Path> = vec![args.dump.input.as_path()];
    sources.extend(args.dump.base.as_deref());
    path_guard::ensure_not_overwriting_dump(&args.output, &sources)?;
    if let Some(diff_path) = &args.diff_output {
        path_guard::ensure_not_overwriting_dump(diff_path, &sources)?;
        path_guard::ensure_distinct_outputs(&args.output, diff_path)?;
    }

    let (rules, opts) = load_rules(&args.rules)?;
    let (groups, factorings) = organize(&changed, &rules, &opts);

    let credentials = match credential_block(&changed) {
        Some(Ok(block)) => Some(block),
        Some(Err(err)) => {
            warn!("skipping web GUI certificate: {err}");
            eprintln!("{}", render_warning(&format!("certificate block omitted: {err}")));
            None
        }
        None => None,
    };
    let script = assemble(&groups, credentials.as_deref(), &opts.large);

    if let Some(diff_path) = &args.diff_output {
        fs::write(diff_path, format_diff(&changed))
            .with_context(|| format!("failed to write diff file {}", diff_path.display()))?;
    }
    fs::write(&args.output, script)
        .with_context(|| format!("failed to write script {}", args.output.display()))?;

    let summary = summarize(&groups, &factorings, &opts.large);
    match args.format {
        OutputFormat::Text => println!("{}", render_written(&summary, &args.output)),
        OutputFormat::Json => println!("{}", format_json(&summary)),
    }

    Ok(())
}
