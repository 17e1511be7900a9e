use anyhow::Result;
use nvram_core::{format_json, organize, summarize};
use nvram_script::report::{render_no_differences, render_sections};

use crate::cli::{OutputFormat, SectionsArgs};
use crate::dump::{load_diff, load_rules};

pub fn run_sections(args: SectionsArgs) -> Result<()> {
    let changed = load_diff(&args.dump)?;
    if changed.is_empty() {
        println!("{}", render_no_differences(&args.dump.input));
        return Ok(());
    }

    let (rules, opts) = load_rules(&args.rules)?;
    let (groups, factorings) = organize(&changed, &rules, &opts);
    let summary = summarize(&groups, &factorings, &opts.large);

    match args.format {
        OutputFormat::Text => println!("{}", render_sections(&summary)),
        OutputFormat::Json => println!("{}", format_json(&summary)),
    }

    Ok(())
}
