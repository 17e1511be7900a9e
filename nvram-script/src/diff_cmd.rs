use std::fs;

use anyhow::{Context, Result};
use nvram_core::format_diff;
use nvram_script::report::render_no_differences;

use crate::cli::DiffArgs;
use crate::dump::load_diff;
use crate::path_guard;

pub fn run_diff(args: DiffArgs) -> Result<()> {
    let changed = load_diff(&args.dump)?;
    if changed.is_empty() {
        println!("{}", render_no_differences(&args.dump.input));
        return Ok(());
    }

    let text = format_diff(&changed);
    match &args.output {
        Some(path) => {
            let mut sources = vec![args.dump.input.as_path()];
            sources.extend(args.dump.base.as_deref());
            path_guard::ensure_not_overwriting_dump(path, &sources)?;
            fs::write(path, text)
                .with_context(|| format!("failed to write diff file {}", path.display()))?;
        }
        None => print!("{text}"),
    }

    Ok(())
}
