use std::path::Path;

use colored::Colorize;
use nvram_core::{Factoring, Summary};

/// Render the result line of a successful `generate`.
///
/// The count is [`Summary::values`]: settings the script sets, with each loop
/// body counted once per token. Ignored names are not part of it, so it can
/// be lower than the number of changed settings in the diff.
pub fn render_written(summary: &Summary, output: &Path) -> String {
    let mut out = vec![format!(
        "{} values written to {}",
        summary.values,
        output.display()
    )
    .green()
    .to_string()];
    out.extend(summary.factorings.iter().map(render_factoring));
    out.join("\n")
}

/// Render one loop chosen by the factoring engine.
pub fn render_factoring(factoring: &Factoring) -> String {
    format!(
        "  loop ${} over {}: {} keys, {} lines saved",
        factoring.var,
        factoring.tokens.join(" "),
        factoring.keys,
        factoring.savings
    )
    .cyan()
    .to_string()
}

/// Render the section inventory in script order.
pub fn render_sections(summary: &Summary) -> String {
    let mut out = Vec::with_capacity(summary.groups.len() + 2);
    out.push("sections".to_string());
    for group in &summary.groups {
        let mut line = format!(
            "- {}: rank={} settings={}",
            group.name, group.rank, group.settings
        );
        if group.large {
            line.push_str(" large");
        }
        if !group.tokens.is_empty() {
            line.push_str(&format!(" loop={}", group.tokens.join(",")));
        }
        out.push(line);
    }
    out.push(
        format!(
            "total: values={} commands={} lines_saved={}",
            summary.values, summary.settings, summary.lines_saved
        )
        .cyan()
        .to_string(),
    );
    out.join("\n")
}

/// Render the notice for an input identical to its baseline.
pub fn render_no_differences(input: &Path) -> String {
    format!("no differences in {}; nothing written", input.display())
        .yellow()
        .to_string()
}

pub fn render_warning(message: &str) -> String {
    format!("warning: {message}").yellow().to_string()
}
