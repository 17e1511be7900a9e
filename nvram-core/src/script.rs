//! Render groups as the final `nvram set` shell script.

use crate::group::Group;
use crate::options::LargeThresholds;

/// Closing lines of every script.
pub const COMMIT_MARKER: &str = "# Save\nnvram commit\n";

const LOOP_INDENT: &str = "    ";

/// Render one group: `# <name>` header, single-line commands, then
/// multi-line commands separated by blank lines. Factored groups are wrapped
/// in their loop header and footer with the body indented.
pub fn render_group(group: &Group) -> String {
    let mut commands: Vec<(bool, String, &str, String)> = group
        .settings
        .iter()
        .map(|s| {
            let command = s.command();
            (command.contains('\n'), s.name.to_lowercase(), s.name.as_str(), command)
        })
        .collect();
    commands.sort();

    let indent = if group.is_factored() { LOOP_INDENT } else { "" };
    let (multi, single): (Vec<_>, Vec<_>) = commands.into_iter().partition(|c| c.0);

    let mut out = format!("# {}\n", group.name);
    out.push_str(group.prefix.as_deref().unwrap_or_default());
    for (_, _, _, command) in &single {
        out.push_str(&format!("{indent}{command}\n"));
    }
    let multi: Vec<String> = multi
        .iter()
        .map(|(_, _, _, command)| format!("{indent}{command}\n"))
        .collect();
    out.push_str(&multi.join("\n"));
    out.push_str(group.suffix.as_deref().unwrap_or_default());
    out
}

/// Assemble the script: groups ordered by `(large, rank, name)`, the
/// optional credential block, then [`COMMIT_MARKER`]. Sections are
/// separated by a blank line.
pub fn assemble(groups: &[Group], credentials: Option<&str>, limits: &LargeThresholds) -> String {
    let mut ordered: Vec<&Group> = groups.iter().collect();
    ordered.sort_by_cached_key(|group| group.sort_key(limits));

    let mut sections: Vec<String> = ordered.into_iter().map(render_group).collect();
    if let Some(block) = credentials {
        sections.push(format!("{}\n", block.trim_matches('\n')));
    }
    sections.push(COMMIT_MARKER.to_string());
    sections.join("\n")
}
