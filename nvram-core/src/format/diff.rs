use crate::diff::DiffSet;

/// Format a diff in dump syntax, one `name=value` stanza per setting.
pub fn format_diff(diff: &DiffSet) -> String {
    diff.iter()
        .map(|(name, value)| format!("{name}={value}\n"))
        .collect()
}
