use crate::format::summary::Summary;

/// Format a run summary as pretty JSON.
pub fn format_json(summary: &Summary) -> String {
    serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
}
