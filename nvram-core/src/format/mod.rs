//! Diff and summary formatters.

pub mod diff;
pub mod json;
pub mod summary;

pub use diff::format_diff;
pub use json::format_json;
pub use summary::{summarize, GroupSummary, Summary};
