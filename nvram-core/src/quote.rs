//! Shell quoting for `nvram set` values.
//!
//! Strategy, in order:
//!
//! 1. A value containing `'` is double-quoted, escaping `"`, `\`, `` ` `` and
//!    any `$` followed by a non-space character.
//! 2. A value that needs no such escaping but holds `>`-separated list items
//!    or newlines is double-quoted as a block: a leading line continuation,
//!    then one list item (or original line) per line.
//! 3. Anything else gets minimal single-quoting, or none at all.

/// Separator joining list items inside a single NVRAM value.
pub const LIST_SEPARATOR: char = '>';

/// Render the command that sets `name` to `value`.
pub fn command(name: &str, value: &str) -> String {
    format!("nvram set {name}={}", quote(value))
}

/// Quote `value` so the shell reads it back byte for byte.
pub fn quote(value: &str) -> String {
    if value.contains('\'') {
        return format!("\"{}\"", escape_double(value));
    }
    if !needs_double_escape(value) {
        if !value.contains('\n') && has_list_break(value) {
            return format!("\"\\\n{}\"", break_lists(value));
        }
        if value.contains('\n') {
            return format!("\"\\\n{value}\"");
        }
    }
    single_quote(value)
}

fn is_double_special(c: char, next: Option<char>) -> bool {
    match c {
        '"' | '\\' | '`' => true,
        '$' => next.is_some_and(|n| !n.is_whitespace()),
        _ => false,
    }
}

fn needs_double_escape(value: &str) -> bool {
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if is_double_special(c, chars.peek().copied()) {
            return true;
        }
    }
    false
}

fn escape_double(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if is_double_special(c, chars.peek().copied()) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// A separator that is not the last character marks a list break.
fn has_list_break(value: &str) -> bool {
    value
        .char_indices()
        .any(|(i, c)| c == LIST_SEPARATOR && i + c.len_utf8() < value.len())
}

fn break_lists(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 16);
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == LIST_SEPARATOR && chars.peek().is_some() {
            out.push_str("\\\n");
        }
    }
    out
}

fn single_quote(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    let safe = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r#"'"'"'"#))
    }
}
