use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::setting::Setting;

/// Line that ends the stanza section of a dump.
pub const EOF_MARKER: &str = "---";

/// Errors that can occur while reading an NVRAM dump.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read input file.
    #[error("failed to read NVRAM dump: {0}")]
    Io(#[from] std::io::Error),
    /// Dump bytes were not valid UTF-8.
    #[error("invalid UTF-8 in NVRAM dump: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Parse dump text of the form
///
/// ```text
/// name1=value1
/// name2=multi
/// line
/// value2
/// ---
/// 1234 entries, 5678 bytes used
/// ```
///
/// into settings in stanza order. A value runs until the line before the
/// next `name=` line, a `---` marker line, or the end of text. Lines after a
/// marker that are not a stanza start are dropped, as is any other text that
/// cannot belong to a stanza. Duplicate names are kept here; the differ
/// collapses them last-wins.
pub fn parse(text: &str) -> Vec<Setting> {
    let text = strip_epilogue(text);
    let mut settings = Vec::new();
    let mut current: Option<Setting> = None;

    let mut lines = text.split('\n').peekable();
    while let Some(line) = lines.next() {
        if line == EOF_MARKER {
            settings.extend(current.take());
            continue;
        }
        if let Some((name, value)) = stanza_start(line, lines.peek().copied()) {
            settings.extend(current.take());
            current = Some(Setting::new(name, value));
        } else if let Some(setting) = current.as_mut() {
            setting.value.push('\n');
            setting.value.push_str(line);
        }
    }

    settings.extend(current);
    settings
}

/// Parse an NVRAM dump file.
pub fn parse_file(path: &Path) -> Result<Vec<Setting>, ParseError> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8(bytes)?;
    Ok(parse(&text))
}

/// Whether `name` only uses characters valid in an NVRAM variable name.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | ':' | '/'))
}

/// `name=value` when `line` opens a stanza.
///
/// `name==...` is a continuation (base64 padding, for one). So is `name=`
/// with a blank value when the following line cannot start a name, which
/// keeps a wrapped `key=` fragment inside the value above it.
fn stanza_start<'a>(line: &'a str, next: Option<&str>) -> Option<(&'a str, &'a str)> {
    let (name, value) = line.split_once('=')?;
    if !is_valid_name(name) || value.starts_with('=') {
        return None;
    }
    if value.trim().is_empty() && next.is_some_and(|next| !starts_like_name(next)) {
        return None;
    }
    Some((name, value))
}

fn starts_like_name(line: &str) -> bool {
    line.chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | ':' | '/'))
}

/// Drop a trailing `\n---\n<stats>` block, or failing that the final newline.
fn strip_epilogue(text: &str) -> &str {
    let epilogue = text.match_indices("\n---\n").find(|(at, marker)| {
        let tail = &text[at + marker.len()..];
        !tail.is_empty()
            && tail
                .chars()
                .all(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | ',' | '.'))
    });
    match epilogue {
        Some((at, _)) => &text[..at],
        None => text.strip_suffix('\n').unwrap_or(text),
    }
}
