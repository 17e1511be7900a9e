use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Refuse to write `output` over any dump it was generated from.
pub fn ensure_not_overwriting_dump(output: &Path, dumps: &[&Path]) -> Result<()> {
    let target = resolve(output)?;
    for dump in dumps {
        if resolve(dump)? == target {
            bail!(
                "refusing to overwrite dump: output {} is the dump {}",
                output.display(),
                dump.display()
            );
        }
    }
    Ok(())
}

/// Refuse two outputs of one run that land on the same file.
pub fn ensure_distinct_outputs(first: &Path, second: &Path) -> Result<()> {
    if resolve(first)? == resolve(second)? {
        bail!(
            "script and diff outputs are the same file: {}",
            first.display()
        );
    }
    Ok(())
}

/// Absolute, symlink-free form of `path`, whether or not it exists yet.
///
/// The deepest existing ancestor is canonicalized and the missing tail is
/// appended with `.` and `..` folded lexically.
fn resolve(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("failed to read current directory")?
            .join(path)
    };

    let mut tail: Vec<OsString> = Vec::new();
    let mut existing = absolute.as_path();
    while !existing.exists() {
        let Some(parent) = existing.parent() else {
            break;
        };
        if let Some(name) = existing.file_name() {
            tail.push(name.to_os_string());
        } else if existing.ends_with("..") {
            tail.push(OsString::from(".."));
        }
        existing = parent;
    }

    let mut resolved = existing
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", existing.display()))?;
    for part in tail.iter().rev() {
        match Path::new(part).components().next() {
            Some(Component::ParentDir) => {
                resolved.pop();
            }
            Some(Component::CurDir) | None => {}
            Some(_) => resolved.push(part),
        }
    }
    Ok(resolved)
}
