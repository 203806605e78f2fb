//! Filesystem and formatting helpers shared across the workspace.

use std::io;
use std::path::Path;

/// Total size in bytes of all regular files under `path`, recursively.
///
/// Symlinks are not followed. Directories that vanish mid-walk surface the
/// underlying I/O error rather than a partial sum.
pub fn dir_size(path: &Path) -> io::Result<u64> {
    let mut total = 0u64;
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let meta = entry.metadata()?;
        if meta.is_dir() {
            total += dir_size(&entry.path())?;
        } else if meta.is_file() {
            total += meta.len();
        }
    }
    Ok(total)
}

/// Format a byte count as fractional gibibytes for display (e.g. `23.4 GB`).
pub fn format_gib(bytes: u64) -> String {
    format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
}

/// Sanitize a title or format label for use in a directory name.
///
/// Characters that are unsafe on common filesystems are replaced with `_`
/// (double quotes become `'`), control characters are removed, runs of `_`
/// collapse to one, and the result is trimmed.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;
    for ch in name.chars() {
        let mapped = match ch {
            ':' | '/' | '\\' | '<' | '>' | '|' | '?' | '*' => Some('_'),
            '"' => Some('\''),
            c if (c as u32) < 32 => None,
            c => Some(c),
        };
        let Some(c) = mapped else { continue };
        if c == '_' {
            if prev_underscore {
                continue;
            }
            prev_underscore = true;
        } else {
            prev_underscore = false;
        }
        out.push(c);
    }
    out.trim().to_string()
}
