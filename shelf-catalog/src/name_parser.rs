//! Parser and formatter for the canonical directory naming convention.
//!
//! Catalog entries and disks encode their identity in their directory names:
//! ```text
//! The Matrix (1999) [Film]          — film entry
//! Doctor Who [TV]                   — TV entry
//! Disk [Blu-Ray]                    — film disk
//! Bonus Features [DVD]              — film disk with a custom label
//! Series 1 Disk 2 [DVD]             — TV disk
//! ```
//!
//! Parsing and formatting must agree exactly: every name this module
//! produces parses back to the same components, and directories that do not
//! match any pattern are not catalog data.

use shelf_core::{DiskFormat, MediaKind, sanitize_name};

/// Parsed components of an entry directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntryName {
    pub title: String,
    pub kind: MediaKind,
    /// Release year; always present for films, never for TV.
    pub year: Option<u32>,
}

/// Parsed components of a disk directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDiskName {
    /// Everything before the bracketed format (`Disk`, `Series 1 Disk 2`, ...).
    pub label: String,
    pub format: DiskFormat,
    /// (season, disk number) when the label follows the TV placement form.
    pub placement: Option<(u32, u32)>,
}

/// Parse an entry directory name. Names matching neither the film nor the TV
/// pattern return `None` — the caller skips them.
pub fn parse_entry_name(name: &str) -> Option<ParsedEntryName> {
    if let Some(rest) = name.strip_suffix(" [Film]") {
        let inner = rest.strip_suffix(')')?;
        let (title, year) = inner.rsplit_once(" (")?;
        if title.is_empty() || year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        return Some(ParsedEntryName {
            title: title.to_string(),
            kind: MediaKind::Film,
            year: year.parse().ok(),
        });
    }

    if let Some(title) = name.strip_suffix(" [TV]") {
        if title.is_empty() {
            return None;
        }
        return Some(ParsedEntryName {
            title: title.to_string(),
            kind: MediaKind::Tv,
            year: None,
        });
    }

    None
}

/// Parse a disk directory name: `{label} [{format}]`.
///
/// Both parts must be non-empty. Labels of the form `Series N Disk M`
/// additionally yield a placement pair.
pub fn parse_disk_name(name: &str) -> Option<ParsedDiskName> {
    let inner = name.strip_suffix(']')?;
    let (label, format) = inner.rsplit_once(" [")?;
    if label.is_empty() || format.is_empty() {
        return None;
    }
    Some(ParsedDiskName {
        label: label.to_string(),
        format: DiskFormat::from_label(format),
        placement: parse_placement(label),
    })
}

/// Extract (season, disk) from a `Series N Disk M` label.
fn parse_placement(label: &str) -> Option<(u32, u32)> {
    let rest = label.strip_prefix("Series ")?;
    let (season, disk) = rest.split_once(" Disk ")?;
    let season: u32 = season.parse().ok()?;
    let disk: u32 = disk.parse().ok()?;
    Some((season, disk))
}

/// Canonical directory name for a film entry.
pub fn film_dir_name(title: &str, year: u32) -> String {
    format!("{} ({year}) [Film]", sanitize_name(title))
}

/// Canonical directory name for a TV entry.
pub fn tv_dir_name(title: &str) -> String {
    format!("{} [TV]", sanitize_name(title))
}

/// Disk directory name for a film disk. An empty label falls back to the
/// conventional `Disk`.
pub fn film_disk_dir_name(label: &str, format: &DiskFormat) -> String {
    let mut label = sanitize_name(label);
    if label.is_empty() {
        label = "Disk".to_string();
    }
    format!("{label} [{}]", sanitize_name(format.as_str()))
}

/// Disk directory name for a TV disk.
pub fn tv_disk_dir_name(season: u32, disk: u32, format: &DiskFormat) -> String {
    format!(
        "Series {season} Disk {disk} [{}]",
        sanitize_name(format.as_str())
    )
}

/// Derive the URL-safe slug for an entry: the title lower-cased with runs of
/// non-alphanumerics collapsed to `-`, plus the year for films (so remakes
/// stay distinct).
pub fn slug(title: &str, year: Option<u32>) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if let Some(year) = year {
        if !out.is_empty() {
            out.push('-');
        }
        out.push_str(&year.to_string());
    }
    out
}
