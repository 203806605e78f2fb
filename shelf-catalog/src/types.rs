//! Catalog data model.
//!
//! These types are snapshots of what the repository found on disk at scan
//! time — they hold no live handles and can be cloned, sorted, and displayed
//! freely. Mutations go through [`crate::CatalogRepository`], never through
//! these structs.

use std::path::PathBuf;

use shelf_core::{DiskFormat, MediaKind, PlaybackCommands, format_gib, playback_commands};

use crate::name_parser;

/// One catalog unit: a film or TV show directory with its disks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    pub title: String,
    pub kind: MediaKind,
    /// Release year; present for films, `None` for TV.
    pub year: Option<u32>,
    /// Absolute path of the entry directory.
    pub path: PathBuf,
    /// Disks found inside the entry, TV disks ordered by (season, number).
    pub disks: Vec<Disk>,
    /// Linked TMDB id from `tmdb.txt`, when present.
    pub tmdb_id: Option<String>,
}

impl MediaEntry {
    /// Title with the year appended for films: `The Matrix (1999)`.
    pub fn display_title(&self) -> String {
        match (self.kind, self.year) {
            (MediaKind::Film, Some(year)) => format!("{} ({year})", self.title),
            _ => self.title.clone(),
        }
    }

    /// The URL-safe lookup slug for this entry.
    pub fn slug(&self) -> String {
        name_parser::slug(&self.title, self.year)
    }

    /// The canonical directory name (the last path component).
    pub fn dir_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Season/disk-number placement of a TV disk. Unique per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DiskPlacement {
    pub season: u32,
    pub number: u32,
}

/// One disk subdirectory inside a media entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disk {
    /// Label part of the directory name (`Disk`, `Series 1 Disk 2`, ...).
    pub label: String,
    pub format: DiskFormat,
    /// Recursive content size in bytes, resolved through the size cache.
    pub size_bytes: u64,
    /// Absolute path of the disk directory.
    pub path: PathBuf,
    /// Present for TV disks only.
    pub placement: Option<DiskPlacement>,
}

impl Disk {
    /// Human-readable size, e.g. `23.4 GB`.
    pub fn size_display(&self) -> String {
        format_gib(self.size_bytes)
    }

    /// VLC and MPV invocations for this disk. See
    /// [`shelf_core::playback_commands`] for the `prefix` semantics.
    pub fn playback(&self, prefix: Option<&str>) -> PlaybackCommands {
        playback_commands(&self.path, &self.format, prefix)
    }
}

/// The optional sidecar metadata bundle of an entry. Every field maps to one
/// file next to the disk directories; a missing file is an absent field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metadata {
    /// Contents of `tmdb.txt`.
    pub tmdb_id: Option<String>,
    /// Contents of `title.txt` — overrides the directory-name title for display.
    pub title: Option<String>,
    /// Contents of `description.txt`.
    pub description: Option<String>,
    /// Entries of the comma-separated `genre.txt`.
    pub genres: Vec<String>,
    /// Contents of `poster.jpg`.
    pub poster: Option<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(title: &str, year: u32) -> MediaEntry {
        MediaEntry {
            title: title.to_string(),
            kind: MediaKind::Film,
            year: Some(year),
            path: PathBuf::from(format!("/media/{title} ({year}) [Film]")),
            disks: Vec::new(),
            tmdb_id: None,
        }
    }

    #[test]
    fn display_title_appends_year_for_films() {
        assert_eq!(film("The Matrix", 1999).display_title(), "The Matrix (1999)");

        let tv = MediaEntry {
            title: "Doctor Who".to_string(),
            kind: MediaKind::Tv,
            year: None,
            path: PathBuf::from("/media/Doctor Who [TV]"),
            disks: Vec::new(),
            tmdb_id: None,
        };
        assert_eq!(tv.display_title(), "Doctor Who");
    }

    #[test]
    fn slug_includes_film_year() {
        assert_eq!(film("The Matrix", 1999).slug(), "the-matrix-1999");
    }
}
