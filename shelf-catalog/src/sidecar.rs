//! Metadata sidecar files.
//!
//! Each entry directory can carry up to five sidecars next to its disk
//! subdirectories:
//! ```text
//! tmdb.txt         — numeric TMDB id
//! title.txt        — display-title override
//! description.txt  — synopsis
//! genre.txt        — comma-separated genre list
//! poster.jpg       — poster image
//! ```
//! All metadata is optional: a missing file is an absent field, never an
//! error. Individual fields can be written independently, but linking an
//! entry to a TMDB id replaces the whole bundle in one operation — a changed
//! id must never leave stale derived fields behind. There is deliberately no
//! way to remove an id; it can only be changed to another one.

use std::io;
use std::path::{Path, PathBuf};

use shelf_tmdb::{FetchedMetadata, ProviderError, TitleProvider, is_valid_tmdb_id};
use thiserror::Error;

use crate::types::{MediaEntry, Metadata};

pub const TMDB_FILE: &str = "tmdb.txt";
pub const TITLE_FILE: &str = "title.txt";
pub const DESCRIPTION_FILE: &str = "description.txt";
pub const GENRE_FILE: &str = "genre.txt";
pub const POSTER_FILE: &str = "poster.jpg";

/// Errors from sidecar reads and writes.
#[derive(Debug, Error)]
pub enum SidecarError {
    #[error("Invalid TMDB id: {0:?}")]
    InvalidId(String),

    /// The provider rejected the id or could not be reached. Existing
    /// sidecars are untouched when this is returned.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Read the full metadata bundle of an entry.
pub fn read(entry: &MediaEntry) -> Result<Metadata, SidecarError> {
    let dir = entry.path.as_path();
    Ok(Metadata {
        tmdb_id: read_trimmed(&dir.join(TMDB_FILE))?,
        title: read_trimmed(&dir.join(TITLE_FILE))?,
        description: read_trimmed(&dir.join(DESCRIPTION_FILE))?,
        genres: read_genres(&dir.join(GENRE_FILE))?,
        poster: read_optional_bytes(&dir.join(POSTER_FILE))?,
    })
}

/// Read just the linked TMDB id of an entry directory.
pub fn read_tmdb_id(entry_dir: &Path) -> Option<String> {
    read_trimmed(&entry_dir.join(TMDB_FILE)).ok().flatten()
}

/// Record an id chosen at import time. Never overwrites an existing link —
/// an id, once set, only changes through [`set_tmdb_link`]. Returns whether
/// the id was written.
pub fn init_tmdb_id(entry_dir: &Path, id: &str) -> Result<bool, SidecarError> {
    if !is_valid_tmdb_id(id) {
        return Err(SidecarError::InvalidId(id.to_string()));
    }
    if read_tmdb_id(entry_dir).is_some() {
        return Ok(false);
    }
    write_atomic(&entry_dir.join(TMDB_FILE), id.as_bytes())?;
    Ok(true)
}

/// Write (or overwrite) the display-title override.
pub fn set_title_override(entry: &MediaEntry, title: &str) -> Result<(), SidecarError> {
    write_atomic(&entry.path.join(TITLE_FILE), title.trim().as_bytes())?;
    Ok(())
}

/// Write (or overwrite) the description.
pub fn set_description(entry: &MediaEntry, description: &str) -> Result<(), SidecarError> {
    write_atomic(
        &entry.path.join(DESCRIPTION_FILE),
        description.trim().as_bytes(),
    )?;
    Ok(())
}

/// Write (or overwrite) the genre list as comma-separated text.
pub fn set_genres(entry: &MediaEntry, genres: &[String]) -> Result<(), SidecarError> {
    let joined = genres
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    write_atomic(&entry.path.join(GENRE_FILE), joined.as_bytes())?;
    Ok(())
}

/// Validate `id`, fetch its metadata through the provider, and replace the
/// entry's whole bundle. A provider failure leaves every sidecar untouched.
pub fn link_with_provider(
    entry: &MediaEntry,
    provider: &dyn TitleProvider,
    id: &str,
) -> Result<Metadata, SidecarError> {
    if !is_valid_tmdb_id(id) {
        return Err(SidecarError::InvalidId(id.to_string()));
    }
    let fetched = provider.fetch_metadata(entry.kind, id)?;
    set_tmdb_link(entry, id, &fetched)
}

/// Replace the entry's metadata bundle with `id` and the fields fetched for
/// it.
///
/// All five sidecars are staged as temporary files first — any failure there
/// aborts with the previous bundle intact — and only then renamed into
/// place, so readers never observe a mix of old and new fields.
pub fn set_tmdb_link(
    entry: &MediaEntry,
    id: &str,
    fetched: &FetchedMetadata,
) -> Result<Metadata, SidecarError> {
    if !is_valid_tmdb_id(id) {
        return Err(SidecarError::InvalidId(id.to_string()));
    }

    let dir = entry.path.as_path();
    let genres = fetched
        .genres
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    let mut files: Vec<(&str, &[u8])> = vec![
        (TMDB_FILE, id.as_bytes()),
        (TITLE_FILE, fetched.title.trim().as_bytes()),
        (DESCRIPTION_FILE, fetched.overview.trim().as_bytes()),
        (GENRE_FILE, genres.as_bytes()),
    ];
    if let Some(poster) = &fetched.poster {
        files.push((POSTER_FILE, poster));
    }

    // Stage everything first: all the fallible writes happen before the
    // first visible change, so a failure aborts with the old bundle intact.
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::new();
    for (name, bytes) in &files {
        let tmp = dir.join(format!(".{name}.tmp"));
        if let Err(err) = std::fs::write(&tmp, bytes) {
            for (tmp, _) in &staged {
                let _ = std::fs::remove_file(tmp);
            }
            let _ = std::fs::remove_file(&tmp);
            return Err(err.into());
        }
        staged.push((tmp, dir.join(name)));
    }

    for (tmp, target) in &staged {
        std::fs::rename(tmp, target)?;
    }

    // A fetch without a poster means the old poster no longer belongs to the
    // linked id.
    if fetched.poster.is_none() {
        match std::fs::remove_file(dir.join(POSTER_FILE)) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
    }

    read(entry)
}

// ── File helpers ────────────────────────────────────────────────────────────

/// Read a text sidecar; missing file → `None`, blank content → `None`.
fn read_trimmed(path: &Path) -> Result<Option<String>, SidecarError> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let trimmed = text.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Read `genre.txt` into a list; missing file → empty list.
fn read_genres(path: &Path) -> Result<Vec<String>, SidecarError> {
    let Some(text) = read_trimmed(path)? else {
        return Ok(Vec::new());
    };
    Ok(text
        .split(',')
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect())
}

/// Read a binary sidecar; missing file → `None`.
fn read_optional_bytes(path: &Path) -> Result<Option<Vec<u8>>, SidecarError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Write a file via tmp + rename so readers never see partial content.
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Err(io::Error::other("sidecar path has no parent"));
    };
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return Err(io::Error::other("sidecar path has no file name"));
    };
    let tmp = parent.join(format!(".{name}.tmp"));
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
