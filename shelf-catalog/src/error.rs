use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from catalog scanning and mutation.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Media directory does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Media path is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    /// Lookup miss — no entry produces the requested slug.
    #[error("No media entry matches slug: {0}")]
    NotFound(String),

    /// Two distinct entry directories produce the same slug. Never resolved
    /// silently; one of the directories has to be renamed.
    #[error("Slug '{slug}' is ambiguous: both '{first}' and '{second}' produce it")]
    SlugCollision {
        slug: String,
        first: String,
        second: String,
    },

    /// The target entry or disk directory name is already taken.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// A TV disk with the same (season, disk number) pair is already present.
    #[error("Series {season} disk {number} already exists in this entry")]
    DuplicateDisk { season: u32, number: u32 },

    #[error("Title is empty after sanitizing")]
    InvalidTitle,

    #[error("Films require a release year")]
    YearRequired,

    #[error("TV disks require season and disk numbers")]
    PlacementRequired,

    #[error("Season and disk numbers must be positive")]
    InvalidPlacement,

    /// The move into the catalog could not complete. The staging directory
    /// has been removed; the catalog is unchanged and the call can be
    /// retried.
    #[error("Failed to relocate {path}: {source}")]
    RelocationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
