use std::io;
use std::path::PathBuf;
use thiserror::Error;

use shelf_catalog::CatalogError;

use crate::session::Step;

/// Errors from import scanning and the wizard state machine.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import directory does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Import path is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    /// The chosen import candidate no longer exists on disk.
    #[error("Import source not found: {0}")]
    SourceNotFound(String),

    /// The session is not at the step this action belongs to.
    #[error("Wizard is at step {found:?}, expected {expected:?}")]
    WrongStep { expected: Step, found: Step },

    /// `add-to-existing` was chosen while the catalog has no entries.
    #[error("No catalog entries exist to add to")]
    NoExistingEntries,

    #[error("Title must not be empty")]
    TitleRequired,

    #[error("Films require a release year")]
    YearRequired,

    #[error("TV imports need season and disk numbers")]
    PlacementRequired,

    #[error("Season and disk numbers must be positive")]
    InvalidPlacement,

    /// Nothing was detected and no manual format was supplied.
    #[error("No disk format detected; a manual format is required")]
    FormatRequired,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
