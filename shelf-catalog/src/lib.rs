//! The media catalog: canonical naming, the on-disk repository, and
//! per-entry metadata sidecars.
//!
//! The directory tree under the catalog root *is* the database. Entries are
//! directories named `{Title} ({Year}) [Film]` or `{Title} [TV]`, each
//! containing one subdirectory per disk (`Disk [Blu-Ray]`,
//! `Series 1 Disk 2 [DVD]`, ...) plus optional plain-text sidecar files for
//! metadata. Everything this crate knows is derived by scanning that tree;
//! mutations go through staging directories and atomic renames so a crash
//! never leaves a half-imported disk visible.

pub mod error;
pub mod name_parser;
pub mod repository;
pub mod sidecar;
pub mod size_cache;
pub mod types;

pub use error::CatalogError;
pub use name_parser::{
    ParsedDiskName, ParsedEntryName, film_dir_name, film_disk_dir_name, parse_disk_name,
    parse_entry_name, slug, tv_dir_name, tv_disk_dir_name,
};
pub use repository::CatalogRepository;
pub use sidecar::SidecarError;
pub use types::{Disk, DiskPlacement, MediaEntry, Metadata};
