//! The on-disk catalog repository.
//!
//! All state is derived by scanning the catalog root; there is no separate
//! index to keep consistent. Correctness therefore rests on two rules:
//!
//! 1. Every mutation stages into a dot-prefixed temporary name and becomes
//!    visible through a single atomic `rename`. Scans ignore dot-prefixed
//!    directories, so a crashed import is invisible, not half-imported.
//! 2. Mutations (`create_entry`, `add_disk`) hold the repository's write
//!    lock from the first duplicate check through the final rename and the
//!    size-cache invalidation. Scans share a read lock and never block each
//!    other.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use shelf_core::{DiskFormat, MediaKind, dir_size};

use crate::error::CatalogError;
use crate::name_parser::{
    film_dir_name, film_disk_dir_name, parse_disk_name, parse_entry_name, tv_dir_name,
    tv_disk_dir_name,
};
use crate::sidecar;
use crate::size_cache;
use crate::types::{Disk, DiskPlacement, MediaEntry};

/// Repository over one catalog root. Cheap to share behind an `Arc`; all
/// methods take `&self`.
#[derive(Debug)]
pub struct CatalogRepository {
    root: PathBuf,
    /// Readers share, mutators exclude. Guards the directory tree and the
    /// per-entry size caches together.
    lock: RwLock<()>,
}

impl CatalogRepository {
    /// Open a repository over `root`, which must be an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let root = root.into();
        if !root.exists() {
            return Err(CatalogError::RootNotFound(root));
        }
        if !root.is_dir() {
            return Err(CatalogError::RootNotDirectory(root));
        }
        Ok(Self {
            root,
            lock: RwLock::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enumerate all catalog entries, sorted by directory name. Directories
    /// that do not parse as canonical names are skipped, not errored.
    pub fn list(&self) -> Result<Vec<MediaEntry>, CatalogError> {
        let _guard = self.lock.read().unwrap_or_else(PoisonError::into_inner);
        self.scan()
    }

    /// Look up one entry by slug.
    ///
    /// Slugs are recomputed over the full catalog on every call; two
    /// distinct directories producing the same slug make the catalog
    /// ambiguous and surface as [`CatalogError::SlugCollision`] rather than
    /// being resolved arbitrarily.
    pub fn get(&self, slug: &str) -> Result<MediaEntry, CatalogError> {
        let _guard = self.lock.read().unwrap_or_else(PoisonError::into_inner);
        let entries = self.scan()?;

        // Any collision makes slug lookup ambiguous, whichever slug was
        // asked for — surface it instead of picking a winner.
        let mut seen: HashMap<String, String> = HashMap::new();
        for entry in &entries {
            let entry_slug = entry.slug();
            if let Some(first) = seen.insert(entry_slug.clone(), entry.dir_name()) {
                return Err(CatalogError::SlugCollision {
                    slug: entry_slug,
                    first,
                    second: entry.dir_name(),
                });
            }
        }

        entries
            .into_iter()
            .find(|entry| entry.slug() == slug)
            .ok_or_else(|| CatalogError::NotFound(slug.to_string()))
    }

    /// Create a new (empty) catalog entry directory.
    ///
    /// Films require a year; TV entries ignore one. Fails with
    /// [`CatalogError::AlreadyExists`] when the canonical name is taken.
    pub fn create_entry(
        &self,
        kind: MediaKind,
        title: &str,
        year: Option<u32>,
    ) -> Result<MediaEntry, CatalogError> {
        let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);

        let dir_name = match kind {
            MediaKind::Film => {
                let year = year.ok_or(CatalogError::YearRequired)?;
                film_dir_name(title, year)
            }
            MediaKind::Tv => tv_dir_name(title),
        };
        let parsed = parse_entry_name(&dir_name).ok_or(CatalogError::InvalidTitle)?;

        let path = self.root.join(&dir_name);
        if path.exists() {
            return Err(CatalogError::AlreadyExists(dir_name));
        }
        std::fs::create_dir(&path)?;
        log::info!("Created catalog entry {dir_name}");

        Ok(MediaEntry {
            title: parsed.title,
            kind,
            year: parsed.year,
            path,
            disks: Vec::new(),
            tmdb_id: None,
        })
    }

    /// Relocate `source` into `entry` as a new disk.
    ///
    /// The move is all-or-nothing: the source tree is first moved (or, across
    /// filesystems, copied) to a dot-prefixed staging directory inside the
    /// entry, then renamed into its final name in one step. On any failure
    /// the staging directory is removed and the entry is exactly as before.
    pub fn add_disk(
        &self,
        entry: &MediaEntry,
        source: &Path,
        label: &str,
        format: &DiskFormat,
        placement: Option<DiskPlacement>,
    ) -> Result<Disk, CatalogError> {
        let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);

        if !entry.path.is_dir() {
            return Err(CatalogError::NotFound(entry.dir_name()));
        }
        if !source.is_dir() {
            return Err(CatalogError::RelocationFailed {
                path: source.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "source directory missing"),
            });
        }

        let disk_dir_name = match entry.kind {
            MediaKind::Film => film_disk_dir_name(label, format),
            MediaKind::Tv => {
                let placement = placement.ok_or(CatalogError::PlacementRequired)?;
                if placement.season == 0 || placement.number == 0 {
                    return Err(CatalogError::InvalidPlacement);
                }
                tv_disk_dir_name(placement.season, placement.number, format)
            }
        };

        self.check_disk_conflicts(entry, &disk_dir_name, placement)?;

        let target = entry.path.join(&disk_dir_name);
        let staging = entry.path.join(format!(".{disk_dir_name}.partial"));
        if staging.exists() {
            // Leftover from an interrupted import; it was never visible.
            log::warn!("Removing stale staging directory {}", staging.display());
            std::fs::remove_dir_all(&staging)?;
        }

        let moved = self.relocate_to_staging(source, &staging)?;

        // The one visible state transition.
        if let Err(err) = std::fs::rename(&staging, &target) {
            let _ = std::fs::remove_dir_all(&staging);
            return Err(CatalogError::RelocationFailed {
                path: target,
                source: err,
            });
        }

        // The copy fallback leaves the source behind until the disk is
        // safely in place.
        if !moved
            && let Err(err) = std::fs::remove_dir_all(source)
        {
            log::warn!(
                "Imported {} but could not remove source {}: {err}",
                disk_dir_name,
                source.display()
            );
        }

        // Invalidation happens inside the critical section. The new disk's
        // size is computed now and seeds the fresh cache.
        size_cache::invalidate(&entry.path)?;
        let size_bytes = dir_size(&target)?;
        let mut cache = size_cache::load(&entry.path);
        cache.insert(disk_dir_name.clone(), size_bytes);
        if let Err(err) = size_cache::save(&entry.path, &cache) {
            log::warn!("Failed to save size cache for {}: {err}", entry.dir_name());
        }

        log::info!("Added disk {disk_dir_name} to {}", entry.dir_name());

        let parsed = parse_disk_name(&disk_dir_name);
        Ok(Disk {
            label: parsed
                .as_ref()
                .map(|p| p.label.clone())
                .unwrap_or_else(|| disk_dir_name.clone()),
            format: format.clone(),
            size_bytes,
            path: target,
            placement: parsed.and_then(|p| p.placement).map(|(season, number)| DiskPlacement {
                season,
                number,
            }),
        })
    }

    // ── Scanning ────────────────────────────────────────────────────────────

    /// Scan the root for canonical entries. Callers hold the lock.
    fn scan(&self) -> Result<Vec<MediaEntry>, CatalogError> {
        if !self.root.is_dir() {
            return Err(CatalogError::RootNotFound(self.root.clone()));
        }

        let mut entries = Vec::new();
        for dir_entry in std::fs::read_dir(&self.root)? {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_dir() {
                continue;
            }
            let Some(name) = dir_entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            let Some(parsed) = parse_entry_name(&name) else {
                continue;
            };

            let path = dir_entry.path();
            let disks = self.collect_disks(&path)?;
            entries.push(MediaEntry {
                title: parsed.title,
                kind: parsed.kind,
                year: parsed.year,
                tmdb_id: sidecar::read_tmdb_id(&path),
                path,
                disks,
            });
        }

        entries.sort_by(|a, b| a.dir_name().cmp(&b.dir_name()));
        Ok(entries)
    }

    /// Collect the disks of one entry directory, resolving sizes through the
    /// per-entry cache. Cache misses are computed and written back.
    fn collect_disks(&self, entry_dir: &Path) -> Result<Vec<Disk>, CatalogError> {
        let mut cache = size_cache::load(entry_dir);
        let mut cache_updated = false;

        let mut disks = Vec::new();
        for dir_entry in std::fs::read_dir(entry_dir)? {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_dir() {
                continue;
            }
            let Some(name) = dir_entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            let Some(parsed) = parse_disk_name(&name) else {
                continue;
            };

            let path = dir_entry.path();
            let size_bytes = match cache.get(&name) {
                Some(&size) => size,
                None => {
                    let size = dir_size(&path)?;
                    cache.insert(name.clone(), size);
                    cache_updated = true;
                    size
                }
            };

            disks.push(Disk {
                label: parsed.label,
                format: parsed.format,
                size_bytes,
                path,
                placement: parsed
                    .placement
                    .map(|(season, number)| DiskPlacement { season, number }),
            });
        }

        if cache_updated
            && let Err(err) = size_cache::save(entry_dir, &cache)
        {
            log::warn!(
                "Failed to save size cache for {}: {err}",
                entry_dir.display()
            );
        }

        // TV disks in (season, number) order, film disks by label.
        disks.sort_by(|a, b| {
            a.placement
                .cmp(&b.placement)
                .then_with(|| a.label.cmp(&b.label))
        });
        Ok(disks)
    }

    // ── Mutation helpers ────────────────────────────────────────────────────

    /// Reject a disk whose directory name or (season, number) pair is taken.
    fn check_disk_conflicts(
        &self,
        entry: &MediaEntry,
        disk_dir_name: &str,
        placement: Option<DiskPlacement>,
    ) -> Result<(), CatalogError> {
        for dir_entry in std::fs::read_dir(&entry.path)? {
            let dir_entry = dir_entry?;
            let Some(name) = dir_entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name == disk_dir_name {
                return Err(CatalogError::AlreadyExists(name));
            }
            if name.starts_with('.') || !dir_entry.file_type()?.is_dir() {
                continue;
            }
            if let (Some(wanted), Some(existing)) = (
                placement,
                parse_disk_name(&name).and_then(|p| p.placement),
            ) && (wanted.season, wanted.number) == existing
            {
                return Err(CatalogError::DuplicateDisk {
                    season: wanted.season,
                    number: wanted.number,
                });
            }
        }
        Ok(())
    }

    /// Move `source` to `staging`, falling back to copy when the rename
    /// crosses filesystems. Returns `true` when the source was moved (and no
    /// longer exists), `false` when it was copied.
    fn relocate_to_staging(&self, source: &Path, staging: &Path) -> Result<bool, CatalogError> {
        if std::fs::rename(source, staging).is_ok() {
            return Ok(true);
        }

        if let Err(err) = copy_dir_all(source, staging) {
            let _ = std::fs::remove_dir_all(staging);
            return Err(CatalogError::RelocationFailed {
                path: source.to_path_buf(),
                source: err,
            });
        }
        Ok(false)
    }
}

/// Recursively copy a directory tree. Symlinks are not followed.
fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
