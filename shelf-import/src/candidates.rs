//! Scanning the import root for raw disk backups.

use std::path::{Path, PathBuf};

use shelf_core::{DiskFormat, classify, dir_size};

use crate::error::ImportError;

/// A raw, not-yet-cataloged source directory under the import root.
///
/// Candidates are transient: they exist in memory for the duration of a
/// wizard interaction and are re-derived from disk on every scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCandidate {
    /// Directory name under the import root.
    pub name: String,
    pub path: PathBuf,
    /// Format detected from the directory layout, `None` when unknown.
    pub detected: Option<DiskFormat>,
    /// Total content size in bytes.
    pub size_bytes: u64,
    /// Starting point for the title field, derived from the name.
    pub title_guess: String,
}

/// Scanner over one import root.
pub struct ImportScanner {
    root: PathBuf,
}

impl ImportScanner {
    /// Open a scanner over `root`, which must be an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ImportError> {
        let root = root.into();
        if !root.exists() {
            return Err(ImportError::RootNotFound(root));
        }
        if !root.is_dir() {
            return Err(ImportError::RootNotDirectory(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List all candidate directories, sorted by name. Files at the import
    /// root are ignored; a directory whose size cannot be computed is
    /// reported with size zero rather than dropped.
    pub fn scan(&self) -> Result<Vec<ImportCandidate>, ImportError> {
        let mut candidates = Vec::new();
        for dir_entry in std::fs::read_dir(&self.root)? {
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
            candidates.push(self.build_candidate(name, dir_entry.path()));
        }
        candidates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(candidates)
    }

    /// Resolve one candidate by directory name.
    pub fn candidate(&self, name: &str) -> Result<ImportCandidate, ImportError> {
        let path = self.root.join(name);
        if !path.is_dir() {
            return Err(ImportError::SourceNotFound(name.to_string()));
        }
        Ok(self.build_candidate(name.to_string(), path))
    }

    fn build_candidate(&self, name: String, path: PathBuf) -> ImportCandidate {
        let size_bytes = match dir_size(&path) {
            Ok(size) => size,
            Err(err) => {
                log::warn!("Could not size import source {}: {err}", path.display());
                0
            }
        };
        ImportCandidate {
            detected: classify(&path),
            size_bytes,
            title_guess: title_guess(&name),
            name,
            path,
        }
    }
}

/// Turn a raw directory name into a plausible title starting point:
/// underscores become spaces and whitespace runs collapse.
fn title_guess(name: &str) -> String {
    name.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_guess_normalizes_separators() {
        assert_eq!(title_guess("THE_MATRIX_1999"), "THE MATRIX 1999");
        assert_eq!(title_guess("Doctor  Who"), "Doctor Who");
        assert_eq!(title_guess("Alien"), "Alien");
    }
}
