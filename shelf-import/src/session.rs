//! The import wizard state machine.
//!
//! The wizard walks a fixed sequence of steps:
//! ```text
//! SelectSource → SelectMode → SelectKind → CollectIdentity
//!     → CollectPlacement → Preview → Committed
//! ```
//! (`SelectKind` is skipped when adding to an existing entry — the entry
//! already knows its kind.) Backward navigation is always allowed and keeps
//! every field that is still valid for the new path; re-choosing the mode or
//! kind clears only the fields that stop applying. Cancelling is legal from
//! any state and touches nothing on disk.
//!
//! Only the `Preview → Committed` transition mutates the filesystem, and it
//! calls the repository exactly once. A failed commit attaches the error and
//! leaves the session in `Preview` so the user can retry or cancel without
//! re-entering earlier steps.

use std::path::PathBuf;

use shelf_catalog::{
    CatalogRepository, Disk, DiskPlacement, MediaEntry, film_disk_dir_name, sidecar,
    tv_disk_dir_name,
};
use shelf_core::{DiskFormat, MediaKind};
use shelf_tmdb::TitleCandidate;

use crate::candidates::{ImportCandidate, ImportScanner};
use crate::error::ImportError;

/// The wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    SelectSource,
    SelectMode,
    SelectKind,
    CollectIdentity,
    CollectPlacement,
    Preview,
    Committed,
}

/// Whether the import creates a new entry or extends an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    NewMedia,
    AddToExisting,
}

/// Read-only summary shown before commit. Producing one performs no
/// filesystem mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPreview {
    /// Entry directory the disk will land in.
    pub destination: PathBuf,
    /// Directory name the disk will get inside the entry.
    pub disk_dir_name: String,
    /// Detected or overridden format going into the name.
    pub format: DiskFormat,
    /// Current content size of the source.
    pub size_bytes: u64,
    pub mode: ImportMode,
}

/// What a successful commit produced.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub entry: MediaEntry,
    pub disk: Disk,
}

/// One wizard interaction. Never persisted; dropped on cancel.
#[derive(Debug, Default)]
pub struct ImportSession {
    step: Step,
    candidate: Option<ImportCandidate>,
    mode: Option<ImportMode>,
    kind: Option<MediaKind>,
    title: Option<String>,
    year: Option<u32>,
    tmdb_id: Option<String>,
    existing: Option<MediaEntry>,
    placement: Option<DiskPlacement>,
    disk_label: Option<String>,
    format_override: Option<DiskFormat>,
    last_error: Option<String>,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// The error attached by the last failed commit, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn candidate(&self) -> Option<&ImportCandidate> {
        self.candidate.as_ref()
    }

    /// The format the import will use: a manual override when present,
    /// otherwise whatever was detected on the source.
    pub fn effective_format(&self) -> Option<DiskFormat> {
        self.format_override
            .clone()
            .or_else(|| self.candidate.as_ref().and_then(|c| c.detected.clone()))
    }

    // ── Forward transitions ─────────────────────────────────────────────────

    /// Choose the source directory to import.
    pub fn select_source(
        &mut self,
        scanner: &ImportScanner,
        name: &str,
    ) -> Result<(), ImportError> {
        self.expect(Step::SelectSource)?;
        let candidate = scanner.candidate(name)?;
        // A new source means the old detection no longer applies.
        if self.candidate.as_ref().is_some_and(|c| c.path != candidate.path) {
            self.format_override = None;
        }
        self.candidate = Some(candidate);
        self.step = Step::SelectMode;
        Ok(())
    }

    /// Choose between creating a new entry and extending an existing one.
    /// The `add-to-existing` branch is unavailable while the catalog is
    /// empty.
    pub fn select_mode(
        &mut self,
        mode: ImportMode,
        repo: &CatalogRepository,
    ) -> Result<(), ImportError> {
        self.expect(Step::SelectMode)?;
        if mode == ImportMode::AddToExisting && repo.list()?.is_empty() {
            return Err(ImportError::NoExistingEntries);
        }

        if self.mode != Some(mode) {
            // Re-choosing invalidates the identity collected for the other
            // branch; placement and format survive if still applicable.
            match mode {
                ImportMode::NewMedia => self.existing = None,
                ImportMode::AddToExisting => {
                    self.kind = None;
                    self.title = None;
                    self.year = None;
                    self.tmdb_id = None;
                }
            }
        }
        self.mode = Some(mode);
        self.step = match mode {
            ImportMode::NewMedia => Step::SelectKind,
            ImportMode::AddToExisting => Step::CollectIdentity,
        };
        Ok(())
    }

    /// Choose Film or TV for a new entry.
    pub fn select_kind(&mut self, kind: MediaKind) -> Result<(), ImportError> {
        self.expect(Step::SelectKind)?;
        if self.kind != Some(kind) {
            match kind {
                // Placement is a TV concept.
                MediaKind::Film => self.placement = None,
                // Years belong to films only.
                MediaKind::Tv => self.year = None,
            }
        }
        self.kind = Some(kind);
        self.step = Step::CollectIdentity;
        Ok(())
    }

    /// Supply the title (and year, for films) of a new entry by hand.
    pub fn set_new_identity(&mut self, title: &str, year: Option<u32>) -> Result<(), ImportError> {
        self.expect(Step::CollectIdentity)?;
        if self.mode != Some(ImportMode::NewMedia) {
            return Err(self.wrong_step(Step::CollectIdentity));
        }
        let title = title.trim();
        if title.is_empty() {
            return Err(ImportError::TitleRequired);
        }
        if self.kind == Some(MediaKind::Film) && year.is_none() {
            return Err(ImportError::YearRequired);
        }
        self.title = Some(title.to_string());
        self.year = if self.kind == Some(MediaKind::Film) {
            year
        } else {
            None
        };
        self.tmdb_id = None;
        self.step = Step::CollectPlacement;
        Ok(())
    }

    /// Adopt a provider search hit as the identity of a new entry: title and
    /// year come from the candidate, and its id will be linked after the
    /// import lands.
    pub fn adopt_candidate(&mut self, candidate: &TitleCandidate) -> Result<(), ImportError> {
        self.expect(Step::CollectIdentity)?;
        if self.mode != Some(ImportMode::NewMedia) {
            return Err(self.wrong_step(Step::CollectIdentity));
        }
        if self.kind == Some(MediaKind::Film) && candidate.year.is_none() {
            return Err(ImportError::YearRequired);
        }
        self.title = Some(candidate.title.clone());
        self.year = if self.kind == Some(MediaKind::Film) {
            candidate.year
        } else {
            None
        };
        self.tmdb_id = Some(candidate.id.clone());
        self.step = Step::CollectPlacement;
        Ok(())
    }

    /// Point the import at an existing catalog entry.
    pub fn set_existing_target(&mut self, entry: &MediaEntry) -> Result<(), ImportError> {
        self.expect(Step::CollectIdentity)?;
        if self.mode != Some(ImportMode::AddToExisting) {
            return Err(self.wrong_step(Step::CollectIdentity));
        }
        if entry.kind == MediaKind::Film {
            self.placement = None;
        }
        self.kind = Some(entry.kind);
        self.existing = Some(entry.clone());
        self.step = Step::CollectPlacement;
        Ok(())
    }

    /// Supply season and disk numbers (TV imports).
    pub fn set_placement(&mut self, season: u32, number: u32) -> Result<(), ImportError> {
        self.expect(Step::CollectPlacement)?;
        if season == 0 || number == 0 {
            return Err(ImportError::InvalidPlacement);
        }
        self.placement = Some(DiskPlacement { season, number });
        Ok(())
    }

    /// Supply a custom disk label (film imports; defaults to `Disk`).
    pub fn set_disk_label(&mut self, label: &str) -> Result<(), ImportError> {
        self.expect(Step::CollectPlacement)?;
        let label = label.trim();
        self.disk_label = (!label.is_empty()).then(|| label.to_string());
        Ok(())
    }

    /// Override the detected format. Stored verbatim and always preferred
    /// over detection from here on.
    pub fn override_format(&mut self, format: DiskFormat) -> Result<(), ImportError> {
        self.expect(Step::CollectPlacement)?;
        self.format_override = Some(format);
        Ok(())
    }

    /// Validate the placement step and move to the preview.
    pub fn confirm_placement(&mut self) -> Result<(), ImportError> {
        self.expect(Step::CollectPlacement)?;
        if self.kind == Some(MediaKind::Tv) && self.placement.is_none() {
            return Err(ImportError::PlacementRequired);
        }
        if self.effective_format().is_none() {
            return Err(ImportError::FormatRequired);
        }
        self.step = Step::Preview;
        Ok(())
    }

    // ── Preview and commit ──────────────────────────────────────────────────

    /// Produce the read-only commit summary. Recomputes the source size on
    /// every call and mutates nothing; the session stays in `Preview`.
    pub fn preview(&self, repo: &CatalogRepository) -> Result<ImportPreview, ImportError> {
        self.expect(Step::Preview)?;
        let candidate = self.require_candidate()?;
        let format = self.effective_format().ok_or(ImportError::FormatRequired)?;

        let disk_dir_name = self.disk_dir_name(&format);
        let destination = match (self.mode, &self.existing) {
            (Some(ImportMode::AddToExisting), Some(entry)) => entry.path.clone(),
            _ => repo.root().join(self.entry_dir_name()?),
        };
        let size_bytes = shelf_core::dir_size(&candidate.path)?;

        Ok(ImportPreview {
            destination,
            disk_dir_name,
            format,
            size_bytes,
            mode: self.mode.unwrap_or(ImportMode::NewMedia),
        })
    }

    /// Perform the import. On success the session is `Committed` and done;
    /// on failure it stays in `Preview` with the error attached so the
    /// commit can be retried as-is.
    pub fn commit(&mut self, repo: &CatalogRepository) -> Result<ImportOutcome, ImportError> {
        self.expect(Step::Preview)?;
        let candidate = self.require_candidate()?.clone();
        if !candidate.path.is_dir() {
            return self.fail(ImportError::SourceNotFound(candidate.name));
        }
        let format = match self.effective_format() {
            Some(format) => format,
            None => return self.fail(ImportError::FormatRequired),
        };

        let label = self.disk_label.clone().unwrap_or_default();
        let result = match self.mode {
            Some(ImportMode::AddToExisting) => {
                let entry = match &self.existing {
                    Some(entry) => entry.clone(),
                    None => return self.fail(self.wrong_step(Step::CollectIdentity)),
                };
                repo.add_disk(&entry, &candidate.path, &label, &format, self.placement)
                    .map(|disk| (entry, disk))
                    .map_err(ImportError::from)
            }
            _ => self.commit_new(repo, &candidate, &label, &format),
        };

        match result {
            Ok((entry, disk)) => {
                self.step = Step::Committed;
                self.last_error = None;
                log::info!(
                    "Import committed: {} / {}",
                    entry.dir_name(),
                    disk.path.display()
                );
                Ok(ImportOutcome { entry, disk })
            }
            Err(err) => self.fail(err),
        }
    }

    /// Commit path for a new entry: create it, move the disk in, roll the
    /// empty entry back if the move fails so a retry starts clean.
    fn commit_new(
        &self,
        repo: &CatalogRepository,
        candidate: &ImportCandidate,
        label: &str,
        format: &DiskFormat,
    ) -> Result<(MediaEntry, Disk), ImportError> {
        let kind = self.kind.ok_or_else(|| self.wrong_step(Step::SelectKind))?;
        let title = self.title.as_deref().ok_or(ImportError::TitleRequired)?;

        let entry = repo.create_entry(kind, title, self.year)?;
        match repo.add_disk(&entry, &candidate.path, label, format, self.placement) {
            Ok(disk) => {
                if let Some(id) = &self.tmdb_id {
                    match sidecar::init_tmdb_id(&entry.path, id) {
                        Ok(_) => {}
                        Err(err) => {
                            log::warn!("Imported {} but could not record TMDB id: {err}", entry.dir_name());
                        }
                    }
                }
                Ok((entry, disk))
            }
            Err(err) => {
                if let Err(cleanup) = std::fs::remove_dir(&entry.path) {
                    log::warn!(
                        "Could not roll back entry {} after failed import: {cleanup}",
                        entry.dir_name()
                    );
                }
                Err(err.into())
            }
        }
    }

    // ── Navigation ──────────────────────────────────────────────────────────

    /// Step back to the previous wizard step. Collected fields are kept; a
    /// different choice on the earlier step clears what stops applying.
    pub fn back(&mut self) -> Result<(), ImportError> {
        let previous = match self.step() {
            Step::SelectSource => Step::SelectSource,
            Step::SelectMode => Step::SelectSource,
            Step::SelectKind => Step::SelectMode,
            Step::CollectIdentity => match self.mode {
                Some(ImportMode::AddToExisting) => Step::SelectMode,
                _ => Step::SelectKind,
            },
            Step::CollectPlacement => Step::CollectIdentity,
            Step::Preview => Step::CollectPlacement,
            Step::Committed => return Err(self.wrong_step(Step::Preview)),
        };
        self.step = previous;
        Ok(())
    }

    /// Abandon the wizard. Legal from every state; nothing on disk changes.
    pub fn cancel(self) {
        if let Some(candidate) = &self.candidate {
            log::info!("Import of {} cancelled", candidate.name);
        }
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn expect(&self, step: Step) -> Result<(), ImportError> {
        if self.step() == step {
            Ok(())
        } else {
            Err(ImportError::WrongStep {
                expected: step,
                found: self.step(),
            })
        }
    }

    fn wrong_step(&self, expected: Step) -> ImportError {
        ImportError::WrongStep {
            expected,
            found: self.step(),
        }
    }

    fn require_candidate(&self) -> Result<&ImportCandidate, ImportError> {
        self.candidate
            .as_ref()
            .ok_or_else(|| self.wrong_step(Step::SelectSource))
    }

    fn entry_dir_name(&self) -> Result<String, ImportError> {
        let title = self.title.as_deref().ok_or(ImportError::TitleRequired)?;
        match self.kind {
            Some(MediaKind::Film) => {
                let year = self.year.ok_or(ImportError::YearRequired)?;
                Ok(shelf_catalog::film_dir_name(title, year))
            }
            _ => Ok(shelf_catalog::tv_dir_name(title)),
        }
    }

    fn disk_dir_name(&self, format: &DiskFormat) -> String {
        match (self.kind, self.placement) {
            (Some(MediaKind::Tv), Some(placement)) => {
                tv_disk_dir_name(placement.season, placement.number, format)
            }
            _ => film_disk_dir_name(self.disk_label.as_deref().unwrap_or(""), format),
        }
    }

    fn fail<T>(&mut self, err: ImportError) -> Result<T, ImportError> {
        self.last_error = Some(err.to_string());
        Err(err)
    }
}
