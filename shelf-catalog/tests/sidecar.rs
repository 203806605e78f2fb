use std::fs;
use std::path::Path;

use shelf_catalog::{CatalogRepository, MediaEntry, sidecar};
use shelf_core::MediaKind;
use shelf_tmdb::{FetchedMetadata, ProviderError, TitleCandidate, TitleProvider};
use tempfile::TempDir;

fn make_entry(root: &Path) -> MediaEntry {
    let repo = CatalogRepository::new(root).unwrap();
    repo.create_entry(MediaKind::Film, "The Matrix", Some(1999))
        .unwrap()
}

fn sample_fetched() -> FetchedMetadata {
    FetchedMetadata {
        title: "The Matrix".to_string(),
        year: Some(1999),
        overview: "A computer hacker learns the truth.".to_string(),
        genres: vec!["Action".to_string(), "Science Fiction".to_string()],
        poster: Some(vec![0xFF, 0xD8, 0xFF, 0xE0]),
    }
}

#[test]
fn read_of_bare_entry_is_all_absent() {
    let tmp = TempDir::new().unwrap();
    let entry = make_entry(tmp.path());

    let meta = sidecar::read(&entry).unwrap();
    assert_eq!(meta.tmdb_id, None);
    assert_eq!(meta.title, None);
    assert_eq!(meta.description, None);
    assert!(meta.genres.is_empty());
    assert_eq!(meta.poster, None);
}

#[test]
fn individual_fields_write_independently() {
    let tmp = TempDir::new().unwrap();
    let entry = make_entry(tmp.path());

    sidecar::set_description(&entry, "A computer hacker learns the truth.\n").unwrap();
    sidecar::set_genres(&entry, &["Action".to_string(), " Sci-Fi ".to_string()]).unwrap();

    let meta = sidecar::read(&entry).unwrap();
    assert_eq!(
        meta.description.as_deref(),
        Some("A computer hacker learns the truth.")
    );
    assert_eq!(meta.genres, vec!["Action", "Sci-Fi"]);
    assert_eq!(meta.title, None);

    assert_eq!(
        fs::read_to_string(entry.path.join("genre.txt")).unwrap(),
        "Action, Sci-Fi"
    );
}

#[test]
fn title_override_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let entry = make_entry(tmp.path());

    sidecar::set_title_override(&entry, "The Matrix (Remastered)").unwrap();
    sidecar::set_title_override(&entry, "The Matrix (Remastered)").unwrap();
    let meta = sidecar::read(&entry).unwrap();
    assert_eq!(meta.title.as_deref(), Some("The Matrix (Remastered)"));
}

#[test]
fn set_tmdb_link_writes_the_whole_bundle() {
    let tmp = TempDir::new().unwrap();
    let entry = make_entry(tmp.path());

    let meta = sidecar::set_tmdb_link(&entry, "603", &sample_fetched()).unwrap();
    assert_eq!(meta.tmdb_id.as_deref(), Some("603"));
    assert_eq!(meta.title.as_deref(), Some("The Matrix"));
    assert_eq!(meta.genres, vec!["Action", "Science Fiction"]);
    assert_eq!(meta.poster.as_deref(), Some(&[0xFF, 0xD8, 0xFF, 0xE0][..]));

    assert_eq!(
        fs::read_to_string(entry.path.join("tmdb.txt")).unwrap(),
        "603"
    );
}

#[test]
fn changing_the_link_replaces_every_derived_field() {
    let tmp = TempDir::new().unwrap();
    let entry = make_entry(tmp.path());
    sidecar::set_tmdb_link(&entry, "603", &sample_fetched()).unwrap();

    // Change to a different id whose fetch carries no poster: nothing from
    // the old bundle may survive, including the poster file.
    let replacement = FetchedMetadata {
        title: "Bound".to_string(),
        year: Some(1996),
        overview: "Entirely different film.".to_string(),
        genres: vec!["Thriller".to_string()],
        poster: None,
    };
    let meta = sidecar::set_tmdb_link(&entry, "9303", &replacement).unwrap();

    assert_eq!(meta.tmdb_id.as_deref(), Some("9303"));
    assert_eq!(meta.title.as_deref(), Some("Bound"));
    assert_eq!(meta.description.as_deref(), Some("Entirely different film."));
    assert_eq!(meta.genres, vec!["Thriller"]);
    assert_eq!(meta.poster, None);
    assert!(!entry.path.join("poster.jpg").exists());
}

#[test]
fn malformed_ids_are_rejected_before_any_write() {
    let tmp = TempDir::new().unwrap();
    let entry = make_entry(tmp.path());

    for bad in ["", "abc", "12 3"] {
        let err = sidecar::set_tmdb_link(&entry, bad, &sample_fetched()).unwrap_err();
        assert!(matches!(err, sidecar::SidecarError::InvalidId(_)));
    }
    assert!(!entry.path.join("tmdb.txt").exists());
}

// ── Provider-backed linking ─────────────────────────────────────────────────

/// In-memory provider: one known film id.
struct FakeProvider;

impl TitleProvider for FakeProvider {
    fn search_titles(
        &self,
        _kind: MediaKind,
        query: &str,
    ) -> Result<Vec<TitleCandidate>, ProviderError> {
        if query.to_lowercase().contains("matrix") {
            Ok(vec![TitleCandidate {
                id: "603".to_string(),
                title: "The Matrix".to_string(),
                year: Some(1999),
                overview: String::new(),
            }])
        } else {
            Ok(Vec::new())
        }
    }

    fn fetch_metadata(&self, _kind: MediaKind, id: &str) -> Result<FetchedMetadata, ProviderError> {
        if id == "603" {
            Ok(sample_fetched())
        } else {
            Err(ProviderError::InvalidId(id.to_string()))
        }
    }
}

#[test]
fn link_with_provider_fetches_and_writes() {
    let tmp = TempDir::new().unwrap();
    let entry = make_entry(tmp.path());

    let meta = sidecar::link_with_provider(&entry, &FakeProvider, "603").unwrap();
    assert_eq!(meta.title.as_deref(), Some("The Matrix"));
    assert!(entry.path.join("poster.jpg").exists());
}

#[test]
fn rejected_id_preserves_prior_metadata() {
    let tmp = TempDir::new().unwrap();
    let entry = make_entry(tmp.path());
    sidecar::link_with_provider(&entry, &FakeProvider, "603").unwrap();

    let err = sidecar::link_with_provider(&entry, &FakeProvider, "999").unwrap_err();
    assert!(matches!(err, sidecar::SidecarError::Provider(_)));

    // The previous bundle is fully intact.
    let meta = sidecar::read(&entry).unwrap();
    assert_eq!(meta.tmdb_id.as_deref(), Some("603"));
    assert_eq!(meta.title.as_deref(), Some("The Matrix"));
    assert!(meta.poster.is_some());
}
