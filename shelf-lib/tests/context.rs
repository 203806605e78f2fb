use std::fs;
use std::path::Path;

use shelf_core::MediaKind;
use shelf_lib::{LibraryContext, Settings, SettingsError};
use shelf_tmdb::{FetchedMetadata, ProviderError, TitleCandidate, TitleProvider};
use tempfile::TempDir;

fn write_settings(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("settings.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn resolves_roots_from_settings_file() {
    let _ = env_logger::builder().is_test(true).try_init();
    let tmp = TempDir::new().unwrap();
    let media = tmp.path().join("media");
    let imports = tmp.path().join("imports");
    fs::create_dir_all(&media).unwrap();
    fs::create_dir_all(&imports).unwrap();

    let settings_file = write_settings(
        tmp.path(),
        &format!(
            "[library]\nmedia_root = \"{}\"\nimport_root = \"{}\"\nplay_url_prefix = \"/mnt/nas\"\n",
            media.display(),
            imports.display()
        ),
    );

    let settings = Settings::resolve_from(&settings_file).unwrap();
    assert_eq!(settings.media_root, media);
    assert_eq!(settings.import_root.as_deref(), Some(imports.as_path()));
    assert_eq!(settings.play_url_prefix.as_deref(), Some("/mnt/nas"));
}

#[test]
fn unset_media_root_is_a_hard_error() {
    let tmp = TempDir::new().unwrap();
    let settings_file = write_settings(tmp.path(), "[library]\n");

    let err = Settings::resolve_from(&settings_file).unwrap_err();
    assert!(matches!(err, SettingsError::MediaRootUnset(_)));
}

#[test]
fn missing_media_root_is_a_hard_error() {
    let tmp = TempDir::new().unwrap();
    let settings_file = write_settings(
        tmp.path(),
        &format!(
            "[library]\nmedia_root = \"{}\"\n",
            tmp.path().join("gone").display()
        ),
    );

    let err = Settings::resolve_from(&settings_file).unwrap_err();
    assert!(matches!(err, SettingsError::MediaRootMissing(_)));
}

#[test]
fn malformed_settings_file_is_ignored() {
    let tmp = TempDir::new().unwrap();
    let settings_file = write_settings(tmp.path(), "not [ valid toml");

    let err = Settings::resolve_from(&settings_file).unwrap_err();
    assert!(matches!(err, SettingsError::MediaRootUnset(_)));
}

#[test]
fn import_root_is_optional() {
    let tmp = TempDir::new().unwrap();
    let media = tmp.path().join("media");
    fs::create_dir_all(&media).unwrap();
    let settings_file = write_settings(
        tmp.path(),
        &format!("[library]\nmedia_root = \"{}\"\n", media.display()),
    );

    let settings = Settings::resolve_from(&settings_file).unwrap();
    assert_eq!(settings.import_root, None);

    // Without an import root the context still opens; importing is off.
    let context = LibraryContext::open(settings).unwrap();
    assert!(context.imports().is_none());
    assert!(context.repository().list().unwrap().is_empty());
}

struct NoopProvider;

impl TitleProvider for NoopProvider {
    fn search_titles(
        &self,
        _kind: MediaKind,
        _query: &str,
    ) -> Result<Vec<TitleCandidate>, ProviderError> {
        Ok(Vec::new())
    }

    fn fetch_metadata(
        &self,
        _kind: MediaKind,
        id: &str,
    ) -> Result<FetchedMetadata, ProviderError> {
        Err(ProviderError::InvalidId(id.to_string()))
    }
}

#[test]
fn context_carries_provider_and_prefix() {
    let tmp = TempDir::new().unwrap();
    let media = tmp.path().join("media");
    fs::create_dir_all(&media).unwrap();

    let settings = Settings {
        media_root: media,
        import_root: None,
        play_url_prefix: Some("/mnt/nas".to_string()),
    };
    let context = LibraryContext::open(settings)
        .unwrap()
        .with_provider(Box::new(NoopProvider));

    assert!(context.provider().is_some());
    assert_eq!(context.play_url_prefix(), Some("/mnt/nas"));
}
