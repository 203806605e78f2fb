//! Library settings (catalog root, import root, playback prefix).
//!
//! Resolution follows a priority chain per value:
//!
//! 1. Environment variable (`MEDIA_DIR`, `IMPORT_DIR`, `PLAY_URL_PREFIX`)
//! 2. `settings.toml` under the user config directory
//!
//! The media root is mandatory and must be an existing directory — a host
//! cannot start without a catalog. The import root is optional; leaving it
//! unset disables importing. The playback prefix is free text prepended to
//! generated player paths for network-share setups.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MEDIA_DIR_ENV: &str = "MEDIA_DIR";
pub const IMPORT_DIR_ENV: &str = "IMPORT_DIR";
pub const PLAY_URL_PREFIX_ENV: &str = "PLAY_URL_PREFIX";

/// Errors from settings resolution.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("No media directory configured: set {MEDIA_DIR_ENV} or [library] media_root in {0}")]
    MediaRootUnset(PathBuf),

    #[error("Media directory does not exist: {0}")]
    MediaRootMissing(PathBuf),

    #[error("Media path is not a directory: {0}")]
    MediaRootNotDirectory(PathBuf),

    #[error("Import path is not a directory: {0}")]
    ImportRootNotDirectory(PathBuf),
}

/// Resolved library configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root of the media catalog tree.
    pub media_root: PathBuf,
    /// Root holding raw disk backups awaiting import, when importing is
    /// enabled.
    pub import_root: Option<PathBuf>,
    /// Prefix prepended to paths in generated playback commands.
    pub play_url_prefix: Option<String>,
}

/// Canonical path to the settings file: `~/.config/shelf/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("shelf").join("settings.toml")
}

impl Settings {
    /// Resolve settings from the environment and the default settings file.
    pub fn resolve() -> Result<Self, SettingsError> {
        Self::resolve_from(&settings_path())
    }

    /// Resolve settings with an explicit settings-file path (for tests and
    /// unusual hosts). Environment variables still take priority.
    pub fn resolve_from(settings_file: &Path) -> Result<Self, SettingsError> {
        let file = load_library_table(settings_file);

        let media_root = env_path(MEDIA_DIR_ENV)
            .or_else(|| file_path(&file, "media_root"))
            .ok_or_else(|| SettingsError::MediaRootUnset(settings_file.to_path_buf()))?;
        if !media_root.exists() {
            return Err(SettingsError::MediaRootMissing(media_root));
        }
        if !media_root.is_dir() {
            return Err(SettingsError::MediaRootNotDirectory(media_root));
        }

        let import_root = env_path(IMPORT_DIR_ENV).or_else(|| file_path(&file, "import_root"));
        if let Some(root) = &import_root
            && !root.is_dir()
        {
            return Err(SettingsError::ImportRootNotDirectory(root.clone()));
        }

        let play_url_prefix = std::env::var(PLAY_URL_PREFIX_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .or_else(|| file_string(&file, "play_url_prefix"));

        Ok(Self {
            media_root,
            import_root,
            play_url_prefix,
        })
    }
}

// ── File access ─────────────────────────────────────────────────────────────

/// Load the `[library]` table from `settings.toml`, tolerating a missing or
/// malformed file (env-only configuration is fine).
fn load_library_table(settings_file: &Path) -> Option<toml::Value> {
    let contents = std::fs::read_to_string(settings_file).ok()?;
    let doc: toml::Value = match contents.parse() {
        Ok(doc) => doc,
        Err(err) => {
            log::warn!("Ignoring malformed {}: {err}", settings_file.display());
            return None;
        }
    };
    doc.get("library").cloned()
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn file_path(table: &Option<toml::Value>, key: &str) -> Option<PathBuf> {
    file_string(table, key).map(PathBuf::from)
}

fn file_string(table: &Option<toml::Value>, key: &str) -> Option<String> {
    let value = table.as_ref()?.get(key)?.as_str()?;
    (!value.is_empty()).then(|| value.to_string())
}
