//! The assembled library context.

use shelf_catalog::{CatalogError, CatalogRepository};
use shelf_import::{ImportError, ImportScanner};
use shelf_tmdb::TitleProvider;

use crate::settings::Settings;

/// Everything a frontend needs, built once at startup from [`Settings`].
///
/// The repository is always present. The import scanner exists only when an
/// import root is configured; the metadata provider only when the host
/// installed one (no provider means search and linking are unavailable, the
/// catalog itself is unaffected).
pub struct LibraryContext {
    repository: CatalogRepository,
    imports: Option<ImportScanner>,
    provider: Option<Box<dyn TitleProvider + Send + Sync>>,
    play_url_prefix: Option<String>,
}

/// Errors from assembling a context.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Import(#[from] ImportError),
}

impl LibraryContext {
    /// Build a context from resolved settings.
    pub fn open(settings: Settings) -> Result<Self, ContextError> {
        let repository = CatalogRepository::new(&settings.media_root)?;
        let imports = match &settings.import_root {
            Some(root) => Some(ImportScanner::new(root)?),
            None => {
                log::info!("No import directory configured; importing disabled");
                None
            }
        };
        Ok(Self {
            repository,
            imports,
            provider: None,
            play_url_prefix: settings.play_url_prefix,
        })
    }

    /// Install the host's metadata provider.
    pub fn with_provider(mut self, provider: Box<dyn TitleProvider + Send + Sync>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn repository(&self) -> &CatalogRepository {
        &self.repository
    }

    /// The import scanner, when an import root is configured.
    pub fn imports(&self) -> Option<&ImportScanner> {
        self.imports.as_ref()
    }

    /// The metadata provider, when the host installed one.
    pub fn provider(&self) -> Option<&(dyn TitleProvider + Send + Sync)> {
        self.provider.as_deref()
    }

    /// Prefix for generated playback command paths.
    pub fn play_url_prefix(&self) -> Option<&str> {
        self.play_url_prefix.as_deref()
    }
}
