use thiserror::Error;

/// Errors a [`crate::TitleProvider`] implementation can return.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The remote side rejected the id — it is malformed or does not exist.
    #[error("TMDB id rejected: {0}")]
    InvalidId(String),

    /// The provider could not be reached or answered with garbage.
    #[error("Metadata provider unavailable: {0}")]
    Unavailable(String),
}
