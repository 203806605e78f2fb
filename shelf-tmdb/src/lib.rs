//! TMDB metadata-provider capability.
//!
//! The catalog never talks to TMDB itself. Hosts hand it an implementation of
//! [`TitleProvider`] — typically backed by the TMDB HTTP API — and the
//! library consumes it for title search during import and for fetching the
//! full metadata bundle when an entry is linked to an id. Keeping the
//! capability behind a trait keeps every consumer deterministic and testable
//! with an in-memory fake.

pub mod error;
pub mod types;

pub use error::ProviderError;
pub use types::{FetchedMetadata, TitleCandidate};

use shelf_core::MediaKind;

/// Search and fetch capability supplied by the host.
pub trait TitleProvider {
    /// Search for titles matching `query`, scoped to films or TV shows.
    fn search_titles(
        &self,
        kind: MediaKind,
        query: &str,
    ) -> Result<Vec<TitleCandidate>, ProviderError>;

    /// Fetch the full metadata bundle for a known TMDB id.
    ///
    /// An id the remote side does not recognize must come back as
    /// [`ProviderError::InvalidId`] so callers can leave existing metadata
    /// untouched.
    fn fetch_metadata(&self, kind: MediaKind, id: &str) -> Result<FetchedMetadata, ProviderError>;
}

/// Check the local well-formedness of a TMDB id: non-empty, digits only.
///
/// This does not confirm the id exists — only [`TitleProvider::fetch_metadata`]
/// can do that.
pub fn is_valid_tmdb_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_validation() {
        assert!(is_valid_tmdb_id("603"));
        assert!(is_valid_tmdb_id("0"));
        assert!(!is_valid_tmdb_id(""));
        assert!(!is_valid_tmdb_id("abc"));
        assert!(!is_valid_tmdb_id("12 3"));
        assert!(!is_valid_tmdb_id("-5"));
    }
}
