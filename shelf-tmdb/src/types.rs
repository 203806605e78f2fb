//! Data types crossing the provider boundary.

use serde::{Deserialize, Serialize};

/// One search hit, enough to let a user pick the right title during import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleCandidate {
    /// TMDB id as a numeric string.
    pub id: String,
    pub title: String,
    /// Release year (first-air year for TV), when the remote side knows it.
    #[serde(default)]
    pub year: Option<u32>,
    /// Short synopsis shown next to the candidate.
    #[serde(default)]
    pub overview: String,
}

/// The full metadata bundle fetched for a linked id.
///
/// Everything an entry's sidecars are derived from arrives together, so a
/// link change can replace the whole set in one operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchedMetadata {
    pub title: String,
    pub year: Option<u32>,
    pub overview: String,
    pub genres: Vec<String>,
    /// Poster image bytes (JPEG), when the title has one.
    pub poster: Option<Vec<u8>>,
}

impl TitleCandidate {
    /// Display label combining title and year, e.g. `The Matrix (1999)`.
    pub fn display_label(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({year})", self.title),
            None => self.title.clone(),
        }
    }
}
