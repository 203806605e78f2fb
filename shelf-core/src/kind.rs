//! Media kind: feature film or episodic television.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The two kinds of catalog entry.
///
/// Films carry a release year in their canonical directory name; TV shows do
/// not, and their disks are placed by (season, disk number) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Film,
    Tv,
}

impl MediaKind {
    /// The tag used in canonical directory names: `Film` or `TV`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Film => "Film",
            Self::Tv => "TV",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a kind string is not recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown media kind: {0}")]
pub struct KindParseError(pub String);

impl FromStr for MediaKind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "film" | "movie" => Ok(Self::Film),
            "tv" | "series" | "show" => Ok(Self::Tv),
            other => Err(KindParseError(other.to_string())),
        }
    }
}
