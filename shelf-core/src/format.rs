//! Disk format tags.
//!
//! A disk's format is recorded verbatim in its directory name (the bracketed
//! suffix, e.g. `Disk [Blu-Ray]`). The two formats the classifier can detect
//! get dedicated variants; anything else — manual overrides like `Blu-Ray UHD`
//! or `4K UHD` — is carried as free text and never normalized.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A disk's physical format tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiskFormat {
    BluRay,
    Dvd,
    /// A user-supplied format label, stored verbatim.
    Custom(String),
}

/// Which player addressing scheme a format needs.
///
/// Derived from the format label by substring match, so custom labels like
/// `Blu-Ray UHD` still get Blu-Ray menu addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackFamily {
    BluRay,
    Dvd,
    Plain,
}

impl DiskFormat {
    /// The label as written into (and read out of) disk directory names.
    pub fn as_str(&self) -> &str {
        match self {
            Self::BluRay => "Blu-Ray",
            Self::Dvd => "DVD",
            Self::Custom(label) => label,
        }
    }

    /// Parse a bracketed-format label. Exact matches map to the dedicated
    /// variants; everything else round-trips through [`DiskFormat::Custom`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "Blu-Ray" => Self::BluRay,
            "DVD" => Self::Dvd,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Classify the label for playback addressing.
    pub fn playback_family(&self) -> PlaybackFamily {
        let lower = self.as_str().to_lowercase();
        if lower.contains("blu-ray") || lower.contains("bluray") {
            PlaybackFamily::BluRay
        } else if lower.contains("dvd") {
            PlaybackFamily::Dvd
        } else {
            PlaybackFamily::Plain
        }
    }
}

impl fmt::Display for DiskFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
