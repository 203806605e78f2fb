//! Playback command generation.
//!
//! Each disk gets one VLC and one MPV invocation, copy-pasteable into a
//! shell. The addressing scheme depends on the disk format: Blu-Ray backups
//! need the player pointed at the directory containing `BDMV/` with the
//! player's Blu-Ray menu syntax, DVDs at the directory containing
//! `VIDEO_TS/`, and anything else is handed over as a plain path.

use std::path::Path;

use crate::format::{DiskFormat, PlaybackFamily};

/// The pair of player invocations generated for one disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackCommands {
    pub vlc: String,
    pub mpv: String,
}

/// Build VLC and MPV commands for a disk rooted at `path`.
///
/// `prefix` is prepended to the path verbatim when the catalog is served from
/// a different mount point than the one the player sees (network shares).
pub fn playback_commands(path: &Path, format: &DiskFormat, prefix: Option<&str>) -> PlaybackCommands {
    let mut full = String::new();
    if let Some(p) = prefix {
        full.push_str(p);
    }
    full.push_str(&path.to_string_lossy());

    match format.playback_family() {
        PlaybackFamily::BluRay => PlaybackCommands {
            vlc: format!("vlc {}", quote(&format!("bluray://{full}"))),
            mpv: format!("mpv bd:// --bluray-device={}", quote(&full)),
        },
        PlaybackFamily::Dvd => PlaybackCommands {
            vlc: format!("vlc {}", quote(&format!("dvd://{full}"))),
            mpv: format!("mpv dvd:// --dvd-device={}", quote(&full)),
        },
        PlaybackFamily::Plain => PlaybackCommands {
            vlc: format!("vlc {}", quote(&format!("file://{full}"))),
            mpv: format!("mpv {}", quote(&full)),
        },
    }
}

/// Double-quote a string for the shell, escaping the characters that stay
/// active inside double quotes. Catalog paths always contain spaces and
/// brackets, so quoting is unconditional.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        if matches!(ch, '"' | '$' | '`' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}
