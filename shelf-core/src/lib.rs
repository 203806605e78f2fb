//! Core types for the media backup catalog.
//!
//! This crate defines the leaf vocabulary shared by every other crate in the
//! workspace: media kinds, disk formats, disk-layout classification, playback
//! command generation, and small filesystem helpers. It has no knowledge of
//! the catalog directory layout itself.

pub mod classify;
pub mod format;
pub mod kind;
pub mod playback;
pub mod util;

pub use classify::classify;
pub use format::{DiskFormat, PlaybackFamily};
pub use kind::{KindParseError, MediaKind};
pub use playback::{PlaybackCommands, playback_commands};
pub use util::{dir_size, format_gib, sanitize_name};
