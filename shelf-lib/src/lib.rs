//! Host-facing assembly of the catalog library.
//!
//! Frontends (web UI, CLI, tests) configure the library once through
//! [`Settings`] and then work against a [`LibraryContext`], which owns the
//! repository, the optional import scanner, and the optional metadata
//! provider. Nothing in the workspace reads ambient global state; every
//! component receives what it needs from here.

pub mod context;
pub mod settings;

pub use context::{ContextError, LibraryContext};
pub use settings::{Settings, SettingsError};
