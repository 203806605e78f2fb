//! The import pipeline: discover raw disk backups and walk them through the
//! wizard into the catalog.
//!
//! Raw sources live under a separate import root. [`ImportScanner`] lists
//! them as [`ImportCandidate`]s with their detected format; an
//! [`ImportSession`] then collects everything the catalog needs — new entry
//! or existing, film or TV, placement, format override — previews the
//! result, and finally hands the relocation to the repository in one commit.
//! Sessions are per-interaction state and are never persisted.

pub mod candidates;
pub mod error;
pub mod session;

pub use candidates::{ImportCandidate, ImportScanner};
pub use error::ImportError;
pub use session::{ImportMode, ImportOutcome, ImportPreview, ImportSession, Step};
