//! Persistent per-entry disk-size cache.
//!
//! Recursively summing a 40 GB Blu-Ray backup on every scan is too slow, so
//! each entry directory carries a `sizes.json` mapping disk directory names
//! to byte counts. The cache is advisory: a missing or corrupt file is an
//! empty cache, and the repository drops the whole file whenever it mutates
//! the entry.

use std::collections::HashMap;
use std::io;
use std::path::Path;

/// Cache file name inside each entry directory.
pub const FILE_NAME: &str = "sizes.json";

/// Load the size cache of an entry directory. Missing or unparseable files
/// yield an empty map.
pub fn load(entry_dir: &Path) -> HashMap<String, u64> {
    let path = entry_dir.join(FILE_NAME);
    let Ok(data) = std::fs::read_to_string(&path) else {
        return HashMap::new();
    };
    match serde_json::from_str(&data) {
        Ok(cache) => cache,
        Err(err) => {
            log::warn!("Ignoring corrupt size cache {}: {err}", path.display());
            HashMap::new()
        }
    }
}

/// Write the size cache of an entry directory. Pretty-printed, and written
/// via a temporary file plus rename; concurrent readers see the old document
/// or the new one, never a truncated one.
pub fn save(entry_dir: &Path, cache: &HashMap<String, u64>) -> io::Result<()> {
    let serialized = serde_json::to_string_pretty(cache).map_err(io::Error::other)?;
    let path = entry_dir.join(FILE_NAME);
    let tmp = entry_dir.join(format!(".{FILE_NAME}.tmp"));
    std::fs::write(&tmp, serialized)?;
    std::fs::rename(&tmp, &path)?;
    Ok(())
}

/// Drop the cache of an entry directory. Called inside the repository's
/// mutation critical section so a concurrent reader cannot observe a stale
/// size for a freshly added disk.
pub fn invalidate(entry_dir: &Path) -> io::Result<()> {
    match std::fs::remove_file(entry_dir.join(FILE_NAME)) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}
