//! Disk-layout classification.
//!
//! A raw disk backup is identified by the marker structures the authoring
//! standards mandate: a Blu-Ray backup has a `BDMV/` directory with an
//! `index.bdmv` at its root, a DVD backup has a `VIDEO_TS/` directory
//! containing `.IFO` navigation files. Classification only reads the
//! directory — it never creates, touches, or reorders anything.

use std::path::Path;

use crate::format::DiskFormat;

/// Detect the disk format of a source directory.
///
/// Returns `None` when no known layout is present (including when the path
/// does not exist or cannot be read); callers must then collect a manual
/// format label before the source can be imported.
pub fn classify(path: &Path) -> Option<DiskFormat> {
    if has_bdmv_index(&path.join("BDMV")) {
        return Some(DiskFormat::BluRay);
    }
    if has_ifo_file(&path.join("VIDEO_TS")) {
        return Some(DiskFormat::Dvd);
    }
    None
}

/// True if `bdmv` is a directory containing an `index.bdmv` (any case).
fn has_bdmv_index(bdmv: &Path) -> bool {
    if !bdmv.is_dir() {
        return false;
    }
    let Ok(entries) = std::fs::read_dir(bdmv) else {
        return false;
    };
    entries.filter_map(|e| e.ok()).any(|e| {
        e.file_name()
            .to_str()
            .is_some_and(|name| name.eq_ignore_ascii_case("index.bdmv"))
    })
}

/// True if `video_ts` is a directory containing at least one `.IFO` file.
fn has_ifo_file(video_ts: &Path) -> bool {
    if !video_ts.is_dir() {
        return false;
    }
    let Ok(entries) = std::fs::read_dir(video_ts) else {
        return false;
    };
    entries.filter_map(|e| e.ok()).any(|e| {
        e.path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ifo"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn detects_blu_ray_layout() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("BDMV")).unwrap();
        fs::write(tmp.path().join("BDMV/index.bdmv"), b"INDX").unwrap();

        assert_eq!(classify(tmp.path()), Some(DiskFormat::BluRay));
    }

    #[test]
    fn detects_dvd_layout() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("VIDEO_TS")).unwrap();
        fs::write(tmp.path().join("VIDEO_TS/VIDEO_TS.IFO"), b"DVDVIDEO").unwrap();

        assert_eq!(classify(tmp.path()), Some(DiskFormat::Dvd));
    }

    #[test]
    fn blu_ray_wins_over_dvd() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("BDMV")).unwrap();
        fs::write(tmp.path().join("BDMV/index.bdmv"), b"INDX").unwrap();
        fs::create_dir(tmp.path().join("VIDEO_TS")).unwrap();
        fs::write(tmp.path().join("VIDEO_TS/VTS_01_0.IFO"), b"DVDVIDEO").unwrap();

        assert_eq!(classify(tmp.path()), Some(DiskFormat::BluRay));
    }

    #[test]
    fn bdmv_without_index_is_unknown() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("BDMV")).unwrap();

        assert_eq!(classify(tmp.path()), None);
    }

    #[test]
    fn video_ts_without_ifo_is_unknown() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("VIDEO_TS")).unwrap();
        fs::write(tmp.path().join("VIDEO_TS/VTS_01_1.VOB"), b"").unwrap();

        assert_eq!(classify(tmp.path()), None);
    }

    #[test]
    fn empty_directory_is_unknown() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(classify(tmp.path()), None);
    }

    #[test]
    fn missing_path_is_unknown() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(classify(&tmp.path().join("nope")), None);
    }

    #[test]
    fn classification_is_idempotent_and_read_only() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("BDMV")).unwrap();
        fs::write(tmp.path().join("BDMV/index.bdmv"), b"INDX").unwrap();

        let first = classify(tmp.path());
        let second = classify(tmp.path());
        assert_eq!(first, second);

        // Still exactly one entry at the root and one inside BDMV.
        let root: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(root.len(), 1);
        let inner: Vec<_> = fs::read_dir(tmp.path().join("BDMV")).unwrap().collect();
        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn lowercase_markers_still_match() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("BDMV")).unwrap();
        fs::write(tmp.path().join("BDMV/INDEX.BDMV"), b"INDX").unwrap();

        assert_eq!(classify(tmp.path()), Some(DiskFormat::BluRay));
    }
}
